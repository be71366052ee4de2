use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use filescom_client::{ListIter, Params};
use filescom_core::plan::{PlanAction, PlannedChange, plan};
use filescom_core::provider::provider_schema_json;
use filescom_core::schema::Schema;
use filescom_core::value::attributes_to_json;
use filescom_core::{Attributes, Diagnostics, Provider, Resource, Severity, Value};
use filescom_provider::FilesProvider;
use filescom_provider::config::{API_KEY_ENV, ENDPOINT_ENV};
use filescom_provider::populate::populate;

mod state;

use state::{DEFAULT_STATE_FILE, LocalState, StateFile, attributes_from_document};

#[derive(Parser)]
#[command(name = "filescom")]
#[command(about = "Manage Files.com objects as data sources and resources", long_about = None)]
struct Cli {
    /// Files.com API key
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// API endpoint, for sites without global acceleration or a mock server
    #[arg(long, global = true, env = ENDPOINT_ENV)]
    endpoint: Option<String>,

    /// Path to the state file
    #[arg(long, global = true, default_value = DEFAULT_STATE_FILE)]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the provider schema as JSON
    Schema,
    /// Validate a configuration file against a resource or data source schema
    Validate {
        /// Type name (e.g., files_user)
        resource_type: String,
        /// Path to a JSON configuration file
        config: PathBuf,
    },
    /// Read a data source
    Read {
        /// Data source type name (e.g., files_site)
        data_source: String,
        /// Path to a JSON configuration file
        config: PathBuf,
    },
    /// List every object of a type
    List {
        /// Type name (e.g., files_group)
        resource_type: String,

        /// Stop after this many items
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Import an existing object into state
    Import {
        /// Resource type name
        resource_type: String,
        /// Object id, or path for folders
        id: String,
    },
    /// Create, update or replace a resource to match its configuration
    Apply {
        /// Resource type name
        resource_type: String,
        /// Name of the instance in state
        name: String,
        /// Path to a JSON configuration file
        config: PathBuf,
    },
    /// Delete a resource and drop it from state
    Destroy {
        /// Resource type name
        resource_type: String,
        /// Name of the instance in state
        name: String,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("FILES_LOG", "warn"))
        .init();

    let cli = Cli::parse();
    let store = LocalState::new(&cli.state);

    let result = match &cli.command {
        Commands::Schema => run_schema(&FilesProvider::new()),
        Commands::Validate {
            resource_type,
            config,
        } => run_validate(&FilesProvider::new(), resource_type, config),
        command => match configured_provider(&cli).await {
            Ok(provider) => run_command(&provider, &store, command).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run_command(
    provider: &FilesProvider,
    store: &LocalState,
    command: &Commands,
) -> Result<(), String> {
    match command {
        Commands::Read {
            data_source,
            config,
        } => run_read(provider, data_source, config).await,
        Commands::List {
            resource_type,
            limit,
        } => run_list(provider, resource_type, *limit).await,
        Commands::Import { resource_type, id } => {
            run_import(provider, store, resource_type, id).await
        }
        Commands::Apply {
            resource_type,
            name,
            config,
        } => run_apply(provider, store, resource_type, name, config).await,
        Commands::Destroy {
            resource_type,
            name,
        } => run_destroy(provider, store, resource_type, name).await,
        Commands::Schema | Commands::Validate { .. } => Ok(()),
    }
}

async fn configured_provider(cli: &Cli) -> Result<FilesProvider, String> {
    let mut config = Attributes::new();
    if let Some(key) = &cli.api_key {
        config.insert("api_key".to_string(), Value::string(key));
    }
    if let Some(endpoint) = &cli.endpoint {
        config.insert("endpoint_override".to_string(), Value::string(endpoint));
    }

    let mut provider = FilesProvider::new();
    let mut diags = Diagnostics::new();
    provider.configure(&config, &mut diags).await;
    report(&diags)?;
    Ok(provider)
}

/// Print diagnostics; fails when any of them is an error
fn report(diags: &Diagnostics) -> Result<(), String> {
    for diag in diags.iter() {
        let label = match diag.severity {
            Severity::Error => "Error:".red().bold(),
            Severity::Warning => "Warning:".yellow().bold(),
        };
        match &diag.attribute {
            Some(attr) => eprintln!("{} {} (attribute \"{}\")", label, diag.summary, attr),
            None => eprintln!("{} {}", label, diag.summary),
        }
        if !diag.detail.is_empty() {
            eprintln!("  {}", diag.detail);
        }
    }

    let errors = diags.errors().count();
    if errors > 0 {
        Err(format!("Operation failed with {} error(s)", errors))
    } else {
        Ok(())
    }
}

fn load_document(path: &Path) -> Result<serde_json::Value, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

fn find_schema(provider: &dyn Provider, type_name: &str) -> Result<Schema, String> {
    if let Ok(resource) = provider.resource(type_name) {
        return Ok(resource.schema().clone());
    }
    provider
        .data_source(type_name)
        .map(|d| d.schema().clone())
        .map_err(|e| e.to_string())
}

fn validate(schema: &Schema, config: &Attributes) -> Result<(), String> {
    if let Err(errors) = schema.validate_config(config) {
        for error in &errors {
            eprintln!("  {} {}", "•".red(), error);
        }
        return Err(format!(
            "{} has {} invalid attribute(s)",
            schema.type_name,
            errors.len()
        ));
    }
    Ok(())
}

fn print_attributes(schema: &Schema, attributes: &Attributes) {
    for (name, value) in attributes {
        if value.is_null() {
            continue;
        }
        let sensitive = schema.get(name).is_some_and(|a| a.sensitive);
        let text = if sensitive {
            "(sensitive)".dimmed().to_string()
        } else {
            value.display_text()
        };
        println!("  {} = {}", name.bold(), text);
    }
}

fn run_schema(provider: &dyn Provider) -> Result<(), String> {
    let doc = provider_schema_json(provider);
    let text = serde_json::to_string_pretty(&doc)
        .map_err(|e| format!("Failed to serialize schema: {}", e))?;
    println!("{}", text);
    Ok(())
}

fn run_validate(provider: &dyn Provider, type_name: &str, path: &Path) -> Result<(), String> {
    let schema = find_schema(provider, type_name)?;
    let config = attributes_from_document(&schema, &load_document(path)?);
    validate(&schema, &config)?;
    println!("{}", format!("{} is valid.", path.display()).green());
    Ok(())
}

async fn run_read(provider: &dyn Provider, type_name: &str, path: &Path) -> Result<(), String> {
    let data_source = provider.data_source(type_name).map_err(|e| e.to_string())?;
    let config = attributes_from_document(data_source.schema(), &load_document(path)?);
    validate(data_source.schema(), &config)?;

    let mut diags = Diagnostics::new();
    let state = data_source.read(&config, &mut diags).await;
    report(&diags)?;

    if let Some(state) = state {
        println!("{}", format!("data.{}", type_name).cyan().bold());
        print_attributes(data_source.schema(), &state);
    }
    Ok(())
}

async fn run_list(
    provider: &FilesProvider,
    type_name: &str,
    limit: Option<usize>,
) -> Result<(), String> {
    let config = provider
        .schema_config(type_name)
        .ok_or_else(|| format!("Unknown type: {}", type_name))?;
    let route = config
        .routes
        .list
        .ok_or_else(|| format!("{} cannot be listed", type_name))?;
    let api = provider
        .api()
        .ok_or_else(|| "Provider is not configured".to_string())?;

    let mut items = ListIter::new(api.as_ref(), route, Params::new());
    let mut count = 0;
    while let Some(item) = items.next().await.map_err(|e| e.to_string())? {
        let mut attributes = populate(&config.schema, &item, &Attributes::new());
        attributes.retain(|name, value| {
            !value.is_null() && !config.schema.get(name).is_some_and(|a| a.sensitive)
        });
        println!("{}", attributes_to_json(&attributes));
        count += 1;
        if limit.is_some_and(|l| count >= l) {
            break;
        }
    }

    println!(
        "{}",
        format!("{} item(s) in {} page(s)", count, items.pages()).dimmed()
    );
    Ok(())
}

async fn run_import(
    provider: &dyn Provider,
    store: &LocalState,
    type_name: &str,
    id: &str,
) -> Result<(), String> {
    let resource = provider.resource(type_name).map_err(|e| e.to_string())?;
    let mut state = store.load()?;
    let key = StateFile::key(type_name, id);
    if state.resources.contains_key(&key) {
        return Err(format!("{} is already managed in {}", key, store.path().display()));
    }

    let mut diags = Diagnostics::new();
    let imported = resource.import_state(id, &mut diags);
    report(&diags)?;
    let Some(imported) = imported else {
        return Ok(());
    };

    let current = resource.read(&imported, &mut diags).await;
    report(&diags)?;
    let current = current.ok_or_else(|| {
        format!(
            "Cannot import non-existent remote object: {} {}",
            type_name, id
        )
    })?;

    state.put(key.clone(), type_name, &current);
    store.save(&mut state)?;
    println!("{} {}", "✓".green(), format!("Imported {}", key).green());
    Ok(())
}

async fn run_apply(
    provider: &dyn Provider,
    store: &LocalState,
    type_name: &str,
    name: &str,
    path: &Path,
) -> Result<(), String> {
    let resource = provider.resource(type_name).map_err(|e| e.to_string())?;
    let schema = resource.schema();
    let config = attributes_from_document(schema, &load_document(path)?);
    validate(schema, &config)?;

    let mut state = store.load()?;
    let key = StateFile::key(type_name, name);
    let mut diags = Diagnostics::new();

    let prior = match state.get(&key, schema) {
        Some(stored) => {
            let refreshed = resource.read(&stored, &mut diags).await;
            report(&diags)?;
            if refreshed.is_none() {
                log::info!("{} was deleted outside of filescom", key);
            }
            refreshed
        }
        None => None,
    };

    let mut diags = Diagnostics::new();
    let (change, result) =
        apply_resource(resource.as_ref(), prior.as_ref(), &config, &mut diags).await;
    print_change(&key, &change);
    let outcome = report(&diags);

    match result {
        Some(attributes) => state.put(key.clone(), type_name, &attributes),
        None => {
            state.remove(&key);
        }
    }
    store.save(&mut state)?;
    outcome?;

    if change.is_change() {
        println!("{} {}", "✓".green(), format!("Applied {}", key).green());
    } else {
        println!("{}", "No changes. Resource is up-to-date.".green());
    }
    Ok(())
}

/// Plan `config` against `prior` and carry the change out. Returns the plan
/// and the resulting state; `None` means nothing exists remotely.
async fn apply_resource(
    resource: &dyn Resource,
    prior: Option<&Attributes>,
    config: &Attributes,
    diags: &mut Diagnostics,
) -> (PlannedChange, Option<Attributes>) {
    let change = plan(resource.schema(), prior, config);
    let result = match (change.action, prior) {
        (PlanAction::NoOp, _) => prior.cloned(),
        (PlanAction::Update, Some(prior)) => {
            match resource.update(&change.planned, prior, diags).await {
                Some(updated) => Some(updated),
                None => Some(prior.clone()),
            }
        }
        (PlanAction::Replace, Some(prior)) => {
            resource.delete(prior, diags).await;
            if diags.has_errors() {
                Some(prior.clone())
            } else {
                resource.create(&change.planned, diags).await
            }
        }
        _ => resource.create(&change.planned, diags).await,
    };
    (change, result)
}

fn print_change(key: &str, change: &PlannedChange) {
    let (symbol, verb) = match change.action {
        PlanAction::Create => ("+".green(), "created"),
        PlanAction::Update => ("~".yellow(), "updated in-place"),
        PlanAction::Replace => ("-/+".red(), "replaced"),
        PlanAction::NoOp => return,
    };
    println!("{} {} will be {}", symbol, key.bold(), verb);
    for attr in &change.changed_attributes {
        let marker = if change.replace_attributes.contains(attr) {
            " (forces replacement)".red().to_string()
        } else {
            String::new()
        };
        println!("    {}{}", attr, marker);
    }
}

async fn run_destroy(
    provider: &dyn Provider,
    store: &LocalState,
    type_name: &str,
    name: &str,
) -> Result<(), String> {
    let resource = provider.resource(type_name).map_err(|e| e.to_string())?;
    let mut state = store.load()?;
    let key = StateFile::key(type_name, name);
    let prior = state
        .get(&key, resource.schema())
        .ok_or_else(|| format!("{} is not in {}", key, store.path().display()))?;

    let mut diags = Diagnostics::new();
    resource.delete(&prior, &mut diags).await;
    report(&diags)?;

    state.remove(&key);
    store.save(&mut state)?;
    println!("{} {}", "✓".green(), format!("Destroyed {}", key).green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use filescom_core::schema::{AttributeSchema, AttributeType};
    use std::sync::Mutex;

    /// Resource keeping its objects in memory and recording every call
    struct MemoryResource {
        schema: Schema,
        calls: Mutex<Vec<String>>,
    }

    impl MemoryResource {
        fn new() -> Self {
            Self {
                schema: Schema::new("files_group")
                    .attribute(AttributeSchema::new("id", AttributeType::Int).read_only())
                    .attribute(AttributeSchema::new("name", AttributeType::String).required())
                    .attribute(AttributeSchema::new("notes", AttributeType::String).computed())
                    .attribute(
                        AttributeSchema::new("path", AttributeType::String)
                            .computed()
                            .requires_replace(),
                    ),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        fn resolve(plan: &Attributes) -> Attributes {
            plan.iter()
                .map(|(k, v)| {
                    let v = match (k.as_str(), v) {
                        ("id", Value::Unknown) => Value::Int(10),
                        (_, Value::Unknown) => Value::Null,
                        _ => v.clone(),
                    };
                    (k.clone(), v)
                })
                .collect()
        }
    }

    #[async_trait]
    impl Resource for MemoryResource {
        fn type_name(&self) -> &str {
            "files_group"
        }

        fn schema(&self) -> &Schema {
            &self.schema
        }

        async fn create(&self, plan: &Attributes, _diags: &mut Diagnostics) -> Option<Attributes> {
            self.record("create");
            Some(Self::resolve(plan))
        }

        async fn read(&self, state: &Attributes, _diags: &mut Diagnostics) -> Option<Attributes> {
            self.record("read");
            Some(state.clone())
        }

        async fn update(
            &self,
            plan: &Attributes,
            _prior: &Attributes,
            _diags: &mut Diagnostics,
        ) -> Option<Attributes> {
            self.record("update");
            Some(Self::resolve(plan))
        }

        async fn delete(&self, _state: &Attributes, _diags: &mut Diagnostics) {
            self.record("delete");
        }

        fn import_state(&self, id: &str, _diags: &mut Diagnostics) -> Option<Attributes> {
            let mut state = Attributes::new();
            state.insert("id".to_string(), Value::Int(id.parse().ok()?));
            Some(state)
        }
    }

    fn config(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::string(*v)))
            .collect()
    }

    #[tokio::test]
    async fn test_apply_creates_then_is_noop() {
        let resource = MemoryResource::new();
        let mut diags = Diagnostics::new();
        let desired = config(&[("name", "ops")]);

        let (change, state) = apply_resource(&resource, None, &desired, &mut diags).await;
        assert_eq!(change.action, PlanAction::Create);
        let state = state.unwrap();
        assert_eq!(state["id"], Value::Int(10));
        assert_eq!(state["notes"], Value::Null);

        let (change, again) = apply_resource(&resource, Some(&state), &desired, &mut diags).await;
        assert_eq!(change.action, PlanAction::NoOp);
        assert_eq!(again.unwrap(), state);
        assert_eq!(resource.calls(), vec!["create"]);
    }

    #[tokio::test]
    async fn test_apply_updates_in_place() {
        let resource = MemoryResource::new();
        let mut diags = Diagnostics::new();
        let (_, state) =
            apply_resource(&resource, None, &config(&[("name", "ops")]), &mut diags).await;

        let desired = config(&[("name", "ops"), ("notes", "on call")]);
        let (change, state) =
            apply_resource(&resource, state.as_ref(), &desired, &mut diags).await;
        assert_eq!(change.action, PlanAction::Update);
        assert_eq!(change.changed_attributes, vec!["notes".to_string()]);
        assert_eq!(state.unwrap()["notes"], Value::string("on call"));
        assert_eq!(resource.calls(), vec!["create", "update"]);
    }

    #[tokio::test]
    async fn test_apply_replaces_on_forced_change() {
        let resource = MemoryResource::new();
        let mut diags = Diagnostics::new();
        let (_, state) = apply_resource(
            &resource,
            None,
            &config(&[("name", "ops"), ("path", "a")]),
            &mut diags,
        )
        .await;

        let desired = config(&[("name", "ops"), ("path", "b")]);
        let (change, state) =
            apply_resource(&resource, state.as_ref(), &desired, &mut diags).await;
        assert_eq!(change.action, PlanAction::Replace);
        assert_eq!(change.replace_attributes, vec!["path".to_string()]);
        assert_eq!(state.unwrap()["path"], Value::string("b"));
        assert_eq!(resource.calls(), vec!["create", "delete", "create"]);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_report_fails_on_errors() {
        let mut diags = Diagnostics::new();
        diags.add_warning("Deprecated", "use something else");
        assert!(report(&diags).is_ok());

        diags.add_error("Error Reading Files User", "boom");
        assert_eq!(
            report(&diags).unwrap_err(),
            "Operation failed with 1 error(s)"
        );
    }

    #[test]
    fn test_validate_file_against_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.json");
        std::fs::write(&path, r#"{"username": "alice", "site_admin": true}"#).unwrap();
        assert!(run_validate(&FilesProvider::new(), "files_user", &path).is_ok());

        std::fs::write(&path, r#"{"site_admin": true}"#).unwrap();
        assert!(run_validate(&FilesProvider::new(), "files_user", &path).is_err());

        assert!(run_validate(&FilesProvider::new(), "files_nothing", &path).is_err());
    }

    #[test]
    fn test_validate_data_source_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(run_validate(&FilesProvider::new(), "files_site", &path).is_ok());
    }
}
