//! discovery-intake - classify a meeting record and show its CRM update.
//!
//! Usage: `discovery-intake [MEETING_JSON_PATH]` (reads stdin without a path).

use std::io::Read;
use std::process::ExitCode;

use serde_json::{json, Value};
use tracing::{debug, error};

use discovery_intake::config::{AppConfig, LoggingConfig};
use discovery_intake::domain::foundation::Timestamp;
use discovery_intake::domain::meeting::MeetingSnapshot;
use discovery_intake::domain::progress::{ModuleProgress, StatusClassifier};
use discovery_intake::domain::sync::{CrmStatusUpdate, CrmUpdateRequest};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn init_tracing(logging: &LoggingConfig) -> Result<(), BoxError> {
    let filter = logging.env_filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().try_init()?;
    } else {
        builder.try_init()?;
    }
    Ok(())
}

fn read_document(path: Option<&str>) -> Result<Value, BoxError> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&text)?)
}

fn run() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging)?;

    let path = std::env::args().nth(1);
    let document = read_document(path.as_deref())?;
    debug!(source = path.as_deref().unwrap_or("stdin"), "Loaded meeting document");

    let snapshot = MeetingSnapshot::from_value(document);
    let classifier = StatusClassifier::new(config.fill);
    let classification = classifier.classify_snapshot(&snapshot);
    let progress = snapshot
        .record()
        .map(|r| ModuleProgress::from_record(r, classifier.policy()))
        .unwrap_or_else(ModuleProgress::empty);

    let update = CrmStatusUpdate::build(&classification, &snapshot, Timestamp::now());
    let request = CrmUpdateRequest::single(update, config.crm.run_workflows)
        .with_field_names(config.crm.fields.clone());
    let statuses: serde_json::Map<String, Value> = progress
        .module_statuses()
        .into_iter()
        .map(|(module, filled)| (module.key().to_string(), Value::Bool(filled)))
        .collect();

    let report = json!({
        "classification": classification,
        "descriptor": classification.stage.descriptor(),
        "modules": {
            "statuses": statuses,
            "filled": progress.filled_modules(),
            "hasDiscoveryData": progress.has_discovery_data(),
            "percentFilled": progress.percent_filled(),
            "firstUnfilled": progress.first_unfilled(),
        },
        "crm": {
            "method": "PUT",
            "endpoint": config.crm.record_endpoint("{record_id}"),
            "body": request,
        },
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("discovery-intake: {}", e);
            ExitCode::FAILURE
        }
    }
}
