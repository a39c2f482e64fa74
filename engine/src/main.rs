// Engine main entry point
use engine::config::EngineSettings;
use engine::data::employee_store::EmployeeStore;
use engine::data::roster_csv::RosterCsvParser;
use engine::delivery::Outbox;
use engine::services::export_service::PayrollEngine;
use engine::services::PayrollExportServer;
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::transport::Server;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    info!("Starting DATEV LODAS export engine...");

    // Settings come from the JSON file given as the first argument, with
    // built-in defaults otherwise.
    let settings = match std::env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "Loading engine settings");
            EngineSettings::load(&path)?
        }
        None => EngineSettings::default(),
    };
    let addr = format!("{}:{}", settings.host, settings.port).parse()?;
    info!("Engine will listen on {}", addr);

    let store = Arc::new(RwLock::new(EmployeeStore::new()));

    // Preload the roster when one is configured.
    if let Some(roster_path) = &settings.roster_path {
        let records = RosterCsvParser::load_roster(roster_path)?;
        let mut guard = store.write().await;
        let count = records.len();
        for (employee, personnel) in records {
            guard.insert_employee(employee);
            guard.insert_personnel_record(personnel);
        }
        if let Some(children_path) = &settings.children_path {
            for (employee_id, child) in RosterCsvParser::load_children(children_path)? {
                if !guard.add_child(&employee_id, child) {
                    tracing::warn!(
                        employee = %employee_id,
                        "Child row references an unknown employee"
                    );
                }
            }
        }
        info!(count, "Preloaded employee roster");
    }

    let outbox = Outbox::new(&settings.export.outbox_dir);
    let export_service = PayrollEngine::new(store.clone(), settings.export.clone(), outbox);

    Server::builder()
        .add_service(PayrollExportServer::new(export_service))
        .serve(addr)
        .await?;

    Ok(())
}
