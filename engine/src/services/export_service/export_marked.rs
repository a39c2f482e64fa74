// Handler for the ExportMarkedEmployees RPC
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};
use uuid::Uuid;

use crate::config::ExportSettings;
use crate::data::employee_store::EmployeeStore;
use crate::delivery::Outbox;
use crate::lodas::builder;
use crate::models::ExportHistoryEntry;
use crate::services::export_service::helpers;
use crate::services::ExportSummary;

pub async fn handle_export_marked(
    store: Arc<RwLock<EmployeeStore>>,
    settings: &ExportSettings,
    outbox: &Outbox,
) -> Result<Response<ExportSummary>, Status> {
    let mut store = store.write().await;

    let by_company = helpers::collect_marked(&store);
    if by_company.is_empty() {
        tracing::info!("No employees marked for export");
        return Ok(Response::new(ExportSummary {
            count: 0,
            children_count: 0,
            email: settings.export_email.clone(),
            message: "No employees marked for export.".to_string(),
            files: Vec::new(),
        }));
    }

    helpers::validate_company_mappings(settings, by_company.keys())?;
    helpers::validate_candidates(by_company.values().flatten())?;

    let now = chrono::Local::now();
    let valid_from = builder::valid_from(now.date_naive())?;
    let timestamp = now.format("%Y%m%d%H%M%S").to_string();

    let files = helpers::build_files(&by_company, settings, valid_from, &timestamp)?;

    let batch_id = Uuid::new_v4();
    outbox.deliver(&settings.export_email, batch_id, &files)?;

    let exported: Vec<String> = by_company
        .values()
        .flatten()
        .map(|candidate| candidate.employee.id.clone())
        .collect();
    let children_count: usize = files.iter().map(|f| f.children_count).sum();

    store.push_history(ExportHistoryEntry::success(
        batch_id,
        exported.len(),
        children_count,
        files.len(),
    ));
    for id in &exported {
        store.update_stored_weekly_hours(id);
        store.reset_export_flag(id);
    }

    tracing::info!(
        %batch_id,
        employees = exported.len(),
        companies = files.len(),
        "Marked employees export completed"
    );

    let count = exported.len();
    let message = format!(
        "Exported {} employees from {} companies",
        count,
        files.len()
    );
    Ok(Response::new(helpers::summarize(
        &files,
        count,
        children_count,
        &settings.export_email,
        message,
    )))
}
