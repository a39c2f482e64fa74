// Handler for the ExportSingleEmployee RPC
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
use crate::services::{ExportSummary, SingleExportRequest};

pub async fn handle_export_single(
    req_payload: SingleExportRequest,
    store: Arc<RwLock<EmployeeStore>>,
    settings: &ExportSettings,
    outbox: &Outbox,
) -> Result<Response<ExportSummary>, Status> {
    let mut store = store.write().await;

    let candidate = helpers::collect_single(&store, &req_payload.employee)?;
    helpers::validate_candidates(std::iter::once(&candidate))?;

    let now = chrono::Local::now();
    let valid_from = builder::valid_from(now.date_naive())?;
    let timestamp = now.format("%Y%m%d%H%M%S").to_string();

    let file = helpers::build_single_file(&candidate, settings, valid_from, &timestamp)?;
    let files = vec![file];

    let batch_id = Uuid::new_v4();
    outbox.deliver(&settings.export_email, batch_id, &files)?;

    let children_count = files[0].children_count;
    store.push_history(ExportHistoryEntry::success(batch_id, 1, children_count, 1));
    store.update_stored_weekly_hours(&candidate.employee.id);
    store.reset_export_flag(&candidate.employee.id);

    tracing::info!(
        %batch_id,
        employee = %candidate.employee.id,
        company = %candidate.employee.company,
        "Single employee export completed"
    );

    Ok(Response::new(helpers::summarize(
        &files,
        1,
        children_count,
        &settings.export_email,
        format!("Exported employee {}", candidate.employee.id),
    )))
}
