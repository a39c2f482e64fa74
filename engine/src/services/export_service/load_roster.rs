// Handler for the LoadRoster RPC
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use crate::data::employee_store::EmployeeStore;
use crate::data::roster_csv::RosterCsvParser;
use crate::services::{LoadRosterRequest, LoadRosterResponse};

pub async fn handle_load_roster(
    req_payload: LoadRosterRequest,
    store: Arc<RwLock<EmployeeStore>>,
) -> Result<Response<LoadRosterResponse>, Status> {
    let records = match RosterCsvParser::load_roster(&req_payload.roster_path) {
        Ok(records) => records,
        Err(e) => return Err(e.into()),
    };

    let children = if req_payload.children_path.is_empty() {
        Vec::new()
    } else {
        match RosterCsvParser::load_children(&req_payload.children_path) {
            Ok(children) => children,
            Err(e) => return Err(e.into()),
        }
    };

    let mut store = store.write().await;
    let employees_loaded = records.len() as i32;
    for (employee, personnel) in records {
        store.insert_employee(employee);
        store.insert_personnel_record(personnel);
    }

    let mut children_loaded = 0;
    for (employee_id, child) in children {
        if store.add_child(&employee_id, child) {
            children_loaded += 1;
        } else {
            tracing::warn!(employee = %employee_id, "Child row references an unknown employee");
        }
    }

    Ok(Response::new(LoadRosterResponse {
        success: true,
        message: format!(
            "Loaded {} employees and {} children from roster",
            employees_loaded, children_loaded
        ),
        employees_loaded,
        children_loaded,
    }))
}
