// engine/src/services/export_service/mod.rs
// Main module hub for the payroll export service. It holds the
// PayrollEngine struct implementing the generated PayrollExport trait and
// declares the handler submodules the RPC methods dispatch to.

use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Request, Response, Status};

use crate::config::ExportSettings;
use crate::data::employee_store::EmployeeStore;
use crate::delivery::Outbox;
use crate::services::{
    ExportSummary, LoadRosterRequest, LoadRosterResponse, MarkedExportRequest, PayrollExport,
    SingleExportRequest,
};

pub mod export_marked;
pub mod export_single;
pub mod helpers;
pub mod load_roster;

pub struct PayrollEngine {
    store: Arc<RwLock<EmployeeStore>>,
    settings: ExportSettings,
    outbox: Outbox,
}

impl PayrollEngine {
    pub fn new(store: Arc<RwLock<EmployeeStore>>, settings: ExportSettings, outbox: Outbox) -> Self {
        PayrollEngine {
            store,
            settings,
            outbox,
        }
    }
}

#[tonic::async_trait]
impl PayrollExport for PayrollEngine {
    async fn load_roster(
        &self,
        request: Request<LoadRosterRequest>,
    ) -> Result<Response<LoadRosterResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            roster = %req_payload.roster_path,
            children = %req_payload.children_path,
            "Received LoadRosterRequest in main service, dispatching to handler."
        );
        load_roster::handle_load_roster(req_payload, self.store.clone()).await
    }

    async fn export_single_employee(
        &self,
        request: Request<SingleExportRequest>,
    ) -> Result<Response<ExportSummary>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            employee = %req_payload.employee,
            "Received SingleExportRequest in main service, dispatching to handler."
        );
        export_single::handle_export_single(
            req_payload,
            self.store.clone(),
            &self.settings,
            &self.outbox,
        )
        .await
    }

    async fn export_marked_employees(
        &self,
        request: Request<MarkedExportRequest>,
    ) -> Result<Response<ExportSummary>, Status> {
        let _ = request.into_inner();
        tracing::info!("Received MarkedExportRequest in main service, dispatching to handler.");
        export_marked::handle_export_marked(self.store.clone(), &self.settings, &self.outbox).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompanyClientMapping;
    use chrono::NaiveDate;
    use shared::models::{ChildRecord, Employee, PersonnelRecord};
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile, TempDir};

    fn test_settings(outbox: &TempDir) -> ExportSettings {
        ExportSettings {
            consultant_number: "123456".to_string(),
            export_email: "payroll@example.com".to_string(),
            outbox_dir: outbox.path().display().to_string(),
            company_client_mapping: vec![
                CompanyClientMapping {
                    company: "Acme GmbH".to_string(),
                    client_number: "54321".to_string(),
                },
                CompanyClientMapping {
                    company: "Beta GmbH".to_string(),
                    client_number: "54322".to_string(),
                },
            ],
            export_restrictions: Vec::new(),
        }
    }

    fn complete_employee(id: &str, company: &str, marked: bool) -> Employee {
        Employee {
            id: id.to_string(),
            company: company.to_string(),
            first_name: "Maria".to_string(),
            last_name: "Muster".to_string(),
            employee_name: "Maria Muster".to_string(),
            employee_number: Some("1042".to_string()),
            gender: Some("female".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12),
            date_of_joining: NaiveDate::from_ymd_opt(2020, 1, 1),
            weekly_hours: Some(38.5),
            total_gross: Some(3500.0),
            marked_for_export: marked,
            ..Default::default()
        }
    }

    fn create_test_engine(outbox: &TempDir) -> PayrollEngine {
        let store = Arc::new(RwLock::new(EmployeeStore::new()));
        PayrollEngine::new(store, test_settings(outbox), Outbox::new(outbox.path()))
    }

    async fn engine_with_employee(outbox: &TempDir, employee: Employee) -> PayrollEngine {
        let engine = create_test_engine(outbox);
        let mut store = engine.store.write().await;
        store.insert_employee(employee);
        drop(store);
        engine
    }

    #[tokio::test]
    async fn test_export_single_employee_success() {
        let outbox = tempdir().expect("outbox dir");
        let engine =
            engine_with_employee(&outbox, complete_employee("HR-EMP-00001", "Acme GmbH", true))
                .await;

        let request = Request::new(SingleExportRequest {
            employee: "HR-EMP-00001".to_string(),
        });
        let summary = engine
            .export_single_employee(request)
            .await
            .expect("export")
            .into_inner();

        assert_eq!(summary.count, 1);
        assert_eq!(summary.email, "payroll@example.com");
        assert_eq!(summary.files.len(), 1);
        assert!(summary.files[0].filename.starts_with("DATEV_LODAS_Single_HR-EMP-00001_"));

        // Delivery wrote the file plus the summary document.
        let entries = std::fs::read_dir(outbox.path()).expect("read outbox").count();
        assert_eq!(entries, 2);

        // Bookkeeping: flag reset, stored hours updated, history recorded.
        let store = engine.store.read().await;
        let employee = store.employee("HR-EMP-00001").expect("employee");
        assert!(!employee.marked_for_export);
        assert_eq!(employee.exported_weekly_hours, Some(38.5));
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.history()[0].status, "Success");
    }

    #[tokio::test]
    async fn test_export_single_unknown_employee() {
        let outbox = tempdir().expect("outbox dir");
        let engine = create_test_engine(&outbox);

        let request = Request::new(SingleExportRequest {
            employee: "HR-EMP-09999".to_string(),
        });
        let status = engine
            .export_single_employee(request)
            .await
            .expect_err("must fail");
        assert_eq!(status.code(), tonic::Code::NotFound);
    }

    #[tokio::test]
    async fn test_export_single_unmapped_company() {
        let outbox = tempdir().expect("outbox dir");
        let engine = engine_with_employee(
            &outbox,
            complete_employee("HR-EMP-00001", "Gamma GmbH", true),
        )
        .await;

        let request = Request::new(SingleExportRequest {
            employee: "HR-EMP-00001".to_string(),
        });
        let status = engine
            .export_single_employee(request)
            .await
            .expect_err("must fail");
        assert_eq!(status.code(), tonic::Code::FailedPrecondition);
        assert!(status.message().contains("Gamma GmbH"));
    }

    #[tokio::test]
    async fn test_export_single_incomplete_data() {
        let outbox = tempdir().expect("outbox dir");
        let mut employee = complete_employee("HR-EMP-00001", "Acme GmbH", true);
        employee.date_of_birth = None;
        employee.gender = None;
        let engine = engine_with_employee(&outbox, employee).await;

        let request = Request::new(SingleExportRequest {
            employee: "HR-EMP-00001".to_string(),
        });
        let status = engine
            .export_single_employee(request)
            .await
            .expect_err("must fail");
        assert_eq!(status.code(), tonic::Code::FailedPrecondition);
        assert!(status.message().contains("incomplete data"));
        assert!(status.message().contains("Missing date of birth"));
    }

    #[tokio::test]
    async fn test_export_marked_with_nothing_marked() {
        let outbox = tempdir().expect("outbox dir");
        let engine =
            engine_with_employee(&outbox, complete_employee("HR-EMP-00001", "Acme GmbH", false))
                .await;

        let summary = engine
            .export_marked_employees(Request::new(MarkedExportRequest {}))
            .await
            .expect("export")
            .into_inner();

        assert_eq!(summary.count, 0);
        assert_eq!(summary.message, "No employees marked for export.");
        assert!(summary.files.is_empty());
    }

    #[tokio::test]
    async fn test_export_marked_groups_by_company() {
        let outbox = tempdir().expect("outbox dir");
        let engine = create_test_engine(&outbox);
        {
            let mut store = engine.store.write().await;
            store.insert_employee(complete_employee("HR-EMP-00001", "Acme GmbH", true));
            store.insert_employee(complete_employee("HR-EMP-00002", "Acme GmbH", true));
            store.insert_employee(complete_employee("HR-EMP-00003", "Beta GmbH", true));
            store.insert_employee(complete_employee("HR-EMP-00004", "Beta GmbH", false));
        }

        let summary = engine
            .export_marked_employees(Request::new(MarkedExportRequest {}))
            .await
            .expect("export")
            .into_inner();

        assert_eq!(summary.count, 3);
        assert_eq!(summary.files.len(), 2);
        assert_eq!(summary.files[0].company, "Acme GmbH");
        assert_eq!(summary.files[0].employee_count, 2);
        assert_eq!(summary.files[1].company, "Beta GmbH");

        let store = engine.store.read().await;
        assert!(!store.employee("HR-EMP-00001").expect("e1").marked_for_export);
        assert!(!store.employee("HR-EMP-00003").expect("e3").marked_for_export);
        // The unmarked employee is untouched.
        assert!(!store.employee("HR-EMP-00004").expect("e4").marked_for_export);
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.history()[0].employee_count, 3);
    }

    #[tokio::test]
    async fn test_export_marked_counts_children() {
        let outbox = tempdir().expect("outbox dir");
        let engine =
            engine_with_employee(&outbox, complete_employee("HR-EMP-00001", "Acme GmbH", true))
                .await;
        {
            let mut store = engine.store.write().await;
            store.insert_personnel_record(PersonnelRecord {
                id: "PEB-HR-EMP-00001".to_string(),
                employee: "HR-EMP-00001".to_string(),
                children: vec![ChildRecord {
                    number: Some(1),
                    first_name: Some("Lena".to_string()),
                    last_name: Some("Muster".to_string()),
                    birth_date: NaiveDate::from_ymd_opt(2015, 6, 1),
                }],
                ..Default::default()
            });
        }

        let summary = engine
            .export_marked_employees(Request::new(MarkedExportRequest {}))
            .await
            .expect("export")
            .into_inner();

        assert_eq!(summary.count, 1);
        assert_eq!(summary.children_count, 1);
    }

    #[tokio::test]
    async fn test_load_roster_success() {
        let outbox = tempdir().expect("outbox dir");
        let engine = create_test_engine(&outbox);

        let mut roster = NamedTempFile::new().expect("roster file");
        writeln!(
            roster,
            "id;company;first_name;last_name;gender;date_of_birth;date_of_joining;marked_for_export\n\
             HR-EMP-00001;Acme GmbH;Maria;Muster;female;1990-04-12;2020-01-01;1"
        )
        .expect("write roster");
        roster.flush().expect("flush roster");

        let request = Request::new(LoadRosterRequest {
            roster_path: roster.path().display().to_string(),
            children_path: String::new(),
        });
        let response = engine.load_roster(request).await.expect("load").into_inner();

        assert!(response.success);
        assert_eq!(response.employees_loaded, 1);
        assert_eq!(response.children_loaded, 0);

        let store = engine.store.read().await;
        assert_eq!(store.employee_count(), 1);
        assert!(store.employee("HR-EMP-00001").is_some());
    }

    #[tokio::test]
    async fn test_load_roster_missing_file() {
        let outbox = tempdir().expect("outbox dir");
        let engine = create_test_engine(&outbox);

        let request = Request::new(LoadRosterRequest {
            roster_path: "does_not_exist.csv".to_string(),
            children_path: String::new(),
        });
        let result = engine.load_roster(request).await;
        assert!(result.is_err());
    }
}
