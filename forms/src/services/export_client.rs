// gRPC client for the payroll export engine. Scripts run synchronously
// inside the host's event dispatch, so the async tonic calls are bridged
// onto a client-owned runtime. Scripts depend on the `ExportApi` trait,
// which keeps them testable without a running engine.

use anyhow::{Context, Result};
use engine::services::{MarkedExportRequest, PayrollExportClient, SingleExportRequest};
use tonic::transport::Channel;

/// Client-side view of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub count: i32,
    pub children_count: i32,
    pub email: String,
    pub message: String,
}

impl From<engine::services::ExportSummary> for ExportSummary {
    fn from(summary: engine::services::ExportSummary) -> Self {
        ExportSummary {
            count: summary.count,
            children_count: summary.children_count,
            email: summary.email,
            message: summary.message,
        }
    }
}

/// The remote operations the form scripts invoke.
pub trait ExportApi: Send + Sync {
    fn export_single_employee(&self, employee: &str) -> Result<ExportSummary>;
    fn export_marked_employees(&self) -> Result<ExportSummary>;
}

pub struct ExportClient {
    runtime: tokio::runtime::Runtime,
    client: PayrollExportClient<Channel>,
}

impl ExportClient {
    pub fn connect(endpoint: String) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Failed to build client runtime")?;
        let client = runtime
            .block_on(PayrollExportClient::connect(endpoint.clone()))
            .with_context(|| format!("Failed to connect to export engine at {}", endpoint))?;
        Ok(ExportClient { runtime, client })
    }

    /// Loads a roster file into the engine; returns the engine's message.
    pub fn load_roster(&self, roster_path: &str, children_path: &str) -> Result<String> {
        let mut client = self.client.clone();
        let response = self
            .runtime
            .block_on(client.load_roster(engine::services::LoadRosterRequest {
                roster_path: roster_path.to_string(),
                children_path: children_path.to_string(),
            }))?;
        Ok(response.into_inner().message)
    }
}

impl ExportApi for ExportClient {
    fn export_single_employee(&self, employee: &str) -> Result<ExportSummary> {
        tracing::info!(employee, "Calling ExportSingleEmployee");
        let mut client = self.client.clone();
        let response = self
            .runtime
            .block_on(client.export_single_employee(SingleExportRequest {
                employee: employee.to_string(),
            }))?;
        Ok(response.into_inner().into())
    }

    fn export_marked_employees(&self) -> Result<ExportSummary> {
        tracing::info!("Calling ExportMarkedEmployees");
        let mut client = self.client.clone();
        let response = self
            .runtime
            .block_on(client.export_marked_employees(MarkedExportRequest {}))?;
        Ok(response.into_inner().into())
    }
}
