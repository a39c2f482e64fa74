// Test doubles for the host interface and the export API.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use shared::fields::FieldValue;

use crate::host::{FormHost, MessagePayload};
use crate::services::{ExportApi, ExportSummary};

/// Records every host call for assertions.
pub struct MockHost {
    pub confirm_response: bool,
    pub confirmations: Vec<String>,
    pub messages: Vec<MessagePayload>,
    pub field_updates: Vec<(String, FieldValue)>,
    pub navigations: Vec<(String, Vec<(String, String)>)>,
    pub new_docs: Vec<(String, Vec<(String, String)>)>,
    pub banners: Vec<String>,
    pub errors: Vec<String>,
}

impl MockHost {
    pub fn new() -> Self {
        MockHost {
            confirm_response: true,
            confirmations: Vec::new(),
            messages: Vec::new(),
            field_updates: Vec::new(),
            navigations: Vec::new(),
            new_docs: Vec::new(),
            banners: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn declining() -> Self {
        MockHost {
            confirm_response: false,
            ..Self::new()
        }
    }
}

impl FormHost for MockHost {
    fn show_message(&mut self, payload: MessagePayload) {
        self.messages.push(payload);
    }

    fn set_field_value(&mut self, field: &str, value: &FieldValue) {
        self.field_updates.push((field.to_string(), value.clone()));
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.confirm_response
    }

    fn navigate_to_list(&mut self, doctype: &str, filters: &[(String, String)]) {
        self.navigations.push((doctype.to_string(), filters.to_vec()));
    }

    fn new_doc(&mut self, doctype: &str, defaults: &[(String, String)]) {
        self.new_docs.push((doctype.to_string(), defaults.to_vec()));
    }

    fn set_banner(&mut self, html: &str) {
        self.banners.push(html.to_string());
    }

    fn report_error(&mut self, context: &str, error: &anyhow::Error) {
        self.errors.push(format!("{}: {}", context, error));
    }
}

/// Scripted export API: returns a fixed summary or a fixed failure and
/// records the calls.
pub struct MockApi {
    pub summary: ExportSummary,
    pub fail: bool,
    pub calls: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn returning(summary: ExportSummary) -> Self {
        MockApi {
            summary,
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        MockApi {
            summary: ExportSummary {
                count: 0,
                children_count: 0,
                email: String::new(),
                message: String::new(),
            },
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) -> Result<ExportSummary> {
        self.calls.lock().expect("calls lock").push(call);
        if self.fail {
            Err(anyhow!("engine unreachable"))
        } else {
            Ok(self.summary.clone())
        }
    }
}

impl ExportApi for MockApi {
    fn export_single_employee(&self, employee: &str) -> Result<ExportSummary> {
        self.record(format!("single:{}", employee))
    }

    fn export_marked_employees(&self) -> Result<ExportSummary> {
        self.record("marked".to_string())
    }
}
