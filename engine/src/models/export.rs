// Export batch artifacts.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One generated LODAS file, kept in memory until delivery writes it out.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub filename: String,
    pub company: String,
    pub employee_count: usize,
    pub children_count: usize,
    pub content: String,
}

/// History entry recorded after a successful export batch.
#[derive(Debug, Clone)]
pub struct ExportHistoryEntry {
    pub batch_id: Uuid,
    pub export_date: DateTime<Utc>,
    pub employee_count: usize,
    pub children_count: usize,
    pub status: String,
    pub message: String,
}

impl ExportHistoryEntry {
    pub fn success(
        batch_id: Uuid,
        employee_count: usize,
        children_count: usize,
        companies: usize,
    ) -> Self {
        ExportHistoryEntry {
            batch_id,
            export_date: Utc::now(),
            employee_count,
            children_count,
            status: "Success".to_string(),
            message: format!(
                "Exported {} employees and {} children from {} companies",
                employee_count, children_count, companies
            ),
        }
    }
}
