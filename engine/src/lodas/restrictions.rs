// Field-level export restrictions. A restricted field keeps its column in
// the record layout but is exported empty. The weekly working hours field
// carries an extra rule: it is suppressed when the value did not change
// since the last successful export.

use shared::models::Employee;
use std::collections::HashMap;

use crate::config::ExportSettings;

pub struct RestrictionFilter {
    suppressed: HashMap<String, bool>,
}

impl RestrictionFilter {
    pub fn from_settings(settings: &ExportSettings) -> Self {
        RestrictionFilter {
            suppressed: settings
                .export_restrictions
                .iter()
                .map(|r| (r.field_name.clone(), r.no_export))
                .collect(),
        }
    }

    pub fn is_suppressed(&self, field: &str) -> bool {
        self.suppressed.get(field).copied().unwrap_or(false)
    }

    pub fn text(&self, field: &str, value: String) -> String {
        if self.is_suppressed(field) {
            String::new()
        } else {
            value
        }
    }

    pub fn number(&self, field: &str, value: Option<f64>) -> Option<f64> {
        if self.is_suppressed(field) {
            None
        } else {
            value
        }
    }
}

/// Weekly hours to export for an employee.
///
/// An empty stored value always allows the export; an unchanged value
/// (compared by its textual representation) suppresses it; a changed value
/// exports the current one.
pub fn effective_weekly_hours(employee: &Employee) -> Option<f64> {
    let current = employee.weekly_hours?;
    match employee.exported_weekly_hours {
        None => Some(current),
        Some(stored) => {
            if format!("{}", current) == format!("{}", stored) {
                None
            } else {
                Some(current)
            }
        }
    }
}
