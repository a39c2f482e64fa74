// Per-doctype form scripts.

pub mod employee;
pub mod export_settings;
pub mod personalerfassungsbogen;

use std::sync::Arc;

use crate::registry::FormRegistry;
use crate::services::ExportApi;

/// Registers every form script.
pub fn register_all(registry: &mut FormRegistry, api: Arc<dyn ExportApi>) {
    employee::register(registry, api.clone());
    personalerfassungsbogen::register(registry);
    export_settings::register(registry, api);
}
