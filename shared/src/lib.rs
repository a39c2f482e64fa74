// Shared library root
// Domain models and field-level types used by both the export engine and
// the form customization layer.

pub mod fields;
pub mod models;
