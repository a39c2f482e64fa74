// Engine-internal models. The shared domain records live in the `shared`
// crate; these types only exist on the export path.

pub mod export;

pub use export::{ExportHistoryEntry, GeneratedFile};
