// Forms library root
// Client-side form customization against an embedding form framework: an
// explicit event registry, the host interface, per-doctype scripts and
// the field-level validation binding.

pub mod host;
pub mod registry;
pub mod scripts;
pub mod services;
pub mod state;
pub mod validate;

#[cfg(test)]
pub mod testing;
