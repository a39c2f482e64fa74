// Explicit form-event registry. Replaces the host framework's ambient
// per-doctype event registration with a plain data structure: a map from
// (doctype, event) to an ordered list of handlers, dispatched
// synchronously on the host's event loop.

use std::collections::HashMap;

use crate::host::{CustomButton, FormContext, FormHost};
use crate::state::FormDoc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormEvent {
    Onload,
    Refresh,
    /// Fired after the named field was edited.
    FieldChange(String),
}

pub type Handler = Box<dyn Fn(&mut FormContext) + Send + Sync>;

#[derive(Default)]
pub struct FormRegistry {
    handlers: HashMap<(String, FormEvent), Vec<Handler>>,
}

impl FormRegistry {
    pub fn new() -> Self {
        FormRegistry {
            handlers: HashMap::new(),
        }
    }

    pub fn on(
        &mut self,
        doctype: &str,
        event: FormEvent,
        handler: impl Fn(&mut FormContext) + Send + Sync + 'static,
    ) {
        self.handlers
            .entry((doctype.to_string(), event))
            .or_default()
            .push(Box::new(handler));
    }

    pub fn handler_count(&self, doctype: &str, event: &FormEvent) -> usize {
        self.handlers
            .get(&(doctype.to_string(), event.clone()))
            .map(|handlers| handlers.len())
            .unwrap_or(0)
    }

    /// Runs all handlers registered for the document's doctype and the
    /// event, in registration order, and returns the buttons they added.
    pub fn dispatch(
        &self,
        doc: &mut FormDoc,
        event: FormEvent,
        host: &mut dyn FormHost,
    ) -> Vec<CustomButton> {
        let key = (doc.doctype.clone(), event);
        let mut ctx = FormContext::new(doc, host);
        if let Some(handlers) = self.handlers.get(&key) {
            for handler in handlers {
                handler(&mut ctx);
            }
        }
        ctx.into_buttons()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockHost;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn handlers_run_in_registration_order() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut registry = FormRegistry::new();

        for tag in ["first", "second", "third"] {
            let order = order.clone();
            registry.on("Employee", FormEvent::Refresh, move |_| {
                order.lock().expect("order lock").push(tag);
            });
        }

        let mut doc = FormDoc::new("Employee", "HR-EMP-00001");
        let mut host = MockHost::new();
        registry.dispatch(&mut doc, FormEvent::Refresh, &mut host);

        assert_eq!(*order.lock().expect("order lock"), vec!["first", "second", "third"]);
    }

    #[test]
    fn dispatch_is_keyed_by_doctype_and_event() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = FormRegistry::new();

        let counter = hits.clone();
        registry.on("Employee", FormEvent::Refresh, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut host = MockHost::new();

        let mut other_doc = FormDoc::new("Personalerfassungsbogen", "PEB-0001");
        registry.dispatch(&mut other_doc, FormEvent::Refresh, &mut host);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let mut doc = FormDoc::new("Employee", "HR-EMP-00001");
        registry.dispatch(&mut doc, FormEvent::Onload, &mut host);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        registry.dispatch(&mut doc, FormEvent::Refresh, &mut host);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn field_change_events_carry_the_field_name() {
        let mut registry = FormRegistry::new();
        registry.on(
            "Personalerfassungsbogen",
            FormEvent::FieldChange("stundenlohn".to_string()),
            |ctx| {
                ctx.doc.set("touched", shared::fields::FieldValue::Numeric("1".into()));
            },
        );

        let mut doc = FormDoc::new("Personalerfassungsbogen", "PEB-0001");
        let mut host = MockHost::new();

        registry.dispatch(
            &mut doc,
            FormEvent::FieldChange("stundenlohn_1".to_string()),
            &mut host,
        );
        assert!(!doc.is_set("touched"));

        registry.dispatch(
            &mut doc,
            FormEvent::FieldChange("stundenlohn".to_string()),
            &mut host,
        );
        assert!(doc.is_set("touched"));
    }

    #[test]
    fn buttons_registered_during_dispatch_are_returned() {
        let mut registry = FormRegistry::new();
        registry.on("Employee", FormEvent::Refresh, |ctx| {
            ctx.add_button("Export to DATEV", "Aktionen", |_, _| {});
        });

        let mut doc = FormDoc::new("Employee", "HR-EMP-00001");
        let mut host = MockHost::new();
        let buttons = registry.dispatch(&mut doc, FormEvent::Refresh, &mut host);

        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].label, "Export to DATEV");
        assert_eq!(buttons[0].group, "Aktionen");
    }
}
