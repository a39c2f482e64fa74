// Export settings form script. The bulk export action for all marked
// employees lives on the settings form, under the "Actions" group.

use std::sync::Arc;

use crate::host::{MessageIndicator, MessagePayload};
use crate::registry::{FormEvent, FormRegistry};
use crate::services::ExportApi;

const DOCTYPE: &str = "DATEV Export Settings";

pub fn register(registry: &mut FormRegistry, api: Arc<dyn ExportApi>) {
    registry.on(DOCTYPE, FormEvent::Refresh, move |ctx| {
        let export_api = api.clone();
        ctx.add_button("Export all marked employees", "Actions", move |_, host| {
            match export_api.export_marked_employees() {
                Ok(summary) if summary.count == 0 => host.show_message(MessagePayload {
                    title: "Export".to_string(),
                    indicator: MessageIndicator::Orange,
                    message: summary.message,
                }),
                Ok(summary) => host.show_message(MessagePayload {
                    title: "Export Complete".to_string(),
                    indicator: MessageIndicator::Green,
                    message: format!(
                        "Exported {} employees. Email sent to {}",
                        summary.count, summary.email
                    ),
                }),
                Err(error) => host.report_error("Export all marked employees", &error),
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CustomButton;
    use crate::services::ExportSummary;
    use crate::state::FormDoc;
    use crate::testing::{MockApi, MockHost};

    fn refresh(api: Arc<MockApi>, doc: &mut FormDoc, host: &mut MockHost) -> Vec<CustomButton> {
        let mut registry = FormRegistry::new();
        register(&mut registry, api);
        registry.dispatch(doc, FormEvent::Refresh, host)
    }

    #[test]
    fn bulk_export_reports_count_and_recipient() {
        let api = Arc::new(MockApi::returning(ExportSummary {
            count: 7,
            children_count: 3,
            email: "payroll@example.com".to_string(),
            message: "Exported 7 employees from 2 companies".to_string(),
        }));
        let mut doc = FormDoc::new(DOCTYPE, DOCTYPE);
        let mut host = MockHost::new();

        let buttons = refresh(api.clone(), &mut doc, &mut host);
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].group, "Actions");

        buttons[0].press(&mut doc, &mut host);

        assert_eq!(api.calls(), vec!["marked".to_string()]);
        assert_eq!(host.messages.len(), 1);
        assert_eq!(host.messages[0].indicator, MessageIndicator::Green);
        assert_eq!(
            host.messages[0].message,
            "Exported 7 employees. Email sent to payroll@example.com"
        );
    }

    #[test]
    fn empty_batch_shows_the_engine_message() {
        let api = Arc::new(MockApi::returning(ExportSummary {
            count: 0,
            children_count: 0,
            email: "payroll@example.com".to_string(),
            message: "No employees marked for export.".to_string(),
        }));
        let mut doc = FormDoc::new(DOCTYPE, DOCTYPE);
        let mut host = MockHost::new();

        let buttons = refresh(api, &mut doc, &mut host);
        buttons[0].press(&mut doc, &mut host);

        assert_eq!(host.messages.len(), 1);
        assert_eq!(host.messages[0].indicator, MessageIndicator::Orange);
        assert_eq!(host.messages[0].message, "No employees marked for export.");
    }

    #[test]
    fn failure_goes_to_the_default_error_channel() {
        let api = Arc::new(MockApi::failing());
        let mut doc = FormDoc::new(DOCTYPE, DOCTYPE);
        let mut host = MockHost::new();

        let buttons = refresh(api, &mut doc, &mut host);
        buttons[0].press(&mut doc, &mut host);

        assert!(host.messages.is_empty());
        assert_eq!(host.errors.len(), 1);
    }
}
