// Employee form script. On refresh it adds the export action plus the
// navigation shortcuts into the linked records, all under the "Aktionen"
// button group.

use std::sync::Arc;

use crate::host::{MessageIndicator, MessagePayload};
use crate::registry::{FormEvent, FormRegistry};
use crate::services::ExportApi;

const ACTION_GROUP: &str = "Aktionen";

pub fn register(registry: &mut FormRegistry, api: Arc<dyn ExportApi>) {
    registry.on("Employee", FormEvent::Refresh, move |ctx| {
        let export_api = api.clone();
        ctx.add_button("Export to DATEV", ACTION_GROUP, move |doc, host| {
            if !host.confirm("Export this employee to DATEV LODAS?") {
                return;
            }
            match export_api.export_single_employee(&doc.name) {
                Ok(summary) => host.show_message(MessagePayload {
                    title: "Export Complete".to_string(),
                    indicator: MessageIndicator::Green,
                    message: format!(
                        "Employee exported successfully. Email sent to {}",
                        summary.email
                    ),
                }),
                Err(error) => host.report_error("Export to DATEV", &error),
            }
        });

        ctx.add_button("Übersicht Personalerfassungsbogen", ACTION_GROUP, |doc, host| {
            host.navigate_to_list(
                "Personalerfassungsbogen",
                &[("employee".to_string(), doc.name.clone())],
            );
        });

        ctx.add_button("Übersicht GEHALTSVERHANDLUNG", ACTION_GROUP, |doc, host| {
            host.navigate_to_list(
                "GEHALTSVERHANDLUNG",
                &[("zum_mitarbeiter".to_string(), doc.name.clone())],
            );
        });

        ctx.add_button("Neuer Personalerfassungsbogen", ACTION_GROUP, |doc, host| {
            let mut defaults = vec![("employee".to_string(), doc.name.clone())];
            if let Some(employee_name) = doc.text("employee_name") {
                defaults.push(("employee_name".to_string(), employee_name));
            }
            host.new_doc("Personalerfassungsbogen", &defaults);
        });
    });
}
