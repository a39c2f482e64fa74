// Personalerfassungsbogen form script. Navigation back to the linked
// employee, a banner when the link is missing, and the decimal-format
// validation on the hourly wage fields.

use crate::registry::{FormEvent, FormRegistry};
use crate::validate;

const ACTION_GROUP: &str = "Aktionen";

/// Hourly wage fields subject to decimal-format validation.
const WAGE_FIELDS: [&str; 2] = ["stundenlohn", "stundenlohn_1"];

pub fn register(registry: &mut FormRegistry) {
    registry.on("Personalerfassungsbogen", FormEvent::Onload, |ctx| {
        if !ctx.doc.is_set("employee") {
            ctx.host.set_banner(
                "<p>This capture sheet is not linked to an Employee record.</p>",
            );
        }
    });

    registry.on("Personalerfassungsbogen", FormEvent::Refresh, |ctx| {
        if let Some(employee) = ctx.doc.text("employee") {
            ctx.add_button("View Employee", ACTION_GROUP, move |_, host| {
                host.navigate_to_list("Employee", &[("name".to_string(), employee.clone())]);
            });
        }
    });

    for field in WAGE_FIELDS {
        registry.on(
            "Personalerfassungsbogen",
            FormEvent::FieldChange(field.to_string()),
            move |ctx| validate::check_wage_field(ctx, field),
        );
    }
}
