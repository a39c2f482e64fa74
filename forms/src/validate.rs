// Binding between the pure decimal-format check and the host side
// effects. Rejection clears exactly the offending field and shows exactly
// one message; acceptance touches nothing.

use shared::fields::{validate_decimal_format, FieldValue, ValidationOutcome};

use crate::host::{FormContext, MessageIndicator, MessagePayload};

pub fn check_wage_field(ctx: &mut FormContext, field: &str) {
    let value = ctx.doc.get(field);
    match validate_decimal_format(&value) {
        ValidationOutcome::Accepted => {}
        ValidationOutcome::Rejected { reason } => {
            tracing::debug!(field, "Rejected wage field value");
            ctx.set_field_value(field, FieldValue::Empty);
            ctx.host.show_message(MessagePayload {
                title: "Invalid format".to_string(),
                indicator: MessageIndicator::Red,
                message: reason,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FormDoc;
    use crate::testing::MockHost;

    fn run_check(doc: &mut FormDoc, host: &mut MockHost, field: &str) {
        let mut ctx = FormContext::new(doc, host);
        check_wage_field(&mut ctx, field);
    }

    #[test]
    fn accepted_value_is_left_untouched() {
        let mut doc = FormDoc::new("Personalerfassungsbogen", "PEB-0001")
            .with_field("stundenlohn", FieldValue::from_input(Some("15.42")));
        let mut host = MockHost::new();

        run_check(&mut doc, &mut host, "stundenlohn");

        assert_eq!(doc.text("stundenlohn"), Some("15.42".to_string()));
        assert!(host.messages.is_empty());
        assert!(host.field_updates.is_empty());
    }

    #[test]
    fn rejected_value_resets_field_and_shows_one_message() {
        let mut doc = FormDoc::new("Personalerfassungsbogen", "PEB-0001")
            .with_field("stundenlohn", FieldValue::from_input(Some("123.45")));
        let mut host = MockHost::new();

        run_check(&mut doc, &mut host, "stundenlohn");

        assert!(doc.get("stundenlohn").is_empty());
        assert_eq!(host.messages.len(), 1);
        assert_eq!(host.messages[0].indicator, MessageIndicator::Red);
        assert!(host.messages[0].message.contains("Only 2 digits"));
        assert_eq!(
            host.field_updates,
            vec![("stundenlohn".to_string(), FieldValue::Empty)]
        );
    }

    #[test]
    fn empty_field_is_accepted_without_side_effects() {
        let mut doc = FormDoc::new("Personalerfassungsbogen", "PEB-0001");
        let mut host = MockHost::new();

        run_check(&mut doc, &mut host, "stundenlohn_1");

        assert!(host.messages.is_empty());
        assert!(host.field_updates.is_empty());
    }

    #[test]
    fn comma_notation_is_rejected_like_the_check_says() {
        let mut doc = FormDoc::new("Personalerfassungsbogen", "PEB-0001")
            .with_field("stundenlohn", FieldValue::from_input(Some("15,42")));
        let mut host = MockHost::new();

        run_check(&mut doc, &mut host, "stundenlohn");

        assert!(doc.get("stundenlohn").is_empty());
        assert_eq!(host.messages.len(), 1);
    }

    #[test]
    fn revalidating_an_accepted_value_stays_accepted() {
        let mut doc = FormDoc::new("Personalerfassungsbogen", "PEB-0001")
            .with_field("stundenlohn", FieldValue::from_input(Some("99")));
        let mut host = MockHost::new();

        run_check(&mut doc, &mut host, "stundenlohn");
        run_check(&mut doc, &mut host, "stundenlohn");

        assert_eq!(doc.text("stundenlohn"), Some("99".to_string()));
        assert!(host.messages.is_empty());
    }
}
