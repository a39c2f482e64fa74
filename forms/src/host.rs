// Host framework interface. The embedding form framework implements
// `FormHost`; scripts only ever talk to this trait, so they can be
// exercised without any UI present. Buttons registered during dispatch
// are returned to the embedding layer, which renders them and feeds
// presses back through `CustomButton::press`.

use shared::fields::FieldValue;

use crate::state::FormDoc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageIndicator {
    Green,
    Orange,
    Red,
}

/// A user-facing message, rendered modally by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePayload {
    pub title: String,
    pub indicator: MessageIndicator,
    pub message: String,
}

pub trait FormHost {
    fn show_message(&mut self, payload: MessagePayload);

    /// Mirrors a field update into the rendered form.
    fn set_field_value(&mut self, field: &str, value: &FieldValue);

    /// Asks the user for confirmation and returns the decision.
    fn confirm(&mut self, message: &str) -> bool;

    /// Opens the list view of a doctype with the given filters applied.
    fn navigate_to_list(&mut self, doctype: &str, filters: &[(String, String)]);

    /// Opens a new-record form with prefilled defaults.
    fn new_doc(&mut self, doctype: &str, defaults: &[(String, String)]);

    /// Shows an intro banner above the form.
    fn set_banner(&mut self, html: &str);

    /// Default error channel of the host framework.
    fn report_error(&mut self, context: &str, error: &anyhow::Error);
}

pub type ButtonAction = Box<dyn Fn(&mut FormDoc, &mut dyn FormHost) + Send + Sync>;

/// A custom button registered by a refresh handler.
pub struct CustomButton {
    pub label: String,
    pub group: String,
    action: ButtonAction,
}

impl CustomButton {
    pub fn press(&self, doc: &mut FormDoc, host: &mut dyn FormHost) {
        (self.action)(doc, host);
    }
}

/// Per-dispatch context handed to event handlers.
pub struct FormContext<'a> {
    pub doc: &'a mut FormDoc,
    pub host: &'a mut dyn FormHost,
    buttons: Vec<CustomButton>,
}

impl<'a> FormContext<'a> {
    pub fn new(doc: &'a mut FormDoc, host: &'a mut dyn FormHost) -> Self {
        FormContext {
            doc,
            host,
            buttons: Vec::new(),
        }
    }

    /// Updates the document and mirrors the change into the host.
    pub fn set_field_value(&mut self, field: &str, value: FieldValue) {
        self.host.set_field_value(field, &value);
        self.doc.set(field, value);
    }

    pub fn add_button(
        &mut self,
        label: &str,
        group: &str,
        action: impl Fn(&mut FormDoc, &mut dyn FormHost) + Send + Sync + 'static,
    ) {
        self.buttons.push(CustomButton {
            label: label.to_string(),
            group: group.to_string(),
            action: Box::new(action),
        });
    }

    pub(crate) fn into_buttons(self) -> Vec<CustomButton> {
        self.buttons
    }
}
