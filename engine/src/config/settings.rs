// Engine settings, loaded from a JSON file or falling back to defaults.
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::EngineError;

#[derive(Debug, Deserialize, Clone)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    /// Roster CSV loaded into the store at startup, if set.
    pub roster_path: Option<String>,
    /// Child table CSV loaded alongside the roster, if set.
    pub children_path: Option<String>,
    pub export: ExportSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "localhost".to_string(),
            port: 50051,
            roster_path: None,
            children_path: None,
            export: ExportSettings::default(),
        }
    }
}

impl EngineSettings {
    /// Loads and validates settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let raw = fs::read_to_string(path.as_ref())?;
        let settings: EngineSettings = serde_json::from_str(&raw)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings file: {}", e)))?;
        settings.export.validate()?;
        Ok(settings)
    }
}

/// DATEV export settings: consultant identification, company to client
/// number mappings, delivery target and field-level export restrictions.
#[derive(Debug, Deserialize, Clone)]
pub struct ExportSettings {
    pub consultant_number: String,
    pub export_email: String,
    pub outbox_dir: String,
    #[serde(default)]
    pub company_client_mapping: Vec<CompanyClientMapping>,
    #[serde(default)]
    pub export_restrictions: Vec<ExportRestriction>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            consultant_number: "000000".to_string(),
            export_email: String::new(),
            outbox_dir: "outbox".to_string(),
            company_client_mapping: Vec::new(),
            export_restrictions: Vec::new(),
        }
    }
}

impl ExportSettings {
    /// Consultant numbers are 6 digits, client numbers 5 digits.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.consultant_number.len() != 6
            || !self.consultant_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(EngineError::ConfigError(
                "Consultant number must be exactly 6 digits".to_string(),
            ));
        }

        for mapping in &self.company_client_mapping {
            if mapping.client_number.len() != 5
                || !mapping.client_number.chars().all(|c| c.is_ascii_digit())
            {
                return Err(EngineError::ConfigError(format!(
                    "Client number must be exactly 5 digits for company: {}",
                    mapping.company
                )));
            }
        }

        Ok(())
    }

    pub fn client_number_for(&self, company: &str) -> Option<&str> {
        self.company_client_mapping
            .iter()
            .find(|m| m.company == company)
            .map(|m| m.client_number.as_str())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CompanyClientMapping {
    pub company: String,
    pub client_number: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportRestriction {
    pub field_name: String,
    pub no_export: bool,
}
