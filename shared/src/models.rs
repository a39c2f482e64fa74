// Domain models shared between the export engine and the form layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An employee master record as held by the ERP host.
///
/// Optional fields mirror the host's loosely filled doctypes: almost
/// everything may be missing and the export pipeline decides which gaps
/// are fatal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub company: String,
    pub first_name: String,
    pub last_name: String,
    /// Display name, used to prefill linked records.
    pub employee_name: String,
    pub employee_number: Option<String>,
    pub designation: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_joining: Option<NaiveDate>,
    pub relieving_date: Option<NaiveDate>,
    /// First entry into the company, distinct from the current joining date.
    pub first_entry_date: Option<NaiveDate>,
    pub personal_email: Option<String>,
    pub cell_number: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address_extra: Option<String>,
    pub employment_relation: Option<String>,
    pub tax_id: Option<String>,
    pub highest_school_degree: Option<String>,
    pub highest_vocational_degree: Option<String>,
    pub disability: Option<String>,
    pub disability_id_until: Option<NaiveDate>,
    /// Agreed weekly working hours.
    pub weekly_hours: Option<f64>,
    /// Weekly hours as of the last successful export. Used to suppress
    /// re-exporting an unchanged value.
    pub exported_weekly_hours: Option<f64>,
    pub total_gross: Option<f64>,
    pub base_contract_salary: Option<f64>,
    pub project_salaries: [Option<f64>; 4],
    pub supplements: [Option<f64>; 2],
    /// Wage type number for the base contract salary.
    pub wage_type_base: Option<String>,
    pub wage_types_project: [Option<String>; 4],
    pub wage_types_supplement: [Option<String>; 2],
    /// Project pay is in addition to the base salary instead of replacing it.
    pub extra_compensation: bool,
    pub marked_for_export: bool,
}

impl Employee {
    /// Personnel number used in the export; falls back to a derived value
    /// when no explicit number is assigned.
    pub fn personnel_number(&self) -> String {
        match &self.employee_number {
            Some(number) if !number.is_empty() => number.clone(),
            _ => format!("BPNR {}", self.id),
        }
    }
}

/// The personnel capture sheet (Personalerfassungsbogen) linked to an
/// employee. Holds the payroll details that are captured separately from
/// the employee master record, including the hourly wage fields that are
/// subject to decimal-format validation in the form layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonnelRecord {
    pub id: String,
    /// Linked `Employee::id`.
    pub employee: String,
    pub academic_title: Option<String>,
    pub marital_status: Option<String>,
    pub single_parent: Option<String>,
    pub confession: Option<String>,
    pub tax_class: Option<String>,
    pub child_allowance_count: Option<f64>,
    pub birth_name: Option<String>,
    pub birth_place: Option<String>,
    pub birth_country: Option<String>,
    pub nationality: Option<String>,
    pub insurance_number: Option<String>,
    pub iban: Option<String>,
    pub bic: Option<String>,
    pub deviating_account_holder: Option<String>,
    /// `stundenlohn` in the capture form.
    pub hourly_wage: Option<f64>,
    /// `stundenlohn_1` in the capture form.
    pub hourly_wage_secondary: Option<f64>,
    pub vacation_days_current_year: Option<f64>,
    pub base_vacation_entitlement: Option<f64>,
    pub job_ticket_value: Option<f64>,
    pub remuneration_form: Option<String>,
    pub main_employer: Option<String>,
    pub department_code: Option<String>,
    pub study_certificate_date: Option<NaiveDate>,
    pub children: Vec<ChildRecord>,
}

/// One row of the child table on a personnel capture sheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChildRecord {
    pub number: Option<u32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl ChildRecord {
    /// A child row is exported only when at least one of its fields is
    /// actually filled in.
    pub fn has_data(&self) -> bool {
        self.number.is_some()
            || self.first_name.as_deref().is_some_and(|s| !s.is_empty())
            || self.last_name.as_deref().is_some_and(|s| !s.is_empty())
            || self.birth_date.is_some()
    }
}
