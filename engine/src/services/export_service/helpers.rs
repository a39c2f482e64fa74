// Helper functions shared by the export RPC handlers: candidate
// collection, validation and file assembly.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use shared::models::{Employee, PersonnelRecord};

use crate::config::ExportSettings;
use crate::data::employee_store::EmployeeStore;
use crate::error::EngineError;
use crate::lodas::builder;
use crate::lodas::record::{map_employee, LodasEmployee};
use crate::lodas::restrictions::RestrictionFilter;
use crate::models::GeneratedFile;
use crate::services::{ExportSummary, ExportedFile};

/// One employee queued for export together with the linked capture sheet.
pub struct ExportCandidate {
    pub employee: Employee,
    pub personnel: Option<PersonnelRecord>,
}

/// All marked employees, grouped by company in stable order.
pub fn collect_marked(store: &EmployeeStore) -> BTreeMap<String, Vec<ExportCandidate>> {
    let mut grouped: BTreeMap<String, Vec<ExportCandidate>> = BTreeMap::new();
    for (company, employees) in store.marked_by_company() {
        let candidates = employees
            .into_iter()
            .map(|employee| {
                let personnel = store.personnel_for(&employee.id).cloned();
                ExportCandidate {
                    employee,
                    personnel,
                }
            })
            .collect();
        grouped.insert(company, candidates);
    }
    grouped
}

pub fn collect_single(store: &EmployeeStore, id: &str) -> Result<ExportCandidate, EngineError> {
    let employee = store
        .employee(id)
        .cloned()
        .ok_or_else(|| EngineError::UnknownEmployee(id.to_string()))?;
    let personnel = store.personnel_for(id).cloned();
    Ok(ExportCandidate {
        employee,
        personnel,
    })
}

/// Every company in the batch needs a client number mapping.
pub fn validate_company_mappings<'a>(
    settings: &ExportSettings,
    companies: impl Iterator<Item = &'a String>,
) -> Result<(), EngineError> {
    let unmapped: Vec<&str> = companies
        .filter(|company| settings.client_number_for(company).is_none())
        .map(|company| company.as_str())
        .collect();

    if unmapped.is_empty() {
        Ok(())
    } else {
        Err(EngineError::ValidationError(format!(
            "The following companies have employees marked for export but no Company to Client \
             mapping: {}. Please add these mappings in the export settings.",
            unmapped.join(", ")
        )))
    }
}

/// Checks that the essential fields for a LODAS export are present. The
/// first five problems are reported, the rest elided.
pub fn validate_candidates<'a>(
    candidates: impl Iterator<Item = &'a ExportCandidate>,
) -> Result<(), EngineError> {
    let mut problems = Vec::new();

    for candidate in candidates {
        let employee = &candidate.employee;
        let mut missing = |what: &str| {
            problems.push(format!("Employee {}: Missing {}", employee.id, what));
        };

        if employee.last_name.is_empty() {
            missing("last name");
        }
        if employee.first_name.is_empty() {
            missing("first name");
        }
        if employee.date_of_birth.is_none() {
            missing("date of birth");
        }
        if employee.gender.is_none() {
            missing("gender");
        }
        if employee.date_of_joining.is_none() {
            missing("joining date");
        }

        if let Some(personnel) = &candidate.personnel {
            for (i, child) in personnel
                .children
                .iter()
                .filter(|child| child.has_data())
                .enumerate()
            {
                let mut child_missing = |what: &str| {
                    problems.push(format!(
                        "Employee {}: Child {} missing {}",
                        employee.id,
                        i + 1,
                        what
                    ));
                };
                if child.number.is_none() {
                    child_missing("number");
                }
                if child.first_name.as_deref().unwrap_or("").is_empty() {
                    child_missing("first name");
                }
                if child.last_name.as_deref().unwrap_or("").is_empty() {
                    child_missing("last name");
                }
                if child.birth_date.is_none() {
                    child_missing("birth date");
                }
            }
        }
    }

    if problems.is_empty() {
        return Ok(());
    }

    tracing::error!(count = problems.len(), "Employee data validation failed");
    let mut shown: Vec<String> = problems.iter().take(5).cloned().collect();
    if problems.len() > 5 {
        shown.push("...".to_string());
    }
    Err(EngineError::ValidationError(format!(
        "Some employees have incomplete data:\n{}",
        shown.join("\n")
    )))
}

fn map_candidates(
    candidates: &[ExportCandidate],
    filter: &RestrictionFilter,
) -> Vec<LodasEmployee> {
    candidates
        .iter()
        .map(|c| map_employee(&c.employee, c.personnel.as_ref(), filter))
        .collect()
}

/// One file per company for a marked-employees batch.
pub fn build_files(
    by_company: &BTreeMap<String, Vec<ExportCandidate>>,
    settings: &ExportSettings,
    valid_from: NaiveDate,
    timestamp: &str,
) -> Result<Vec<GeneratedFile>, EngineError> {
    let filter = RestrictionFilter::from_settings(settings);
    let mut files = Vec::with_capacity(by_company.len());

    for (company, candidates) in by_company {
        let client_number = settings.client_number_for(company).ok_or_else(|| {
            EngineError::ValidationError(format!(
                "No client number mapping found for company: {}",
                company
            ))
        })?;
        let mapped = map_candidates(candidates, &filter);
        files.push(builder::company_file(
            company,
            &mapped,
            &settings.consultant_number,
            client_number,
            valid_from,
            timestamp,
        ));
    }

    Ok(files)
}

/// File for a single-employee export.
pub fn build_single_file(
    candidate: &ExportCandidate,
    settings: &ExportSettings,
    valid_from: NaiveDate,
    timestamp: &str,
) -> Result<GeneratedFile, EngineError> {
    let company = &candidate.employee.company;
    let client_number = settings.client_number_for(company).ok_or_else(|| {
        EngineError::ValidationError(format!(
            "No client number mapping found for company: {}",
            company
        ))
    })?;

    let filter = RestrictionFilter::from_settings(settings);
    let mapped = map_employee(&candidate.employee, candidate.personnel.as_ref(), &filter);
    Ok(builder::single_employee_file(
        &candidate.employee.id,
        company,
        &mapped,
        &settings.consultant_number,
        client_number,
        valid_from,
        timestamp,
    ))
}

/// Assembles the RPC summary for a delivered batch.
pub fn summarize(
    files: &[GeneratedFile],
    count: usize,
    children_count: usize,
    email: &str,
    message: String,
) -> ExportSummary {
    ExportSummary {
        count: count as i32,
        children_count: children_count as i32,
        email: email.to_string(),
        message,
        files: files
            .iter()
            .map(|f| ExportedFile {
                filename: f.filename.clone(),
                company: f.company.clone(),
                employee_count: f.employee_count as i32,
                children_count: f.children_count as i32,
            })
            .collect(),
    }
}
