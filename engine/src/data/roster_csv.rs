// Roster CSV ingestion. The roster is a denormalized personnel capture
// sheet: one row per employee carrying both the employee master fields and
// the linked capture-sheet fields, semicolon separated, numbers in German
// notation. Children come from a separate child table CSV keyed by the
// employee id.

use anyhow::anyhow;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use shared::models::{ChildRecord, Employee, PersonnelRecord};
use std::fs::File;
use std::io::BufReader;

use crate::data::german;
use crate::error::EngineError;

pub struct RosterCsvParser;

impl RosterCsvParser {
    // CSV header (excerpt): id;company;first_name;last_name;...;stundenlohn;stundenlohn_1;...
    pub fn load_roster(file_path: &str) -> Result<Vec<(Employee, PersonnelRecord)>, EngineError> {
        let file = File::open(file_path)
            .map_err(|e| anyhow!("Failed to open roster file '{}': {}", file_path, e))?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers = rdr.headers()?.clone();
        let mut records = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result.map_err(|e| {
                anyhow!("Error reading roster record at line {}: {}", line, e)
            })?;

            let id = Self::get_field(&record, &headers, "id").ok_or_else(|| {
                EngineError::RosterFormatError(format!("Missing 'id' field at line {}", line))
            })?;
            let company = Self::get_field(&record, &headers, "company").ok_or_else(|| {
                EngineError::RosterFormatError(format!(
                    "Missing 'company' field for employee {} at line {}",
                    id, line
                ))
            })?;

            let text = |name: &str| {
                Self::get_field(&record, &headers, name).map(|s| s.to_string())
            };
            let date = |name: &str| Self::date_field(&record, &headers, name, line);
            let decimal = |name: &str| Self::decimal_field(&record, &headers, name, line);

            let employee = Employee {
                id: id.to_string(),
                company: company.to_string(),
                first_name: text("first_name").unwrap_or_default(),
                last_name: text("last_name").unwrap_or_default(),
                employee_name: text("employee_name").unwrap_or_default(),
                employee_number: text("employee_number"),
                designation: text("designation"),
                gender: text("gender"),
                date_of_birth: date("date_of_birth")?,
                date_of_joining: date("date_of_joining")?,
                relieving_date: date("relieving_date")?,
                first_entry_date: date("first_entry_date")?,
                personal_email: text("personal_email"),
                cell_number: text("cell_number"),
                street: text("street"),
                house_number: text("house_number"),
                postal_code: text("postal_code"),
                city: text("city"),
                country: text("country"),
                address_extra: text("address_extra"),
                employment_relation: text("employment_relation"),
                tax_id: text("tax_id"),
                highest_school_degree: text("highest_school_degree"),
                highest_vocational_degree: text("highest_vocational_degree"),
                disability: text("disability"),
                disability_id_until: date("disability_id_until")?,
                weekly_hours: decimal("weekly_hours")?,
                exported_weekly_hours: decimal("exported_weekly_hours")?,
                total_gross: decimal("total_gross")?,
                base_contract_salary: decimal("base_contract_salary")?,
                project_salaries: [
                    decimal("project_salary_1")?,
                    decimal("project_salary_2")?,
                    decimal("project_salary_3")?,
                    decimal("project_salary_4")?,
                ],
                supplements: [decimal("supplement_1")?, decimal("supplement_2")?],
                wage_type_base: text("wage_type_base"),
                wage_types_project: [
                    text("wage_type_p1"),
                    text("wage_type_p2"),
                    text("wage_type_p3"),
                    text("wage_type_p4"),
                ],
                wage_types_supplement: [text("wage_type_z1"), text("wage_type_z2")],
                extra_compensation: Self::flag_field(&record, &headers, "extra_compensation"),
                marked_for_export: Self::flag_field(&record, &headers, "marked_for_export"),
            };

            let personnel = PersonnelRecord {
                id: format!("PEB-{}", employee.id),
                employee: employee.id.clone(),
                academic_title: text("academic_title"),
                marital_status: text("marital_status"),
                single_parent: text("single_parent"),
                confession: text("confession"),
                tax_class: text("tax_class"),
                child_allowance_count: decimal("child_allowance_count")?,
                birth_name: text("birth_name"),
                birth_place: text("birth_place"),
                birth_country: text("birth_country"),
                nationality: text("nationality"),
                insurance_number: text("insurance_number"),
                iban: text("iban"),
                bic: text("bic"),
                deviating_account_holder: text("deviating_account_holder"),
                hourly_wage: decimal("stundenlohn")?,
                hourly_wage_secondary: decimal("stundenlohn_1")?,
                vacation_days_current_year: decimal("vacation_days_current_year")?,
                base_vacation_entitlement: decimal("base_vacation_entitlement")?,
                job_ticket_value: decimal("job_ticket_value")?,
                remuneration_form: text("remuneration_form"),
                main_employer: text("main_employer"),
                department_code: text("department_code"),
                study_certificate_date: date("study_certificate_date")?,
                children: Vec::new(),
            };

            records.push((employee, personnel));
        }

        Ok(records)
    }

    // Child table header: employee;number;first_name;last_name;birth_date
    pub fn load_children(file_path: &str) -> Result<Vec<(String, ChildRecord)>, EngineError> {
        let file = File::open(file_path)
            .map_err(|e| anyhow!("Failed to open child table file '{}': {}", file_path, e))?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers = rdr.headers()?.clone();
        let mut children = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result.map_err(|e| {
                anyhow!("Error reading child record at line {}: {}", line, e)
            })?;

            let employee = Self::get_field(&record, &headers, "employee").ok_or_else(|| {
                EngineError::RosterFormatError(format!(
                    "Missing 'employee' field at line {}",
                    line
                ))
            })?;

            let number = match Self::get_field(&record, &headers, "number") {
                Some(raw) => Some(raw.parse::<u32>().map_err(|e| {
                    EngineError::RosterFormatError(format!(
                        "Invalid child number '{}' at line {}: {}",
                        raw, line, e
                    ))
                })?),
                None => None,
            };

            let child = ChildRecord {
                number,
                first_name: Self::get_field(&record, &headers, "first_name")
                    .map(|s| s.to_string()),
                last_name: Self::get_field(&record, &headers, "last_name")
                    .map(|s| s.to_string()),
                birth_date: Self::date_field(&record, &headers, "birth_date", line)?,
            };

            children.push((employee.to_string(), child));
        }

        Ok(children)
    }

    /// Returns the trimmed field value by header name, None when absent or empty.
    fn get_field<'r>(
        record: &'r StringRecord,
        headers: &StringRecord,
        name: &str,
    ) -> Option<&'r str> {
        headers
            .iter()
            .position(|h| h == name)
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn date_field(
        record: &StringRecord,
        headers: &StringRecord,
        name: &str,
        line: usize,
    ) -> Result<Option<NaiveDate>, EngineError> {
        match Self::get_field(record, headers, name) {
            Some(raw) => german::parse_date(raw)
                .map(Some)
                .map_err(|e| {
                    EngineError::RosterFormatError(format!(
                        "Invalid '{}' at line {}: {}",
                        name, line, e
                    ))
                }),
            None => Ok(None),
        }
    }

    fn decimal_field(
        record: &StringRecord,
        headers: &StringRecord,
        name: &str,
        line: usize,
    ) -> Result<Option<f64>, EngineError> {
        match Self::get_field(record, headers, name) {
            Some(raw) => german::parse_decimal(raw)
                .map(Some)
                .map_err(|e| {
                    EngineError::RosterFormatError(format!(
                        "Invalid '{}' at line {}: {}",
                        name, line, e
                    ))
                }),
            None => Ok(None),
        }
    }

    fn flag_field(record: &StringRecord, headers: &StringRecord, name: &str) -> bool {
        matches!(
            Self::get_field(record, headers, name).map(str::to_lowercase).as_deref(),
            Some("1") | Some("ja") | Some("yes") | Some("true")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "{}", content).expect("write csv");
        file.flush().expect("flush csv");
        file
    }

    #[test]
    fn loads_a_roster_row() {
        let csv = "id;company;first_name;last_name;employee_name;gender;date_of_birth;date_of_joining;weekly_hours;stundenlohn;marked_for_export\n\
                   HR-EMP-00001;Acme GmbH;Maria;Muster;Maria Muster;Female;1990-04-12;2020-01-01;38,50;15,42;1";
        let file = write_csv(csv);
        let records =
            RosterCsvParser::load_roster(file.path().to_str().expect("path")).expect("load");
        assert_eq!(records.len(), 1);

        let (employee, personnel) = &records[0];
        assert_eq!(employee.id, "HR-EMP-00001");
        assert_eq!(employee.company, "Acme GmbH");
        assert_eq!(employee.weekly_hours, Some(38.5));
        assert!(employee.marked_for_export);
        assert_eq!(personnel.employee, "HR-EMP-00001");
        assert_eq!(personnel.hourly_wage, Some(15.42));
        assert_eq!(personnel.id, "PEB-HR-EMP-00001");
    }

    #[test]
    fn missing_id_is_an_error() {
        let csv = "id;company;first_name\n;Acme GmbH;Maria";
        let file = write_csv(csv);
        let result = RosterCsvParser::load_roster(file.path().to_str().expect("path"));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_decimal_reports_line() {
        let csv = "id;company;weekly_hours\nHR-EMP-00001;Acme GmbH;abc";
        let file = write_csv(csv);
        let err = RosterCsvParser::load_roster(file.path().to_str().expect("path"))
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(err.contains("line 2"), "unexpected error: {}", err);
    }

    #[test]
    fn loads_child_rows() {
        let csv = "employee;number;first_name;last_name;birth_date\n\
                   HR-EMP-00001;1;Lena;Muster;2015-06-01\n\
                   HR-EMP-00001;2;Finn;Muster;2018-09-15";
        let file = write_csv(csv);
        let children =
            RosterCsvParser::load_children(file.path().to_str().expect("path")).expect("load");
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].0, "HR-EMP-00001");
        assert_eq!(children[1].1.number, Some(2));
    }
}
