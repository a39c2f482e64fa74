// Mapping from the host-side records to the LODAS field layout. The
// result is a flat, already coded and already restricted view of one
// employee, ready for the file builder.

use shared::models::{ChildRecord, Employee, PersonnelRecord};

use crate::data::german;
use crate::lodas::mappings;
use crate::lodas::restrictions::{effective_weekly_hours, RestrictionFilter};

/// One employee in LODAS terms. Text fields hold mapped codes or cleaned
/// strings; numeric fields stay numbers until the builder formats them
/// with the decimal comma.
#[derive(Debug, Clone, Default)]
pub struct LodasEmployee {
    pub pnr: String,
    // Record 1: employee master data
    pub duevo_familienname: String,
    pub duevo_vorname: String,
    pub geschlecht: String,
    pub geburtsdatum: String,
    pub adresse_nation_kz: String,
    pub duevo_titel: String,
    pub kz_alleinerziehend: String,
    pub adresse_anschriftenzusatz: String,
    pub geburtsland: String,
    pub gebname: String,
    pub gebort: String,
    pub email: String,
    pub ersteintrittsdatum: String,
    pub adresse_strasse_nr: String,
    pub adresse_ort: String,
    pub adresse_plz: String,
    pub adresse_strassenname: String,
    pub schwerbeschaedigt: String,
    pub staatsangehoerigkeit: String,
    pub telefon: String,
    pub familienstand: String,
    pub sozialversicherung_nr: String,
    pub datum_studienbesch: String,
    // Record 2: activity
    pub berufsbezeichnung: String,
    pub kst_abteilungs_nr: String,
    pub schulabschluss: String,
    pub ausbildungsabschluss: String,
    // Record 3: employment
    pub arbeitsverhaeltnis: String,
    pub eintrittdatum: String,
    pub austrittdatum: String,
    // Record 4: tax
    pub identifikationsnummer: String,
    pub st_klasse: String,
    pub konf_an: String,
    pub kfb_anzahl: Option<f64>,
    // Record 5: bank
    pub ma_iban: String,
    pub ma_bic: String,
    pub ma_bank_kto_inhaber_abw: String,
    // Record 6: disability, emitted only when data exists
    pub sba_sb_ausweis_bis: String,
    // Record 7: regular working time
    pub az_wtl_indiv: Option<f64>,
    pub url_tage_jhrl: Option<f64>,
    pub urlaubsanspr_pro_jahr: Option<f64>,
    // Record 8: wages
    pub std_lohn_1: Option<f64>,
    pub std_lohn_2: Option<f64>,
    pub lfd_brutto_vereinbart: Option<f64>,
    // Record 9: travel subsidy
    pub jobticket: Option<f64>,
    // Record 10: remuneration form
    pub entlohnungsform: String,
    // Record 11: children
    pub children: Vec<LodasChild>,
    // Record 12: fixed pay components
    pub fixed_pay: Vec<FixedPayRow>,
}

impl LodasEmployee {
    pub fn has_disability_data(&self) -> bool {
        !self.sba_sb_ausweis_bis.is_empty() || !self.schwerbeschaedigt.is_empty()
    }

    pub fn exported_children(&self) -> usize {
        self.children.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LodasChild {
    pub kind_nr: String,
    pub kind_vorname: String,
    pub kind_nachname: String,
    pub kind_geburtsdatum: String,
}

/// One row of record type 12. `festbez_id` 1 is the base contract, 2-5 the
/// project salaries, 6-7 the supplements.
#[derive(Debug, Clone)]
pub struct FixedPayRow {
    pub festbez_id: u8,
    pub lohnart_nr: String,
    pub betrag: f64,
}

const DEFAULT_WAGE_TYPE: &str = "999";
const DEFAULT_SUPPLEMENT_WAGE_TYPE: &str = "998";

/// Maps an employee and the linked capture sheet to the LODAS layout,
/// applying the configured export restrictions on the way.
pub fn map_employee(
    employee: &Employee,
    personnel: Option<&PersonnelRecord>,
    filter: &RestrictionFilter,
) -> LodasEmployee {
    let opt = |value: &Option<String>| value.clone().unwrap_or_default();
    let personnel_opt =
        |pick: fn(&PersonnelRecord) -> &Option<String>| match personnel {
            Some(record) => pick(record).clone().unwrap_or_default(),
            None => String::new(),
        };

    let children = personnel
        .map(|record| {
            record
                .children
                .iter()
                .filter(|child| child.has_data())
                .map(map_child)
                .collect()
        })
        .unwrap_or_default();

    LodasEmployee {
        pnr: employee.personnel_number(),

        duevo_familienname: filter.text("duevo_familienname", employee.last_name.clone()),
        duevo_vorname: filter.text("duevo_vorname", employee.first_name.clone()),
        geschlecht: mappings::gender_code(&opt(&employee.gender)),
        geburtsdatum: german::format_date_opt(employee.date_of_birth),
        adresse_nation_kz: mappings::nationality_code(&opt(&employee.country)),
        duevo_titel: personnel_opt(|p| &p.academic_title),
        kz_alleinerziehend: mappings::yes_no_code(
            "kz_alleinerziehend",
            &personnel_opt(|p| &p.single_parent),
        ),
        adresse_anschriftenzusatz: opt(&employee.address_extra),
        geburtsland: mappings::birth_country_code(&personnel_opt(|p| &p.birth_country)),
        gebname: personnel_opt(|p| &p.birth_name),
        gebort: personnel_opt(|p| &p.birth_place),
        email: opt(&employee.personal_email),
        ersteintrittsdatum: german::format_date_opt(employee.first_entry_date),
        adresse_strasse_nr: opt(&employee.house_number),
        adresse_ort: opt(&employee.city),
        adresse_plz: opt(&employee.postal_code),
        adresse_strassenname: opt(&employee.street),
        schwerbeschaedigt: mappings::disability_code(&opt(&employee.disability)),
        staatsangehoerigkeit: mappings::nationality_code(&personnel_opt(|p| &p.nationality)),
        telefon: opt(&employee.cell_number),
        familienstand: mappings::yes_no_code(
            "familienstand",
            &personnel_opt(|p| &p.marital_status),
        ),
        sozialversicherung_nr: personnel_opt(|p| &p.insurance_number),
        datum_studienbesch: german::format_date_opt(
            personnel.and_then(|p| p.study_certificate_date),
        ),

        berufsbezeichnung: opt(&employee.designation),
        kst_abteilungs_nr: personnel_opt(|p| &p.department_code),
        schulabschluss: mappings::school_degree_code(&opt(&employee.highest_school_degree)),
        ausbildungsabschluss: mappings::vocational_degree_code(
            &opt(&employee.highest_vocational_degree),
        ),

        arbeitsverhaeltnis: mappings::employment_relation_code(
            &opt(&employee.employment_relation),
        ),
        eintrittdatum: german::format_date_opt(employee.date_of_joining),
        austrittdatum: german::format_date_opt(employee.relieving_date),

        identifikationsnummer: opt(&employee.tax_id),
        st_klasse: filter.text(
            "st_klasse",
            mappings::tax_class_code(&personnel_opt(|p| &p.tax_class)),
        ),
        konf_an: mappings::confession_code(&personnel_opt(|p| &p.confession)),
        kfb_anzahl: personnel.and_then(|p| p.child_allowance_count),

        ma_iban: personnel_opt(|p| &p.iban),
        ma_bic: personnel_opt(|p| &p.bic),
        ma_bank_kto_inhaber_abw: personnel_opt(|p| &p.deviating_account_holder),

        sba_sb_ausweis_bis: german::format_date_opt(employee.disability_id_until),

        az_wtl_indiv: filter.number("az_wtl_indiv", effective_weekly_hours(employee)),
        url_tage_jhrl: personnel.and_then(|p| p.vacation_days_current_year),
        urlaubsanspr_pro_jahr: personnel.and_then(|p| p.base_vacation_entitlement),

        std_lohn_1: personnel.and_then(|p| p.hourly_wage),
        std_lohn_2: personnel.and_then(|p| p.hourly_wage_secondary),
        lfd_brutto_vereinbart: employee.total_gross,

        jobticket: personnel.and_then(|p| p.job_ticket_value),

        entlohnungsform: mappings::remuneration_form_code(
            &personnel_opt(|p| &p.remuneration_form),
        ),

        children,
        fixed_pay: fixed_pay_rows(employee),
    }
}

fn map_child(child: &ChildRecord) -> LodasChild {
    LodasChild {
        kind_nr: child.number.map(|n| n.to_string()).unwrap_or_default(),
        kind_vorname: child.first_name.clone().unwrap_or_default(),
        kind_nachname: child.last_name.clone().unwrap_or_default(),
        kind_geburtsdatum: german::format_date_opt(child.birth_date),
    }
}

/// Builds the seven rows of record type 12 for an employee: base contract,
/// four project salaries and two supplements, in that order.
pub fn fixed_pay_rows(employee: &Employee) -> Vec<FixedPayRow> {
    let mut rows = Vec::with_capacity(7);

    rows.push(FixedPayRow {
        festbez_id: 1,
        lohnart_nr: employee
            .wage_type_base
            .clone()
            .unwrap_or_else(|| DEFAULT_WAGE_TYPE.to_string()),
        betrag: basic_salary(employee).unwrap_or(0.0),
    });

    for (i, (salary, wage_type)) in employee
        .project_salaries
        .iter()
        .zip(employee.wage_types_project.iter())
        .enumerate()
    {
        rows.push(FixedPayRow {
            festbez_id: (i + 2) as u8,
            lohnart_nr: wage_type
                .clone()
                .unwrap_or_else(|| DEFAULT_WAGE_TYPE.to_string()),
            betrag: salary.unwrap_or(0.0),
        });
    }

    for (i, (supplement, wage_type)) in employee
        .supplements
        .iter()
        .zip(employee.wage_types_supplement.iter())
        .enumerate()
    {
        rows.push(FixedPayRow {
            festbez_id: (i + 6) as u8,
            lohnart_nr: wage_type
                .clone()
                .unwrap_or_else(|| DEFAULT_SUPPLEMENT_WAGE_TYPE.to_string()),
            betrag: supplement.unwrap_or(0.0),
        });
    }

    rows
}

/// Base contract amount. Active project pay replaces the base salary
/// unless the capture sheet flags it as additional compensation.
fn basic_salary(employee: &Employee) -> Option<f64> {
    let has_project_salary = employee
        .project_salaries
        .iter()
        .any(|s| s.is_some_and(|v| v > 0.0));

    if has_project_salary && !employee.extra_compensation {
        return None;
    }
    employee.base_contract_salary
}
