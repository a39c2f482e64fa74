// LODAS file generation. A file consists of an [Allgemein] header, a
// [Satzbeschreibung] block describing record types 1-12 and a
// [Stammdaten] block with the data rows. The description and the emitted
// rows share one field layout per record type.

use chrono::{Datelike, NaiveDate};

use crate::data::german;
use crate::error::EngineError;
use crate::lodas::record::LodasEmployee;
use crate::models::GeneratedFile;

/// Generates the [Allgemein] section. `valid_from` is the first day of the
/// month the master data becomes effective.
pub fn file_header(consultant_number: &str, client_number: &str, valid_from: NaiveDate) -> String {
    let mut header = String::from("[Allgemein]\n");
    header.push_str("Ziel=Lodas\n");
    header.push_str("Version_SST=1.0\n");
    header.push_str(&format!("BeraterNr={}\n", consultant_number));
    header.push_str(&format!("MandantenNr={}\n", client_number));
    header.push_str("Feldtrennzeichen=;\n");
    header.push_str("Zahlenkomma=,\n");
    header.push_str("Datumsformat=TT.MM.JJJJ\n");
    header.push_str("Stringbegrenzer=\"\"\n");
    header.push_str("Kommentarzeichen=*\n");
    header.push_str(&format!(
        "StammdatenGueltigAb={}\n",
        german::format_date(valid_from)
    ));
    header.push_str("BetrieblichePNrVerwenden=Nein\n\n");
    header
}

/// Generates the [Satzbeschreibung] section.
pub fn record_description() -> String {
    let mut description = String::from("[Satzbeschreibung]\n");

    // Record 1: u_lod_psd_mitarbeiter (employee master data)
    description.push_str(
        "1;u_lod_psd_mitarbeiter;pnr#psd;duevo_familienname#psd;duevo_vorname#psd;\
         geschlecht#psd;geburtsdatum_ttmmjj#psd;adresse_nation_kz#psd;duevo_titel#psd;\
         kz_alleinerziehend#psd;adresse_anschriftenzusatz#psd;geburtsland#psd;gebname#psd;\
         gebort#psd;email#psd;ersteintrittsdatum#psd;adresse_strasse_nr#psd;adresse_ort#psd;\
         adresse_plz#psd;adresse_strassenname#psd;schwerbeschaedigt#psd;\
         staatsangehoerigkeit#psd;telefon#psd;familienstand#psd;sozialversicherung_nr#psd;\
         datum_studienbesch#psd;\n",
    );

    // Record 2: u_lod_psd_taetigkeit (activity, beschaeft_nr carries the fixed value 1)
    description.push_str(
        "2;u_lod_psd_taetigkeit;pnr#psd;berufsbezeichnung#psd;beschaeft_nr#psd;\
         kst_abteilungs_nr#psd;schulabschluss#psd;ausbildungsabschluss#psd;\n",
    );

    // Record 3: u_lod_psd_beschaeftigung (employment)
    description.push_str(
        "3;u_lod_psd_beschaeftigung;pnr#psd;arbeitsverhaeltnis#psd;eintrittdatum#psd;\
         austrittdatum#psd;\n",
    );

    // Record 4: u_lod_psd_steuer (tax)
    description.push_str(
        "4;u_lod_psd_steuer;pnr#psd;identifikationsnummer#psd;st_klasse#psd;konf_an#psd;\
         kfb_anzahl#psd;\n",
    );

    // Record 5: u_lod_psd_ma_bank (bank)
    description.push_str(
        "5;u_lod_psd_ma_bank;pnr#psd;ma_iban#psd;ma_bic#psd;ma_bank_kto_inhaber_abw#psd;\n",
    );

    // Record 6: u_lod_psd_schwerbeh (disability)
    description.push_str("6;u_lod_psd_schwerbeh;pnr#psd;sba_sb_ausweis_bis#psd;\n");

    // Record 7: u_lod_psd_arbeitszeit_regelm (regular working time)
    description.push_str(
        "7;u_lod_psd_arbeitszeit_regelm;pnr#psd;az_wtl_indiv#psd;url_tage_jhrl#psd;\
         urlaubsanspr_pro_jahr#psd;\n",
    );

    // Record 8: u_lod_psd_lohn_gehalt_bezuege (wages)
    description.push_str(
        "8;u_lod_psd_lohn_gehalt_bezuege;pnr#psd;std_lohn_1#psd;std_lohn_2#psd;\
         lfd_brutto_vereinbart#psd;\n",
    );

    // Record 9: u_lod_psd_fahrtkostenzuschuss (travel subsidy)
    description.push_str("9;u_lod_psd_fahrtkostenzuschuss;pnr#psd;jobticket#psd;\n");

    // Record 10: u_lod_psd_besonderheiten (remuneration form)
    description.push_str("10;u_lod_psd_besonderheiten;pnr#psd;entlohnungsform#psd;\n");

    // Record 11: u_lod_psd_kindergeld (children)
    description.push_str(
        "11;u_lod_psd_kindergeld;pnr#psd;kind_nr#psd;kind_vorname#psd;kind_nachname#psd;\
         kind_geburtsdatum#psd;\n",
    );

    // Record 12: u_lod_psd_festbezuege (fixed pay components)
    description.push_str(
        "12;u_lod_psd_festbezuege;pnr#psd;festbez_id#psd;lohnart_nr#psd;betrag#psd;\
         intervall#psd;kuerzung#psd;\n",
    );

    description.push('\n');
    description
}

/// Formats a text field: quoted unless empty.
pub fn format_field(value: &str, needs_quotes: bool) -> String {
    if value.is_empty() {
        String::new()
    } else if needs_quotes {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

/// Formats a numeric field with the decimal comma, empty when absent.
pub fn format_numeric_field(value: Option<f64>) -> String {
    value.map(german::format_decimal).unwrap_or_default()
}

fn row(record_type: &str, fields: &[String]) -> String {
    format!("{};{};\n", record_type, fields.join(";"))
}

/// Generates the [Stammdaten] section for a list of employees.
pub fn master_data(employees: &[LodasEmployee]) -> String {
    let mut data = String::from("[Stammdaten]\n");
    for employee in employees {
        data.push_str(&employee_records(employee));
    }
    data
}

fn employee_records(e: &LodasEmployee) -> String {
    let mut data = String::new();
    let pnr = format_field(&e.pnr, true);

    // Record type 1: employee master data
    data.push_str(&row(
        "1",
        &[
            pnr.clone(),
            format_field(&e.duevo_familienname, true),
            format_field(&e.duevo_vorname, true),
            format_field(&e.geschlecht, false),
            format_field(&e.geburtsdatum, false),
            format_field(&e.adresse_nation_kz, false),
            format_field(&e.duevo_titel, true),
            format_field(&e.kz_alleinerziehend, false),
            format_field(&e.adresse_anschriftenzusatz, true),
            format_field(&e.geburtsland, false),
            format_field(&e.gebname, true),
            format_field(&e.gebort, true),
            format_field(&e.email, true),
            format_field(&e.ersteintrittsdatum, false),
            format_field(&e.adresse_strasse_nr, true),
            format_field(&e.adresse_ort, true),
            format_field(&e.adresse_plz, false),
            format_field(&e.adresse_strassenname, true),
            format_field(&e.schwerbeschaedigt, false),
            format_field(&e.staatsangehoerigkeit, false),
            format_field(&e.telefon, true),
            format_field(&e.familienstand, false),
            format_field(&e.sozialversicherung_nr, true),
            format_field(&e.datum_studienbesch, false),
        ],
    ));

    // Record type 2: activity, beschaeft_nr is the fixed value 1
    data.push_str(&row(
        "2",
        &[
            pnr.clone(),
            format_field(&e.berufsbezeichnung, true),
            "1".to_string(),
            format_field(&e.kst_abteilungs_nr, true),
            format_field(&e.schulabschluss, false),
            format_field(&e.ausbildungsabschluss, false),
        ],
    ));

    // Record type 3: employment
    data.push_str(&row(
        "3",
        &[
            pnr.clone(),
            format_field(&e.arbeitsverhaeltnis, false),
            format_field(&e.eintrittdatum, false),
            format_field(&e.austrittdatum, false),
        ],
    ));

    // Record type 4: tax
    data.push_str(&row(
        "4",
        &[
            pnr.clone(),
            format_field(&e.identifikationsnummer, true),
            format_field(&e.st_klasse, false),
            format_field(&e.konf_an, false),
            format_numeric_field(e.kfb_anzahl),
        ],
    ));

    // Record type 5: bank
    data.push_str(&row(
        "5",
        &[
            pnr.clone(),
            format_field(&e.ma_iban, true),
            format_field(&e.ma_bic, true),
            format_field(&e.ma_bank_kto_inhaber_abw, true),
        ],
    ));

    // Record type 6: disability, only when disability data exists
    if e.has_disability_data() {
        data.push_str(&row(
            "6",
            &[pnr.clone(), format_field(&e.sba_sb_ausweis_bis, false)],
        ));
    }

    // Record type 7: regular working time
    data.push_str(&row(
        "7",
        &[
            pnr.clone(),
            format_numeric_field(e.az_wtl_indiv),
            format_numeric_field(e.url_tage_jhrl),
            format_numeric_field(e.urlaubsanspr_pro_jahr),
        ],
    ));

    // Record type 8: wages
    data.push_str(&row(
        "8",
        &[
            pnr.clone(),
            format_numeric_field(e.std_lohn_1),
            format_numeric_field(e.std_lohn_2),
            format_numeric_field(e.lfd_brutto_vereinbart),
        ],
    ));

    // Record type 9: travel subsidy
    data.push_str(&row("9", &[pnr.clone(), format_numeric_field(e.jobticket)]));

    // Record type 10: remuneration form
    data.push_str(&row(
        "10",
        &[pnr.clone(), format_field(&e.entlohnungsform, false)],
    ));

    // Record type 11: one row per child with data
    for child in &e.children {
        data.push_str(&row(
            "11",
            &[
                pnr.clone(),
                format_field(&child.kind_nr, false),
                format_field(&child.kind_vorname, true),
                format_field(&child.kind_nachname, true),
                format_field(&child.kind_geburtsdatum, false),
            ],
        ));
    }

    // Record type 12: fixed pay components
    for pay in &e.fixed_pay {
        data.push_str(&row(
            "12",
            &[
                pnr.clone(),
                pay.festbez_id.to_string(),
                format_field(&pay.lohnart_nr, false),
                german::format_decimal(pay.betrag),
                "0".to_string(),
                "0".to_string(),
            ],
        ));
    }

    data
}

/// Builds the complete file for one company.
pub fn company_file(
    company: &str,
    employees: &[LodasEmployee],
    consultant_number: &str,
    client_number: &str,
    valid_from: NaiveDate,
    timestamp: &str,
) -> GeneratedFile {
    let mut content = file_header(consultant_number, client_number, valid_from);
    content.push_str(&record_description());
    content.push_str(&master_data(employees));

    GeneratedFile {
        filename: format!(
            "DATEV_LODAS_{}_{}.txt",
            company.replace(' ', "_"),
            timestamp
        ),
        company: company.to_string(),
        employee_count: employees.len(),
        children_count: employees.iter().map(|e| e.exported_children()).sum(),
        content,
    }
}

/// Builds the file for a single-employee export; only the filename differs
/// from the company batch.
pub fn single_employee_file(
    employee_id: &str,
    company: &str,
    employee: &LodasEmployee,
    consultant_number: &str,
    client_number: &str,
    valid_from: NaiveDate,
    timestamp: &str,
) -> GeneratedFile {
    let employees = std::slice::from_ref(employee);
    let mut file = company_file(
        company,
        employees,
        consultant_number,
        client_number,
        valid_from,
        timestamp,
    );
    file.filename = format!("DATEV_LODAS_Single_{}_{}.txt", employee_id, timestamp);
    file
}

/// First day of the month for the StammdatenGueltigAb header line.
pub fn valid_from(today: NaiveDate) -> Result<NaiveDate, EngineError> {
    today.with_day(1).ok_or_else(|| {
        EngineError::FileBuildError(format!("Cannot determine month start for {}", today))
    })
}
