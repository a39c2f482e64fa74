// DIED code tables. Host-side option values (as captured on the forms)
// are mapped to the numeric or letter codes LODAS expects. Unknown values
// are logged and exported empty.

/// DIED 4003: Gender
const GENDER: &[(&str, &str)] = &[
    ("male", "0"),
    ("female", "1"),
    ("transgender", "2"),
    ("genderqueer", "2"),
    ("other", "2"),
    ("prefer not to say", "3"),
];

/// DIED 4574: Employment relationship
const EMPLOYMENT_RELATION: &[(&str, &str)] = &[
    ("unbefristet", "0"),
    ("befristet", "1"),
    ("zweckbefristet", "2"),
];

/// DIED 4609: Remuneration form
const REMUNERATION_FORM: &[(&str, &str)] = &[
    ("stundenlohn", "0"),
    ("leistungslohn", "1"),
    ("gehalt", "2"),
];

/// DIED 4630: Main/secondary employer
const MAIN_EMPLOYER: &[(&str, &str)] = &[
    ("keine angabe", "0"),
    ("hauptarbeitgeber", "1"),
    ("nebenarbeitgeber", "2"),
];

/// DIED 4624: Religious confession (church tax)
const CONFESSION: &[(&str, &str)] = &[
    ("konfessionslos / keine kirchensteuerberechnung", "0"),
    ("ev - evangelische kirchensteuer", "1"),
    ("rk - römisch-katholische kirchensteuer", "2"),
    ("ak - altkatholische kirchensteuer", "3"),
    ("fa - freie religionsgemeinschaft alzey", "4"),
    ("fb - freireligiöse landesgemeinde baden", "5"),
    ("fg - freireligiöse landesgemeinde pfalz", "6"),
    ("fm - freireligiöse gemeinde mainz", "7"),
    ("fs - freireligiöse gemeinde offenbach/main", "9"),
    ("ib - israelitische religionsgemeinschaft baden", "10"),
    ("is - israelitische / jüdische kultussteuer", "13"),
];

/// DIED 4640: Disability status
const DISABILITY: &[(&str, &str)] = &[
    ("nein", "0"),
    ("2 prozent", "1"),
    ("20 prozent", "2"),
];

/// DIED 4604: Highest school education
const SCHOOL_DEGREE: &[(&str, &str)] = &[
    ("keine angabe", "0"),
    ("ohne schulabschluss", "1"),
    ("haupt-/volksschulabschluss", "2"),
    ("mittlere reife oder gleichwertiger abschluss", "3"),
    ("abitur/fachabitur", "4"),
    ("abschluss unbekannt", "8"),
];

/// DIED 4601: Highest professional education
const VOCATIONAL_DEGREE: &[(&str, &str)] = &[
    ("keine angabe", "0"),
    ("ohne beruflichen ausbildungsabschluss", "1"),
    ("abschluss einer anerkannten berufsausbildung", "2"),
    ("meister-/techniker - oder gleichwertiger fachschulabschluss", "3"),
    ("bachelor", "4"),
    ("diplom/magister/master/staatsexamen", "5"),
    ("promotion", "6"),
    ("abschluss unbekannt", "9"),
];

/// DIED 4214: Birth country (numeric codes, common subset)
const BIRTH_COUNTRY: &[(&str, &str)] = &[
    ("deutschland", "0"),
    ("albanien", "121"),
    ("bosnien und herzegowina", "122"),
    ("belgien", "124"),
    ("bulgarien", "125"),
    ("dänemark", "126"),
    ("estland", "127"),
    ("finnland", "128"),
    ("frankreich", "129"),
    ("kroatien", "130"),
    ("slowenien", "131"),
    ("griechenland", "134"),
    ("irland", "135"),
    ("island", "136"),
    ("italien", "137"),
    ("lettland", "139"),
    ("liechtenstein", "141"),
    ("litauen", "142"),
    ("luxemburg", "143"),
    ("nordmazedonien", "144"),
    ("malta", "145"),
    ("niederlande", "148"),
    ("norwegen", "149"),
    ("kosovo", "150"),
    ("österreich", "151"),
    ("polen", "152"),
    ("portugal", "153"),
    ("rumänien", "154"),
    ("slowakei", "155"),
    ("schweden", "157"),
    ("schweiz", "158"),
    ("russische föderation", "160"),
    ("spanien", "161"),
    ("türkei", "163"),
    ("tschechien", "164"),
    ("ungarn", "165"),
    ("ukraine", "166"),
    ("vereinigtes königreich", "168"),
    ("serbien", "170"),
    ("zypern", "181"),
    ("übriges europa", "199"),
    ("marokko", "252"),
    ("tunesien", "285"),
    ("ägypten", "287"),
    ("vereinigte staaten", "368"),
    ("brasilien", "327"),
    ("indien", "436"),
    ("china", "479"),
    ("vietnam", "432"),
    ("syrien", "475"),
    ("afghanistan", "423"),
];

/// DIED 4213: Nationality (letter codes, common subset)
const NATIONALITY: &[(&str, &str)] = &[
    ("deutschland", "0"),
    ("belgien", "B"),
    ("bulgarien", "BG"),
    ("dänemark", "DK"),
    ("estland", "EST"),
    ("finnland", "FIN"),
    ("frankreich", "F"),
    ("griechenland", "GR"),
    ("irland", "IRL"),
    ("italien", "I"),
    ("kroatien", "HR"),
    ("lettland", "LV"),
    ("litauen", "LT"),
    ("luxemburg", "L"),
    ("malta", "M"),
    ("niederlande", "NL"),
    ("norwegen", "N"),
    ("österreich", "A"),
    ("polen", "PL"),
    ("portugal", "P"),
    ("rumänien", "RO"),
    ("russische föderation", "RUS"),
    ("schweden", "S"),
    ("schweiz", "CH"),
    ("serbien", "SRB"),
    ("slowakei", "SK"),
    ("slowenien", "SLO"),
    ("spanien", "E"),
    ("syrien", "SYR"),
    ("tschechien", "CZ"),
    ("türkei", "TR"),
    ("ukraine", "UA"),
    ("ungarn", "H"),
    ("vereinigte staaten", "USA"),
    ("vereinigtes königreich", "GB"),
    ("vietnam", "VN"),
];

/// Yes/no option fields share one mapping.
const YES_NO: &[(&str, &str)] = &[("nein", "0"), ("ja", "1")];

fn lookup(field: &'static str, table: &[(&str, &str)], value: &str) -> String {
    let needle = value.trim().to_lowercase();
    if needle.is_empty() {
        return String::new();
    }
    match table.iter().find(|(key, _)| *key == needle) {
        Some((_, code)) => (*code).to_string(),
        None => {
            tracing::warn!(field, value, "No DIED code mapping for value");
            String::new()
        }
    }
}

pub fn gender_code(value: &str) -> String {
    lookup("geschlecht", GENDER, value)
}

pub fn yes_no_code(field: &'static str, value: &str) -> String {
    lookup(field, YES_NO, value)
}

pub fn employment_relation_code(value: &str) -> String {
    lookup("arbeitsverhaeltnis", EMPLOYMENT_RELATION, value)
}

pub fn remuneration_form_code(value: &str) -> String {
    lookup("entlohnungsform", REMUNERATION_FORM, value)
}

pub fn main_employer_code(value: &str) -> String {
    lookup("els_2_haupt_ag_kz", MAIN_EMPLOYER, value)
}

pub fn confession_code(value: &str) -> String {
    lookup("konf_an", CONFESSION, value)
}

pub fn disability_code(value: &str) -> String {
    lookup("schwerbeschaedigt", DISABILITY, value)
}

pub fn school_degree_code(value: &str) -> String {
    lookup("schulabschluss", SCHOOL_DEGREE, value)
}

pub fn vocational_degree_code(value: &str) -> String {
    lookup("ausbildungsabschluss", VOCATIONAL_DEGREE, value)
}

/// DIED 1566: Tax classes pass through as 1 to 6.
pub fn tax_class_code(value: &str) -> String {
    match value.trim() {
        "1" | "2" | "3" | "4" | "5" | "6" => value.trim().to_string(),
        "" => String::new(),
        other => {
            tracing::warn!(field = "st_klasse", value = other, "Unknown tax class");
            String::new()
        }
    }
}

pub fn birth_country_code(value: &str) -> String {
    lookup("geburtsland", BIRTH_COUNTRY, value)
}

pub fn nationality_code(value: &str) -> String {
    lookup("staatsangehoerigkeit", NATIONALITY, value)
}
