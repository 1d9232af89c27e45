//! Locale table shipped with the library.

use std::sync::Arc;

use lazy_static::lazy_static;

use super::{CalendarNames, Locale, LocaleDatabase, LocaleSpec};

const NBSP: char = '\u{00a0}';
const NNBSP: char = '\u{202f}';
const APOSTROPHE: char = '\u{2019}';

lazy_static! {
    pub(super) static ref BUILTIN: LocaleDatabase =
        LocaleDatabase::from_specs(&builtin_locales()).expect("built-in locale data is well-formed");

    static ref EN: Arc<CalendarNames> = Arc::new(CalendarNames::new(
        ["January", "February", "March", "April", "May", "June", "July", "August", "September", "October", "November", "December"],
        ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"],
        ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"],
        ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
        "AM",
        "PM",
    ));

    static ref DE: Arc<CalendarNames> = Arc::new(CalendarNames::new(
        ["Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September", "Oktober", "November", "Dezember"],
        ["Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.", "Dez."],
        ["Sonntag", "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag"],
        ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
        "AM",
        "PM",
    ));

    static ref FR: Arc<CalendarNames> = Arc::new(CalendarNames::new(
        ["janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre", "octobre", "novembre", "décembre"],
        ["janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.", "déc."],
        ["dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi"],
        ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
        "AM",
        "PM",
    ));

    static ref ES: Arc<CalendarNames> = Arc::new(CalendarNames::new(
        ["enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre", "octubre", "noviembre", "diciembre"],
        ["ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic"],
        ["domingo", "lunes", "martes", "miércoles", "jueves", "viernes", "sábado"],
        ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"],
        "a. m.",
        "p. m.",
    ));

    static ref IT: Arc<CalendarNames> = Arc::new(CalendarNames::new(
        ["gennaio", "febbraio", "marzo", "aprile", "maggio", "giugno", "luglio", "agosto", "settembre", "ottobre", "novembre", "dicembre"],
        ["gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic"],
        ["domenica", "lunedì", "martedì", "mercoledì", "giovedì", "venerdì", "sabato"],
        ["dom", "lun", "mar", "mer", "gio", "ven", "sab"],
        "AM",
        "PM",
    ));

    static ref NL: Arc<CalendarNames> = Arc::new(CalendarNames::new(
        ["januari", "februari", "maart", "april", "mei", "juni", "juli", "augustus", "september", "oktober", "november", "december"],
        ["jan.", "feb.", "mrt.", "apr.", "mei", "jun.", "jul.", "aug.", "sep.", "okt.", "nov.", "dec."],
        ["zondag", "maandag", "dinsdag", "woensdag", "donderdag", "vrijdag", "zaterdag"],
        ["zo", "ma", "di", "wo", "do", "vr", "za"],
        "a.m.",
        "p.m.",
    ));

    static ref PT: Arc<CalendarNames> = Arc::new(CalendarNames::new(
        ["janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro", "outubro", "novembro", "dezembro"],
        ["jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez."],
        ["domingo", "segunda-feira", "terça-feira", "quarta-feira", "quinta-feira", "sexta-feira", "sábado"],
        ["dom.", "seg.", "ter.", "qua.", "qui.", "sex.", "sáb."],
        "AM",
        "PM",
    ));

    // Polish dates use the genitive month forms.
    static ref PL: Arc<CalendarNames> = Arc::new(CalendarNames::new(
        ["stycznia", "lutego", "marca", "kwietnia", "maja", "czerwca", "lipca", "sierpnia", "września", "października", "listopada", "grudnia"],
        ["sty", "lut", "mar", "kwi", "maj", "cze", "lip", "sie", "wrz", "paź", "lis", "gru"],
        ["niedziela", "poniedziałek", "wtorek", "środa", "czwartek", "piątek", "sobota"],
        ["niedz.", "pon.", "wt.", "śr.", "czw.", "pt.", "sob."],
        "AM",
        "PM",
    ));
}

/// Number conventions shared by several locales.
struct Numbers {
    decimal: char,
    grouping: char,
    percent: &'static str,
    currency: &'static str,
    symbol: &'static str,
}

/// Date and time patterns, Full to Short.
struct Calendar {
    dates: [&'static str; 4],
    times: [&'static str; 4],
    separator: &'static str,
    names: &'static Arc<CalendarNames>,
}

fn spec(tag: &str, numbers: Numbers, calendar: Calendar) -> LocaleSpec {
    LocaleSpec {
        locale: tag.parse::<Locale>().expect("built-in locale tags are valid"),
        decimal_separator: numbers.decimal,
        grouping_separator: numbers.grouping,
        minus_sign: '-',
        grouping_size: 3,
        percent_pattern: numbers.percent.to_string(),
        currency_pattern: numbers.currency.to_string(),
        currency_symbol: numbers.symbol.to_string(),
        currency_digits: 2,
        date_patterns: calendar.dates.map(str::to_string),
        time_patterns: calendar.times.map(str::to_string),
        date_time_separator: calendar.separator.to_string(),
        names: Arc::clone(calendar.names),
    }
}

const PERCENT_NBSP: &str = "#\u{a0}%";
const PERCENT_NNBSP: &str = "#\u{202f}%";
const CURRENCY_NBSP: &str = "#\u{a0}¤";

const TIME_12H: [&str; 4] = ["h:mm:ss a", "h:mm:ss a", "h:mm:ss a", "h:mm a"];
const TIME_24H: [&str; 4] = ["HH:mm:ss", "HH:mm:ss", "HH:mm:ss", "HH:mm"];
const TIME_24H_SHORT_HOUR: [&str; 4] = ["H:mm:ss", "H:mm:ss", "H:mm:ss", "H:mm"];

/// Descriptions of every built-in locale, in catalog order.
pub fn builtin_locales() -> Vec<LocaleSpec> {
    vec![
        spec(
            "en-US",
            Numbers { decimal: '.', grouping: ',', percent: "#%", currency: "¤#", symbol: "$" },
            Calendar {
                dates: ["EEEE, MMMM d, y", "MMMM d, y", "MMM d, y", "M/d/yy"],
                times: TIME_12H,
                separator: ", ",
                names: &EN,
            },
        ),
        spec(
            "en-GB",
            Numbers { decimal: '.', grouping: ',', percent: "#%", currency: "¤#", symbol: "£" },
            Calendar {
                dates: ["EEEE, d MMMM y", "d MMMM y", "d MMM y", "dd/MM/y"],
                times: TIME_24H,
                separator: ", ",
                names: &EN,
            },
        ),
        spec(
            "en-IE",
            Numbers { decimal: '.', grouping: ',', percent: "#%", currency: "¤#", symbol: "€" },
            Calendar {
                dates: ["EEEE d MMMM y", "d MMMM y", "d MMM y", "dd/MM/y"],
                times: TIME_24H,
                separator: ", ",
                names: &EN,
            },
        ),
        spec(
            "en-CA",
            Numbers { decimal: '.', grouping: ',', percent: "#%", currency: "¤#", symbol: "$" },
            Calendar {
                dates: ["EEEE, MMMM d, y", "MMMM d, y", "MMM d, y", "y-MM-dd"],
                times: TIME_12H,
                separator: ", ",
                names: &EN,
            },
        ),
        spec(
            "en-AU",
            Numbers { decimal: '.', grouping: ',', percent: "#%", currency: "¤#", symbol: "$" },
            Calendar {
                dates: ["EEEE, d MMMM y", "d MMMM y", "d MMM y", "d/M/yy"],
                times: TIME_12H,
                separator: ", ",
                names: &EN,
            },
        ),
        spec(
            "de-DE",
            Numbers { decimal: ',', grouping: '.', percent: PERCENT_NBSP, currency: CURRENCY_NBSP, symbol: "€" },
            Calendar {
                dates: ["EEEE, d. MMMM y", "d. MMMM y", "dd.MM.y", "dd.MM.yy"],
                times: TIME_24H,
                separator: ", ",
                names: &DE,
            },
        ),
        spec(
            "de-AT",
            Numbers { decimal: ',', grouping: NBSP, percent: PERCENT_NBSP, currency: "¤ #;-¤ #", symbol: "€" },
            Calendar {
                dates: ["EEEE, d. MMMM y", "d. MMMM y", "dd.MM.y", "dd.MM.yy"],
                times: TIME_24H,
                separator: ", ",
                names: &DE,
            },
        ),
        spec(
            "de-CH",
            Numbers { decimal: '.', grouping: APOSTROPHE, percent: "#%", currency: "¤ #;¤-#", symbol: "CHF" },
            Calendar {
                dates: ["EEEE, d. MMMM y", "d. MMMM y", "dd.MM.y", "dd.MM.yy"],
                times: TIME_24H,
                separator: ", ",
                names: &DE,
            },
        ),
        spec(
            "fr-FR",
            Numbers { decimal: ',', grouping: NNBSP, percent: PERCENT_NNBSP, currency: CURRENCY_NBSP, symbol: "€" },
            Calendar {
                dates: ["EEEE d MMMM y", "d MMMM y", "d MMM y", "dd/MM/y"],
                times: TIME_24H,
                separator: " ",
                names: &FR,
            },
        ),
        spec(
            "fr-CA",
            Numbers { decimal: ',', grouping: NBSP, percent: PERCENT_NBSP, currency: CURRENCY_NBSP, symbol: "$" },
            Calendar {
                dates: ["EEEE d MMMM y", "d MMMM y", "d MMM y", "y-MM-dd"],
                times: [
                    "HH 'h' mm 'min' ss 's'",
                    "HH 'h' mm 'min' ss 's'",
                    "HH 'h' mm 'min' ss 's'",
                    "HH 'h' mm",
                ],
                separator: " ",
                names: &FR,
            },
        ),
        spec(
            "fr-CH",
            Numbers { decimal: ',', grouping: NNBSP, percent: "#%", currency: CURRENCY_NBSP, symbol: "CHF" },
            Calendar {
                dates: ["EEEE, d MMMM y", "d MMMM y", "d MMM y", "dd.MM.yy"],
                times: TIME_24H,
                separator: " ",
                names: &FR,
            },
        ),
        spec(
            "es-ES",
            Numbers { decimal: ',', grouping: '.', percent: PERCENT_NBSP, currency: CURRENCY_NBSP, symbol: "€" },
            Calendar {
                dates: ["EEEE, d 'de' MMMM 'de' y", "d 'de' MMMM 'de' y", "d MMM y", "d/M/yy"],
                times: TIME_24H_SHORT_HOUR,
                separator: ", ",
                names: &ES,
            },
        ),
        spec(
            "es-MX",
            Numbers { decimal: '.', grouping: ',', percent: PERCENT_NBSP, currency: "¤#", symbol: "$" },
            Calendar {
                dates: ["EEEE, d 'de' MMMM 'de' y", "d 'de' MMMM 'de' y", "d MMM y", "dd/MM/yy"],
                times: TIME_24H_SHORT_HOUR,
                separator: ", ",
                names: &ES,
            },
        ),
        spec(
            "es-US",
            Numbers { decimal: '.', grouping: ',', percent: PERCENT_NBSP, currency: "¤#", symbol: "$" },
            Calendar {
                dates: ["EEEE, d 'de' MMMM 'de' y", "d 'de' MMMM 'de' y", "d MMM y", "d/M/y"],
                times: TIME_12H,
                separator: ", ",
                names: &ES,
            },
        ),
        spec(
            "es-PA",
            Numbers { decimal: '.', grouping: ',', percent: "#%", currency: "¤#", symbol: "B/." },
            Calendar {
                dates: ["EEEE, d 'de' MMMM 'de' y", "d 'de' MMMM 'de' y", "MM/dd/y", "MM/dd/yy"],
                times: TIME_24H,
                separator: " ",
                names: &ES,
            },
        ),
        spec(
            "it-IT",
            Numbers { decimal: ',', grouping: '.', percent: "#%", currency: CURRENCY_NBSP, symbol: "€" },
            Calendar {
                dates: ["EEEE d MMMM y", "d MMMM y", "d MMM y", "dd/MM/yy"],
                times: TIME_24H,
                separator: ", ",
                names: &IT,
            },
        ),
        spec(
            "it-CH",
            Numbers { decimal: '.', grouping: APOSTROPHE, percent: "#%", currency: "¤ #;¤-#", symbol: "CHF" },
            Calendar {
                dates: ["EEEE, d MMMM y", "d MMMM y", "d MMM y", "dd.MM.yy"],
                times: TIME_24H,
                separator: " ",
                names: &IT,
            },
        ),
        spec(
            "nl-NL",
            Numbers { decimal: ',', grouping: '.', percent: "#%", currency: "¤ #;¤ -#", symbol: "€" },
            Calendar {
                dates: ["EEEE d MMMM y", "d MMMM y", "d MMM y", "dd-MM-y"],
                times: TIME_24H,
                separator: " ",
                names: &NL,
            },
        ),
        spec(
            "nl-BE",
            Numbers { decimal: ',', grouping: '.', percent: "#%", currency: "¤ #;¤ -#", symbol: "€" },
            Calendar {
                dates: ["EEEE d MMMM y", "d MMMM y", "d MMM y", "d/MM/y"],
                times: TIME_24H,
                separator: " ",
                names: &NL,
            },
        ),
        spec(
            "pt-PT",
            Numbers { decimal: ',', grouping: NBSP, percent: "#%", currency: CURRENCY_NBSP, symbol: "€" },
            Calendar {
                dates: ["EEEE, d 'de' MMMM 'de' y", "d 'de' MMMM 'de' y", "dd/MM/y", "dd/MM/yy"],
                times: TIME_24H,
                separator: ", ",
                names: &PT,
            },
        ),
        spec(
            "pt-BR",
            Numbers { decimal: ',', grouping: '.', percent: "#%", currency: "¤ #", symbol: "R$" },
            Calendar {
                dates: ["EEEE, d 'de' MMMM 'de' y", "d 'de' MMMM 'de' y", "d 'de' MMM 'de' y", "dd/MM/y"],
                times: TIME_24H,
                separator: " ",
                names: &PT,
            },
        ),
        spec(
            "pl-PL",
            Numbers { decimal: ',', grouping: NBSP, percent: "#%", currency: CURRENCY_NBSP, symbol: "zł" },
            Calendar {
                dates: ["EEEE, d MMMM y", "d MMMM y", "d MMM y", "d.MM.y"],
                times: TIME_24H,
                separator: ", ",
                names: &PL,
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_specs_compile() {
        let specs = builtin_locales();
        let db = LocaleDatabase::from_specs(&specs).unwrap();
        assert_eq!(db.len(), specs.len());
    }

    #[test]
    fn test_builtin_order_is_stable() {
        let first: Vec<String> = builtin_locales().iter().map(|s| s.locale.to_string()).collect();
        let second: Vec<String> = LocaleDatabase::builtin().locales().map(|l| l.to_string()).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], "en-US");
    }
}
