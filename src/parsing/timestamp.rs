//! Timestamp resolution from raw date and time tokens.
//!
//! The resolver normalizes the am/pm marker and then walks an ordered list
//! of chrono templates (see [`DEFAULT_DATE_TEMPLATES`]), keeping the first
//! one that parses. When none does, the caller gets the
//! [`Timestamp::Unresolved`] sentinel instead of an error so the message
//! itself is never lost.
//!
//! [`DEFAULT_DATE_TEMPLATES`]: crate::config::DEFAULT_DATE_TEMPLATES

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::message::Timestamp;

/// Folds the many spellings of an am/pm marker into `"<clock> am|pm"`.
///
/// Lower-cases, drops dots and inner spaces from the marker, and puts a
/// single ASCII space before it. Narrow and regular no-break spaces count as
/// spaces. Times without a marker only get lower-cased and trimmed.
///
/// ```rust
/// use chatscope::parsing::timestamp::normalize_meridiem;
///
/// assert_eq!(normalize_meridiem("9:45 PM"), "9:45 pm");
/// assert_eq!(normalize_meridiem("9:45p.m."), "9:45 pm");
/// assert_eq!(normalize_meridiem("9:45 a. m."), "9:45 am");
/// assert_eq!(normalize_meridiem("21:45"), "21:45");
/// ```
pub fn normalize_meridiem(time: &str) -> String {
    let lower = time.trim().to_lowercase();

    match lower.find(['a', 'p']) {
        Some(idx) => {
            let (clock, marker) = lower.split_at(idx);
            let marker: String = marker.chars().filter(char::is_ascii_alphabetic).collect();
            format!("{} {}", clock.trim_end(), marker)
        }
        None => lower,
    }
}

/// Builds the text fed to the templates: `"<date> <time>"` without commas.
pub fn normalize_datetime(date: &str, time: &str) -> String {
    format!("{} {}", date.trim().replace(',', ""), normalize_meridiem(time))
}

/// Resolves `(date, time)` token pairs against an ordered template list.
///
/// # Example
///
/// ```rust
/// use chatscope::config::ParserConfig;
/// use chatscope::parsing::timestamp::TimestampResolver;
/// use chrono::Timelike;
///
/// let config = ParserConfig::default();
/// let resolver = TimestampResolver::new(&config.date_templates);
///
/// let ts = resolver.resolve("12/11/23", "9:45:30 pm");
/// assert_eq!(ts.as_datetime().unwrap().second(), 30);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimestampResolver<'a> {
    templates: &'a [String],
}

impl<'a> TimestampResolver<'a> {
    /// Creates a resolver over `templates`, tried in order.
    pub fn new(templates: &'a [String]) -> Self {
        Self { templates }
    }

    /// Returns the first template that parses, with the parsed instant.
    pub fn try_resolve(&self, date: &str, time: &str) -> Option<(&'a str, DateTime<Utc>)> {
        let text = normalize_datetime(date, time);
        self.templates.iter().find_map(|template| {
            NaiveDateTime::parse_from_str(&text, template)
                .ok()
                .map(|naive| (template.as_str(), naive.and_utc()))
        })
    }

    /// Resolves a token pair, falling back to the unresolved sentinel.
    pub fn resolve(&self, date: &str, time: &str) -> Timestamp {
        match self.try_resolve(date, time) {
            Some((_, dt)) => Timestamp::Resolved(dt),
            None => Timestamp::unresolved(normalize_datetime(date, time)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use chrono::{Datelike, TimeZone, Timelike};

    fn resolve(date: &str, time: &str) -> Timestamp {
        let config = ParserConfig::default();
        TimestampResolver::new(&config.date_templates).resolve(date, time)
    }

    #[test]
    fn test_normalize_meridiem_variants() {
        assert_eq!(normalize_meridiem("9:45 pm"), "9:45 pm");
        assert_eq!(normalize_meridiem("9:45pm"), "9:45 pm");
        assert_eq!(normalize_meridiem("9:45 P.M."), "9:45 pm");
        assert_eq!(normalize_meridiem("9:45\u{202F}PM"), "9:45 pm");
        assert_eq!(normalize_meridiem("9:45:30 am"), "9:45:30 am");
        assert_eq!(normalize_meridiem(" 09:45 "), "09:45");
    }

    #[test]
    fn test_normalize_datetime_drops_commas() {
        assert_eq!(normalize_datetime("12/11/23,", "9:45 PM"), "12/11/23 9:45 pm");
    }

    #[test]
    fn test_bracketed_seconds() {
        let dt = resolve("12/11/23", "9:45:30 pm").as_datetime().unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 11, 12, 21, 45, 30).unwrap());
        assert_eq!(dt.second(), 30);
    }

    #[test]
    fn test_day_first_wins_when_ambiguous() {
        let dt = resolve("03/04/23", "10:00").as_datetime().unwrap();
        assert_eq!((dt.day(), dt.month()), (3, 4));
    }

    #[test]
    fn test_month_first_when_day_first_impossible() {
        let dt = resolve("12/25/23", "9:45 pm").as_datetime().unwrap();
        assert_eq!((dt.month(), dt.day()), (12, 25));
        assert_eq!(dt.hour(), 21);
    }

    #[test]
    fn test_four_digit_year() {
        let dt = resolve("15/01/2024", "10:30").as_datetime().unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_dotted_and_iso_dates() {
        let dt = resolve("26.10.2025", "20:40").as_datetime().unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 10, 26, 20, 40, 0).unwrap());

        let dt = resolve("2023-11-12", "09:45").as_datetime().unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 11, 12, 9, 45, 0).unwrap());

        let dt = resolve("2023/11/12", "09:45").as_datetime().unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 11, 12, 9, 45, 0).unwrap());
    }

    #[test]
    fn test_dotted_meridiem() {
        let dt = resolve("12/11/23", "9:45 p.m.").as_datetime().unwrap();
        assert_eq!(dt.hour(), 21);
        let dt = resolve("12/11/23", "12:05 a.m.").as_datetime().unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_unresolved_sentinel() {
        let ts = resolve("99/99/99", "9:45 pm");
        assert_eq!(ts, Timestamp::unresolved("99/99/99 9:45 pm"));
    }

    #[test]
    fn test_custom_template_order() {
        let templates = vec!["%m/%d/%y %H:%M".to_string(), "%d/%m/%y %H:%M".to_string()];
        let resolver = TimestampResolver::new(&templates);
        let (template, dt) = resolver.try_resolve("03/04/23", "10:00").unwrap();
        assert_eq!(template, "%m/%d/%y %H:%M");
        assert_eq!((dt.month(), dt.day()), (3, 4));
    }

    #[test]
    fn test_empty_template_list() {
        let resolver = TimestampResolver::new(&[]);
        assert!(resolver.try_resolve("12/11/23", "9:45").is_none());
    }
}
