//! Flexible date parsing for sheet cells

use chrono::{NaiveDate, NaiveDateTime};

/// Explicit formats tried in order. Day-first entries come before the
/// ISO form, so "3-4-2024" reads as 3 April 2024. This order is load
/// bearing for existing sheet data.
const EXPLICIT_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// Permissive fallback formats for cells typed free-hand
const FALLBACK_FORMATS: &[&str] = &["%Y/%m/%d", "%m/%d/%Y", "%d %b %Y", "%b %d %Y", "%b %d, %Y"];

/// Parse a sheet date cell. Returns None for empty, unparseable, or
/// calendar-invalid input; never fails hard.
pub fn parse_flexible_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    for fmt in EXPLICIT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }
    for fmt in FALLBACK_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }
    // ISO datetime, as exported by some sheet tools
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_month_year_slash() {
        assert_eq!(
            parse_flexible_date("01/01/2024"),
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert_eq!(
            parse_flexible_date("15/01/2024"),
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_ambiguous_dash_date_is_day_first() {
        // "3-4-2024" must read as 3 April, not 4 March
        assert_eq!(
            parse_flexible_date("3-4-2024"),
            Some(NaiveDate::from_ymd_opt(2024, 4, 3).unwrap())
        );
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_flexible_date("2024-03-15"),
            Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
    }

    #[test]
    fn test_fallback_formats() {
        assert_eq!(
            parse_flexible_date("2024/03/15"),
            Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
        assert_eq!(
            parse_flexible_date("15 Mar 2024"),
            Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
    }

    #[test]
    fn test_invalid_input_is_none() {
        assert!(parse_flexible_date("").is_none());
        assert!(parse_flexible_date("   ").is_none());
        assert!(parse_flexible_date("soon").is_none());
        // calendar-invalid date
        assert!(parse_flexible_date("31/02/2024").is_none());
    }
}
