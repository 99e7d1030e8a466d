use chrono::{Datelike, NaiveDate};

/// Selects `days[offset .. offset + count]`, truncated at the end of `days`.
pub fn day_window(days: &[String], count: usize, offset: usize) -> &[String] {
    let start = offset.min(days.len());
    let end = offset.saturating_add(count).min(days.len());
    &days[start..end]
}

/// Renders `YYYY-MM-DD` as `<month>月<day>日` without zero padding.
///
/// Strings that are not calendar dates are returned unchanged.
pub fn format_month_day(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => format!("{}月{}日", d.month(), d.day()),
        Err(_) => date.to_string(),
    }
}

/// Label covering the first and last day of the window, e.g. `2月24日—2月26日`.
pub fn date_range_label(window: &[String]) -> String {
    match (window.first(), window.last()) {
        (Some(first), Some(last)) => {
            format!("{}—{}", format_month_day(first), format_month_day(last))
        }
        _ => String::new(),
    }
}

/// `YYYYMMDD` stamp used in export file names: the first ten characters of
/// the generation timestamp with dashes removed.
pub fn date_stamp(generated_at: &str) -> String {
    generated_at.chars().take(10).filter(|c| *c != '-').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(list: &[&str]) -> Vec<String> {
        list.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_window_slices_from_offset() {
        let all = days(&["2026-02-24", "2026-02-25", "2026-02-26"]);
        assert_eq!(day_window(&all, 1, 1), &all[1..2]);
        assert_eq!(day_window(&all, 3, 0), &all[..]);
    }

    #[test]
    fn test_window_truncates_past_end() {
        let all = days(&["2026-02-24", "2026-02-25", "2026-02-26"]);
        assert_eq!(day_window(&all, 7, 1), &all[1..]);
        assert!(day_window(&all, 2, 5).is_empty());
        assert!(day_window(&all, 0, 0).is_empty());
        assert_eq!(day_window(&all, usize::MAX, 2), &all[2..]);
    }

    #[test]
    fn test_format_month_day_unpadded() {
        assert_eq!(format_month_day("2026-02-04"), "2月4日");
        assert_eq!(format_month_day("2026-12-31"), "12月31日");
    }

    #[test]
    fn test_date_range_label() {
        let window = days(&["2026-02-24", "2026-02-25", "2026-02-26"]);
        assert_eq!(date_range_label(&window), "2月24日—2月26日");
    }

    #[test]
    fn test_date_range_single_day() {
        let window = days(&["2026-03-01"]);
        assert_eq!(date_range_label(&window), "3月1日—3月1日");
    }

    #[test]
    fn test_date_range_empty_window() {
        assert_eq!(date_range_label(&[]), "");
    }

    #[test]
    fn test_date_stamp() {
        assert_eq!(date_stamp("2026-02-24T10:00:00+08:00"), "20260224");
        assert_eq!(date_stamp("2026-02-24"), "20260224");
    }
}
