#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tudu::libs::formatter::{format_date, is_due_soon, is_past_due, priority_color, priority_label};
    use tudu::libs::task::Priority;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some(date(2025, 11, 10))), "Nov 10, 2025");
        assert_eq!(format_date(Some(date(2025, 11, 5))), "Nov 5, 2025");
        assert_eq!(format_date(None), "No due date");
    }

    #[test]
    fn test_past_due() {
        let today = date(2025, 11, 5);

        assert!(is_past_due(Some(date(2025, 11, 4)), today));
        assert!(!is_past_due(Some(today), today));
        assert!(!is_past_due(Some(date(2025, 11, 6)), today));
        assert!(!is_past_due(None, today));
    }

    #[test]
    fn test_due_soon_window() {
        let today = date(2025, 12, 30);

        assert!(is_due_soon(Some(today), today));
        assert!(is_due_soon(Some(date(2026, 1, 2)), today));
        assert!(!is_due_soon(Some(date(2026, 1, 3)), today));
        assert!(!is_due_soon(Some(date(2025, 12, 29)), today));
        assert!(!is_due_soon(None, today));
    }

    #[test]
    fn test_priority_presentation() {
        assert_eq!(priority_label(Priority::High), "High");
        assert_eq!(priority_label(Priority::Medium), "Medium");
        assert_eq!(priority_label(Priority::Low), "Low");

        assert_eq!(priority_color(Priority::High), "#f44336");
        assert_eq!(priority_color(Priority::Medium), "#ff9800");
        assert_eq!(priority_color(Priority::Low), "#2196f3");
    }
}
