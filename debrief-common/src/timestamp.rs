//! Zoned timestamp normalization
//!
//! The backend only accepts fully qualified zoned timestamps
//! (`YYYY-MM-DDTHH:MM:SS[.fraction](Z|±HH:MM)`), while browser date pickers
//! routinely drop the seconds, the zone, or both. Four shapes are repaired:
//!
//! | Input                     | Output                       |
//! |---------------------------|------------------------------|
//! | `2024-01-01T10:00:30Z`    | unchanged                    |
//! | `2024-01-01T10:00+02:00`  | `2024-01-01T10:00:00+02:00`  |
//! | `2024-01-01T10:00:30.5`   | `2024-01-01T10:00:30.5Z`     |
//! | `2024-01-01T10:00`        | `2024-01-01T10:00:00Z`       |
//!
//! Anything else passes through untouched. This is leniency, not validation:
//! the backend gets the final say on malformed dates.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{DebriefInput, Task};

static COMPLETE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(Z|[+-][0-9]{2}:[0-9]{2})$")
        .expect("valid regex")
});

static MISSING_SECONDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2})(Z|[+-][0-9]{2}:[0-9]{2})$")
        .expect("valid regex")
});

static MISSING_ZONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?$")
        .expect("valid regex")
});

static MISSING_BOTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}$").expect("valid regex")
});

/// Canonicalize a partial zoned timestamp
///
/// Idempotent: every output shape is a fixed point of the first rule.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() || COMPLETE.is_match(raw) {
        return raw.to_string();
    }

    if MISSING_SECONDS.is_match(raw) {
        return MISSING_SECONDS.replace(raw, "${1}:00${2}").into_owned();
    }

    if MISSING_ZONE.is_match(raw) {
        return format!("{}Z", raw);
    }

    if MISSING_BOTH.is_match(raw) {
        return format!("{}:00Z", raw);
    }

    raw.to_string()
}

/// Normalize an optional timestamp field in place (absent stays absent)
pub fn normalize_opt(field: &mut Option<String>) {
    if let Some(value) = field.as_mut() {
        *value = normalize(value);
    }
}

/// Normalize `startDate` and `deadline` of one task
pub fn format_task_dates(task: &mut Task) {
    normalize_opt(&mut task.start_date);
    normalize_opt(&mut task.deadline);
}

/// Normalize every timestamp in a record
///
/// Covers the record date, top-level tasks, and tasks nested in lessons.
pub fn format_record_dates(record: &mut DebriefInput) {
    normalize_opt(&mut record.date);

    for task in record.tasks.iter_mut().flatten() {
        format_task_dates(task);
    }

    for lesson in record.lessons.iter_mut().flatten() {
        for task in &mut lesson.tasks {
            format_task_dates(task);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Lesson;

    #[test]
    fn test_complete_timestamp_unchanged() {
        assert_eq!(normalize("2024-01-01T10:00:30Z"), "2024-01-01T10:00:30Z");
        assert_eq!(normalize("2024-01-01T10:00:30.123+05:30"), "2024-01-01T10:00:30.123+05:30");
    }

    #[test]
    fn test_missing_seconds_spliced_before_offset() {
        assert_eq!(normalize("2024-01-01T10:00Z"), "2024-01-01T10:00:00Z");
        assert_eq!(normalize("2024-01-01T10:00-04:00"), "2024-01-01T10:00:00-04:00");
    }

    #[test]
    fn test_missing_zone_gets_utc() {
        assert_eq!(normalize("2024-01-01T10:00:30"), "2024-01-01T10:00:30Z");
        assert_eq!(normalize("2024-01-01T10:00:30.5"), "2024-01-01T10:00:30.5Z");
    }

    #[test]
    fn test_missing_both() {
        assert_eq!(normalize("2024-01-01T10:00"), "2024-01-01T10:00:00Z");
    }

    #[test]
    fn test_unrecognized_passthrough() {
        assert_eq!(normalize("not-a-date"), "not-a-date");
        assert_eq!(normalize("2024-01-01"), "2024-01-01");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_non_ascii_digits_passthrough() {
        assert_eq!(normalize("٢٠٢٤-01-01T10:00"), "٢٠٢٤-01-01T10:00");
        assert_eq!(normalize("2024-01-01T１０:00:30"), "2024-01-01T１０:00:30");
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "2024-01-01T10:00:30Z",
            "2024-01-01T10:00+02:00",
            "2024-01-01T10:00:30.25",
            "2024-01-01T10:00",
            "garbage",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {}", raw);
        }
    }

    #[test]
    fn test_format_record_dates_reaches_nested_tasks() {
        let task = Task {
            start_date: Some("2024-02-01T09:00".to_string()),
            deadline: Some("2024-02-02T17:30:00".to_string()),
            ..Default::default()
        };
        let mut record = DebriefInput {
            date: Some("2024-01-01T10:00".to_string()),
            tasks: Some(vec![task.clone()]),
            lessons: Some(vec![Lesson {
                tasks: vec![task],
                ..Default::default()
            }]),
            ..Default::default()
        };

        format_record_dates(&mut record);

        assert_eq!(record.date.as_deref(), Some("2024-01-01T10:00:00Z"));
        let nested = &record.lessons()[0].tasks[0];
        assert_eq!(nested.start_date.as_deref(), Some("2024-02-01T09:00:00Z"));
        assert_eq!(nested.deadline.as_deref(), Some("2024-02-02T17:30:00Z"));
        assert_eq!(record.tasks()[0].start_date.as_deref(), Some("2024-02-01T09:00:00Z"));
    }

    #[test]
    fn test_format_record_dates_absent_fields() {
        let mut record = DebriefInput::default();
        format_record_dates(&mut record);
        assert!(record.date.is_none());
    }
}
