//! Study-plan calendar (ICS) export.
//!
//! For each selected course, every assignment with a parseable due date
//! becomes one study event spanning the 24 hours before the due instant.
//! Assignments with unparseable dates are skipped with a warning; processing
//! continues.

use crate::error::Result;
use crate::models::{parse_timestamp, Assignment, Course};
use chrono::{DateTime, Duration, Utc};
use std::path::Path;

/// Configuration for calendar export.
#[derive(Debug, Clone)]
pub struct IcsConfig {
    /// PRODID identifying the generator.
    pub prod_id: String,
    /// Domain suffix for event UIDs.
    pub uid_domain: String,
    /// Hours before the due instant that the study window opens.
    pub lead_time_hours: i64,
    /// Attach a display reminder firing at the start of the study window.
    pub alarm: bool,
}

impl Default for IcsConfig {
    fn default() -> Self {
        Self {
            prod_id: "-//studymark//Study Plan//EN".to_string(),
            uid_domain: "studymark.app".to_string(),
            lead_time_hours: 24,
            alarm: true,
        }
    }
}

/// Build the ICS payload for a study plan.
///
/// `generated_at` stamps each event's DTSTAMP; passing it in keeps the
/// output deterministic.
pub fn build_study_plan(
    courses: &[Course],
    assignments: &[Assignment],
    selected_course_ids: &[String],
    generated_at: DateTime<Utc>,
    config: &IcsConfig,
) -> String {
    let mut lines = Vec::new();

    lines.push("BEGIN:VCALENDAR".to_string());
    lines.push(format!("PRODID:{}", config.prod_id));
    lines.push("VERSION:2.0".to_string());
    lines.push("CALSCALE:GREGORIAN".to_string());
    lines.push("METHOD:PUBLISH".to_string());

    for course_id in selected_course_ids {
        let location = courses
            .iter()
            .find(|c| &c.id == course_id)
            .map(|c| c.name.as_str())
            .unwrap_or(course_id.as_str());

        for assignment in assignments.iter().filter(|a| &a.course_id == course_id) {
            let due = match assignment.due_at.as_deref().and_then(parse_timestamp) {
                Some(due) => due,
                None => {
                    tracing::warn!(
                        assignment = %assignment.name,
                        due_at = ?assignment.due_at,
                        "unparseable due date, skipping study event"
                    );
                    continue;
                }
            };

            let start = due - Duration::hours(config.lead_time_hours);
            let summary = format!("Study for {}", assignment.name);

            lines.push("BEGIN:VEVENT".to_string());
            lines.push(format!(
                "UID:{}@{}",
                escape_text(&assignment.id),
                config.uid_domain
            ));
            lines.push(format!("DTSTAMP:{}", format_utc(generated_at)));
            lines.push(format!("DTSTART:{}", format_utc(start)));
            lines.push(format!("DTEND:{}", format_utc(due)));
            lines.push(format!("SUMMARY:{}", escape_text(&summary)));
            lines.push(format!("LOCATION:{}", escape_text(location)));
            lines.push("STATUS:CONFIRMED".to_string());

            if config.alarm {
                lines.push("BEGIN:VALARM".to_string());
                lines.push(format!("TRIGGER:-PT{}H", config.lead_time_hours));
                lines.push("ACTION:DISPLAY".to_string());
                lines.push(format!("DESCRIPTION:{}", escape_text(&summary)));
                lines.push("END:VALARM".to_string());
            }

            lines.push("END:VEVENT".to_string());
        }
    }

    lines.push("END:VCALENDAR".to_string());

    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    out
}

/// Build the study plan and write it to a file.
pub fn write_study_plan(
    path: impl AsRef<Path>,
    courses: &[Course],
    assignments: &[Assignment],
    selected_course_ids: &[String],
    generated_at: DateTime<Utc>,
    config: &IcsConfig,
) -> Result<()> {
    let payload = build_study_plan(courses, assignments, selected_course_ids, generated_at, config);
    std::fs::write(path, payload)?;
    Ok(())
}

fn format_utc(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escape a text value per RFC 5545: backslash, semicolon, comma, newline.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn course() -> Course {
        Course {
            id: "101".into(),
            name: "Calculus I".into(),
            course_code: None,
            description: None,
            workflow_state: None,
        }
    }

    fn assignment(id: &str, due_at: Option<&str>) -> Assignment {
        Assignment {
            id: id.into(),
            course_id: "101".into(),
            name: format!("HW {}", id),
            description: None,
            due_at: due_at.map(String::from),
            points_possible: None,
            submission_types: vec![],
            workflow_state: None,
        }
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()
    }

    fn event_count(ics: &str) -> usize {
        ics.matches("BEGIN:VEVENT").count()
    }

    #[test]
    fn test_study_window_spans_24_hours() {
        let ics = build_study_plan(
            &[course()],
            &[assignment("1", Some("2025-10-01T23:59:59Z"))],
            &["101".to_string()],
            generated_at(),
            &IcsConfig::default(),
        );

        assert_eq!(event_count(&ics), 1);
        assert!(ics.contains("DTSTART:20250930T235959Z"));
        assert!(ics.contains("DTEND:20251001T235959Z"));
        assert!(ics.contains("SUMMARY:Study for HW 1"));
        assert!(ics.contains("LOCATION:Calculus I"));
    }

    #[test]
    fn test_unparseable_due_date_skips_without_aborting() {
        let ics = build_study_plan(
            &[course()],
            &[
                assignment("1", Some("whenever")),
                assignment("2", Some("2025-10-01T23:59:59Z")),
            ],
            &["101".to_string()],
            generated_at(),
            &IcsConfig::default(),
        );

        assert_eq!(event_count(&ics), 1);
        assert!(ics.contains("SUMMARY:Study for HW 2"));
    }

    #[test]
    fn test_missing_due_date_skipped() {
        let ics = build_study_plan(
            &[course()],
            &[assignment("1", None)],
            &["101".to_string()],
            generated_at(),
            &IcsConfig::default(),
        );

        assert_eq!(event_count(&ics), 0);
        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert!(ics.trim_end().ends_with("END:VCALENDAR"));
    }

    #[test]
    fn test_only_selected_courses_included() {
        let other = Assignment {
            course_id: "202".into(),
            ..assignment("9", Some("2025-10-01T23:59:59Z"))
        };
        let ics = build_study_plan(
            &[course()],
            &[assignment("1", Some("2025-10-01T23:59:59Z")), other],
            &["101".to_string()],
            generated_at(),
            &IcsConfig::default(),
        );

        assert_eq!(event_count(&ics), 1);
        assert!(!ics.contains("HW 9"));
    }

    #[test]
    fn test_text_escaping() {
        let mut a = assignment("1", Some("2025-10-01T23:59:59Z"));
        a.name = "Essay, part 1; draft".into();
        let ics = build_study_plan(
            &[course()],
            &[a],
            &["101".to_string()],
            generated_at(),
            &IcsConfig::default(),
        );

        assert!(ics.contains("SUMMARY:Study for Essay\\, part 1\\; draft"));
    }

    #[test]
    fn test_alarm_and_envelope() {
        let ics = build_study_plan(
            &[course()],
            &[assignment("1", Some("2025-10-01T23:59:59Z"))],
            &["101".to_string()],
            generated_at(),
            &IcsConfig::default(),
        );

        assert!(ics.contains("PRODID:-//studymark//Study Plan//EN"));
        assert!(ics.contains("METHOD:PUBLISH"));
        assert!(ics.contains("TRIGGER:-PT24H"));
        assert!(ics.contains("UID:1@studymark.app"));
        assert!(ics.contains("DTSTAMP:20250901T120000Z"));
        assert!(ics.contains("\r\n"));
    }

    #[test]
    fn test_crlf_line_endings_throughout() {
        let ics = build_study_plan(
            &[course()],
            &[assignment("1", Some("2025-10-01T23:59:59Z"))],
            &["101".to_string()],
            generated_at(),
            &IcsConfig::default(),
        );

        for line in ics.split("\r\n").filter(|l| !l.is_empty()) {
            assert!(!line.contains('\n'), "bare newline in line: {line:?}");
        }
    }
}
