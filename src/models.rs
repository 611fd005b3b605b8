//! Records decoded from the backend's JSON payloads.
//!
//! The wire contract wraps arrays in an object keyed by the resource-plural
//! name (or a singular key for one object). Decoding returns a discriminated
//! result so callers can tell an empty listing from a failed one. No
//! cross-entity referential integrity is enforced: an assignment's course id
//! is not validated against the loaded course set.

use crate::error::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course the user is enrolled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub workflow_state: Option<String>,
}

/// An assignment within a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub course_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Due date as received on the wire; parsed only when needed.
    #[serde(default)]
    pub due_at: Option<String>,
    #[serde(default)]
    pub points_possible: Option<f64>,
    #[serde(default)]
    pub submission_types: Vec<String>,
    #[serde(default)]
    pub workflow_state: Option<String>,
}

impl Assignment {
    /// The parsed due instant, if the wire string matches a known pattern.
    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_at.as_deref().and_then(parse_timestamp)
    }
}

/// A file stored in a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseFile {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub folder_id: Option<String>,
}

/// A folder within a course's file tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_folder_id: Option<String>,
    #[serde(default)]
    pub files_count: Option<u32>,
}

/// A reminder attached to an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub remind_at: Option<String>,
    #[serde(default)]
    pub assignment_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// The signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A graded submission summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub assignment_name: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub points_possible: Option<f64>,
    #[serde(default)]
    pub grade: Option<String>,
}

#[derive(Deserialize)]
struct CoursesEnvelope {
    courses: Vec<Course>,
}

#[derive(Deserialize)]
struct AssignmentsEnvelope {
    assignments: Vec<Assignment>,
}

#[derive(Deserialize)]
struct FilesEnvelope {
    files: Vec<CourseFile>,
}

#[derive(Deserialize)]
struct FoldersEnvelope {
    folders: Vec<Folder>,
}

#[derive(Deserialize)]
struct RemindersEnvelope {
    reminders: Vec<Reminder>,
}

#[derive(Deserialize)]
struct GradesEnvelope {
    grades: Vec<Grade>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: UserProfile,
}

/// Decode a `{"courses": [...]}` payload.
pub fn decode_courses(json: &str) -> Result<Vec<Course>> {
    Ok(serde_json::from_str::<CoursesEnvelope>(json)?.courses)
}

/// Decode an `{"assignments": [...]}` payload.
pub fn decode_assignments(json: &str) -> Result<Vec<Assignment>> {
    Ok(serde_json::from_str::<AssignmentsEnvelope>(json)?.assignments)
}

/// Decode a `{"files": [...]}` payload.
pub fn decode_files(json: &str) -> Result<Vec<CourseFile>> {
    Ok(serde_json::from_str::<FilesEnvelope>(json)?.files)
}

/// Decode a `{"folders": [...]}` payload.
pub fn decode_folders(json: &str) -> Result<Vec<Folder>> {
    Ok(serde_json::from_str::<FoldersEnvelope>(json)?.folders)
}

/// Decode a `{"reminders": [...]}` payload.
pub fn decode_reminders(json: &str) -> Result<Vec<Reminder>> {
    Ok(serde_json::from_str::<RemindersEnvelope>(json)?.reminders)
}

/// Decode a `{"grades": [...]}` payload.
pub fn decode_grades(json: &str) -> Result<Vec<Grade>> {
    Ok(serde_json::from_str::<GradesEnvelope>(json)?.grades)
}

/// Decode a `{"user": {...}}` payload.
pub fn decode_user(json: &str) -> Result<UserProfile> {
    Ok(serde_json::from_str::<UserEnvelope>(json)?.user)
}

/// Parse a wire timestamp, trying a fixed ordered list of patterns.
///
/// Returns `None` when every pattern fails; callers decide whether that
/// means skip, warn, or error.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_courses() {
        let json = r#"{"courses": [{"id": "101", "name": "Calculus I", "course_code": "MATH 101"}]}"#;
        let courses = decode_courses(json).unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name, "Calculus I");
        assert_eq!(courses[0].description, None);
    }

    #[test]
    fn test_decode_assignments_missing_fields() {
        let json = r#"{"assignments": [{"id": "5", "course_id": "101", "name": "HW 1"}]}"#;
        let assignments = decode_assignments(json).unwrap();
        assert_eq!(assignments[0].due_at, None);
        assert!(assignments[0].submission_types.is_empty());
    }

    #[test]
    fn test_decode_failure_is_distinguishable() {
        // A failed decode is an error, not an empty list.
        assert!(decode_courses("not json").is_err());
        assert_eq!(decode_courses(r#"{"courses": []}"#).unwrap(), vec![]);
    }

    #[test]
    fn test_decode_user() {
        let json = r#"{"user": {"id": "9", "name": "Ada", "email": "ada@example.edu"}}"#;
        let user = decode_user(json).unwrap();
        assert_eq!(user.name, "Ada");
    }

    #[test]
    fn test_parse_timestamp_patterns() {
        let expected = Utc.with_ymd_and_hms(2025, 10, 1, 23, 59, 59).unwrap();
        assert_eq!(parse_timestamp("2025-10-01T23:59:59Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-10-01T23:59:59"), Some(expected));
        assert_eq!(parse_timestamp("2025-10-01 23:59:59"), Some(expected));

        let midnight = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-10-01"), Some(midnight));

        assert_eq!(parse_timestamp("next Tuesday"), None);
    }

    #[test]
    fn test_assignment_due_date() {
        let assignment = Assignment {
            id: "1".into(),
            course_id: "101".into(),
            name: "HW".into(),
            description: None,
            due_at: Some("2025-10-01T23:59:59Z".into()),
            points_possible: Some(10.0),
            submission_types: vec![],
            workflow_state: None,
        };
        assert!(assignment.due_date().is_some());
    }
}
