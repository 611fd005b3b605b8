//! Markdown report tables built from backend records.
//!
//! The output is ordinary pipe-table Markdown, so it feeds the same parse
//! and render pipeline as any other content.

use crate::models::{parse_timestamp, Assignment, Grade};

/// Build a Markdown table summarizing assignments.
pub fn assignment_table(assignments: &[Assignment]) -> String {
    if assignments.is_empty() {
        return "No assignments found.".to_string();
    }

    let mut lines = Vec::new();
    lines.push("| Assignment | Due Date | Points | Status |".to_string());
    lines.push("| --- | --- | --- | --- |".to_string());

    for assignment in assignments {
        let due = assignment
            .due_at
            .as_deref()
            .map(short_date)
            .unwrap_or_else(|| "No due date".to_string());
        let points = assignment
            .points_possible
            .map(|p| p.to_string())
            .unwrap_or_else(|| "0".to_string());
        let status = assignment.workflow_state.as_deref().unwrap_or("Unknown");

        lines.push(format!(
            "| {} | {} | {} | {} |",
            assignment.name, due, points, status
        ));
    }

    lines.join("\n")
}

/// Build a Markdown table summarizing grades, with a computed percentage.
pub fn grade_table(grades: &[Grade]) -> String {
    if grades.is_empty() {
        return "No grades available.".to_string();
    }

    let mut lines = Vec::new();
    lines.push("| Assignment | Score | Points Possible | Percentage | Grade |".to_string());
    lines.push("| --- | --- | --- | --- | --- |".to_string());

    for grade in grades {
        let score = grade.score.unwrap_or(0.0);
        let possible = grade.points_possible.unwrap_or(0.0);
        let percentage = if possible > 0.0 {
            format!("{:.1}%", score / possible * 100.0)
        } else {
            "N/A".to_string()
        };
        let letter = grade.grade.as_deref().unwrap_or("N/A");

        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            grade.assignment_name, score, possible, percentage, letter
        ));
    }

    lines.join("\n")
}

/// Shorten a wire timestamp to `YYYY-MM-DD`, leaving it as-is if unparseable.
fn short_date(due_at: &str) -> String {
    match parse_timestamp(due_at) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => due_at.to_string(),
    }
}
