use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single grade, already validated against [`GradeRules`] and rounded to one
/// decimal place.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Grade(f64);

impl Grade {
    /// Rounds `value` to one decimal. Range checks live in the grade store.
    pub(crate) fn rounded(value: f64) -> Self {
        Self((value * 10.0).round() / 10.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn category(self) -> GradeCategory {
        GradeCategory::of(self.0)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual quality band used when rendering a grade.
///
/// The bands are fixed and do not follow the configured passing grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeCategory {
    Excellent,
    Good,
    Regular,
    Poor,
}

impl GradeCategory {
    pub fn of(value: f64) -> Self {
        match value {
            v if v >= 8.0 => GradeCategory::Excellent,
            v if v >= 6.0 => GradeCategory::Good,
            v if v >= 4.0 => GradeCategory::Regular,
            _ => GradeCategory::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GradeCategory::Excellent => "excellent",
            GradeCategory::Good => "good",
            GradeCategory::Regular => "regular",
            GradeCategory::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeRules {
    pub min_grade: f64,
    pub max_grade: f64,
    pub passing_grade: f64,
    pub max_grades: usize,
}

impl Default for GradeRules {
    fn default() -> Self {
        Self {
            min_grade: 1.0,
            max_grade: 10.0,
            passing_grade: 4.0,
            max_grades: 10,
        }
    }
}

/// Identifier of the running student session. Generated once, never changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StudentSession(String);

impl StudentSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    pub count: usize,
    pub average: f64,
    pub highest: Grade,
    pub lowest: Grade,
    pub failure_count: usize,
    pub passing_count: usize,
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Created,
    Visible,
    Dismissed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
    pub phase: NotificationPhase,
}

/// Statistic fields the view must expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    Average,
    Highest,
    HasFailures,
}

impl StatField {
    pub const ALL: [StatField; 3] = [StatField::Average, StatField::Highest, StatField::HasFailures];

    pub fn name(self) -> &'static str {
        match self {
            StatField::Average => "average",
            StatField::Highest => "highest",
            StatField::HasFailures => "hasFailures",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub student_id: StudentSession,
    pub grades: Vec<Grade>,
    pub statistics: Option<StatisticsSnapshot>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_rounds_to_one_decimal() {
        assert_eq!(Grade::rounded(7.25).value(), 7.3);
        assert_eq!(Grade::rounded(8.04).value(), 8.0);
        assert_eq!(Grade::rounded(9.0).to_string(), "9");
        assert_eq!(Grade::rounded(6.56).to_string(), "6.6");
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(GradeCategory::of(10.0), GradeCategory::Excellent);
        assert_eq!(GradeCategory::of(8.0), GradeCategory::Excellent);
        assert_eq!(GradeCategory::of(7.9), GradeCategory::Good);
        assert_eq!(GradeCategory::of(6.0), GradeCategory::Good);
        assert_eq!(GradeCategory::of(5.9), GradeCategory::Regular);
        assert_eq!(GradeCategory::of(4.0), GradeCategory::Regular);
        assert_eq!(GradeCategory::of(3.9), GradeCategory::Poor);
        assert_eq!(GradeCategory::of(1.0), GradeCategory::Poor);
    }

    #[test]
    fn test_export_serializes_camel_case() {
        let export = ExportData {
            student_id: StudentSession::new("STU-1-ABCDE"),
            grades: vec![Grade::rounded(7.0)],
            statistics: None,
            timestamp: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
        };
        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["studentId"], "STU-1-ABCDE");
        assert_eq!(json["grades"][0], 7.0);
        assert!(json["statistics"].is_null());
    }
}
