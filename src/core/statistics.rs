//! Pure reductions over a grade list.
//!
//! None of these functions mutate their input or hold state; callers recompute
//! whenever they need a fresh value.

use crate::domain::model::{Grade, StatisticsSnapshot};
use crate::utils::error::{BoletinError, Result};

pub fn average(grades: &[Grade]) -> Result<f64> {
    if grades.is_empty() {
        return Err(BoletinError::EmptyInputError {
            operation: "average",
        });
    }
    let sum: f64 = grades.iter().map(|g| g.value()).sum();
    Ok(sum / grades.len() as f64)
}

pub fn highest(grades: &[Grade]) -> Result<Grade> {
    extreme(grades, "highest grade", |candidate, best| candidate > best)
}

pub fn lowest(grades: &[Grade]) -> Result<Grade> {
    extreme(grades, "lowest grade", |candidate, best| candidate < best)
}

fn extreme(
    grades: &[Grade],
    operation: &'static str,
    better: impl Fn(f64, f64) -> bool,
) -> Result<Grade> {
    let (first, rest) = grades
        .split_first()
        .ok_or(BoletinError::EmptyInputError { operation })?;
    Ok(rest.iter().fold(*first, |best, &g| {
        if better(g.value(), best.value()) {
            g
        } else {
            best
        }
    }))
}

/// Grades strictly below `passing_grade`.
pub fn failures(grades: &[Grade], passing_grade: f64) -> usize {
    grades.iter().filter(|g| g.value() < passing_grade).count()
}

pub fn passing(grades: &[Grade], passing_grade: f64) -> usize {
    grades.iter().filter(|g| g.value() >= passing_grade).count()
}

/// Bundles every statistic. `None` means there is no data yet, which is not an error.
pub fn snapshot(grades: &[Grade], passing_grade: f64) -> Option<StatisticsSnapshot> {
    Some(StatisticsSnapshot {
        count: grades.len(),
        average: average(grades).ok()?,
        highest: highest(grades).ok()?,
        lowest: lowest(grades).ok()?,
        failure_count: failures(grades, passing_grade),
        passing_count: passing(grades, passing_grade),
    })
}

/// Display form of an average: two decimals. Stored precision is untouched.
pub fn format_average(average: f64) -> String {
    format!("{:.2}", average)
}
