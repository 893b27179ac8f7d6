use crate::domain::model::{Grade, GradeRules};
use crate::utils::error::{BoletinError, Result};

/// Owns the ordered grade list. Every mutation is validated and atomic.
#[derive(Debug, Clone)]
pub struct GradeStore {
    rules: GradeRules,
    grades: Vec<Grade>,
}

impl GradeStore {
    pub fn new(rules: GradeRules) -> Self {
        Self {
            rules,
            grades: Vec::new(),
        }
    }

    /// Builds a store pre-filled with `values`, applying the same rules as [`GradeStore::push`].
    pub fn with_grades(rules: GradeRules, values: &[f64]) -> Result<Self> {
        let mut store = Self::new(rules);
        for &value in values {
            store.push(value)?;
        }
        Ok(store)
    }

    /// Parses raw user input and appends it.
    pub fn add(&mut self, raw_input: &str) -> Result<Grade> {
        let value = parse_grade(raw_input)?;
        self.push(value)
    }

    pub fn push(&mut self, value: f64) -> Result<Grade> {
        if self.is_full() {
            return Err(BoletinError::CapacityError {
                max: self.rules.max_grades,
            });
        }
        if !value.is_finite() {
            return Err(BoletinError::ValidationError {
                input: value.to_string(),
            });
        }
        if value < self.rules.min_grade || value > self.rules.max_grade {
            return Err(BoletinError::RangeError {
                value,
                min: self.rules.min_grade,
                max: self.rules.max_grade,
            });
        }

        let grade = Grade::rounded(value);
        self.grades.push(grade);
        tracing::debug!(grade = %grade, count = self.grades.len(), "grade stored");
        Ok(grade)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Grade> {
        if index >= self.grades.len() {
            return Err(BoletinError::IndexError {
                index,
                len: self.grades.len(),
            });
        }
        let removed = self.grades.remove(index);
        tracing::debug!(grade = %removed, index, "grade removed");
        Ok(removed)
    }

    pub fn all(&self) -> &[Grade] {
        &self.grades
    }

    pub fn count(&self) -> usize {
        self.grades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.grades.len() >= self.rules.max_grades
    }

    pub fn rules(&self) -> &GradeRules {
        &self.rules
    }
}

fn parse_grade(raw_input: &str) -> Result<f64> {
    let trimmed = raw_input.trim();
    match trimmed.parse::<f64>() {
        // "NaN" 與 "inf" 可以解析，但不是成績
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(BoletinError::ValidationError {
            input: raw_input.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> GradeStore {
        GradeStore::new(GradeRules::default())
    }

    #[test]
    fn test_add_valid_grades() {
        let mut store = store();
        for (input, expected) in [("1", 1.0), ("10", 10.0), (" 7.5 ", 7.5), ("8.26", 8.3)] {
            let before = store.count();
            let grade = store.add(input).unwrap();
            assert_eq!(grade.value(), expected);
            assert_eq!(store.count(), before + 1);
            assert_eq!(store.all().last(), Some(&grade));
        }
    }

    #[test]
    fn test_add_rejects_out_of_range() {
        let mut store = store();
        assert!(matches!(store.add("0.9"), Err(BoletinError::RangeError { .. })));
        assert!(matches!(store.add("10.1"), Err(BoletinError::RangeError { .. })));
        assert!(matches!(store.add("-3"), Err(BoletinError::RangeError { .. })));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_add_rejects_non_numeric() {
        let mut store = store();
        for input in ["abc", "", "   ", "NaN", "inf", "7,5"] {
            assert!(
                matches!(store.add(input), Err(BoletinError::ValidationError { .. })),
                "input {:?} should be rejected",
                input
            );
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_rejects_when_full() {
        let mut store = store();
        for _ in 0..10 {
            store.add("5").unwrap();
        }
        assert!(store.is_full());
        assert!(matches!(
            store.add("5"),
            Err(BoletinError::CapacityError { max: 10 })
        ));
        assert_eq!(store.count(), 10);
    }

    #[test]
    fn test_new_does_not_reserve_max_grades() {
        let rules = GradeRules {
            max_grades: usize::MAX,
            ..GradeRules::default()
        };
        let mut store = GradeStore::new(rules);
        assert!(!store.is_full());
        assert_eq!(store.add("7").unwrap().value(), 7.0);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_remove_at() {
        let mut store = GradeStore::with_grades(GradeRules::default(), &[7.0, 4.0, 8.0]).unwrap();
        let removed = store.remove_at(1).unwrap();
        assert_eq!(removed.value(), 4.0);
        let values: Vec<f64> = store.all().iter().map(|g| g.value()).collect();
        assert_eq!(values, vec![7.0, 8.0]);
    }

    #[test]
    fn test_remove_out_of_bounds_leaves_list_unchanged() {
        let mut store = GradeStore::with_grades(GradeRules::default(), &[7.0, 4.0]).unwrap();
        assert!(matches!(
            store.remove_at(2),
            Err(BoletinError::IndexError { index: 2, len: 2 })
        ));
        assert!(store.remove_at(usize::MAX).is_err());
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_with_grades_validates_seed() {
        let result = GradeStore::with_grades(GradeRules::default(), &[7.0, 11.0]);
        assert!(matches!(result, Err(BoletinError::RangeError { .. })));
    }
}
