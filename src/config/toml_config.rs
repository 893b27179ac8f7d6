use crate::core::controller::DEFAULT_DATE_FORMAT;
use crate::core::notification::NotificationTimings;
use crate::domain::model::GradeRules;
use crate::utils::error::{BoletinError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// `grades.max_grades` 的上限
pub const MAX_GRADES_LIMIT: usize = 1000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoletinConfig {
    pub grades: GradesConfig,
    pub notifications: NotificationsConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradesConfig {
    pub min_grade: f64,
    pub max_grade: f64,
    pub passing_grade: f64,
    pub max_grades: usize,
    /// 啟動時載入的成績
    pub initial: Vec<f64>,
}

impl Default for GradesConfig {
    fn default() -> Self {
        let rules = GradeRules::default();
        Self {
            min_grade: rules.min_grade,
            max_grade: rules.max_grade,
            passing_grade: rules.passing_grade,
            max_grades: rules.max_grades,
            initial: vec![7.0, 4.0, 8.0, 9.0, 6.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    pub entry_delay_ms: u64,
    pub display_ms: u64,
    pub exit_ms: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        let timings = NotificationTimings::default();
        Self {
            entry_delay_ms: timings.entry_delay.as_millis() as u64,
            display_ms: timings.display_duration.as_millis() as u64,
            exit_ms: timings.exit_duration.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// strftime 格式，月份以西班牙文顯示
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl BoletinConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed)?)
    }

    /// 替換環境變數 (例如 ${PASSING_GRADE})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BoletinError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });
        Ok(result.into_owned())
    }

    pub fn rules(&self) -> GradeRules {
        GradeRules {
            min_grade: self.grades.min_grade,
            max_grade: self.grades.max_grade,
            passing_grade: self.grades.passing_grade,
            max_grades: self.grades.max_grades,
        }
    }

    pub fn timings(&self) -> NotificationTimings {
        NotificationTimings {
            entry_delay: Duration::from_millis(self.notifications.entry_delay_ms),
            display_duration: Duration::from_millis(self.notifications.display_ms),
            exit_duration: Duration::from_millis(self.notifications.exit_ms),
        }
    }
}

impl Validate for BoletinConfig {
    fn validate(&self) -> Result<()> {
        let grades = &self.grades;
        validation::validate_finite("grades.min_grade", grades.min_grade)?;
        validation::validate_finite("grades.max_grade", grades.max_grade)?;
        validation::validate_ordered(
            "grades.min_grade",
            grades.min_grade,
            "grades.max_grade",
            grades.max_grade,
        )?;
        validation::validate_finite("grades.passing_grade", grades.passing_grade)?;
        validation::validate_range(
            "grades.passing_grade",
            grades.passing_grade,
            grades.min_grade,
            grades.max_grade,
        )?;
        validation::validate_range("grades.max_grades", grades.max_grades, 1, MAX_GRADES_LIMIT)?;

        if grades.initial.len() > grades.max_grades {
            return Err(BoletinError::InvalidConfigValueError {
                field: "grades.initial".to_string(),
                value: grades.initial.len().to_string(),
                reason: format!("At most {} grades are allowed", grades.max_grades),
            });
        }
        for value in &grades.initial {
            validation::validate_range("grades.initial", *value, grades.min_grade, grades.max_grade)?;
        }

        validation::validate_date_format("display.date_format", &self.display.date_format)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = BoletinConfig::from_toml_str("").unwrap();
        assert_eq!(config, BoletinConfig::default());
        assert_eq!(config.rules(), GradeRules::default());
        assert_eq!(config.timings(), NotificationTimings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[grades]
passing_grade = 6
max_grades = 5
initial = [7, 8.5]

[notifications]
display_ms = 1500
"#;

        let config = BoletinConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.grades.passing_grade, 6.0);
        assert_eq!(config.grades.max_grade, 10.0);
        assert_eq!(config.grades.initial, vec![7.0, 8.5]);
        assert_eq!(config.timings().display_duration, Duration::from_millis(1500));
        assert_eq!(config.timings().entry_delay, Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BOLETIN_TEST_PASSING", "5");

        let toml_content = r#"
[grades]
passing_grade = ${BOLETIN_TEST_PASSING}
"#;

        let config = BoletinConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.grades.passing_grade, 5.0);

        std::env::remove_var("BOLETIN_TEST_PASSING");
    }

    #[test]
    fn test_config_validation() {
        let bad_passing = BoletinConfig::from_toml_str("[grades]\npassing_grade = 12\n").unwrap();
        assert!(bad_passing.validate().is_err());

        let inverted = BoletinConfig::from_toml_str("[grades]\nmin_grade = 10\nmax_grade = 1\n").unwrap();
        assert!(inverted.validate().is_err());

        let too_many = BoletinConfig::from_toml_str("[grades]\nmax_grades = 2\n").unwrap();
        assert!(too_many.validate().is_err());

        let out_of_range = BoletinConfig::from_toml_str("[grades]\ninitial = [0.5]\n").unwrap();
        assert!(out_of_range.validate().is_err());

        let bad_format = BoletinConfig::from_toml_str("[display]\ndate_format = \"%Y-%\"\n").unwrap();
        assert!(bad_format.validate().is_err());
    }

    #[test]
    fn test_nan_passing_grade_is_rejected() {
        let config = BoletinConfig::from_toml_str("[grades]\npassing_grade = nan\n").unwrap();
        assert!(config.grades.passing_grade.is_nan());
        assert!(matches!(
            config.validate(),
            Err(BoletinError::InvalidConfigValueError { ref field, .. }) if field == "grades.passing_grade"
        ));
    }

    #[test]
    fn test_max_grades_upper_bound() {
        let huge = BoletinConfig::from_toml_str("[grades]\nmax_grades = 9223372036854775807\n").unwrap();
        assert!(huge.validate().is_err());

        let zero = BoletinConfig::from_toml_str("[grades]\nmax_grades = 0\ninitial = []\n").unwrap();
        assert!(zero.validate().is_err());

        let limit = format!("[grades]\nmax_grades = {}\n", MAX_GRADES_LIMIT);
        assert!(BoletinConfig::from_toml_str(&limit).unwrap().validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let result = BoletinConfig::from_toml_str("[grades\n");
        assert!(matches!(result, Err(BoletinError::ConfigParseError(_))));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[display]\ndate_format = \"%d/%m/%Y\"\n")
            .unwrap();

        let config = BoletinConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.display.date_format, "%d/%m/%Y");
    }
}
