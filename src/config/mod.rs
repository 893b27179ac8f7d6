pub mod toml_config;

pub use toml_config::BoletinConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "boletin")]
#[command(about = "Interactive student grade tracker")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Grades to start with, overriding the configuration file
    #[arg(long, value_delimiter = ',')]
    pub grades: Option<Vec<f64>>,

    /// Start with an empty grade list
    #[arg(long, conflicts_with = "grades")]
    pub empty: bool,

    /// Override the passing grade
    #[arg(long)]
    pub passing_grade: Option<f64>,

    /// Override the maximum number of grades
    #[arg(long)]
    pub max_grades: Option<usize>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the configuration file (or defaults), applies flag overrides and validates.
    pub fn resolve(&self) -> Result<BoletinConfig> {
        let mut config = match &self.config {
            Some(path) => BoletinConfig::from_file(path)?,
            None => BoletinConfig::default(),
        };

        if let Some(grades) = &self.grades {
            config.grades.initial = grades.clone();
        }
        if self.empty {
            config.grades.initial.clear();
        }
        if let Some(passing) = self.passing_grade {
            config.grades.passing_grade = passing;
        }
        if let Some(max) = self.max_grades {
            config.grades.max_grades = max;
        }

        config.validate()?;
        Ok(config)
    }
}
