pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::BoletinConfig;
pub use crate::core::{
    controller::BoletinController,
    grade_store::GradeStore,
    notification::{NotificationService, NotificationTimings},
};
pub use domain::model::{ExportData, Grade, GradeRules, Severity, StatField, StudentSession};
pub use utils::error::{BoletinError, Result};
