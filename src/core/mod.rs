pub mod controller;
pub mod grade_store;
pub mod identity;
pub mod notification;
pub mod statistics;

pub use crate::domain::model::{Grade, GradeRules, Severity, StatisticsSnapshot};
pub use crate::domain::ports::{Confirmation, Notifier, TextInput, View};
pub use crate::utils::error::Result;
