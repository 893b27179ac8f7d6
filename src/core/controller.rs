use crate::core::grade_store::GradeStore;
use crate::core::{identity, statistics};
use crate::domain::model::{ExportData, Severity, StatField, StudentSession};
use crate::domain::ports::{Confirmation, Notifier, TextInput, View};
use crate::utils::error::{BoletinError, Result};
use chrono::{Local, Locale, Utc};
use std::fmt::Write;

pub const DEFAULT_DATE_FORMAT: &str = "%-d de %B de %Y";

/// Turns user actions into store mutations, statistics, view updates and
/// notifications. Handlers never return errors: every failure becomes a
/// notification.
pub struct BoletinController<V: View, N: Notifier> {
    store: GradeStore,
    session: StudentSession,
    view: V,
    notifier: N,
    date_format: String,
}

impl<V: View, N: Notifier> BoletinController<V, N> {
    pub fn new(store: GradeStore, view: V, notifier: N) -> Self {
        Self::with_session(store, view, notifier, identity::generate())
    }

    pub fn with_session(store: GradeStore, view: V, notifier: N, session: StudentSession) -> Self {
        Self {
            store,
            session,
            view,
            notifier,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    /// Checks the view and draws the initial screen. A view missing a statistic
    /// field is a configuration error.
    pub fn start(&mut self) -> Result<()> {
        let missing: Vec<&str> = StatField::ALL
            .iter()
            .filter(|field| !self.view.has_field(**field))
            .map(|field| field.name())
            .collect();
        if !missing.is_empty() {
            return Err(BoletinError::ConfigError {
                message: format!("view does not expose fields: {}", missing.join(", ")),
            });
        }

        let mut date = String::new();
        write!(
            date,
            "{}",
            Local::now().format_localized(&self.date_format, Locale::es_ES)
        )
        .map_err(|_| BoletinError::ConfigError {
            message: format!("invalid date format '{}'", self.date_format),
        })?;

        self.view.display_student_id(&self.session);
        self.view.display_current_date(&date);
        self.view.render_grades(self.store.all());
        self.view.clear_fields();

        tracing::info!(student_id = %self.session, grades = self.store.count(), "boletin started");
        Ok(())
    }

    pub fn on_add_grade(&mut self, raw_input: &str) {
        tracing::debug!(input = raw_input, "adding grade");
        match self.store.add(raw_input) {
            Ok(grade) => {
                self.refresh_after_mutation();
                self.notifier
                    .show(&format!("Grade {} added", grade), Severity::Success);
            }
            Err(e) => self.report(e),
        }
    }

    /// Interactive variant: warns without prompting when the list is full, and
    /// treats a cancelled prompt as a no-op.
    pub fn on_add_grade_prompt(&mut self, input: &mut dyn TextInput) {
        if self.store.is_full() {
            self.report(BoletinError::CapacityError {
                max: self.store.rules().max_grades,
            });
            return;
        }

        let rules = self.store.rules();
        let prompt = format!(
            "Enter a new grade ({}-{}):",
            rules.min_grade, rules.max_grade
        );
        match input.read_text(&prompt) {
            Some(raw) => self.on_add_grade(&raw),
            None => tracing::debug!("grade entry cancelled"),
        }
    }

    pub fn on_remove_grade(&mut self, index: usize, confirmation: &mut dyn Confirmation) {
        if !confirmation.confirm("Are you sure you want to remove this grade?") {
            tracing::debug!(index, "removal declined");
            return;
        }

        match self.store.remove_at(index) {
            Ok(grade) => {
                self.refresh_after_mutation();
                self.notifier
                    .show(&format!("Grade {} removed", grade), Severity::Success);
            }
            Err(e) => self.report(e),
        }
    }

    pub fn on_calculate_average(&mut self) {
        if self.warn_if_empty("No grades to calculate the average") {
            return;
        }
        match statistics::average(self.store.all()) {
            Ok(average) => {
                let shown = statistics::format_average(average);
                self.view.set_field(StatField::Average, &shown);
                self.notifier
                    .show(&format!("Average calculated: {}", shown), Severity::Success);
            }
            Err(e) => self.report(e),
        }
    }

    pub fn on_find_highest(&mut self) {
        if self.warn_if_empty("No grades to analyze") {
            return;
        }
        match statistics::highest(self.store.all()) {
            Ok(highest) => {
                self.view
                    .set_field(StatField::Highest, &highest.to_string());
                self.notifier
                    .show(&format!("Highest grade found: {}", highest), Severity::Success);
            }
            Err(e) => self.report(e),
        }
    }

    pub fn on_check_failures(&mut self) {
        if self.warn_if_empty("No grades to check") {
            return;
        }
        let failures = statistics::failures(self.store.all(), self.store.rules().passing_grade);
        let (shown, message) = if failures > 0 {
            ("Yes", format!("Found {} failing grade(s)", failures))
        } else {
            ("No", "Congratulations! No failing grades".to_string())
        };
        self.view.set_field(StatField::HasFailures, shown);
        self.notifier.show(&message, Severity::Info);
    }

    /// Redraws the grade list without touching the statistic fields.
    pub fn render(&mut self) {
        self.view.render_grades(self.store.all());
    }

    pub fn export_data(&self) -> ExportData {
        ExportData {
            student_id: self.session.clone(),
            grades: self.store.all().to_vec(),
            statistics: statistics::snapshot(self.store.all(), self.store.rules().passing_grade),
            timestamp: Utc::now(),
        }
    }

    pub fn session(&self) -> &StudentSession {
        &self.session
    }

    pub fn store(&self) -> &GradeStore {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn refresh_after_mutation(&mut self) {
        self.view.render_grades(self.store.all());
        self.view.clear_fields();
    }

    fn warn_if_empty(&self, message: &str) -> bool {
        if self.store.is_empty() {
            self.notifier.show(message, Severity::Warning);
            return true;
        }
        false
    }

    fn report(&self, error: BoletinError) {
        tracing::info!(
            category = ?error.category(),
            severity = ?error.severity(),
            "{}",
            error
        );
        self.notifier
            .show(&error.user_friendly_message(), error.notification_severity());
    }
}
