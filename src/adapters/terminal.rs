use crate::domain::model::{Grade, Notification, NotificationPhase, StatField, StudentSession};
use crate::domain::ports::{Confirmation, NotificationPresenter, TextInput, View};
use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::sync::{Mutex, PoisonError};

pub const UNSET: &str = "--";

/// Plain-text view that writes every update to `out`.
pub struct TerminalView<W: Write> {
    out: W,
    fields: HashMap<StatField, String>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            fields: StatField::ALL
                .iter()
                .map(|field| (*field, UNSET.to_string()))
                .collect(),
        }
    }

    pub fn field(&self, field: StatField) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or(UNSET)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            tracing::warn!("failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> View for TerminalView<W> {
    fn render_grades(&mut self, grades: &[Grade]) {
        if grades.is_empty() {
            self.emit("No grades yet.");
            return;
        }
        self.emit("Grades:");
        for (index, grade) in grades.iter().enumerate() {
            let line = format!(
                "  [{}] {:>4}  {:<9}  (remove {})",
                index + 1,
                grade.to_string(),
                grade.category().label(),
                index + 1
            );
            self.emit(&line);
        }
    }

    fn display_student_id(&mut self, session: &StudentSession) {
        self.emit(&format!("Student: {}", session));
    }

    fn display_current_date(&mut self, date: &str) {
        self.emit(&format!("Date: {}", date));
    }

    fn set_field(&mut self, field: StatField, value: &str) {
        self.fields.insert(field, value.to_string());
        let label = match field {
            StatField::Average => "Average",
            StatField::Highest => "Highest grade",
            StatField::HasFailures => "Failing grades",
        };
        self.emit(&format!("{}: {}", label, value));
    }

    fn clear_fields(&mut self) {
        for value in self.fields.values_mut() {
            *value = UNSET.to_string();
        }
    }
}

/// Line-based prompts. End of input counts as cancelling.
pub struct LinePrompt<R: BufRead, W: Write> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        if !prompt.is_empty() {
            if let Err(e) = write!(self.out, "{} ", prompt).and_then(|_| self.out.flush()) {
                tracing::warn!("failed to write prompt: {}", e);
            }
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!("failed to read input: {}", e);
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> TextInput for LinePrompt<R, W> {
    fn read_text(&mut self, prompt: &str) -> Option<String> {
        self.read_line(prompt)
    }
}

impl<R: BufRead, W: Write> Confirmation for LinePrompt<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        let prompt = format!("{} [y/N]", prompt);
        matches!(
            self.read_line(&prompt).map(|a| a.trim().to_ascii_lowercase()).as_deref(),
            Some("y" | "yes" | "s" | "si" | "sí")
        )
    }
}

/// Prints a notification once, when it becomes visible.
pub struct ToastPresenter<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> ToastPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> NotificationPresenter for ToastPresenter<W> {
    fn present(&self, notification: &Notification) {
        if notification.phase != NotificationPhase::Visible {
            return;
        }
        // 畫面輸出不因其他執行緒 panic 而中斷
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let written = writeln!(
            out,
            "[{}] {}",
            notification.severity.to_string().to_uppercase(),
            notification.message
        )
        .and_then(|_| out.flush());
        if let Err(e) = written {
            tracing::warn!("failed to write notification: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grade_store::GradeStore;
    use crate::domain::model::GradeRules;
    use crate::domain::model::Severity;
    use chrono::Utc;
    use std::io::{self, Cursor};
    use std::sync::Arc;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn notification(phase: NotificationPhase) -> Notification {
        Notification {
            id: 1,
            message: "Grade 7 added".to_string(),
            severity: Severity::Success,
            created_at: Utc::now(),
            phase,
        }
    }

    #[test]
    fn test_render_shows_positions_and_categories() {
        let store = GradeStore::with_grades(GradeRules::default(), &[9.0, 3.5]).unwrap();
        let mut view = TerminalView::new(Vec::new());
        view.render_grades(store.all());

        let text = String::from_utf8(view.into_inner()).unwrap();
        assert!(text.contains("[1]"));
        assert!(text.contains("excellent"));
        assert!(text.contains("[2]"));
        assert!(text.contains("3.5"));
        assert!(text.contains("poor"));
    }

    #[test]
    fn test_fields_reset_to_placeholder() {
        let mut view = TerminalView::new(Vec::new());
        view.set_field(StatField::Average, "6.80");
        assert_eq!(view.field(StatField::Average), "6.80");
        view.clear_fields();
        assert_eq!(view.field(StatField::Average), UNSET);
        assert_eq!(view.field(StatField::HasFailures), UNSET);
    }

    #[test]
    fn test_prompt_reads_lines_and_detects_cancel() {
        let mut prompt = LinePrompt::new(Cursor::new("7.5\ny\nno\n"), Vec::new());
        assert_eq!(prompt.read_text("Grade?"), Some("7.5".to_string()));
        assert!(prompt.confirm("Remove?"));
        assert!(!prompt.confirm("Remove?"));
        assert_eq!(prompt.read_text("Grade?"), None);
    }

    #[test]
    fn test_toast_prints_only_visible_phase() {
        let presenter = ToastPresenter::new(Vec::new());
        presenter.present(&notification(NotificationPhase::Created));
        presenter.present(&notification(NotificationPhase::Visible));
        presenter.present(&notification(NotificationPhase::Dismissed));

        let text = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(text, "[SUCCESS] Grade 7 added\n");
    }

    #[test]
    fn test_toast_survives_poisoned_lock() {
        let presenter = Arc::new(ToastPresenter::new(Vec::new()));
        let poisoner = Arc::clone(&presenter);
        let result = std::thread::spawn(move || {
            let _guard = poisoner.out.lock().unwrap();
            panic!("writer thread failed");
        })
        .join();
        assert!(result.is_err());
        assert!(presenter.out.is_poisoned());

        presenter.present(&notification(NotificationPhase::Visible));
        let presenter = Arc::try_unwrap(presenter).ok().unwrap();
        let text = String::from_utf8(presenter.into_inner()).unwrap();
        assert!(text.contains("Grade 7 added"));
    }

    #[test]
    fn test_write_failures_do_not_panic() {
        ToastPresenter::new(BrokenPipe).present(&notification(NotificationPhase::Visible));

        let mut prompt = LinePrompt::new(Cursor::new("8\n"), BrokenPipe);
        assert_eq!(prompt.read_text("Grade?"), Some("8".to_string()));
    }
}
