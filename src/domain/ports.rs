use crate::domain::model::{Grade, Notification, Severity, StatField, StudentSession};

/// Presentation layer driven by the controller.
pub trait View {
    /// Renders the full current list, in order. Entry `i` must offer a way to
    /// trigger removal of index `i`.
    fn render_grades(&mut self, grades: &[Grade]);
    fn display_student_id(&mut self, session: &StudentSession);
    fn display_current_date(&mut self, date: &str);
    fn set_field(&mut self, field: StatField, value: &str);
    /// Resets every statistic field to its unset placeholder.
    fn clear_fields(&mut self);

    fn has_field(&self, _field: StatField) -> bool {
        true
    }
}

/// Synchronous yes/no gate before a destructive action.
pub trait Confirmation {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Synchronous text capture. `None` means the user cancelled.
pub trait TextInput {
    fn read_text(&mut self, prompt: &str) -> Option<String>;
}

/// Fire-and-forget user-facing messages.
pub trait Notifier {
    fn show(&self, message: &str, severity: Severity);
}

/// Receives notification phase changes, e.g. to draw or erase a toast.
pub trait NotificationPresenter: Send + Sync {
    fn present(&self, notification: &Notification);
}
