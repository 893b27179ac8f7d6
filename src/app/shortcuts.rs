//! Keyboard accelerators mapped onto controller entry points.

use crate::core::controller::BoletinController;
use crate::domain::ports::{Notifier, TextInput, View};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Ctrl,
    Meta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub modifier: Option<Modifier>,
    pub key: char,
}

impl KeyCombo {
    pub fn new(modifier: Option<Modifier>, key: char) -> Self {
        Self {
            modifier,
            key: key.to_ascii_lowercase(),
        }
    }
}

impl FromStr for KeyCombo {
    type Err = String;

    /// Parses `ctrl+a`, `cmd+p`, `meta+h` or a bare key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let (modifier, key) = match lowered.split_once('+') {
            Some((m, key)) => {
                let modifier = match m {
                    "ctrl" | "control" => Modifier::Ctrl,
                    "meta" | "cmd" | "super" => Modifier::Meta,
                    other => return Err(format!("unknown modifier '{}'", other)),
                };
                (Some(modifier), key)
            }
            None => (None, lowered.as_str()),
        };

        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(KeyCombo::new(modifier, c)),
            _ => Err(format!("expected a single key, got '{}'", key)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddGrade,
    CalculateAverage,
    FindHighest,
    CheckFailures,
}

#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<(char, Action)>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            bindings: vec![
                ('a', Action::AddGrade),
                ('p', Action::CalculateAverage),
                ('h', Action::FindHighest),
                ('f', Action::CheckFailures),
            ],
        }
    }
}

impl Keymap {
    /// Only modified keys (ctrl or meta) trigger actions.
    pub fn resolve(&self, combo: KeyCombo) -> Option<Action> {
        combo.modifier?;
        self.bindings
            .iter()
            .find(|(key, _)| *key == combo.key)
            .map(|(_, action)| *action)
    }

    pub fn describe(&self) -> String {
        self.bindings
            .iter()
            .map(|(key, action)| format!("Ctrl+{} ({:?})", key.to_ascii_uppercase(), action))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Runs the controller handler bound to `action`.
pub fn dispatch<V: View, N: Notifier>(
    controller: &mut BoletinController<V, N>,
    action: Action,
    input: &mut dyn TextInput,
) {
    tracing::debug!(?action, "dispatching shortcut");
    match action {
        Action::AddGrade => controller.on_add_grade_prompt(input),
        Action::CalculateAverage => controller.on_calculate_average(),
        Action::FindHighest => controller.on_find_highest(),
        Action::CheckFailures => controller.on_check_failures(),
    }
}
