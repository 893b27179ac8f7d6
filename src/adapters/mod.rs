// Adapters layer: concrete implementations of the domain ports for a terminal.

pub mod terminal;

pub use terminal::{LinePrompt, TerminalView, ToastPresenter};
