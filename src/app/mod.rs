// Application layer: front-end glue kept outside the core (commands, shortcuts).

pub mod commands;
pub mod shortcuts;
