use crate::app::shortcuts::{Action, KeyCombo, Keymap};

/// One line of terminal input, decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `add` prompts; `add 7.5` uses the value directly.
    Add(Option<String>),
    /// 0-based index; the terminal shows 1-based positions.
    Remove(usize),
    Average,
    Highest,
    Failures,
    List,
    Stats,
    Export,
    Help,
    Quit,
    Shortcut(Action),
    Empty,
}

pub const HELP: &str = "\
Commands:
  add [grade]     add a grade (prompts when no value is given)
  remove <n>      remove the grade at position n
  average         calculate the average
  highest         find the highest grade
  failures        check for failing grades
  list            show the grades again
  stats           show every statistic at once
  export          print the current data as JSON
  help            show this help
  quit            exit";

pub fn parse_command(line: &str, keymap: &Keymap) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }

    if line.contains('+') && !line.contains(char::is_whitespace) {
        let combo: KeyCombo = line.parse()?;
        return keymap
            .resolve(combo)
            .map(Command::Shortcut)
            .ok_or_else(|| format!("no action bound to '{}'", line));
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "add" | "a" => Command::Add((!rest.is_empty()).then(|| rest.to_string())),
        "remove" | "rm" | "delete" => {
            let position: usize = rest
                .parse()
                .map_err(|_| format!("'{}' is not a grade position", rest))?;
            if position == 0 {
                return Err("positions start at 1".to_string());
            }
            Command::Remove(position - 1)
        }
        "average" | "avg" => Command::Average,
        "highest" | "max" => Command::Highest,
        "failures" | "fail" => Command::Failures,
        "list" | "ls" => Command::List,
        "stats" => Command::Stats,
        "export" => Command::Export,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{}', type 'help'", other)),
    };
    Ok(command)
}
