//! Line commands accepted by the terminal host.

/// One parsed stdin line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text typed into the input and submitted.
    Add(String),
    /// Activate the delete control of the 1-based row `n`.
    Delete(Option<usize>),
    List,
    Clear,
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Type a line to add it as a note.
  :delete <n>  delete the n-th row
  :list        re-render the stored notes
  :clear       remove every stored note
  :help        show this help
  :quit        exit
Lines starting with an unknown `:word` are added as notes; start a line
with `::` to add a note that begins with a command word, e.g. `::list`.";

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim_start();
        if let Some(escaped) = trimmed.strip_prefix("::") {
            return Self::Add(format!(":{escaped}"));
        }
        let Some(rest) = trimmed.strip_prefix(':') else {
            return Self::Add(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        match parts.next().unwrap_or_default() {
            "delete" | "d" => Self::Delete(parts.next().and_then(|n| n.parse().ok())),
            "list" | "l" => Self::List,
            "clear" => Self::Clear,
            "help" | "h" | "" => Self::Help,
            "quit" | "q" => Self::Quit,
            _ => Self::Add(line.to_string()),
        }
    }
}
