//! Interactive input parsing: free text is a question, `/word` is a command.

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text sent to the assistant.
    Ask(String),
    /// List suggestions, or send suggestion N (1-based).
    Suggest(Option<usize>),
    /// Perform a quick action by label.
    Action(String),
    /// Open a chart link by id.
    Chart(String),
    Clear,
    Export,
    History,
    Help,
    Quit,
    /// Unrecognised or malformed command, with a hint for the user.
    Invalid(String),
}

pub const HELP: &str = "Commands:
  /suggest [n]      list suggested questions, or ask suggestion n
  /action <label>   perform a quick action, e.g. /action Export Data
  /chart <id>       open a related visualization, e.g. /chart wafer-map
  /history          show the conversation so far
  /clear            start over
  /export           save the conversation as JSON
  /help             show this help
  /quit             leave
Anything else is sent as a question.";

impl Command {
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Some(Command::Ask(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let cmd = match name.to_lowercase().as_str() {
            "suggest" if arg.is_empty() => Command::Suggest(None),
            "suggest" => match arg.parse::<usize>() {
                Ok(n) => Command::Suggest(Some(n)),
                Err(_) => Command::Invalid(format!("not a suggestion number: {}", arg)),
            },
            "action" if arg.is_empty() => Command::Invalid("usage: /action <label>".to_string()),
            "action" => Command::Action(arg.to_string()),
            "chart" if arg.is_empty() => Command::Invalid("usage: /chart <id>".to_string()),
            "chart" => Command::Chart(arg.to_string()),
            "clear" => Command::Clear,
            "export" => Command::Export,
            "history" => Command::History,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => Command::Invalid(format!("unknown command: /{}", other)),
        };
        Some(cmd)
    }
}
