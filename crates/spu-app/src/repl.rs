//! Line commands understood by the terminal chat.

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    /// A message, or speech while listening.
    Text(String),
    /// Open a listening turn.
    Voice,
    /// Close the listening turn and submit what was heard.
    Stop,
    /// Close the listening turn and discard it.
    Abort,
    /// Re-enable voice input after an error.
    Reset,
    History,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub const HELP: &str = "\
Type a question and press enter.
  :voice    start listening (typed lines count as speech)
  :stop     stop listening and send what was heard
  :abort    stop listening and discard it
  :reset    re-enable voice input after an error
  :history  show the conversation so far
  :quit     leave";

pub fn parse(line: &str) -> ReplInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplInput::Empty;
    }
    let Some(command) = trimmed.strip_prefix(':') else {
        return ReplInput::Text(trimmed.to_string());
    };
    match command.to_lowercase().as_str() {
        "voice" | "v" => ReplInput::Voice,
        "stop" | "s" => ReplInput::Stop,
        "abort" => ReplInput::Abort,
        "reset" => ReplInput::Reset,
        "history" => ReplInput::History,
        "help" | "h" | "?" => ReplInput::Help,
        "quit" | "exit" | "q" => ReplInput::Quit,
        other => ReplInput::Unknown(other.to_string()),
    }
}
