//! Module `commands`
//!
//! Defines the command line parser and the data structures used to represent
//! parsed commands and the results of executing them.

/// Command verbs understood by the browser.
///
/// Matching is exact and case-sensitive; anything else is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Ls,
    Cat,
    Cd,
    Mkdir,
    Touch,
    Help,
    Unknown,
}

impl Verb {
    fn from_token(token: &str) -> Self {
        match token {
            "ls" => Verb::Ls,
            "cat" => Verb::Cat,
            "cd" => Verb::Cd,
            "mkdir" => Verb::Mkdir,
            "touch" => Verb::Touch,
            "help" => Verb::Help,
            _ => Verb::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Ls => "ls",
            Verb::Cat => "cat",
            Verb::Cd => "cd",
            Verb::Mkdir => "mkdir",
            Verb::Touch => "touch",
            Verb::Help => "help",
            Verb::Unknown => "unknown",
        }
    }
}

/// A single parsed command line: a verb and up to two arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: Verb,
    pub args: Vec<String>,
}

impl Command {
    /// First argument, if any
    pub fn target(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    /// Unrecognised verb; nothing is written back
    Ignored,
}

/// Struct encapsulating the full result of a command execution.
///
/// `message` is raw bytes because `cat` returns file content verbatim.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<Vec<u8>>,
}

/// Parses one command line.
///
/// The line is split on whitespace into at most three tokens; the last
/// token keeps any inner whitespace.
pub fn parse_command(raw: &str) -> Command {
    let mut rest = raw.trim();
    let mut tokens: Vec<&str> = Vec::with_capacity(3);

    while !rest.is_empty() {
        if tokens.len() == 2 {
            tokens.push(rest);
            break;
        }
        match rest.split_once(char::is_whitespace) {
            Some((token, tail)) => {
                tokens.push(token);
                rest = tail.trim_start();
            }
            None => {
                tokens.push(rest);
                break;
            }
        }
    }

    let verb = tokens.first().map_or(Verb::Unknown, |t| Verb::from_token(t));
    let args = tokens.iter().skip(1).map(|t| t.to_string()).collect();

    Command { verb, args }
}
