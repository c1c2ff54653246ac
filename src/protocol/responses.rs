//! Response texts
//!
//! Every reply ends with a blank line, except file content which gets a
//! single terminator.

use crate::storage::DirEntryInfo;

pub const LINE_END: &str = "\r\n";

const WELCOME: &str = "Welcome";

const HELP_LINES: &[&str] = &[
    "ls [DIR] - list files in the current directory",
    "cat FILE - print the contents of a file",
    "cd [DIR] - change directory (cd .. goes up, cd alone returns to the root)",
    "mkdir DIR - create a new directory",
    "touch FILE - create an empty file",
    "help - show this reference",
];

/// Wrap `text` as one response: the line plus a blank separator line
pub fn paragraph(text: &str) -> String {
    format!("{}{}{}", text, LINE_END, LINE_END)
}

/// Sent once on connect: the welcome line followed by the help text
pub fn greeting() -> String {
    format!("{}{}{}", WELCOME, LINE_END, help_text())
}

pub fn help_text() -> String {
    let mut text = String::new();
    for line in HELP_LINES {
        text.push_str(line);
        text.push_str(LINE_END);
    }
    text.push_str(LINE_END);
    text
}

pub fn current_directory(name: &str) -> String {
    paragraph(&format!("Current directory is: {}", name))
}

pub fn directory_created(arg: &str) -> String {
    paragraph(&format!("Directory {} is create", arg))
}

pub fn directory_exists(arg: &str) -> String {
    paragraph(&format!("Directory {} already exist", arg))
}

pub fn file_created(arg: &str) -> String {
    paragraph(&format!("File {} is create", arg))
}

pub fn file_exists(arg: &str) -> String {
    paragraph(&format!("File {} is already exist", arg))
}

pub fn missing_argument(verb: &str) -> String {
    paragraph(&format!("Missing argument for {}", verb))
}

pub fn command_too_long() -> String {
    paragraph("Command too long")
}

/// One entry per line, directories suffixed with `/`.
///
/// An empty directory still yields the blank-line terminator pair.
pub fn listing(entries: &[DirEntryInfo]) -> String {
    let mut text = String::new();
    for entry in entries {
        text.push_str(&entry.name);
        if entry.is_dir {
            text.push('/');
        }
        text.push_str(LINE_END);
    }
    if text.is_empty() {
        text.push_str(LINE_END);
    }
    text.push_str(LINE_END);
    text
}

pub fn file_content(mut content: Vec<u8>) -> Vec<u8> {
    content.extend_from_slice(LINE_END.as_bytes());
    content
}
