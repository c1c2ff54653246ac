//! Command handlers module for the file browser.
//!
//! Maps a parsed command and a session's current directory to a filesystem
//! side effect plus the bytes to write back. Filesystem failures are turned
//! into response text here and never reach the event loop.

use crate::error::{StorageError, error_to_response};
use crate::navigate::change_directory;
use crate::protocol::responses;
use crate::protocol::{Command, CommandResult, CommandStatus, Verb};
use crate::storage::{self, SandboxPath, SandboxRoot};

/// Dispatches a parsed command to its handler.
///
/// `cwd` is the calling session's current directory and is only modified by
/// a successful `cd`.
pub fn handle_command(root: &SandboxRoot, cwd: &mut SandboxPath, command: &Command) -> CommandResult {
    match command.verb {
        Verb::Ls => handle_cmd_ls(root, cwd, command.target().unwrap_or("")),
        Verb::Cat => with_target(command, |arg| handle_cmd_cat(root, cwd, arg)),
        Verb::Cd => handle_cmd_cd(root, cwd, command.target()),
        Verb::Mkdir => with_target(command, |arg| handle_cmd_mkdir(root, cwd, arg)),
        Verb::Touch => with_target(command, |arg| handle_cmd_touch(root, cwd, arg)),
        Verb::Help => success(responses::help_text().into_bytes()),
        Verb::Unknown => CommandResult {
            status: CommandStatus::Ignored,
            message: None,
        },
    }
}

fn with_target(command: &Command, handler: impl FnOnce(&str) -> CommandResult) -> CommandResult {
    match command.target() {
        Some(arg) => handler(arg),
        None => CommandResult {
            status: CommandStatus::Failure("Missing argument".into()),
            message: Some(responses::missing_argument(command.verb.as_str()).into_bytes()),
        },
    }
}

fn success(message: Vec<u8>) -> CommandResult {
    CommandResult {
        status: CommandStatus::Success,
        message: Some(message),
    }
}

fn failure(err: &StorageError) -> CommandResult {
    CommandResult {
        status: CommandStatus::Failure(err.to_string()),
        message: Some(error_to_response(err).into_bytes()),
    }
}

fn handle_cmd_ls(root: &SandboxRoot, cwd: &SandboxPath, arg: &str) -> CommandResult {
    match storage::list_directory(root, cwd, arg) {
        Ok(entries) => success(responses::listing(&entries).into_bytes()),
        Err(e) => failure(&e),
    }
}

fn handle_cmd_cat(root: &SandboxRoot, cwd: &SandboxPath, arg: &str) -> CommandResult {
    match storage::read_file(root, cwd, arg) {
        Ok(content) => success(responses::file_content(content)),
        Err(e) => failure(&e),
    }
}

fn handle_cmd_cd(root: &SandboxRoot, cwd: &mut SandboxPath, target: Option<&str>) -> CommandResult {
    match change_directory(root, cwd, target) {
        Ok(next) => {
            *cwd = next;
            success(responses::current_directory(&root.display_name(cwd)).into_bytes())
        }
        Err(e) => CommandResult {
            status: CommandStatus::Failure(e.to_string()),
            message: Some(error_to_response(&e).into_bytes()),
        },
    }
}

fn handle_cmd_mkdir(root: &SandboxRoot, cwd: &SandboxPath, arg: &str) -> CommandResult {
    match storage::make_directory(root, cwd, arg) {
        Ok(()) => success(responses::directory_created(arg).into_bytes()),
        Err(StorageError::AlreadyExists(_)) => CommandResult {
            status: CommandStatus::Failure(format!("Directory already exists: {}", arg)),
            message: Some(responses::directory_exists(arg).into_bytes()),
        },
        Err(e) => failure(&e),
    }
}

fn handle_cmd_touch(root: &SandboxRoot, cwd: &SandboxPath, arg: &str) -> CommandResult {
    match storage::create_file(root, cwd, arg) {
        Ok(()) => success(responses::file_created(arg).into_bytes()),
        Err(StorageError::AlreadyExists(_)) => CommandResult {
            status: CommandStatus::Failure(format!("File already exists: {}", arg)),
            message: Some(responses::file_exists(arg).into_bytes()),
        },
        Err(e) => failure(&e),
    }
}
