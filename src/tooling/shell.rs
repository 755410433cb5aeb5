//! Shell command language shared by `vdrive run` and `vdrive shell`.
//!
//! One command per line, whitespace separated; `#` starts a comment. Paths
//! are absolute when they start with `/`, otherwise relative to the current
//! directory.

use crate::error::ApiError;
use crate::session::ExplorerSession;
use crate::tree::node::NodeKind;
use crate::tree::path;
use crate::types::NodeID;
use crate::views::{SortDirection, SortKey};

/// One parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Cd(String),
    Up,
    Ls,
    Folders,
    Mkdir(String),
    Touch { name: String, kind: NodeKind },
    Rename { path: String, name: String },
    Mv { path: String, destination: String },
    Rm(Vec<String>),
    Search(String),
    Sort { key: SortKey, direction: Option<SortDirection> },
    Select(Vec<String>),
    Clear,
    RmSelected,
    Exit,
}

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    /// Nothing to print
    Done,
    /// Text for the user
    Message(String),
    /// The caller should print the current listing
    Listing,
    Exit,
}

impl ShellCommand {
    /// Parse one line; `Ok(None)` for blank lines and comments.
    pub fn parse(line: &str) -> Result<Option<ShellCommand>, ApiError> {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            return Ok(None);
        }
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default();
        let args: Vec<String> = words.map(str::to_string).collect();

        let command = match verb {
            "cd" => ShellCommand::Cd(one(verb, &args)?),
            "up" | ".." => ShellCommand::Up,
            "ls" => ShellCommand::Ls,
            "folders" => ShellCommand::Folders,
            "mkdir" => ShellCommand::Mkdir(one(verb, &args)?),
            "touch" => {
                let (name, kind) = match args.as_slice() {
                    [name] => (name.clone(), NodeKind::Text),
                    [name, kind] => (name.clone(), kind.parse().map_err(ApiError::InvalidCommand)?),
                    _ => return Err(usage("touch NAME [KIND]")),
                };
                ShellCommand::Touch { name, kind }
            }
            "rename" => match args.as_slice() {
                [path, name] => ShellCommand::Rename {
                    path: path.clone(),
                    name: name.clone(),
                },
                _ => return Err(usage("rename PATH NEW_NAME")),
            },
            "mv" => match args.as_slice() {
                [path, destination] => ShellCommand::Mv {
                    path: path.clone(),
                    destination: destination.clone(),
                },
                _ => return Err(usage("mv PATH DESTINATION")),
            },
            "rm" if !args.is_empty() => ShellCommand::Rm(args),
            "rm" => return Err(usage("rm PATH...")),
            "search" => ShellCommand::Search(args.join(" ")),
            "sort" => {
                let (key, direction) = match args.as_slice() {
                    [key] => (key, None),
                    [key, direction] => (key, Some(direction)),
                    _ => return Err(usage("sort KEY [asc|desc]")),
                };
                ShellCommand::Sort {
                    key: key.parse().map_err(ApiError::InvalidCommand)?,
                    direction: direction
                        .map(|d| d.parse())
                        .transpose()
                        .map_err(ApiError::InvalidCommand)?,
                }
            }
            "select" if !args.is_empty() => ShellCommand::Select(args),
            "select" => return Err(usage("select PATH...")),
            "clear" => ShellCommand::Clear,
            "rm-selected" => ShellCommand::RmSelected,
            "exit" | "quit" => ShellCommand::Exit,
            other => {
                return Err(ApiError::InvalidCommand(format!("unknown command: {}", other)))
            }
        };
        Ok(Some(command))
    }

    /// Run the command against `session`.
    pub fn apply(&self, session: &mut ExplorerSession) -> Result<ShellOutcome, ApiError> {
        match self {
            ShellCommand::Cd(target) => {
                let target = resolve(session, target);
                session.change_directory(&target)?;
                Ok(ShellOutcome::Done)
            }
            ShellCommand::Up => {
                session.navigate_up()?;
                Ok(ShellOutcome::Done)
            }
            ShellCommand::Ls => Ok(ShellOutcome::Listing),
            ShellCommand::Folders => Ok(ShellOutcome::Message(session.folder_paths().join("\n"))),
            ShellCommand::Mkdir(name) => {
                session.create_node(name, NodeKind::Folder)?;
                Ok(ShellOutcome::Done)
            }
            ShellCommand::Touch { name, kind } => {
                session.create_node(name, *kind)?;
                Ok(ShellOutcome::Done)
            }
            ShellCommand::Rename { path, name } => {
                let id = node_id(session, path)?;
                session.rename_node(&id, name)?;
                Ok(ShellOutcome::Done)
            }
            ShellCommand::Mv { path, destination } => {
                let id = node_id(session, path)?;
                let destination = resolve(session, destination);
                session.move_node(&id, &destination)?;
                Ok(ShellOutcome::Done)
            }
            ShellCommand::Rm(paths) => {
                // Unknown paths are skipped like absent ids in a batch delete.
                let ids: Vec<NodeID> = paths
                    .iter()
                    .filter_map(|p| node_id(session, p).ok())
                    .collect();
                let removed = session.delete_nodes(&ids);
                Ok(ShellOutcome::Message(format!("Removed {} node(s)", removed)))
            }
            ShellCommand::Search(term) => {
                session.search(term);
                Ok(ShellOutcome::Done)
            }
            ShellCommand::Sort { key, direction } => {
                match direction {
                    Some(direction) => session.set_sort_config(*key, *direction),
                    None => session.toggle_sort(*key),
                }
                Ok(ShellOutcome::Done)
            }
            ShellCommand::Select(paths) => {
                for p in paths {
                    let id = node_id(session, p)?;
                    session.toggle_selection(id);
                }
                Ok(ShellOutcome::Message(format!(
                    "{} selected",
                    session.selection().len()
                )))
            }
            ShellCommand::Clear => {
                session.clear_selection();
                Ok(ShellOutcome::Done)
            }
            ShellCommand::RmSelected => {
                let removed = session.delete_selected();
                Ok(ShellOutcome::Message(format!("Removed {} node(s)", removed)))
            }
            ShellCommand::Exit => Ok(ShellOutcome::Exit),
        }
    }
}

fn one(verb: &str, args: &[String]) -> Result<String, ApiError> {
    match args {
        [arg] => Ok(arg.clone()),
        _ => Err(usage(&format!("{} ARG", verb))),
    }
}

fn usage(text: &str) -> ApiError {
    ApiError::InvalidCommand(format!("usage: {}", text))
}

/// Absolute path for a shell argument.
pub fn resolve(session: &ExplorerSession, arg: &str) -> String {
    if arg.starts_with('/') {
        path::normalize_directory(arg)
    } else {
        path::join(&session.current_directory(), arg.trim_end_matches('/'))
    }
}

fn node_id(session: &ExplorerSession, arg: &str) -> Result<NodeID, ApiError> {
    let target = resolve(session, arg);
    session
        .store()
        .find_by_path(&target)
        .map(|n| n.id)
        .ok_or_else(|| ApiError::InvalidCommand(format!("no such node: {}", target)))
}
