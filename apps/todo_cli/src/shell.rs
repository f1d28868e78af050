//! Interactive session: one store for the whole session, so local mode and
//! locally added todos survive between commands.

use std::{io::Write, sync::Arc};

use client_core::{StoreEvent, TodoStore};
use shared::domain::TodoId;
use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::{self, error::TryRecvError},
};

use crate::render::render;

pub const HELP: &str = "\
commands:
  add <text>   add a todo (alias: a)
  rm <id>      remove a todo by id (alias: remove)
  ls           show todos
  refresh      reload todos from the server
  help         show this help
  quit         leave (alias: exit)
any other text is added as a new todo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add(String),
    Submit(String),
    Remove(TodoId),
    List,
    Refresh,
    Help,
    Quit,
    Nothing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("usage: add <text>")]
    MissingText,
    #[error("usage: rm <id>")]
    MissingId,
    #[error("'{0}' is not a todo id")]
    InvalidId(String),
}

pub fn parse_line(line: &str) -> Result<ShellCommand, ShellError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Nothing);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "add" | "a" => {
            if rest.is_empty() {
                Err(ShellError::MissingText)
            } else {
                Ok(ShellCommand::Add(rest.to_string()))
            }
        }
        "rm" | "remove" => {
            if rest.is_empty() {
                return Err(ShellError::MissingId);
            }
            rest.parse::<i64>()
                .map(|id| ShellCommand::Remove(TodoId(id)))
                .map_err(|_| ShellError::InvalidId(rest.to_string()))
        }
        "ls" | "list" if rest.is_empty() => Ok(ShellCommand::List),
        "refresh" if rest.is_empty() => Ok(ShellCommand::Refresh),
        "help" | "?" if rest.is_empty() => Ok(ShellCommand::Help),
        "quit" | "exit" if rest.is_empty() => Ok(ShellCommand::Quit),
        _ => Ok(ShellCommand::Submit(line.to_string())),
    }
}

/// Runs one command against the store. Returns `true` when the caller should
/// redraw regardless of store events.
pub async fn execute(store: &TodoStore, command: ShellCommand) -> bool {
    match command {
        ShellCommand::Add(text) => store.add(text).await,
        ShellCommand::Submit(text) => {
            store.set_draft(text).await;
            store.submit().await;
        }
        ShellCommand::Remove(id) => store.remove(id).await,
        ShellCommand::Refresh => store.refresh().await,
        ShellCommand::List => return true,
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit | ShellCommand::Nothing => {}
    }
    false
}

/// Consumes pending store events; `true` if anything changed.
pub fn drain_changes(events: &mut broadcast::Receiver<StoreEvent>) -> bool {
    let mut changed = false;
    loop {
        match events.try_recv() {
            Ok(_) | Err(TryRecvError::Lagged(_)) => changed = true,
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return changed,
        }
    }
}

pub async fn print_state(store: &TodoStore) {
    print!("{}", render(&store.list().await, store.mode().await));
}

fn prompt() -> anyhow::Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

pub async fn run(store: Arc<TodoStore>) -> anyhow::Result<()> {
    let mut events = store.subscribe();
    store.refresh().await;
    drain_changes(&mut events);
    print_state(&store).await;
    println!("type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => {
                let force = execute(&store, command).await;
                if drain_changes(&mut events) || force {
                    print_state(&store).await;
                }
            }
            Err(err) => println!("{err}"),
        }
        prompt()?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
