//! Interactive query loop
//!
//! Each input line is a query. Lines starting with `:` are commands:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `:all` / `:any` | Switch between AND and OR semantics |
//! | `:show <id>` | Print a record in full |
//! | `:help` | List commands |
//! | `:quit` | Leave the loop (also Ctrl-D / Ctrl-C) |
//!
//! Invalid queries and unknown IDs are reported and the loop continues.

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::output::Output;
use super::{search, show};
use crate::domain::QueryMode;
use crate::storage::Library;

const PROMPT: &str = "studydex> ";

/// What the loop does after a line is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

/// One parsed input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input<'l> {
    Empty,
    Quit,
    Mode(QueryMode),
    Help,
    Show(Option<&'l str>),
    Unknown(&'l str),
    Query(&'l str),
}

impl<'l> Input<'l> {
    fn parse(line: &'l str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Input::Empty;
        }
        if !line.starts_with(':') {
            return Input::Query(line);
        }

        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            ":q" | ":quit" | ":exit" => Input::Quit,
            ":all" => Input::Mode(QueryMode::All),
            ":any" => Input::Mode(QueryMode::Any),
            ":help" => Input::Help,
            ":show" => Input::Show(Some(arg).filter(|id| !id.is_empty())),
            _ => Input::Unknown(command),
        }
    }
}

pub struct Repl<'a> {
    library: &'a Library,
    output: &'a Output,
    mode: QueryMode,
    limit: Option<usize>,
}

impl<'a> Repl<'a> {
    pub fn new(library: &'a Library, output: &'a Output, mode: QueryMode, limit: Option<usize>) -> Self {
        Self {
            library,
            output,
            mode,
            limit,
        }
    }

    /// Returns the current query mode
    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    /// Handles one input line
    pub fn handle(&mut self, line: &str) -> Step {
        match Input::parse(line) {
            Input::Empty => {}
            Input::Quit => return Step::Quit,
            Input::Mode(mode) => {
                self.mode = mode;
                match mode {
                    QueryMode::All => self.output.success("Query mode: all terms must match"),
                    QueryMode::Any => self.output.success("Query mode: any term may match"),
                }
            }
            Input::Help => print_help(),
            Input::Show(None) => self.output.error("Usage: :show <record-id>"),
            Input::Show(Some(id)) => match self.library.find(id) {
                Ok(record) => show::print_record(self.output, &record),
                Err(e) => self.output.error(&format!("{:#}", e)),
            },
            Input::Unknown(command) => self.output.error(&format!(
                "Unknown command '{}'. Type :help for a list of commands.",
                command
            )),
            Input::Query(query) => {
                if let Err(e) = search::run(self.library, self.output, query, self.mode, self.limit) {
                    self.output.error(&format!("{:#}", e));
                }
            }
        }

        Step::Continue
    }

    /// Reads lines until `:quit` or end of input
    pub fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;

        if !self.output.is_json() {
            println!(
                "studydex: {} documents, {} records. Type :help for commands.",
                self.library.corpus().documents().len(),
                self.library.index().len()
            );
        }

        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    if self.handle(&line) == Step::Quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e).context("Failed to read input"),
            }
        }

        self.output.verbose_ctx("repl", "Leaving interactive mode");
        Ok(())
    }
}

fn print_help() {
    println!("Type a query to search. Commands:");
    println!("  :all          require every term (AND)");
    println!("  :any          accept any term (OR)");
    println!("  :show <id>    print a section or QA item");
    println!("  :help         show this help");
    println!("  :quit         exit");
}
