//! Interactive client shell
//!
//! A menu loop over any reader/writer pair. Each action prompts for its
//! fields, sends exactly one request, and replaces the displayed result.

use std::io::{BufRead, Write};

use super::api::{ApiResponse, RecordApi};
use super::errors::{ClientError, ClientResult};
use super::payload::Payload;
use crate::store::RecordPatch;

const MENU: &str = "\
Main menu
  1) Add new record
  2) List all records
  3) Show record by ID
  4) Update record
  5) Delete record
  6) Export to JSON
  q) Quit";

const RESULT_RULE: &str = "-------- Result --------";

/// Menu actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    List,
    Show,
    Update,
    Delete,
    Export,
    Quit,
}

impl Action {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "1" | "add" => Some(Action::Add),
            "2" | "list" => Some(Action::List),
            "3" | "show" => Some(Action::Show),
            "4" | "update" => Some(Action::Update),
            "5" | "delete" => Some(Action::Delete),
            "6" | "export" => Some(Action::Export),
            "q" | "quit" | "exit" => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Interactive shell over a [`RecordApi`]
pub struct Shell<'a, A, R, W> {
    api: &'a A,
    input: R,
    output: W,
}

impl<'a, A: RecordApi, R: BufRead, W: Write> Shell<'a, A, R, W> {
    pub fn new(api: &'a A, input: R, output: W) -> Self {
        Self { api, input, output }
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> ClientResult<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("> ")? else {
                return Ok(());
            };

            let action = match Action::parse(&choice) {
                Some(Action::Quit) => return Ok(()),
                Some(action) => action,
                None => {
                    self.show_text(&format!("Error: Unknown choice '{}'.", choice.trim()))?;
                    continue;
                }
            };

            let shown = match self.perform(action) {
                Ok(text) => text,
                Err(ClientError::Io(e)) => return Err(ClientError::Io(e)),
                Err(e) => format!("Error: {}", e),
            };
            self.show_text(&shown)?;
        }
    }

    /// Run one action and return the text to display
    pub fn perform(&mut self, action: Action) -> ClientResult<String> {
        match action {
            Action::Add => {
                let name = self.prompt_field("Enter a name: ")?;
                let value = self.prompt_field("Enter a value: ")?;
                if is_blank(&name) || is_blank(&value) {
                    return Err(ClientError::InvalidInput(
                        "Please fill in all fields.".to_string(),
                    ));
                }
                Ok(self.api.insert(&name, &value)?.payload.to_string())
            }
            Action::List => Ok(self.api.select_all()?.payload.to_string()),
            Action::Show => {
                let id = self.prompt_id("Enter record ID: ")?;
                let response = self.api.select_one(id)?;
                if response.status == 200 {
                    Ok(response.payload.to_string())
                } else {
                    Ok(Payload::Error("No record found with that ID.".to_string()).to_string())
                }
            }
            Action::Update => {
                let id = self.prompt_id("Enter the ID of the record to update: ")?;
                let name = self.prompt_field("New name (leave blank to keep the current name): ")?;
                let value =
                    self.prompt_field("New value (leave blank to keep the current value): ")?;

                // Blank input means keep, so it is left out of the request
                let patch = RecordPatch {
                    name: Some(name).filter(|s| !is_blank(s)),
                    value: Some(value).filter(|s| !is_blank(s)),
                };
                Ok(self.api.update(id, &patch)?.payload.to_string())
            }
            Action::Delete => {
                let id = self.prompt_id("Enter the ID to delete: ")?;
                Ok(self.api.delete(id)?.payload.to_string())
            }
            Action::Export => Ok(render_export(self.api.export()?)),
            Action::Quit => Ok(String::new()),
        }
    }

    fn show_text(&mut self, text: &str) -> ClientResult<()> {
        writeln!(self.output, "{}", RESULT_RULE)?;
        writeln!(self.output, "{}", text)?;
        writeln!(self.output)?;
        self.output.flush()?;
        Ok(())
    }

    /// Read one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> ClientResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Read a field value as typed; end of input counts as blank
    fn prompt_field(&mut self, label: &str) -> ClientResult<String> {
        Ok(self.prompt(label)?.unwrap_or_default())
    }

    fn prompt_id(&mut self, label: &str) -> ClientResult<i64> {
        let raw = self.prompt_field(label)?;
        let input = raw.trim();
        if input.is_empty() {
            return Err(ClientError::InvalidInput("Please enter an ID.".to_string()));
        }
        input
            .parse()
            .map_err(|_| ClientError::InvalidInput(format!("'{}' is not a valid ID.", input)))
    }
}

fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

fn render_export(response: ApiResponse) -> String {
    if response.is_success() {
        "Data exported to JSON successfully.".to_string()
    } else {
        let reason = match response.payload {
            Payload::Error(error) => error,
            other => other.to_string(),
        };
        format!("Export failed: {}", reason)
    }
}
