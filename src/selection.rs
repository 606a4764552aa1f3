//! Interactive collection of the template, project name and author.
//!
//! The wizard is a plain state value: every key press consumes the current
//! [`SelectionState`] and yields the next one, so it can be driven by the
//! terminal host or by a scripted key sequence alike.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::storage::TemplateCatalog;
use crate::tui::{run_in_terminal, Key, Model, Update};

/// Maximum number of characters accepted by the text fields.
pub const INPUT_CHAR_LIMIT: usize = 156;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N}_-]*$").expect("valid name pattern"));

/// Checks a project or author name.
///
/// Valid names are non-empty, start with a letter or digit and contain only
/// letters, digits, hyphens and underscores.
pub fn validate_name(field: &str, value: &str) -> Result<()> {
    if NAME_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(Error::InputValidationError { field: field.to_string(), value: value.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ChooseTemplate,
    EnterProjectName,
    EnterAuthorName,
    Done,
    Cancelled,
}

/// Values already known before the wizard starts, e.g. from flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preset {
    pub template: Option<String>,
    pub project_name: Option<String>,
    pub author: Option<String>,
}

/// The three values the wizard collects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub template: String,
    pub project_name: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Complete(Selection),
    Cancelled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TextInput {
    value: String,
    placeholder: &'static str,
}

impl TextInput {
    fn new(placeholder: &'static str, value: String) -> Self {
        Self { value, placeholder }
    }

    fn push(&mut self, c: char) {
        if self.value.chars().count() < INPUT_CHAR_LIMIT && !c.is_control() {
            self.value.push(c);
        }
    }

    fn pop(&mut self) {
        self.value.pop();
    }

    fn view(&self) -> String {
        if self.value.is_empty() {
            format!(">  (e.g. {})", self.placeholder)
        } else {
            format!("> {}", self.value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    step: Step,
    templates: Vec<String>,
    cursor: usize,
    input: TextInput,
    template: Option<String>,
    project_name: Option<String>,
    author: Option<String>,
    error: Option<String>,
    // Rejected preset values are offered again for correction.
    pending_project_name: Option<String>,
    pending_author: Option<String>,
}

impl SelectionState {
    /// Builds the initial state from the catalog and any preset values.
    ///
    /// # Errors
    /// * `Error::NoTemplatesAvailable` if no template is preset and the catalog is empty
    pub fn new(catalog: &dyn TemplateCatalog, preset: Preset) -> Result<Self> {
        let templates = if preset.template.is_some() { Vec::new() } else { catalog.template_ids()? };
        if preset.template.is_none() && templates.is_empty() {
            return Err(Error::NoTemplatesAvailable { templates_dir: catalog.location() });
        }
        Ok(Self::with_templates(templates, preset))
    }

    pub(crate) fn with_templates(templates: Vec<String>, preset: Preset) -> Self {
        let mut error = None;
        let mut keep_valid = |field: &str, value: Option<String>| match value {
            Some(value) => match validate_name(field, &value) {
                Ok(()) => (Some(value), None),
                Err(e) => {
                    error.get_or_insert(e.to_string());
                    (None, Some(value))
                }
            },
            None => (None, None),
        };
        let (project_name, pending_project_name) = keep_valid("project name", preset.project_name);
        let (author, pending_author) = keep_valid("author", preset.author);

        Self {
            step: Step::ChooseTemplate,
            templates,
            cursor: 0,
            input: TextInput::default(),
            template: preset.template,
            project_name,
            author,
            error,
            pending_project_name,
            pending_author,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Last validation failure, shown until the field is committed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn input(&self) -> &str {
        &self.input.value
    }

    pub fn outcome(&self) -> SelectionOutcome {
        match (self.step, &self.template, &self.project_name, &self.author) {
            (Step::Done, Some(template), Some(project_name), Some(author)) => {
                SelectionOutcome::Complete(Selection {
                    template: template.clone(),
                    project_name: project_name.clone(),
                    author: author.clone(),
                })
            }
            _ => SelectionOutcome::Cancelled,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self.step, Step::Done | Step::Cancelled)
    }

    /// Moves to the first step whose value is still missing. The text field
    /// is reset only when the step actually changes.
    fn advance(mut self) -> Self {
        let next = if self.template.is_none() {
            Step::ChooseTemplate
        } else if self.project_name.is_none() {
            Step::EnterProjectName
        } else if self.author.is_none() {
            Step::EnterAuthorName
        } else {
            Step::Done
        };

        if next != self.step {
            match next {
                Step::EnterProjectName => {
                    let value = self.pending_project_name.take().unwrap_or_default();
                    self.input = TextInput::new("my-awesome-app", value);
                }
                Step::EnterAuthorName => {
                    let value = self.pending_author.take().unwrap_or_default();
                    self.input = TextInput::new("your-name", value);
                }
                _ => {}
            }
            self.step = next;
        }
        self
    }

    fn cancel(mut self) -> Self {
        self.step = Step::Cancelled;
        self
    }

    fn choose_template(mut self, key: Key) -> Self {
        match key {
            Key::Up | Key::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            Key::Down | Key::Char('j') => {
                if self.cursor + 1 < self.templates.len() {
                    self.cursor += 1;
                }
            }
            Key::Enter => {
                if let Some(template) = self.templates.get(self.cursor) {
                    self.template = Some(template.clone());
                    return self.advance();
                }
            }
            Key::Char('q') | Key::Esc => return self.cancel(),
            _ => {}
        }
        self
    }

    fn enter_text(mut self, key: Key) -> Self {
        match key {
            Key::Enter => {
                let field =
                    if self.step == Step::EnterProjectName { "project name" } else { "author" };
                let value = self.input.value.clone();
                match validate_name(field, &value) {
                    Ok(()) => {
                        self.error = None;
                        if self.step == Step::EnterProjectName {
                            self.project_name = Some(value);
                        } else {
                            self.author = Some(value);
                        }
                        return self.advance();
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            Key::Esc => return self.cancel(),
            Key::Backspace => self.input.pop(),
            Key::Char(c) => self.input.push(c),
            _ => {}
        }
        self
    }
}

impl Model for SelectionState {
    type Event = Key;

    fn init(self) -> Self {
        if self.is_terminal() {
            return self;
        }
        self.advance()
    }

    fn update(self, key: Key) -> Update<Self> {
        let next = match (self.step, key) {
            (_, Key::Interrupt) => self.cancel(),
            (Step::ChooseTemplate, key) => self.choose_template(key),
            (Step::EnterProjectName | Step::EnterAuthorName, key) => self.enter_text(key),
            (Step::Done | Step::Cancelled, _) => self,
        };
        if next.is_terminal() {
            Update::Quit(next)
        } else {
            Update::Continue(next)
        }
    }

    fn view(&self) -> String {
        let mut view = String::new();
        match self.step {
            Step::ChooseTemplate => {
                view.push_str("Which template would you like to use?\n\n");
                for (i, template) in self.templates.iter().enumerate() {
                    let marker = if i == self.cursor { ">" } else { " " };
                    view.push_str(&format!("{marker} {template}\n"));
                }
                view.push_str("\n(up/down to move, enter to select, q to quit)\n");
            }
            Step::EnterProjectName | Step::EnterAuthorName => {
                if let Some(template) = &self.template {
                    view.push_str(&format!("Template: {template}\n"));
                }
                if let Some(name) = &self.project_name {
                    view.push_str(&format!("Project:  {name}\n"));
                }
                let question = if self.step == Step::EnterProjectName {
                    "What is the name of your project?"
                } else {
                    "Who is the author?"
                };
                view.push_str(&format!("\n{question}\n\n{}\n", self.input.view()));
                if let Some(error) = &self.error {
                    view.push_str(&format!("\n{error}\n"));
                }
                view.push_str("\n(enter to confirm, esc to quit)\n");
            }
            Step::Done => view.push_str("Done.\n"),
            Step::Cancelled => view.push_str("Cancelled.\n"),
        }
        view
    }
}

/// Runs the wizard to completion or cancellation.
pub trait Selector {
    fn select(&self, state: SelectionState) -> Result<SelectionState>;
}

/// Selector driving the wizard in the real terminal.
#[derive(Default)]
pub struct TerminalSelector;

impl Selector for TerminalSelector {
    fn select(&self, state: SelectionState) -> Result<SelectionState> {
        run_in_terminal(state)
    }
}
