#![allow(dead_code)]

use forma::error::Result;
use forma::prompt::{is_affirmative, Prompter};
use forma::selection::{SelectionState, Selector};
use forma::tui::{drive, Key};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

/// Answers confirmations from a fixed script and records every question.
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    pub asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    pub fn asked_count(&self) -> usize {
        self.asked.borrow().len()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.asked.borrow_mut().push(prompt.to_string());
        let answer = self.answers.borrow_mut().pop_front().expect("unexpected prompt");
        Ok(is_affirmative(&answer))
    }
}

/// Feeds a fixed key sequence to the wizard.
pub struct ScriptedSelector {
    keys: Vec<Key>,
}

impl ScriptedSelector {
    pub fn new(keys: Vec<Key>) -> Self {
        Self { keys }
    }
}

impl Selector for ScriptedSelector {
    fn select(&self, state: SelectionState) -> Result<SelectionState> {
        Ok(drive(state, self.keys.clone()))
    }
}

/// Fails the test if the wizard is started at all.
pub struct NoSelector;

impl Selector for NoSelector {
    fn select(&self, _state: SelectionState) -> Result<SelectionState> {
        panic!("the wizard must not run when all inputs are supplied");
    }
}

pub fn typed(text: &str) -> Vec<Key> {
    text.chars().map(Key::Char).collect()
}

/// Writes `files` (relative path, content) under `root`, creating parents.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}
