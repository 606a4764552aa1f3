//! Yes/no confirmation prompts.
//! Confirmation is deliberately strict: only `y` or `Y` (surrounding
//! whitespace ignored) counts as yes; anything else, including an empty
//! answer, is no.

use crate::error::{Error, Result};
use dialoguer::Input;

/// Returns true only for the single-character affirmative answer.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Trait for asking the operator a yes/no question.
pub trait Prompter {
    /// Shows `prompt` and waits for one answer.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        let answer: String = Input::new()
            .with_prompt(format!("{prompt} [y/N]"))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))?;
        Ok(is_affirmative(&answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative("  y \n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative("yy"));
    }
}
