//! Presentation seam between the engine and whatever front-end drives it.

use std::collections::VecDeque;
use thiserror::Error;

/// Raised when the player walks away mid-prompt (closed stream, interrupt).
///
/// Invalid input never reaches this level: presenters own validation and
/// re-prompt locally without touching engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Input was cut off while the engine was blocked on a prompt.
    #[error("session interrupted while waiting for input")]
    Interrupted,
}

/// The engine's only window to the outside world.
///
/// `narrate` is fire-and-forget and must not influence engine state or
/// control flow; it is safe to no-op in headless runs. `choose` blocks
/// until it can return an in-range index.
pub trait Presenter {
    fn narrate(&mut self, line: &str);

    /// Present `options` and return the selected zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Interrupted`] when input is cut off before a
    /// valid selection arrives.
    fn choose(&mut self, prompt: &str, options: &[&str]) -> Result<usize, SessionError>;

    /// Request one line of free text.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Interrupted`] when input is cut off.
    fn prompt_line(&mut self, prompt: &str) -> Result<String, SessionError>;
}

/// Scripted presenter for headless runs: feeds canned selections, captures
/// narration for assertions, and reports an interrupted session once its
/// script runs out.
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    choices: VecDeque<usize>,
    lines: VecDeque<String>,
    fallback_choice: Option<usize>,
    pub transcript: Vec<String>,
}

impl ScriptedPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_choices<I: IntoIterator<Item = usize>>(&mut self, choices: I) {
        self.choices.extend(choices);
    }

    pub fn queue_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    /// Keep answering with `choice` once the queue drains, instead of
    /// reporting an interrupt. Lets a fixed policy play out a whole run.
    #[must_use]
    pub fn with_fallback_choice(mut self, choice: usize) -> Self {
        self.fallback_choice = Some(choice);
        self
    }

    /// True when any captured narration line contains `needle`.
    #[must_use]
    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }
}

impl Presenter for ScriptedPresenter {
    fn narrate(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }

    fn choose(&mut self, prompt: &str, options: &[&str]) -> Result<usize, SessionError> {
        self.transcript.push(prompt.to_string());
        let picked = match self.choices.pop_front() {
            Some(idx) => idx,
            None => self.fallback_choice.ok_or(SessionError::Interrupted)?,
        };
        assert!(
            picked < options.len(),
            "scripted choice {picked} out of range for {} options",
            options.len()
        );
        Ok(picked)
    }

    fn prompt_line(&mut self, prompt: &str) -> Result<String, SessionError> {
        self.transcript.push(prompt.to_string());
        self.lines.pop_front().ok_or(SessionError::Interrupted)
    }
}
