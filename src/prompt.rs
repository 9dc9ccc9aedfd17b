//! User prompts: confirmations, permission grants and free-text answers.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::sync::Mutex;

use tracing::warn;

/// Something that can ask the user a question.
pub trait Prompter: Send + Sync {
    /// Yes/no question. Anything but an explicit yes is a no.
    fn confirm(&self, title: &str, message: &str) -> bool;

    /// Free-text question. `None` when the user gives no answer.
    fn ask(&self, question: &str) -> Option<String>;

    /// Like `ask`, but the answer is not echoed while typed.
    fn ask_secret(&self, question: &str) -> Option<String>;
}

/// Prompts on stderr and reads answers from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn read_line(prompt: &str) -> Option<String> {
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "{}", prompt);
        let _ = stderr.flush();

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, title: &str, message: &str) -> bool {
        let answer = Self::read_line(&format!("{}: {} [y/N] ", title, message));
        matches!(
            answer.as_deref().map(str::to_lowercase).as_deref(),
            Some("y") | Some("yes")
        )
    }

    fn ask(&self, question: &str) -> Option<String> {
        Self::read_line(&format!("{} ", question))
    }

    fn ask_secret(&self, question: &str) -> Option<String> {
        match rpassword::prompt_password(format!("{} ", question)) {
            Ok(answer) if !answer.is_empty() => Some(answer),
            Ok(_) => None,
            Err(e) => {
                warn!("Failed to read hidden input: {}", e);
                None
            }
        }
    }
}

/// Answers every confirmation with yes and never supplies text.
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&self, _title: &str, _message: &str) -> bool {
        true
    }

    fn ask(&self, _question: &str) -> Option<String> {
        None
    }

    fn ask_secret(&self, _question: &str) -> Option<String> {
        None
    }
}

/// Replays canned answers in order. Confirmations consume `confirms`,
/// questions consume `answers`; an exhausted queue answers no / nothing.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    confirms: Mutex<VecDeque<bool>>,
    answers: Mutex<VecDeque<Option<String>>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_confirms(self, confirms: impl IntoIterator<Item = bool>) -> Self {
        self.confirms
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .extend(confirms);
        self
    }

    pub fn with_answers<I, T>(self, answers: I) -> Self
    where
        I: IntoIterator<Item = Option<T>>,
        T: Into<String>,
    {
        self.answers
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .extend(answers.into_iter().map(|a| a.map(Into::into)));
        self
    }

    fn answer(&self, shown: String) -> Option<String> {
        self.asked
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(shown);
        self.answers
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .pop_front()
            .flatten()
    }

    /// Every prompt shown so far, in order. Hidden questions carry a
    /// `(hidden)` suffix.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, title: &str, message: &str) -> bool {
        self.asked
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(format!("{}: {}", title, message));
        self.confirms
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .pop_front()
            .unwrap_or(false)
    }

    fn ask(&self, question: &str) -> Option<String> {
        self.answer(question.to_string())
    }

    fn ask_secret(&self, question: &str) -> Option<String> {
        self.answer(format!("{} (hidden)", question))
    }
}
