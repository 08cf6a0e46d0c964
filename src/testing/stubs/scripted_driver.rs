use crate::ui::cli::drivers::PromptDriver;
use anyhow::{Context, Result, anyhow};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Answers prompts from a fixed script, in order.
///
/// An empty answer accepts the prompt's default, like pressing enter on a
/// pre-filled terminal prompt. [`ScriptedDriver::CLEAR`] erases the default
/// and answers with an empty string. Menus are answered by a label prefix.
pub struct ScriptedDriver {
    answers: RefCell<VecDeque<String>>,
}

impl ScriptedDriver {
    pub const CLEAR: &'static str = "<clear>";

    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.borrow().is_empty()
    }

    fn next(&self, title: &str) -> Result<String> {
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("script ran out of answers at '{title}'"))
    }

    fn next_or(&self, title: &str, default: &str) -> Result<String> {
        let answer = self.next(title)?;
        Ok(match answer.as_str() {
            "" => default.to_string(),
            Self::CLEAR => String::new(),
            _ => answer,
        })
    }
}

impl PromptDriver for ScriptedDriver {
    fn ask_select(&self, title: &str, _help: Option<&str>, options: &[String]) -> Result<usize> {
        let answer = self.next(title)?;
        options
            .iter()
            .position(|o| o.starts_with(&answer))
            .with_context(|| format!("no option of '{title}' starts with '{answer}'"))
    }

    fn ask_bool(&self, title: &str, _help: &str, default: bool) -> Result<bool> {
        let answer = self.next_or(title, &default.to_string())?;
        answer
            .parse()
            .with_context(|| format!("'{answer}' is not a boolean"))
    }

    fn ask_string(&self, title: &str, _help: &str, default: &str) -> Result<String> {
        self.next_or(title, default)
    }

    fn ask_u64(
        &self,
        title: &str,
        _help: &str,
        default: u64,
        _min: Option<u64>,
        _max: Option<u64>,
    ) -> Result<u64> {
        let answer = self.next_or(title, &default.to_string())?;
        answer
            .parse()
            .with_context(|| format!("'{answer}' is not an integer"))
    }

    fn ask_f64(
        &self,
        title: &str,
        _help: &str,
        default: f64,
        _min: Option<f64>,
        _max: Option<f64>,
    ) -> Result<f64> {
        let answer = self.next_or(title, &default.to_string())?;
        answer
            .parse()
            .with_context(|| format!("'{answer}' is not a number"))
    }
}
