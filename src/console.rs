//! Operator console port.
//!
//! Every report line and every interactive answer crosses this seam, so the
//! engine never touches process stdio directly. The binary wires in
//! [`StdioConsole`]; scripted runs and tests use [`ScriptedConsole`] with
//! pre-seeded answers and captured output.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// One parsed operator response to a numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// An integer was read. It may still be out of range for the menu.
    Choice(i64),
    /// Non-numeric input, EOF, or a read failure.
    Invalid,
}

/// Line-oriented output plus blocking menu input.
pub trait Console {
    /// Emit one line of report output.
    fn line(&mut self, text: &str);

    /// Block until the operator supplies one menu answer.
    fn read_answer(&mut self) -> Answer;
}

/// Parse one trimmed line of menu input.
fn parse_answer(input: &str) -> Answer {
    input
        .trim()
        .parse::<i64>()
        .map_or(Answer::Invalid, Answer::Choice)
}

/// Console backed by process stdin/stdout.
#[derive(Debug, Default)]
pub struct StdioConsole;

impl Console for StdioConsole {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }

    fn read_answer(&mut self) -> Answer {
        // Menu lines may still sit in a block buffer when stdout is piped.
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(0) => Answer::Invalid,
            Ok(_) => parse_answer(&input),
            Err(err) => {
                log::warn!("failed to read answer: {err}");
                Answer::Invalid
            }
        }
    }
}

/// Console with pre-seeded answers and captured output lines.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<Answer>,
    lines: Vec<String>,
}

impl ScriptedConsole {
    /// Build a console that will hand out the given choices in order.
    /// Once exhausted, further reads return [`Answer::Invalid`].
    #[must_use]
    pub fn new<I>(choices: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self {
            answers: choices.into_iter().map(Answer::Choice).collect(),
            lines: Vec::new(),
        }
    }

    /// Queue one more answer, including [`Answer::Invalid`].
    pub fn push_answer(&mut self, answer: Answer) {
        self.answers.push_back(answer);
    }

    /// Everything written so far, one entry per line.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Everything written so far, joined with newlines.
    #[must_use]
    pub fn output(&self) -> String {
        self.lines.join("\n")
    }
}

impl Console for ScriptedConsole {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn read_answer(&mut self) -> Answer {
        self.answers.pop_front().unwrap_or(Answer::Invalid)
    }
}
