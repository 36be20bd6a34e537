//! Console surface for the interactive navigator.
//!
//! Output is line-oriented and printed immediately; input is a blocking read of
//! one line per prompt. [`StdConsole`] talks to the terminal, [`ScriptedConsole`]
//! replays canned answers and records everything for tests.

use owo_colors::OwoColorize;
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

/// Line-oriented console used by the navigator.
pub trait Console {
    /// Print one line of regular output.
    fn say(&mut self, line: &str);

    /// Print a recoverable error notice.
    fn notice(&mut self, line: &str);

    /// Show a prompt and read one answer line without its line ending.
    ///
    /// Returns `Ok(None)` when input is exhausted.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Console backed by stdin/stdout.
#[derive(Debug)]
pub struct StdConsole {
    colored: bool,
}

impl StdConsole {
    /// Colors notices only when stdout is a terminal.
    pub fn new() -> Self {
        Self {
            colored: io::stdout().is_terminal(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn say(&mut self, line: &str) {
        println!("{}", line);
    }

    fn notice(&mut self, line: &str) {
        if self.colored {
            println!("{}", line.yellow().bold());
        } else {
            println!("{}", line);
        }
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        if self.colored {
            write!(stdout, "{}", prompt.cyan())?;
        } else {
            write!(stdout, "{}", prompt)?;
        }
        stdout.flush()?;
        drop(stdout);

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// One captured console event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcript {
    Said(String),
    Notice(String),
    Asked(String),
}

/// Console that replays queued answers and records all output.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    transcript: Vec<Transcript>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[Transcript] {
        &self.transcript
    }

    /// Every printed line, regular output and notices alike.
    pub fn printed(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|event| match event {
                Transcript::Said(s) | Transcript::Notice(s) => Some(s.as_str()),
                Transcript::Asked(_) => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|event| match event {
                Transcript::Notice(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn prompts(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|event| match event {
                Transcript::Asked(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Answers not consumed yet.
    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, line: &str) {
        self.transcript.push(Transcript::Said(line.to_string()));
    }

    fn notice(&mut self, line: &str) {
        self.transcript.push(Transcript::Notice(line.to_string()));
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.transcript.push(Transcript::Asked(prompt.to_string()));
        Ok(self.answers.pop_front())
    }
}

impl<C: Console + ?Sized> Console for &mut C {
    fn say(&mut self, line: &str) {
        (**self).say(line)
    }

    fn notice(&mut self, line: &str) {
        (**self).notice(line)
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        (**self).ask(prompt)
    }
}
