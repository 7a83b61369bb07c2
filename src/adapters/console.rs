use crate::core::Console;
use crate::utils::error::{FarmError, Result};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Line-mode front-end over any reader/writer pair, stdin/stdout by default.
pub struct TerminalConsole<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl TerminalConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(FarmError::InputClosed);
        }

        let answer = line.trim_end_matches(['\n', '\r']).to_string();
        Ok(answer)
    }

    fn show(&mut self, text: &str) {
        if let Err(e) = writeln!(self.writer, "{}", text) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

/// Replays canned answers and records everything shown, prompts included.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, T>(answers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }
}

impl Console for ScriptedConsole {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.output.push(prompt.to_string());
        self.answers.pop_front().ok_or(FarmError::InputClosed)
    }

    fn show(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}
