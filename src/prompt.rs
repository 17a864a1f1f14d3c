// Line prompts. An interactive terminal gets `dialoguer`'s editable input;
// piped stdin (and the tests) go through a plain `BufRead`.

use crate::render::Painter;
use anyhow::{Context, Result};
use dialoguer::Input;
use std::io::{BufRead, Write};

pub trait Prompt {
    /// Show `message` and read one line. The line terminator is stripped;
    /// `None` means the input is exhausted.
    fn ask(&mut self, message: &str) -> Result<Option<String>>;
}

impl<P: Prompt + ?Sized> Prompt for Box<P> {
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        (**self).ask(message)
    }
}

/// Affirmative answers are the ones starting with a lowercase `y`.
pub fn is_yes(answer: &str) -> bool {
    answer.starts_with('y')
}

/// Prompt backed by `dialoguer::Input`, for a stdin attached to a terminal.
#[derive(Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        TerminalPrompt
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        let answer = Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read from terminal")?;
        Ok(Some(answer))
    }
}

/// Prompt that writes the message to `writer` and reads from `reader`.
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
    painter: Painter,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W, painter: Painter) -> Self {
        LinePrompt {
            reader,
            writer,
            painter,
        }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.writer, "{} ", self.painter.input(message))?;
        self.writer.flush()?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_prompt_strips_terminators() {
        let mut out = Vec::new();
        let mut prompt = LinePrompt::new(&b"first\r\nsecond\nlast"[..], &mut out, Painter::plain());
        assert_eq!(prompt.ask("?").unwrap().as_deref(), Some("first"));
        assert_eq!(prompt.ask("?").unwrap().as_deref(), Some("second"));
        assert_eq!(prompt.ask("?").unwrap().as_deref(), Some("last"));
        assert_eq!(prompt.ask("?").unwrap(), None);
    }

    #[test]
    fn line_prompt_echoes_the_message() {
        let mut out = Vec::new();
        {
            let mut prompt = LinePrompt::new(&b"\n"[..], &mut out, Painter::plain());
            assert_eq!(prompt.ask("Enter a search string:").unwrap().as_deref(), Some(""));
        }
        assert_eq!(String::from_utf8(out).unwrap(), "Enter a search string: ");
    }

    #[test]
    fn only_leading_y_is_affirmative() {
        assert!(is_yes("y"));
        assert!(is_yes("yes"));
        assert!(!is_yes("Y"));
        assert!(!is_yes(" y"));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }
}
