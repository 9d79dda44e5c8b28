//! Line-based prompts

use std::fmt::Display;
use std::io::{BufRead, Write};

use super::error::{ReviewError, Result};

/// Writes messages and reads single-character answers
pub struct Prompter<R, W> {
    input: R,
    output: W,
    line: String,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: String::new(),
        }
    }

    /// Print a line of output
    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        Ok(())
    }

    /// Ask `question` until one of `choices` is answered.
    ///
    /// Only the first whitespace-separated token of a line is considered and
    /// it must be exactly one of the choices; anything else asks again.
    pub fn ask(&mut self, question: &str, choices: &[char]) -> Result<char> {
        loop {
            self.say(question)?;
            if let Some(choice) = self.read_choice(choices)? {
                return Ok(choice);
            }
        }
    }

    fn read_choice(&mut self, choices: &[char]) -> Result<Option<char>> {
        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Err(ReviewError::InputClosed);
        }

        let token = self.line.split_whitespace().next().unwrap_or("");
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if choices.contains(&c) => Ok(Some(c)),
            _ => Ok(None),
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}
