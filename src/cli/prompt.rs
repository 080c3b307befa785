//! Interactive console prompts for mode and date bounds.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the prompt fills in whatever was not given as a flag
//!
//! Invalid answers re-prompt; `q` or end of input cancels.

use std::io::{self, BufRead, Write};

use crate::domain::{DateWindow, Mode};
use crate::error::AppError;

/// Values already known from flags; `None` fields are asked for.
#[derive(Debug, Clone, Copy, Default)]
pub struct Answers {
    pub mode: Option<Mode>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

/// Prompter over the process's stdin/stdout.
pub fn stdio() -> Prompter<io::StdinLock<'static>, io::Stdout> {
    Prompter::new(io::stdin().lock(), io::stdout())
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for every missing value, in order: mode, start date, end date.
    pub fn complete(&mut self, known: Answers) -> Result<(Mode, DateWindow), AppError> {
        let mode = match known.mode {
            Some(mode) => mode,
            None => self.ask_mode()?,
        };
        let min = match known.min {
            Some(min) => min,
            None => self.ask_date("start")?,
        };
        let max = match known.max {
            Some(max) => max,
            None => loop {
                let max = self.ask_date("end")?;
                if !DateWindow::new(min, max).is_empty() {
                    break max;
                }
                self.say(&format!(
                    "End date must leave at least one day after the start date ({min})."
                ))?;
            },
        };
        Ok((mode, DateWindow::new(min, max)))
    }

    pub fn ask_mode(&mut self) -> Result<Mode, AppError> {
        loop {
            let answer = self.ask(concat!(
                "select mode\n",
                "Daily increase : 0\n",
                "Accumulation : 1\n",
                "mode = "
            ))?;
            match answer.parse::<u8>().ok().and_then(Mode::from_selector) {
                Some(mode) => return Ok(mode),
                None => self.say(&format!("Invalid mode: {answer}. Enter 0 or 1."))?,
            }
        }
    }

    /// Ask for a `yyyymmdd` bound; `which` is "start" or "end".
    pub fn ask_date(&mut self, which: &str) -> Result<i64, AppError> {
        loop {
            let answer = self.ask(&format!(
                "Please enter the {which} date of the data\nyyyymmdd = "
            ))?;
            if !answer.is_empty() && answer.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(value) = answer.parse::<i64>() {
                    return Ok(value);
                }
            }
            self.say(&format!("Invalid date: {answer}. Use digits only, e.g. 20210101."))?;
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{prompt}")
            .and_then(|_| self.output.flush())
            .map_err(|e| AppError::usage(format!("Failed to write prompt: {e}")))?;

        let mut line = String::new();
        let bytes = self
            .input
            .read_line(&mut line)
            .map_err(|e| AppError::usage(format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::usage(
                "No input received. Pass --mode, --min and --max instead.",
            ));
        }

        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") {
            return Err(AppError::Canceled);
        }
        Ok(answer.to_string())
    }

    fn say(&mut self, message: &str) -> Result<(), AppError> {
        writeln!(self.output, "{message}")
            .map_err(|e| AppError::usage(format!("Failed to write prompt: {e}")))
    }
}
