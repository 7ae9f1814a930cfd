//! Line-oriented prompts for the interactive session.
//!
//! Every prompt re-asks until the answer is usable. End of input is reported
//! as [`CliError::InputClosed`] instead of re-asking forever.

use std::fmt::Display;
use std::io::{BufRead, Write};

use powder_core::{Continent, ResortAttribute};

use crate::CliError;

/// What the visitor wants to do with a loaded continent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Weigh priorities and list the best resorts.
    Recommend,
    /// Look a resort up by name.
    Search,
}

/// Reads answers from `input` and writes prompts and messages to `output`.
pub(crate) struct Prompter<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl<'a> Prompter<'a> {
    pub(crate) fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self { input, output }
    }

    pub(crate) fn output(&mut self) -> &mut dyn Write {
        &mut *self.output
    }

    /// Write one line of text.
    pub(crate) fn say(&mut self, message: impl Display) -> Result<(), CliError> {
        writeln!(self.output, "{message}").map_err(CliError::WriteOutput)
    }

    /// Show `prompt` and return the trimmed answer.
    pub(crate) fn ask(&mut self, prompt: &str) -> Result<String, CliError> {
        write!(self.output, "{prompt}").map_err(CliError::WriteOutput)?;
        self.output.flush().map_err(CliError::WriteOutput)?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(CliError::ReadInput)?;
        if read == 0 {
            return Err(CliError::InputClosed);
        }
        Ok(line.trim().to_owned())
    }

    pub(crate) fn continent(&mut self) -> Result<Continent, CliError> {
        let names: Vec<_> = Continent::ALL.iter().map(|c| c.title()).collect();
        self.say(format_args!("List of continents: {}", names.join(", ")))?;
        loop {
            let answer = self.ask("Enter a continent from the above list: ")?;
            match answer.parse::<Continent>() {
                Ok(continent) => return Ok(continent),
                Err(_) => self.say("Invalid continent. Please try again.")?,
            }
        }
    }

    pub(crate) fn mode(&mut self) -> Result<Mode, CliError> {
        loop {
            let answer = self.ask(
                "Would you like to (1) get recommendations or (2) search for a resort by name? \
                 Enter 1 or 2: ",
            )?;
            match answer.as_str() {
                "1" => return Ok(Mode::Recommend),
                "2" => return Ok(Mode::Search),
                _ => self.say("Invalid choice. Please try again.")?,
            }
        }
    }

    /// Ask for a weight in `0..=1`.
    pub(crate) fn priority(&mut self, attribute: ResortAttribute) -> Result<f64, CliError> {
        let prompt = format!("Enter a priority for {} (0-1): ", attribute.label());
        loop {
            match self.ask(&prompt)?.parse::<f64>() {
                Ok(value) if (0.0..=1.0).contains(&value) => return Ok(value),
                Ok(_) => self.say("Please enter a value between 0 and 1.")?,
                Err(_) => self.say("Invalid input. Please enter a number.")?,
            }
        }
    }

    /// Ask for a neighbour cutoff in kilometres.
    pub(crate) fn distance(&mut self) -> Result<f64, CliError> {
        loop {
            match self.ask("Enter a distance in kilometers: ")?.parse::<f64>() {
                Ok(value) if value >= 0.0 => return Ok(value),
                Ok(_) => self.say("Please enter a positive value.")?,
                Err(_) => self.say("Invalid input. Please enter a number.")?,
            }
        }
    }

    /// Ask for a 1-based position in a list of `count` entries.
    ///
    /// Returns the 0-based index, or `None` once the visitor enters `q`.
    pub(crate) fn selection(&mut self, count: usize) -> Result<Option<usize>, CliError> {
        loop {
            let answer = self.ask(
                "Please enter the number of the resort you want to learn more about, \
                 or 'q' to quit: ",
            )?;
            if answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(position) if (1..=count).contains(&position) => {
                    return Ok(Some(position - 1));
                }
                _ => self.say("Invalid choice. Please try again.")?,
            }
        }
    }

    /// Ask a yes/no question; only `y` counts as yes.
    pub(crate) fn confirm(&mut self, prompt: &str) -> Result<bool, CliError> {
        Ok(self.ask(prompt)?.eq_ignore_ascii_case("y"))
    }
}
