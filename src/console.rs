use std::io::{BufRead, Write};

use crate::error::{ConsoleError, InputError};
use crate::utils::{validate_amount, validate_year};

/// Line-based operator console.
pub trait Console {
    /// Show `prompt` without a newline and read one line, without its line ending.
    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError>;

    /// Print one line of output.
    fn print(&mut self, text: &str) -> Result<(), ConsoleError>;
}

/// Console over any reader/writer pair; stdin/stdout in the binary.
pub struct StdConsole<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(ConsoleError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn print(&mut self, text: &str) -> Result<(), ConsoleError> {
        writeln!(self.writer, "{}", text)?;
        Ok(())
    }
}

/// Ask until `parse` accepts the answer, printing each rejection.
pub fn prompt_until_valid<T, C, F>(console: &mut C, prompt: &str, parse: F) -> Result<T, ConsoleError>
where
    C: Console + ?Sized,
    F: Fn(&str) -> Result<T, InputError>,
{
    loop {
        let answer = console.read_line(prompt)?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::debug!("Rejected input {:?}: {}", answer, e);
                console.print(&e.to_string())?;
            }
        }
    }
}

pub fn prompt_year<C: Console + ?Sized>(console: &mut C, current_year: i32) -> Result<i32, ConsoleError> {
    prompt_until_valid(console, "Enter the investment year (e.g., 2010): ", |s| {
        validate_year(s, current_year)
    })
}

pub fn prompt_amount<C: Console + ?Sized>(console: &mut C) -> Result<f64, ConsoleError> {
    prompt_until_valid(
        console,
        "Enter your initial investment amount in USD: $",
        validate_amount,
    )
}
