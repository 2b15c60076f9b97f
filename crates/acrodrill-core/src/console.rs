//! Line-oriented prompt/answer I/O.
//!
//! Every interactive flow talks to the user through a [`Console`], which
//! works over any `BufRead` + `Write` pair. The binary wires it to
//! stdin/stdout; tests feed it a `Cursor` and collect output in a `Vec<u8>`.

use std::io::{self, BufRead, Write};

use crate::error::SessionError;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a full line.
    pub fn say(&mut self, line: impl AsRef<str>) -> Result<(), SessionError> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Print `prompt` without a newline and read one line of input.
    ///
    /// The trailing line terminator is stripped; other whitespace is kept so
    /// callers decide how to normalize. A line that is not valid UTF-8 is
    /// reported and asked again. Fails with [`SessionError::InputClosed`] at
    /// end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<String, SessionError> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut raw = Vec::new();
            if self.input.read_until(b'\n', &mut raw)? == 0 {
                // keep the transcript tidy when input ends mid-prompt
                writeln!(self.output)?;
                return Err(SessionError::InputClosed);
            }
            match String::from_utf8(raw) {
                Ok(mut line) => {
                    let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
                    line.truncate(trimmed_len);
                    return Ok(line);
                }
                Err(_) => {
                    tracing::debug!("discarding input line that is not valid UTF-8");
                    writeln!(self.output, "Input was not valid text. Try again.")?;
                }
            }
        }
    }

    /// Ask a yes/no question. Only `yes` (any case, surrounding whitespace
    /// ignored) counts as affirmative.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool, SessionError> {
        let answer = self.ask(prompt)?;
        Ok(answer.trim().eq_ignore_ascii_case("yes"))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// A console on the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}
