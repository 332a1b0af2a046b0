use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, warn};

use crate::{
    config::{Config, DisplayConfig},
    error::Error,
    render::render_line,
    Indexable, ReadByLine, Result,
};

/// A single request typed into a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show the line with the given number. Negative numbers are kept so they can be reported as
    /// out of range.
    Line(i64),
    /// Show a uniformly picked line
    Random,
    Quit,
}

impl Command {
    /// Parses a case insensitive command, ignoring surrounding whitespace
    #[inline]
    pub fn parse(input: &str) -> Result<Command> {
        input.parse()
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let cmd = input.trim().to_lowercase();

        match cmd.as_str() {
            "quit" => return Ok(Command::Quit),
            "random" => return Ok(Command::Random),
            _ => (),
        }

        let negative = cmd.starts_with('-');
        let digits = cmd.strip_prefix('-').unwrap_or(&cmd);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidCommand(input.trim().to_owned()));
        }

        // Only overflow can fail here
        let number = cmd
            .parse::<i64>()
            .unwrap_or(if negative { i64::MIN } else { i64::MAX });
        Ok(Command::Line(number))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Stopped,
}

impl SessionState {
    /// The state after `command` got executed
    #[inline]
    pub fn next(self, command: Command) -> SessionState {
        match (self, command) {
            (SessionState::Running, Command::Quit) => SessionState::Stopped,
            (state, _) => state,
        }
    }
}

/// Serves lines of an indexed reader to a user until the user quits
#[derive(Debug)]
pub struct Session<F: ReadByLine> {
    reader: F,
    state: SessionState,
    rng: StdRng,
    display: DisplayConfig,
}

impl<F: ReadByLine> Session<F> {
    pub fn new(reader: F, config: &Config) -> Session<F> {
        let rng = match config.session.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            reader,
            state: SessionState::Running,
            rng,
            display: config.display.clone(),
        }
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn reader(&self) -> &F {
        &self.reader
    }

    pub fn prompt(&self) -> String {
        match self.reader.total_lines() {
            0 => "Enter 'quit' (file is empty): ".to_owned(),
            total => format!(
                "Enter line index (0..{}), 'random', or 'quit': ",
                total - 1
            ),
        }
    }

    /// Reads commands from `input` until the user quits or `input` ends. Problems with single
    /// commands get reported to `out` and don't end the session.
    pub fn run<I: BufRead, W: Write>(&mut self, mut input: I, out: &mut W) -> Result<()> {
        let mut buf = Vec::new();

        while self.state == SessionState::Running {
            write!(out, "{}", self.prompt())?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                // End of input behaves like quit
                writeln!(out)?;
                self.execute(Command::Quit, out)?;
                break;
            }

            self.handle_input(&String::from_utf8_lossy(&buf), out)?;
        }

        Ok(())
    }

    /// Parses and executes a single line of user input
    pub fn handle_input<W: Write>(&mut self, input: &str, out: &mut W) -> Result<()> {
        match Command::parse(input) {
            Ok(command) => self.execute(command, out),
            Err(err) => {
                debug!(%err, "rejected input");
                writeln!(out, "Invalid command. Type an integer, 'random', or 'quit'.\n")?;
                Ok(())
            }
        }
    }

    /// Executes `command` writing its result to `out`. Errors are only returned if writing to
    /// `out` fails.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::Quit => writeln!(out, "Exiting.")?,
            Command::Random => match self.reader.read_random(&mut self.rng) {
                Ok((line, text)) => self.show(line, &text, out)?,
                Err(Error::Empty) => writeln!(out, "The file is empty, no lines to sample.\n")?,
                Err(err) => writeln!(out, "Failed to read a random line: {}\n", err)?,
            },
            Command::Line(number) => {
                let total = self.reader.total_lines();
                let res = usize::try_from(number)
                    .map_err(|_| Error::OutOfBounds { line: 0, total })
                    .and_then(|line| self.reader.read_line(line).map(|text| (line, text)));

                match res {
                    Ok((line, text)) => self.show(line, &text, out)?,
                    Err(Error::OutOfBounds { total: 0, .. }) => {
                        writeln!(out, "Invalid index. The file is empty.\n")?
                    }
                    Err(Error::OutOfBounds { total, .. }) => {
                        writeln!(out, "Invalid index. Must be in [0..{}].\n", total - 1)?
                    }
                    Err(err) => writeln!(out, "Failed to read line {}: {}\n", number, err)?,
                }
            }
        }

        self.state = self.state.next(command);
        Ok(())
    }

    fn show<W: Write>(&self, line: usize, text: &str, out: &mut W) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "--- Line {} ---", line)?;

        if self.display.raw {
            writeln!(out, "{}", text)?;
        } else {
            match render_line(text, &self.display.render_options()) {
                Ok(rendered) => writeln!(out, "{}", rendered)?,
                Err(err) => {
                    warn!(line, %err, "line is not valid JSON");
                    writeln!(out, "Line {} is not valid JSON: {}", line, err)?;
                    writeln!(out, "{}", text)?;
                }
            }
        }

        writeln!(out)?;
        Ok(())
    }
}
