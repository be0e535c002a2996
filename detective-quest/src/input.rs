use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::io::BufRead;

use crate::room_map::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(Direction),
    Exit,
    /// Anything that is not a known command, kept verbatim for the message.
    Unknown(String),
}

impl Command {
    /// `e` goes left, `d` goes right and `s` leaves, in either case.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => match c.to_ascii_lowercase() {
                'e' => Command::Go(Direction::Left),
                'd' => Command::Go(Direction::Right),
                's' => Command::Exit,
                _ => Command::Unknown(text.to_string()),
            },
            _ => Command::Unknown(text.to_string()),
        }
    }
}

/// Where the exploration pulls the player's next move from.
pub trait CommandSource {
    fn next_command(&mut self) -> Result<Command>;
}

/// Where the accused name comes from. `None` means the player is gone.
pub trait AccusationSource {
    fn read_accusation(&mut self) -> Result<Option<String>>;
}

/// Line-oriented player input. Blank lines are skipped while waiting for a
/// command; end of input counts as leaving the mansion.
pub struct ConsoleInput<R> {
    reader: R,
}

impl<R: BufRead> ConsoleInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read player input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl<R: BufRead> CommandSource for ConsoleInput<R> {
    fn next_command(&mut self) -> Result<Command> {
        loop {
            match self.read_line()? {
                None => return Ok(Command::Exit),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => return Ok(Command::parse(&line)),
            }
        }
    }
}

impl<R: BufRead> AccusationSource for ConsoleInput<R> {
    fn read_accusation(&mut self) -> Result<Option<String>> {
        Ok(self
            .read_line()?
            .map(|line| line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Canned input for tests and demos. Runs out like a closed console.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    commands: VecDeque<String>,
    accusations: VecDeque<String>,
    commands_read: usize,
}

impl ScriptedInput {
    pub fn new<S: Into<String>>(commands: impl IntoIterator<Item = S>) -> Self {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Commands handed out so far, not counting the implicit exit.
    pub fn commands_read(&self) -> usize {
        self.commands_read
    }

    pub fn with_accusation(mut self, name: impl Into<String>) -> Self {
        self.accusations.push_back(name.into());
        self
    }
}

impl CommandSource for ScriptedInput {
    fn next_command(&mut self) -> Result<Command> {
        match self.commands.pop_front() {
            Some(text) => {
                self.commands_read += 1;
                Ok(Command::parse(&text))
            }
            None => Ok(Command::Exit),
        }
    }
}

impl AccusationSource for ScriptedInput {
    fn read_accusation(&mut self) -> Result<Option<String>> {
        Ok(self.accusations.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!(Command::parse("e"), Command::Go(Direction::Left));
        assert_eq!(Command::parse("E\n"), Command::Go(Direction::Left));
        assert_eq!(Command::parse(" d "), Command::Go(Direction::Right));
        assert_eq!(Command::parse("S"), Command::Exit);
        assert_eq!(Command::parse("x"), Command::Unknown("x".into()));
        assert_eq!(Command::parse("ed"), Command::Unknown("ed".into()));
    }

    #[test]
    fn console_skips_blank_lines_and_exits_at_eof() {
        let mut input = ConsoleInput::new(Cursor::new("\n  \ne\nq\n"));
        assert_eq!(input.next_command().unwrap(), Command::Go(Direction::Left));
        assert_eq!(input.next_command().unwrap(), Command::Unknown("q".into()));
        assert_eq!(input.next_command().unwrap(), Command::Exit);
    }

    #[test]
    fn console_reads_accusation_lines() {
        let mut input = ConsoleInput::new(Cursor::new("s\nSr. Verde\r\n\n"));
        assert_eq!(input.next_command().unwrap(), Command::Exit);
        assert_eq!(input.read_accusation().unwrap().as_deref(), Some("Sr. Verde"));
        assert_eq!(input.read_accusation().unwrap().as_deref(), Some(""));
        assert_eq!(input.read_accusation().unwrap(), None);
    }

    #[test]
    fn script_runs_out_as_exit() {
        let mut input = ScriptedInput::new(["d"]).with_accusation("Mordomo");
        assert_eq!(input.next_command().unwrap(), Command::Go(Direction::Right));
        assert_eq!(input.next_command().unwrap(), Command::Exit);
        assert_eq!(input.commands_read(), 1);
        assert_eq!(input.read_accusation().unwrap().as_deref(), Some("Mordomo"));
        assert_eq!(input.read_accusation().unwrap(), None);
    }
}
