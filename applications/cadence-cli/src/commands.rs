//! Interactive commands read from stdin

use crate::error::CliError;
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  play            start, resume, or restart the current track
  pause           pause or resume
  stop            stop playback (position is kept)
  next            skip forward
  prev            skip back
  shuffle         toggle shuffle
  repeat          toggle repeat
  volume <0-100>  set volume
  mute            toggle mute
  status          show what is playing
  list            show the playlist
  help            show this help
  quit            stop and exit";

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    Stop,
    Next,
    Previous,
    Shuffle,
    Repeat,
    Volume(u8),
    Mute,
    Status,
    List,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Err(CliError::UnknownCommand(String::new()));
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "play" | "p" => Self::Play,
            "pause" => Self::Pause,
            "stop" | "s" => Self::Stop,
            "next" | "n" => Self::Next,
            "prev" | "previous" => Self::Previous,
            "shuffle" => Self::Shuffle,
            "repeat" => Self::Repeat,
            "volume" | "vol" => Self::Volume(parse_volume(words.next())?),
            "mute" => Self::Mute,
            "status" => Self::Status,
            "list" | "ls" => Self::List,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };

        if let Some(extra) = words.next() {
            return Err(CliError::InvalidArgument {
                command: "command",
                reason: format!("unexpected `{}`", extra),
            });
        }

        Ok(command)
    }
}

fn parse_volume(argument: Option<&str>) -> Result<u8, CliError> {
    let invalid = |reason: String| CliError::InvalidArgument {
        command: "volume",
        reason,
    };

    let argument = argument.ok_or_else(|| invalid("expected a level 0-100".to_string()))?;
    let level: u8 = argument
        .trim_end_matches('%')
        .parse()
        .map_err(|_| invalid(format!("`{}` is not a number", argument)))?;

    if level > 100 {
        return Err(invalid(format!("{} is above 100", level)));
    }

    Ok(level)
}
