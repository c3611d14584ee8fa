//! Line commands typed at the prompt, translated into the messages the
//! on-screen widgets would emit.

use downloader_core::{parse_time, Msg};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  url <link>            enter a YouTube URL and submit it
  submit                submit the current URL again
  video | audio         choose the download format
  quality <value>       pick a tier, e.g. 720p or 320kbps
  range on|off          toggle the time range
  range <start> <end>   set the range, in seconds or m:ss
  thumbnail on|off      also save the thumbnail
  analyze               analyze keywords of the title
  download              start the download
  help                  show this list
  quit                  leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Send(Vec<Msg>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("expected `on` or `off`, got `{0}`")]
    InvalidToggle(String),
    #[error("`{0}` is not a time (use seconds or m:ss)")]
    InvalidTime(String),
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let msgs = match head.to_ascii_lowercase().as_str() {
        "" => Vec::new(),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "url" | "u" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("url"));
            }
            vec![Msg::InputChanged(rest.to_string()), Msg::UrlSubmitted]
        }
        "submit" => vec![Msg::UrlSubmitted],
        "video" => vec![Msg::AudioOnlyChanged(false)],
        "audio" => vec![Msg::AudioOnlyChanged(true)],
        "quality" | "q" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("quality"));
            }
            vec![Msg::QualitySelected(rest.to_string())]
        }
        "range" => parse_range(rest)?,
        "thumbnail" => vec![Msg::DownloadThumbnailToggled(parse_toggle(rest)?)],
        "analyze" => vec![Msg::AnalyzeKeywordsClicked],
        "download" | "d" => vec![Msg::DownloadClicked],
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Command::Send(msgs))
}

fn parse_range(rest: &str) -> Result<Vec<Msg>, CommandError> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    match parts.as_slice() {
        [] => Err(CommandError::MissingArgument("range")),
        [toggle] => Ok(vec![Msg::UseTimeRangeToggled(parse_toggle(toggle)?)]),
        [start, end, ..] => {
            let start = parse_time(start).ok_or_else(|| CommandError::InvalidTime(start.to_string()))?;
            let end = parse_time(end).ok_or_else(|| CommandError::InvalidTime(end.to_string()))?;
            Ok(vec![Msg::TimeRangeChanged { start, end }])
        }
    }
}

fn parse_toggle(text: &str) -> Result<bool, CommandError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        "" => Err(CommandError::MissingArgument("toggle")),
        other => Err(CommandError::InvalidToggle(other.to_string())),
    }
}
