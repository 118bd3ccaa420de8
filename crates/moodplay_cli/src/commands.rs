//! Interactive session commands read from stdin.

use anyhow::{bail, Result};
use moodplay_core::{DetectionMode, Emotion};
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  start               begin emotion detection
  stop                pause emotion detection
  mode <m>            facial | voice | both
  correct <emotion>   override the current reading
  recommend           tracks for the current emotion
  play <id>           play/pause a track
  like <id>           like/unlike a track
  stats               session statistics (JSON)
  help                this text
  quit                end the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Mode(DetectionMode),
    Correct(Emotion),
    Recommend,
    Play(String),
    Like(String),
    Stats,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            bail!("empty command");
        };
        let arg = parts.next();
        if parts.next().is_some() {
            bail!("too many arguments for `{}`", verb);
        }

        let cmd = match (verb.to_ascii_lowercase().as_str(), arg) {
            ("start", None) => Command::Start,
            ("stop", None) => Command::Stop,
            ("mode", Some(m)) => Command::Mode(m.parse()?),
            ("correct", Some(e)) => Command::Correct(e.parse()?),
            ("recommend", None) => Command::Recommend,
            ("play", Some(id)) => Command::Play(id.to_string()),
            ("like", Some(id)) => Command::Like(id.to_string()),
            ("stats", None) => Command::Stats,
            ("help" | "?", None) => Command::Help,
            ("quit" | "exit", None) => Command::Quit,
            ("mode" | "correct" | "play" | "like", None) => bail!("`{}` needs an argument", verb),
            (_, Some(_)) if is_known(verb) => bail!("`{}` takes no argument", verb),
            _ => bail!("unknown command `{}` (try `help`)", verb),
        };
        Ok(cmd)
    }
}

fn is_known(verb: &str) -> bool {
    matches!(
        verb.to_ascii_lowercase().as_str(),
        "start" | "stop" | "recommend" | "stats" | "help" | "?" | "quit" | "exit"
    )
}
