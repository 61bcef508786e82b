//! Line protocol spoken over the overlay's control socket.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/dials.sock";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Hide,
    Toggle,
    Reload,
    Set {
        index: usize,
        value: f64,
    },
    Configure {
        index: usize,
        attributes: Vec<(String, String)>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("Missing {0}")]
    MissingArgument(&'static str),
    #[error("Invalid slider index '{0}'")]
    InvalidIndex(String),
    #[error("Invalid value '{0}'")]
    InvalidValue(String),
    #[error("Expected key=value, got '{0}'")]
    InvalidAttribute(String),
}

/// Splits `key=value`.
pub fn parse_attribute(raw: &str) -> Result<(String, String), CommandError> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| CommandError::InvalidAttribute(raw.to_string()))
}

fn parse_index(raw: Option<&str>) -> Result<usize, CommandError> {
    let raw = raw.ok_or(CommandError::MissingArgument("slider index"))?;
    raw.parse()
        .map_err(|_| CommandError::InvalidIndex(raw.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?;

        match verb {
            "show" => Ok(Self::Show),
            "hide" => Ok(Self::Hide),
            "toggle" => Ok(Self::Toggle),
            "reload" => Ok(Self::Reload),
            "set" => {
                let index = parse_index(words.next())?;
                let raw = words.next().ok_or(CommandError::MissingArgument("value"))?;
                let value = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| CommandError::InvalidValue(raw.to_string()))?;
                Ok(Self::Set { index, value })
            }
            "configure" => {
                let index = parse_index(words.next())?;
                let attributes = words
                    .map(parse_attribute)
                    .collect::<Result<Vec<_>, _>>()?;
                if attributes.is_empty() {
                    return Err(CommandError::MissingArgument("attributes"));
                }
                Ok(Self::Configure { index, attributes })
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => write!(f, "show"),
            Self::Hide => write!(f, "hide"),
            Self::Toggle => write!(f, "toggle"),
            Self::Reload => write!(f, "reload"),
            Self::Set { index, value } => write!(f, "set {} {}", index, value),
            Self::Configure { index, attributes } => {
                write!(f, "configure {}", index)?;
                for (key, value) in attributes {
                    write!(f, " {}={}", key, value)?;
                }
                Ok(())
            }
        }
    }
}
