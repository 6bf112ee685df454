//! Console commands

use observer_protocol::{BridgeConfig, CaptureEvent};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("Invalid detection mode: {0} (expected legacy or callback)")]
    InvalidMode(String),
    #[error("Invalid event: {0}")]
    InvalidEvent(#[from] serde_json::Error),
}

/// A parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Simulated native capture notification
    Capture(CaptureEvent),
    /// Start listening; `None` uses the configured target
    Start {
        target: Option<(String, String)>,
        config: Option<BridgeConfig>,
    },
    Stop,
    Status,
    Permission,
    Quit,
}

impl Command {
    /// Parse one line of input.
    ///
    /// ```text
    /// shot [path]                         capture, optionally with a path
    /// event {"file_path": "/x.png"}       capture as JSON
    /// start [target callback [legacy|callback]]
    /// stop | status | permission | quit
    /// ```
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word {
            "shot" => Ok(Self::Capture(CaptureEvent::from_native(Some(rest)))),
            "event" => Ok(Self::Capture(serde_json::from_str(rest)?)),
            "start" => Self::parse_start(rest),
            "stop" => Ok(Self::Stop),
            "status" => Ok(Self::Status),
            "permission" => Ok(Self::Permission),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    fn parse_start(args: &str) -> Result<Self, CommandError> {
        let mut args = args.split_whitespace();

        let Some(target_id) = args.next() else {
            return Ok(Self::Start {
                target: None,
                config: None,
            });
        };
        let callback_name = args.next().ok_or(CommandError::MissingArgument("callback"))?;

        let config = match args.next() {
            None => None,
            Some("legacy") => Some(BridgeConfig::legacy()),
            Some("callback") => Some(BridgeConfig::screen_capture_callback()),
            Some(other) => return Err(CommandError::InvalidMode(other.to_string())),
        };

        Ok(Self::Start {
            target: Some((target_id.to_string(), callback_name.to_string())),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shot() {
        assert_eq!(
            Command::parse("shot /sdcard/img.png").unwrap(),
            Command::Capture(CaptureEvent::with_path("/sdcard/img.png"))
        );
        assert_eq!(
            Command::parse("shot").unwrap(),
            Command::Capture(CaptureEvent::without_path())
        );
    }

    #[test]
    fn test_parse_event_json() {
        assert_eq!(
            Command::parse(r#"event {"file_path": "/a.png"}"#).unwrap(),
            Command::Capture(CaptureEvent::with_path("/a.png"))
        );
        assert!(matches!(
            Command::parse("event nope"),
            Err(CommandError::InvalidEvent(_))
        ));
    }

    #[test]
    fn test_parse_start() {
        assert_eq!(
            Command::parse("start").unwrap(),
            Command::Start {
                target: None,
                config: None
            }
        );
        assert_eq!(
            Command::parse("start Rx OnShot callback").unwrap(),
            Command::Start {
                target: Some(("Rx".to_string(), "OnShot".to_string())),
                config: Some(BridgeConfig::screen_capture_callback()),
            }
        );
        assert!(matches!(
            Command::parse("start Rx"),
            Err(CommandError::MissingArgument("callback"))
        ));
        assert!(matches!(
            Command::parse("start Rx OnShot sometimes"),
            Err(CommandError::InvalidMode(_))
        ));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("  stop ").unwrap(), Command::Stop);
        assert_eq!(Command::parse("status").unwrap(), Command::Status);
        assert_eq!(Command::parse("permission").unwrap(), Command::Permission);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
        assert!(matches!(
            Command::parse("dance"),
            Err(CommandError::Unknown(_))
        ));
    }
}
