// SPDX-License-Identifier: GPL-3.0-only

use std::str::FromStr;

use thiserror::Error;

/// User events of the editing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    List,
    /// Free-text or preset mount point; committed through the custom-path rules
    SetMountPoint { device: String, mount_point: String },
    ClearMountPoint { device: String },
    SetReformat { device: String, checked: bool },
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMessageError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', try 'help'")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("expected on/off, got '{0}'")]
    InvalidSwitch(String),
}

/// Parse an on/off style switch.
pub fn parse_switch(value: &str) -> Result<bool, ParseMessageError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Ok(true),
        "off" | "no" | "false" | "0" => Ok(false),
        _ => Err(ParseMessageError::InvalidSwitch(value.to_string())),
    }
}

impl FromStr for Message {
    type Err = ParseMessageError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(ParseMessageError::Empty)?;
        let args: Vec<&str> = words.collect();

        match (command, args.as_slice()) {
            ("list" | "ls", []) => Ok(Self::List),
            ("set", [device, mount_point]) => Ok(Self::SetMountPoint {
                device: device.to_string(),
                mount_point: mount_point.to_string(),
            }),
            ("set", _) => Err(ParseMessageError::Usage("set <device> <mount-point>")),
            ("clear", [device]) => Ok(Self::ClearMountPoint {
                device: device.to_string(),
            }),
            ("clear", _) => Err(ParseMessageError::Usage("clear <device>")),
            ("format", [device, switch]) => Ok(Self::SetReformat {
                device: device.to_string(),
                checked: parse_switch(switch)?,
            }),
            ("format", _) => Err(ParseMessageError::Usage("format <device> on|off")),
            ("reload", []) => Ok(Self::Reload),
            ("help" | "?", _) => Ok(Self::Help),
            ("quit" | "exit" | "q", _) => Ok(Self::Quit),
            (other, _) => Err(ParseMessageError::UnknownCommand(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_edit_commands() {
        assert_eq!(
            "set /dev/sda1 /".parse::<Message>().unwrap(),
            Message::SetMountPoint {
                device: "/dev/sda1".to_string(),
                mount_point: "/".to_string()
            }
        );
        assert_eq!(
            "format sda2 off".parse::<Message>().unwrap(),
            Message::SetReformat {
                device: "sda2".to_string(),
                checked: false
            }
        );
        assert_eq!(
            "  clear sda2 ".parse::<Message>().unwrap(),
            Message::ClearMountPoint {
                device: "sda2".to_string()
            }
        );
        assert_eq!("ls".parse::<Message>().unwrap(), Message::List);
    }

    #[test]
    fn rejects_malformed_commands() {
        assert_eq!("".parse::<Message>(), Err(ParseMessageError::Empty));
        assert!(matches!(
            "set sda1".parse::<Message>(),
            Err(ParseMessageError::Usage(_))
        ));
        assert!(matches!(
            "format sda1 maybe".parse::<Message>(),
            Err(ParseMessageError::InvalidSwitch(_))
        ));
        assert!(matches!(
            "mkfs sda1".parse::<Message>(),
            Err(ParseMessageError::UnknownCommand(_))
        ));
    }
}
