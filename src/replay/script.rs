//! Timed event script parser
//!
//! One event per line, prefixed with its timestamp in milliseconds:
//!
//! ```text
//! @0    keydown Meta
//! @150  keyup Meta
//! @200  segment r
//! @260  segment rd
//! @320  segment rdl
//! @900  end rdl
//! @1000 tick
//! @1100 set modal help
//! @1200 keydown META+a
//! ```
//!
//! Blank lines and `#` comments are skipped. Timestamps must not decrease.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, space1, u64 as decimal},
    combinator::{map, rest},
    sequence::preceded,
    IResult, Parser,
};
use thiserror::Error;

use crate::config::manifest::parse_chord;
use crate::core::types::{Chord, Modal};

/// Script errors with line number context
#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("Parse error on line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },

    #[error("Unknown command '{command}' on line {line}")]
    UnknownCommand { command: String, line: usize },

    #[error("Timestamp on line {line} goes backwards ({at_ms} ms < {previous_ms} ms)")]
    TimeWentBackwards {
        line: usize,
        at_ms: u64,
        previous_ms: u64,
    },
}

/// A guard flag toggled by `set`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StateChange {
    Overlay(bool),
    Scroll(bool),
    Drag(bool),
    Modal(Option<Modal>),
}

/// One scripted input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScriptCommand {
    KeyDown(Chord),
    KeyUp(String),
    Segment(String),
    End(Option<String>),
    Tick,
    Set(StateChange),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScriptEvent {
    pub at_ms: u64,
    pub command: ScriptCommand,
    pub line: usize,
}

/// Parse a complete script
pub fn parse_script(content: &str) -> Result<Vec<ScriptEvent>, ScriptError> {
    let mut events: Vec<ScriptEvent> = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1;

        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
            continue;
        }

        let (at_ms, command_text) = match parse_timestamp(line_trimmed) {
            Ok((remaining, at_ms)) => (at_ms, remaining.trim()),
            Err(e) => {
                return Err(ScriptError::InvalidSyntax {
                    line: line_num,
                    message: format!("{:?}", e),
                });
            }
        };

        if let Some(previous) = events.last() {
            if at_ms < previous.at_ms {
                return Err(ScriptError::TimeWentBackwards {
                    line: line_num,
                    at_ms,
                    previous_ms: previous.at_ms,
                });
            }
        }

        let command = parse_command(command_text, line_num)?;
        events.push(ScriptEvent {
            at_ms,
            command,
            line: line_num,
        });
    }

    Ok(events)
}

/// Parse the `@<ms>` prefix
pub fn parse_timestamp(input: &str) -> IResult<&str, u64> {
    let (input, at_ms) = preceded(char('@'), decimal).parse(input)?;
    let (input, _) = space1(input)?;
    Ok((input, at_ms))
}

fn parse_command(input: &str, line: usize) -> Result<ScriptCommand, ScriptError> {
    let syntax = |message: String| ScriptError::InvalidSyntax { line, message };

    let (verb, argument) = match input.split_once(char::is_whitespace) {
        Some((verb, argument)) => (verb, argument.trim()),
        None => (input, ""),
    };

    let command = match verb {
        "keydown" => {
            let (_, chord) = parse_chord(argument).map_err(|e| syntax(format!("{:?}", e)))?;
            ScriptCommand::KeyDown(chord)
        }
        "keyup" if !argument.is_empty() => ScriptCommand::KeyUp(argument.to_string()),
        "segment" if !argument.is_empty() => ScriptCommand::Segment(argument.to_string()),
        "end" => match argument {
            "-" | "" => ScriptCommand::End(None),
            path => ScriptCommand::End(Some(path.to_string())),
        },
        "tick" => ScriptCommand::Tick,
        "set" => {
            let (_, change) = parse_state_change(argument).map_err(|e| syntax(format!("{:?}", e)))?;
            ScriptCommand::Set(change)
        }
        "keyup" | "segment" => return Err(syntax(format!("'{}' needs an argument", verb))),
        _ => {
            return Err(ScriptError::UnknownCommand {
                command: verb.to_string(),
                line,
            });
        }
    };

    Ok(command)
}

fn parse_switch(input: &str) -> IResult<&str, bool> {
    alt((map(tag("on"), |_| true), map(tag("off"), |_| false))).parse(input)
}

/// Parse the argument of `set`
///
/// - "overlay on", "scroll off", "drag on"
/// - "modal help", "modal none"
pub fn parse_state_change(input: &str) -> IResult<&str, StateChange> {
    alt((
        map(preceded((tag("overlay"), space1), parse_switch), StateChange::Overlay),
        map(preceded((tag("scroll"), space1), parse_switch), StateChange::Scroll),
        map(preceded((tag("drag"), space1), parse_switch), StateChange::Drag),
        map(preceded((tag("modal"), space1), rest), |name: &str| {
            match name.trim() {
                "none" => StateChange::Modal(None),
                name => StateChange::Modal(Some(Modal::from_name(name))),
            }
        }),
    ))
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = "
# modifier hold
@0 keydown Meta
@150 keyup Meta

@200 segment rd
@900 end rdl
@950 end -
@1000 tick
";
        let events = parse_script(script).unwrap();

        assert_eq!(events.len(), 6);
        assert_eq!(events[0].command, ScriptCommand::KeyDown(Chord::key("Meta")));
        assert_eq!(events[0].line, 3);
        assert_eq!(events[1].command, ScriptCommand::KeyUp("Meta".to_string()));
        assert_eq!(events[2].command, ScriptCommand::Segment("rd".to_string()));
        assert_eq!(events[3].command, ScriptCommand::End(Some("rdl".to_string())));
        assert_eq!(events[4].command, ScriptCommand::End(None));
        assert_eq!(events[5].at_ms, 1000);
    }

    #[test]
    fn test_keydown_chord() {
        let events = parse_script("@5 keydown META+SHIFT+a").unwrap();
        assert_eq!(events[0].command, ScriptCommand::KeyDown(Chord::meta("a").with_shift()));
    }

    #[test]
    fn test_state_changes() {
        assert_eq!(parse_state_change("overlay on").unwrap().1, StateChange::Overlay(true));
        assert_eq!(parse_state_change("drag off").unwrap().1, StateChange::Drag(false));
        assert_eq!(parse_state_change("modal none").unwrap().1, StateChange::Modal(None));
        assert_eq!(
            parse_state_change("modal help").unwrap().1,
            StateChange::Modal(Some(Modal::Help))
        );
        assert!(parse_state_change("volume up").is_err());
    }

    #[test]
    fn test_backwards_time_rejected() {
        assert_eq!(
            parse_script("@10 tick\n@5 tick"),
            Err(ScriptError::TimeWentBackwards {
                line: 2,
                at_ms: 5,
                previous_ms: 10,
            })
        );
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            parse_script("@0 wiggle"),
            Err(ScriptError::UnknownCommand { line: 1, .. })
        ));
    }

    #[test]
    fn test_missing_timestamp() {
        assert!(matches!(
            parse_script("keydown a"),
            Err(ScriptError::InvalidSyntax { line: 1, .. })
        ));
        assert!(matches!(
            parse_script("@3 segment"),
            Err(ScriptError::InvalidSyntax { line: 1, .. })
        ));
    }
}
