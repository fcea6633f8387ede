// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/config/manifest.rs
//!
//! Shortcut manifest parser
//!
//! A manifest is a line-oriented file declaring settings and shortcuts:
//!
//! ```text
//! # Timers are in milliseconds
//! hint_delay = 500
//! suppress_delay = 100      # trailing comments are allowed on settings
//! platform = mac
//!
//! shortcut = archive, Archive, META+A, -
//! shortcut = outdent, Outdent, META+SHIFT+Tab, rdl | rdlu
//! shortcut = help, Help, -, -
//! ```
//!
//! Shortcut fields are: id, display name, chord (`-` for none) and gesture
//! aliases separated by `|` (`-` for none).
//!
//! # Architecture
//! Each line is parsed with nom combinators, then validated against the
//! whitelists in `config::validator`. Errors carry the 1-based line number.

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_until, take_while1},
    character::complete::{char, space0, u64 as decimal},
    combinator::{map, rest},
    multi::many0,
    sequence::terminated,
    IResult, Parser,
};
use std::time::Duration;
use thiserror::Error;

use crate::config::validator::{validate_entry, ValidationError};
use crate::config::{Manifest, Platform, ShortcutEntry};
use crate::core::codec::normalize_gesture;
use crate::core::types::Chord;

/// Parse errors with line number context
#[derive(Debug, Error, PartialEq)]
pub enum ManifestError {
    #[error("Parse error on line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },

    #[error("Unknown setting '{name}' on line {line}")]
    UnknownSetting { name: String, line: usize },

    #[error("Invalid value '{value}' for '{name}' on line {line}")]
    InvalidValue {
        name: String,
        value: String,
        line: usize,
    },

    #[error("Invalid shortcut on line {line}: {source}")]
    InvalidShortcut {
        line: usize,
        source: ValidationError,
    },
}

/// Modifier flags recognised in a chord.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChordModifier {
    Meta,
    Alt,
    Shift,
}

/// Parse a complete manifest
///
/// # Returns
/// Settings (defaults for anything not declared) and the shortcut entries
/// in file order, or the first error encountered.
pub fn parse_manifest(content: &str) -> Result<Manifest, ManifestError> {
    let mut manifest = Manifest::default();

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1; // Human-readable numbers start at 1

        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
            continue;
        }

        if line_trimmed.starts_with("shortcut") {
            let entry = match parse_shortcut_line(line_trimmed) {
                Ok((_, mut entry)) => {
                    entry.line = line_num;
                    entry
                }
                Err(e) => {
                    return Err(ManifestError::InvalidSyntax {
                        line: line_num,
                        message: format!("{:?}", e),
                    });
                }
            };

            validate_entry(&entry).map_err(|source| ManifestError::InvalidShortcut {
                line: line_num,
                source,
            })?;

            manifest.entries.push(entry);
        } else {
            apply_setting(&mut manifest, strip_comment(line_trimmed), line_num)?;
        }
    }

    Ok(manifest)
}

/// Removes a trailing ` # comment` from a settings line.
fn strip_comment(line: &str) -> &str {
    match line.find(" #") {
        Some(pos) => line[..pos].trim_end(),
        None => line,
    }
}

fn apply_setting(manifest: &mut Manifest, line: &str, line_num: usize) -> Result<(), ManifestError> {
    let (name, value) = match parse_setting_line(line) {
        Ok((_, pair)) => pair,
        Err(e) => {
            return Err(ManifestError::InvalidSyntax {
                line: line_num,
                message: format!("{:?}", e),
            });
        }
    };

    let invalid = || ManifestError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
        line: line_num,
    };

    let settings = &mut manifest.settings;
    match name {
        "hint_delay" => settings.gesture_hint_delay = parse_millis(value).ok_or_else(invalid)?,
        "suppress_delay" => settings.suppress_delay = parse_millis(value).ok_or_else(invalid)?,
        "platform" => {
            settings.platform = match value.to_lowercase().as_str() {
                "mac" | "macos" => Platform::Mac,
                "other" | "linux" | "windows" => Platform::Other,
                _ => return Err(invalid()),
            }
        }
        _ => {
            return Err(ManifestError::UnknownSetting {
                name: name.to_string(),
                line: line_num,
            });
        }
    }

    Ok(())
}

fn parse_millis(value: &str) -> Option<Duration> {
    let (remaining, millis) = decimal::<&str, nom::error::Error<&str>>(value).ok()?;
    remaining.is_empty().then(|| Duration::from_millis(millis))
}

/// Parse a `name = value` settings line
pub fn parse_setting_line(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, name) = take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)?;
    let (input, _) = (space0, char('='), space0).parse(input)?;
    let (input, value) = rest(input)?;

    Ok((input, (name, value.trim())))
}

/// Parse a single shortcut line
///
/// Format: shortcut = ID, NAME, CHORD, GESTURES
/// Example: shortcut = archive, Archive, META+A, rdl | rdlu
///
/// The returned entry has line 0; the caller fills in the real line.
pub fn parse_shortcut_line(input: &str) -> IResult<&str, ShortcutEntry> {
    let (input, _) = (tag("shortcut"), space0, char('='), space0).parse(input)?;
    let (input, id) = take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-')(input)?;
    let (input, _) = (space0, char(','), space0).parse(input)?;
    let (input, name) = take_until(",")(input)?;
    let (input, _) = (char(','), space0).parse(input)?;
    let (input, chord_field) = take_until(",")(input)?;
    let (input, _) = (char(','), space0).parse(input)?;
    let (input, gesture_field) = rest(input)?;

    let chord = match chord_field.trim() {
        "-" | "" => None,
        field => {
            let (_, chord) = parse_chord(field)?;
            Some(chord)
        }
    };

    Ok((
        input,
        ShortcutEntry {
            id: id.to_string(),
            name: name.trim().to_string(),
            chord,
            gestures: parse_gestures(gesture_field),
            line: 0,
        },
    ))
}

/// Parse one modifier name (case-insensitive)
///
/// - META, CMD, COMMAND, CTRL, CONTROL → Meta
/// - ALT, OPTION → Alt
/// - SHIFT → Shift
pub fn parse_modifier(input: &str) -> IResult<&str, ChordModifier> {
    map(
        alt((
            tag_no_case("COMMAND"),
            tag_no_case("CMD"),
            tag_no_case("META"),
            tag_no_case("CONTROL"),
            tag_no_case("CTRL"),
            tag_no_case("OPTION"),
            tag_no_case("ALT"),
            tag_no_case("SHIFT"),
        )),
        |s: &str| match s.to_uppercase().as_str() {
            "ALT" | "OPTION" => ChordModifier::Alt,
            "SHIFT" => ChordModifier::Shift,
            _ => ChordModifier::Meta,
        },
    )
    .parse(input)
}

/// Parse a chord
///
/// Formats supported:
/// - "A" (no modifiers)
/// - "META+A", "CTRL+SHIFT+Tab" (modifiers joined by `+`, key last)
/// - "META++" (the plus key itself)
pub fn parse_chord(input: &str) -> IResult<&str, Chord> {
    let (input, modifiers) = many0(terminated(parse_modifier, char('+'))).parse(input)?;
    let (input, key) = take_while1(|c: char| !c.is_whitespace())(input)?;

    let mut chord = Chord::key(key);
    for modifier in modifiers {
        match modifier {
            ChordModifier::Meta => chord.meta = true,
            ChordModifier::Alt => chord.alt = true,
            ChordModifier::Shift => chord.shift = true,
        }
    }

    Ok((input, chord))
}

/// Parse the gesture alias field
///
/// - "-" → no gestures
/// - "rdl" → ["rdl"]
/// - "rdl | rdlu" → ["rdl", "rdlu"]
pub fn parse_gestures(input: &str) -> Vec<String> {
    let input = input.trim();
    if input == "-" || input.is_empty() {
        return Vec::new();
    }

    input.split('|').map(normalize_gesture).collect()
}
