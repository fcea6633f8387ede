//! Human-readable labels for chords and gesture paths
//!
//! Pure formatting with no side effects. Labels follow the platform's
//! naming for the meta and alt modifiers and replace arrow key names and
//! gesture letters with arrow symbols.

use crate::config::Platform;
use crate::core::types::Chord;

/// Converts an arrow key name or gesture letter to an arrow character.
///
/// Anything else is returned unchanged.
pub fn arrow_symbol(name: &str) -> &str {
    match name {
        "ArrowLeft" | "l" => "←",
        "ArrowRight" | "r" => "→",
        "ArrowUp" | "u" => "↑",
        "ArrowDown" | "d" => "↓",
        other => other,
    }
}

/// Formats a chord definition for display.
///
/// # Example
/// ```
/// use shortcut_dispatch::config::Platform;
/// use shortcut_dispatch::core::{format_display_chord, Chord};
///
/// let chord = Chord::meta("a").with_shift();
/// assert_eq!(format_display_chord(&chord, Platform::Mac), "Command + Shift + A");
/// assert_eq!(format_display_chord(&chord, Platform::Other), "Ctrl + Shift + A");
/// ```
pub fn format_display_chord(chord: &Chord, platform: Platform) -> String {
    let mut label = String::new();

    if chord.meta {
        label.push_str(platform.meta_label());
        label.push_str(" + ");
    }
    if chord.alt {
        label.push_str(platform.alt_label());
        label.push_str(" + ");
    }
    if chord.shift {
        label.push_str("Shift + ");
    }

    // Shifted single characters are shown as typed
    if chord.shift && chord.key.chars().count() == 1 {
        label.push_str(&chord.key.to_uppercase());
    } else {
        label.push_str(arrow_symbol(&chord.key));
    }

    label
}

/// Formats a gesture path as a row of arrows ("rdl" → "→↓←").
pub fn format_gesture(path: &str) -> String {
    path.chars()
        .map(|c| arrow_symbol(c.encode_utf8(&mut [0; 4])).to_string())
        .collect()
}
