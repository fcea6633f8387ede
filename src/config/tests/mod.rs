//! Config module tests
//!
//! - Manifest parsing (settings, shortcut lines, chords, gestures)
//! - Entry validation
//! - Loading manifests from disk

#[cfg(test)]
mod validator_tests;
#[cfg(test)]
mod loader_tests;
