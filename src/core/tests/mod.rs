//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Codec tests (chord/event hash agreement)
//! - Registry tests (lookups, aliases, collisions)
//! - Gesture hint controller tests
//! - Modifier suppression tests
//! - Dispatcher end-to-end tests

#[cfg(test)]
mod support;
#[cfg(test)]
mod codec_tests;
#[cfg(test)]
mod hint_tests;
