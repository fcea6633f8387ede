//! Replay module tests

#[cfg(test)]
mod runner_tests;
