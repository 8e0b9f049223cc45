//! Tests for the generator driver
//!
//! Organized by feature area

mod basic_tests;
mod helpers;
