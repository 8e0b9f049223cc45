//! Tests for the compiler
//!
//! Organized by statement kind. Structure tests render the lowered tree;
//! behaviour tests run it through the demo runtime.

mod for_tests;
mod helpers;
mod switch_tests;
