//! Tests for the interpreter
//!
//! Native execution runs against the demo machine directly; program tests
//! drive compiled bodies through fresh machines.

mod helpers;
