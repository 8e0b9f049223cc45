//! # cogen-core
//!
//! Generators for imperative control flow.
//!
//! - [`seq`]: the suspension algebra (`Bind`, `Delay`, `Combine`, `For`, ...)
//! - [`generator`]: a trampolined driver pulling values out of a [`Seq`]
//! - [`compiler`]: translation of statement trees with yields into
//!   combinator trees
//! - [`interpreter`]: runs compiled trees over a host [`interpreter::Machine`]
//! - [`demo`]: a small JSON-described language used by the `cogen` binary

pub mod cli;
pub mod compiler;
pub mod config;
pub mod demo;
pub mod generator;
pub mod interpreter;
pub mod seq;

// Re-export main types
pub use compiler::{compile, Analysis, CompileError, CompileOptions, Compiled, Compiler};
pub use generator::{Generator, State, StepResult};
pub use seq::{Seq, Signal};
