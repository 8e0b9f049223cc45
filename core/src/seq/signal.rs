//! Control signals

use serde::{Deserialize, Serialize};
use std::fmt;

/// The control outcome of running a suspension to its next boundary.
///
/// Every run of a compiled suspension ends with exactly one signal. Only
/// `Return` carries a payload; the payload travels next to the signal rather
/// than inside it so the signal stays `Copy` and cheap to compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    /// Fell through the end of the computation
    Normal,
    /// Leave the nearest enclosing loop (or absorbing region)
    Break,
    /// Start the next iteration of the nearest enclosing loop
    Continue,
    /// Leave the whole generator
    Return,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Signal::Normal => "normal",
            Signal::Break => "break",
            Signal::Continue => "continue",
            Signal::Return => "return",
        };
        f.write_str(name)
    }
}
