//! Test helpers for interpreter tests

use crate::demo::{DemoMachine, Module, Runtime, Val};
use std::collections::HashMap;

/// A machine with no callable functions and the given variables
pub fn machine(env: HashMap<String, Val>) -> DemoMachine {
    DemoMachine::new(empty_runtime(), env)
}

pub fn empty_runtime() -> Runtime {
    Runtime::new(&Module::new()).expect("empty module compiles")
}
