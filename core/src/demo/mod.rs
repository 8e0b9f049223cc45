//! # Demo Language
//!
//! A small JSON-described language of generator functions, used by the
//! `cogen` binary and the end-to-end tests.
//!
//! ```json
//! { "functions": { "main": { "params": ["n"], "body": [
//!     { "t": "Yield", "value": { "t": "Var", "name": "n" } }
//! ] } } }
//! ```
//!
//! Every function body is compiled once when the [`Runtime`] is created.
//! Each call runs on fresh storage; `yield from f(args)` delegates to
//! another function, and the built-in `range(a, b)` yields `a..b`.

pub mod dsl;
pub mod lang;
pub mod machine;
pub mod value;

#[cfg(test)]
mod tests;

pub use lang::{DemoStmt, Expr, Function, Module, Op};
pub use machine::{DemoAnalysis, DemoMachine};
pub use value::{BinOp, Val};

use crate::compiler::{CompileError, CompileOptions, Compiled, Compiler, Stmt};
use crate::generator::Generator;
use crate::interpreter::{instantiate, Program};
use crate::seq::Seq;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("invalid program: {0}")]
    Json(#[from] serde_json::Error),

    #[error("function '{function}': {source}")]
    Compile {
        function: String,
        #[source]
        source: CompileError,
    },

    #[error("unknown function '{0}'")]
    UnknownFunction(String),
}

struct Entry {
    params: Vec<String>,
    program: Rc<Program<DemoMachine>>,
}

struct Shared {
    functions: BTreeMap<String, Entry>,
    emitted: RefCell<Vec<Val>>,
}

/// A compiled module, ready to run
#[derive(Clone)]
pub struct Runtime {
    shared: Rc<Shared>,
}

impl Runtime {
    pub fn new(module: &Module) -> Result<Self, DemoError> {
        Self::with_options(module, CompileOptions::default())
    }

    pub fn with_options(module: &Module, options: CompileOptions) -> Result<Self, DemoError> {
        let compiler = Compiler::with_options(options);
        let mut functions = BTreeMap::new();
        for (name, function) in &module.functions {
            let body = Stmt::block(function.body.clone());
            let program = compiler
                .compile(&body, &DemoAnalysis)
                .map_err(|source| DemoError::Compile {
                    function: name.clone(),
                    source,
                })?;
            debug!(
                function = %name,
                plain = matches!(program, Compiled::Plain { .. }),
                "function compiled"
            );
            functions.insert(
                name.clone(),
                Entry {
                    params: function.params.clone(),
                    program: Rc::new(program),
                },
            );
        }
        Ok(Runtime {
            shared: Rc::new(Shared {
                functions,
                emitted: RefCell::new(Vec::new()),
            }),
        })
    }

    /// Parse a JSON module and compile it.
    pub fn from_json(source: &str, options: CompileOptions) -> Result<Self, DemoError> {
        let module: Module = serde_json::from_str(source)?;
        Self::with_options(&module, options)
    }

    /// The suspension of calling `name` with `args`. Unknown functions
    /// yield nothing.
    pub fn call(&self, name: &str, args: Vec<Val>) -> Seq<Val> {
        let Some(function) = self.shared.functions.get(name) else {
            warn!(%name, "call of unknown function");
            return Seq::normal();
        };
        if args.len() != function.params.len() {
            warn!(
                %name,
                expected = function.params.len(),
                got = args.len(),
                "argument count mismatch"
            );
        }
        let env: HashMap<String, Val> = function
            .params
            .iter()
            .cloned()
            .zip(args.into_iter().chain(std::iter::repeat(Val::Null)))
            .collect();
        let runtime = self.clone();
        instantiate(Rc::clone(&function.program), move || {
            DemoMachine::new(runtime.clone(), env.clone())
        })
    }

    /// Start driving a call of `name`.
    pub fn start(&self, name: &str, args: Vec<Val>) -> Result<Generator<Val>, DemoError> {
        if !self.shared.functions.contains_key(name) {
            return Err(DemoError::UnknownFunction(name.to_string()));
        }
        Ok(Generator::start(self.call(name, args)))
    }

    pub fn program(&self, name: &str) -> Option<&Program<DemoMachine>> {
        self.shared.functions.get(name).map(|f| &*f.program)
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.shared.functions.keys().map(String::as_str)
    }

    /// Values recorded by `emit`, in order
    pub fn emitted(&self) -> Vec<Val> {
        self.shared.emitted.borrow().clone()
    }

    /// Drain the values recorded by `emit` so far
    pub fn take_emitted(&self) -> Vec<Val> {
        std::mem::take(&mut *self.shared.emitted.borrow_mut())
    }

    pub(crate) fn emit(&self, value: Val) {
        self.shared.emitted.borrow_mut().push(value);
    }
}
