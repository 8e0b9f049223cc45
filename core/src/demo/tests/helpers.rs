//! Test helpers for demo runtime tests

use crate::demo::{Module, Runtime, Val};

/// `main(n)`: yields `0..n`, returns `n`
pub const COUNT_PROGRAM: &str = r#"{
  "functions": {
    "main": {
      "params": ["n"],
      "body": [
        {
          "t": "For",
          "init": { "t": "Opaque", "op": { "t": "Let", "name": "i", "value": { "t": "LitInt", "v": 0 } } },
          "cond": { "t": "Bin", "op": "Lt", "l": { "t": "Var", "name": "i" }, "r": { "t": "Var", "name": "n" } },
          "post": {
            "t": "Opaque",
            "op": {
              "t": "Set",
              "name": "i",
              "value": { "t": "Bin", "op": "Add", "l": { "t": "Var", "name": "i" }, "r": { "t": "LitInt", "v": 1 } }
            }
          },
          "body": { "t": "Block", "body": [ { "t": "Yield", "value": { "t": "Var", "name": "i" } } ] }
        },
        { "t": "Return", "value": { "t": "Var", "name": "n" } }
      ]
    },
    "helper": {
      "body": [ { "t": "Opaque", "op": { "t": "Emit", "value": { "t": "LitStr", "v": "hi" } } } ]
    }
  }
}"#;

pub fn runtime(module: &Module) -> Runtime {
    Runtime::new(module).expect("module compiles")
}

/// Drive `name(args)` to the end
pub fn collect(runtime: &Runtime, name: &str, args: Vec<Val>) -> (Vec<Val>, Val) {
    let mut gen = runtime.start(name, args).expect("function exists");
    let values: Vec<Val> = gen.by_ref().collect();
    (values, gen.result().clone())
}

pub fn ints(values: &[i64]) -> Vec<Val> {
    values.iter().copied().map(Val::Int).collect()
}
