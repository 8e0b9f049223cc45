//! Runtime value type and operators

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime value type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Val {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Val {
    /// Check if value is truthy (for conditionals)
    pub fn is_truthy(&self) -> bool {
        match self {
            Val::Null => false,
            Val::Bool(b) => *b,
            Val::Int(n) => *n != 0,
            Val::Str(s) => !s.is_empty(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Val::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Val::Null => f.write_str("null"),
            Val::Bool(b) => write!(f, "{}", b),
            Val::Int(n) => write!(f, "{}", n),
            Val::Str(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for Val {
    fn from(n: i64) -> Self {
        Val::Int(n)
    }
}

impl From<bool> for Val {
    fn from(b: bool) -> Self {
        Val::Bool(b)
    }
}

impl From<&str> for Val {
    fn from(s: &str) -> Self {
        Val::Str(s.to_string())
    }
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

impl BinOp {
    /// Apply the operator. Total: mismatched operands, overflow and
    /// division by zero give `None`.
    pub fn apply(self, l: &Val, r: &Val) -> Option<Val> {
        use BinOp::*;
        match self {
            Eq => return Some(Val::Bool(l == r)),
            Ne => return Some(Val::Bool(l != r)),
            And => return Some(Val::Bool(l.is_truthy() && r.is_truthy())),
            Or => return Some(Val::Bool(l.is_truthy() || r.is_truthy())),
            _ => {}
        }
        match (l, r) {
            (Val::Int(a), Val::Int(b)) => {
                let (a, b) = (*a, *b);
                match self {
                    Add => a.checked_add(b).map(Val::Int),
                    Sub => a.checked_sub(b).map(Val::Int),
                    Mul => a.checked_mul(b).map(Val::Int),
                    Div => a.checked_div(b).map(Val::Int),
                    Mod => a.checked_rem(b).map(Val::Int),
                    Lt => Some(Val::Bool(a < b)),
                    Le => Some(Val::Bool(a <= b)),
                    Gt => Some(Val::Bool(a > b)),
                    Ge => Some(Val::Bool(a >= b)),
                    Eq | Ne | And | Or => None,
                }
            }
            (Val::Str(a), Val::Str(b)) => match self {
                Add => Some(Val::Str(format!("{}{}", a, b))),
                Lt => Some(Val::Bool(a < b)),
                Le => Some(Val::Bool(a <= b)),
                Gt => Some(Val::Bool(a > b)),
                Ge => Some(Val::Bool(a >= b)),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_arithmetic() {
        assert_eq!(BinOp::Add.apply(&Val::Int(2), &Val::Int(3)), Some(Val::Int(5)));
        assert_eq!(BinOp::Mod.apply(&Val::Int(7), &Val::Int(2)), Some(Val::Int(1)));
        assert_eq!(BinOp::Lt.apply(&Val::Int(1), &Val::Int(2)), Some(Val::Bool(true)));
    }

    #[test]
    fn test_division_by_zero_is_none() {
        assert_eq!(BinOp::Div.apply(&Val::Int(1), &Val::Int(0)), None);
    }

    #[test]
    fn test_mismatched_operands() {
        assert_eq!(BinOp::Add.apply(&Val::Int(1), &Val::from("x")), None);
        assert_eq!(BinOp::Eq.apply(&Val::Int(1), &Val::from("x")), Some(Val::Bool(false)));
    }

    #[test]
    fn test_string_concat() {
        assert_eq!(
            BinOp::Add.apply(&Val::from("ab"), &Val::from("c")),
            Some(Val::from("abc"))
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!Val::Null.is_truthy());
        assert!(!Val::Int(0).is_truthy());
        assert!(Val::from("x").is_truthy());
    }

    #[test]
    fn test_val_json_shape() {
        let json = serde_json::to_string(&Val::Int(3)).unwrap();
        assert_eq!(json, r#"{"t":"Int","v":3}"#);
        let back: Val = serde_json::from_str(r#"{"t":"Null"}"#).unwrap();
        assert_eq!(back, Val::Null);
    }
}
