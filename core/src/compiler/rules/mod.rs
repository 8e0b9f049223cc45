//! Validation Rules
//!
//! Each file in this module contains one validation rule:
//!
//! - `unsupported_jump.rs` - Labeled break/continue and goto
//! - `jump_outside_loop.rs` - break/continue with nothing to leave
//! - `yield_in_expression.rs` - Yields hidden in conditions and selectors
//! - `yielding_post_declaration.rs` - Yielding loop posts that declare variables
//! - `unreachable_code.rs` - Code that can never execute

mod jump_outside_loop;
mod unreachable_code;
mod unsupported_jump;
mod yield_in_expression;
mod yielding_post_declaration;

pub use jump_outside_loop::JumpOutsideLoopRule;
pub use unreachable_code::UnreachableCodeRule;
pub use unsupported_jump::UnsupportedJumpRule;
pub use yield_in_expression::YieldInExpressionRule;
pub use yielding_post_declaration::YieldingPostDeclarationRule;
