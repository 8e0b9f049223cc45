//! Normalized statement tree consumed by the compiler
//!
//! The tree is generic over the host's opaque statement type `S` and
//! expression type `E`. The compiler never looks inside either; it asks an
//! [`Analysis`](super::Analysis) whatever it needs to know about them.

use serde::{Deserialize, Serialize};

/// Source location span for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
    /// Start line (0-indexed)
    pub start_line: usize,
    /// Start column (0-indexed)
    pub start_col: usize,
    /// End line (0-indexed)
    pub end_line: usize,
    /// End column (0-indexed)
    pub end_col: usize,
}

impl Span {
    pub fn new(
        start: usize,
        end: usize,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start,
            end,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Span of a single position, for hosts that only track line/column
    pub fn at(line: usize, col: usize) -> Self {
        Self::new(0, 0, line, col, line, col)
    }

    /// Create a span that covers both self and other
    pub fn merge(&self, other: &Span) -> Span {
        let (first, last) = (
            if self.start <= other.start { self } else { other },
            if self.end >= other.end { self } else { other },
        );
        Span {
            start: first.start,
            end: last.end,
            start_line: first.start_line,
            start_col: first.start_col,
            end_line: last.end_line,
            end_col: last.end_col,
        }
    }
}

fn is_default_span(span: &Span) -> bool {
    *span == Span::default()
}

/// One `case` arm. An empty `exprs` list marks the `default` arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de>, E: Deserialize<'de>"))]
pub struct Case<S, E> {
    #[serde(default)]
    pub exprs: Vec<E>,
    pub body: Vec<Stmt<S, E>>,
    #[serde(default, skip_serializing_if = "is_default_span")]
    pub span: Span,
}

impl<S, E> Case<S, E> {
    pub fn new(exprs: Vec<E>, body: Vec<Stmt<S, E>>) -> Self {
        Case {
            exprs,
            body,
            span: Span::default(),
        }
    }

    pub fn default_arm(body: Vec<Stmt<S, E>>) -> Self {
        Self::new(Vec::new(), body)
    }

    pub fn is_default(&self) -> bool {
        self.exprs.is_empty()
    }
}

/// Statement AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "t",
    bound(deserialize = "S: Deserialize<'de>, E: Deserialize<'de>")
)]
pub enum Stmt<S, E> {
    Block {
        body: Vec<Stmt<S, E>>,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    /// A host statement that never yields by itself
    Opaque {
        op: S,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    If {
        cond: E,
        then_s: Box<Stmt<S, E>>,
        #[serde(default)]
        else_s: Option<Box<Stmt<S, E>>>,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    /// `switch init; tag { cases }`. Without a tag every case expression
    /// is a condition.
    Switch {
        #[serde(default)]
        init: Option<Box<Stmt<S, E>>>,
        #[serde(default)]
        tag: Option<E>,
        cases: Vec<Case<S, E>>,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    For {
        #[serde(default)]
        init: Option<Box<Stmt<S, E>>>,
        #[serde(default)]
        cond: Option<E>,
        #[serde(default)]
        post: Option<Box<Stmt<S, E>>>,
        body: Box<Stmt<S, E>>,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    Break {
        #[serde(default)]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    Continue {
        #[serde(default)]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    Goto {
        label: String,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    Return {
        #[serde(default)]
        value: Option<E>,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    /// Yield one value. With `recv`, the value delivered by `send` is
    /// assigned to that place.
    Yield {
        value: E,
        #[serde(default)]
        recv: Option<E>,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    /// Yield every value of a sub-sequence
    YieldFrom {
        source: E,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
}

impl<S, E> Stmt<S, E> {
    pub fn block(body: Vec<Stmt<S, E>>) -> Self {
        Stmt::Block {
            body,
            span: Span::default(),
        }
    }

    pub fn opaque(op: S) -> Self {
        Stmt::Opaque {
            op,
            span: Span::default(),
        }
    }

    pub fn if_(cond: E, then_s: Stmt<S, E>, else_s: Option<Stmt<S, E>>) -> Self {
        Stmt::If {
            cond,
            then_s: Box::new(then_s),
            else_s: else_s.map(Box::new),
            span: Span::default(),
        }
    }

    pub fn switch(init: Option<Stmt<S, E>>, tag: Option<E>, cases: Vec<Case<S, E>>) -> Self {
        Stmt::Switch {
            init: init.map(Box::new),
            tag,
            cases,
            span: Span::default(),
        }
    }

    pub fn for_(
        init: Option<Stmt<S, E>>,
        cond: Option<E>,
        post: Option<Stmt<S, E>>,
        body: Stmt<S, E>,
    ) -> Self {
        Stmt::For {
            init: init.map(Box::new),
            cond,
            post: post.map(Box::new),
            body: Box::new(body),
            span: Span::default(),
        }
    }

    pub fn break_() -> Self {
        Stmt::Break {
            label: None,
            span: Span::default(),
        }
    }

    pub fn continue_() -> Self {
        Stmt::Continue {
            label: None,
            span: Span::default(),
        }
    }

    pub fn return_(value: Option<E>) -> Self {
        Stmt::Return {
            value,
            span: Span::default(),
        }
    }

    pub fn yield_(value: E) -> Self {
        Stmt::Yield {
            value,
            recv: None,
            span: Span::default(),
        }
    }

    pub fn yield_recv(value: E, place: E) -> Self {
        Stmt::Yield {
            value,
            recv: Some(place),
            span: Span::default(),
        }
    }

    pub fn yield_from(source: E) -> Self {
        Stmt::YieldFrom {
            source,
            span: Span::default(),
        }
    }

    /// Replace this statement's span
    pub fn with_span(mut self, at: Span) -> Self {
        match &mut self {
            Stmt::Block { span, .. }
            | Stmt::Opaque { span, .. }
            | Stmt::If { span, .. }
            | Stmt::Switch { span, .. }
            | Stmt::For { span, .. }
            | Stmt::Break { span, .. }
            | Stmt::Continue { span, .. }
            | Stmt::Goto { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::Yield { span, .. }
            | Stmt::YieldFrom { span, .. } => *span = at,
        }
        self
    }

    /// Get the span of this statement
    pub fn span(&self) -> Span {
        match self {
            Stmt::Block { span, .. } => *span,
            Stmt::Opaque { span, .. } => *span,
            Stmt::If { span, .. } => *span,
            Stmt::Switch { span, .. } => *span,
            Stmt::For { span, .. } => *span,
            Stmt::Break { span, .. } => *span,
            Stmt::Continue { span, .. } => *span,
            Stmt::Goto { span, .. } => *span,
            Stmt::Return { span, .. } => *span,
            Stmt::Yield { span, .. } => *span,
            Stmt::YieldFrom { span, .. } => *span,
        }
    }

    /// Short name of the statement kind, for logs and diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Stmt::Block { .. } => "block",
            Stmt::Opaque { .. } => "statement",
            Stmt::If { .. } => "if",
            Stmt::Switch { .. } => "switch",
            Stmt::For { .. } => "for",
            Stmt::Break { .. } => "break",
            Stmt::Continue { .. } => "continue",
            Stmt::Goto { .. } => "goto",
            Stmt::Return { .. } => "return",
            Stmt::Yield { .. } => "yield",
            Stmt::YieldFrom { .. } => "yield from",
        }
    }

    /// Statements of a block, or the statement itself
    pub fn as_list(&self) -> &[Stmt<S, E>] {
        match self {
            Stmt::Block { body, .. } => body,
            other => std::slice::from_ref(other),
        }
    }
}
