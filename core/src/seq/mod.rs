//! # Suspension algebra
//!
//! A [`Seq`] describes a computation that yields values of type `V` and ends
//! with exactly one [`Signal`]. Building a `Seq` never runs anything: the
//! closures inside are only invoked by the [`Generator`](crate::Generator)
//! that drives it, so a `Seq` can be cloned and started any number of times.
//!
//! ## Vocabulary
//!
//! - [`Seq::bind`] / [`Seq::bind_recv`]: yield one value, then continue
//! - [`Seq::delay`]: build the rest of the computation when it runs
//! - [`Seq::combine`]: sequencing with signal short-circuiting
//! - [`Seq::for_`], [`Seq::while_`], [`Seq::loop_`]: loops
//! - [`Seq::normal`], [`Seq::break_`], [`Seq::continue_`], [`Seq::return_`]: terminals
//! - [`Seq::yield_from`], [`Seq::each`]: delegation
//! - [`Seq::absorb`]: a region that turns one signal back into `Normal`

mod signal;

pub use signal::Signal;

use std::fmt;
use std::rc::Rc;

/// Deferred continuation of a [`Seq::bind`]
pub type Thunk<V> = Rc<dyn Fn() -> Seq<V>>;

/// Deferred continuation of a [`Seq::bind_recv`], fed the sent value
pub type RecvThunk<V> = Rc<dyn Fn(V) -> Seq<V>>;

/// Loop condition callback
pub type Cond = Rc<dyn Fn() -> bool>;

/// Loop post callback
pub type Post = Rc<dyn Fn()>;

/// Factory producing a fresh host iterator for [`Seq::each`]
pub type Source<V> = Rc<dyn Fn() -> Box<dyn Iterator<Item = V>>>;

/* ===================== Seq ===================== */

/// An opaque suspension.
pub struct Seq<V> {
    pub(crate) node: Node<V>,
}

pub(crate) enum Node<V> {
    Normal,
    Break,
    Continue,
    Return(Option<V>),
    Bind(V, Thunk<V>),
    BindRecv(V, RecvThunk<V>),
    Delay(Thunk<V>),
    Combine(Rc<Seq<V>>, Rc<Seq<V>>),
    For {
        cond: Option<Cond>,
        post: Option<Post>,
        body: Rc<Seq<V>>,
    },
    Absorb(Signal, Rc<Seq<V>>),
    YieldFrom(Rc<Seq<V>>),
    Each(Source<V>),
}

impl<V> Seq<V> {
    fn from_node(node: Node<V>) -> Self {
        Seq { node }
    }

    /// Terminal: fell through.
    pub fn normal() -> Self {
        Self::from_node(Node::Normal)
    }

    /// Terminal: leave the enclosing loop.
    pub fn break_() -> Self {
        Self::from_node(Node::Break)
    }

    /// Terminal: next iteration of the enclosing loop.
    pub fn continue_() -> Self {
        Self::from_node(Node::Continue)
    }

    /// Terminal: leave the generator, optionally with a result.
    pub fn return_(value: Option<V>) -> Self {
        Self::from_node(Node::Return(value))
    }

    /// Terminal: leave the generator with `value` as its result.
    pub fn return_value(value: V) -> Self {
        Self::return_(Some(value))
    }

    /// Yield `value`; `next` builds the rest once the driver resumes.
    pub fn bind(value: V, next: impl Fn() -> Seq<V> + 'static) -> Self {
        Self::from_node(Node::Bind(value, Rc::new(next)))
    }

    /// Yield `value`; `next` receives the value passed to
    /// [`Generator::send`](crate::Generator::send), or `V::default()` when
    /// resumed by `move_next`.
    pub fn bind_recv(value: V, next: impl Fn(V) -> Seq<V> + 'static) -> Self {
        Self::from_node(Node::BindRecv(value, Rc::new(next)))
    }

    /// Build the suspension only when it actually runs.
    ///
    /// Anything `build` reads is read at run time, which is what keeps
    /// mutable variables shared between segments coherent.
    pub fn delay(build: impl Fn() -> Seq<V> + 'static) -> Self {
        Self::from_node(Node::Delay(Rc::new(build)))
    }

    /// Run `first`; run `second` only if `first` ends with `Normal`.
    pub fn combine(first: Seq<V>, second: Seq<V>) -> Self {
        Self::from_node(Node::Combine(Rc::new(first), Rc::new(second)))
    }

    /// `for (; cond; post) body`. Absent `cond` means "always".
    pub fn for_(cond: Option<Cond>, post: Option<Post>, body: Seq<V>) -> Self {
        Self::from_node(Node::For {
            cond,
            post,
            body: Rc::new(body),
        })
    }

    /// `while (cond) body`
    pub fn while_(cond: impl Fn() -> bool + 'static, body: Seq<V>) -> Self {
        Self::for_(Some(Rc::new(cond)), None, body)
    }

    /// Endless loop; only `Break` or `Return` leaves it.
    pub fn loop_(body: Seq<V>) -> Self {
        Self::for_(None, None, body)
    }

    /// Run `body`; a `signal` ending it becomes `Normal`, anything else
    /// propagates unchanged.
    pub fn absorb(signal: Signal, body: Seq<V>) -> Self {
        Self::from_node(Node::Absorb(signal, Rc::new(body)))
    }

    /// Yield every value of `inner`, then complete with `Normal`.
    ///
    /// `inner` runs in its own signal scope: its `Break`, `Continue` and
    /// `Return` end the delegation and never reach the outer loops.
    pub fn yield_from(inner: Seq<V>) -> Self {
        Self::from_node(Node::YieldFrom(Rc::new(inner)))
    }

    /// Yield every element of a host iterator created by `factory` each time
    /// the suspension runs.
    pub fn each<I, F>(factory: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = V>,
        I::IntoIter: 'static,
    {
        let source: Source<V> = Rc::new(move || Box::new(factory().into_iter()));
        Self::from_node(Node::Each(source))
    }

    /// Name of the outermost combinator, for logs and debugging.
    pub fn kind(&self) -> &'static str {
        match &self.node {
            Node::Normal => "Normal",
            Node::Break => "Break",
            Node::Continue => "Continue",
            Node::Return(_) => "Return",
            Node::Bind(..) => "Bind",
            Node::BindRecv(..) => "BindRecv",
            Node::Delay(_) => "Delay",
            Node::Combine(..) => "Combine",
            Node::For { .. } => "For",
            Node::Absorb(..) => "Absorb",
            Node::YieldFrom(_) => "YieldFrom",
            Node::Each(_) => "Each",
        }
    }
}

impl<V: Clone> Clone for Seq<V> {
    fn clone(&self) -> Self {
        let node = match &self.node {
            Node::Normal => Node::Normal,
            Node::Break => Node::Break,
            Node::Continue => Node::Continue,
            Node::Return(v) => Node::Return(v.clone()),
            Node::Bind(v, k) => Node::Bind(v.clone(), k.clone()),
            Node::BindRecv(v, k) => Node::BindRecv(v.clone(), k.clone()),
            Node::Delay(f) => Node::Delay(f.clone()),
            Node::Combine(a, b) => Node::Combine(a.clone(), b.clone()),
            Node::For { cond, post, body } => Node::For {
                cond: cond.clone(),
                post: post.clone(),
                body: body.clone(),
            },
            Node::Absorb(signal, body) => Node::Absorb(*signal, body.clone()),
            Node::YieldFrom(inner) => Node::YieldFrom(inner.clone()),
            Node::Each(source) => Node::Each(source.clone()),
        };
        Seq { node }
    }
}

impl<V: fmt::Debug> fmt::Debug for Seq<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            Node::Return(v) => f.debug_tuple("Return").field(v).finish(),
            Node::Bind(v, _) => f.debug_tuple("Bind").field(v).finish_non_exhaustive(),
            Node::BindRecv(v, _) => f.debug_tuple("BindRecv").field(v).finish_non_exhaustive(),
            Node::Combine(a, b) => f.debug_tuple("Combine").field(a).field(b).finish(),
            Node::For { cond, post, body } => f
                .debug_struct("For")
                .field("cond", &cond.is_some())
                .field("post", &post.is_some())
                .field("body", body)
                .finish(),
            Node::Absorb(signal, body) => f.debug_tuple("Absorb").field(signal).field(body).finish(),
            Node::YieldFrom(inner) => f.debug_tuple("YieldFrom").field(inner).finish(),
            _ => f.write_str(self.kind()),
        }
    }
}
