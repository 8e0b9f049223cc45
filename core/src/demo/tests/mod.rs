//! Tests for the demo language runtime
//!
//! End-to-end: JSON or builder programs are compiled by [`Runtime`] and
//! driven through generators.
//!
//! [`Runtime`]: crate::demo::Runtime

mod helpers;
