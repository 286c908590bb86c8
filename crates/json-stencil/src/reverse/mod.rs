//! Result → context reconstruction.
//!
//! [`reverse_template`] derives a reverse template from the forward
//! template: an object shaped like the context whose leaves are pointers into
//! the result.
//! [`reconstruct`] follows those pointers in a concrete result to rebuild the
//! context.
//!
//! Only exact-match placeholders take part, since interpolated strings have
//! lost the one-to-one mapping between a context value and a result location.
//!
//! When two placeholders disagree on the shape of a context location, the
//! deeper mapping wins: an object always replaces a leaf, a leaf never
//! replaces an object. Two leaves at the same location are last-write-wins
//! in template traversal order.

pub mod apply;
pub mod build;

pub use apply::reconstruct;
pub use build::reverse_template;
