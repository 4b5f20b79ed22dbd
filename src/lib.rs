//! Library for building context-free grammars and rewriting them for top-down parsing.
//!
//! The grammar owns its symbols and productions. Left-recursion elimination and
//! left-factoring are provided as extension traits under the `transform` feature.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

#[cfg(feature = "classify")]
pub use cfg_rewrite_classify as classify;
pub use cfg_rewrite_grammar::*;
pub use cfg_rewrite_symbol::*;
#[cfg(feature = "transform")]
pub use cfg_rewrite_transform as transform;

#[cfg(feature = "classify")]
pub use cfg_rewrite_classify::GrammarClassifyExt;
#[cfg(feature = "transform")]
pub use cfg_rewrite_transform::{GrammarRewriteExt, RewriteError, RewriteOptions};
