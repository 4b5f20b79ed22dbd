//! Errors reported by grammar rewrites.

use thiserror::Error;

use cfg_rewrite_grammar::GrammarError;

/// A rewrite failure. The grammar is left unchanged when one is returned.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RewriteError {
    /// The grammar rejected the rewritten production list.
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    /// The nonterminal derives itself alone, so left recursion cannot be eliminated.
    #[error("nonterminal `{nonterminal}` derives itself")]
    Cycle { nonterminal: String },
    /// Left recursion through a nullable prefix, which substitution does not remove.
    #[error("production `{production}` of `{nonterminal}` is left-recursive behind a nullable prefix")]
    HiddenLeftRecursion {
        nonterminal: String,
        production: String,
    },
    /// The rewritten production list grew past the configured limit.
    #[error("more than {limit} productions while rewriting `{nonterminal}`")]
    TooManyProductions { limit: usize, nonterminal: String },
    /// Left recursion remained after the rewrite.
    #[error("left recursion elimination did not converge: production `{production}` is still left-recursive")]
    NotConverged { production: String },
}
