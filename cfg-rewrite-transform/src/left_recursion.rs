//! Elimination of left recursion.
//!
//! Nonterminals are put in creation order `N1, ..., Nk`. For each `Ni`, productions
//! `Ni -> Nj α` with `j < i` are expanded by the current productions of `Nj`, and
//! then direct left recursion of `Ni` is replaced by right recursion through a helper
//! nonterminal `Ni'`:
//!
//! ```text
//! Ni -> Ni α1 | ... | Ni αm | β1 | ... | βn
//! ```
//!
//! becomes
//!
//! ```text
//! Ni -> β1 Ni' | ... | βn Ni'
//! Ni' -> α1 Ni' | ... | αm Ni' | ε
//! ```

use log::{debug, trace, warn};

use cfg_rewrite_classify::{GrammarClassifyExt, SymbolBitMatrix};
use cfg_rewrite_grammar::{AsRuleRef, Grammar, ProductionDraft};
use cfg_rewrite_symbol::Symbol;

use crate::error::RewriteError;
use crate::options::RewriteOptions;
use crate::rewrite::Rewrite;

/// Eliminates left recursion from the grammar. Returns the helper nonterminals in
/// creation order.
///
/// The grammar must be free of cycles and of left recursion behind nullable prefixes.
/// Epsilon productions are allowed otherwise. Nothing is changed when an error is returned.
pub fn eliminate_left_recursions(
    grammar: &mut Grammar,
    options: &RewriteOptions,
) -> Result<Vec<Symbol>, RewriteError> {
    check_preconditions(grammar)?;

    let order: Vec<Symbol> = grammar.nonterminals().collect();
    let nullable = grammar.nullable_symbols();
    let left_corners = SymbolBitMatrix::nullable_left_corners(&*grammar, &nullable);
    debug!("eliminating left recursion over {} nonterminals", order.len());

    let mut rewrite = Rewrite::new(grammar, options);
    for (i, &lhs) in order.iter().enumerate() {
        let step = substitute_left_corners(&mut rewrite, lhs, &order[..i], &left_corners)
            .and_then(|()| eliminate_direct(&mut rewrite, lhs));
        if let Err(error) = step {
            return Err(rewrite.abort(error));
        }
    }
    rewrite.commit(check_converged)
}

fn check_preconditions(grammar: &Grammar) -> Result<(), RewriteError> {
    let cycles = grammar.cycles();
    if let Some(sym) = cycles.cyclic_symbols().next() {
        return Err(RewriteError::Cycle {
            nonterminal: grammar.display_name(sym).into_owned(),
        });
    }
    let left_recursion = grammar.left_recursion();
    for production in grammar.productions() {
        if left_recursion
            .hidden_left_corner(production.as_rule_ref())
            .is_some()
        {
            return Err(RewriteError::HiddenLeftRecursion {
                nonterminal: grammar.display_name(production.lhs()).into_owned(),
                production: production.name().to_string(),
            });
        }
    }
    Ok(())
}

/// Expands `lhs -> Nj α` for every earlier `Nj` that can start a derivation of `lhs`.
/// Other earlier nonterminals are left in place, so a grammar without left recursion
/// is not changed.
fn substitute_left_corners(
    rewrite: &mut Rewrite<'_>,
    lhs: Symbol,
    earlier: &[Symbol],
    left_corners: &SymbolBitMatrix,
) -> Result<(), RewriteError> {
    for &corner in earlier {
        if !left_corners[(corner, lhs)] {
            continue;
        }
        let starts_with_corner =
            |draft: &ProductionDraft| draft.lhs == lhs && draft.rhs.first() == Some(&corner);
        if !rewrite.drafts().iter().any(starts_with_corner) {
            continue;
        }
        let expansions: Vec<&[Symbol]> = rewrite
            .drafts()
            .iter()
            .filter(|draft| draft.lhs == corner)
            .map(|draft| &draft.rhs[..])
            .collect();
        let mut substituted = Vec::with_capacity(rewrite.drafts().len() + expansions.len());
        for draft in rewrite.drafts() {
            if !starts_with_corner(draft) {
                substituted.push(draft.clone());
                continue;
            }
            trace!(
                "substituting {} productions of `{}` into `{}`",
                expansions.len(),
                rewrite.name(corner),
                draft.name
            );
            for expansion in &expansions {
                let mut rhs = expansion.to_vec();
                rhs.extend_from_slice(&draft.rhs[1..]);
                substituted.push(ProductionDraft::new(draft.name.clone(), lhs, rhs));
            }
        }
        rewrite.set_drafts(substituted, lhs)?;
    }
    Ok(())
}

fn eliminate_direct(rewrite: &mut Rewrite<'_>, lhs: Symbol) -> Result<(), RewriteError> {
    let is_recursive = |draft: &ProductionDraft| draft.lhs == lhs && draft.is_left_recursion();
    if !rewrite.drafts().iter().any(is_recursive) {
        return Ok(());
    }
    if rewrite
        .drafts()
        .iter()
        .any(|draft| is_recursive(draft) && draft.rhs.len() == 1)
    {
        return Err(RewriteError::Cycle {
            nonterminal: rewrite.name(lhs),
        });
    }

    let helper = rewrite.fresh_helper(lhs);
    let helper_name = rewrite.name(helper);
    let mut rewritten = Vec::with_capacity(rewrite.drafts().len() + 1);
    let mut tails = vec![];
    for draft in rewrite.drafts() {
        if draft.lhs != lhs {
            rewritten.push(draft.clone());
        } else if draft.is_left_recursion() {
            let mut tail = draft.rhs[1..].to_vec();
            tail.push(helper);
            tails.push(tail);
        } else {
            let mut rhs = draft.rhs.clone();
            rhs.push(helper);
            rewritten.push(ProductionDraft::new(draft.name.clone(), lhs, rhs));
        }
    }
    let num_tails = tails.len();
    for (k, tail) in tails.into_iter().enumerate() {
        rewritten.push(ProductionDraft::new(
            format!("{} #{}", helper_name, k + 1),
            helper,
            tail,
        ));
    }
    rewritten.push(ProductionDraft::new(
        format!("{} #{}", helper_name, num_tails + 1),
        helper,
        vec![],
    ));

    if !rewritten.iter().any(|draft| draft.lhs == lhs) {
        warn!(
            "`{}` has no productions left: all of them were left-recursive",
            rewrite.name(lhs)
        );
    }
    debug!(
        "introduced `{}` for {} left-recursive productions of `{}`",
        helper_name,
        num_tails,
        rewrite.name(lhs)
    );
    rewrite.set_drafts(rewritten, lhs)
}

fn check_converged(grammar: &Grammar, drafts: &[ProductionDraft]) -> Result<(), RewriteError> {
    let view = grammar.draft_view(drafts);
    let left_recursion = view.left_recursion();
    match drafts
        .iter()
        .find(|draft| left_recursion.rule_recursion(draft.as_rule_ref()).is_some())
    {
        Some(draft) => Err(RewriteError::NotConverged {
            production: draft.name.clone(),
        }),
        None => Ok(()),
    }
}
