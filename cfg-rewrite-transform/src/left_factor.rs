//! Left-factoring.
//!
//! Alternatives of a nonterminal that start with the same symbol are merged:
//!
//! ```text
//! N -> γ δ1 | ... | γ δn
//! ```
//!
//! becomes
//!
//! ```text
//! N -> γ N'
//! N' -> δ1 | ... | δn
//! ```
//!
//! where `γ` is the longest common prefix of the group.

use std::collections::VecDeque;

use log::{debug, trace};

use cfg_rewrite_grammar::{Grammar, ProductionDraft};
use cfg_rewrite_symbol::Symbol;

use crate::error::RewriteError;
use crate::options::RewriteOptions;
use crate::rewrite::Rewrite;

/// Left-factors the grammar until no two alternatives of a nonterminal start with the
/// same symbol. Returns the helper nonterminals in creation order.
pub fn left_factor(grammar: &mut Grammar, options: &RewriteOptions) -> Result<Vec<Symbol>, RewriteError> {
    let mut worklist: VecDeque<Symbol> = grammar.nonterminals().collect();
    let mut rewrite = Rewrite::new(grammar, options);
    while let Some(lhs) = worklist.pop_front() {
        while let Some(group) = first_shared_group(rewrite.drafts(), lhs) {
            match factor_group(&mut rewrite, lhs, &group) {
                Ok(helper) => worklist.push_back(helper),
                Err(error) => return Err(rewrite.abort(error)),
            }
        }
    }
    rewrite.commit(|_, _| Ok(()))
}

/// Finds the alternatives of `lhs` that share a first symbol with an earlier
/// alternative. Groups are tried in order of their first appearance.
fn first_shared_group(drafts: &[ProductionDraft], lhs: Symbol) -> Option<Vec<usize>> {
    let alternatives: Vec<usize> = (0..drafts.len())
        .filter(|&i| drafts[i].lhs == lhs)
        .collect();
    for (n, &i) in alternatives.iter().enumerate() {
        let Some(&first) = drafts[i].rhs.first() else {
            continue;
        };
        let group: Vec<usize> = alternatives[n..]
            .iter()
            .copied()
            .filter(|&j| drafts[j].rhs.first() == Some(&first))
            .collect();
        if group.len() >= 2 {
            return Some(group);
        }
    }
    None
}

fn common_prefix_len(drafts: &[ProductionDraft], group: &[usize]) -> usize {
    let first = &drafts[group[0]].rhs[..];
    group[1..].iter().fold(first.len(), |len, &i| {
        first[..len]
            .iter()
            .zip(drafts[i].rhs.iter())
            .take_while(|(a, b)| a == b)
            .count()
    })
}

/// Replaces the first member of the group with `lhs -> γ N'`, removes the other
/// members, and appends the alternatives of `N'`.
fn factor_group(rewrite: &mut Rewrite<'_>, lhs: Symbol, group: &[usize]) -> Result<Symbol, RewriteError> {
    let prefix_len = common_prefix_len(rewrite.drafts(), group);
    let helper = rewrite.fresh_helper(lhs);
    let helper_name = rewrite.name(helper);
    trace!(
        "factoring {} alternatives of `{}` with a common prefix of {} symbols",
        group.len(),
        rewrite.name(lhs),
        prefix_len
    );

    let mut factored = Vec::with_capacity(rewrite.drafts().len() + 1);
    let mut tails = Vec::with_capacity(group.len());
    for (i, draft) in rewrite.drafts().iter().enumerate() {
        if !group.contains(&i) {
            factored.push(draft.clone());
            continue;
        }
        if i == group[0] {
            let mut rhs = draft.rhs[..prefix_len].to_vec();
            rhs.push(helper);
            factored.push(ProductionDraft::new(draft.name.clone(), lhs, rhs));
        }
        tails.push(draft.rhs[prefix_len..].to_vec());
    }
    for (k, tail) in tails.into_iter().enumerate() {
        factored.push(ProductionDraft::new(
            format!("{} #{}", helper_name, k + 1),
            helper,
            tail,
        ));
    }

    debug!(
        "introduced `{}` for {} alternatives of `{}`",
        helper_name,
        group.len(),
        rewrite.name(lhs)
    );
    rewrite.set_drafts(factored, lhs)?;
    Ok(helper)
}
