use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::{
    binding::Binding,
    resolve::{DeclId, Resolution},
    syntax::{SyntaxKind, SyntaxNode},
};

/// Mark every candidate that an identifier in `body` refers to.
///
/// Only the declaration an identifier is linked to counts, so a shadowing
/// declaration of the same name in a nested scope does not keep the
/// candidate alive.
pub fn mark_used(
    candidates: &mut HashMap<DeclId, Binding>,
    body: &SyntaxNode,
    resolution: &Resolution,
) {
    let names = candidates
        .values()
        .map(|binding| binding.name.as_str().to_string())
        .collect::<HashSet<_>>();
    let mut remaining = candidates.len();

    let idents = body
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| token.kind() == SyntaxKind::TOKEN_IDENT);
    for ident in idents {
        if remaining == 0 {
            break;
        }
        if ident.text() == "_" || !names.contains(ident.text()) {
            continue;
        }
        let Some(decl) = resolution.referent(&ident) else {
            continue;
        };
        if let Some(binding) = candidates.get_mut(&decl) {
            if !binding.is_used() {
                trace!(name = ident.text(), offset = ?ident.text_range().start(), "used");
                binding.mark_used();
                remaining -= 1;
            }
        }
    }
}
