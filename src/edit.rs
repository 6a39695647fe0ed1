use rowan::{GreenToken, TextSize};

use crate::{
    syntax::{SyntaxKind, SyntaxNode},
    unused::Unused,
};

/// Rewrites the declaring identifier of every `unused` binding to `_`
///
/// Returns a new tree; green nodes off the edited paths are shared with
/// `root`.
pub fn blank_unused(root: &SyntaxNode, unused: &[Unused]) -> SyntaxNode {
    let mut offsets = unused
        .iter()
        .map(|result| result.binding.name.ident().text_range().start())
        .collect::<Vec<_>>();
    offsets.sort_unstable();
    offsets.dedup();

    // back to front, so that the offsets of pending edits stay valid
    let mut root = root.clone();
    for offset in offsets.into_iter().rev() {
        if let Some(green) = blank_at(&root, offset) {
            root = SyntaxNode::new_root(green);
        }
    }
    root
}

fn blank_at(root: &SyntaxNode, offset: TextSize) -> Option<rowan::GreenNode> {
    let token = root.token_at_offset(offset).right_biased()?;
    if token.kind() != SyntaxKind::TOKEN_IDENT || token.text_range().start() != offset {
        return None;
    }
    if token.text() == "_" {
        return None;
    }
    Some(token.replace_with(GreenToken::new(SyntaxKind::TOKEN_IDENT.into(), "_")))
}
