//! Typed views over the untyped syntax tree.

use super::{SyntaxKind::*, SyntaxNode, SyntaxToken};

pub trait TypedNode: Sized {
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn node(&self) -> &SyntaxNode;
}

macro_rules! typed_nodes {
    ($($(#[$meta:meta])* $name:ident => $kind:ident,)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            pub struct $name(SyntaxNode);

            impl TypedNode for $name {
                fn cast(node: SyntaxNode) -> Option<Self> {
                    if node.kind() == $kind {
                        Some(Self(node))
                    } else {
                        None
                    }
                }

                fn node(&self) -> &SyntaxNode {
                    &self.0
                }
            }
        )*
    };
}

typed_nodes! {
    SourceFile => NODE_SOURCE_FILE,
    /// Function or method declaration, with or without body
    FuncDecl => NODE_FUNC_DECL,
    FuncLit => NODE_FUNC_LIT,
    Receiver => NODE_RECEIVER,
    ParamList => NODE_PARAM_LIST,
    /// One group of parameters sharing a type: `a, b int`
    Param => NODE_PARAM,
    /// Result of a signature: either a parenthesized list or a single type
    Results => NODE_RESULT,
    Block => NODE_BLOCK,
    NameRef => NODE_NAME_REF,
}

fn child<N: TypedNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

fn children<N: TypedNode>(parent: &SyntaxNode) -> impl Iterator<Item = N> {
    parent.children().filter_map(N::cast)
}

/// A declaring identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    node: SyntaxNode,
    ident: SyntaxToken,
}

impl TypedNode for Name {
    fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() != NODE_NAME {
            return None;
        }
        let ident = node
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| token.kind() == TOKEN_IDENT)?;
        Some(Name { node, ident })
    }

    fn node(&self) -> &SyntaxNode {
        &self.node
    }
}

impl Name {
    pub fn ident(&self) -> &SyntaxToken {
        &self.ident
    }

    pub fn as_str(&self) -> &str {
        self.ident.text()
    }
}

impl NameRef {
    pub fn ident(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| token.kind() == TOKEN_IDENT)
    }
}

impl SourceFile {
    pub fn func_decls(&self) -> impl Iterator<Item = FuncDecl> {
        children(&self.0)
    }
}

impl FuncDecl {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn receiver(&self) -> Option<Receiver> {
        child(&self.0)
    }

    pub fn params(&self) -> Option<ParamList> {
        child(&self.0)
    }

    pub fn results(&self) -> Option<Results> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }
}

impl FuncLit {
    pub fn params(&self) -> Option<ParamList> {
        child(&self.0)
    }

    pub fn results(&self) -> Option<Results> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }
}

impl Receiver {
    pub fn param_list(&self) -> Option<ParamList> {
        child(&self.0)
    }
}

impl Results {
    /// `None` for a single unparenthesized result type
    pub fn param_list(&self) -> Option<ParamList> {
        child(&self.0)
    }
}

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> {
        children(&self.0)
    }
}

impl Param {
    pub fn names(&self) -> impl Iterator<Item = Name> {
        children(&self.0)
    }
}
