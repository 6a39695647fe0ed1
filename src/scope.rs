use std::fmt;

use crate::syntax::{
    ast::{Block, FuncDecl, FuncLit, Name, Param, ParamList, Results, TypedNode},
    SyntaxNode,
};

/// Function-like construct that declares receiver, parameter and result
/// bindings for its body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Function(FuncDecl),
    Literal(FuncLit),
}

impl fmt::Display for Scope {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scope::Function(decl) => {
                let what = if decl.receiver().is_some() {
                    "method"
                } else {
                    "function"
                };
                match decl.name() {
                    Some(name) => write!(fmt, "{} {}", what, name.as_str()),
                    None => write!(fmt, "{}", what),
                }
            }
            Scope::Literal(_) => write!(fmt, "function literal"),
        }
    }
}

impl Scope {
    /// Construct a new Scope *if* this is a function declaration or literal
    pub fn new(node: &SyntaxNode) -> Option<Self> {
        FuncDecl::cast(node.clone())
            .map(Scope::Function)
            .or_else(|| FuncLit::cast(node.clone()).map(Scope::Literal))
    }

    /// Name of the receiver, if this is a method with a named receiver.
    /// Only the first parameter of the receiver list counts; a malformed
    /// list contributes nothing.
    pub fn receiver(&self) -> Option<Name> {
        match self {
            Scope::Function(decl) => decl
                .receiver()?
                .param_list()?
                .params()
                .next()?
                .names()
                .next(),
            Scope::Literal(_) => None,
        }
    }

    pub fn params(&self) -> Vec<Param> {
        let list = match self {
            Scope::Function(decl) => decl.params(),
            Scope::Literal(lit) => lit.params(),
        };
        list.iter().flat_map(ParamList::params).collect()
    }

    /// Result groups; empty when the results are a single unnamed type
    pub fn results(&self) -> Vec<Param> {
        let results = match self {
            Scope::Function(decl) => decl.results(),
            Scope::Literal(lit) => lit.results(),
        };
        results
            .as_ref()
            .and_then(Results::param_list)
            .iter()
            .flat_map(ParamList::params)
            .collect()
    }

    /// `None` for a declaration without body
    pub fn body(&self) -> Option<Block> {
        match self {
            Scope::Function(decl) => decl.body(),
            Scope::Literal(lit) => lit.body(),
        }
    }
}

/// Every scope below `root`, in document order, outer before inner
pub fn scopes(root: &SyntaxNode) -> impl Iterator<Item = Scope> {
    root.descendants().filter_map(|node| Scope::new(&node))
}
