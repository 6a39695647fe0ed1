//! Name resolution over the syntax tree.
//!
//! Every declaring identifier gets a [`DeclId`] and every identifier use
//! that resolves gets a back-link to one. Uses are matched against
//! declarations by walking an arena of lexical scopes, following Go's
//! block scoping rules.

use std::{collections::HashMap, ops::Index};

use rowan::{TextRange, TextSize};
use tracing::debug;

use crate::syntax::{
    ast::{Name, NameRef, TypedNode},
    SyntaxKind::*,
    SyntaxNode, SyntaxToken,
};

/// Identity of one declaring identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Import,
    Const,
    Type,
    TypeParam,
    Var,
    Func,
    Receiver,
    Param,
    Result,
}

#[derive(Debug, Clone)]
pub struct Declaration {
    pub name: String,
    /// Range of the declaring identifier
    pub range: TextRange,
    pub kind: DeclKind,
}

/// Declarations of one file and the links from uses to them. Tokens are
/// identified by their offset, so lookups only make sense for tokens of
/// the tree that was resolved.
#[derive(Debug, Default)]
pub struct Resolution {
    declarations: Vec<Declaration>,
    declared_at: HashMap<TextSize, DeclId>,
    references: HashMap<TextSize, DeclId>,
}

impl Resolution {
    /// The declaration introduced by this declaring identifier
    pub fn declaration(&self, ident: &SyntaxToken) -> Option<DeclId> {
        self.declared_at.get(&ident.text_range().start()).copied()
    }

    /// The declaration this identifier use refers to
    pub fn referent(&self, ident: &SyntaxToken) -> Option<DeclId> {
        self.references.get(&ident.text_range().start()).copied()
    }

    /// Number of uses linked to `decl`
    pub fn reference_count(&self, decl: DeclId) -> usize {
        self.references.values().filter(|id| **id == decl).count()
    }
}

impl Index<DeclId> for Resolution {
    type Output = Declaration;

    fn index(&self, id: DeclId) -> &Declaration {
        &self.declarations[id.0 as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScopeId(u32);

#[derive(Debug, Default)]
struct ScopeData {
    parent: Option<ScopeId>,
    names: HashMap<String, DeclId>,
}

struct Resolver {
    scopes: Vec<ScopeData>,
    current: ScopeId,
    resolution: Resolution,
}

pub fn resolve(root: &SyntaxNode) -> Resolution {
    let mut resolver = Resolver {
        scopes: vec![ScopeData::default()],
        current: ScopeId(0),
        resolution: Resolution::default(),
    };
    resolver.declare_package(root);
    resolver.walk_children(root);

    let resolution = resolver.resolution;
    debug!(
        scopes = resolver.scopes.len(),
        declarations = resolution.declarations.len(),
        references = resolution.references.len(),
        "resolved file"
    );
    resolution
}

fn names(node: &SyntaxNode) -> impl Iterator<Item = Name> {
    node.children().filter_map(Name::cast)
}

/// Specs directly inside a top level declaration are declared up front
fn is_top_level(spec: &SyntaxNode) -> bool {
    spec.parent()
        .and_then(|decl| decl.parent())
        .map_or(false, |file| file.kind() == NODE_SOURCE_FILE)
}

impl Resolver {
    fn push_scope(&mut self) {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(ScopeData {
            parent: Some(self.current),
            names: HashMap::new(),
        });
        self.current = id;
    }

    fn pop_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current.0 as usize].parent {
            self.current = parent;
        }
    }

    fn declare(&mut self, name: &Name, kind: DeclKind) {
        if name.as_str() == "_" {
            return;
        }
        let id = DeclId(self.resolution.declarations.len() as u32);
        let range = name.ident().text_range();
        self.resolution.declarations.push(Declaration {
            name: name.as_str().to_string(),
            range,
            kind,
        });
        self.resolution.declared_at.insert(range.start(), id);
        self.scopes[self.current.0 as usize]
            .names
            .insert(name.as_str().to_string(), id);
    }

    /// `a, err := ...` only declares the names that are new to the
    /// current scope, the others are assigned to
    fn redeclare(&mut self, name: &Name) {
        let existing = self.scopes[self.current.0 as usize]
            .names
            .get(name.as_str())
            .copied();
        match existing {
            Some(id) => {
                self.resolution
                    .references
                    .insert(name.ident().text_range().start(), id);
            }
            None => self.declare(name, DeclKind::Var),
        }
    }

    fn lookup(&self, name: &str) -> Option<DeclId> {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            let data = &self.scopes[id.0 as usize];
            if let Some(decl) = data.names.get(name) {
                return Some(*decl);
            }
            scope = data.parent;
        }
        None
    }

    fn reference(&mut self, name_ref: &NameRef) {
        let Some(ident) = name_ref.ident() else {
            return;
        };
        if ident.text() == "_" {
            return;
        }
        if let Some(decl) = self.lookup(ident.text()) {
            self.resolution
                .references
                .insert(ident.text_range().start(), decl);
        }
    }

    /// Package level names are visible in the whole file, regardless of
    /// declaration order
    fn declare_package(&mut self, root: &SyntaxNode) {
        for decl in root.children() {
            match decl.kind() {
                NODE_FUNC_DECL => {
                    let is_method = decl.children().any(|child| child.kind() == NODE_RECEIVER);
                    if !is_method {
                        for name in names(&decl) {
                            self.declare(&name, DeclKind::Func);
                        }
                    }
                }
                NODE_IMPORT_DECL | NODE_CONST_DECL | NODE_VAR_DECL | NODE_TYPE_DECL => {
                    let kind = match decl.kind() {
                        NODE_IMPORT_DECL => DeclKind::Import,
                        NODE_CONST_DECL => DeclKind::Const,
                        NODE_VAR_DECL => DeclKind::Var,
                        _ => DeclKind::Type,
                    };
                    for spec in decl.children() {
                        for name in names(&spec) {
                            self.declare(&name, kind);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn walk_children(&mut self, node: &SyntaxNode) {
        for child in node.children() {
            self.walk(&child);
        }
    }

    /// Walk every child except the declaring names
    fn walk_non_names(&mut self, node: &SyntaxNode) {
        for child in node.children() {
            if child.kind() != NODE_NAME {
                self.walk(&child);
            }
        }
    }

    fn walk(&mut self, node: &SyntaxNode) {
        match node.kind() {
            NODE_NAME_REF => {
                if let Some(name_ref) = NameRef::cast(node.clone()) {
                    self.reference(&name_ref);
                }
            }

            NODE_FUNC_DECL | NODE_FUNC_LIT => self.function(node),

            NODE_FUNC_TYPE | NODE_METHOD_SPEC => {
                self.push_scope();
                self.signature(node);
                self.pop_scope();
            }

            NODE_BLOCK
            | NODE_IF_STMT
            | NODE_FOR_STMT
            | NODE_SWITCH_STMT
            | NODE_TYPE_SWITCH_STMT
            | NODE_SELECT_STMT
            | NODE_CASE_CLAUSE
            | NODE_COMM_CLAUSE => {
                self.push_scope();
                self.walk_children(node);
                self.pop_scope();
            }

            NODE_SHORT_VAR_DECL | NODE_RANGE_CLAUSE => {
                self.walk_non_names(node);
                for name in names(node) {
                    self.redeclare(&name);
                }
            }

            NODE_VAR_SPEC | NODE_CONST_SPEC => {
                self.walk_non_names(node);
                if !is_top_level(node) {
                    let kind = if node.kind() == NODE_CONST_SPEC {
                        DeclKind::Const
                    } else {
                        DeclKind::Var
                    };
                    for name in names(node) {
                        self.declare(&name, kind);
                    }
                }
            }

            NODE_TYPE_SPEC => {
                if !is_top_level(node) {
                    for name in names(node) {
                        self.declare(&name, DeclKind::Type);
                    }
                }
                self.push_scope();
                self.walk_non_names(node);
                self.pop_scope();
            }

            NODE_TYPE_PARAM_LIST => self.type_params(node),

            // declared with the package
            NODE_IMPORT_SPEC => {}

            _ => self.walk_children(node),
        }
    }

    fn type_params(&mut self, list: &SyntaxNode) {
        for param in list.children() {
            for name in names(&param) {
                self.declare(&name, DeclKind::TypeParam);
            }
        }
        for param in list.children() {
            self.walk_non_names(&param);
        }
    }

    /// Function declarations and literals: type parameters, receiver,
    /// parameters, results and the top level of the body share one scope
    fn function(&mut self, node: &SyntaxNode) {
        self.push_scope();
        for child in node.children() {
            if child.kind() == NODE_TYPE_PARAM_LIST {
                self.type_params(&child);
            }
        }
        self.signature(node);
        for child in node.children() {
            if child.kind() == NODE_BLOCK {
                self.walk_children(&child);
            }
        }
        self.pop_scope();
    }

    /// Resolve the parameter types, then declare the parameter names,
    /// which are not visible within the signature itself
    fn signature(&mut self, node: &SyntaxNode) {
        let mut lists: Vec<(SyntaxNode, DeclKind)> = Vec::new();
        for child in node.children() {
            match child.kind() {
                NODE_RECEIVER => lists.extend(
                    child
                        .children()
                        .filter(|list| list.kind() == NODE_PARAM_LIST)
                        .map(|list| (list, DeclKind::Receiver)),
                ),
                NODE_PARAM_LIST => lists.push((child, DeclKind::Param)),
                NODE_RESULT => {
                    match child.children().find(|list| list.kind() == NODE_PARAM_LIST) {
                        Some(list) => lists.push((list, DeclKind::Result)),
                        // unparenthesized result type
                        None => self.walk_children(&child),
                    }
                }
                _ => {}
            }
        }

        for (list, _) in &lists {
            for param in list.children() {
                self.walk_non_names(&param);
            }
        }
        for (list, kind) in &lists {
            for param in list.children() {
                for name in names(&param) {
                    self.declare(&name, *kind);
                }
            }
        }
    }
}
