use std::fmt;

use crate::{resolve::DeclId, syntax::ast::Name};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Receiver,
    Parameter,
    Result,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            BindingKind::Receiver => "receiver",
            BindingKind::Parameter => "parameter",
            BindingKind::Result => "named result",
        };
        fmt.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub name: Name,
    pub decl: DeclId,
    pub kind: BindingKind,
    used: bool,
}

impl PartialEq for Binding {
    fn eq(&self, other: &Self) -> bool {
        self.decl == other.decl
    }
}
impl Eq for Binding {}

impl Binding {
    pub fn new(name: Name, decl: DeclId, kind: BindingKind) -> Self {
        Binding {
            name,
            decl,
            kind,
            used: false,
        }
    }

    pub fn mark_used(&mut self) {
        self.used = true;
    }

    pub fn is_used(&self) -> bool {
        self.used
    }
}
