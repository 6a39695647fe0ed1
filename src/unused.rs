use std::{collections::HashMap, fmt, fs, path::Path};

use tracing::debug;

use crate::{
    binding::{Binding, BindingKind},
    edit,
    error::{Error, Result},
    resolve::{self, DeclId, Resolution},
    scope::{self, Scope},
    syntax::{
        self,
        ast::{Name, Param, TypedNode},
        SyntaxNode,
    },
    usage,
};

/// A binding that is never referred to within its scope
#[derive(Debug, Clone)]
pub struct Unused {
    pub scope: Scope,
    pub binding: Binding,
}

impl fmt::Display for Unused {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "Unused {}: {}",
            self.binding.kind,
            self.binding.name.as_str()
        )
    }
}

/// Which bindings besides plain parameters are checked
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    pub include_receiver: bool,
    pub include_named_results: bool,
}

/// Outcome of rewriting one source text
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub altered: bool,
    pub unused: Vec<Unused>,
    /// The text that was parsed, which the ranges in `unused` refer to
    pub source: String,
    pub text: String,
}

impl Settings {
    /// The bindings of `scope` that are eligible for blanking, by
    /// declaration identity
    fn candidates(&self, scope: &Scope, resolution: &Resolution) -> HashMap<DeclId, Binding> {
        let mut candidates = HashMap::new();
        let mut add = |name: Name, kind: BindingKind| {
            // `_` is never declared, so it never becomes a candidate
            if let Some(decl) = resolution.declaration(name.ident()) {
                candidates.insert(decl, Binding::new(name, decl, kind));
            }
        };

        if self.include_receiver {
            if let Some(name) = scope.receiver() {
                add(name, BindingKind::Receiver);
            }
        }
        for name in scope.params().iter().flat_map(Param::names) {
            add(name, BindingKind::Parameter);
        }
        if self.include_named_results {
            for name in scope.results().iter().flat_map(Param::names) {
                add(name, BindingKind::Result);
            }
        }
        candidates
    }

    /// Unused bindings of one scope, in source order
    pub fn scan(&self, scope: &Scope, resolution: &Resolution) -> Vec<Binding> {
        let Some(body) = scope.body() else {
            return Vec::new();
        };

        let mut candidates = self.candidates(scope, resolution);
        usage::mark_used(&mut candidates, body.node(), resolution);

        let mut unused = candidates
            .into_values()
            .filter(|binding| !binding.is_used())
            .collect::<Vec<_>>();
        unused.sort_unstable_by_key(|binding| binding.name.ident().text_range().start());
        debug!(%scope, unused = unused.len(), "scanned scope");
        unused
    }

    /// Unused bindings of every scope in the file, in source order
    pub fn find_unused(&self, root: &SyntaxNode) -> Vec<Unused> {
        let resolution = resolve::resolve(root);

        let mut results = scope::scopes(root)
            .flat_map(|scope| {
                self.scan(&scope, &resolution)
                    .into_iter()
                    .map(move |binding| Unused {
                        scope: scope.clone(),
                        binding,
                    })
            })
            .collect::<Vec<_>>();
        results.sort_unstable_by_key(|result| result.binding.name.ident().text_range().start());
        results
    }

    /// Parse `text` and blank every unused binding
    pub fn rewrite(&self, text: &str) -> Result<Rewrite> {
        self.rewrite_source(text.to_string())
    }

    pub fn rewrite_file(&self, path: &Path) -> Result<Rewrite> {
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.rewrite_source(source)
    }

    fn rewrite_source(&self, source: String) -> Result<Rewrite> {
        let root = syntax::parse(&source)
            .ok()
            .map_err(|errors| Error::Parse { errors })?;

        let unused = self.find_unused(&root);
        let altered = !unused.is_empty();
        let text = if altered {
            edit::blank_unused(&root, &unused).to_string()
        } else {
            source.clone()
        };
        debug!(altered, unused = unused.len(), "rewrote source");
        Ok(Rewrite {
            altered,
            unused,
            source,
            text,
        })
    }
}
