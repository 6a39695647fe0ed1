//! Blank unused receivers, parameters and named results in `.go` files.

mod binding;
mod edit;
mod error;
pub mod report;
pub mod resolve;
mod resolve_tests;
mod scope;
pub mod syntax;
mod unused;
mod unused_tests;
mod usage;

pub use binding::{Binding, BindingKind};
pub use edit::blank_unused;
pub use error::{Error, Result};
pub use scope::{scopes, Scope};
pub use unused::{Rewrite, Settings, Unused};
