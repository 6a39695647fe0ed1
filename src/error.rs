use std::{io, path::PathBuf};

use crate::syntax::SyntaxError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}", describe_errors(.errors))]
    Parse { errors: Vec<SyntaxError> },
}

/// First error, plus how many follow it
fn describe_errors(errors: &[SyntaxError]) -> String {
    match errors {
        [] => "no errors".to_string(),
        [error] => error.to_string(),
        [error, rest @ ..] => format!("{} (and {} more errors)", error, rest.len()),
    }
}
