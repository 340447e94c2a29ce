//! Error taxonomy for scaffolding runs
//!
//! Anticipated failures get their own variant so the CLI can report them
//! with tailored guidance. Everything else (I/O, JSON parsing, the package
//! manager subprocess) propagates transparently as a generic fatal error.

use crate::toolkit::ProjectLanguage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Unknown extension type; carries the valid set for the CLI to print
    #[error("extension type \"{requested}\" does not exist")]
    UnknownType {
        requested: String,
        valid: Vec<String>,
    },

    #[error("destination {} already exists and is not a directory", .path.display())]
    DestinationNotADirectory { path: PathBuf },

    #[error("destination {} already exists and is not an empty directory", .path.display())]
    DestinationNotEmpty { path: PathBuf },

    /// No template ships for the requested type/language pair
    #[error("bootstrapping {extension_type}s in {language} is not yet supported")]
    UnsupportedTemplate {
        extension_type: String,
        language: ProjectLanguage,
    },

    /// Unanticipated I/O, parse, or subprocess failure
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
