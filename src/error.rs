use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Usage(String),

    #[error("The file {} was not found.", .0.display())]
    InputNotFound(PathBuf),

    #[error("An error occurred: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("An error occurred: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed BibTeX: {0}")]
    MalformedBibtex(String),
}

impl Error {
    /// Process exit status reported by the `bib2ris` binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 1,
            Self::InputNotFound(_) => 2,
            Self::InputRead { .. } => 3,
            Self::OutputWrite { .. } => 4,
            Self::MalformedBibtex(_) => 5,
        }
    }

    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::InputNotFound(_) | Self::InputRead { .. })
    }
}
