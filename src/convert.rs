use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::entry::parse_bibtex;
use crate::error::{Error, Result};
use crate::ris::to_ris;

pub fn bibtex_to_ris(src: &str) -> Result<String> {
    let entries = parse_bibtex(src)?;
    Ok(to_ris(&entries))
}

pub fn read_text_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::InputNotFound(path.to_owned()),
        _ => Error::InputRead {
            path: path.to_owned(),
            source,
        },
    })
}

/// Write `text` to `path`, replacing any existing file.
pub fn write_text_file(text: &str, path: &Path) -> Result<()> {
    fs::write(path, text).map_err(|source| Error::OutputWrite {
        path: path.to_owned(),
        source,
    })
}

/// Nothing is written when the input cannot be read or parsed.
pub fn bibtex_to_ris_file(input: &Path, output: &Path) -> Result<()> {
    info!(input = %input.display(), output = %output.display(), "converting");

    let content = read_text_file(input)?;
    debug!(bytes = content.len(), "read bibtex source");

    let ris = bibtex_to_ris(&content)?;
    write_text_file(&ris, output)?;

    debug!(bytes = ris.len(), "wrote ris output");
    Ok(())
}
