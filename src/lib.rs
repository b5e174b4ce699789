//! Convert BibTeX bibliographies to RIS.
//!
//! BibTeX parsing is done by the [`biblatex`] crate. Each parsed entry is
//! copied into a [`BibliographicEntry`] and mapped onto an [`RisRecord`]:
//!
//! ```rust
//! let bib = "@manual{key1, author = {John Smith}, title = {A Title}, year = {2020}}";
//! let ris = bib2ris::bibtex_to_ris(bib).unwrap();
//! assert!(ris.starts_with("TY  - MANUAL\nAU  - John Smith\nTI  - A Title"));
//! assert!(ris.ends_with("ER  - "));
//! ```

mod convert;
mod entry;
mod error;
mod ris;

pub use crate::convert::{bibtex_to_ris, bibtex_to_ris_file, read_text_file, write_text_file};
pub use crate::entry::{parse_bibtex, BibliographicEntry, Person, AUTHOR};
pub use crate::error::{Error, Result};
pub use crate::ris::{to_ris, RisLine, RisRecord, RisTag};
