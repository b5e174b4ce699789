use std::collections::{BTreeMap, HashMap};

use biblatex::{Bibliography, Chunk, Entry, ParseError, RawBibliography, RetrievalError};
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const AUTHOR: &str = "author";

/// A person record split into name components.
///
/// "Donald E. Knuth" becomes `first_names = ["Donald", "E."]` and
/// `last_names = ["Knuth"]`. A braced group such as `{Barnes and Noble}`
/// stays one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
}

impl Person {
    pub fn first_name(&self) -> &str {
        self.first_names.first().map_or("", String::as_str)
    }

    pub fn last_name(&self) -> &str {
        self.last_names.first().map_or("", String::as_str)
    }

    /// `None` for a name with no parts at all, e.g. `author = {}`.
    fn new(person: biblatex::Person, groups: &[&str]) -> Option<Self> {
        let blank = [&person.given_name, &person.name, &person.prefix, &person.suffix]
            .iter()
            .all(|part| part.trim().is_empty());
        if blank {
            return None;
        }
        Some(Person {
            first_names: components(&person.given_name, groups),
            last_names: components(&person.name, groups),
        })
    }
}

// Whitespace-separated words, except that a braced group from the source
// field is never split.
fn components(name: &str, groups: &[&str]) -> Vec<String> {
    let mut parts = Vec::new();
    let mut rest = name.trim_start();
    while !rest.is_empty() {
        let start = groups
            .iter()
            .filter(|group| rest.starts_with(**group))
            .map(|group| group.len())
            .max()
            .unwrap_or(0);
        let end = rest[start..]
            .find(char::is_whitespace)
            .map_or(rest.len(), |i| start + i);
        parts.push(rest[..end].to_owned());
        rest = rest[end..].trim_start();
    }
    parts
}

/// One parsed BibTeX entry, detached from the parser's types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BibliographicEntry {
    pub key: String,
    /// as written in the source, e.g. "conference" or "Article"
    pub entry_type: String,
    /// lowercase field name to value
    pub fields: BTreeMap<String, String>,
    pub persons: BTreeMap<String, Vec<Person>>,
}

impl BibliographicEntry {
    /// Value of a field, `""` when the entry does not have it.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map_or("", String::as_str)
    }

    pub fn persons(&self, role: &str) -> &[Person] {
        self.persons.get(role).map(Vec::as_slice).unwrap_or_default()
    }

    fn fields(from: &Entry) -> impl Iterator<Item = (String, String)> + '_ {
        from.fields.iter().map(|(key, value)| {
            let value = value
                .iter()
                .map(|v| match &v.v {
                    Chunk::Math(s) => format!("${s}$"),
                    c => c.get().to_owned(),
                })
                .collect();
            (key.to_lowercase(), value)
        })
    }

    fn braced_groups(e: &Entry) -> Vec<&str> {
        e.fields
            .get(AUTHOR)
            .into_iter()
            .flatten()
            .filter_map(|chunk| match &chunk.v {
                Chunk::Verbatim(s) => Some(s.trim()),
                _ => None,
            })
            .filter(|s| s.contains(char::is_whitespace))
            .collect()
    }

    fn authors(e: &Entry) -> Vec<Person> {
        let groups = Self::braced_groups(e);
        match e.author() {
            Ok(authors) => authors
                .into_iter()
                .filter_map(|person| Person::new(person, &groups))
                .collect(),
            Err(RetrievalError::Missing(_)) => Vec::new(),
            Err(err) => {
                warn!(key = %e.key, error = ?err, "ignoring unreadable author list");
                Vec::new()
            }
        }
    }

    fn new(e: &Entry, entry_type: &str) -> Self {
        let mut persons = BTreeMap::new();
        let authors = Self::authors(e);
        if !authors.is_empty() {
            persons.insert(AUTHOR.to_owned(), authors);
        }

        BibliographicEntry {
            key: e.key.to_owned(),
            entry_type: entry_type.to_owned(),
            fields: Self::fields(e).collect(),
            persons,
        }
    }
}

fn malformed(err: ParseError) -> Error {
    Error::MalformedBibtex(err.to_string())
}

/// Parse BibTeX source into entries, keeping the order of the input.
///
/// `biblatex` normalizes entry types (`conference` becomes `inproceedings`,
/// unknown types collapse), so the type is taken from the raw parse instead.
pub fn parse_bibtex(src: &str) -> Result<Vec<BibliographicEntry>> {
    let bibliography = Bibliography::parse(src).map_err(malformed)?;
    let raw = RawBibliography::parse(src).map_err(malformed)?;
    let kinds: HashMap<&str, &str> = raw
        .entries
        .iter()
        .map(|entry| (entry.v.key.v, entry.v.kind.v))
        .collect();

    let entries: Vec<_> = bibliography
        .iter()
        .map(|e| {
            let normalized = e.entry_type.to_string();
            let kind = kinds.get(e.key.as_str()).copied().unwrap_or(normalized.as_str());
            BibliographicEntry::new(e, kind)
        })
        .collect();
    debug!(count = entries.len(), "parsed bibtex entries");
    Ok(entries)
}
