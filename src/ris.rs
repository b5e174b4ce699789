//! RIS records and the mapping from BibTeX entries onto them.
//!
//! Every entry becomes one record with a fixed line order:
//!
//! ```text
//! TY  - MANUAL
//! AU  - John Smith
//! TI  - A Title
//! PY  - 2020
//! UR  - http://example.com
//! N1  - A note
//! ER  -
//! ```
//!
//! `TI`, `PY`, `UR` and `N1` are always present, empty when the entry lacks
//! the field. Records are separated by one blank line.

use std::fmt;

use crate::entry::{BibliographicEntry, Person, AUTHOR};

pub const SEPARATOR: &str = "  - ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RisTag {
    Type,
    Author,
    Title,
    PublicationYear,
    Url,
    Notes,
    EndOfReference,
}

impl RisTag {
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Type => "TY",
            Self::Author => "AU",
            Self::Title => "TI",
            Self::PublicationYear => "PY",
            Self::Url => "UR",
            Self::Notes => "N1",
            Self::EndOfReference => "ER",
        }
    }
}

impl fmt::Display for RisTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RisLine {
    pub tag: RisTag,
    pub value: String,
}

impl RisLine {
    pub fn new(tag: RisTag, value: impl Into<String>) -> Self {
        RisLine {
            tag,
            value: value.into(),
        }
    }
}

impl fmt::Display for RisLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.tag, self.value)
    }
}

/// One RIS record. Always terminated by an empty `ER` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RisRecord {
    lines: Vec<RisLine>,
}

impl RisRecord {
    pub fn lines(&self) -> &[RisLine] {
        &self.lines
    }

    pub fn values(&self, tag: RisTag) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(move |line| line.tag == tag)
            .map(|line| line.value.as_str())
    }

    fn author(person: &Person) -> RisLine {
        RisLine::new(
            RisTag::Author,
            format!("{} {}", person.first_name(), person.last_name()),
        )
    }

    /// The type is the entry type as written, uppercased, for every kind of
    /// entry. BibTeX `manual` lands on RIS `MANUAL` without special handling.
    pub fn from_entry(entry: &BibliographicEntry) -> Self {
        let authors = entry.persons(AUTHOR);
        let mut lines = Vec::with_capacity(authors.len() + 6);

        lines.push(RisLine::new(RisTag::Type, entry.entry_type.to_uppercase()));
        lines.extend(authors.iter().map(Self::author));
        lines.push(RisLine::new(RisTag::Title, entry.field("title")));
        lines.push(RisLine::new(RisTag::PublicationYear, entry.field("year")));
        lines.push(RisLine::new(RisTag::Url, entry.field("url")));
        lines.push(RisLine::new(RisTag::Notes, entry.field("note")));
        lines.push(RisLine::new(RisTag::EndOfReference, ""));

        RisRecord { lines }
    }
}

impl From<&BibliographicEntry> for RisRecord {
    fn from(entry: &BibliographicEntry) -> Self {
        Self::from_entry(entry)
    }
}

impl fmt::Display for RisRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Render entries as an RIS document, records joined by a blank line.
pub fn to_ris(entries: &[BibliographicEntry]) -> String {
    entries
        .iter()
        .map(|entry| RisRecord::from_entry(entry).to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn person(first: &[&str], last: &[&str]) -> Person {
        Person {
            first_names: first.iter().map(|s| s.to_string()).collect(),
            last_names: last.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn entry(entry_type: &str, fields: &[(&str, &str)], authors: Vec<Person>) -> BibliographicEntry {
        let mut persons = BTreeMap::new();
        if !authors.is_empty() {
            persons.insert(AUTHOR.to_string(), authors);
        }
        BibliographicEntry {
            key: String::new(),
            entry_type: entry_type.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            persons,
        }
    }

    #[test]
    fn manual_record() {
        let manual = entry(
            "manual",
            &[
                ("title", "A Title"),
                ("year", "2020"),
                ("url", "http://example.com"),
                ("note", "A note"),
            ],
            vec![person(&["John"], &["Smith"])],
        );
        assert_eq!(
            RisRecord::from_entry(&manual).to_string(),
            "TY  - MANUAL\n\
             AU  - John Smith\n\
             TI  - A Title\n\
             PY  - 2020\n\
             UR  - http://example.com\n\
             N1  - A note\n\
             ER  - "
        );
    }

    #[rstest]
    #[case("manual", "MANUAL")]
    #[case("article", "ARTICLE")]
    #[case("book", "BOOK")]
    #[case("inproceedings", "INPROCEEDINGS")]
    #[case("Misc", "MISC")]
    #[case("conference", "CONFERENCE")]
    #[case("www", "WWW")]
    #[case("Foo", "FOO")]
    fn type_is_uppercased(#[case] entry_type: &str, #[case] expected: &str) {
        let record = RisRecord::from_entry(&entry(entry_type, &[], vec![]));
        assert_eq!(record.values(RisTag::Type).collect::<Vec<_>>(), [expected]);
    }

    #[rstest]
    #[case(person(&["John"], &["Smith"]), "John Smith")]
    #[case(person(&["Donald", "E."], &["Knuth"]), "Donald Knuth")]
    #[case(person(&[], &["Plato"]), " Plato")]
    #[case(person(&["Madonna"], &[]), "Madonna ")]
    #[case(person(&[], &[]), " ")]
    fn author_value(#[case] author: Person, #[case] expected: &str) {
        let record = RisRecord::from_entry(&entry("book", &[], vec![author]));
        assert_eq!(record.values(RisTag::Author).collect::<Vec<_>>(), [expected]);
    }

    #[test]
    fn authors_keep_order() {
        let record = RisRecord::from_entry(&entry(
            "article",
            &[],
            vec![
                person(&["Jane"], &["Doe"]),
                person(&["John"], &["Smith"]),
                person(&["Max"], &["Müller"]),
            ],
        ));
        assert_eq!(
            record.values(RisTag::Author).collect::<Vec<_>>(),
            ["Jane Doe", "John Smith", "Max Müller"]
        );
        let tags: Vec<_> = record.lines().iter().map(|l| l.tag).collect();
        assert_eq!(
            tags,
            [
                RisTag::Type,
                RisTag::Author,
                RisTag::Author,
                RisTag::Author,
                RisTag::Title,
                RisTag::PublicationYear,
                RisTag::Url,
                RisTag::Notes,
                RisTag::EndOfReference,
            ]
        );
    }

    #[test]
    fn missing_fields_emit_empty_lines() {
        let record = RisRecord::from_entry(&entry("article", &[("title", "Only")], vec![]));
        assert_eq!(
            record.to_string(),
            "TY  - ARTICLE\nTI  - Only\nPY  - \nUR  - \nN1  - \nER  - "
        );
        assert_eq!(record.values(RisTag::Author).count(), 0);
    }

    #[test]
    fn records_are_separated_by_one_blank_line() {
        let entries = [
            entry("book", &[("title", "First")], vec![]),
            entry("article", &[("title", "Second")], vec![]),
        ];
        let ris = to_ris(&entries);
        let blocks: Vec<_> = ris.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("TY  - BOOK\nTI  - First"));
        assert!(blocks[1].starts_with("TY  - ARTICLE\nTI  - Second"));
        assert!(blocks.iter().all(|b| b.ends_with("ER  - ")));
        assert!(!ris.starts_with('\n'));
        assert!(!ris.ends_with('\n'));
        assert_eq!(ris.matches("ER  - ").count(), 2);
    }

    #[test]
    fn no_entries() {
        assert_eq!(to_ris(&[]), "");
    }

    #[test]
    fn tag_display() {
        assert_eq!(RisLine::new(RisTag::Notes, "x").to_string(), "N1  - x");
        assert_eq!(RisTag::PublicationYear.to_string(), "PY");
    }
}
