use super::record::{AlbumRecord, Field, UnknownField};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error(transparent)]
    UnknownField(#[from] UnknownField),

    #[error("criterion '{0}' is not of the form field=text")]
    MissingSeparator(String),
}

/// Field/fragment pairs, all of which must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria(Vec<(Field, String)>);

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, fragment: impl Into<String>) -> Self {
        self.0.push((field, fragment.into()));
        self
    }

    /// Builds criteria from `field=text` terms.
    pub fn parse<S: AsRef<str>>(terms: &[S]) -> Result<Self, SearchError> {
        terms
            .iter()
            .map(|term| parse_term(term.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive substring match on every criterion.
    pub fn matches(&self, record: &AlbumRecord) -> bool {
        self.0.iter().all(|(field, fragment)| {
            record
                .field_text(*field)
                .to_lowercase()
                .contains(&fragment.to_lowercase())
        })
    }
}

fn parse_term(term: &str) -> Result<(Field, String), SearchError> {
    let (key, text) = term
        .split_once('=')
        .ok_or_else(|| SearchError::MissingSeparator(term.to_string()))?;
    Ok((Field::from_str(key.trim())?, text.to_string()))
}

/// The filter the listing view applies: free text over title, artist and
/// genre, plus exact genre and status selections. Unset parts match all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: Option<String>,
    pub genre: Option<String>,
    pub status: Option<String>,
}

impl Query {
    pub fn matches(&self, record: &AlbumRecord) -> bool {
        let text_ok = self.text.as_deref().map_or(true, |text| {
            let needle = text.to_lowercase();
            [&record.title, &record.artist, &record.genre]
                .iter()
                .any(|value| value.to_lowercase().contains(&needle))
        });
        let genre_ok = self.genre.as_deref().map_or(true, |g| record.genre == g);
        let status_ok = self.status.as_deref().map_or(true, |s| record.status == s);
        text_ok && genre_ok && status_ok
    }
}

/// Distinct values in first-occurrence order.
pub fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::catalog::library::Library;

    fn titles<'a>(records: impl Iterator<Item = &'a AlbumRecord>) -> Vec<&'a str> {
        records.map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn criteria_match_case_insensitively() {
        let library = Library::seed();
        let criteria = Criteria::new().with(Field::Genre, "rock");
        let found = titles(library.records.iter().filter(|r| criteria.matches(r)));
        assert_eq!(
            found,
            vec![
                "(What's the Story) Morning Glory?",
                "Abbey Road",
                "Is This It"
            ]
        );
    }

    #[test]
    fn criteria_are_combined_with_and() {
        let library = Library::seed();
        let criteria = Criteria::new()
            .with(Field::Genre, "rock")
            .with(Field::Artist, "beatles");
        let found = titles(library.records.iter().filter(|r| criteria.matches(r)));
        assert_eq!(found, vec!["Abbey Road"]);
    }

    #[test]
    fn numeric_fields_match_as_text() {
        let library = Library::seed();
        let criteria = Criteria::new().with(Field::YearPublished, "199");
        let found = titles(library.records.iter().filter(|r| criteria.matches(r)));
        assert_eq!(
            found,
            vec!["(What's the Story) Morning Glory?", "Grace", "Either/Or"]
        );
    }

    #[test]
    fn empty_criteria_match_everything() {
        let library = Library::seed();
        let criteria = Criteria::new();
        assert!(library.records.iter().all(|r| criteria.matches(r)));
    }

    #[test]
    fn parses_terms() {
        let criteria = Criteria::parse(&["genre=rock", "year_published=19"]).unwrap();
        assert_eq!(
            criteria,
            Criteria::new()
                .with(Field::Genre, "rock")
                .with(Field::YearPublished, "19")
        );
    }

    #[test]
    fn parse_keeps_separators_inside_the_text() {
        let criteria = Criteria::parse(&["title=a=b"]).unwrap();
        assert_eq!(criteria, Criteria::new().with(Field::Title, "a=b"));
    }

    #[test]
    fn parse_rejects_unknown_fields_and_bare_words() {
        assert_matches!(
            Criteria::parse(&["label=emi"]),
            Err(SearchError::UnknownField(UnknownField(name))) if name == "label"
        );
        assert_matches!(
            Criteria::parse(&["rock"]),
            Err(SearchError::MissingSeparator(_))
        );
    }

    #[test]
    fn query_combines_text_genre_and_status() {
        let mut library = Library::seed();
        library.records[2].status = "queued".to_string();

        let query = Query {
            text: Some("SMITH".to_string()),
            genre: Some("Alternative".to_string()),
            status: None,
        };
        let found = titles(library.records.iter().filter(|r| query.matches(r)));
        assert_eq!(found, vec!["The Queen is Dead", "Either/Or"]);

        let query = Query {
            status: Some("queued".to_string()),
            ..Default::default()
        };
        let found = titles(library.records.iter().filter(|r| query.matches(r)));
        assert_eq!(found, vec!["Grace"]);
    }

    #[test]
    fn query_genre_is_an_exact_selection() {
        let library = Library::seed();
        let query = Query {
            genre: Some("rock".to_string()),
            ..Default::default()
        };
        assert!(!library.records.iter().any(|r| query.matches(r)));
    }

    #[test]
    fn distinct_keeps_first_occurrence_order() {
        let values = ["Rock", "Alternative", "Rock", "rock"];
        assert_eq!(
            distinct(values.iter().copied()),
            vec!["Rock", "Alternative", "rock"]
        );
    }
}
