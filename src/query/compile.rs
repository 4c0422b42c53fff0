//! Structured search query and its compiler.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::field::{QueryField, QueryValue, Range};
use crate::error::ValidationError;
use crate::ident::Isbn13;

/// Dewey prefix term: one to three digits, optionally ending in a wildcard.
#[allow(clippy::expect_used)]
static DDC_TERM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,3}\*?$").expect("DDC term regex is valid") // Static pattern, safe to panic
});

/// A search query: each set field maps to one [`QueryValue`].
///
/// Setting a field twice replaces the earlier value. Clauses are rendered in
/// [`QueryField`] order, so two queries with the same fields compile to the
/// same string regardless of how they were built.
///
/// # Example
///
/// ```
/// use openlib_core::query::{Query, Range};
///
/// let query = Query::new()
///     .authors(["john green"])
///     .title("alpha")
///     .first_publish_year(Range::starting(2000));
/// assert_eq!(
///     query.compile().unwrap(),
///     r#"title:"alpha" AND (authors:"john green") AND first_publish_year:[2000 TO *]"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    fields: BTreeMap<QueryField, QueryValue>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `field` to `value`, replacing any previous value.
    #[must_use]
    pub fn with(mut self, field: QueryField, value: impl Into<QueryValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// In-place form of [`Query::with`].
    pub fn insert(&mut self, field: QueryField, value: impl Into<QueryValue>) {
        self.fields.insert(field, value.into());
    }

    /// Clears `field`, returning its previous value.
    pub fn remove(&mut self, field: QueryField) -> Option<QueryValue> {
        self.fields.remove(&field)
    }

    #[must_use]
    pub fn get(&self, field: QueryField) -> Option<&QueryValue> {
        self.fields.get(&field)
    }

    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Set fields in render order.
    pub fn iter(&self) -> impl Iterator<Item = (QueryField, &QueryValue)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }

    #[must_use]
    pub fn title(self, title: impl Into<String>) -> Self {
        self.with(QueryField::Title, QueryValue::Term(title.into()))
    }

    #[must_use]
    pub fn subtitle(self, subtitle: impl Into<String>) -> Self {
        self.with(QueryField::Subtitle, QueryValue::Term(subtitle.into()))
    }

    #[must_use]
    pub fn authors<I, S>(self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(QueryField::Authors, any_of(authors))
    }

    #[must_use]
    pub fn subjects<I, S>(self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(QueryField::Subject, any_of(subjects))
    }

    #[must_use]
    pub fn places<I, S>(self, places: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(QueryField::Place, any_of(places))
    }

    #[must_use]
    pub fn people<I, S>(self, people: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(QueryField::Person, any_of(people))
    }

    #[must_use]
    pub fn publishers<I, S>(self, publishers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(QueryField::Publisher, any_of(publishers))
    }

    /// ISBNs are validated at compile time and rendered as ISBN-13.
    #[must_use]
    pub fn isbns<I, S>(self, isbns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(QueryField::Isbn, any_of(isbns))
    }

    /// Dewey prefix such as `823` or `82*`.
    #[must_use]
    pub fn ddc(self, prefix: impl Into<String>) -> Self {
        self.with(QueryField::Ddc, QueryValue::Term(prefix.into()))
    }

    #[must_use]
    pub fn lcc(self, class: impl Into<String>) -> Self {
        self.with(QueryField::Lcc, QueryValue::Term(class.into()))
    }

    #[must_use]
    pub fn first_publish_year(self, years: Range) -> Self {
        self.with(QueryField::FirstPublishYear, QueryValue::Range(years))
    }

    /// Renders the query string.
    ///
    /// Clauses are joined with `AND`; collections become a parenthesized `OR`
    /// group; ranges become `field:[start TO end]` with `*` for an open bound.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyQuery`] if no clause renders
    /// - [`ValidationError::InvalidField`] if a field holds a value it cannot carry
    /// - [`ValidationError::InvalidIdentifier`] if an `isbn` value is not a valid ISBN
    pub fn compile(&self) -> Result<String, ValidationError> {
        let mut clauses = Vec::with_capacity(self.fields.len());
        for (field, value) in &self.fields {
            if let Some(clause) = render_clause(*field, value)? {
                clauses.push(clause);
            }
        }

        if clauses.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }

        let compiled = clauses.join(" AND ");
        debug!(query = %compiled, clauses = clauses.len(), "Compiled search query");
        Ok(compiled)
    }
}

fn any_of<I, S>(values: I) -> QueryValue
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    QueryValue::AnyOf(values.into_iter().map(Into::into).collect())
}

fn render_clause(field: QueryField, value: &QueryValue) -> Result<Option<String>, ValidationError> {
    match value {
        QueryValue::Term(term) => {
            let term = term.trim();
            if term.is_empty() {
                return Ok(None);
            }
            render_term(field, term).map(Some)
        }
        QueryValue::AnyOf(values) => {
            if !field.supports_collection() {
                return Err(ValidationError::invalid_field(
                    field.as_str(),
                    &values.join(", "),
                    "field takes a single value or a range, not a set",
                ));
            }
            let mut rendered: Vec<String> = Vec::with_capacity(values.len());
            for value in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
                let term = render_term(field, value)?;
                if !rendered.contains(&term) {
                    rendered.push(term);
                }
            }
            if rendered.is_empty() {
                return Ok(None);
            }
            Ok(Some(format!("({})", rendered.join(" OR "))))
        }
        QueryValue::Range(range) => {
            if !field.supports_range() {
                return Err(ValidationError::invalid_field(
                    field.as_str(),
                    &describe_range(range),
                    "field does not accept a range",
                ));
            }
            render_range(field, range)
        }
    }
}

fn render_term(field: QueryField, term: &str) -> Result<String, ValidationError> {
    match field {
        QueryField::Isbn => {
            let isbn = Isbn13::parse(term)?;
            Ok(format!("{field}:\"{isbn}\""))
        }
        QueryField::Ddc => {
            if !DDC_TERM_PATTERN.is_match(term) {
                return Err(ValidationError::invalid_field(
                    field.as_str(),
                    term,
                    "expected 1-3 digits with an optional trailing '*'",
                ));
            }
            if term.ends_with('*') {
                Ok(format!("{field}:{term}"))
            } else {
                Ok(format!("{field}:\"{term}\""))
            }
        }
        QueryField::FirstPublishYear => {
            if !term.chars().all(|c| c.is_ascii_digit()) {
                return Err(ValidationError::invalid_field(
                    field.as_str(),
                    term,
                    "expected a year",
                ));
            }
            Ok(format!("{field}:\"{term}\""))
        }
        _ => Ok(format!("{field}:\"{}\"", escape(term))),
    }
}

fn render_range(field: QueryField, range: &Range) -> Result<Option<String>, ValidationError> {
    if range.is_unbounded() {
        return Ok(None);
    }
    let start = range_bound(field, range, range.start.as_deref())?;
    let end = range_bound(field, range, range.end.as_deref())?;
    Ok(Some(format!("{field}:[{start} TO {end}]")))
}

fn range_bound<'a>(
    field: QueryField,
    range: &Range,
    bound: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    let Some(bound) = bound else {
        return Ok("*");
    };
    if bound.is_empty() {
        return Err(ValidationError::invalid_field(
            field.as_str(),
            &describe_range(range),
            "range bound is empty",
        ));
    }
    if bound
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '[' | ']'))
    {
        return Err(ValidationError::invalid_field(
            field.as_str(),
            &describe_range(range),
            "range bound must not contain whitespace or brackets",
        ));
    }
    Ok(bound)
}

fn describe_range(range: &Range) -> String {
    format!(
        "[{} TO {}]",
        range.start.as_deref().unwrap_or("*"),
        range.end.as_deref().unwrap_or("*")
    )
}

fn escape(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ==================== Basic Rendering ====================

    #[test]
    fn test_empty_query_fails() {
        assert_eq!(Query::new().compile().unwrap_err(), ValidationError::EmptyQuery);
    }

    #[test]
    fn test_single_scalar() {
        assert_eq!(Query::new().title("Dune").compile().unwrap(), r#"title:"Dune""#);
    }

    #[test]
    fn test_collection_is_or_joined_and_parenthesized() {
        let query = Query::new().authors(["a", "b"]);
        assert_eq!(query.compile().unwrap(), r#"(authors:"a" OR authors:"b")"#);
    }

    #[test]
    fn test_single_element_collection_keeps_parentheses() {
        let query = Query::new().subjects(["fiction"]);
        assert_eq!(query.compile().unwrap(), r#"(subject:"fiction")"#);
    }

    #[test]
    fn test_range_bounds() {
        let start = Query::new().first_publish_year(Range::starting(1950));
        assert_eq!(start.compile().unwrap(), "first_publish_year:[1950 TO *]");

        let end = Query::new().first_publish_year(Range::ending(2000));
        assert_eq!(end.compile().unwrap(), "first_publish_year:[* TO 2000]");

        let both = Query::new().first_publish_year(Range::between(1950, 2000));
        assert_eq!(both.compile().unwrap(), "first_publish_year:[1950 TO 2000]");
    }

    #[test]
    fn test_unbounded_range_alone_is_empty_query() {
        let query = Query::new().first_publish_year(Range::default());
        assert_eq!(query.compile().unwrap_err(), ValidationError::EmptyQuery);
    }

    // ==================== Ordering ====================

    #[test]
    fn test_clauses_follow_field_order_not_insertion_order() {
        let a = Query::new()
            .first_publish_year(Range::starting(2000))
            .authors(["john green"])
            .title("alpha");
        let b = Query::new()
            .title("alpha")
            .first_publish_year(Range::starting(2000))
            .authors(["john green"]);
        let expected =
            r#"title:"alpha" AND (authors:"john green") AND first_publish_year:[2000 TO *]"#;
        assert_eq!(a.compile().unwrap(), expected);
        assert_eq!(b.compile().unwrap(), expected);
    }

    #[test]
    fn test_setting_field_twice_replaces() {
        let query = Query::new().title("first").title("second");
        assert_eq!(query.compile().unwrap(), r#"title:"second""#);
    }

    // ==================== Value Cleaning ====================

    #[test]
    fn test_blank_values_are_skipped() {
        let query = Query::new().title("  ").authors(["", " tolkien "]);
        assert_eq!(query.compile().unwrap(), r#"(authors:"tolkien")"#);
    }

    #[test]
    fn test_duplicates_rendered_once() {
        let query = Query::new().publishers(["Ace", "Ace", "Tor"]);
        assert_eq!(
            query.compile().unwrap(),
            r#"(publisher:"Ace" OR publisher:"Tor")"#
        );
    }

    #[test]
    fn test_quotes_and_backslashes_escaped() {
        let query = Query::new().title(r#"say "hi" \o/"#);
        assert_eq!(query.compile().unwrap(), r#"title:"say \"hi\" \\o/""#);
    }

    // ==================== Field-Specific Rules ====================

    #[test]
    fn test_isbn_rendered_canonical() {
        let query = Query::new().isbns(["0-306-40615-2"]);
        assert_eq!(query.compile().unwrap(), r#"(isbn:"9780306406157")"#);
    }

    #[test]
    fn test_invalid_isbn_fails() {
        let err = Query::new().isbns(["0306406153"]).compile().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidIdentifier { kind: "ISBN", .. }));
    }

    #[test]
    fn test_ddc_wildcard_unquoted() {
        assert_eq!(Query::new().ddc("82*").compile().unwrap(), "ddc:82*");
        assert_eq!(Query::new().ddc("823").compile().unwrap(), r#"ddc:"823""#);
    }

    #[test]
    fn test_ddc_rejects_bad_prefix() {
        let err = Query::new().ddc("8234").compile().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "ddc", .. }));
    }

    #[test]
    fn test_ddc_accepts_range() {
        let query = Query::new().with(QueryField::Ddc, Range::between(800, 899));
        assert_eq!(query.compile().unwrap(), "ddc:[800 TO 899]");
    }

    #[test]
    fn test_year_term() {
        let query = Query::new().with(QueryField::FirstPublishYear, "1965");
        assert_eq!(query.compile().unwrap(), r#"first_publish_year:"1965""#);

        let err = Query::new()
            .with(QueryField::FirstPublishYear, "sixties")
            .compile()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { .. }));
    }

    #[test]
    fn test_range_on_text_field_fails() {
        let err = Query::new()
            .with(QueryField::Title, Range::between("a", "b"))
            .compile()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "title", .. }));
    }

    #[test]
    fn test_collection_on_year_fails() {
        let err = Query::new()
            .with(QueryField::FirstPublishYear, vec!["1990", "1991"])
            .compile()
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidField {
                field: "first_publish_year",
                ..
            }
        ));
    }

    #[test]
    fn test_range_bound_with_whitespace_fails() {
        let err = Query::new()
            .first_publish_year(Range::between("19 50", 2000))
            .compile()
            .unwrap_err();
        assert!(err.to_string().contains("whitespace"));
    }

    #[test]
    fn test_empty_range_bound_fails() {
        let range = Range {
            start: Some(String::new()),
            end: None,
        };
        let err = Query::new().first_publish_year(range).compile().unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_remove_and_get() {
        let mut query = Query::new().title("Dune").lcc("PS3558");
        assert_eq!(
            query.get(QueryField::Lcc),
            Some(&QueryValue::Term("PS3558".to_string()))
        );
        query.remove(QueryField::Lcc);
        assert!(query.get(QueryField::Lcc).is_none());
        assert_eq!(query.iter().count(), 1);
    }

    #[test]
    fn test_ddc_non_ascii_digits_rejected() {
        let err = Query::new().ddc("٨٢٣").compile().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { .. }));
    }
}
