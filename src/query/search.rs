//! Search request parameters: query plus result-shaping options.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::compile::Query;
use super::sort::SortKey;
use crate::error::ValidationError;

/// Two-letter language code, lowercase. Defaults to `en`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidLanguage`] unless the input is two
    /// ASCII letters.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let code = raw.trim();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_lowercase()))
        } else {
            Err(ValidationError::InvalidLanguage {
                value: raw.to_string(),
            })
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Language {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Language {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything sent to the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: Query,
    /// Output fields to return per document; empty means the service default
    pub fields: BTreeSet<String>,
    pub sort: Option<SortKey>,
    pub lang: Language,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: Query) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    /// Adds output fields. Blank names are ignored.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(
            fields
                .into_iter()
                .map(Into::into)
                .map(|f: String| f.trim().to_string())
                .filter(|f| !f.is_empty()),
        );
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    #[must_use]
    pub fn lang(mut self, lang: Language) -> Self {
        self.lang = lang;
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query parameters in the order `q, fields, sort, lang, offset, limit`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Query::compile`].
    pub fn to_params(&self) -> Result<Vec<(String, String)>, ValidationError> {
        let mut params = vec![("q".to_string(), self.query.compile()?)];
        if !self.fields.is_empty() {
            let joined = self.fields.iter().map(String::as_str).collect::<Vec<_>>().join(",");
            params.push(("fields".to_string(), joined));
        }
        if let Some(sort) = self.sort {
            params.push(("sort".to_string(), sort.as_str().to_string()));
        }
        params.push(("lang".to_string(), self.lang.as_str().to_string()));
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        Ok(params)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn names(params: &[(String, String)]) -> Vec<&str> {
        params.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn test_language_default_and_parse() {
        assert_eq!(Language::default().as_str(), "en");
        assert_eq!(Language::parse("FR").unwrap().as_str(), "fr");
        assert!(Language::parse("eng").is_err());
        assert!(Language::parse("e1").is_err());
        assert!(matches!(
            Language::parse("").unwrap_err(),
            ValidationError::InvalidLanguage { .. }
        ));
    }

    #[test]
    fn test_minimal_params() {
        let params = SearchRequest::new(Query::new().title("Dune")).to_params().unwrap();
        assert_eq!(
            params,
            vec![
                ("q".to_string(), r#"title:"Dune""#.to_string()),
                ("lang".to_string(), "en".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_params_in_order() {
        let request = SearchRequest::new(Query::new().title("Dune"))
            .fields(["title", "key", " ", "author_name"])
            .sort(SortKey::New)
            .lang(Language::parse("de").unwrap())
            .offset(20)
            .limit(10);
        let params = request.to_params().unwrap();
        assert_eq!(names(&params), ["q", "fields", "sort", "lang", "offset", "limit"]);
        assert_eq!(params[1].1, "author_name,key,title");
        assert_eq!(params[2].1, "new");
        assert_eq!(params[3].1, "de");
        assert_eq!(params[4].1, "20");
        assert_eq!(params[5].1, "10");
    }

    #[test]
    fn test_empty_query_fails_before_params() {
        let err = SearchRequest::new(Query::new()).to_params().unwrap_err();
        assert_eq!(err, ValidationError::EmptyQuery);
    }
}
