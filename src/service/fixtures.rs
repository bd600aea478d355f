//! Language guide fixtures. Requests name a dictionary headword in the `slovo`
//! query parameter and receive a pre-recorded HTML page for it, followed by a
//! fallback marker. The lexeme table is the only way a request can reach the
//! filesystem, request input is never joined to the base path.

use std::{collections::HashMap, path::PathBuf};

use bytes::{Bytes, BytesMut};

use crate::Error;

/// Query parameter carrying the headword.
pub const QUERY_PARAM: &str = "slovo";

/// Appended to every fixture response, and the whole body when nothing matches.
pub const FALLBACK: &[u8] = b"other resource";

/// Headword to fixture file. One word per part of speech.
pub const LEXEMES: [(&str, &str); 10] = [
    ("malý", "adjective_response.html"),
    ("nahoře", "adverb_response.html"),
    ("nebo", "conjunction_response.html"),
    ("haló", "interjection_response.html"),
    ("okolnost", "noun_response.html"),
    ("sto", "numeral_response.html"),
    ("ať", "particle_response.html"),
    ("vedle_1", "preposition_response.html"),
    ("se", "pronoun_response.html"),
    ("dělat", "verb_response.html"),
];

/// Immutable lookup table plus the directory fixture files are read from.
#[derive(Debug)]
pub struct Fixtures {
    base_path: PathBuf,
    table: HashMap<&'static str, &'static str>,
}

impl Fixtures {
    /// Builds the lookup table from [`LEXEMES`].
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            table: HashMap::from(LEXEMES),
        }
    }

    /// File name mapped to `word`, if any.
    pub fn lookup(&self, word: &str) -> Option<&'static str> {
        self.table.get(word).copied()
    }

    /// Response body for the raw query string of a request. A mapped word
    /// produces the fixture contents followed by [`FALLBACK`], anything else
    /// produces [`FALLBACK`] alone.
    ///
    /// Failing to read a mapped file is an error. Nothing has been written to
    /// the client at that point, so the server drops the connection without a
    /// status line instead of answering `200` with an empty body.
    pub async fn render(&self, query: Option<&str>) -> Result<Bytes, Error> {
        let mut body = BytesMut::new();

        if let Some(file) = query.and_then(lexeme_from_query).and_then(|word| self.lookup(&word)) {
            let path = self.base_path.join(file);
            tracing::debug!("Send fixture {}", path.display());

            let content = tokio::fs::read(&path)
                .await
                .map_err(|source| Error::Read { path, source })?;
            body.extend_from_slice(&content);
        }

        body.extend_from_slice(FALLBACK);

        Ok(body.freeze())
    }
}

/// Extracts the first non-empty `slovo` value from a form-urlencoded query.
pub fn lexeme_from_query(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == QUERY_PARAM && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}
