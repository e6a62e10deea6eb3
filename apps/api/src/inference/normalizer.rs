//! Text canonicalization — the cleaning step applied to every posting before
//! vectorization.
//!
//! The vocabulary in the loaded artifacts was built over cleaned text, so the
//! cleaning here must agree byte-for-byte with the trainer's cleaning step.
//! Any drift changes the feature vector and therefore the prediction.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a maximal non-whitespace run starting at a literal `http`.
/// Covers `http://` and `https://` URLs, including ones glued to the tail of
/// another token.
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+").expect("URL regex is valid"));

/// Character class retained by normalization.
///
/// The two deployed training pipelines disagreed on whether digits survive
/// cleaning; the profile in force must match the one the loaded artifacts
/// were trained with (`NORMALIZER_CHARSET`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenCharset {
    /// ASCII lowercase letters only.
    Letters,
    /// ASCII lowercase letters and digits.
    #[default]
    Alphanumeric,
}

impl TokenCharset {
    fn retains(self, c: char) -> bool {
        match self {
            TokenCharset::Letters => c.is_ascii_lowercase(),
            TokenCharset::Alphanumeric => c.is_ascii_lowercase() || c.is_ascii_digit(),
        }
    }
}

impl FromStr for TokenCharset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letters" => Ok(TokenCharset::Letters),
            "alphanumeric" => Ok(TokenCharset::Alphanumeric),
            other => anyhow::bail!(
                "unknown normalizer charset '{other}' (expected 'letters' or 'alphanumeric')"
            ),
        }
    }
}

/// Deterministic, total mapping from raw posting text to the canonical form
/// the vectorizer vocabulary was built over.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    charset: TokenCharset,
}

impl TextNormalizer {
    pub fn new(charset: TokenCharset) -> Self {
        Self { charset }
    }

    /// Lowercases, strips URLs, restricts to the retained charset and
    /// collapses whitespace. Never fails; empty input maps to an empty
    /// string, which the vectorizer treats as an empty document.
    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();
        let without_urls = URL_RE.replace_all(&lowered, " ");
        // Rejected characters become a space, never nothing: deletion could
        // splice the surrounding fragments into a new token.
        let restricted: String = without_urls
            .chars()
            .map(|c| if self.charset.retains(c) { c } else { ' ' })
            .collect();
        restricted.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
