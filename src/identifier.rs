//! Profile identifier validation and input-list parsing.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use url::Url;

/// Opaque locator naming one subject's public profile page.
///
/// Construction validates that the URL points at a profile path on the
/// target site; everything downstream can therefore assume the identifier
/// is syntactically usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileIdentifier {
    url: Url,
}

impl ProfileIdentifier {
    /// Parses and validates a raw identifier string.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let url = Url::parse(raw.trim()).map_err(|err| IdentifierError::Malformed {
            raw: raw.to_string(),
            detail: err.to_string(),
        })?;

        let host = url.host_str().unwrap_or_default();
        let is_profile_host = host == "linkedin.com" || host.ends_with(".linkedin.com");
        if !is_profile_host || !url.path().starts_with("/in/") {
            return Err(IdentifierError::NotAProfile {
                raw: raw.to_string(),
            });
        }

        Ok(Self { url })
    }

    /// Returns the identifier as a URL string.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Returns the underlying URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for ProfileIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl Serialize for ProfileIdentifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.url.as_str())
    }
}

impl<'de> Deserialize<'de> for ProfileIdentifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(DeError::custom)
    }
}

/// Errors raised while validating identifiers or identifier lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The string is not a parseable URL.
    Malformed {
        /// Rejected input.
        raw: String,
        /// Parser detail message.
        detail: String,
    },
    /// The URL parses but does not name a profile page on the target site.
    NotAProfile {
        /// Rejected input.
        raw: String,
    },
    /// The input list contained no usable identifiers.
    EmptyInput,
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { raw, detail } => {
                write!(f, "'{raw}' is not a valid URL: {detail}")
            }
            Self::NotAProfile { raw } => {
                write!(f, "'{raw}' is not a linkedin.com/in/ profile URL")
            }
            Self::EmptyInput => write!(f, "no usable profile URLs in input"),
        }
    }
}

impl std::error::Error for IdentifierError {}

/// Parses an identifier batch from newline- or comma-separated text.
///
/// Blank lines and `#`-prefixed comment lines are skipped. Entries that
/// fail validation are returned separately so the caller can report them
/// without losing the valid remainder; an input with zero valid entries is
/// an error.
pub fn parse_identifier_list(
    input: &str,
) -> Result<(Vec<ProfileIdentifier>, Vec<IdentifierError>), IdentifierError> {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for entry in input.split(['\n', ',']) {
        let entry = entry.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        match ProfileIdentifier::parse(entry) {
            Ok(id) => {
                if !accepted.contains(&id) {
                    accepted.push(id);
                }
            }
            Err(err) => rejected.push(err),
        }
    }

    if accepted.is_empty() {
        return Err(IdentifierError::EmptyInput);
    }
    Ok((accepted, rejected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_profile_urls() {
        let id = ProfileIdentifier::parse("https://www.linkedin.com/in/someone").expect("valid");
        assert_eq!(id.as_str(), "https://www.linkedin.com/in/someone");
    }

    #[test]
    fn rejects_non_profile_paths() {
        let err = ProfileIdentifier::parse("https://www.linkedin.com/company/acme")
            .expect_err("company page rejected");
        assert!(matches!(err, IdentifierError::NotAProfile { .. }));
    }

    #[test]
    fn rejects_other_hosts() {
        let err = ProfileIdentifier::parse("https://example.com/in/someone")
            .expect_err("foreign host rejected");
        assert!(matches!(err, IdentifierError::NotAProfile { .. }));
    }

    #[test]
    fn list_parsing_skips_comments_and_blanks() {
        let input = "# reviewers\n\nhttps://linkedin.com/in/a\nhttps://linkedin.com/in/b\n";
        let (accepted, rejected) = parse_identifier_list(input).expect("two entries");
        assert_eq!(accepted.len(), 2);
        assert!(rejected.is_empty());
    }

    #[test]
    fn list_parsing_accepts_comma_separated_input() {
        let input = "https://linkedin.com/in/a, https://linkedin.com/in/b";
        let (accepted, _) = parse_identifier_list(input).expect("two entries");
        assert_eq!(accepted.len(), 2);
    }

    #[test]
    fn list_parsing_keeps_valid_entries_alongside_invalid() {
        let input = "https://linkedin.com/in/a\nnot-a-url\n";
        let (accepted, rejected) = parse_identifier_list(input).expect("one valid entry");
        assert_eq!(accepted.len(), 1);
        assert_eq!(rejected.len(), 1);
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = parse_identifier_list("# only comments\n").expect_err("empty");
        assert_eq!(err, IdentifierError::EmptyInput);
    }

    #[test]
    fn serde_round_trips_as_plain_string() {
        let id = ProfileIdentifier::parse("https://linkedin.com/in/someone").expect("valid");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"https://linkedin.com/in/someone\"");
        let back: ProfileIdentifier = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
