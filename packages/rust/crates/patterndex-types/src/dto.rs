//! DTO-tag convention - `dto:"direction,context,security"`.
//!
//! The three positions draw from frozen vocabularies. Linters outside this
//! workspace read the same token lists, so adding a value here is a
//! corpus-wide breaking change.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One position of the DTO tag.
pub trait DtoVocabulary: Sized + Copy {
    /// 1-based position inside the tag.
    const POSITION: usize;
    /// Position name used in messages.
    const NAME: &'static str;
    /// Allowed tokens, in documentation order.
    const ALLOWED: &'static [&'static str];

    /// Parse an exact token.
    fn from_token(token: &str) -> Option<Self>;

    /// Canonical token.
    fn as_token(self) -> &'static str;
}

/// Data flow direction relative to the owning boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DtoDirection {
    /// Inbound only.
    In,
    /// Outbound only.
    Out,
    /// Both ways.
    InOut,
}

impl DtoVocabulary for DtoDirection {
    const POSITION: usize = 1;
    const NAME: &'static str = "direction";
    const ALLOWED: &'static [&'static str] = &["in", "out", "inout"];

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            "inout" => Some(Self::InOut),
            _ => None,
        }
    }

    fn as_token(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::InOut => "inout",
        }
    }
}

/// Where the DTO travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DtoContext {
    /// Public API payload.
    Api,
    /// Command.
    Cmd,
    /// Query.
    Query,
    /// Domain or integration event.
    Event,
    /// Queue message.
    Msg,
    /// Internal only.
    Priv,
}

impl DtoVocabulary for DtoContext {
    const POSITION: usize = 2;
    const NAME: &'static str = "context";
    const ALLOWED: &'static [&'static str] = &["api", "cmd", "query", "event", "msg", "priv"];

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "api" => Some(Self::Api),
            "cmd" => Some(Self::Cmd),
            "query" => Some(Self::Query),
            "event" => Some(Self::Event),
            "msg" => Some(Self::Msg),
            "priv" => Some(Self::Priv),
            _ => None,
        }
    }

    fn as_token(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Cmd => "cmd",
            Self::Query => "query",
            Self::Event => "event",
            Self::Msg => "msg",
            Self::Priv => "priv",
        }
    }
}

/// Sensitivity of the carried data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DtoSecurity {
    /// Safe to expose.
    Pub,
    /// Internal.
    Priv,
    /// Personally identifiable information.
    Pii,
    /// Credentials and keys.
    Secret,
}

impl DtoVocabulary for DtoSecurity {
    const POSITION: usize = 3;
    const NAME: &'static str = "security";
    const ALLOWED: &'static [&'static str] = &["pub", "priv", "pii", "secret"];

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "pub" => Some(Self::Pub),
            "priv" => Some(Self::Priv),
            "pii" => Some(Self::Pii),
            "secret" => Some(Self::Secret),
            _ => None,
        }
    }

    fn as_token(self) -> &'static str {
        match self {
            Self::Pub => "pub",
            Self::Priv => "priv",
            Self::Pii => "pii",
            Self::Secret => "secret",
        }
    }
}

/// A token that is not in its position's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidToken {
    /// 1-based position.
    pub position: usize,
    /// Token as written.
    pub token: String,
    /// Vocabulary of that position.
    pub allowed: &'static [&'static str],
}

impl fmt::Display for InvalidToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid token '{}' in position {} (allowed: {})",
            self.token,
            self.position,
            self.allowed.join(",")
        )
    }
}

/// Why a tag value does not parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DtoTagError {
    /// Not exactly three comma-separated tokens.
    #[error("tag '{raw}' has {found} tokens, expected 3 (direction,context,security)")]
    TokenCount {
        /// Tag value as written.
        raw: String,
        /// Number of tokens found.
        found: usize,
    },
    /// Three tokens, at least one outside its vocabulary.
    #[error("{}", join_invalid(.0))]
    InvalidTokens(Vec<InvalidToken>),
}

fn join_invalid(tokens: &[InvalidToken]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A well-formed DTO tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DtoTag {
    /// Position 1.
    pub direction: DtoDirection,
    /// Position 2.
    pub context: DtoContext,
    /// Position 3.
    pub security: DtoSecurity,
}

fn parse_position<T: DtoVocabulary>(token: &str, invalid: &mut Vec<InvalidToken>) -> Option<T> {
    let parsed = T::from_token(token);
    if parsed.is_none() {
        invalid.push(InvalidToken {
            position: T::POSITION,
            token: token.to_string(),
            allowed: T::ALLOWED,
        });
    }
    parsed
}

impl DtoTag {
    /// Parse the value inside `dto:"..."`.
    ///
    /// Tokens are compared exactly; surrounding whitespace is part of the
    /// token and makes it invalid.
    pub fn parse(raw: &str) -> Result<Self, DtoTagError> {
        let tokens: Vec<&str> = raw.split(',').collect();
        if tokens.len() != 3 {
            return Err(DtoTagError::TokenCount {
                raw: raw.to_string(),
                found: tokens.len(),
            });
        }
        let mut invalid = Vec::new();
        let direction = parse_position::<DtoDirection>(tokens[0], &mut invalid);
        let context = parse_position::<DtoContext>(tokens[1], &mut invalid);
        let security = parse_position::<DtoSecurity>(tokens[2], &mut invalid);
        match (direction, context, security) {
            (Some(direction), Some(context), Some(security)) => Ok(Self {
                direction,
                context,
                security,
            }),
            _ => Err(DtoTagError::InvalidTokens(invalid)),
        }
    }
}

impl fmt::Display for DtoTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.direction.as_token(),
            self.context.as_token(),
            self.security.as_token()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_tag() {
        let tag = DtoTag::parse("inout,event,pii").unwrap();
        assert_eq!(tag.direction, DtoDirection::InOut);
        assert_eq!(tag.context, DtoContext::Event);
        assert_eq!(tag.security, DtoSecurity::Pii);
        assert_eq!(tag.to_string(), "inout,event,pii");
    }

    #[test]
    fn test_invalid_tokens_reported_in_position_order() {
        let err = DtoTag::parse("input,api,public").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid token 'input' in position 1 (allowed: in,out,inout); \
             invalid token 'public' in position 3 (allowed: pub,priv,pii,secret)"
        );
    }

    #[test]
    fn test_wrong_token_count() {
        let err = DtoTag::parse("in,api").unwrap_err();
        assert_eq!(
            err,
            DtoTagError::TokenCount {
                raw: "in,api".to_string(),
                found: 2
            }
        );
        assert!(DtoTag::parse("in,api,pub,extra").is_err());
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        assert!(DtoTag::parse("in, api,pub").is_err());
    }

    #[test]
    fn test_priv_is_valid_in_context_and_security() {
        assert!(DtoTag::parse("out,priv,priv").is_ok());
    }
}
