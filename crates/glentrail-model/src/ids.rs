use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const SLUG_MAX_LEN: usize = 96;
pub const EXTERNAL_ID_MAX_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Trimmed(&'static str),
    TooLong(&'static str, usize),
    InvalidFormat(&'static str),
    OutOfRange(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Trimmed(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::InvalidFormat(msg) => f.write_str(msg),
            Self::OutOfRange(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let raw = input
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidFormat("user id must be an integer"))?;
        if raw <= 0 {
            return Err(ParseError::InvalidFormat("user id must be positive"));
        }
        Ok(Self(raw))
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(i64);

impl RegionId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let raw = input
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidFormat("region id must be an integer"))?;
        if raw <= 0 {
            return Err(ParseError::InvalidFormat("region id must be positive"));
        }
        Ok(Self(raw))
    }
}

impl Display for RegionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalkId(i64);

impl WalkId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let raw = input
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidFormat("walk id must be an integer"))?;
        if raw <= 0 {
            return Err(ParseError::InvalidFormat("walk id must be positive"));
        }
        Ok(Self(raw))
    }
}

impl Display for WalkId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(i64);

impl ReportId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let raw = input
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidFormat("report id must be an integer"))?;
        if raw <= 0 {
            return Err(ParseError::InvalidFormat("report id must be positive"));
        }
        Ok(Self(raw))
    }
}

impl Display for ReportId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// URL path identifier for walks and regions: lowercase ASCII letters,
/// digits and hyphens, with hyphens separating non-empty segments.
/// Deserialization funnels through [`Slug::parse`], so a malformed slug in a
/// request body or fixture fails at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[non_exhaustive]
pub struct Slug(String);

impl TryFrom<String> for Slug {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl Slug {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("slug"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("slug"));
        }
        if input.len() > SLUG_MAX_LEN {
            return Err(ParseError::TooLong("slug", SLUG_MAX_LEN));
        }
        let valid_chars = input
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid_chars {
            return Err(ParseError::InvalidFormat(
                "slug must contain only lowercase letters, digits and hyphens",
            ));
        }
        if input.starts_with('-') || input.ends_with('-') || input.contains("--") {
            return Err(ParseError::InvalidFormat(
                "slug hyphens must separate non-empty segments",
            ));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Slug {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
