//! alphabets for generated values

const ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ALPHABETIC: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMERIC: &str = "0123456789";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Charset {
    /// letters and digits
    #[default]
    Alphanumeric,
    /// letters only
    Alphabetic,
    Uppercase,
    Lowercase,
    /// digits only
    Numeric,
}

impl Charset {
    pub const ALL: [Charset; 5] = [
        Charset::Alphanumeric,
        Charset::Alphabetic,
        Charset::Uppercase,
        Charset::Lowercase,
        Charset::Numeric,
    ];

    pub fn alphabet(self) -> &'static str {
        match self {
            Charset::Alphanumeric => ALPHANUMERIC,
            Charset::Alphabetic => ALPHABETIC,
            Charset::Uppercase => UPPERCASE,
            Charset::Lowercase => LOWERCASE,
            Charset::Numeric => NUMERIC,
        }
    }

    /// Lenient lookup, unknown or empty selectors fall back to [Charset::Alphanumeric]
    pub fn from_selector(selector: &str) -> Self {
        selector.parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Charset::Alphanumeric => "alphanumeric",
            Charset::Alphabetic => "alphabetic",
            Charset::Uppercase => "uppercase",
            Charset::Lowercase => "lowercase",
            Charset::Numeric => "numeric",
        }
    }
}

/// Alphabet for a charset selector such as `"numeric"`. Never fails.
pub fn alphabet(selector: &str) -> &'static str {
    Charset::from_selector(selector).alphabet()
}

impl std::str::FromStr for Charset {
    type Err = UnknownCharset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Charset::ALL
            .into_iter()
            .find(|charset| charset.as_str() == s)
            .ok_or_else(|| UnknownCharset(s.to_string()))
    }
}

impl std::fmt::Display for Charset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("invalid charset '{0}', valid options are: alphanumeric, alphabetic, uppercase, lowercase, numeric")]
pub struct UnknownCharset(pub String);
