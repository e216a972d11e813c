//! Property keys: ordinary text keys and opaque unique tokens.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::ReferenceCounter;

static NEXT_TOKEN_IDENTITY: AtomicU64 = AtomicU64::new(0);

/// An opaque unique key.
///
/// Every call to [`Token::new`] yields a token that is equal only to its own
/// clones, regardless of description.
///
/// # Example
///
/// ```
/// use proplens::value::Token;
///
/// let first = Token::new("split");
/// let second = Token::new("split");
///
/// assert_eq!(first, first.clone());
/// assert_ne!(first, second);
/// assert_eq!(first.description(), Some("split"));
/// ```
#[derive(Clone)]
pub struct Token {
    identity: u64,
    description: Option<ReferenceCounter<str>>,
}

impl Token {
    /// Creates a fresh token with a description used only for display.
    #[must_use]
    pub fn new(description: &str) -> Self {
        Self {
            identity: NEXT_TOKEN_IDENTITY.fetch_add(1, Ordering::Relaxed),
            description: Some(ReferenceCounter::from(description)),
        }
    }

    /// Creates a fresh token without a description.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            identity: NEXT_TOKEN_IDENTITY.fetch_add(1, Ordering::Relaxed),
            description: None,
        }
    }

    /// Returns the description given at creation, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for Token {}

impl std::hash::Hash for Token {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Token#{}({})", self.identity, self.description().unwrap_or(""))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Token({})", self.description().unwrap_or(""))
    }
}

/// A property key.
///
/// Composites list every [`Key::Text`] before every [`Key::Token`]; within
/// each group keys keep their definition order.
///
/// Sequence indices are text keys holding a canonical decimal number, so
/// `Key::from(2usize)` and `Key::from("2")` address the same element.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// An ordinary textual key.
    Text(String),
    /// An opaque unique key.
    Token(Token),
}

impl Key {
    /// Returns `true` for a text key.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Returns `true` for a token key.
    #[must_use]
    pub const fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }

    /// Returns the text of a text key.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Token(_) => None,
        }
    }

    /// Interprets the key as a sequence index.
    ///
    /// Only canonical decimal text qualifies: `"0"`, `"17"`, but not `"01"`,
    /// `"+1"` or `"1.0"`.
    ///
    /// # Example
    ///
    /// ```
    /// use proplens::value::Key;
    ///
    /// assert_eq!(Key::from("3").as_index(), Some(3));
    /// assert_eq!(Key::from("03").as_index(), None);
    /// assert_eq!(Key::from("length").as_index(), None);
    /// ```
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        let text = self.as_text()?;
        let canonical = text == "0" || (!text.starts_with('0') && !text.is_empty());
        if canonical && text.bytes().all(|byte| byte.is_ascii_digit()) {
            text.parse().ok()
        } else {
            None
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(formatter, "{text:?}"),
            Self::Token(token) => write!(formatter, "{token:?}"),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => formatter.write_str(text),
            Self::Token(token) => write!(formatter, "{token}"),
        }
    }
}

impl From<&str> for Key {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Key {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Text(index.to_string())
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Self::Text(index.to_string())
    }
}

impl From<Token> for Key {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

impl From<&Token> for Key {
    fn from(token: &Token) -> Self {
        Self::Token(token.clone())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

/// Builds a path (`Vec<Key>`) from a list of key-convertible expressions.
///
/// # Example
///
/// ```
/// use proplens::path;
/// use proplens::value::Key;
///
/// let path = path!["items", 3, "size"];
/// assert_eq!(path, vec![Key::from("items"), Key::from("3"), Key::from("size")]);
///
/// let empty: Vec<Key> = path![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        ::std::vec::Vec::<$crate::value::Key>::new()
    };
    ($($key:expr),+ $(,)?) => {
        ::std::vec![$($crate::value::Key::from($key)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Some(0))]
    #[case("42", Some(42))]
    #[case("007", None)]
    #[case("", None)]
    #[case("-1", None)]
    #[case("1e3", None)]
    fn test_as_index(#[case] text: &str, #[case] expected: Option<usize>) {
        assert_eq!(Key::from(text).as_index(), expected);
    }

    #[rstest]
    fn test_token_key_is_never_an_index() {
        assert_eq!(Key::from(Token::new("0")).as_index(), None);
    }

    #[rstest]
    fn test_index_and_text_keys_agree() {
        assert_eq!(Key::from(7usize), Key::from("7"));
        assert_eq!(Key::from(7), Key::from("7"));
    }

    #[rstest]
    fn test_tokens_with_same_description_differ() {
        let left = Token::new("same");
        let right = Token::new("same");
        assert_ne!(Key::from(&left), Key::from(&right));
        assert_eq!(Key::from(&left), Key::from(left.clone()));
    }

    #[rstest]
    fn test_display() {
        assert_eq!(Key::from("name").to_string(), "name");
        assert_eq!(Key::from(Token::new("split")).to_string(), "Token(split)");
        assert_eq!(Key::from(Token::anonymous()).to_string(), "Token()");
    }
}
