//! Route types for hierarchical document addressing.
//!
//! A [`Route`] is an immutable, ordered sequence of [`Key`]s that addresses a
//! single node inside a document tree. Routes are cheap to clone (the key
//! sequence is shared) and support the usual path operations: joining,
//! sub-route extraction, prefix tests and parsing from a delimited string
//! form.
//!
//! # Key formats
//!
//! Keys are typed: string keys cover the common case, while integer and
//! boolean keys support documents whose mappings are keyed by non-string
//! values. [`Route::parse`] only ever produces string keys; routes over typed
//! keys are built from explicit key sequences via [`Route::of`] or the
//! [`route!`](crate::route!) macro.
//!
//! # Usage
//!
//! ```
//! use upkeep::route::Route;
//!
//! // Parse from the delimited string form
//! let route = Route::parse("server.http.port", '.')?;
//! assert_eq!(route.len(), 3);
//!
//! // Quoting keeps a literal delimiter inside one key
//! let route = Route::parse("hosts.'eu.example.org'.port", '.')?;
//! assert_eq!(route.len(), 3);
//! assert_eq!(route.get(1).unwrap().as_str(), Some("eu.example.org"));
//! # Ok::<(), upkeep::route::RouteError>(())
//! ```

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for route parsing failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// The input contained no keys at all.
    #[error("empty route")]
    Empty,

    /// A quoted key was never closed, or a closing quote was not followed by
    /// a delimiter.
    #[error("unbalanced quoting in route '{input}'")]
    UnbalancedQuote { input: String },
}

impl From<RouteError> for crate::Error {
    fn from(err: RouteError) -> Self {
        crate::Error::Route(err)
    }
}

/// A single step of a [`Route`].
///
/// Equality and hashing are defined over the raw value, so `Key::Text("1")`
/// and `Key::Int(1)` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// String key, the common case.
    Text(String),
    /// Integer key, for documents keyed by numbers.
    Int(i64),
    /// Boolean key.
    Bool(bool),
}

impl Key {
    /// Returns the string form of this key if it is a text key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value of this key if it is an integer key.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Text(s) => write!(f, "{s}"),
            Key::Int(n) => write!(f, "{n}"),
            Key::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Text(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Text(value)
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::Text(value.clone())
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(value as i64)
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Int(value as i64)
    }
}

impl From<bool> for Key {
    fn from(value: bool) -> Self {
        Key::Bool(value)
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

/// An immutable, ordered sequence of keys addressing a node in a document
/// tree.
///
/// The empty route addresses the document root itself; it is produced by
/// [`Route::root`] and cannot be parsed from a string.
///
/// Resolution against a tree is performed by the document types and never
/// fails with an error: a route that does not lead to a node simply resolves
/// to absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    keys: Arc<[Key]>,
}

impl Route {
    /// Returns the empty route, addressing the document root.
    pub fn root() -> Self {
        Route {
            keys: Vec::new().into(),
        }
    }

    /// Builds a route from an explicit key sequence.
    ///
    /// This is the entry point for routes over non-string keys.
    ///
    /// ```
    /// # use upkeep::route::{Key, Route};
    /// let route = Route::of(["servers", "primary"]);
    /// assert_eq!(route.len(), 2);
    ///
    /// let typed = Route::of([Key::Int(4), Key::Text("label".into())]);
    /// assert_eq!(typed.get(0), Some(&Key::Int(4)));
    /// ```
    pub fn of<K: Into<Key>>(keys: impl IntoIterator<Item = K>) -> Self {
        Route {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a route from a single key.
    pub fn single(key: impl Into<Key>) -> Self {
        Route {
            keys: vec![key.into()].into(),
        }
    }

    /// Parses a route from its delimited string form.
    ///
    /// The input is split on `delimiter`. A key may be wrapped in single
    /// quotes to contain the delimiter literally; a doubled quote inside a
    /// quoted key stands for one literal quote. Quotes are only recognized at
    /// the start of a key.
    ///
    /// All parsed keys are string keys. The empty input is rejected; empty
    /// segments between delimiters become empty string keys.
    pub fn parse(input: &str, delimiter: char) -> Result<Self, RouteError> {
        if input.is_empty() {
            return Err(RouteError::Empty);
        }

        let mut keys = Vec::new();
        let mut chars = input.chars().peekable();
        loop {
            let mut key = String::new();
            if chars.peek() == Some(&'\'') {
                chars.next();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    if c == '\'' {
                        if chars.peek() == Some(&'\'') {
                            chars.next();
                            key.push('\'');
                        } else {
                            closed = true;
                            break;
                        }
                    } else {
                        key.push(c);
                    }
                }
                // The closing quote must end the key.
                let at_boundary = matches!(chars.peek(), None) || chars.peek() == Some(&delimiter);
                if !closed || !at_boundary {
                    return Err(RouteError::UnbalancedQuote {
                        input: input.to_string(),
                    });
                }
            } else {
                while let Some(&c) = chars.peek() {
                    if c == delimiter {
                        break;
                    }
                    key.push(c);
                    chars.next();
                }
            }
            keys.push(Key::Text(key));

            match chars.next() {
                Some(_) => continue, // the delimiter; next key follows
                None => break,
            }
        }

        Ok(Route { keys: keys.into() })
    }

    /// Returns the number of keys in the route.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if this is the root route.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the key at `index`, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<&Key> {
        self.keys.get(index)
    }

    /// Returns the last key, or `None` for the root route.
    pub fn last(&self) -> Option<&Key> {
        self.keys.last()
    }

    /// Returns the keys as a slice.
    pub fn as_slice(&self) -> &[Key] {
        &self.keys
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.keys.iter()
    }

    /// Returns a new route with `key` appended.
    pub fn join(&self, key: impl Into<Key>) -> Route {
        let mut keys = self.keys.to_vec();
        keys.push(key.into());
        Route { keys: keys.into() }
    }

    /// Returns a new route with all of `other`'s keys appended.
    pub fn concat(&self, other: &Route) -> Route {
        let mut keys = self.keys.to_vec();
        keys.extend(other.keys.iter().cloned());
        Route { keys: keys.into() }
    }

    /// Returns the route without its last key, or `None` for the root route.
    pub fn parent(&self) -> Option<Route> {
        if self.keys.is_empty() {
            return None;
        }
        Some(Route {
            keys: self.keys[..self.keys.len() - 1].to_vec().into(),
        })
    }

    /// Returns the sub-route starting at `from` (inclusive).
    ///
    /// An index past the end yields the root route.
    pub fn sub_route(&self, from: usize) -> Route {
        if from >= self.keys.len() {
            return Route::root();
        }
        Route {
            keys: self.keys[from..].to_vec().into(),
        }
    }

    /// Returns `true` if `prefix`'s keys are a leading subsequence of this
    /// route's keys. Every route starts with the root route.
    pub fn starts_with(&self, prefix: &Route) -> bool {
        self.keys.len() >= prefix.keys.len() && self.keys[..prefix.keys.len()] == *prefix.keys
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            return write!(f, "(root)");
        }
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match key {
                Key::Text(s) if s.contains('.') => write!(f, "'{}'", s.replace('\'', "''"))?,
                key => write!(f, "{key}")?,
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for Route {
    type Err = RouteError;

    /// Parses with the default `.` delimiter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s, '.')
    }
}

impl From<Key> for Route {
    fn from(key: Key) -> Self {
        Route::single(key)
    }
}

impl From<&str> for Route {
    fn from(key: &str) -> Self {
        Route::single(key)
    }
}

impl From<String> for Route {
    fn from(key: String) -> Self {
        Route::single(key)
    }
}

/// Constructs a [`Route`] from a comma-separated list of keys.
///
/// ```
/// # use upkeep::{route, route::{Key, Route}};
/// let r = route!["server", "http", "port"];
/// assert_eq!(r.len(), 3);
///
/// // Typed keys mix freely
/// let r = route!["replicas", 0, "host"];
/// assert_eq!(r.get(1), Some(&Key::Int(0)));
/// ```
#[macro_export]
macro_rules! route {
    () => {
        $crate::route::Route::root()
    };
    ($($key:expr),+ $(,)?) => {
        $crate::route::Route::of([$($crate::route::Key::from($key)),+])
    };
}
