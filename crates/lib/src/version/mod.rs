//! Format-version markers: patterns, versions and version chains.
//!
//! A document's format generation is recorded as a plain scalar at a
//! caller-chosen route (e.g. `config-version: 2`). This module gives those
//! markers structure:
//!
//! - A [`Segment`] describes one position of a version string — either an
//!   ordered list of literal alternatives or a bounded numeric range.
//! - A [`Pattern`] is an ordered list of segments; it parses marker strings
//!   into [`Version`]s and defines which versions exist and in what order.
//! - A [`Version`] is a cursor vector into its pattern. Versions are totally
//!   ordered and support [`Version::next`], the successor stepping used to
//!   enumerate the transitions between two releases.
//!
//! Plain integer markers are just a one-segment pattern; dotted markers are
//! ranges interleaved with literal separators.
//!
//! ```
//! use upkeep::version::{Pattern, Segment};
//!
//! let pattern = Pattern::new(vec![
//!     Segment::range(1, 100)?,
//!     Segment::literal(["."])?,
//!     Segment::range(0, 10)?,
//! ])?;
//!
//! let v13 = pattern.parse("1.3").unwrap();
//! let v20 = pattern.parse("2.0").unwrap();
//! assert!(v13 < v20);
//!
//! // Odometer stepping: 1.9 -> 2.0
//! let v19 = pattern.parse("1.9").unwrap();
//! assert_eq!(v19.next().unwrap(), v20);
//! # Ok::<(), upkeep::Error>(())
//! ```

use std::{cmp::Ordering, fmt, hash::Hash, sync::Arc};

pub mod errors;

pub use errors::VersionError;

use crate::{Document, node::Scalar, route::Route};

/// One position of a version pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Ordered literal alternatives; earlier alternatives are older.
    Literal(Vec<String>),
    /// Numeric range `[from, to)`, optionally zero-filled to a fixed width
    /// when rendered.
    Range {
        from: u64,
        to: u64,
        fill: Option<usize>,
    },
}

impl Segment {
    /// Creates a literal segment from ordered alternatives.
    ///
    /// # Errors
    ///
    /// Fails if no alternative is given or any alternative is empty.
    pub fn literal<S: Into<String>>(
        alternatives: impl IntoIterator<Item = S>,
    ) -> Result<Self, VersionError> {
        let alternatives: Vec<String> = alternatives.into_iter().map(Into::into).collect();
        if alternatives.is_empty() || alternatives.iter().any(String::is_empty) {
            return Err(VersionError::InvalidPattern {
                reason: "literal segments need at least one non-empty alternative".to_string(),
            });
        }
        Ok(Segment::Literal(alternatives))
    }

    /// Creates a numeric range segment covering `[from, to)`.
    pub fn range(from: u64, to: u64) -> Result<Self, VersionError> {
        Self::build_range(from, to, None)
    }

    /// Creates a numeric range segment rendered zero-filled to `width`
    /// digits (e.g. `07`).
    pub fn padded_range(from: u64, to: u64, width: usize) -> Result<Self, VersionError> {
        Self::build_range(from, to, Some(width))
    }

    fn build_range(from: u64, to: u64, fill: Option<usize>) -> Result<Self, VersionError> {
        if from >= to {
            return Err(VersionError::InvalidPattern {
                reason: format!("empty range [{from}, {to})"),
            });
        }
        Ok(Segment::Range { from, to, fill })
    }

    /// Number of states this segment can take.
    fn states(&self) -> u64 {
        match self {
            Segment::Literal(alternatives) => alternatives.len() as u64,
            Segment::Range { from, to, .. } => to - from,
        }
    }

    /// Renders the state at `cursor`.
    fn render(&self, cursor: u64) -> String {
        match self {
            Segment::Literal(alternatives) => alternatives[cursor as usize].clone(),
            Segment::Range { from, fill, .. } => {
                let value = from + cursor;
                match fill {
                    Some(width) => format!("{value:0>width$}", width = *width),
                    None => value.to_string(),
                }
            }
        }
    }

    /// Matches this segment at the start of `input`, returning the cursor
    /// and the number of bytes consumed.
    fn match_prefix(&self, input: &str) -> Option<(u64, usize)> {
        match self {
            Segment::Literal(alternatives) => alternatives
                .iter()
                .enumerate()
                .find(|(_, alt)| input.starts_with(alt.as_str()))
                .map(|(i, alt)| (i as u64, alt.len())),
            Segment::Range { from, to, fill } => {
                let digits = match fill {
                    Some(width) => {
                        if input.len() < *width
                            || !input[..*width].bytes().all(|b| b.is_ascii_digit())
                        {
                            return None;
                        }
                        &input[..*width]
                    }
                    None => {
                        let end = input
                            .find(|c: char| !c.is_ascii_digit())
                            .unwrap_or(input.len());
                        if end == 0 {
                            return None;
                        }
                        &input[..end]
                    }
                };
                let value: u64 = digits.parse().ok()?;
                if value < *from || value >= *to {
                    return None;
                }
                Some((value - from, digits.len()))
            }
        }
    }
}

/// An ordered list of segments defining the shape and ordering of version
/// markers.
///
/// Patterns are cheap to clone; the segment list is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    segments: Arc<[Segment]>,
}

impl Pattern {
    /// Creates a pattern from its segments.
    ///
    /// # Errors
    ///
    /// Fails if no segment is given.
    pub fn new(segments: Vec<Segment>) -> Result<Self, VersionError> {
        if segments.is_empty() {
            return Err(VersionError::InvalidPattern {
                reason: "a pattern needs at least one segment".to_string(),
            });
        }
        Ok(Pattern {
            segments: segments.into(),
        })
    }

    /// Convenience constructor for the common single-integer marker
    /// (`config-version: 2`), covering versions `1` to `u32::MAX`.
    pub fn integer() -> Self {
        Pattern {
            segments: Arc::from([Segment::Range {
                from: 1,
                to: u32::MAX as u64,
                fill: None,
            }]),
        }
    }

    /// Parses a marker string against this pattern. Every segment must
    /// match and the entire input must be consumed; anything else is absent.
    pub fn parse(&self, input: &str) -> Option<Version> {
        let mut cursors = Vec::with_capacity(self.segments.len());
        let mut rest = input;
        for segment in self.segments.iter() {
            let (cursor, consumed) = segment.match_prefix(rest)?;
            cursors.push(cursor);
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            return None;
        }
        Some(Version {
            pattern: self.clone(),
            cursors,
        })
    }

    /// Returns the oldest version this pattern can express.
    pub fn first(&self) -> Version {
        Version {
            pattern: self.clone(),
            cursors: vec![0; self.segments.len()],
        }
    }

    /// Reads and parses the version marker of `document` at `route`.
    ///
    /// Integer and text scalars are accepted; a missing node, a non-scalar
    /// node or a marker that does not match the pattern all yield `None`.
    pub fn extract(&self, document: &Document, route: &Route) -> Option<Version> {
        let scalar = document.get(route)?.as_scalar()?;
        let raw = match scalar {
            Scalar::Int(n) => n.to_string(),
            Scalar::Text(s) => s.clone(),
            _ => return None,
        };
        self.parse(&raw)
    }
}

/// A parsed version marker: a cursor vector into its [`Pattern`].
///
/// Ordering, equality and hashing are defined over the cursors alone;
/// comparing versions parsed from different patterns is not meaningful.
#[derive(Debug, Clone)]
pub struct Version {
    pattern: Pattern,
    cursors: Vec<u64>,
}

impl Version {
    /// Returns the successor of this version: the least significant segment
    /// steps forward, carrying left on overflow like an odometer. Returns
    /// `None` when the most significant segment overflows.
    pub fn next(&self) -> Option<Version> {
        let mut cursors = self.cursors.clone();
        for (i, segment) in self.pattern.segments.iter().enumerate().rev() {
            if cursors[i] + 1 < segment.states() {
                cursors[i] += 1;
                return Some(Version {
                    pattern: self.pattern.clone(),
                    cursors,
                });
            }
            cursors[i] = 0;
        }
        None
    }

    /// Renders this version as a plain integer when its string form is one,
    /// so markers written as `config-version: 2` stay integers on stamp.
    /// Zero-padded forms are not integers; their padding is significant.
    pub fn as_int(&self) -> Option<i64> {
        let rendered = self.to_string();
        rendered
            .parse::<i64>()
            .ok()
            .filter(|n| n.to_string() == rendered)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (segment, cursor) in self.pattern.segments.iter().zip(&self.cursors) {
            write!(f, "{}", segment.render(*cursor))?;
        }
        Ok(())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cursors == other.cursors
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.cursors.hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cursors.cmp(&other.cursors)
    }
}

/// Enumerates every version strictly after `from` up to and including `to`,
/// in ascending order. `from == to` yields the empty chain.
///
/// # Errors
///
/// Returns [`VersionError::ChainUnreachable`] if `from > to` or successor
/// stepping cannot reach `to`.
pub fn chain(from: &Version, to: &Version) -> Result<Vec<Version>, VersionError> {
    if from > to {
        return Err(VersionError::ChainUnreachable {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let mut transitions = Vec::new();
    let mut current = from.clone();
    while &current < to {
        match current.next() {
            Some(next) => {
                transitions.push(next.clone());
                current = next;
            }
            None => {
                return Err(VersionError::ChainUnreachable {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
        }
    }
    Ok(transitions)
}
