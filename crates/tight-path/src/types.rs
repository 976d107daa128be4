use crate::validate::{validate_path, PathError};
use std::fmt;
use std::str::FromStr;

/// A parsed, normalized dotted path such as `model.pages.current`.
///
/// Always holds at least one segment. The trailing-dot container form
/// (`model.`) normalizes to the same path as `model`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Parse a dotted path string.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        validate_path(input)?;
        let trimmed = input.trim();
        let body = trimmed.strip_suffix('.').unwrap_or(trimmed);
        Ok(Path {
            segments: body.split('.').map(str::to_string).collect(),
        })
    }

    /// Build a path from already split segments.
    ///
    /// Returns `None` when `segments` is empty or contains an empty segment.
    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|s| s.is_empty() || s.contains('.')) {
            return None;
        }
        Some(Path { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Paths are never empty; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment, i.e. the key assigned by `set`.
    pub fn key(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// The parent path, or `None` for a single-segment path.
    pub fn parent(&self) -> Option<Path> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Path {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// All leading partitions of this path, shortest first.
    ///
    /// `a.b.c` yields `a`, `a.b`, `a.b.c`.
    pub fn prefixes(&self) -> impl Iterator<Item = Path> + '_ {
        (1..=self.segments.len()).map(move |n| Path {
            segments: self.segments[..n].to_vec(),
        })
    }

    /// True if `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        crate::is_child(&self.segments, &other.segments)
    }

    /// True if `self` is a strict descendant of `other`.
    pub fn is_descendant_of(&self, other: &Path) -> bool {
        other.is_ancestor_of(self)
    }

    /// True if the paths are equal or one is an ancestor of the other.
    ///
    /// This is the relation that decides whether a write to one path must
    /// notify a subscriber on the other.
    pub fn is_related(&self, other: &Path) -> bool {
        let n = self.segments.len().min(other.segments.len());
        self.segments[..n] == other.segments[..n]
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format_path(&self.segments))
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl TryFrom<&str> for Path {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Path::parse(value)
    }
}
