use serde::Serialize;

/// A (possibly nested) property reference such as `address.city`.
///
/// Always holds at least one segment and no segment is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PropertyPath(Vec<String>);

impl PropertyPath {
    /// Build a path from its segments. Returns `None` when the list is empty
    /// or any segment is empty.
    pub fn new<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(String::is_empty) {
            return None;
        }
        Some(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: a path has at least one segment.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl std::fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Accumulates the segments of the path currently being scanned.
#[derive(Debug, Default)]
pub(crate) struct PathBuilder {
    segments: Vec<String>,
}

impl PathBuilder {
    /// Push a segment as written in the method name; its first letter is lower-cased.
    pub(crate) fn push(&mut self, text: &str) {
        let mut chars = text.chars();
        let segment = match chars.next() {
            Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
            None => return,
        };
        self.segments.push(segment);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Take the accumulated path, leaving the builder empty.
    pub(crate) fn take(&mut self) -> Option<PropertyPath> {
        PropertyPath::new(std::mem::take(&mut self.segments))
    }
}
