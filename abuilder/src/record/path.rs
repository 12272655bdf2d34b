//! Field paths and the deep get/set primitives over a JSON record
//!
//! A [`FieldPath`] is an ordered list of segments. Segments are atomic: a segment added with
//! [`FieldPath::push`] may itself contain a `.` and still address a single key. Only
//! [`FieldPath::parse`] splits on the separator.

use std::fmt::Display;
use std::ops::Deref;

use error_stack::Report;
use serde_json::Value;

use super::access::SegmentAccess;
use crate::constants::PATH_SEPARATOR;
use crate::error::{Error, Result};

/// Path from the record root to a value (e.g. `work.department.location`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// The empty path, addressing the record root
    #[must_use]
    pub const fn root() -> Self { Self(Vec::new()) }

    /// Split a dotted string into segments; the empty string is the root path
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        Self(dotted.split(PATH_SEPARATOR).map(String::from).collect())
    }

    /// Append one segment
    pub fn push(&mut self, segment: impl Into<String>) { self.0.push(segment.into()); }

    /// A new path with `segment` appended
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut child = self.clone();
        child.push(segment);
        child
    }

    /// The last segment, if any
    #[must_use]
    pub fn last(&self) -> Option<&str> { self.0.last().map(String::as_str) }

    /// Everything but the last segment
    #[must_use]
    pub fn parent(&self) -> Self {
        let mut parent = self.clone();
        parent.0.pop();
        parent
    }

    /// The same path with its last segment replaced by `segment`
    ///
    /// On the root path this is a single-segment path.
    #[must_use]
    pub fn with_last(&self, segment: impl Into<String>) -> Self { self.parent().child(segment) }

    /// Whether this is the root path
    #[must_use]
    pub fn is_root(&self) -> bool { self.0.is_empty() }

    /// The segments in order
    #[must_use]
    pub fn segments(&self) -> &[String] { &self.0 }
}

impl Deref for FieldPath {
    type Target = [String];

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl From<&str> for FieldPath {
    fn from(dotted: &str) -> Self { Self::parse(dotted) }
}

impl From<Vec<String>> for FieldPath {
    fn from(segments: Vec<String>) -> Self { Self(segments) }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            if !first {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

/// The value at `path`, or `None` when any segment is absent
///
/// Objects are addressed by key, arrays by decimal index.
#[must_use]
pub fn deep_get<'a>(record: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.iter()
        .try_fold(record, |current, segment| current.get_segment(segment))
}

/// Write `value` at `path`
///
/// Every container above the last segment must already exist: no intermediate object or
/// array is created. The last segment may add a new key to an existing object; on an array it
/// must be an index within bounds.
///
/// # Errors
///
/// - [`Error::InvalidPath`] for the root path or a non-numeric segment applied to an array
/// - [`Error::EmptyFieldName`] when the last segment is empty
/// - [`Error::MissingContainer`] when an intermediate value is absent or is not an object or
///   array
/// - [`Error::IndexOutOfBounds`] when an array index is past the end
pub fn deep_set(record: &mut Value, path: &FieldPath, value: Value) -> Result<()> {
    let Some(last) = path.last() else {
        return Err(Report::new(Error::invalid("path", "cannot set the record root")));
    };
    if last.is_empty() {
        return Err(Report::new(Error::EmptyFieldName(path.to_string())));
    }

    let parent_path = path.parent();
    let mut current = record;
    let mut walked = FieldPath::root();
    for segment in parent_path.iter() {
        walked.push(segment.as_str());
        current = match current {
            Value::Array(items) => {
                let index = parse_index(segment, &walked)?;
                let len = items.len();
                items.get_mut(index).ok_or_else(|| {
                    Report::new(Error::IndexOutOfBounds {
                        path: walked.parent().to_string(),
                        index,
                        len,
                    })
                })?
            }
            Value::Object(map) => map
                .get_mut(segment.as_str())
                .ok_or_else(|| Report::new(Error::missing("container", &walked)))?,
            _ => return Err(Report::new(Error::missing("container", &walked))),
        };
    }

    match current {
        Value::Object(map) => {
            map.insert(last.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let index = parse_index(last, path)?;
            let len = items.len();
            let slot = items.get_mut(index).ok_or_else(|| {
                Report::new(Error::IndexOutOfBounds {
                    path: parent_path.to_string(),
                    index,
                    len,
                })
            })?;
            *slot = value;
            Ok(())
        }
        _ => Err(Report::new(Error::missing("container", &parent_path))),
    }
}

fn parse_index(segment: &str, path: &FieldPath) -> Result<usize> {
    segment.parse::<usize>().map_err(|_| {
        Report::new(Error::invalid("array index", format!("'{segment}'")))
            .attach(format!("Path: '{path}'"))
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "tests fail loudly on unexpected state")]

    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_and_display() {
        let path = FieldPath::parse("work.department.location");
        assert_eq!(path.len(), 3);
        assert_eq!(path.last(), Some("location"));
        assert_eq!(path.to_string(), "work.department.location");
        assert!(FieldPath::parse("").is_root());
        assert_eq!(FieldPath::root().to_string(), "");
    }

    #[test]
    fn test_pushed_segments_stay_atomic() {
        let path = FieldPath::root().child("a.b");
        assert_eq!(path.len(), 1, "push must not split on the separator");

        let record = json!({"a.b": 1, "a": {"b": 2}});
        assert_eq!(deep_get(&record, &path), Some(&json!(1)));
        assert_eq!(deep_get(&record, &FieldPath::parse("a.b")), Some(&json!(2)));
    }

    #[test]
    fn test_with_last_replaces_final_segment() {
        let path = FieldPath::parse("address.withStreet");
        assert_eq!(path.with_last("street").to_string(), "address.street");
        assert_eq!(FieldPath::root().with_last("name").to_string(), "name");
    }

    #[test]
    fn test_deep_get_objects_and_arrays() {
        let record = json!({"tags": ["a", "b"], "address": {"street": "Main"}});
        assert_eq!(
            deep_get(&record, &FieldPath::parse("address.street")),
            Some(&json!("Main"))
        );
        assert_eq!(
            deep_get(&record, &FieldPath::parse("tags.1")),
            Some(&json!("b"))
        );
        assert_eq!(deep_get(&record, &FieldPath::root()), Some(&record));
        assert_eq!(deep_get(&record, &FieldPath::parse("tags.9")), None);
        assert_eq!(deep_get(&record, &FieldPath::parse("address.city")), None);
        assert_eq!(deep_get(&record, &FieldPath::parse("address.street.x")), None);
    }

    #[test]
    fn test_deep_set_replaces_and_adds_final_key() {
        let mut record = json!({"address": {"street": "Main"}, "tags": ["a", "b"]});

        deep_set(&mut record, &FieldPath::parse("address.street"), json!("Elm"))
            .expect("existing key should be writable");
        deep_set(&mut record, &FieldPath::parse("address.city"), json!("Anytown"))
            .expect("new key in an existing object should be writable");
        deep_set(&mut record, &FieldPath::parse("tags.0"), json!("z"))
            .expect("in-bounds index should be writable");

        assert_eq!(
            record,
            json!({"address": {"street": "Elm", "city": "Anytown"}, "tags": ["z", "b"]})
        );
    }

    #[test]
    fn test_deep_set_never_creates_intermediates() {
        let mut record = json!({"name": "John", "contact": null});
        let before = record.clone();

        let missing = deep_set(&mut record, &FieldPath::parse("address.street"), json!("x"))
            .expect_err("missing intermediate must fail");
        assert!(matches!(
            missing.current_context(),
            Error::MissingContainer(_)
        ));

        let null = deep_set(&mut record, &FieldPath::parse("contact.email"), json!("x"))
            .expect_err("null intermediate must fail");
        assert!(matches!(null.current_context(), Error::MissingContainer(_)));

        let scalar = deep_set(&mut record, &FieldPath::parse("name.first"), json!("x"))
            .expect_err("scalar intermediate must fail");
        assert!(matches!(
            scalar.current_context(),
            Error::MissingContainer(_)
        ));

        assert_eq!(record, before, "failed writes must leave the record untouched");
    }

    #[test]
    fn test_deep_set_rejects_bad_segments() {
        let mut record = json!({"tags": ["a"]});

        let out_of_bounds = deep_set(&mut record, &FieldPath::parse("tags.3"), json!("x"))
            .expect_err("index past the end must fail");
        assert_eq!(
            out_of_bounds.current_context(),
            &Error::IndexOutOfBounds {
                path:  "tags".to_string(),
                index: 3,
                len:   1,
            }
        );

        let not_index = deep_set(&mut record, &FieldPath::parse("tags.first"), json!("x"))
            .expect_err("non-numeric array segment must fail");
        assert!(matches!(not_index.current_context(), Error::InvalidPath(_)));

        let empty = deep_set(&mut record, &FieldPath::parse("meta."), json!("x"))
            .expect_err("empty field name must fail");
        assert_eq!(
            empty.current_context(),
            &Error::EmptyFieldName("meta.".to_string())
        );

        let root = deep_set(&mut record, &FieldPath::root(), json!("x"))
            .expect_err("root path must fail");
        assert!(matches!(root.current_context(), Error::InvalidPath(_)));

        assert_eq!(record, json!({"tags": ["a"]}));
    }
}
