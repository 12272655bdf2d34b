//! Extension trait for segment-wise JSON access
//!
//! A segment addresses an object key or, on arrays, a decimal index. This is the single place
//! that knows how a path segment maps onto a `serde_json::Value`.

use serde_json::{Map, Value};

/// Extension trait for addressing a child value by path segment
pub trait SegmentAccess {
    /// Get the child addressed by `segment`
    fn get_segment<T: AsRef<str>>(&self, segment: T) -> Option<&Value>;

    /// Children as `(segment, value)` pairs, in record order
    ///
    /// Objects yield their keys, arrays their indices. Scalars have no children.
    fn segments(&self) -> Vec<(String, &Value)>;

    /// Whether the builder can navigate into this value
    fn is_navigable(&self) -> bool;
}

impl SegmentAccess for Value {
    fn get_segment<T: AsRef<str>>(&self, segment: T) -> Option<&Self> {
        match self {
            Self::Object(map) => map.get_segment(segment),
            Self::Array(items) => segment
                .as_ref()
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        }
    }

    fn segments(&self) -> Vec<(String, &Self)> {
        match self {
            Self::Object(map) => map.segments(),
            Self::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn is_navigable(&self) -> bool { matches!(self, Self::Array(_) | Self::Object(_)) }
}

impl SegmentAccess for Map<String, Value> {
    fn get_segment<T: AsRef<str>>(&self, segment: T) -> Option<&Value> {
        self.get(segment.as_ref())
    }

    fn segments(&self) -> Vec<(String, &Value)> {
        self.iter().map(|(key, value)| (key.clone(), value)).collect()
    }

    fn is_navigable(&self) -> bool {
        // A Map is always a JSON object
        true
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_get_segment_by_key_and_index() {
        let value = json!({"name": "John", "tags": ["a", "b"]});
        assert_eq!(value.get_segment("name"), Some(&json!("John")));
        assert_eq!(
            value.get_segment("tags").and_then(|tags| tags.get_segment("1")),
            Some(&json!("b"))
        );
        assert_eq!(value.get_segment("missing"), None);
        assert_eq!(json!(3).get_segment("x"), None);
    }

    #[test]
    fn test_segments_keep_record_order() {
        let value = json!({"zeta": 1, "alpha": {"x": 1}, "tags": [true]});
        let keys: Vec<String> = value.segments().into_iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["zeta", "alpha", "tags"]);

        let navigable: Vec<String> = value
            .segments()
            .into_iter()
            .filter(|(_, child)| child.is_navigable())
            .map(|(key, _)| key)
            .collect();
        assert_eq!(navigable, ["alpha", "tags"]);
        assert!(!Value::Null.is_navigable());
    }
}
