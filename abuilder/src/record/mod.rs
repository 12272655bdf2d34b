//! The shared record a builder session mutates
//!
//! One [`RecordHandle`] per session. Every dispatcher, facade and terminal result holds a clone
//! of the same handle, so a write through any of them is visible through all others.

mod access;
mod path;

use std::cell::RefCell;
use std::rc::Rc;

pub use access::SegmentAccess;
use error_stack::ResultExt;
pub use path::{FieldPath, deep_get, deep_set};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};

/// Reference-counted handle to the single mutable record of a session
///
/// Cloning the handle never copies the record. Two sessions built from clones of one handle
/// share the record and observe each other's writes.
#[derive(Debug, Clone, Default)]
pub struct RecordHandle(Rc<RefCell<Value>>);

impl RecordHandle {
    /// Wrap `value` as a new session record
    #[must_use]
    pub fn new(value: Value) -> Self { Self(Rc::new(RefCell::new(value))) }

    /// Serialize a typed default record into a new session record
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `value` cannot be represented as JSON.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .change_context(Error::cannot("serialize default record", "not representable as JSON"))
            .map(Self::new)
    }

    /// A copy of the current record state
    #[must_use]
    pub fn snapshot(&self) -> Value { self.0.borrow().clone() }

    /// A copy of the value at `path`, or `None` when absent
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<Value> { deep_get(&self.0.borrow(), path).cloned() }

    /// Write `value` at `path`, see [`deep_set`]
    ///
    /// # Errors
    ///
    /// Propagates the [`deep_set`] errors; the record is unchanged on error.
    pub fn set(&self, path: &FieldPath, value: Value) -> Result<()> {
        deep_set(&mut self.0.borrow_mut(), path, value)
    }

    /// Deserialize the current record state into `T`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the record does not match `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.snapshot()).change_context(Error::cannot(
            "deserialize record",
            std::any::type_name::<T>(),
        ))
    }

    /// Whether both handles refer to the same record
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }
}

impl From<Value> for RecordHandle {
    fn from(value: Value) -> Self { Self::new(value) }
}

impl PartialEq<Value> for RecordHandle {
    fn eq(&self, other: &Value) -> bool { *self.0.borrow() == *other }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "tests fail loudly on unexpected state")]

    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Address {
        street: String,
        zip:    String,
    }

    #[test]
    fn test_clones_share_one_record() {
        let handle = RecordHandle::new(json!({"name": "John"}));
        let alias = handle.clone();

        alias
            .set(&FieldPath::parse("name"), json!("Jane"))
            .expect("write should succeed");

        assert!(handle.ptr_eq(&alias));
        assert_eq!(handle, json!({"name": "Jane"}));
        assert_eq!(handle.get(&FieldPath::parse("name")), Some(json!("Jane")));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let handle = RecordHandle::new(json!({"age": 30}));
        let before = handle.snapshot();
        handle
            .set(&FieldPath::parse("age"), json!(31))
            .expect("write should succeed");

        assert_eq!(before, json!({"age": 30}));
        assert_eq!(handle.snapshot(), json!({"age": 31}));
    }

    #[test]
    fn test_typed_round_trip() {
        let handle = RecordHandle::from_serialize(&Address {
            street: "123 Main St".to_string(),
            zip:    "12345".to_string(),
        })
        .expect("struct should serialize");

        handle
            .set(&FieldPath::parse("street"), json!("456 Elm"))
            .expect("write should succeed");

        let address: Address = handle.deserialize().expect("record should still be an Address");
        assert_eq!(address.street, "456 Elm");
        assert_eq!(address.zip, "12345");
    }

    #[test]
    fn test_deserialize_mismatch_is_reported() {
        let handle = RecordHandle::new(json!({"street": 1}));
        let report = handle
            .deserialize::<Address>()
            .expect_err("number is not a street name");
        assert!(matches!(report.current_context(), Error::Serialization(_)));
    }
}
