//! What a dispatcher node offers, read from the live record
//!
//! The dispatcher accepts any name; this is the list of names that will actually do something
//! given the current shape of the record and the helper tree.

use serde::Serialize;

use crate::constants::TERMINAL_METHOD;
use crate::helpers::HelperTree;
use crate::naming::{MutatorName, mutator_name};
use crate::record::{FieldPath, RecordHandle, SegmentAccess};

/// Callable names at one dispatcher node
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BuilderSurface {
    /// Generated mutators for the fields of the value at this node, in record order
    pub mutators:  Vec<MutatorName>,
    /// Fields whose value is an object or array and can be navigated into
    pub navigable: Vec<String>,
    /// Helper entries (helpers and branches) registered below this node, sorted
    pub helpers:   Vec<String>,
    /// Whether invoking `build` here reaches the terminal rather than a helper
    pub terminal:  bool,
}

impl BuilderSurface {
    pub(crate) fn describe(
        record: &RecordHandle,
        helpers: Option<&HelperTree>,
        path: &FieldPath,
    ) -> Self {
        let value = record.get(path);
        let entries = value.as_ref().map(SegmentAccess::segments).unwrap_or_default();

        let mutators = entries
            .iter()
            .filter_map(|(field, _)| mutator_name(field))
            .collect();
        let navigable = entries
            .iter()
            .filter(|(_, child)| child.is_navigable())
            .map(|(field, _)| field.clone())
            .collect();

        let helper_names = helpers
            .and_then(|tree| tree.subtree(path))
            .map(HelperTree::names)
            .unwrap_or_default();
        let terminal = helpers
            .and_then(|tree| tree.helper_for(&path.child(TERMINAL_METHOD)))
            .is_none();

        Self {
            mutators,
            navigable,
            helpers: helper_names,
            terminal,
        }
    }

    /// Names of the generated mutators
    #[must_use]
    pub fn mutator_names(&self) -> Vec<&str> {
        self.mutators
            .iter()
            .map(|mutator| mutator.name.as_str())
            .collect()
    }
}
