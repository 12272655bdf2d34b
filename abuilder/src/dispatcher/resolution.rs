//! Classifying an invoked path
//!
//! The order below is fixed: helper, terminal, mutator, unrecognized.

use strum::IntoStaticStr;

use crate::constants::TERMINAL_METHOD;
use crate::helpers::{HelperFn, HelperTree};
use crate::naming::decode_mutator;
use crate::record::FieldPath;

/// What invoking a path means
#[derive(IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub(super) enum Resolution {
    /// A helper sits at the path and takes priority over everything else
    Helper(HelperFn),
    /// The last segment is `build`
    Terminal,
    /// The last segment is a mutator writing `target`
    Mutator { target: FieldPath },
    /// The last segment is a mutator that decodes to no field (`with`, `with_`)
    EmptyField,
    /// Nothing matches
    Unrecognized,
}

impl Resolution {
    pub(super) fn of(path: &FieldPath, helpers: Option<&HelperTree>) -> Self {
        if let Some(helper) = helpers.and_then(|tree| tree.helper_for(path)) {
            return Self::Helper(helper);
        }

        let Some(last) = path.last() else {
            return Self::Unrecognized;
        };

        if last == TERMINAL_METHOD {
            return Self::Terminal;
        }

        match decode_mutator(last) {
            Some(field) if field.is_empty() => Self::EmptyField,
            Some(field) => Self::Mutator {
                target: path.with_last(field),
            },
            None => Self::Unrecognized,
        }
    }

    pub(super) fn kind(&self) -> &'static str { self.into() }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic, reason = "let-else arms report the unexpected resolution")]

    use serde_json::Value;

    use super::*;
    use crate::dispatcher::Dispatcher;

    fn noop(_: &Dispatcher, _: &[Value]) {}

    fn kind(path: &str, helpers: Option<&HelperTree>) -> &'static str {
        Resolution::of(&FieldPath::parse(path), helpers).kind()
    }

    #[test]
    fn test_resolution_order() {
        let helpers = HelperTree::new()
            .helper("withName", noop)
            .helper_at("address.build", noop);

        assert_eq!(kind("withName", Some(&helpers)), "helper");
        assert_eq!(kind("withName", None), "mutator");
        assert_eq!(kind("address.build", Some(&helpers)), "helper");
        assert_eq!(kind("build", Some(&helpers)), "terminal");
        assert_eq!(kind("address.withStreet", Some(&helpers)), "mutator");
        assert_eq!(kind("address", Some(&helpers)), "unrecognized");
        assert_eq!(kind("", Some(&helpers)), "unrecognized");
        assert_eq!(kind("with", None), "empty_field");
        assert_eq!(kind("address.with_", None), "empty_field");
    }

    #[test]
    fn test_mutator_target_replaces_last_segment() {
        let resolution = Resolution::of(&FieldPath::parse("work.workAddress.withStreet"), None);
        let Resolution::Mutator { target } = &resolution else {
            panic!("expected a mutator, got {}", resolution.kind());
        };
        assert_eq!(target.to_string(), "work.workAddress.street");
    }

    #[test]
    fn test_branch_does_not_shadow() {
        // A branch at the invoked path is not callable, so generated behavior still applies
        let helpers = HelperTree::new().branch("withName", HelperTree::new());
        assert_eq!(kind("withName", Some(&helpers)), "mutator");
    }
}
