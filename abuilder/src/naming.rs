//! Mutator naming: decoding called segments into field names, and suggesting mutator names
//!
//! Decoding is the runtime rule and the only one the dispatcher uses:
//!
//! | Segment          | Field          |
//! |------------------|----------------|
//! | `with_` + rest   | rest, verbatim |
//! | `with` + c + rest| lowercase(c) + rest |
//!
//! [`mutator_name`] goes the other way and only suggests names that decode back to the field.

use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::constants::{MUTATOR_PREFIX, VERBATIM_MUTATOR_PREFIX};

/// How a mutator name encodes its field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MutatorStyle {
    /// `withName` for `name`: first character case-folded
    CamelCase,
    /// `with_Age` for `Age`, `with__UnderScore` for `_UnderScore`: field taken verbatim
    Verbatim,
}

/// A generated mutator and the field it writes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MutatorName {
    /// Method name to call (e.g. `withStreet`)
    pub name:  String,
    /// Field the method writes (e.g. `street`)
    pub field: String,
    /// Encoding used by `name`
    pub style: MutatorStyle,
}

/// Decode a called segment into the field it targets
///
/// Returns `None` when the segment is not a mutator at all. A bare `with` or `with_` decodes
/// to an empty field name, which callers treat as a no-op.
#[must_use]
pub fn decode_mutator(segment: &str) -> Option<String> {
    if let Some(verbatim) = segment.strip_prefix(VERBATIM_MUTATOR_PREFIX) {
        return Some(verbatim.to_string());
    }
    let rest = segment.strip_prefix(MUTATOR_PREFIX)?;
    let mut chars = rest.chars();
    Some(chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    }))
}

/// Suggest the mutator name for `field`
///
/// Fields starting with an uppercase letter or an underscore use the verbatim `with_` form;
/// everything else capitalizes its first character after `with`. The same rule applies at
/// every depth. Returns `None` for the empty name and for names no mutator decodes back to
/// (e.g. a leading `ß`, whose uppercase form is two characters).
#[must_use]
pub fn mutator_name(field: &str) -> Option<MutatorName> {
    let mut chars = field.chars();
    let first = chars.next()?;

    let (name, style) = if first == '_' || first.is_uppercase() {
        (
            format!("{VERBATIM_MUTATOR_PREFIX}{field}"),
            MutatorStyle::Verbatim,
        )
    } else {
        let capitalized: String = first.to_uppercase().chain(chars).collect();
        (
            format!("{MUTATOR_PREFIX}{capitalized}"),
            MutatorStyle::CamelCase,
        )
    };

    (decode_mutator(&name).as_deref() == Some(field)).then(|| MutatorName {
        name,
        field: field.to_string(),
        style,
    })
}
