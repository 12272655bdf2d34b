//! # abuilder
//!
//! Chainable builders over nested JSON records, with no per-type builder code.
//!
//! A builder wraps one mutable record. Any chain of property accesses and calls is accepted;
//! when a call is invoked, its name is resolved against the record and an optional helper tree:
//!
//! 1. a helper registered at the called path runs instead of anything generated
//! 2. `build` yields the record
//! 3. `withName` writes field `name`, `with_Age` writes field `Age` (everything after `with_`
//!    is taken verbatim)
//! 4. anything else is a silent no-op
//!
//! Every accepted call hands back a fresh root, so chains can hop between nesting levels.
//!
//! ```
//! use abuilder::{Builder, HelperTree};
//! use serde_json::json;
//!
//! let builder = Builder::with_helpers(
//!     json!({"name": "John", "age": 30, "address": {"street": "123 Main St"}}),
//!     |builder| {
//!         let builder = builder.clone();
//!         HelperTree::new().helper("withFullName", move |_, args| {
//!             let first = args[0].as_str().unwrap_or_default();
//!             let last = args[1].as_str().unwrap_or_default();
//!             builder.call("withName", &[json!(format!("{first} {last}"))])
//!         })
//!     },
//! )?;
//!
//! let person = builder
//!     .call("withFullName", &[json!("Jane"), json!("Doe")])
//!     .at("address")
//!     .call("withStreet", &[json!("456 Elm")])
//!     .build()
//!     .into_value();
//!
//! assert_eq!(
//!     person,
//!     Some(json!({"name": "Jane Doe", "age": 30, "address": {"street": "456 Elm"}}))
//! );
//! # Ok::<(), error_stack::Report<abuilder::Error>>(())
//! ```
//!
//! The record is shared, never copied: every dispatcher and every [`RecordHandle`] of a
//! session sees every write immediately. Sessions are single-threaded (`!Send`).

pub mod constants;
mod dispatcher;
mod error;
mod facade;
mod helpers;
mod naming;
mod record;
mod surface;
pub mod tracing_support;

pub use dispatcher::{Dispatch, Dispatcher};
pub use error::{Error, Result};
pub use facade::{Builder, HelperBuilder};
pub use helpers::{HelperFn, HelperNode, HelperTree};
pub use naming::{MutatorName, MutatorStyle, decode_mutator, mutator_name};
pub use record::{FieldPath, RecordHandle, SegmentAccess, deep_get, deep_set};
pub use surface::BuilderSurface;
