//! Entry points wiring a default record and optional helpers into a root dispatcher
//!
//! Both facades run the same engine. [`Builder`] exposes the engine's `build`, which a helper
//! could in principle intercept; [`HelperBuilder`] additionally guarantees a `build` that
//! always yields the record.
//!
//! The record passed in is not copied. Handing clones of one [`RecordHandle`] to two facades
//! makes them share, and mutate, the same record.


use std::ops::Deref;
use std::rc::Rc;

use error_stack::Report;
use serde::Serialize;

use crate::constants::TERMINAL_METHOD;
use crate::dispatcher::Dispatcher;
use crate::error::{Error, Result};
use crate::helpers::HelperTree;
use crate::record::RecordHandle;

/// Plain builder facade
///
/// Dereferences to its root [`Dispatcher`], so `builder.call("withName", ...)`,
/// `builder.at("address")` and `builder.build()` work directly.
#[derive(Debug, Clone)]
pub struct Builder {
    root: Dispatcher,
}

impl Builder {
    /// A builder over `default` with no helpers
    #[must_use]
    pub fn new(default: impl Into<RecordHandle>) -> Self {
        Self {
            root: Dispatcher::root(default.into(), None),
        }
    }

    /// A builder over `default` with the helper tree produced by `factory`
    ///
    /// `factory` runs once, with a throwaway root bound to the same record but without helpers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedHelperName`] if the tree has a root entry named `build`.
    pub fn with_helpers<F>(default: impl Into<RecordHandle>, factory: F) -> Result<Self>
    where
        F: FnOnce(&Dispatcher) -> HelperTree,
    {
        wire(default.into(), factory).map(|root| Self { root })
    }

    /// A builder over a serialized typed default record, with no helpers
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `default` cannot be represented as JSON.
    pub fn from_serialize<T: Serialize>(default: &T) -> Result<Self> {
        RecordHandle::from_serialize(default).map(Self::new)
    }

    /// The root dispatcher
    #[must_use]
    pub const fn root(&self) -> &Dispatcher { &self.root }
}

impl Deref for Builder {
    type Target = Dispatcher;

    fn deref(&self) -> &Self::Target { &self.root }
}

/// Terminal-guaranteed builder facade
///
/// Same engine as [`Builder`]; its inherent [`HelperBuilder::build`] always returns the record.
#[derive(Debug, Clone)]
pub struct HelperBuilder {
    root: Dispatcher,
}

impl HelperBuilder {
    /// A builder over `default` with the helper tree produced by `factory`
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedHelperName`] if the tree has a root entry named `build`.
    pub fn new<F>(default: impl Into<RecordHandle>, factory: F) -> Result<Self>
    where
        F: FnOnce(&Dispatcher) -> HelperTree,
    {
        wire(default.into(), factory).map(|root| Self { root })
    }

    /// A builder over a serialized typed default record
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `default` cannot be represented as JSON, or
    /// [`Error::ReservedHelperName`] as for [`HelperBuilder::new`].
    pub fn from_serialize<T, F>(default: &T, factory: F) -> Result<Self>
    where
        T: Serialize,
        F: FnOnce(&Dispatcher) -> HelperTree,
    {
        Self::new(RecordHandle::from_serialize(default)?, factory)
    }

    /// The shared record
    #[must_use]
    pub fn build(&self) -> RecordHandle { self.root.record().clone() }

    /// The root dispatcher
    #[must_use]
    pub const fn root(&self) -> &Dispatcher { &self.root }
}

impl Deref for HelperBuilder {
    type Target = Dispatcher;

    fn deref(&self) -> &Self::Target { &self.root }
}

fn wire<F>(record: RecordHandle, factory: F) -> Result<Dispatcher>
where
    F: FnOnce(&Dispatcher) -> HelperTree,
{
    let throwaway = Dispatcher::root(record.clone(), None);
    let helpers = factory(&throwaway);
    if helpers.contains(TERMINAL_METHOD) {
        return Err(Report::new(Error::reserved(TERMINAL_METHOD)));
    }
    tracing::debug!(helpers = ?helpers, "helper tree wired");
    Ok(Dispatcher::root(record, Some(Rc::new(helpers))))
}
