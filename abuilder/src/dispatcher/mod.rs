//! The path dispatcher
//!
//! A [`Dispatcher`] is a position in an unbounded virtual call tree. [`Dispatcher::at`] only
//! extends the path; [`Dispatcher::invoke`] resolves the path once against the helper tree and
//! the record, and yields a [`Dispatch`].
//!
//! Every dispatcher of a session shares one [`RecordHandle`] and one helper tree. Nodes are
//! never mutated after creation; each accepted call hands back a fresh root.

mod resolution;

use std::fmt::Debug;
use std::rc::Rc;

use resolution::Resolution;
use serde_json::Value;

use crate::constants::TERMINAL_METHOD;
use crate::error::Error;
use crate::helpers::HelperTree;
use crate::record::{FieldPath, RecordHandle};
use crate::surface::BuilderSurface;

/// A node of the virtual call tree: the shared record, the shared helpers and a path
#[derive(Clone)]
pub struct Dispatcher {
    record:  RecordHandle,
    helpers: Option<Rc<HelperTree>>,
    path:    FieldPath,
}

impl Dispatcher {
    /// A root node (empty path) over `record`
    ///
    /// Without helpers this is the surface a helper factory sees: generated mutators,
    /// navigation and `build`, but no helper entries.
    pub(crate) const fn root(record: RecordHandle, helpers: Option<Rc<HelperTree>>) -> Self {
        Self {
            record,
            helpers,
            path: FieldPath::root(),
        }
    }

    /// Access property `segment`: a new node one level deeper
    ///
    /// Never fails and has no side effects. `segment` is kept whole, even if it contains `.`.
    #[must_use]
    pub fn at(&self, segment: impl Into<String>) -> Self {
        Self {
            record:  self.record.clone(),
            helpers: self.helpers.clone(),
            path:    self.path.child(segment),
        }
    }

    /// Access a dotted chain of properties at once (`work.department.location`)
    #[must_use]
    pub fn navigate(&self, dotted: &str) -> Self {
        FieldPath::parse(dotted)
            .iter()
            .fold(self.clone(), |node, segment| node.at(segment.as_str()))
    }

    /// Invoke this node with `args`
    ///
    /// Resolution order:
    /// 1. a helper at this path runs with `args`, then the chain continues from a fresh root
    /// 2. a last segment of `build` yields the shared record
    /// 3. a `with...` last segment writes `args[0]` (or `null`) to the decoded field, then the
    ///    chain continues from a fresh root
    /// 4. anything else is a no-op yielding [`Dispatch::Unrecognized`]
    ///
    /// A mutator whose write fails (missing intermediate, bad index, empty field name) is also
    /// a no-op yielding [`Dispatch::Unrecognized`].
    pub fn invoke(&self, args: &[Value]) -> Dispatch {
        let resolution = Resolution::of(&self.path, self.helpers.as_deref());
        tracing::trace!(
            path = %self.path,
            resolution = resolution.kind(),
            args = args.len(),
            "dispatching"
        );

        match resolution {
            Resolution::Helper(helper) => {
                let root = self.fresh_root();
                helper(&root, args);
                Dispatch::Chain(root)
            }
            Resolution::Terminal => Dispatch::Terminal(self.record.clone()),
            Resolution::Mutator { target } => {
                let value = args.first().cloned().unwrap_or(Value::Null);
                match self.record.set(&target, value) {
                    Ok(()) => Dispatch::Chain(self.fresh_root()),
                    Err(report) => {
                        tracing::debug!(
                            path = %self.path,
                            target = %target,
                            "mutator ignored: {report:?}"
                        );
                        Dispatch::Unrecognized
                    }
                }
            }
            Resolution::EmptyField => {
                let error = Error::EmptyFieldName(self.path.to_string());
                tracing::debug!(path = %self.path, "mutator ignored: {error}");
                Dispatch::Unrecognized
            }
            Resolution::Unrecognized => {
                tracing::debug!(path = %self.path, "unrecognized invocation");
                Dispatch::Unrecognized
            }
        }
    }

    /// Access `name`, then invoke it with `args`
    pub fn call(&self, name: impl Into<String>, args: &[Value]) -> Dispatch {
        self.at(name).invoke(args)
    }

    /// Invoke `build` at this node
    ///
    /// A helper registered at `<path>.build` takes priority, as for any other name.
    pub fn build(&self) -> Dispatch { self.call(TERMINAL_METHOD, &[]) }

    /// The path taken to reach this node
    #[must_use]
    pub const fn path(&self) -> &FieldPath { &self.path }

    /// The session record
    #[must_use]
    pub const fn record(&self) -> &RecordHandle { &self.record }

    /// Whether this node sees a helper tree
    #[must_use]
    pub const fn has_helpers(&self) -> bool { self.helpers.is_some() }

    /// What can be called from this node, derived from the record and the helper tree
    #[must_use]
    pub fn surface(&self) -> BuilderSurface {
        BuilderSurface::describe(&self.record, self.helpers.as_deref(), &self.path)
    }

    fn fresh_root(&self) -> Self { Self::root(self.record.clone(), self.helpers.clone()) }
}

impl Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("path", &self.path.to_string())
            .field("helpers", &self.helpers)
            .finish_non_exhaustive()
    }
}

/// Outcome of invoking a [`Dispatcher`]
#[must_use]
#[derive(Debug, Clone)]
pub enum Dispatch {
    /// The call was accepted; continue from this fresh root
    Chain(Dispatcher),
    /// `build` was reached; the shared record itself, not a copy
    Terminal(RecordHandle),
    /// Nothing happened
    Unrecognized,
}

impl Dispatch {
    /// The continuation, if the call was accepted
    #[must_use]
    pub fn chain(self) -> Option<Dispatcher> {
        match self {
            Self::Chain(dispatcher) => Some(dispatcher),
            Self::Terminal(_) | Self::Unrecognized => None,
        }
    }

    /// The record, if `build` was reached
    #[must_use]
    pub fn terminal(self) -> Option<RecordHandle> {
        match self {
            Self::Terminal(record) => Some(record),
            Self::Chain(_) | Self::Unrecognized => None,
        }
    }

    /// A copy of the record, if `build` was reached
    #[must_use]
    pub fn into_value(self) -> Option<Value> { self.terminal().map(|record| record.snapshot()) }

    /// Whether the call was accepted and the chain continues
    #[must_use]
    pub const fn is_chain(&self) -> bool { matches!(self, Self::Chain(_)) }

    /// Whether `build` was reached
    #[must_use]
    pub const fn is_terminal(&self) -> bool { matches!(self, Self::Terminal(_)) }

    /// Whether the call was a no-op
    #[must_use]
    pub const fn is_unrecognized(&self) -> bool { matches!(self, Self::Unrecognized) }

    /// Continue the chain with a property access
    ///
    /// An ended chain stays ended: a terminal or unrecognized result yields
    /// [`Dispatch::Unrecognized`].
    pub fn at(self, segment: impl Into<String>) -> Self {
        match self {
            Self::Chain(dispatcher) => Self::Chain(dispatcher.at(segment)),
            Self::Terminal(_) | Self::Unrecognized => Self::Unrecognized,
        }
    }

    /// Continue the chain with a dotted property access, see [`Dispatcher::navigate`]
    pub fn navigate(self, dotted: &str) -> Self {
        match self {
            Self::Chain(dispatcher) => Self::Chain(dispatcher.navigate(dotted)),
            Self::Terminal(_) | Self::Unrecognized => Self::Unrecognized,
        }
    }

    /// Continue the chain with an invocation of the current node
    pub fn invoke(self, args: &[Value]) -> Self {
        match self {
            Self::Chain(dispatcher) => dispatcher.invoke(args),
            Self::Terminal(_) | Self::Unrecognized => Self::Unrecognized,
        }
    }

    /// Continue the chain with a call, see [`Dispatcher::call`]
    pub fn call(self, name: impl Into<String>, args: &[Value]) -> Self {
        match self {
            Self::Chain(dispatcher) => dispatcher.call(name, args),
            Self::Terminal(_) | Self::Unrecognized => Self::Unrecognized,
        }
    }

    /// Continue the chain with `build`, see [`Dispatcher::build`]
    pub fn build(self) -> Self {
        match self {
            Self::Chain(dispatcher) => dispatcher.build(),
            Self::Terminal(_) | Self::Unrecognized => Self::Unrecognized,
        }
    }
}
