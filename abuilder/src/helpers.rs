//! The caller-supplied helper tree
//!
//! Leaves are functions, internal nodes are nested maps mirroring the call paths the caller
//! wants to add or intercept. A helper found at the invoked path runs instead of any generated
//! behavior, `build` and `with...` names included.

use std::collections::HashMap;
use std::fmt::Debug;
use std::rc::Rc;

use serde_json::Value;

use crate::dispatcher::Dispatcher;
use crate::record::FieldPath;

/// A helper body
///
/// Receives the helper-aware session root and the call arguments. Its return value is
/// discarded; the dispatcher always continues the chain from a fresh root.
pub type HelperFn = Rc<dyn Fn(&Dispatcher, &[Value])>;

/// One entry of a [`HelperTree`]
#[derive(Clone)]
pub enum HelperNode {
    /// A callable helper
    Helper(HelperFn),
    /// A nested group of entries
    Branch(HelperTree),
}

impl Debug for HelperNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Helper(_) => f.write_str("Helper(<fn>)"),
            Self::Branch(tree) => f.debug_tuple("Branch").field(tree).finish(),
        }
    }
}

/// Tree of helper functions keyed by path segment
#[derive(Clone, Default)]
pub struct HelperTree {
    entries: HashMap<String, HelperNode>,
}

impl HelperTree {
    /// An empty tree
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Add a helper named `name` at this level, replacing any entry of that name
    ///
    /// `helper` may return anything; the value is dropped.
    #[must_use]
    pub fn helper<F, R>(mut self, name: impl Into<String>, helper: F) -> Self
    where
        F: Fn(&Dispatcher, &[Value]) -> R + 'static,
    {
        self.entries
            .insert(name.into(), HelperNode::Helper(wrap(helper)));
        self
    }

    /// Add a nested group named `name`, replacing any entry of that name
    #[must_use]
    pub fn branch(mut self, name: impl Into<String>, tree: Self) -> Self {
        self.entries.insert(name.into(), HelperNode::Branch(tree));
        self
    }

    /// Add a helper at a nested `path`, creating the branches along the way
    ///
    /// An existing helper sitting where a branch is needed is replaced by the branch. The root
    /// path is ignored.
    #[must_use]
    pub fn helper_at<F, R>(mut self, path: impl Into<FieldPath>, helper: F) -> Self
    where
        F: Fn(&Dispatcher, &[Value]) -> R + 'static,
    {
        let path = path.into();
        if let Some((name, parents)) = path.segments().split_last() {
            self.insert_at(parents, name, wrap(helper));
        }
        self
    }

    fn insert_at(&mut self, parents: &[String], name: &str, helper: HelperFn) {
        match parents.split_first() {
            None => {
                self.entries
                    .insert(name.to_string(), HelperNode::Helper(helper));
            }
            Some((head, rest)) => {
                let node = self
                    .entries
                    .entry(head.clone())
                    .or_insert_with(|| HelperNode::Branch(Self::new()));
                if let HelperNode::Helper(_) = *node {
                    *node = HelperNode::Branch(Self::new());
                }
                if let HelperNode::Branch(tree) = node {
                    tree.insert_at(rest, name, helper);
                }
            }
        }
    }

    /// The entry at `path`, treating each segment as a nested key
    ///
    /// The root path addresses no entry.
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&HelperNode> {
        let (first, rest) = path.segments().split_first()?;
        rest.iter()
            .try_fold(self.entries.get(first)?, |node, segment| match node {
                HelperNode::Branch(tree) => tree.entries.get(segment),
                HelperNode::Helper(_) => None,
            })
    }

    /// The callable helper at `path`; branches do not count
    #[must_use]
    pub fn helper_for(&self, path: &FieldPath) -> Option<HelperFn> {
        match self.get(path)? {
            HelperNode::Helper(helper) => Some(Rc::clone(helper)),
            HelperNode::Branch(_) => None,
        }
    }

    /// The subtree whose entries are reachable below `path`; the root path yields `self`
    #[must_use]
    pub fn subtree(&self, path: &FieldPath) -> Option<&Self> {
        if path.is_root() {
            return Some(self);
        }
        match self.get(path)? {
            HelperNode::Branch(tree) => Some(tree),
            HelperNode::Helper(_) => None,
        }
    }

    /// Whether an entry named `name` exists at this level
    #[must_use]
    pub fn contains(&self, name: &str) -> bool { self.entries.contains_key(name) }

    /// Entry names at this level, sorted
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of entries at this level
    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether the tree has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl Debug for HelperTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelperTree")
            .field("entries", &self.names())
            .finish()
    }
}

fn wrap<F, R>(helper: F) -> HelperFn
where
    F: Fn(&Dispatcher, &[Value]) -> R + 'static,
{
    Rc::new(move |root: &Dispatcher, args: &[Value]| {
        helper(root, args);
    })
}
