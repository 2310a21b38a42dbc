//! The core language.
//!
//! Names have been resolved to de Bruijn indices, and every function term
//! carries the set of enclosing binders that its body closes over. This is
//! the input to the closure-converting C emission pass.

use std::fmt;
use std::sync::Arc;

/// Terms in the core language.
#[derive(Clone, Debug, PartialEq)]
pub enum Term {
    /// Local variables.
    Local(LocalIndex),
    /// Function terms (lambda abstractions), annotated with the name the
    /// user gave the binder and the binders the body closes over.
    FunctionTerm(String, Arc<Term>, Captures),
    /// Function eliminations (function application).
    FunctionElim(Arc<Term>, Arc<Term>),
    /// Error sentinel.
    Error,
}

/// An index into the local environment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LocalIndex(pub u32);

impl fmt::Display for LocalIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A level in the local environment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocalLevel(u32);

impl fmt::Display for LocalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The size of the local environment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LocalSize(u32);

impl LocalSize {
    pub fn increment(self) -> LocalSize {
        LocalSize(self.0 + 1)
    }

    /// Return the level of the next variable to be added to the environment.
    pub fn next_level(self) -> LocalLevel {
        LocalLevel(self.0)
    }

    /// Convert a variable level to a variable index in an environment of
    /// this size.
    pub fn index(self, level: LocalLevel) -> Option<LocalIndex> {
        u32::checked_sub(self.0, level.0 + 1).map(LocalIndex)
    }

    /// Convert a variable index back to the level it refers to.
    pub fn level(self, index: LocalIndex) -> Option<LocalLevel> {
        u32::checked_sub(self.0, index.0 + 1).map(LocalLevel)
    }
}

impl From<u32> for LocalSize {
    fn from(size: u32) -> LocalSize {
        LocalSize(size)
    }
}

/// A local environment.
#[derive(Clone, Debug)]
pub struct Locals<Entry: Clone> {
    /// The local entries that are currently defined in the environment.
    entries: im::Vector<Entry>,
}

impl<Entry: Clone> Locals<Entry> {
    /// Create a new local environment.
    pub fn new() -> Locals<Entry> {
        Locals {
            entries: im::Vector::new(),
        }
    }

    /// Get the size of the environment.
    pub fn size(&self) -> LocalSize {
        LocalSize(self.entries.len() as u32)
    }

    /// Lookup an entry in the environment.
    pub fn get(&self, index: LocalIndex) -> Option<&Entry> {
        self.entries
            .get(self.entries.len().checked_sub(index.0 as usize + 1)?)
    }

    /// Push an entry onto the environment.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push_back(entry);
    }

    /// Pop an entry off the environment.
    pub fn pop(&mut self) -> Option<Entry> {
        self.entries.pop_back()
    }
}

/// The set of enclosing binders a function term closes over.
///
/// Iteration is in ascending level order, which fixes the capture-array
/// slot assigned to each captured binder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Captures {
    levels: im::OrdSet<LocalLevel>,
}

impl Captures {
    /// The empty capture set.
    pub fn new() -> Captures {
        Captures {
            levels: im::OrdSet::new(),
        }
    }

    /// The capture set of a variable occurrence.
    pub fn singleton(level: LocalLevel) -> Captures {
        Captures {
            levels: im::ordset![level],
        }
    }

    /// Union two capture sets, as at an application node.
    pub fn union(self, other: Captures) -> Captures {
        Captures {
            levels: self.levels.union(other.levels),
        }
    }

    /// Remove a binder from the capture set, as when passing under the
    /// abstraction that binds it.
    pub fn without(&self, level: LocalLevel) -> Captures {
        Captures {
            levels: self.levels.without(&level),
        }
    }

    pub fn contains(&self, level: LocalLevel) -> bool {
        self.levels.contains(&level)
    }

    /// The capture-array slot assigned to the given level.
    pub fn slot(&self, level: LocalLevel) -> Option<usize> {
        self.levels.iter().position(|l| *l == level)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterate over the captured levels in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = LocalLevel> + '_ {
        self.levels.iter().copied()
    }
}
