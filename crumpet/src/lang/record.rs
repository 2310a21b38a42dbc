//! The closure-record runtime representation.
//!
//! This is the in-memory form of the representation that the C emission
//! pass spells out with `malloc`: a *record* pairs the code it dispatches
//! to with the records it closed over when it was constructed. The arena
//! is the single owner of every record; captures are plain ids, so records
//! may share captured records freely and tearing the arena down frees
//! everything exactly once.
//!
//! A record can only capture records that were allocated before it, which
//! keeps capture graphs acyclic and makes every forwarding chain finite.

use std::convert::TryFrom;
use std::sync::Arc;
use thiserror::Error;

/// An identifier of a record within its arena.
///
/// Ids are only minted by [`Records::alloc`], so holding one is not
/// ownership: dropping an id never frees the record it names.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RecordId(u32);

/// The code a record dispatches to when invoked.
///
/// This is a closed set of variants rather than a function pointer, so a
/// record with absent or invalid code is not a representable state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Code {
    /// Return the first argument unchanged.
    Identity,
    /// Invoke the first captured record, passing the received arguments
    /// along to it.
    Forward,
}

/// A callable bundling code with the records it closed over at
/// construction time.
///
/// Records are immutable once allocated: the capture list never changes
/// length or contents, which is what makes sharing them between
/// invocations (or threads) sound.
#[derive(Clone, Debug)]
pub struct Record {
    code: Code,
    captures: Arc<[RecordId]>,
}

impl Record {
    pub fn code(&self) -> Code {
        self.code
    }

    pub fn captures(&self) -> &[RecordId] {
        &self.captures
    }
}

/// Errors produced when allocating or invoking records.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The arena has run out of record ids.
    #[error("no more record ids are available")]
    Exhausted,
    /// An id does not name a record in this arena.
    #[error("unknown record id")]
    UnknownRecord(RecordId),
    /// An identity record was invoked without an argument.
    #[error("identity record invoked without an argument")]
    MissingArgument,
    /// A forwarding record was invoked but has nothing to forward to.
    #[error("forwarding record has no captured record")]
    EmptyCaptures,
}

/// An owning arena of closure records.
///
/// Dropping the arena is the deallocation point for every record it
/// contains.
#[derive(Clone, Debug)]
pub struct Records {
    entries: Vec<Record>,
}

impl Records {
    /// Create an empty arena.
    pub fn new() -> Records {
        Records {
            entries: Vec::new(),
        }
    }

    /// The number of records allocated so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookup a record by id.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.entries.get(id.0 as usize)
    }

    /// Allocate a new record.
    ///
    /// Every captured id must already name a record in this arena.
    pub fn alloc(&mut self, code: Code, captures: &[RecordId]) -> Result<RecordId, RecordError> {
        let id = u32::try_from(self.entries.len()).map_err(|_| RecordError::Exhausted)?;
        if let Some(unknown) = captures.iter().find(|id| self.get(**id).is_none()) {
            return Err(RecordError::UnknownRecord(*unknown));
        }

        self.entries.push(Record {
            code,
            captures: captures.into(),
        });

        Ok(RecordId(id))
    }

    /// Allocate a forwarding record that captures exactly `inner`.
    ///
    /// This is the closure-construction operation: invoking the returned
    /// record re-dispatches to `inner`.
    pub fn wrap(&mut self, inner: RecordId) -> Result<RecordId, RecordError> {
        self.alloc(Code::Forward, &[inner])
    }

    /// Invoke a record with the given arguments.
    ///
    /// Invocation never mutates the arena or any record, so shared records
    /// may be invoked concurrently.
    pub fn invoke(
        &self,
        record: RecordId,
        arguments: &[RecordId],
    ) -> Result<RecordId, RecordError> {
        let entry = self
            .get(record)
            .ok_or(RecordError::UnknownRecord(record))?;

        match entry.code {
            Code::Identity => arguments
                .first()
                .copied()
                .ok_or(RecordError::MissingArgument),
            // Captured ids always precede the capturing record, so this
            // recursion is strictly decreasing and terminates.
            Code::Forward => {
                let inner = entry
                    .captures
                    .first()
                    .copied()
                    .ok_or(RecordError::EmptyCaptures)?;
                self.invoke(inner, arguments)
            }
        }
    }
}
