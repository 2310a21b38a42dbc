//! Resolves the [surface language] into the [core language].
//!
//! Names are replaced with de Bruijn indices, and each function term is
//! annotated with the set of enclosing binders its body closes over — the
//! same analysis the C emission pass later uses to lay out capture arrays.
//! Unbound names are reported here.
//!
//! [surface language]: crate::lang::surface
//! [core language]: crate::lang::core

use contracts::debug_ensures;
use crossbeam_channel::Sender;
use std::sync::Arc;

use crate::lang::core::{self, Captures, LocalIndex, LocalLevel, LocalSize};
use crate::lang::surface::{Term, TermData};
use crate::reporting::{Message, SurfaceToCoreMessage};

/// The state of the resolver.
pub struct State {
    /// Substitutions from the user-defined names to the level in which
    /// they were bound.
    local_levels: Vec<(String, LocalLevel)>,
    /// The diagnostic messages accumulated during resolution.
    message_tx: Sender<Message>,
}

impl State {
    /// Construct a new resolver state.
    pub fn new(message_tx: Sender<Message>) -> State {
        State {
            local_levels: Vec::new(),
            message_tx,
        }
    }

    /// Get the size of the local environment.
    fn size(&self) -> LocalSize {
        LocalSize::from(self.local_levels.len() as u32)
    }

    /// Get a local entry, innermost binding first.
    fn get_local(&self, name: &str) -> Option<(LocalIndex, LocalLevel)> {
        let (_, level) = self.local_levels.iter().rev().find(|(n, _)| n == name)?;
        let index = self.size().index(*level)?;
        Some((index, *level))
    }

    /// Push a local binder.
    #[debug_ensures(self.local_levels.len() == old(self.local_levels.len()) + 1)]
    fn push_local(&mut self, name: &str) -> LocalLevel {
        let level = self.size().next_level();
        self.local_levels.push((name.to_owned(), level));
        level
    }

    /// Pop a local binder.
    #[debug_ensures(self.local_levels.len() == old(self.local_levels.len()) - 1)]
    fn pop_local(&mut self) {
        self.local_levels.pop();
    }

    /// Report a diagnostic message.
    fn report(&self, message: SurfaceToCoreMessage) {
        self.message_tx.send(message.into()).unwrap();
    }
}

/// Resolve a surface term, returning the core term together with the set
/// of enclosing binders it closes over.
pub fn from_surface<S: AsRef<str>>(state: &mut State, term: &Term<S>) -> (core::Term, Captures) {
    match &term.data {
        TermData::Name(name) => match state.get_local(name.as_ref()) {
            Some((index, level)) => (core::Term::Local(index), Captures::singleton(level)),
            None => {
                state.report(SurfaceToCoreMessage::UnboundName {
                    range: term.range.into(),
                    name: name.as_ref().to_owned(),
                });
                (core::Term::Error, Captures::new())
            }
        },
        TermData::FunctionTerm(input, body) => {
            let level = state.push_local(input.data.as_ref());
            let (body, body_captures) = from_surface(state, body);
            state.pop_local();

            let captures = body_captures.without(level);
            let term = core::Term::FunctionTerm(
                input.data.as_ref().to_owned(),
                Arc::new(body),
                captures.clone(),
            );

            (term, captures)
        }
        TermData::FunctionElim(head, argument) => {
            let (head, head_captures) = from_surface(state, head);
            let (argument, argument_captures) = from_surface(state, argument);

            let term = core::Term::FunctionElim(Arc::new(head), Arc::new(argument));

            (term, head_captures.union(argument_captures))
        }
        TermData::Error => (core::Term::Error, Captures::new()),
    }
}
