//! A tiny language for demonstrating how closures are implemented in a
//! language without native closure support.
//!
//! Crumpet parses parenthesized lambda terms, resolves them into a core
//! language where every function knows exactly which enclosing binders it
//! closes over, and lowers that core language to a standalone C program in
//! which every function becomes a *closure record*: a heap-allocated pair
//! of a function pointer and an array of captured records.
//!
//! The same record representation is also available in memory as
//! [`lang::record::Records`], which is what the `crumpet demo` subcommand
//! exercises.

#![allow(clippy::new_without_default)]

pub mod lang;
pub mod pass;
pub mod reporting;
