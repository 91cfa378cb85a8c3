//! Domain model for the note list.
//!
//! # Invariants
//! - Every note carries a stable `NoteId` assigned at creation.
//! - List order is append order; duplicate texts are allowed.

pub mod note;
