//! Note use-case services.
//!
//! # Responsibility
//! - Orchestrate whole-list read-modify-write cycles over a `NoteStore`.
//! - Keep display/host layers decoupled from persistence details.

pub mod note_service;
