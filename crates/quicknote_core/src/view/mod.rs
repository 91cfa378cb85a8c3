//! View-controller layer.
//!
//! # Responsibility
//! - Define the display surface contract rendered by the controller.
//! - Translate user triggers into note service calls and display updates.
//!
//! # Invariants
//! - After every completed operation the rendered rows equal the stored list.
//! - The controller depends on `NoteStore`/`DisplaySurface` traits only.

pub mod controller;
pub mod memory_surface;
pub mod surface;
