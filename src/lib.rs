//! In-memory student records engine: roster filtering, attendance and marks
//! aggregation, and pure mutation operators over caller-owned collections.
//!
//! Every query takes the collections by slice and every mutation returns a
//! new collection, so a caller can keep the old snapshot for undo or diffing.
//! The [`ipc`] module hosts the engine behind a line-delimited JSON protocol.

pub mod attendance;
pub mod calc;
pub mod config;
pub mod dashboard;
pub mod fixtures;
pub mod ipc;
pub mod marks;
pub mod model;
pub mod roster;
pub mod students;
