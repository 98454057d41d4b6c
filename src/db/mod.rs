//! SQLite persistence for tasks.

/// Connection management.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// The task store: filtered listing and single-row mutations.
pub mod tasks;
