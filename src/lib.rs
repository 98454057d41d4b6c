//! tudu: a single-user TODO list manager.
//!
//! - [`db`] persists tasks in SQLite.
//! - [`server`] exposes them over a small REST API.
//! - [`api`] and [`client`] consume that API; [`commands`] renders the
//!   client in a terminal.

pub mod api;
pub mod client;
pub mod commands;
pub mod db;
pub mod libs;
pub mod server;
