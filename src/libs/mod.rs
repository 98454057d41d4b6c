//! Shared building blocks: domain types, configuration, console output.

pub mod app_info;
pub mod config;
pub mod data_storage;
pub mod formatter;
pub mod messages;
pub mod task;
pub mod view;
