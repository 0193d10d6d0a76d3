//! usersync_client - HTTP remote and CLI for the users administration core.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use client::UsersyncClient;
pub use config::Config;
pub use error::{ClientError, Result};
