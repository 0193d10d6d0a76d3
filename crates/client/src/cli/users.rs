//! User CLI commands.

use clap::{Args, Parser, Subcommand};
use usersync_core::user::UserId;
use usersync_core::view::Column;

/// User management commands.
#[derive(Debug, Parser)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub action: UsersAction,
}

/// Table options shared by every action that prints the users table.
#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    /// Page number, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Rows per page (10, 20, 30, 40 or 50).
    #[arg(long)]
    pub page_size: Option<usize>,
    /// Column to sort by (name, email, status, role, lastLogin).
    #[arg(long)]
    pub sort: Option<Column>,
    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

/// Available user actions.
#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// Show a page of the users table.
    List(ViewArgs),
    /// Create a new user.
    Create {
        /// User name.
        #[arg(long)]
        name: String,
        /// User email.
        #[arg(long, default_value = "")]
        email: String,
        /// User role.
        #[arg(long, default_value = "")]
        role: String,
    },
    /// Update fields of an existing user.
    Update {
        /// User ID.
        id: UserId,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New email.
        #[arg(long)]
        email: Option<String>,
        /// New role.
        #[arg(long)]
        role: Option<String>,
    },
    /// Delete user by ID.
    Delete {
        /// User ID.
        id: UserId,
    },
}
