//! CLI command definitions.

pub mod users;

use clap::{Parser, Subcommand, ValueEnum};

/// Administer a remote users collection.
#[derive(Debug, Parser)]
#[command(name = "usersync")]
#[command(about = "Administer a remote users collection", long_about = None)]
pub struct Cli {
    /// Remote base URL. Falls back to the configured default.
    #[arg(long, env = "USERSYNC_URL")]
    pub base_url: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    /// Use an in-memory remote seeded with demo users instead of HTTP.
    #[arg(long)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable table.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// User management.
    Users(users::UsersCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use users::UsersAction;
    use usersync_core::view::Column;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_sort() {
        let cli = Cli::try_parse_from([
            "usersync", "--demo", "--format", "json", "users", "list", "--page", "2", "--sort",
            "email", "--desc",
        ])
        .unwrap();

        assert!(cli.demo);
        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Users(users) = cli.command;
        match users.action {
            UsersAction::List(view) => {
                assert_eq!(view.page, 2);
                assert_eq!(view.sort, Some(Column::Email));
                assert!(view.desc);
                assert_eq!(view.page_size, None);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_parse_update() {
        let cli = Cli::try_parse_from(["usersync", "users", "update", "3", "--role", "admin"]).unwrap();

        let Commands::Users(users) = cli.command;
        match users.action {
            UsersAction::Update { id, name, role, .. } => {
                assert_eq!(id, 3);
                assert_eq!(name, None);
                assert_eq!(role.as_deref(), Some("admin"));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_sort_column_is_rejected() {
        let result = Cli::try_parse_from(["usersync", "users", "list", "--sort", "age"]);

        assert!(result.is_err());
    }
}
