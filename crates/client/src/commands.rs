//! Executes parsed CLI commands against a users remote.

use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::Utc;
use usersync_core::cache::CacheStore;
use usersync_core::mutation::MutationCoordinator;
use usersync_core::remote::UserRemote;
use usersync_core::screen::{AdminScreen, Intent, TableIntent, UserForm};
use usersync_core::user::{User, UserPatch};

use crate::cli::users::{UsersAction, ViewArgs};
use crate::cli::{Commands, OutputFormat};
use crate::config::Config;
use crate::output::{format_json, pretty, MutationReport};

/// Options that shape the printed output.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub quiet: bool,
}

/// Runs `command` and returns the text to print.
pub async fn execute<R: UserRemote>(
    command: Commands,
    remote: Arc<R>,
    config: &Config,
    options: OutputOptions,
) -> anyhow::Result<String> {
    let coordinator = MutationCoordinator::new(CacheStore::new(), remote);
    let mut screen = AdminScreen::new(coordinator);

    screen.load().await.context("Failed to load users")?;
    table(&mut screen, TableIntent::SetPageSize(config.page_size)).await?;

    let Commands::Users(users) = command;
    let outcome = match users.action {
        UsersAction::List(view) => {
            apply_view(&mut screen, view).await?;
            None
        }
        UsersAction::Create { name, email, role } => {
            screen.dispatch(Intent::OpenCreate).await?;
            screen
                .dispatch(Intent::SubmitForm(UserForm { name, email, role }))
                .await?
        }
        UsersAction::Update {
            id,
            name,
            email,
            role,
        } => {
            let patch = UserPatch { name, email, role };
            if patch.is_empty() {
                bail!("Nothing to update, pass at least one of --name, --email or --role");
            }
            let Some(user) = screen.coordinator().store().get().find(id).cloned() else {
                bail!("User {id} not found");
            };
            let form = UserForm::from_user(&patch.apply_to(&user));
            screen.dispatch(Intent::OpenEdit(user)).await?;
            screen.dispatch(Intent::SubmitForm(form)).await?
        }
        UsersAction::Delete { id } => {
            let user = screen
                .coordinator()
                .store()
                .get()
                .find(id)
                .cloned()
                .unwrap_or_else(|| User::new("", "", "").with_id(id));
            screen.dispatch(Intent::RequestDelete(user)).await?;
            screen.dispatch(Intent::ConfirmDelete).await?
        }
    };

    let page = screen.render(Utc::now());
    let output = match (options.format, &outcome) {
        (OutputFormat::Json, Some(outcome)) => format_json(&MutationReport {
            outcome,
            page: &page,
        }),
        (OutputFormat::Json, None) => format_json(&page),
        (OutputFormat::Pretty, Some(outcome)) if !options.quiet => {
            format!("{}\n\n{}", pretty::format_outcome(outcome), pretty::format_page(&page))
        }
        (OutputFormat::Pretty, _) => pretty::format_page(&page),
    };
    Ok(output)
}

async fn apply_view<R: UserRemote>(screen: &mut AdminScreen<R>, view: ViewArgs) -> anyhow::Result<()> {
    if let Some(size) = view.page_size {
        table(screen, TableIntent::SetPageSize(size)).await?;
    }
    if let Some(column) = view.sort {
        table(screen, TableIntent::ToggleSort(column)).await?;
        if view.desc {
            table(screen, TableIntent::ToggleSort(column)).await?;
        }
    }
    table(screen, TableIntent::EnterPageNumber(view.page.to_string())).await
}

async fn table<R: UserRemote>(screen: &mut AdminScreen<R>, intent: TableIntent) -> anyhow::Result<()> {
    screen.dispatch(Intent::Table(intent)).await?;
    Ok(())
}
