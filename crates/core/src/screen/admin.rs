//! The users administration screen: modal state, table view and mutations together.

use chrono::{DateTime, Utc};

use crate::mutation::{MutationBoard, MutationCoordinator, MutationOutcome, MutationRequest, RefreshOutcome};
use crate::remote::{RemoteError, UserRemote};
use crate::view::{TablePage, UsersView};

use super::{Effect, Intent, Modal, Result, ScreenState, TableIntent};

/// Drives the screen from user intents.
pub struct AdminScreen<R> {
    state: ScreenState,
    view: UsersView,
    coordinator: MutationCoordinator<R>,
}

impl<R: UserRemote> AdminScreen<R> {
    pub fn new(coordinator: MutationCoordinator<R>) -> Self {
        let view = UsersView::new(coordinator.store());
        Self {
            state: ScreenState::new(),
            view,
            coordinator,
        }
    }

    pub fn modal(&self) -> &Modal {
        self.state.modal()
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn view(&self) -> &UsersView {
        &self.view
    }

    pub fn coordinator(&self) -> &MutationCoordinator<R> {
        &self.coordinator
    }

    /// Per-kind in-flight and error state, for disabling controls.
    pub fn status(&self) -> MutationBoard {
        self.coordinator.status()
    }

    /// Loads the collection from the remote.
    pub async fn load(&self) -> std::result::Result<RefreshOutcome, RemoteError> {
        self.coordinator.refresh().await
    }

    /// Renders the current table page.
    pub fn render(&mut self, now: DateTime<Utc>) -> TablePage {
        self.view.render(now)
    }

    /// Handles one intent, running any resulting mutation to completion.
    ///
    /// Returns the outcome when a mutation was performed.
    pub async fn dispatch(&mut self, intent: Intent) -> Result<Option<MutationOutcome>> {
        match self.state.handle(intent)? {
            Effect::None => Ok(None),
            Effect::Table(intent) => {
                self.apply_table(intent)?;
                Ok(None)
            }
            Effect::Mutate(request) => self.mutate(request).await.map(Some),
        }
    }

    async fn mutate(&mut self, request: MutationRequest) -> Result<MutationOutcome> {
        let pending = self.coordinator.begin(request)?;
        let outcome = self.coordinator.settle(pending).await?;

        if let MutationOutcome::Deleted(id) = &outcome {
            self.state.delete_succeeded(*id);
        }
        Ok(outcome)
    }

    fn apply_table(&mut self, intent: TableIntent) -> Result<()> {
        match intent {
            TableIntent::ToggleSort(column) => self.view.toggle_sort(column),
            TableIntent::SetPageSize(size) => self.view.set_page_size(size)?,
            TableIntent::GotoPage(page) => self.view.goto_page(page),
            TableIntent::NextPage => self.view.next_page(),
            TableIntent::PreviousPage => self.view.previous_page(),
            TableIntent::EnterPageNumber(input) => self.view.enter_page_number(&input),
        }
        Ok(())
    }
}
