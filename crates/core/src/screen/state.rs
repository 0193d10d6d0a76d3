//! Modal and intent handling for the users screen, without side effects.

use serde::{Deserialize, Serialize};

use crate::mutation::MutationRequest;
use crate::user::{User, UserId};
use crate::view::Column;

use super::{Result, ScreenError};

/// Which dialog is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    Create,
    Edit(User),
    ConfirmDelete(User),
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }
}

/// Values of the create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl UserForm {
    /// Form pre-filled from an existing user.
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }

    /// Builds the user record to submit.
    pub fn into_user(self, id: Option<UserId>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
        }
    }
}

/// Table interactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableIntent {
    ToggleSort(Column),
    SetPageSize(usize),
    GotoPage(usize),
    NextPage,
    PreviousPage,
    /// 1-based page number as typed.
    EnterPageNumber(String),
}

/// Everything the user can do on the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    OpenCreate,
    OpenEdit(User),
    RequestDelete(User),
    ConfirmDelete,
    CloseModal,
    SubmitForm(UserForm),
    Table(TableIntent),
}

/// Work resulting from an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Mutate(MutationRequest),
    Table(TableIntent),
}

/// Modal state of the screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenState {
    modal: Modal,
}

impl ScreenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// Values the open form starts with, if a form is open.
    pub fn form(&self) -> Option<UserForm> {
        match &self.modal {
            Modal::Create => Some(UserForm::default()),
            Modal::Edit(user) => Some(UserForm::from_user(user)),
            Modal::Closed | Modal::ConfirmDelete(_) => None,
        }
    }

    /// Applies `intent` to the modal state and returns the work to perform.
    pub fn handle(&mut self, intent: Intent) -> Result<Effect> {
        match intent {
            Intent::OpenCreate => {
                self.modal = Modal::Create;
                Ok(Effect::None)
            }
            Intent::OpenEdit(user) => {
                self.modal = Modal::Edit(user);
                Ok(Effect::None)
            }
            Intent::RequestDelete(user) => {
                if !user.is_persisted() {
                    return Err(ScreenError::MissingId);
                }
                self.modal = Modal::ConfirmDelete(user);
                Ok(Effect::None)
            }
            Intent::ConfirmDelete => match &self.modal {
                // Stays open until the delete succeeds.
                Modal::ConfirmDelete(user) => Ok(Effect::Mutate(MutationRequest::Delete(user.clone()))),
                _ => Ok(Effect::None),
            },
            Intent::CloseModal => {
                self.modal = Modal::Closed;
                Ok(Effect::None)
            }
            Intent::SubmitForm(form) => match std::mem::take(&mut self.modal) {
                Modal::Create => Ok(Effect::Mutate(MutationRequest::Create(form.into_user(None)))),
                Modal::Edit(user) => Ok(Effect::Mutate(MutationRequest::Update(form.into_user(user.id)))),
                other => {
                    self.modal = other;
                    Ok(Effect::None)
                }
            },
            Intent::Table(intent) => Ok(Effect::Table(intent)),
        }
    }

    /// Closes the delete dialog if it is still confirming `id`.
    pub(crate) fn delete_succeeded(&mut self, id: UserId) {
        if matches!(&self.modal, Modal::ConfirmDelete(user) if user.has_id(id)) {
            self.modal = Modal::Closed;
        }
    }
}
