use serde::{Deserialize, Serialize};

use crate::serde::deserialize_optional_string;

use super::User;

/// A partial edit of a user. Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub role: Option<String>,
}

impl UserPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }

    /// Applies the patch on top of `user`, keeping its identity.
    pub fn apply_to(&self, user: &User) -> User {
        User {
            id: user.id,
            name: self.name.clone().unwrap_or_else(|| user.name.clone()),
            email: self.email.clone().unwrap_or_else(|| user.email.clone()),
            role: self.role.clone().unwrap_or_else(|| user.role.clone()),
        }
    }
}
