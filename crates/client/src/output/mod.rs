//! Output formatting functions.

pub mod pretty;

use serde::Serialize;
use usersync_core::mutation::MutationOutcome;
use usersync_core::view::TablePage;

/// JSON document printed after a mutation.
#[derive(Debug, Serialize)]
pub struct MutationReport<'a> {
    pub outcome: &'a MutationOutcome,
    pub page: &'a TablePage,
}

/// Format a value as indented JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
