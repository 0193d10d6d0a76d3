//! Derived rows and table projection for the users screen.

mod model;
mod rows;
mod table;

pub use model::UsersView;
pub use rows::{build_rows, status_for_position, DerivedRow, UserStatus};
pub use table::{
    page_count, project, Column, SortDirection, SortState, TableCursor, TableError, TablePage,
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};
