//! Sorting and pagination of derived rows.
//!
//! [`TableCursor`] holds the user's table state (sort, page index, page size) and is kept
//! apart from the rows themselves. [`project`] combines both into the visible page.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use super::DerivedRow;

/// Page sizes offered by the table.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

/// Page size used until the user picks another one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Unsupported page size {0}, expected one of 10, 20, 30, 40, 50")]
    UnsupportedPageSize(usize),
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

/// Table columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Name,
    Email,
    Status,
    Role,
    LastLogin,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Name,
        Column::Email,
        Column::Status,
        Column::Role,
        Column::LastLogin,
    ];

    /// Header text.
    pub fn label(&self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Email => "Email",
            Column::Status => "Status",
            Column::Role => "Role",
            Column::LastLogin => "Last Login",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Email => "email",
            Column::Status => "status",
            Column::Role => "role",
            Column::LastLogin => "lastLogin",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Column::Name),
            "email" => Ok(Column::Email),
            "status" => Ok(Column::Status),
            "role" => Ok(Column::Role),
            "lastlogin" | "last_login" | "last-login" => Ok(Column::LastLogin),
            _ => Err(TableError::UnknownColumn(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(column: Column) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: Column) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
        }
    }
}

/// Number of pages needed for `total_rows`.
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_rows.div_ceil(page_size)
}

/// Sort and pagination state of the users table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCursor {
    sort: Option<SortState>,
    page_index: usize,
    page_size: usize,
}

impl Default for TableCursor {
    fn default() -> Self {
        Self {
            sort: None,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cursor with the given page size.
    pub fn with_page_size(page_size: usize) -> Result<Self, TableError> {
        let mut cursor = Self::default();
        cursor.set_page_size(page_size)?;
        Ok(cursor)
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Header click on `column`.
    ///
    /// The same column cycles unsorted, ascending, descending, unsorted. Another column
    /// replaces the current sort and starts ascending.
    pub fn toggle_sort(&mut self, column: Column) {
        self.sort = match self.sort {
            Some(SortState {
                column: current,
                direction,
            }) if current == column => match direction {
                SortDirection::Ascending => Some(SortState::descending(column)),
                SortDirection::Descending => None,
            },
            _ => Some(SortState::ascending(column)),
        };
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort;
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(TableError::UnsupportedPageSize(page_size));
        }
        self.page_size = page_size;
        self.page_index = 0;
        Ok(())
    }

    /// Jumps to the 0-based `page`, clamped to the pages available for `total_rows`.
    pub fn goto_page(&mut self, page: usize, total_rows: usize) {
        let last = page_count(total_rows, self.page_size).saturating_sub(1);
        self.page_index = page.min(last);
    }

    /// Advances one page; no-op on the last page.
    pub fn next_page(&mut self, total_rows: usize) {
        if self.page_index + 1 < page_count(total_rows, self.page_size) {
            self.page_index += 1;
        }
    }

    /// Goes back one page; no-op on the first page.
    pub fn previous_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Jumps to the 1-based page number typed by the user.
    ///
    /// Empty or unparsable input goes to the first page.
    pub fn enter_page_number(&mut self, input: &str, total_rows: usize) {
        let page = input
            .trim()
            .parse::<usize>()
            .map(|n| n.saturating_sub(1))
            .unwrap_or(0);
        self.goto_page(page, total_rows);
    }
}

/// The visible page of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    pub rows: Vec<DerivedRow>,
    pub total_rows: usize,
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub can_previous_page: bool,
    pub can_next_page: bool,
    pub sort: Option<SortState>,
}

impl TablePage {
    /// `Page X of Y`, with at least one page.
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page_index + 1, self.page_count.max(1))
    }
}

/// Sorts `rows` by the cursor's sort state and cuts out the current page.
pub fn project(mut rows: Vec<DerivedRow>, cursor: &TableCursor) -> TablePage {
    if let Some(sort) = cursor.sort {
        match sort.direction {
            SortDirection::Ascending => rows.sort_by_cached_key(|row| row.cell(sort.column)),
            SortDirection::Descending => {
                rows.sort_by_cached_key(|row| Reverse(row.cell(sort.column)))
            }
        }
    }

    let total_rows = rows.len();
    let page_count = page_count(total_rows, cursor.page_size);
    let start = (cursor.page_index * cursor.page_size).min(total_rows);
    let end = (start + cursor.page_size).min(total_rows);

    let visible = rows.drain(start..end).collect();

    TablePage {
        rows: visible,
        total_rows,
        page_index: cursor.page_index,
        page_size: cursor.page_size,
        page_count,
        can_previous_page: cursor.page_index > 0,
        can_next_page: cursor.page_index + 1 < page_count,
        sort: cursor.sort,
    }
}
