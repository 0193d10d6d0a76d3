//! Live view of the users table.

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::cache::{CacheStore, Snapshot};

use super::{build_rows, project, Column, TableCursor, TableError, TablePage};

/// Subscribes to a [`CacheStore`] and renders the current table page from it.
///
/// Rows are re-derived on every render; the cursor survives data changes.
#[derive(Debug)]
pub struct UsersView {
    receiver: watch::Receiver<Snapshot>,
    cursor: TableCursor,
}

impl UsersView {
    pub fn new(store: &CacheStore) -> Self {
        Self::with_cursor(store, TableCursor::default())
    }

    pub fn with_cursor(store: &CacheStore, cursor: TableCursor) -> Self {
        Self {
            receiver: store.subscribe(),
            cursor,
        }
    }

    pub fn cursor(&self) -> &TableCursor {
        &self.cursor
    }

    /// Number of rows in the latest snapshot.
    pub fn total_rows(&self) -> usize {
        self.receiver.borrow().len()
    }

    /// Renders the latest snapshot and marks it as seen.
    pub fn render(&mut self, now: DateTime<Utc>) -> TablePage {
        let snapshot = self.receiver.borrow_and_update().clone();
        project(build_rows(&snapshot, now), &self.cursor)
    }

    /// True when the store published a snapshot since the last render.
    pub fn needs_render(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Waits for the next published snapshot.
    ///
    /// Returns false once the store has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    pub fn toggle_sort(&mut self, column: Column) {
        self.cursor.toggle_sort(column);
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        self.cursor.set_page_size(page_size)
    }

    pub fn goto_page(&mut self, page: usize) {
        let total = self.total_rows();
        self.cursor.goto_page(page, total);
    }

    pub fn next_page(&mut self) {
        let total = self.total_rows();
        self.cursor.next_page(total);
    }

    pub fn previous_page(&mut self) {
        self.cursor.previous_page();
    }

    pub fn enter_page_number(&mut self, input: &str) {
        let total = self.total_rows();
        self.cursor.enter_page_number(input, total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::User;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap()
    }

    fn users(count: u64) -> Vec<User> {
        (1..=count)
            .map(|i| User::new(format!("User {i:02}"), format!("u{i}@example.com"), "member").with_id(i))
            .collect()
    }

    #[test]
    fn test_render_reflects_store() {
        let store = CacheStore::with_snapshot(Snapshot::new(users(3)));
        let mut view = UsersView::new(&store);

        let page = view.render(now());

        assert_eq!(page.total_rows, 3);
        assert_eq!(page.rows.len(), 3);
    }

    #[test]
    fn test_needs_render_after_store_change() {
        let store = CacheStore::new();
        let mut view = UsersView::new(&store);
        view.render(now());
        assert!(!view.needs_render());

        store.replace(Snapshot::new(users(2)));
        assert!(view.needs_render());

        let page = view.render(now());
        assert_eq!(page.total_rows, 2);
        assert!(!view.needs_render());
    }

    #[test]
    fn test_navigation_uses_current_total() {
        let store = CacheStore::with_snapshot(Snapshot::new(users(23)));
        let mut view = UsersView::new(&store);

        view.goto_page(10);
        assert_eq!(view.cursor().page_index(), 2);

        view.next_page();
        assert_eq!(view.cursor().page_index(), 2);

        view.previous_page();
        view.enter_page_number("1");
        assert_eq!(view.cursor().page_index(), 0);

        view.toggle_sort(Column::Name);
        view.toggle_sort(Column::Name);
        let page = view.render(now());
        assert_eq!(page.rows[0].user.name, "User 23");
    }

    #[test]
    fn test_cursor_survives_data_changes() {
        let store = CacheStore::with_snapshot(Snapshot::new(users(23)));
        let mut view = UsersView::new(&store);
        view.set_page_size(20).unwrap();
        view.next_page();

        store.replace(Snapshot::new(users(25)));
        let page = view.render(now());

        assert_eq!(page.page_index, 1);
        assert_eq!(page.rows.len(), 5);
    }

    #[tokio::test]
    async fn test_changed_wakes_on_publish() {
        let store = CacheStore::new();
        let mut view = UsersView::new(&store);

        let writer = store.clone();
        tokio::spawn(async move {
            writer.replace(Snapshot::new(users(1)));
        });

        assert!(view.changed().await);
        assert_eq!(view.render(now()).total_rows, 1);
    }
}
