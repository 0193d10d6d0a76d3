//! Demo user generation for offline runs and tests.
//!
//! Pure functions: the same `count` always produces the same users.

use crate::user::User;

const FIRST_NAMES: [&str; 10] = [
    "Leanne", "Ervin", "Clementine", "Patricia", "Chelsey", "Dennis", "Kurtis", "Nicholas",
    "Glenna", "Clementina",
];

const LAST_NAMES: [&str; 10] = [
    "Graham", "Howell", "Bauch", "Lebsack", "Dietrich", "Schulist", "Weissnat", "Runolfsdottir",
    "Reichert", "DuBuque",
];

const ROLES: [&str; 4] = ["admin", "editor", "viewer", "member"];

/// Generates `count` users with ids `1..=count`.
///
/// # Example
///
/// ```
/// use usersync_core::mock_data::generate_demo_users;
///
/// let users = generate_demo_users(12);
///
/// assert_eq!(users.len(), 12);
/// assert_eq!(users[0].id, Some(1));
/// ```
pub fn generate_demo_users(count: usize) -> Vec<User> {
    (0..count)
        .map(|i| {
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last = LAST_NAMES[(i / FIRST_NAMES.len() + i) % LAST_NAMES.len()];
            let role = ROLES[i % ROLES.len()];
            let email = format!(
                "{}.{}{}@example.com",
                first.to_lowercase(),
                last.to_lowercase(),
                i / FIRST_NAMES.len()
            );
            User::new(format!("{first} {last}"), email, role).with_id(i as u64 + 1)
        })
        .collect()
}
