//! Pretty output formatting.

use usersync_core::mutation::MutationOutcome;
use usersync_core::user::User;
use usersync_core::view::{Column, DerivedRow, SortDirection, TablePage};

/// Format a user for display.
pub fn format_user(user: &User) -> String {
    let id = user
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("{} <{}>\n  ID: {}\n  Role: {}", user.name, user.email, id, user.role)
}

/// Format a mutation outcome for display.
pub fn format_outcome(outcome: &MutationOutcome) -> String {
    match outcome {
        MutationOutcome::Created(user) => format!("Created:\n{}", format_user(user)),
        MutationOutcome::Updated(user) => format!("Updated:\n{}", format_user(user)),
        MutationOutcome::Deleted(id) => format!("Deleted user {}", id),
    }
}

fn cell(row: &DerivedRow, column: Column) -> String {
    match column {
        Column::LastLogin => format!("{} {}", row.last_login_date(), row.last_login_time()),
        Column::Name if row.pending => format!("{} (saving)", row.user.name),
        _ => row.cell(column),
    }
}

fn header(page: &TablePage, column: Column) -> String {
    let label = column.label().to_uppercase();
    match page.sort {
        Some(sort) if sort.column == column => match sort.direction {
            SortDirection::Ascending => format!("{label} ^"),
            SortDirection::Descending => format!("{label} v"),
        },
        _ => label,
    }
}

/// Format a table page for display.
pub fn format_page(page: &TablePage) -> String {
    if page.total_rows == 0 {
        return "No users found.".to_string();
    }

    let headers: Vec<String> = Column::ALL.iter().map(|c| header(page, *c)).collect();
    let cells: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|row| Column::ALL.iter().map(|c| cell(row, *c)).collect())
        .collect();

    let widths: Vec<usize> = (0..Column::ALL.len())
        .map(|i| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(headers[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render_line = |values: &[String]| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut output = format!("USERS ({})\n", page.total_rows);
    output.push_str(&render_line(&headers));
    output.push('\n');
    output.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    for row in &cells {
        output.push('\n');
        output.push_str(&render_line(row));
    }
    output.push_str(&format!("\n\n{}", page.label()));
    output
}
