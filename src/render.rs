//! Plain-text rendering of the directory screen.

use crate::application::creation_flow::{CreationState, DialogPhase};
use crate::application::directory_store::{DirectorySnapshot, LoadState};
use crate::domain::customer::{Customer, DraftField};

/// One table row, keyed by the customer's email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub key: String,
    pub name: String,
    pub email: String,
}

impl CustomerRow {
    pub fn line(&self) -> String {
        format!("{} | {}", self.name, self.email)
    }
}

pub fn customer_rows(customers: &[Customer]) -> Vec<CustomerRow> {
    customers
        .iter()
        .map(|c| CustomerRow {
            key: c.email.clone(),
            name: c.display_name(),
            email: c.email.clone(),
        })
        .collect()
}

pub fn heading(count: usize) -> String {
    format!("{} Customers", count)
}

pub fn render_directory(snapshot: &DirectorySnapshot) -> String {
    match &snapshot.state {
        LoadState::Loading => "Loading...".to_string(),
        LoadState::Error(error) => format!("Error: {}", error.message),
        LoadState::Ready(customers) => {
            let mut lines = Vec::with_capacity(customers.len() + 3);
            // A failed refresh is reported above the data it left in place.
            if let Some(error) = &snapshot.last_error {
                lines.push(format!("Error: {}", error.message));
            }
            lines.push(heading(customers.len()));
            lines.push("Name | Email".to_string());
            lines.extend(customer_rows(customers).iter().map(CustomerRow::line));
            lines.join("\n")
        }
    }
}

/// `None` while the dialog is closed.
pub fn render_dialog(state: &CreationState) -> Option<String> {
    if !state.is_open() {
        return None;
    }

    let mut lines = vec!["Add Customer".to_string()];
    for field in DraftField::ALL {
        lines.push(format!("  {}: {}", field.label(), state.draft.get(field)));
    }
    if let Some(error) = &state.error {
        lines.push(format!("  Error: {}", error.message));
    }
    lines.push(match state.phase {
        DialogPhase::Submitting => "[Cancel] [Creating...]".to_string(),
        _ => "[Cancel] [Create]".to_string(),
    });
    Some(lines.join("\n"))
}
