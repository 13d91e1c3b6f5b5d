//! Ledger entries: creation, update, soft-deletion, dashboard listing and
//! per-month aggregation.

mod create;
mod dashboard;
mod db;
mod delete;
mod domain;
mod form;
mod graph;
mod update;

pub use create::create_entry_endpoint;
pub use dashboard::dashboard_data_endpoint;
pub use db::{
    create_entry_table, get_dashboard_entries, get_monthly_totals, insert_entry,
    soft_delete_entry, update_entry,
};
pub use delete::delete_entry_endpoint;
pub use domain::{Amount, EntryId, LedgerEntry};
pub use form::{EntryForm, parse_entry_form, sanitize};
pub use graph::graph_data_endpoint;
pub use update::update_entry_endpoint;
