//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/entries/{entry_id}', use
//! [format_endpoint].

/// The route to create a ledger entry.
pub const ENTRIES: &str = "/api/entries";
/// The route to update or soft-delete a single ledger entry.
pub const ENTRY: &str = "/api/entries/{entry_id}";
/// The route to list the names of active users.
pub const ENTRY_NAMES: &str = "/api/entry_names";
/// The route to fetch per-month income/expense/savings totals for a year.
pub const GRAPH_DATA: &str = "/api/graph_data";
/// The route to fetch full entry rows for the dashboard.
pub const DASHBOARD_DATA: &str = "/api/dashboard_data";
/// The route prefix that uploaded bill images are served from.
pub const UPLOADS: &str = "/uploads";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/entries/{entry_id}', '{entry_id}'
/// is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
