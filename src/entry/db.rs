//! Database operations for ledger entries.

use rusqlite::{Connection, Row, params, params_from_iter, types::Value, types::ValueRef};
use serde_json::Value as JsonValue;

use crate::{
    Error,
    entry::{EntryId, LedgerEntry, form::EntryForm, form::sanitize},
};

/// Initialize the ledger entry table.
///
/// Amount columns use NUMERIC affinity so that numeric text is stored as a
/// number while anything else is kept verbatim.
pub fn create_entry_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS ledger_entry (
            id INTEGER PRIMARY KEY,
            entry_name TEXT,
            date TEXT,
            power_bill NUMERIC NOT NULL DEFAULT 0,
            water_bill NUMERIC NOT NULL DEFAULT 0,
            emis NUMERIC NOT NULL DEFAULT 0,
            house_rent NUMERIC NOT NULL DEFAULT 0,
            subscriptions NUMERIC NOT NULL DEFAULT 0,
            internet_bill NUMERIC NOT NULL DEFAULT 0,
            study NUMERIC NOT NULL DEFAULT 0,
            entertainment NUMERIC NOT NULL DEFAULT 0,
            food_and_drink NUMERIC NOT NULL DEFAULT 0,
            dwakra_bill NUMERIC NOT NULL DEFAULT 0,
            groceries NUMERIC NOT NULL DEFAULT 0,
            health NUMERIC NOT NULL DEFAULT 0,
            shopping NUMERIC NOT NULL DEFAULT 0,
            transport NUMERIC NOT NULL DEFAULT 0,
            gifts NUMERIC NOT NULL DEFAULT 0,
            others NUMERIC NOT NULL DEFAULT 0,
            income NUMERIC NOT NULL DEFAULT 0,
            total_expenditure NUMERIC NOT NULL DEFAULT 0,
            gross_savings NUMERIC NOT NULL DEFAULT 0,
            bill_image TEXT,
            status INTEGER NOT NULL DEFAULT 1
        )",
        (),
    )?;

    Ok(())
}

/// Insert a ledger entry and return its generated ID.
///
/// Missing amount fields are coerced to 0; the status defaults to active.
pub fn insert_entry(form: &EntryForm, connection: &Connection) -> Result<EntryId, Error> {
    connection.execute(
        "INSERT INTO ledger_entry (
            entry_name, date, power_bill, water_bill, emis, house_rent,
            subscriptions, internet_bill, study, entertainment, food_and_drink,
            dwakra_bill, groceries, health, shopping, transport, gifts, others,
            income, total_expenditure, gross_savings, bill_image
        ) VALUES (
            ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
            ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22
        )",
        params![
            form.entry_name,
            form.date,
            sanitize(&form.power_bill),
            sanitize(&form.water_bill),
            sanitize(&form.emis),
            sanitize(&form.house_rent),
            sanitize(&form.subscriptions),
            sanitize(&form.internet_bill),
            sanitize(&form.study),
            sanitize(&form.entertainment),
            sanitize(&form.food_and_drink),
            sanitize(&form.dwakra_bill),
            sanitize(&form.groceries),
            sanitize(&form.health),
            sanitize(&form.shopping),
            sanitize(&form.transport),
            sanitize(&form.gifts),
            sanitize(&form.others),
            sanitize(&form.income),
            sanitize(&form.total_expenditure),
            sanitize(&form.gross_savings),
            form.bill_image,
        ],
    )?;

    Ok(connection.last_insert_rowid())
}

/// Overwrite every scalar field of an entry.
///
/// This is a full overwrite, not a patch: fields omitted from the form are
/// written as 0, not preserved. The bill image column is only touched when
/// the form carried a new file.
///
/// # Errors
/// Returns [Error::NotFound] if `entry_id` matches no row.
pub fn update_entry(
    entry_id: EntryId,
    form: &EntryForm,
    connection: &Connection,
) -> Result<(), Error> {
    let mut sql = String::from(
        "UPDATE ledger_entry SET
            entry_name = ?, date = ?, power_bill = ?, water_bill = ?, emis = ?,
            house_rent = ?, subscriptions = ?, internet_bill = ?, study = ?,
            entertainment = ?, food_and_drink = ?, dwakra_bill = ?, groceries = ?,
            health = ?, shopping = ?, transport = ?, gifts = ?, others = ?,
            income = ?, total_expenditure = ?, gross_savings = ?",
    );

    let mut params: Vec<Value> = vec![
        form.entry_name.clone().into(),
        form.date.clone().into(),
        sanitize(&form.power_bill).into(),
        sanitize(&form.water_bill).into(),
        sanitize(&form.emis).into(),
        sanitize(&form.house_rent).into(),
        sanitize(&form.subscriptions).into(),
        sanitize(&form.internet_bill).into(),
        sanitize(&form.study).into(),
        sanitize(&form.entertainment).into(),
        sanitize(&form.food_and_drink).into(),
        sanitize(&form.dwakra_bill).into(),
        sanitize(&form.groceries).into(),
        sanitize(&form.health).into(),
        sanitize(&form.shopping).into(),
        sanitize(&form.transport).into(),
        sanitize(&form.gifts).into(),
        sanitize(&form.others).into(),
        sanitize(&form.income).into(),
        sanitize(&form.total_expenditure).into(),
        sanitize(&form.gross_savings).into(),
    ];

    if let Some(bill_image) = &form.bill_image {
        sql.push_str(", bill_image = ?");
        params.push(bill_image.clone().into());
    }

    sql.push_str(" WHERE id = ?");
    params.push(entry_id.into());

    let rows_affected = connection.execute(&sql, params_from_iter(params))?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Mark an entry as deleted without removing the row.
///
/// # Errors
/// Returns [Error::NotFound] if `entry_id` matches no row.
pub fn soft_delete_entry(entry_id: EntryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE ledger_entry SET status = 0 WHERE id = ?1",
        [entry_id],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Summed income, expenditure and savings for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    /// Calendar month, 1 = January.
    pub month: i64,
    /// Summed income for the month.
    pub income: f64,
    /// Summed total expenditure for the month.
    pub expenses: f64,
    /// Summed gross savings for the month.
    pub savings: f64,
}

/// Sum income, expenditure and savings per calendar month for a year.
///
/// The owner filter, when given, must already be trimmed. Months without
/// matching rows are simply absent from the result. Soft-deleted entries are
/// included, matching the behavior of the dashboards this data feeds.
pub fn get_monthly_totals(
    year: &str,
    entry_name: Option<&str>,
    connection: &Connection,
) -> Result<Vec<MonthlyTotal>, Error> {
    let mut sql = String::from(
        "SELECT
            CAST(strftime('%m', date) AS INTEGER) AS month,
            SUM(income),
            SUM(total_expenditure),
            SUM(gross_savings)
        FROM ledger_entry
        WHERE strftime('%Y', date) = ?",
    );
    let mut params: Vec<Value> = vec![year.to_owned().into()];

    if let Some(name) = entry_name {
        sql.push_str(" AND entry_name = ?");
        params.push(name.to_owned().into());
    }

    sql.push_str(" GROUP BY month ORDER BY month");

    connection
        .prepare(&sql)?
        .query_map(params_from_iter(params), |row| {
            Ok(MonthlyTotal {
                month: row.get(0)?,
                income: row.get(1)?,
                expenses: row.get(2)?,
                savings: row.get(3)?,
            })
        })?
        .map(|maybe_total| maybe_total.map_err(|error| error.into()))
        .collect()
}

/// Retrieve full rows of active entries, newest date first.
///
/// Both filters are optional; the owner filter, when given, must already be
/// trimmed.
pub fn get_dashboard_entries(
    year: Option<&str>,
    entry_name: Option<&str>,
    connection: &Connection,
) -> Result<Vec<LedgerEntry>, Error> {
    let mut sql = String::from(
        "SELECT
            id, entry_name, date, income, total_expenditure, gross_savings,
            power_bill, water_bill, emis, house_rent, subscriptions,
            internet_bill, study, entertainment, food_and_drink, dwakra_bill,
            groceries, health, shopping, transport, gifts, others, bill_image
        FROM ledger_entry
        WHERE status = 1",
    );
    let mut params: Vec<Value> = Vec::new();

    if let Some(year) = year {
        sql.push_str(" AND strftime('%Y', date) = ?");
        params.push(year.to_owned().into());
    }

    if let Some(name) = entry_name {
        sql.push_str(" AND entry_name = ?");
        params.push(name.to_owned().into());
    }

    sql.push_str(" ORDER BY date DESC");

    connection
        .prepare(&sql)?
        .query_map(params_from_iter(params), map_entry_row)?
        .map(|maybe_entry| maybe_entry.map_err(|error| error.into()))
        .collect()
}

fn map_entry_row(row: &Row) -> Result<LedgerEntry, rusqlite::Error> {
    Ok(LedgerEntry {
        id: row.get(0)?,
        entry_name: row.get(1)?,
        date: row.get(2)?,
        income: amount_value(row, 3)?,
        total_expenditure: amount_value(row, 4)?,
        gross_savings: amount_value(row, 5)?,
        power_bill: amount_value(row, 6)?,
        water_bill: amount_value(row, 7)?,
        emis: amount_value(row, 8)?,
        house_rent: amount_value(row, 9)?,
        subscriptions: amount_value(row, 10)?,
        internet_bill: amount_value(row, 11)?,
        study: amount_value(row, 12)?,
        entertainment: amount_value(row, 13)?,
        food_and_drink: amount_value(row, 14)?,
        dwakra_bill: amount_value(row, 15)?,
        groceries: amount_value(row, 16)?,
        health: amount_value(row, 17)?,
        shopping: amount_value(row, 18)?,
        transport: amount_value(row, 19)?,
        gifts: amount_value(row, 20)?,
        others: amount_value(row, 21)?,
        bill_image: row.get(22)?,
    })
}

// Amounts come back exactly as stored: numbers for numeric values, strings
// for malformed input that was passed through on write.
fn amount_value(row: &Row, index: usize) -> Result<JsonValue, rusqlite::Error> {
    let value = match row.get_ref(index)? {
        ValueRef::Null => JsonValue::Null,
        ValueRef::Integer(value) => JsonValue::from(value),
        ValueRef::Real(value) => JsonValue::from(value),
        ValueRef::Text(text) => JsonValue::from(String::from_utf8_lossy(text).into_owned()),
        ValueRef::Blob(_) => JsonValue::Null,
    };

    Ok(value)
}

#[cfg(test)]
mod entry_db_tests {
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        Error,
        db::initialize,
        entry::{EntryForm, EntryId},
    };

    use super::{
        get_dashboard_entries, get_monthly_totals, insert_entry, soft_delete_entry, update_entry,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        connection
    }

    fn entry_form(name: &str, date: &str) -> EntryForm {
        EntryForm {
            entry_name: Some(name.to_string()),
            date: Some(date.to_string()),
            ..Default::default()
        }
    }

    fn count_entries(connection: &Connection) -> i64 {
        connection
            .query_row("SELECT COUNT(*) FROM ledger_entry", [], |row| row.get(0))
            .expect("Could not count entries")
    }

    fn get_status(entry_id: EntryId, connection: &Connection) -> i64 {
        connection
            .query_row(
                "SELECT status FROM ledger_entry WHERE id = ?1",
                [entry_id],
                |row| row.get(0),
            )
            .expect("Could not read status")
    }

    #[test]
    fn insert_entry_defaults_missing_amounts_to_zero() {
        let connection = get_test_db_connection();
        let form = EntryForm {
            income: Some("5000".to_string()),
            ..entry_form("Alice", "2024-03-05")
        };

        let entry_id = insert_entry(&form, &connection).expect("Could not insert entry");

        let entries = get_dashboard_entries(None, None, &connection).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.id, entry_id);
        assert_eq!(entry.income, json!(5000));
        assert_eq!(entry.power_bill, json!(0));
        assert_eq!(entry.groceries, json!(0));
        assert_eq!(entry.gross_savings, json!(0));
        assert_eq!(entry.bill_image, None);
        assert_eq!(get_status(entry_id, &connection), 1);
    }

    #[test]
    fn insert_entry_assigns_fresh_ids() {
        let connection = get_test_db_connection();

        let first = insert_entry(&entry_form("Alice", "2024-01-01"), &connection).unwrap();
        let second = insert_entry(&entry_form("Alice", "2024-01-02"), &connection).unwrap();

        assert!(second > first);
    }

    #[test]
    fn insert_entry_passes_non_numeric_amounts_through() {
        let connection = get_test_db_connection();
        let form = EntryForm {
            power_bill: Some("not a number".to_string()),
            income: Some("-250".to_string()),
            ..entry_form("Alice", "2024-03-05")
        };

        insert_entry(&form, &connection).expect("Could not insert entry");

        let entries = get_dashboard_entries(None, None, &connection).unwrap();
        assert_eq!(entries[0].power_bill, json!("not a number"));
        assert_eq!(entries[0].income, json!(-250));
    }

    #[test]
    fn update_entry_overwrites_all_scalar_fields() {
        let connection = get_test_db_connection();
        let form = EntryForm {
            power_bill: Some("100".to_string()),
            income: Some("5000".to_string()),
            ..entry_form("Alice", "2024-03-05")
        };
        let entry_id = insert_entry(&form, &connection).unwrap();

        let update_form = EntryForm {
            income: Some("7000".to_string()),
            ..entry_form("Alice", "2024-03-05")
        };
        update_entry(entry_id, &update_form, &connection).expect("Could not update entry");

        let entries = get_dashboard_entries(None, None, &connection).unwrap();
        assert_eq!(entries[0].income, json!(7000));
        // Full overwrite: the omitted power bill is reset to 0, not kept.
        assert_eq!(entries[0].power_bill, json!(0));
    }

    #[test]
    fn update_entry_preserves_attachment_when_no_new_file() {
        let connection = get_test_db_connection();
        let form = EntryForm {
            bill_image: Some("/uploads/123-receipt.png".to_string()),
            ..entry_form("Alice", "2024-03-05")
        };
        let entry_id = insert_entry(&form, &connection).unwrap();

        update_entry(entry_id, &entry_form("Alice", "2024-03-06"), &connection).unwrap();

        let entries = get_dashboard_entries(None, None, &connection).unwrap();
        assert_eq!(
            entries[0].bill_image.as_deref(),
            Some("/uploads/123-receipt.png")
        );
        assert_eq!(entries[0].date.as_deref(), Some("2024-03-06"));
    }

    #[test]
    fn update_entry_replaces_attachment_with_new_file() {
        let connection = get_test_db_connection();
        let form = EntryForm {
            bill_image: Some("/uploads/123-old.png".to_string()),
            ..entry_form("Alice", "2024-03-05")
        };
        let entry_id = insert_entry(&form, &connection).unwrap();

        let update_form = EntryForm {
            bill_image: Some("/uploads/456-new.png".to_string()),
            ..entry_form("Alice", "2024-03-05")
        };
        update_entry(entry_id, &update_form, &connection).unwrap();

        let entries = get_dashboard_entries(None, None, &connection).unwrap();
        assert_eq!(entries[0].bill_image.as_deref(), Some("/uploads/456-new.png"));
    }

    #[test]
    fn update_entry_with_unknown_id_returns_not_found() {
        let connection = get_test_db_connection();
        insert_entry(&entry_form("Alice", "2024-03-05"), &connection).unwrap();

        let result = update_entry(99999, &entry_form("Alice", "2024-03-05"), &connection);

        assert_eq!(result, Err(Error::NotFound));
        assert_eq!(count_entries(&connection), 1);
    }

    #[test]
    fn update_entry_succeeds_on_soft_deleted_row() {
        let connection = get_test_db_connection();
        let entry_id = insert_entry(&entry_form("Alice", "2024-03-05"), &connection).unwrap();
        soft_delete_entry(entry_id, &connection).unwrap();

        let result = update_entry(entry_id, &entry_form("Alice", "2024-03-06"), &connection);

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn soft_delete_keeps_row_but_hides_it_from_dashboard() {
        let connection = get_test_db_connection();
        let entry_id = insert_entry(&entry_form("Alice", "2024-03-05"), &connection).unwrap();

        soft_delete_entry(entry_id, &connection).expect("Could not soft-delete entry");

        assert_eq!(count_entries(&connection), 1);
        assert_eq!(get_status(entry_id, &connection), 0);
        let entries = get_dashboard_entries(None, None, &connection).unwrap();
        assert_eq!(entries, []);
    }

    #[test]
    fn soft_delete_with_unknown_id_returns_not_found() {
        let connection = get_test_db_connection();

        let result = soft_delete_entry(99999, &connection);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn get_monthly_totals_sums_rows_in_the_same_month() {
        let connection = get_test_db_connection();
        for (date, income) in [
            ("2024-03-01", "100"),
            ("2024-03-15", "200"),
            ("2024-04-02", "50"),
            ("2023-03-01", "999"),
        ] {
            let form = EntryForm {
                income: Some(income.to_string()),
                ..entry_form("Alice", date)
            };
            insert_entry(&form, &connection).unwrap();
        }

        let totals = get_monthly_totals("2024", None, &connection).unwrap();

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].month, 3);
        assert_eq!(totals[0].income, 300.0);
        assert_eq!(totals[1].month, 4);
        assert_eq!(totals[1].income, 50.0);
    }

    #[test]
    fn get_monthly_totals_filters_by_owner() {
        let connection = get_test_db_connection();
        for (name, income) in [("Alice", "100"), ("Bob", "200")] {
            let form = EntryForm {
                income: Some(income.to_string()),
                ..entry_form(name, "2024-03-01")
            };
            insert_entry(&form, &connection).unwrap();
        }

        let totals = get_monthly_totals("2024", Some("Bob"), &connection).unwrap();

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].income, 200.0);
    }

    #[test]
    fn get_monthly_totals_returns_empty_for_year_without_rows() {
        let connection = get_test_db_connection();
        insert_entry(&entry_form("Alice", "2024-03-05"), &connection).unwrap();

        let totals = get_monthly_totals("1999", None, &connection).unwrap();

        assert_eq!(totals, []);
    }

    #[test]
    fn get_monthly_totals_includes_soft_deleted_entries() {
        let connection = get_test_db_connection();
        let form = EntryForm {
            income: Some("100".to_string()),
            ..entry_form("Alice", "2024-03-05")
        };
        let entry_id = insert_entry(&form, &connection).unwrap();
        soft_delete_entry(entry_id, &connection).unwrap();

        let totals = get_monthly_totals("2024", None, &connection).unwrap();

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].income, 100.0);
    }

    #[test]
    fn get_dashboard_entries_orders_by_date_descending() {
        let connection = get_test_db_connection();
        for date in ["2024-01-15", "2024-03-05", "2024-02-10"] {
            insert_entry(&entry_form("Alice", date), &connection).unwrap();
        }

        let entries = get_dashboard_entries(None, None, &connection).unwrap();

        let dates: Vec<&str> = entries
            .iter()
            .map(|entry| entry.date.as_deref().unwrap())
            .collect();
        assert_eq!(dates, ["2024-03-05", "2024-02-10", "2024-01-15"]);
    }

    #[test]
    fn get_dashboard_entries_filters_by_year_and_owner() {
        let connection = get_test_db_connection();
        for (name, date) in [
            ("Alice", "2024-03-05"),
            ("Alice", "2023-03-05"),
            ("Bob", "2024-03-05"),
        ] {
            insert_entry(&entry_form(name, date), &connection).unwrap();
        }

        let entries = get_dashboard_entries(Some("2024"), Some("Alice"), &connection).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_name.as_deref(), Some("Alice"));
        assert_eq!(entries[0].date.as_deref(), Some("2024-03-05"));
    }
}
