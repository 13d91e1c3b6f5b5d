//! Core ledger entry types.

use serde::{Deserialize, Serialize};

/// Database identifier for a ledger entry.
pub type EntryId = i64;

/// A monetary amount as it appears in the store.
///
/// Amounts are not validated on write: missing values are coerced to 0 and
/// everything else is passed through unchanged, so a stored amount may come
/// back as a number or, for malformed input, as the original string. The
/// JSON value mirrors exactly what the store holds.
pub type Amount = serde_json::Value;

/// One household expense record for a given date and owner.
///
/// The aggregate fields (`income`, `total_expenditure`, `gross_savings`) are
/// supplied by the client and are not recomputed from the category amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The entry's database identifier.
    pub id: EntryId,
    /// Free-text name of the household member the entry belongs to.
    pub entry_name: Option<String>,
    /// Calendar date of the entry as a plain `YYYY-MM-DD` string.
    pub date: Option<String>,
    /// Income for the period.
    pub income: Amount,
    /// Total expenditure as reported by the client.
    pub total_expenditure: Amount,
    /// Gross savings as reported by the client.
    pub gross_savings: Amount,
    /// Electricity bill.
    pub power_bill: Amount,
    /// Water bill.
    pub water_bill: Amount,
    /// Loan installments.
    pub emis: Amount,
    /// Rent.
    pub house_rent: Amount,
    /// Subscription services.
    pub subscriptions: Amount,
    /// Internet bill.
    pub internet_bill: Amount,
    /// Study expenses.
    pub study: Amount,
    /// Entertainment.
    pub entertainment: Amount,
    /// Food and drink.
    pub food_and_drink: Amount,
    /// The recurring dwakra savings bill.
    pub dwakra_bill: Amount,
    /// Groceries.
    pub groceries: Amount,
    /// Health and wellbeing.
    pub health: Amount,
    /// Shopping.
    pub shopping: Amount,
    /// Transport.
    pub transport: Amount,
    /// Gifts.
    pub gifts: Amount,
    /// Anything that does not fit the other categories.
    pub others: Amount,
    /// Public-relative path of the attached bill image, if one was uploaded.
    pub bill_image: Option<String>,
}
