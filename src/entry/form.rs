//! Multipart form parsing for entry creation and update.

use std::path::Path;

use axum::extract::{Multipart, multipart::Field};

use crate::{Error, upload::save_attachment};

/// The multipart field that carries the bill image.
const FILE_FIELD: &str = "file";

/// The scalar fields of an entry form, as received from the client.
///
/// All amount fields are kept as raw text until they are bound to an SQL
/// statement, where [sanitize] is applied. `bill_image` is only set when the
/// form carried a file, in which case the file has already been written to
/// the uploads directory.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EntryForm {
    /// Owner name, unsanitized.
    pub entry_name: Option<String>,
    /// Calendar date string, unsanitized.
    pub date: Option<String>,
    /// Electricity bill.
    pub power_bill: Option<String>,
    /// Water bill.
    pub water_bill: Option<String>,
    /// Loan installments.
    pub emis: Option<String>,
    /// Rent.
    pub house_rent: Option<String>,
    /// Subscription services.
    pub subscriptions: Option<String>,
    /// Internet bill.
    pub internet_bill: Option<String>,
    /// Study expenses.
    pub study: Option<String>,
    /// Entertainment.
    pub entertainment: Option<String>,
    /// Food and drink.
    pub food_and_drink: Option<String>,
    /// The recurring dwakra savings bill.
    pub dwakra_bill: Option<String>,
    /// Groceries.
    pub groceries: Option<String>,
    /// Health and wellbeing.
    pub health: Option<String>,
    /// Shopping.
    pub shopping: Option<String>,
    /// Transport.
    pub transport: Option<String>,
    /// Gifts.
    pub gifts: Option<String>,
    /// Anything that does not fit the other categories.
    pub others: Option<String>,
    /// Income for the period.
    pub income: Option<String>,
    /// Total expenditure as reported by the client.
    pub total_expenditure: Option<String>,
    /// Gross savings as reported by the client.
    pub gross_savings: Option<String>,
    /// Public-relative path of the saved bill image, when a file was uploaded.
    pub bill_image: Option<String>,
}

impl EntryForm {
    fn set_scalar_field(&mut self, name: &str, value: String) {
        let slot = match name {
            "entryname" => &mut self.entry_name,
            "date" => &mut self.date,
            "powerbill" => &mut self.power_bill,
            "waterbill" => &mut self.water_bill,
            "emis" => &mut self.emis,
            "houserent" => &mut self.house_rent,
            "subscriptions" => &mut self.subscriptions,
            "internetbill" => &mut self.internet_bill,
            "study" => &mut self.study,
            "entertainment" => &mut self.entertainment,
            "fooddrink" => &mut self.food_and_drink,
            "dwakra" => &mut self.dwakra_bill,
            "groceries" => &mut self.groceries,
            "health" => &mut self.health,
            "shopping" => &mut self.shopping,
            "transport" => &mut self.transport,
            "gifts" => &mut self.gifts,
            "others" => &mut self.others,
            "income" => &mut self.income,
            "total_expenditure" => &mut self.total_expenditure,
            "gross_savings" => &mut self.gross_savings,
            // Unknown fields are ignored.
            _ => return,
        };

        *slot = Some(value);
    }
}

/// Coerce a missing, empty, or null amount to "0".
///
/// Any other value, including `"0"`, negative numbers, and non-numeric
/// strings, is passed through to the store unchanged. This is deliberate
/// null-coalescing, not validation.
pub fn sanitize(value: &Option<String>) -> String {
    match value {
        Some(value) if !value.is_empty() => value.clone(),
        _ => "0".to_string(),
    }
}

/// Read an entry form from a multipart request body.
///
/// Scalar fields are collected as text. The field named `file` is written to
/// `uploads_dir` as it is read, before the caller touches the database, so a
/// failed insert can leave an orphaned file behind. This mirrors how the
/// upload middleware of the original service behaved and is accepted.
///
/// # Errors
/// Returns [Error::MultipartError] if the form cannot be parsed and
/// [Error::FileSave] if the bill image cannot be written.
pub async fn parse_entry_form(
    multipart: &mut Multipart,
    uploads_dir: &Path,
) -> Result<EntryForm, Error> {
    let mut form = EntryForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| Error::MultipartError(error.to_string()))?
    {
        let name = match field.name() {
            Some(name) => name.to_owned(),
            None => continue,
        };

        if name == FILE_FIELD {
            form.bill_image = Some(save_field_as_attachment(field, uploads_dir).await?);
        } else {
            let value = field
                .text()
                .await
                .map_err(|error| Error::MultipartError(error.to_string()))?;
            form.set_scalar_field(&name, value);
        }
    }

    Ok(form)
}

async fn save_field_as_attachment(
    field: Field<'_>,
    uploads_dir: &Path,
) -> Result<String, Error> {
    let file_name = match field.file_name() {
        Some(file_name) => file_name.to_owned(),
        None => {
            tracing::error!("Could not get file name from multipart form field");
            return Err(Error::MultipartError(
                "could not get file name from multipart form field".to_owned(),
            ));
        }
    };

    let data = field.bytes().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("could not read data from multipart form field".to_owned())
    })?;

    save_attachment(uploads_dir, &file_name, &data)
}
