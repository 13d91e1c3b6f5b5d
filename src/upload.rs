//! Saving uploaded bill images to the uploads directory.

use std::{fs, path::Path};

use time::OffsetDateTime;

use crate::{Error, endpoints};

/// Write an uploaded bill image to `uploads_dir` and return the
/// public-relative path it will be served from.
///
/// The file is stored as `<unix milliseconds>-<original file name>` so that
/// uploads sharing an original name do not collide.
///
/// # Errors
/// Returns [Error::FileSave] if the file cannot be written.
pub fn save_attachment(
    uploads_dir: &Path,
    original_file_name: &str,
    data: &[u8],
) -> Result<String, Error> {
    let timestamp_millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let unique_name = format!("{timestamp_millis}-{original_file_name}");

    fs::create_dir_all(uploads_dir).map_err(|error| Error::FileSave(error.to_string()))?;
    fs::write(uploads_dir.join(&unique_name), data)
        .map_err(|error| Error::FileSave(error.to_string()))?;

    tracing::debug!(
        "Saved bill image '{}' ({} bytes)",
        unique_name,
        data.len()
    );

    Ok(format!("{}/{}", endpoints::UPLOADS, unique_name))
}
