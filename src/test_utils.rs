//! Helper functions for building test requests.

use axum::{
    body::Body,
    extract::{FromRequest, Multipart},
    http::Request,
};

use crate::endpoints;

/// Build a [Multipart] extractor from scalar form fields and an optional
/// file part, the way a browser would encode an entry form.
pub async fn must_make_entry_multipart(
    fields: &[(&str, &str)],
    file: Option<(&str, &str)>,
) -> Multipart {
    let boundary = "MY_BOUNDARY123456789";
    let boundary_start = format!("--{boundary}");
    let boundary_end = format!("--{boundary}--");

    let mut lines: Vec<String> = Vec::new();

    for (name, value) in fields {
        lines.push(boundary_start.clone());
        lines.push(format!(
            "Content-Disposition: form-data; name=\"{name}\""
        ));
        lines.push(String::new());
        lines.push((*value).to_owned());
    }

    if let Some((file_name, contents)) = file {
        lines.push(boundary_start.clone());
        lines.push(format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\""
        ));
        lines.push("Content-Type: application/octet-stream".to_owned());
        lines.push(String::new());
        lines.push(contents.to_owned());
    }

    lines.push(boundary_end);

    let data = lines.join("\r\n").into_bytes();

    let request = Request::builder()
        .method("POST")
        .uri(endpoints::ENTRIES)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(data))
        .unwrap();

    Multipart::from_request(request, &()).await.unwrap()
}
