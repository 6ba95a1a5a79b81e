//! Filters every client registers at construction.

use crate::error::ClientError;
use crate::http::HttpRequest;
use crate::types::{Options, Reply};

pub const APPLICATION_JSON: &str = "application/json";

/// Request filter: for JSON requests, overwrite `Content-Type` and `Accept`
/// with `application/json`. Other requests pass through untouched.
pub fn default_content_type(mut request: HttpRequest, options: &Options) -> Option<HttpRequest> {
    if !options.is_json() {
        return Some(request);
    }
    request.headers.set("Content-Type", APPLICATION_JSON);
    request.headers.set("Accept", APPLICATION_JSON);
    Some(request)
}

/// Response filter: replace a raw response whose `content-type` mentions
/// `application/json` with its parsed body.
///
/// A body that fails to parse rejects the call. Responses without a
/// content type, or with any other one, are returned unchanged.
pub fn json_response(
    reply: Reply,
    _request: &HttpRequest,
    _options: &Options,
) -> Result<Option<Reply>, ClientError> {
    let response = match reply {
        Reply::Raw(response) => response,
        parsed @ Reply::Json(_) => return Ok(Some(parsed)),
    };

    let is_json = response
        .headers
        .get("content-type")
        .is_some_and(|value| value.to_lowercase().contains(APPLICATION_JSON));
    if !is_json {
        return Ok(Some(Reply::Raw(response)));
    }

    let value = response.json().map_err(ClientError::Deserialization)?;
    Ok(Some(Reply::Json(value)))
}
