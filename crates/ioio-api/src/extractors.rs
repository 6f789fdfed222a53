//! # Request Body Decoding
//!
//! Submissions arrive either as JSON or as an urlencoded form. Both are read
//! into a [`Submission`] so the handlers and validation rules never care
//! which encoding the client chose.

use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use ioio_core::{Submission, SubmissionError};

/// Media type of urlencoded form bodies.
const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

/// True if the request declares an urlencoded form body.
pub fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|media| media.trim().eq_ignore_ascii_case(FORM_MEDIA_TYPE))
}

/// Decode a request body into a [`Submission`].
///
/// Form bodies are decoded as urlencoded pairs. Anything else is read as
/// JSON; an empty body yields an empty submission.
pub fn parse_submission(headers: &HeaderMap, body: &[u8]) -> Result<Submission, SubmissionError> {
    if is_form(headers) {
        let text =
            std::str::from_utf8(body).map_err(|e| SubmissionError::MalformedForm(e.to_string()))?;
        Ok(Submission::from_pairs(
            url::form_urlencoded::parse(text.as_bytes()).into_owned(),
        ))
    } else {
        Submission::from_json_bytes(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use ioio_core::FieldValue;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn detects_form_content_type_with_charset() {
        assert!(is_form(&headers("application/x-www-form-urlencoded; charset=UTF-8")));
        assert!(!is_form(&headers("application/json")));
        assert!(!is_form(&HeaderMap::new()));
    }

    #[test]
    fn decodes_form_pairs() {
        let sub = parse_submission(
            &headers("application/x-www-form-urlencoded"),
            b"name=Ann+Lee&age=30&message=hello%21",
        )
        .unwrap();
        assert_eq!(sub.field("name"), FieldValue::Text("Ann Lee".into()));
        assert_eq!(sub.field("message"), FieldValue::Text("hello!".into()));
        assert_eq!(sub.integer("age"), Ok(30));
    }

    #[test]
    fn decodes_json_body() {
        let sub = parse_submission(&headers("application/json"), br#"{"name":"A","age":30}"#).unwrap();
        assert_eq!(sub.len(), 2);
    }

    #[test]
    fn empty_body_is_empty_submission() {
        let sub = parse_submission(&HeaderMap::new(), b"").unwrap();
        assert!(sub.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = parse_submission(&headers("application/json"), b"{not json").unwrap_err();
        assert!(matches!(err, SubmissionError::MalformedJson(_)));
    }

    #[test]
    fn invalid_utf8_form_is_an_error() {
        let err = parse_submission(&headers("application/x-www-form-urlencoded"), &[0xff, 0xfe])
            .unwrap_err();
        assert!(matches!(err, SubmissionError::MalformedForm(_)));
    }
}
