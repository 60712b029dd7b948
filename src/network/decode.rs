//! Response interpretation - status check and strict JSON decode

use serde::de::DeserializeOwned;

use crate::error::LoadError;
use crate::network::transport::TransportResponse;

const PREVIEW_CHAR_LIMIT: usize = 120;

/// Decode a JSON array body into records.
///
/// A literally empty body is `NoData`; `[]` is a successful empty collection.
/// A single bad record fails the whole decode.
pub fn decode_collection<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, LoadError> {
    if body.is_empty() {
        return Err(LoadError::NoData);
    }
    serde_json::from_slice(body).map_err(|e| LoadError::Decode(e.to_string()))
}

/// Turn a raw round trip into records or a load error
pub fn interpret_response<T: DeserializeOwned>(
    response: TransportResponse,
) -> Result<Vec<T>, LoadError> {
    if !response.is_success() {
        return Err(LoadError::Network(status_message(
            response.status,
            &response.body,
        )));
    }
    decode_collection(&response.body)
}

fn status_message(status: u16, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, preview)
    }
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{}...", preview)
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, Article, Photo};
    use rstest::rstest;

    #[test]
    fn test_empty_array_is_success() {
        let users: Vec<Account> = decode_collection(b"[]").unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn test_empty_body_is_no_data() {
        let err = decode_collection::<Account>(b"").unwrap_err();
        assert_eq!(err, LoadError::NoData);
    }

    #[rstest]
    #[case::not_json(&b"<html>oops</html>"[..])]
    #[case::object_not_array(&br#"{"id":1,"title":"t","body":"b","userId":1}"#[..])]
    #[case::wrong_type(&br#"[{"id":"one","title":"t","body":"b","userId":1}]"#[..])]
    #[case::missing_field(&br#"[{"id":1,"title":"t","userId":1}]"#[..])]
    #[case::whitespace_only(&b"  \n"[..])]
    fn test_shape_mismatch_is_decode_error(#[case] body: &[u8]) {
        let err = decode_collection::<Article>(body).unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)), "got {:?}", err);
    }

    #[test]
    fn test_photos_decode_without_album_id() {
        let body = br#"[{"id":1,"title":"t","url":"u","thumbnailUrl":"v"}]"#;
        let photos: Vec<Photo> = decode_collection(body).unwrap();
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].album_id, None);
    }

    #[test]
    fn test_one_bad_record_fails_whole_collection() {
        let body = br#"[
            {"id":1,"title":"a","body":"b","userId":1},
            {"id":2,"title":"a","userId":1}
        ]"#;
        let err = decode_collection::<Article>(body).unwrap_err();
        match err {
            LoadError::Decode(msg) => assert!(msg.contains("body"), "message: {}", msg),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[rstest]
    #[case::not_found(404, "Not Found", "HTTP 404: Not Found")]
    #[case::server_error(503, "", "HTTP 503")]
    fn test_error_status_is_network_error(
        #[case] status: u16,
        #[case] body: &str,
        #[case] expected: &str,
    ) {
        let resp = TransportResponse::new(status, body);
        let err = interpret_response::<Article>(resp).unwrap_err();
        assert_eq!(err, LoadError::Network(expected.to_string()));
    }

    #[test]
    fn test_preview_is_compacted_and_truncated() {
        let long = "x ".repeat(200);
        let preview = body_preview(long.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_CHAR_LIMIT + 3);
        assert_eq!(body_preview(b"  a \n\t b  "), "a b");
    }
}
