//! Integration tests for serializing in-memory response bodies.

use std::sync::Arc;
use std::thread;

use bytes::Bytes;
use pincer_response::header::{CONTENT_TYPE, HeaderValue};
use pincer_response::{
    BoxError, DataSerializer, Empty, EmptyBodyPolicy, JsonDecodableSerializer, JsonSerializer,
    PropertyListDecodableSerializer, PropertyListSerializer, RequestHead, ResponseHead,
    ResponseSerializer, StringSerializer, TextEncoding, XssiPreprocessor,
};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct User {
    id: u64,
    name: String,
}

fn request() -> RequestHead {
    let request = http::Request::get("https://httpbin.org/get")
        .body(())
        .expect("request");
    RequestHead::from(&request)
}

fn ok() -> ResponseHead {
    ResponseHead::new(200)
}

fn upstream() -> BoxError {
    "connection reset by peer".into()
}

fn utf32(text: &str) -> Bytes {
    let mut bytes = vec![0xFF, 0xFE, 0x00, 0x00];
    bytes.extend(text.chars().flat_map(|c| u32::from(c).to_le_bytes()));
    Bytes::from(bytes)
}

// Data

#[test]
fn test_data_serializer_with_data() {
    let data = DataSerializer::new()
        .serialize(Some(&request()), Some(&ok()), Some(Bytes::from("data")), None)
        .expect("data");

    assert_eq!(data, Bytes::from("data"));
}

#[test]
fn test_data_serializer_without_data() {
    let err = DataSerializer::new()
        .serialize(Some(&request()), Some(&ok()), None, None)
        .expect_err("missing data");

    assert!(err.is_input_data_nil());
}

#[test]
fn test_data_serializer_with_upstream_error_and_no_data() {
    let err = DataSerializer::new()
        .serialize(Some(&request()), Some(&ok()), None, Some(upstream()))
        .expect_err("upstream error");

    assert!(err.is_input_data_nil());
    let cause = err.upstream_error().expect("upstream error is kept");
    assert_eq!(cause.to_string(), "connection reset by peer");
}

#[test]
fn test_data_serializer_with_empty_status_codes() {
    let serializer = DataSerializer::new();

    for status in [204, 205] {
        let response = ResponseHead::new(status);
        let data = serializer
            .serialize(Some(&request()), Some(&response), None, None)
            .expect("empty data");
        assert!(data.is_empty(), "status {status}");
    }
}

// String

#[test]
fn test_string_serializer_with_utf8_data() {
    let text = StringSerializer::new()
        .serialize(None, Some(&ok()), Some(Bytes::from("random data")), None)
        .expect("string");

    assert_eq!(text, "random data");
}

#[test]
fn test_string_serializer_with_empty_data_and_no_response() {
    let text = StringSerializer::new()
        .serialize(None, None, Some(Bytes::new()), None)
        .expect("string");

    assert_eq!(text, "");
}

#[test]
fn test_string_serializer_with_explicit_encoding() {
    let text = StringSerializer::new()
        .with_encoding(TextEncoding::Utf32)
        .serialize(None, Some(&ok()), Some(utf32("random data")), None)
        .expect("string");

    assert_eq!(text, "random data");
}

#[test]
fn test_string_serializer_with_charset_from_response() {
    let response = ok().with_header(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=UTF-32"),
    );

    let text = StringSerializer::new()
        .serialize(None, Some(&response), Some(utf32("random data")), None)
        .expect("string");

    assert_eq!(text, "random data");
}

#[test]
fn test_string_serializer_with_utf8_charset_from_response() {
    let response = ok().with_header(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );

    let text = StringSerializer::new()
        .serialize(None, Some(&response), Some(Bytes::from("random data")), None)
        .expect("string");

    assert_eq!(text, "random data");
}

#[test]
fn test_string_serializer_with_utf32_data_and_utf8_charset() {
    let response = ok().with_header(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );

    let err = StringSerializer::new()
        .serialize(None, Some(&response), Some(utf32("random data")), None)
        .expect_err("invalid utf-8");

    assert!(err.is_string_serialization_failed());
    assert_eq!(err.failed_string_encoding(), Some(TextEncoding::Utf8));
}

#[test]
fn test_string_serializer_with_wrong_explicit_encoding() {
    let response = ok().with_header(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=UTF-32"),
    );

    let err = StringSerializer::new()
        .with_encoding(TextEncoding::Utf8)
        .serialize(None, Some(&response), Some(utf32("random data")), None)
        .expect_err("invalid utf-8");

    assert!(err.is_string_serialization_failed());
    assert_eq!(err.failed_string_encoding(), Some(TextEncoding::Utf8));
}

#[test]
fn test_string_serializer_with_unknown_charset_falls_back_to_utf8() {
    let response = ok().with_header(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=x-unknown"),
    );

    let text = StringSerializer::new()
        .serialize(None, Some(&response), Some(Bytes::from("café")), None)
        .expect("string");

    assert_eq!(text, "café");
}

#[test]
fn test_string_serializer_with_upstream_error_and_no_data() {
    let err = StringSerializer::new()
        .serialize(None, Some(&ok()), None, Some(upstream()))
        .expect_err("upstream error");

    assert!(err.is_input_data_nil());
    assert!(err.upstream_error().is_some());
}

// JSON

#[test]
fn test_json_serializer_with_valid_json() {
    let json = JsonSerializer::new()
        .serialize(Some(&request()), Some(&ok()), Some(Bytes::from(r#"{"json": true}"#)), None)
        .expect("json");

    assert_eq!(json, serde_json::json!({ "json": true }));
}

#[test]
fn test_json_serializer_with_invalid_json() {
    let err = JsonSerializer::new()
        .serialize(None, Some(&ok()), Some(Bytes::from("definitely not valid json")), None)
        .expect_err("invalid json");

    assert!(err.is_json_serialization_failed());
    assert!(err.underlying_error().is_some());
}

#[test]
fn test_json_serializer_without_data() {
    let err = JsonSerializer::new()
        .serialize(None, Some(&ok()), None, None)
        .expect_err("missing data");

    assert!(err.is_input_data_nil_or_zero_length());
}

#[test]
fn test_json_serializer_with_upstream_error_and_no_data() {
    let err = JsonSerializer::new()
        .serialize(None, Some(&ResponseHead::new(204)), None, Some(upstream()))
        .expect_err("upstream error");

    assert!(err.is_input_data_nil());
}

#[test]
fn test_json_serializer_with_data_and_upstream_error() {
    let json = JsonSerializer::new()
        .serialize(None, Some(&ok()), Some(Bytes::from("[1, 2]")), Some(upstream()))
        .expect("data wins over upstream error");

    assert_eq!(json, serde_json::json!([1, 2]));
}

#[test]
fn test_json_serializer_with_empty_status_codes() {
    let serializer = JsonSerializer::new();

    for status in [204, 205] {
        let response = ResponseHead::new(status);
        let json = serializer
            .serialize(None, Some(&response), Some(Bytes::new()), None)
            .expect("null");
        assert!(json.is_null(), "status {status}");
    }
}

#[test]
fn test_json_serializer_with_xssi_prefix() {
    let json = JsonSerializer::new()
        .with_preprocessor(XssiPreprocessor)
        .serialize(None, Some(&ok()), Some(Bytes::from(")]}',\n{\"a\": 1}")), None)
        .expect("json");

    assert_eq!(json["a"], 1);
}

// Property list

const PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>id</key>
    <integer>7</integer>
    <key>name</key>
    <string>Grace</string>
</dict>
</plist>"#;

#[test]
fn test_property_list_serializer_with_valid_plist() {
    let value = PropertyListSerializer::new()
        .serialize(None, Some(&ok()), Some(Bytes::from(PLIST)), None)
        .expect("plist")
        .expect("not null");

    let dict = value.as_dictionary().expect("dictionary");
    assert_eq!(dict.get("name").and_then(plist::Value::as_string), Some("Grace"));
}

#[test]
fn test_property_list_serializer_with_invalid_plist() {
    let err = PropertyListSerializer::new()
        .serialize(None, Some(&ok()), Some(Bytes::from("<plist><dict><key>broken")), None)
        .expect_err("invalid plist");

    assert!(err.is_property_list_serialization_failed());
}

#[test]
fn test_property_list_serializer_with_empty_data() {
    let err = PropertyListSerializer::new()
        .serialize(None, Some(&ok()), Some(Bytes::new()), None)
        .expect_err("empty data");

    assert!(err.is_input_data_nil_or_zero_length());

    let value = PropertyListSerializer::new()
        .serialize(None, Some(&ResponseHead::new(204)), Some(Bytes::new()), None)
        .expect("null");
    assert!(value.is_none());
}

// Decodable

#[test]
fn test_decodable_serializer_with_json() {
    let user = JsonDecodableSerializer::<User>::new()
        .serialize(
            Some(&request()),
            Some(&ok()),
            Some(Bytes::from(r#"{"id": 7, "name": "Grace"}"#)),
            None,
        )
        .expect("user");

    assert_eq!(user, User { id: 7, name: "Grace".to_string() });
}

#[test]
fn test_decodable_serializer_with_plist() {
    let user = PropertyListDecodableSerializer::<User>::default()
        .serialize(None, Some(&ok()), Some(Bytes::from(PLIST)), None)
        .expect("user");

    assert_eq!(user, User { id: 7, name: "Grace".to_string() });
}

#[test]
fn test_decodable_serializer_with_missing_field() {
    let err = JsonDecodableSerializer::<User>::new()
        .serialize(None, Some(&ok()), Some(Bytes::from(r#"{"id": 7}"#)), None)
        .expect_err("missing field");

    assert!(err.is_decoding_failed());
}

#[test]
fn test_decodable_serializer_with_empty_type() {
    let serializer = JsonDecodableSerializer::<Empty>::new();

    for status in [204, 205] {
        let response = ResponseHead::new(status);
        let empty = serializer
            .serialize(None, Some(&response), None, None)
            .expect("empty");
        assert_eq!(empty, Empty);
    }
}

#[test]
fn test_decodable_serializer_with_non_empty_type_and_empty_response() {
    let err = JsonDecodableSerializer::<User>::new()
        .serialize(None, Some(&ResponseHead::new(204)), None, None)
        .expect_err("user cannot be empty");

    assert!(err.is_invalid_empty_response());
}

#[test]
fn test_decodable_serializer_with_custom_empty_status() {
    let policy = EmptyBodyPolicy::from_status_codes([200]);
    let serializer = JsonDecodableSerializer::<Option<User>>::new().with_empty_body_policy(policy);

    let user = serializer
        .serialize(None, Some(&ok()), Some(Bytes::new()), None)
        .expect("none");
    assert_eq!(user, None);

    let err = serializer
        .serialize(None, Some(&ResponseHead::new(204)), Some(Bytes::new()), None)
        .expect_err("204 no longer allowed");
    assert!(err.is_input_data_nil_or_zero_length());
}

// Reuse

#[test]
fn test_serializer_is_reusable_across_threads() {
    let serializer = Arc::new(JsonDecodableSerializer::<User>::new());

    let handles: Vec<_> = (0..4_u64)
        .map(|id| {
            let serializer = Arc::clone(&serializer);
            thread::spawn(move || {
                let body = format!(r#"{{"id": {id}, "name": "user"}}"#);
                serializer
                    .serialize(None, None, Some(Bytes::from(body)), None)
                    .expect("user")
            })
        })
        .collect();

    for (id, handle) in (0..4_u64).zip(handles) {
        let user = handle.join().expect("thread");
        assert_eq!(user.id, id);
    }
}

#[test]
fn test_serialize_is_idempotent() {
    let serializer = JsonSerializer::new();
    let body = Bytes::from(r#"{"a": [1, 2, 3]}"#);

    let first = serializer
        .serialize(None, Some(&ok()), Some(body.clone()), None)
        .expect("first");
    let second = serializer
        .serialize(None, Some(&ok()), Some(body), None)
        .expect("second");

    assert_eq!(first, second);
}
