//! Provider fetching.
//!
//! Requests go to the same origin the page was served from, so the
//! browser re-sends the Basic credentials it already holds.

use contracts::reports::ProviderShape;
use contracts::shared::report_view::{Payload, Row};
use gloo_net::http::Request;
use serde_json::Value;

/// Fetch one provider and parse its body into the expected shape.
///
/// Any non-2xx status, transport error or body that does not match the
/// shape is an `Err` carrying the detail for the console.
pub async fn fetch_payload(endpoint: &str, shape: ProviderShape) -> Result<Payload, String> {
    let response = Request::get(endpoint)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error {} from {}", response.status(), endpoint));
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    parse_payload(body, shape).map_err(|e| format!("{}: {}", endpoint, e))
}

pub fn parse_payload(body: Value, shape: ProviderShape) -> Result<Payload, String> {
    match (shape, body) {
        (ProviderShape::List, Value::Array(items)) => items
            .into_iter()
            .map(parse_row)
            .collect::<Result<Vec<_>, _>>()
            .map(Payload::List),
        (ProviderShape::List, other) => Err(format!("expected a list, got {}", kind_of(&other))),
        (ProviderShape::Single, body @ Value::Object(_)) => parse_row(body).map(Payload::Single),
        (ProviderShape::Single, other) => Err(format!("expected an object, got {}", kind_of(&other))),
    }
}

fn parse_row(item: Value) -> Result<Row, String> {
    serde_json::from_value(item).map_err(|e| format!("bad row: {}", e))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::report_view::CellValue;
    use serde_json::json;

    #[test]
    fn test_list_payload_parses_rows() {
        let payload = parse_payload(
            json!([{ "SKU": "A1", "Stock": 4 }, { "SKU": "B2", "Stock": null }]),
            ProviderShape::List,
        )
        .unwrap();
        let rows = payload.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Stock"), &CellValue::Number(4.0));
        assert!(rows[1].get("Stock").is_null());
        assert!(rows[1].get("Missing").is_null());
    }

    #[test]
    fn test_single_payload_parses_object() {
        let payload = parse_payload(json!({ "TotalSKUs": 12 }), ProviderShape::Single).unwrap();
        assert_eq!(
            payload.single().map(|r| r.get("TotalSKUs").clone()),
            Some(CellValue::Number(12.0))
        );
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        assert!(parse_payload(json!({ "error": "boom" }), ProviderShape::List).is_err());
        assert!(parse_payload(json!([]), ProviderShape::Single).is_err());
    }
}
