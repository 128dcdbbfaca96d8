use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

use crate::models::{DealType, FlightDeal, GroundingChunk, SearchResponse};

/// Number of deals a well-formed reply must carry
pub const EXPECTED_DEALS: usize = 3;

/// Reasons a model reply cannot be turned into a [`SearchResponse`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("response is not valid JSON: {0}")]
    NotJson(String),

    #[error("response does not match the expected shape: {0}")]
    Schema(String),
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    deals: Vec<FlightDeal>,
    summary: String,
}

/// Strip what surrounds the JSON document in a model reply
///
/// Blank text is treated as an empty object. A Markdown code fence around the
/// document is removed.
pub fn extract_json_payload(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "{}";
    }

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") on the opening fence line
    match body.split_once('\n') {
        Some((info, inner)) if !info.trim().contains(['{', '[']) => inner.trim(),
        _ => strip_info_string(body.trim()),
    }
}

/// Drop a language tag glued to a single-line fence ("```json{...}```")
fn strip_info_string(body: &str) -> &str {
    match body.find(['{', '[']) {
        Some(start) if body[..start].trim().chars().all(|c| c.is_ascii_alphanumeric()) => &body[start..],
        _ => body,
    }
}

/// Parse and validate a model reply, attaching the service's citations
pub fn parse_search_response(
    text: &str,
    grounding_chunks: Option<Vec<GroundingChunk>>,
) -> Result<SearchResponse, ResponseError> {
    let payload = extract_json_payload(text);

    let value: Value =
        serde_json::from_str(payload).map_err(|e| ResponseError::NotJson(e.to_string()))?;

    let raw: RawResponse =
        serde_json::from_value(value).map_err(|e| ResponseError::Schema(e.to_string()))?;

    let deals = validate_deals(raw.deals)?;

    if raw.summary.trim().is_empty() {
        return Err(ResponseError::Schema("summary is empty".into()));
    }

    Ok(SearchResponse {
        deals,
        summary: raw.summary,
        grounding_chunks: grounding_chunks.filter(|chunks| !chunks.is_empty()),
    })
}

/// Require exactly one deal per [`DealType`], returned in display order
fn validate_deals(mut deals: Vec<FlightDeal>) -> Result<Vec<FlightDeal>, ResponseError> {
    if deals.len() != EXPECTED_DEALS {
        return Err(ResponseError::Schema(format!(
            "expected {} deals, got {}",
            EXPECTED_DEALS,
            deals.len()
        )));
    }

    let mut seen = HashSet::new();
    for deal in &deals {
        if !seen.insert(deal.deal_type) {
            return Err(ResponseError::Schema(format!(
                "duplicate deal type {}",
                deal.deal_type.as_str()
            )));
        }
    }

    deals.sort_by_key(|d| d.deal_type);
    Ok(deals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WebSource;

    fn deal_json(tag: &str) -> String {
        format!(
            r#"{{"type":"{}","airline":"TAP","price":"R$ 4.210,00","description":"Voo direto","howToBuy":"Reserve no site","link":"https://www.flytap.com","isTotalWithTaxes":true}}"#,
            tag
        )
    }

    fn reply(tags: &[&str], summary: &str) -> String {
        let deals: Vec<String> = tags.iter().map(|t| deal_json(t)).collect();
        format!(r#"{{"deals":[{}],"summary":"{}"}}"#, deals.join(","), summary)
    }

    #[test]
    fn test_well_formed_reply() {
        let text = reply(&["most_expensive", "cheapest_cash", "cheapest_miles"], "Compre agora");
        let response = parse_search_response(&text, None).unwrap();

        let order: Vec<_> = response.deals.iter().map(|d| d.deal_type).collect();
        assert_eq!(order, DealType::ALL.to_vec());
        assert_eq!(response.summary, "Compre agora");
        assert!(response.grounding_chunks.is_none());
        assert_eq!(response.deals[0].currency, "");
    }

    #[test]
    fn test_non_json_reply() {
        let err = parse_search_response("Desculpe, não encontrei voos.", None).unwrap_err();
        assert!(matches!(err, ResponseError::NotJson(_)));
    }

    #[test]
    fn test_blank_reply_is_schema_error() {
        let err = parse_search_response("   ", None).unwrap_err();
        assert!(matches!(err, ResponseError::Schema(_)));
    }

    #[test]
    fn test_wrong_deal_count() {
        let text = reply(&["cheapest_cash", "cheapest_miles"], "ok");
        assert_eq!(
            parse_search_response(&text, None).unwrap_err(),
            ResponseError::Schema("expected 3 deals, got 2".into())
        );
    }

    #[test]
    fn test_duplicate_deal_type() {
        let text = reply(&["cheapest_cash", "cheapest_cash", "most_expensive"], "ok");
        let err = parse_search_response(&text, None).unwrap_err();
        assert_eq!(err, ResponseError::Schema("duplicate deal type cheapest_cash".into()));
    }

    #[test]
    fn test_wrong_field_type() {
        let text = r#"{"deals":[{"type":"cheapest_cash","airline":1}],"summary":"x"}"#;
        assert!(matches!(parse_search_response(text, None), Err(ResponseError::Schema(_))));
    }

    #[test]
    fn test_empty_summary() {
        let text = reply(&["cheapest_cash", "cheapest_miles", "most_expensive"], " ");
        assert!(matches!(parse_search_response(&text, None), Err(ResponseError::Schema(_))));
    }

    #[test]
    fn test_grounding_chunks_merged() {
        let text = reply(&["cheapest_cash", "cheapest_miles", "most_expensive"], "ok");
        let chunks = vec![GroundingChunk {
            web: Some(WebSource { uri: "https://www.google.com/flights".into(), title: "Google Flights".into() }),
        }];

        let response = parse_search_response(&text, Some(chunks.clone())).unwrap();
        assert_eq!(response.grounding_chunks, Some(chunks));

        let response = parse_search_response(&text, Some(vec![])).unwrap();
        assert!(response.grounding_chunks.is_none());
    }

    #[test]
    fn test_extract_fenced_payload() {
        assert_eq!(extract_json_payload("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(extract_json_payload("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(extract_json_payload("```{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(extract_json_payload("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(extract_json_payload(""), "{}");
    }

    #[test]
    fn test_extract_single_line_fence_with_tag() {
        assert_eq!(extract_json_payload("```json{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(extract_json_payload("```JSON [1,2]```"), "[1,2]");

        let text = format!("```json{}```", reply(&["cheapest_cash", "cheapest_miles", "most_expensive"], "Compre agora"));
        assert!(parse_search_response(&text, None).is_ok());
    }
}
