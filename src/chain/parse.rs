use serde::Deserialize;

use crate::error::TickerError;

use super::types::{ChainPage, OptionQuote};

/// Element id of the `<script>` block the quote page embeds its state in.
pub const ROUTE_DATA_ID: &str = "route-init-data";

// ── Payload shape ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RoutePayload {
    #[serde(default)]
    options: Option<Vec<OptionQuote>>,
    #[serde(rename = "lastClose", default)]
    last_close: Option<f64>,
}

// ── Public API ──────────────────────────────────────────────────────

/// Pull the embedded route data out of a quote page and validate it.
///
/// Missing block or undecodable JSON is a [`TickerError::Parse`]; a missing,
/// zero or negative `lastClose` is a [`TickerError::Data`].
pub fn parse_chain_page(html: &str) -> Result<ChainPage, TickerError> {
    let block = extract_script_by_id(html, ROUTE_DATA_ID).ok_or_else(|| {
        TickerError::Parse(format!("no `{ROUTE_DATA_ID}` data block in the page"))
    })?;
    parse_route_data(block)
}

/// Decode the JSON body of the route data block.
pub fn parse_route_data(json: &str) -> Result<ChainPage, TickerError> {
    let payload: RoutePayload = serde_json::from_str(json.trim())
        .map_err(|e| TickerError::Parse(format!("decoding route data: {e}")))?;

    let last_close = match payload.last_close {
        Some(price) if price.is_finite() && price > 0.0 => price,
        Some(price) => {
            return Err(TickerError::Data(format!(
                "last closing price is {price}"
            )));
        }
        None => {
            return Err(TickerError::Data(
                "last closing price missing from route data".to_string(),
            ));
        }
    };

    Ok(ChainPage {
        options: payload.options.unwrap_or_default(),
        last_close,
    })
}

/// Return the text content of the first `<script>` element whose `id`
/// attribute equals `id`.
pub fn extract_script_by_id<'a>(html: &'a str, id: &str) -> Option<&'a str> {
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let mut cursor = 0;

    while let Some(rel) = lower[cursor..].find("<script") {
        let tag_start = cursor + rel;
        let after_name = tag_start + "<script".len();
        let tag_end = after_name + find_tag_end(&lower[after_name..])?;
        cursor = tag_end + 1;

        // Reject `<scripts>` and friends.
        match lower[after_name..].chars().next() {
            Some(c) if c.is_ascii_whitespace() || c == '>' || c == '/' => {}
            _ => continue,
        }

        let close = cursor + lower[cursor..].find("</script")?;
        if attr_equals(&html[after_name..tag_end], "id", id) {
            return Some(&html[cursor..close]);
        }
        cursor = close;
    }
    None
}

// ── Internal helpers ────────────────────────────────────────────────

/// Offset of the `>` closing a start tag, ignoring any inside quoted
/// attribute values.
fn find_tag_end(tag: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in tag.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

/// Whether a tag's attribute list carries `name=value` (quoted or bare).
fn attr_equals(attrs: &str, name: &str, value: &str) -> bool {
    let mut rest = attrs;
    while let Some(pos) = rest.find('=') {
        let key = rest[..pos]
            .rsplit(|c: char| c.is_ascii_whitespace())
            .next()
            .unwrap_or("");
        let after = rest[pos + 1..].trim_start();

        let (found, remainder) = match after.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &after[1..];
                match body.find(q) {
                    Some(end) => (&body[..end], &body[end + 1..]),
                    None => (body, ""),
                }
            }
            _ => {
                let end = after
                    .find(|c: char| c.is_ascii_whitespace() || c == '/')
                    .unwrap_or(after.len());
                (&after[..end], &after[end..])
            }
        };

        if key.eq_ignore_ascii_case(name) && found == value {
            return true;
        }
        rest = remainder;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::types::OptionType;

    fn page(body: &str) -> String {
        format!(
            "<html><head><script src=\"/app.js\"></script></head><body>\
             <script id=\"route-init-data\" type=\"application/json\">{body}</script>\
             </body></html>"
        )
    }

    #[test]
    fn test_extracts_block_by_id() {
        let html = page(r#"{"lastClose": 10}"#);
        assert_eq!(
            extract_script_by_id(&html, ROUTE_DATA_ID),
            Some(r#"{"lastClose": 10}"#)
        );
    }

    #[test]
    fn test_extract_skips_other_scripts_and_accepts_single_quotes() {
        let html = "<script id='other'>nope</script>\
                    <SCRIPT type='x' id='route-init-data'>yes</SCRIPT>";
        assert_eq!(extract_script_by_id(html, ROUTE_DATA_ID), Some("yes"));
        assert_eq!(extract_script_by_id(html, "missing"), None);
    }

    #[test]
    fn test_extract_ignores_gt_inside_quoted_attribute() {
        let html = "<script data-x=\"a>b\" id=\"route-init-data\">{\"lastClose\": 1}</script>";
        assert_eq!(
            extract_script_by_id(html, ROUTE_DATA_ID),
            Some("{\"lastClose\": 1}")
        );
    }

    #[test]
    fn test_extract_does_not_match_data_id_prefix() {
        let html = "<script data-id=\"route-init-data\">no</script>";
        assert_eq!(extract_script_by_id(html, ROUTE_DATA_ID), None);
    }

    #[test]
    fn test_missing_block_is_parse_error() {
        let err = parse_chain_page("<html><body>blocked</body></html>").unwrap_err();
        assert!(matches!(err, TickerError::Parse(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = parse_chain_page(&page("{not json")).unwrap_err();
        assert!(matches!(err, TickerError::Parse(_)));

        let err = parse_chain_page(&page(r#"{"lastClose": "200"}"#)).unwrap_err();
        assert!(matches!(err, TickerError::Parse(_)));
    }

    #[test]
    fn test_zero_or_missing_last_close_is_data_error() {
        for body in [
            r#"{"options": [], "lastClose": 0}"#,
            r#"{"options": []}"#,
            r#"{"options": [], "lastClose": null}"#,
            r#"{"options": [], "lastClose": -3.5}"#,
        ] {
            let err = parse_chain_page(&page(body)).unwrap_err();
            assert!(matches!(err, TickerError::Data(_)), "{body}: {err:?}");
        }
    }

    #[test]
    fn test_decodes_quotes() {
        let chain = parse_chain_page(&page(
            r#"{"lastClose": 200.5, "ticker": "AAPL", "options": [
                {"type": "put", "strike": 170, "bidPrice": 2.1, "askPrice": 2.3},
                {"type": "call", "strike": 210, "bidPrice": 1.4},
                {"type": "put", "strike": 165, "bidPrice": null},
                {"type": "straddle", "strike": 1}
            ]}"#,
        ))
        .unwrap();

        assert_eq!(chain.last_close, 200.5);
        assert_eq!(chain.options.len(), 4);
        assert_eq!(chain.options[0], OptionQuote::put(170.0, 2.1));
        assert_eq!(chain.options[1].option_type, OptionType::Call);
        assert_eq!(chain.options[2].bid_price, None);
        assert_eq!(chain.options[3].option_type, OptionType::Other);
    }

    #[test]
    fn test_absent_options_is_empty_list() {
        let chain = parse_chain_page(&page(r#"{"lastClose": 50}"#)).unwrap();
        assert!(chain.options.is_empty());
    }
}
