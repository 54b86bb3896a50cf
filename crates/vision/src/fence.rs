use thiserror::Error;

const FENCE: &str = "```";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenceError {
    #[error("model reply has an unterminated code fence")]
    Unterminated,

    #[error("model reply has {0} fenced blocks, expected at most one")]
    MultipleBlocks(usize),
}

/// Returns the JSON text carried by a model reply.
///
/// A reply holds either bare JSON or exactly one fenced block, optionally
/// tagged with a language such as `json`. Text outside the block is ignored.
pub fn extract_payload(reply: &str) -> Result<&str, FenceError> {
    let parts: Vec<&str> = reply.split(FENCE).collect();

    match parts.len() {
        1 => Ok(reply.trim()),
        3 => Ok(strip_info_string(parts[1])),
        n if n % 2 == 0 => Err(FenceError::Unterminated),
        n => Err(FenceError::MultipleBlocks((n - 1) / 2)),
    }
}

fn strip_info_string(block: &str) -> &str {
    if !block.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return block.trim();
    }

    let tag_len = block
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')))
        .unwrap_or(block.len());
    block[tag_len..].trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INNER: &str = r#"{"pair": "EUR/USD", "type": "SELL", "confidence": 81}"#;

    #[test]
    fn test_all_wrappings_yield_the_same_payload() {
        let bare = format!("  {INNER}\n");
        let tagged = format!("Here is my analysis:\n```json\n{INNER}\n```\nGood luck!");
        let plain = format!("```\n{INNER}\n```");

        assert_eq!(extract_payload(&bare).unwrap(), INNER);
        assert_eq!(extract_payload(&tagged).unwrap(), INNER);
        assert_eq!(extract_payload(&plain).unwrap(), INNER);
    }

    #[test]
    fn test_tag_variants_are_stripped() {
        assert_eq!(extract_payload(&format!("```JSON\n{INNER}```")).unwrap(), INNER);
        assert_eq!(extract_payload(&format!("```json{INNER}```")).unwrap(), INNER);
        assert_eq!(extract_payload(&format!("```{INNER}```")).unwrap(), INNER);
    }

    #[test]
    fn test_unterminated_fence() {
        let reply = format!("```json\n{INNER}");
        assert_eq!(extract_payload(&reply), Err(FenceError::Unterminated));
    }

    #[test]
    fn test_more_than_one_block() {
        let reply = format!("```json\n{INNER}\n```\nor maybe\n```json\n{INNER}\n```");
        assert_eq!(extract_payload(&reply), Err(FenceError::MultipleBlocks(2)));
    }

    #[test]
    fn test_empty_block() {
        assert_eq!(extract_payload("```json\n```").unwrap(), "");
    }
}
