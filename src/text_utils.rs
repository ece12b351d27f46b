use tracing::trace;

/// Return the base64 payload of an image string.
///
/// Data URLs such as `data:image/png;base64,QUJD` are cut after the first
/// comma. Strings without a comma are returned unchanged.
pub fn strip_data_url_prefix(image: &str) -> &str {
    match image.split_once(',') {
        Some((header, payload)) => {
            trace!(header, "Stripped data URL header");
            payload
        }
        None => image,
    }
}

/// Remove a surrounding markdown code fence from a model reply.
///
/// The opening fence line (with its optional language tag) and a trailing
/// fence are dropped, then the result is trimmed. Text that does not start
/// with a fence is only trimmed.
pub fn strip_code_fence(content: &str) -> &str {
    let content = content.trim();
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    let body = match rest.split_once('\n') {
        Some((_lang, body)) => body,
        None => rest,
    };
    let body = body.strip_suffix("```").unwrap_or(body);
    trace!("Stripped code fence");
    body.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_header_is_removed() {
        assert_eq!(strip_data_url_prefix("data:image/png;base64,QUJD"), "QUJD");
    }

    #[test]
    fn only_first_comma_splits() {
        assert_eq!(strip_data_url_prefix("a,b,c"), "b,c");
    }

    #[test]
    fn bare_payload_is_unchanged() {
        assert_eq!(strip_data_url_prefix("QUJD"), "QUJD");
    }

    #[test]
    fn fence_with_language_tag() {
        let raw = "```json\n{\"a\":1}\n```";
        assert_eq!(strip_code_fence(raw), "{\"a\":1}");
    }

    #[test]
    fn fence_without_closing_marker() {
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n"), "{\"a\":1}");
    }

    #[test]
    fn single_line_fence() {
        assert_eq!(strip_code_fence("```abc```"), "abc");
        assert_eq!(strip_code_fence("```"), "");
    }

    #[test]
    fn unfenced_text_is_trimmed() {
        assert_eq!(strip_code_fence("  plain text \n"), "plain text");
    }
}
