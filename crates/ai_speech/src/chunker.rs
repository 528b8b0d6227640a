//! Provider-safe text chunking
//!
//! TTS providers enforce a per-request character limit. Long replies are split
//! into ordered chunks at natural boundaries so that the synthesized audio can
//! be concatenated back into continuous speech: the cut falls on the last
//! sentence-terminating period at or before the limit, then the last
//! whitespace, then a hard cut at the limit itself.

/// Safe per-request character limit for TTS input
pub const MAX_CHUNK_CHARS: usize = 800;

/// Split text into chunks of at most [`MAX_CHUNK_CHARS`] characters
#[must_use]
pub fn split_text(text: &str) -> Vec<String> {
    split_text_with_limit(text, MAX_CHUNK_CHARS)
}

/// Split text into chunks of at most `limit` characters
///
/// The limit counts characters, not bytes, so multi-byte scripts get the
/// same chunk capacity as ASCII. Chunks are trimmed and emitted in original
/// left-to-right order; the concatenation of the chunks preserves every
/// non-whitespace character of the input.
#[must_use]
pub fn split_text_with_limit(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = text.trim();

    // Byte offset just past the first `limit` characters, while more remain.
    while let Some(window_end) = rest.char_indices().nth(limit).map(|(i, _)| i) {
        if window_end == 0 {
            // Zero limit; take one character whole so the loop advances.
            let first_len = rest.chars().next().map_or(rest.len(), char::len_utf8);
            chunks.push(rest[..first_len].to_string());
            rest = rest[first_len..].trim_start();
            continue;
        }

        let window = &rest[..window_end];
        let cut = window
            .rfind('.')
            .map(|i| i + 1)
            .or_else(|| {
                window
                    .rfind(char::is_whitespace)
                    .map(|i| i + window[i..].chars().next().map_or(1, char::len_utf8))
            })
            .unwrap_or(window_end);

        let chunk = rest[..cut].trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
        rest = rest[cut..].trim_start();
    }

    if !rest.is_empty() {
        chunks.push(rest.to_string());
    }

    chunks
}
