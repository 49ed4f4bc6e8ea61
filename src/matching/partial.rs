use crate::config::PartialConfig;
use crate::matching::word_index_at;
use crate::types::MatchCandidate;

/// Last-resort lookup: find any run of a few consecutive target words
/// verbatim in the normalized transcript and extend a fixed number of words
/// past it.
///
/// Larger chunks are tried first; within one size, chunks are tried left to
/// right through the target and the first hit is returned.
pub(crate) fn partial_match(
    full_text: &str,
    target_words: &[&str],
    word_count: usize,
    config: &PartialConfig,
) -> Option<MatchCandidate> {
    if word_count == 0 {
        return None;
    }

    for &chunk_size in &config.chunk_sizes {
        if chunk_size == 0 || chunk_size > target_words.len() {
            continue;
        }
        for chunk_words in target_words.windows(chunk_size) {
            let chunk = chunk_words.join(" ");
            let Some(offset) = full_text.find(&chunk) else {
                continue;
            };
            let start_word_index = word_index_at(full_text, offset);
            if start_word_index >= word_count {
                continue;
            }
            let end_word_index =
                (start_word_index + chunk_size + config.trailing_words).min(word_count - 1);
            tracing::debug!(
                chunk = chunk.as_str(),
                start_word_index,
                end_word_index,
                "partial: chunk found in transcript"
            );
            return Some(MatchCandidate {
                start_word_index,
                end_word_index,
                score: chunk_size as f64,
            });
        }
    }

    None
}
