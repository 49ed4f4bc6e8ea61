use crate::config::SlidingWindowConfig;
use crate::types::MatchCandidate;

/// Share of `target_words` found in order while walking `window` once.
///
/// The target pointer only advances on an exact word match, so a target word
/// missing from the window stalls every word after it.
fn ordered_match_score(target_words: &[&str], window: &[String]) -> f64 {
    if target_words.is_empty() || window.is_empty() {
        return 0.0;
    }
    let mut matched = 0usize;
    for word in window {
        if target_words.get(matched).is_some_and(|t| *t == word.as_str()) {
            matched += 1;
        }
    }
    matched as f64 / target_words.len() as f64
}

pub(crate) fn sliding_window_match(
    normalized_words: &[String],
    target_words: &[&str],
    config: &SlidingWindowConfig,
) -> Option<MatchCandidate> {
    let target_len = target_words.len();
    if target_len == 0 || normalized_words.is_empty() {
        return None;
    }

    let max_size_exclusive = (target_len + config.max_extra_words).min(normalized_words.len() + 1);
    let mut best: Option<MatchCandidate> = None;
    for window_size in target_len..max_size_exclusive {
        for (start, window) in normalized_words.windows(window_size).enumerate() {
            let score = ordered_match_score(target_words, window);
            if best.map_or(true, |b| score > b.score) {
                best = Some(MatchCandidate {
                    start_word_index: start,
                    end_word_index: start + window_size - 1,
                    score,
                });
            }
        }
    }

    best.filter(|b| b.score > config.min_score)
}
