use rapidfuzz::distance::indel;

use crate::config::FuzzyConfig;
use crate::types::MatchCandidate;

/// Indel similarity as a percentage; 100 means identical strings.
pub(crate) fn similarity_ratio(left: &str, right: &str) -> f64 {
    indel::normalized_similarity(left.chars(), right.chars()) * 100.0
}

/// Whole-number percentage used for every comparison, rounded half to even.
fn whole_percent(ratio: f64) -> f64 {
    ratio.round_ties_even()
}

/// Compares every window of the configured sizes against the target text and
/// keeps the most similar one.
///
/// Windows are ranked and thresholded on [`whole_percent`], so a later window
/// only wins when its rounded score is strictly higher. The candidate keeps
/// the exact ratio.
pub(crate) fn fuzzy_match(
    normalized_words: &[String],
    target: &str,
    config: &FuzzyConfig,
) -> Option<MatchCandidate> {
    let target_len = target.split_whitespace().count();
    if target_len == 0 || normalized_words.is_empty() {
        return None;
    }

    let mut best: Option<(f64, MatchCandidate)> = None;
    let mut window_text = String::new();
    for &offset in &config.window_offsets {
        let Some(window_size) = target_len.checked_add_signed(offset).filter(|&s| s > 0) else {
            continue;
        };
        if window_size > normalized_words.len() {
            continue;
        }

        for (start, window) in normalized_words.windows(window_size).enumerate() {
            // words that normalized away (fillers) add no separator
            window_text.clear();
            for word in window.iter().filter(|w| !w.is_empty()) {
                if !window_text.is_empty() {
                    window_text.push(' ');
                }
                window_text.push_str(word);
            }

            let score = similarity_ratio(&window_text, target);
            let rounded = whole_percent(score);
            if best.map_or(true, |(best_rounded, _)| rounded > best_rounded) {
                best = Some((
                    rounded,
                    MatchCandidate {
                        start_word_index: start,
                        end_word_index: start + window_size - 1,
                        score,
                    },
                ));
            }
        }
    }

    best.filter(|&(rounded, _)| rounded > config.min_score)
        .map(|(_, candidate)| candidate)
}
