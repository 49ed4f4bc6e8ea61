use crate::config::SequenceConfig;
use crate::matching::word_index_at;
use crate::types::MatchCandidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CommonBlock {
    /// Char offset into the haystack.
    haystack_start: usize,
    len: usize,
}

/// Longest common contiguous run of chars. Equal-length runs resolve to the
/// earliest one in `haystack`, then in `needle`.
fn longest_common_block(haystack: &[char], needle: &[char]) -> CommonBlock {
    let mut best = CommonBlock {
        haystack_start: 0,
        len: 0,
    };
    // curr[j + 1] is the length of the common run ending at haystack[i], needle[j]
    let mut prev = vec![0usize; needle.len() + 1];
    let mut curr = vec![0usize; needle.len() + 1];
    for (i, &h) in haystack.iter().enumerate() {
        for (j, &n) in needle.iter().enumerate() {
            curr[j + 1] = if h == n { prev[j] + 1 } else { 0 };
            if curr[j + 1] > best.len {
                let len = curr[j + 1];
                best = CommonBlock {
                    haystack_start: i + 1 - len,
                    len,
                };
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    best
}

/// Aligns the normalized target against the normalized transcript text and
/// maps the longest shared block back onto word indices by counting words.
pub(crate) fn sequence_match(
    full_text: &str,
    target: &str,
    word_count: usize,
    config: &SequenceConfig,
) -> Option<MatchCandidate> {
    if full_text.is_empty() || target.is_empty() || word_count == 0 {
        return None;
    }

    let haystack: Vec<char> = full_text.chars().collect();
    let needle: Vec<char> = target.chars().collect();
    let block = longest_common_block(&haystack, &needle);
    if block.len == 0 || (block.len as f64) < needle.len() as f64 * config.min_coverage {
        tracing::debug!(
            matched_chars = block.len,
            target_chars = needle.len(),
            "sequence: common block too short"
        );
        return None;
    }

    let byte_offset = |char_offset: usize| {
        full_text
            .char_indices()
            .nth(char_offset)
            .map_or(full_text.len(), |(b, _)| b)
    };
    let block_start = byte_offset(block.haystack_start);
    let block_end = byte_offset(block.haystack_start + block.len);

    let start_word_index = word_index_at(full_text, block_start);
    if start_word_index >= word_count {
        return None;
    }
    let words_in_block = full_text[block_start..block_end]
        .split_whitespace()
        .count()
        .max(1);
    let end_word_index = (start_word_index + words_in_block - 1).min(word_count - 1);

    Some(MatchCandidate {
        start_word_index,
        end_word_index,
        score: block.len as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSCRIPT: &str = "i learned that failure is temporary but regret is forever";

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn longest_block_prefers_earliest_occurrence() {
        let block = longest_common_block(&chars("abcXabc"), &chars("abc"));
        assert_eq!(
            block,
            CommonBlock {
                haystack_start: 0,
                len: 3
            }
        );
    }

    #[test]
    fn longest_block_of_disjoint_strings_is_empty() {
        assert_eq!(longest_common_block(&chars("abc"), &chars("xyz")).len, 0);
    }

    #[test]
    fn maps_block_back_to_word_indices() {
        let found = sequence_match(
            TRANSCRIPT,
            "failure is temporary 1 2 3 4 5 6 7",
            10,
            &SequenceConfig::default(),
        )
        .expect("block covers enough of the target");
        assert_eq!((found.start_word_index, found.end_word_index), (3, 5));
        assert_eq!(found.score, 21.0);
    }

    #[test]
    fn block_starting_mid_word_counts_the_fragment_as_a_preceding_word() {
        // the shared block begins with the final "t" of "that"
        let found = sequence_match(
            TRANSCRIPT,
            "xqzv wplk jjrt failure is temporary but regret is forever",
            10,
            &SequenceConfig::default(),
        )
        .expect("match");
        assert_eq!((found.start_word_index, found.end_word_index), (3, 9));

        // "is temporary fix" begins inside "this"
        let found = sequence_match(
            "we learned this temporary fix",
            "is temporary fix",
            5,
            &SequenceConfig::default(),
        )
        .expect("match");
        assert_eq!((found.start_word_index, found.end_word_index), (3, 4));
    }

    #[test]
    fn short_block_is_rejected() {
        assert!(sequence_match(
            TRANSCRIPT,
            "failure is temporary, 1 2 3 4 5 6 7",
            10,
            &SequenceConfig::default(),
        )
        .is_none());
    }

    #[test]
    fn end_index_is_clamped() {
        // normalized text has more words than the index it was built from
        let found = sequence_match("a b c d", "c d", 3, &SequenceConfig::default())
            .expect("match");
        assert_eq!((found.start_word_index, found.end_word_index), (2, 2));
    }

    #[test]
    fn start_past_last_word_is_rejected() {
        assert!(sequence_match("a b c d", "d", 3, &SequenceConfig::default()).is_none());
    }

    #[test]
    fn empty_inputs_return_none() {
        let config = SequenceConfig::default();
        assert!(sequence_match("", "abc", 1, &config).is_none());
        assert!(sequence_match("abc", "", 1, &config).is_none());
        assert!(sequence_match("abc", "abc", 0, &config).is_none());
    }
}
