pub mod index;
pub mod normalize;

pub(crate) mod fuzzy;
pub(crate) mod partial;
pub(crate) mod sequence;
pub(crate) mod sliding_window;

use crate::matching::normalize::normalize;

/// A target sentence after normalization.
#[derive(Debug, Clone)]
pub struct NormalizedTarget {
    pub text: String,
}

impl NormalizedTarget {
    pub fn new(sentence: &str) -> Self {
        Self {
            text: normalize(sentence),
        }
    }

    pub fn words(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Number of whitespace-separated words in `text` before byte `offset`.
///
/// A fragment of a word cut by `offset` counts as a whole preceding word, so
/// a match that begins mid-word starts at the following word index.
pub(crate) fn word_index_at(text: &str, offset: usize) -> usize {
    text[..offset].split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_index_at_word_boundaries() {
        let text = "alpha beta gamma";
        assert_eq!(word_index_at(text, 0), 0);
        assert_eq!(word_index_at(text, 6), 1);
        assert_eq!(word_index_at(text, 11), 2);
    }

    #[test]
    fn word_index_at_counts_cut_fragment_as_preceding_word() {
        let text = "alpha beta gamma";
        // "b" of "beta" precedes the offset
        assert_eq!(word_index_at(text, 7), 2);
        // the space before "beta"
        assert_eq!(word_index_at(text, 5), 1);
        assert_eq!(word_index_at(text, text.len()), 3);
    }

    #[test]
    fn normalized_target_splits_words() {
        let target = NormalizedTarget::new("  Well, FAILURE is   temporary ");
        assert_eq!(target.text, "failure is temporary");
        assert_eq!(target.words(), ["failure", "is", "temporary"]);
        assert!(NormalizedTarget::new("um").is_empty());
    }
}
