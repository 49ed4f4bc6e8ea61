use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Whole-word rewrites. Spelled-out numbers become digits, contractions are
/// expanded.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("thirty-one", "31"),
    ("thirty-two", "32"),
    ("twenty", "20"),
    ("thirty", "30"),
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    ("i'm", "i am"),
    ("don't", "do not"),
    ("won't", "will not"),
    ("can't", "cannot"),
    ("you're", "you are"),
    ("we're", "we are"),
    ("they're", "they are"),
    ("it's", "it is"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("here's", "here is"),
    ("what's", "what is"),
    ("where's", "where is"),
    ("who's", "who is"),
    ("how's", "how is"),
    ("let's", "let us"),
];

/// Hesitations and discourse markers dropped before comparison.
const FILLERS: &[&str] = &[
    "uh",
    "um",
    "ah",
    "er",
    "hmm",
    "you know",
    "i mean",
    "like",
    "so",
    "well",
    "actually",
    "basically",
    "literally",
];

static SUBSTITUTION_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| SUBSTITUTIONS.iter().copied().collect());

static SUBSTITUTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    whole_word_alternation(SUBSTITUTIONS.iter().map(|&(from, _)| from), "")
});

// A filler swallows punctuation glued to its end ("like," -> "").
static FILLER_RE: LazyLock<Regex> =
    LazyLock::new(|| whole_word_alternation(FILLERS.iter().copied(), "[.,!?]*"));

static DISALLOWED_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.,!?]").expect("static pattern is valid"));

/// Regex alternation is leftmost-first, so longer phrases are listed first
/// to win over their own prefixes ("thirty-one" over "thirty").
fn whole_word_alternation<'a>(phrases: impl Iterator<Item = &'a str>, suffix: &str) -> Regex {
    let mut phrases: Vec<&str> = phrases.collect();
    phrases.sort_by_key(|p| std::cmp::Reverse(p.len()));
    let body = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{body})\b{suffix}")).expect("static pattern is valid")
}

/// Canonical form used by every matcher: lowercase, digits for small
/// numbers, expanded contractions, no fillers, only `. , ! ?` punctuation,
/// single spaces.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase().replace(['\u{2018}', '\u{2019}'], "'");

    let substituted = SUBSTITUTION_RE.replace_all(&lowered, |caps: &regex::Captures<'_>| {
        let phrase = &caps[0];
        let replacement = SUBSTITUTION_MAP.get(phrase).copied().unwrap_or(phrase);
        format!(" {replacement} ")
    });
    let without_fillers = FILLER_RE.replace_all(&substituted, " ");
    let cleaned = DISALLOWED_CHARS_RE.replace_all(&without_fillers, "");

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
