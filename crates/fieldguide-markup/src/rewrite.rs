//! Semantic link rewriting over markdown prose.
//!
//! Server-authored markdown embeds semantic references two ways: as the
//! destination of a markdown link whose display text was left
//! percent-encoded, and as bare `scheme://token` autolinks dropped straight
//! into prose, often right after the same term spelled out in plain text.
//! Two passes normalize both into standard markdown links. Replacements are
//! collected as non-overlapping spans and applied in a single left-to-right
//! reconstruction, so no pass ever re-scans its own output mid-flight.
//!
//! The whole transformation is pure and never fails: anything ambiguous or
//! malformed is left closer to its original form rather than guessed at.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::link::decode_term;

// A recognized reference inside markdown link syntax. Only the display
// text is captured; pass 1 rewrites it in place.
static LINKED_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]*)\]\((?:landscape|cuisine|dish|place)://[^()\s]+\)").unwrap()
});

// A bare reference. The token alphabet is the percent-encoded term set;
// trailing sentence punctuation stays outside the match.
static BARE_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:landscape|cuisine|dish|place)://[\w%-]+(?:\.[\w%-]+)*").unwrap()
});

/// Rewrite semantic references in a markdown string into well-formed links.
/// Idempotent on well-formed input; unrecognized schemes pass through
/// untouched.
pub fn rewrite(markdown: &str) -> String {
    normalize_bare_refs(&decode_link_text(markdown))
}

/// Pass 1: where a recognized link's display text is still the
/// percent-encoded token, replace it with its decoded form.
fn decode_link_text(markdown: &str) -> String {
    let mut spans: Vec<(Range<usize>, String)> = Vec::new();
    for caps in LINKED_REF_RE.captures_iter(markdown) {
        if let Some(text) = caps.get(1) {
            let decoded = decode_term(text.as_str());
            if decoded != text.as_str() {
                spans.push((text.range(), decoded));
            }
        }
    }
    apply_spans(markdown, spans)
}

/// Pass 2: wrap bare references as markdown links, collapsing a duplicated
/// preceding mention of the same term into the link when one is detected.
fn normalize_bare_refs(markdown: &str) -> String {
    let mut spans: Vec<(Range<usize>, String)> = Vec::new();
    // End of the previous replacement; mention detection never reaches past it.
    let mut consumed = 0usize;

    for m in BARE_REF_RE.find_iter(markdown) {
        // Already a link destination.
        if markdown[..m.start()].ends_with('(') {
            continue;
        }

        let reference = m.as_str();
        let term = match reference.split_once("://") {
            Some((_, encoded)) => decode_term(encoded),
            None => continue,
        };
        let link = format!("[{}]({})", term, reference);

        let prefix = &markdown[consumed..m.start()];
        match trailing_mention(prefix, &term) {
            Some(mention) => {
                let wrapped = match mention.emphasis {
                    Some(marks) => format!("{}{}{}", marks, link, marks),
                    None => link,
                };
                spans.push((consumed + mention.phrase_start..m.end(), wrapped));
            }
            None => {
                // Keep the link syntax from fusing with adjacent words.
                let lead = if prefix.chars().next_back().is_some_and(|c| !c.is_whitespace()) {
                    " "
                } else {
                    ""
                };
                let trail = if markdown[m.end()..]
                    .chars()
                    .next()
                    .is_some_and(|c| !c.is_whitespace())
                {
                    " "
                } else {
                    ""
                };
                spans.push((m.start()..m.end(), format!("{}{}{}", lead, link, trail)));
            }
        }
        consumed = m.end();
    }
    apply_spans(markdown, spans)
}

/// A duplicate mention of a reference's term found at the end of the text
/// preceding it.
struct Mention {
    /// Byte offset of the phrase (including any emphasis markers) within the
    /// prefix it was found in.
    phrase_start: usize,
    /// Emphasis markers wrapping the phrase, to re-wrap the built link.
    emphasis: Option<&'static str>,
}

/// Look for a trailing phrase in `prefix` that duplicates `term`, either
/// emphasis-wrapped (`**p**`, `*p*`, `_p_`) or plain. Only spaces and tabs
/// may separate the phrase from the reference.
fn trailing_mention(prefix: &str, term: &str) -> Option<Mention> {
    let trimmed = prefix.trim_end();
    if prefix[trimmed.len()..].contains('\n') {
        return None;
    }

    // Emphasis-wrapped phrase, glued or space-separated.
    for marks in ["**", "*", "_"] {
        if let Some(inner_end) = trimmed.len().checked_sub(marks.len()) {
            if &trimmed[inner_end..] == marks {
                if let Some(open) = trimmed[..inner_end].rfind(marks) {
                    let phrase = &trimmed[open + marks.len()..inner_end];
                    if is_plain_phrase(phrase) && fold(phrase) == fold(term) {
                        return Some(Mention {
                            phrase_start: open,
                            emphasis: Some(marks),
                        });
                    }
                }
            }
        }
    }

    // Plain trailing phrase: compare as many trailing words as the term has.
    let word_count = term.split_whitespace().count();
    let start = trailing_words_start(trimmed, word_count)?;
    let phrase = &trimmed[start..];
    if is_plain_phrase(phrase) && fold(phrase) == fold(term) {
        return Some(Mention {
            phrase_start: start,
            emphasis: None,
        });
    }
    None
}

/// A phrase is plain when it carries no markdown link or emphasis
/// delimiters and stays on one line.
fn is_plain_phrase(phrase: &str) -> bool {
    !phrase.is_empty() && !phrase.contains(['[', ']', '(', ')', '*', '_', '\n'])
}

/// Byte offset where the last `count` whitespace-separated words of `s`
/// begin, or `None` if there are fewer.
fn trailing_words_start(s: &str, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let mut starts = Vec::new();
    let mut in_word = false;
    for (i, c) in s.char_indices() {
        if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            starts.push(i);
            in_word = true;
        }
    }
    starts.len().checked_sub(count).map(|i| starts[i])
}

/// Case- and diacritic-insensitive comparison key: NFD with combining marks
/// stripped, lowercased, inner whitespace collapsed.
fn fold(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            word.nfd()
                .filter(|c| !is_combining_mark(*c))
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Apply pre-sorted, non-overlapping replacement spans in one pass.
fn apply_spans(text: &str, spans: Vec<(Range<usize>, String)>) -> String {
    if spans.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + spans.len() * 8);
    let mut last_end = 0;
    for (range, replacement) in spans {
        out.push_str(&text[last_end..range.start]);
        out.push_str(&replacement);
        last_end = range.end;
    }
    out.push_str(&text[last_end..]);
    out
}
