//! Content Restructuring Service: turns résumé prose into categorized bullet points.
//!
//! All heuristics are vocabulary-driven (`data/restructuring.json`) and
//! deterministic: the same input and vocabulary always give the same output.

pub mod experience;
pub mod handlers;
pub mod improver;
pub mod project;
pub mod resume;
pub mod skills;
pub mod vocabulary;

/// Splits prose into sentences on `.`, `!` or `?` followed by whitespace or
/// the end of the text. Dots inside tokens (`Node.js`, `2.5x`) do not split.
/// Sentences are trimmed, lose their terminators, and empties are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars.peek().map_or(true, |next| next.is_whitespace());
            if at_boundary {
                push_sentence(&mut sentences, &current);
                current.clear();
            }
        } else if c == '\n' {
            // line breaks separate bullet-style entries
            push_sentence(&mut sentences, &current);
            current.clear();
        }
    }
    push_sentence(&mut sentences, &current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let sentence = raw
        .trim()
        .trim_start_matches(['•', '-', '*'])
        .trim_end_matches(['.', '!', '?'])
        .trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}

/// Uppercases the first character.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first character unless the first word is an acronym (`API`, `AWS`).
pub fn lowercase_first(s: &str) -> String {
    let first_word = s.split_whitespace().next().unwrap_or("");
    let letters: Vec<char> = first_word.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        return s.to_string();
    }
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Removes repeats, keeping the first occurrence.
pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| !item.is_empty() && seen.insert(item.clone()))
        .collect()
}
