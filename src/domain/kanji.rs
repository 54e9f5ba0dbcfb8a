//! Kanji extraction for the per-word kanji index.

/// Index entry used for words that contain no kanji at all.
pub const KANJI_PLACEHOLDER: char = '＿';

/// Returns true for CJK unified ideographs (U+4E00..=U+9FFF).
pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Extract the kanji of `word` in order, duplicates included.
///
/// A word without kanji yields `[KANJI_PLACEHOLDER]`, so every word has at
/// least one index entry.
pub fn extract_kanji(word: &str) -> Vec<char> {
    let kanji: Vec<char> = word.chars().filter(|c| is_kanji(*c)).collect();
    if kanji.is_empty() {
        vec![KANJI_PLACEHOLDER]
    } else {
        kanji
    }
}

/// Distinct kanji of `word` in first-seen order.
pub fn index_entries(word: &str) -> Vec<char> {
    let mut entries = Vec::new();
    for c in extract_kanji(word) {
        if !entries.contains(&c) {
            entries.push(c);
        }
    }
    entries
}
