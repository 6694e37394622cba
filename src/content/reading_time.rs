//! Reading-time estimation

/// Reading speed used when the site config does not override it
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

/// Count words in a post body.
///
/// A run of alphanumeric characters (apostrophes and inner hyphens included)
/// is one word; every CJK ideograph, kana or hangul syllable counts as a word
/// on its own.
pub fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if is_cjk(c) {
            count += 1;
            in_word = false;
        } else if c.is_alphanumeric() || (in_word && (c == '\'' || c == '-' || c == '’')) {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else {
            in_word = false;
        }
    }

    count
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'   // hiragana, katakana
        | '\u{3400}'..='\u{4DBF}' // CJK extension A
        | '\u{4E00}'..='\u{9FFF}' // CJK unified ideographs
        | '\u{AC00}'..='\u{D7AF}' // hangul syllables
        | '\u{F900}'..='\u{FAFF}' // CJK compatibility ideographs
    )
}

/// Whole minutes needed to read `words`, rounded up
pub fn minutes_for(words: usize, words_per_minute: usize) -> usize {
    let wpm = words_per_minute.max(1);
    words.div_ceil(wpm)
}

/// Display string such as `"2 min read"`
pub fn reading_time(text: &str, words_per_minute: usize) -> String {
    let minutes = minutes_for(count_words(text), words_per_minute);
    format!("{} min read", minutes)
}
