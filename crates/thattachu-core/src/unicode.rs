//! Tamil code-point helpers.

/// Tamil Unicode block (U+0B80 to U+0BFF).
pub fn is_tamil(c: char) -> bool {
    ('\u{0B80}'..='\u{0BFF}').contains(&c)
}

/// Combining signs and marks that attach to a base letter.
pub fn is_tamil_sign(c: char) -> bool {
    ('\u{0B82}'..='\u{0BCD}').contains(&c) && !is_tamil_letter_start(c)
}

fn is_tamil_letter_start(c: char) -> bool {
    // Independent vowels and consonants.
    ('\u{0B85}'..='\u{0BB9}').contains(&c)
}

/// Count visually atomic Tamil letters: a base code point plus an
/// optional combining sign counts as one.
pub fn count_tamil_letters(text: &str) -> usize {
    let mut count = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if !is_tamil(c) {
            continue;
        }
        count += 1;
        if chars.peek().copied().is_some_and(is_tamil_sign) {
            chars.next();
        }
    }
    count
}
