//! International Morse Code table and text conversion.
//!
//! Codes are written over the alphabet `{'.', '-', ' '}`: `.` is a dit,
//! `-` a dah, and the space character maps to a single `' '` that marks a
//! word boundary once letter codes are joined.

use skedaddle_common::error::{SkedaddleError, SkedaddleResult};

/// Every supported character paired with its code.
pub const CODE_TABLE: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('\'', ".----."),
    ('!', "-.-.--"),
    ('/', "-..-."),
    ('(', "-.--."),
    (')', "-.--.-"),
    ('&', ".-..."),
    (':', "---..."),
    (';', "-.-.-."),
    ('=', "-...-"),
    ('+', ".-.-."),
    ('-', "-....-"),
    ('_', "..--.-"),
    ('"', ".-..-."),
    ('$', "...-..-"),
    ('@', ".--.-."),
    (' ', " "),
];

/// Look up the code for an (already uppercased) character.
pub fn code_for(c: char) -> Option<&'static str> {
    CODE_TABLE
        .iter()
        .find(|(key, _)| *key == c)
        .map(|(_, code)| *code)
}

/// Characters the table can encode, in table order.
pub fn supported_characters() -> impl Iterator<Item = char> {
    CODE_TABLE.iter().map(|(c, _)| *c)
}

/// Convert text to a morse string.
///
/// Characters missing from the table are dropped without leaving a gap.
pub fn text_to_morse(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .filter_map(code_for)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode a morse string back into text.
///
/// Accepts `.`/`·` for dits and `-`/`─` for dahs. A single space separates
/// letters; a run of two or more separates words.
pub fn decode_morse(morse: &str) -> SkedaddleResult<String> {
    let mut words: Vec<String> = Vec::new();
    let mut word = String::new();
    let mut group = String::new();
    let mut space_run = 0usize;

    for c in morse.chars() {
        match c {
            '.' | '·' | '-' | '─' => {
                if space_run >= 2 && !word.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
                space_run = 0;
                group.push(if c == '·' || c == '.' { '.' } else { '-' });
            }
            c if c.is_whitespace() => {
                if !group.is_empty() {
                    word.push(letter_for(&group)?);
                    group.clear();
                }
                space_run += 1;
            }
            other => {
                return Err(SkedaddleError::invalid_parameter(format!(
                    "unexpected character {other:?} in morse input"
                )));
            }
        }
    }

    if !group.is_empty() {
        word.push(letter_for(&group)?);
    }
    if !word.is_empty() {
        words.push(word);
    }

    Ok(words.join(" "))
}

fn letter_for(group: &str) -> SkedaddleResult<char> {
    CODE_TABLE
        .iter()
        .find(|(c, code)| *c != ' ' && *code == group)
        .map(|(c, _)| *c)
        .ok_or_else(|| {
            SkedaddleError::invalid_parameter(format!("unknown morse letter group '{group}'"))
        })
}
