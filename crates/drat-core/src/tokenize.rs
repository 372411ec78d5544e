//! Word tokenization.
//!
//! ASCII punctuation becomes whitespace, the line is split on whitespace,
//! pieces are lowercased, and only purely alphabetic pieces survive.
//! Numbers, mixed alphanumerics and stray symbols are dropped silently.

/// Tokenize a whole text, line by line.
pub fn tokenize(text: &str) -> Vec<String> {
    tokenize_lines(text.lines())
}

/// Tokenize a sequence of lines into one flat, ordered token list.
pub fn tokenize_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens = Vec::new();
    for line in lines {
        push_line_tokens(line.as_ref(), &mut tokens);
    }
    tokens
}

fn push_line_tokens(line: &str, tokens: &mut Vec<String>) {
    let spaced: String = line
        .chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect();

    tokens.extend(
        spaced
            .split_whitespace()
            .map(str::to_lowercase)
            .filter(|word| word.chars().all(char::is_alphabetic)),
    );
}
