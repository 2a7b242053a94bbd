/// Normalize an identity string for comparison: trim surrounding whitespace
/// and lowercase. No diacritic folding; the two source systems agree on
/// character repertoire, only case and padding differ.
pub fn normalize_identity(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Maximal run of decimal digits at the end of `s`, if any (`\d+$`).
pub fn trailing_digits(s: &str) -> Option<&str> {
    let start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    Some(&s[start..])
}
