//! Case inversion ("caps lock was on").

/// Swap upper and lower case of every cased character in `text`.
///
/// Uses full Unicode case mappings, so a character may expand (`ß` becomes `SS`). Capital sigma
/// lowercases to `ς` at the end of a word, as in [`str::to_lowercase`]. Characters without case
/// pass through unchanged.
pub fn invert_case(text: &str) -> String {
    // Per-char lowercase mappings line up with the whole-string one; only sigma needs context.
    let lowered = text.to_lowercase();
    let mut lowered = lowered.chars();
    let mut out = String::with_capacity(text.len());

    for ch in text.chars() {
        let lower = lowered.by_ref().take(ch.to_lowercase().count());
        if ch.is_uppercase() {
            out.extend(lower);
            continue;
        }
        lower.for_each(drop);
        if ch.is_lowercase() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_ascii() {
        assert_eq!(invert_case("hELLO wORLD"), "Hello World");
        assert_eq!(invert_case("123 !?"), "123 !?");
    }

    #[test]
    fn test_invert_unicode() {
        assert_eq!(invert_case("пРИВЕТ Ёжик"), "Привет ёЖИК");
        assert_eq!(invert_case("straße"), "STRASSE");
        assert_eq!(invert_case("😀"), "😀");
    }

    #[test]
    fn test_final_sigma() {
        assert_eq!(invert_case("ΣΑΣ"), "σας");
        assert_eq!(invert_case("ΟΔΟΣ ΣΑΣ"), "οδος σας");
        assert_eq!(invert_case("Σ"), "σ");
        assert_eq!(invert_case("aΣ"), "Aς");
        assert_eq!(invert_case("ςσ"), "ΣΣ");
    }

    #[test]
    fn test_empty() {
        assert_eq!(invert_case(""), "");
    }
}
