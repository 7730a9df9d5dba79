/// Header text as the analysis sees it: invisible BOM/zero-width characters
/// removed and surrounding whitespace trimmed. Case is preserved.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_invisible_characters_and_padding() {
        assert_eq!(normalize_header("\u{feff}  Impact \u{200b}"), "Impact");
        assert_eq!(normalize_header("Cost of delay"), "Cost of delay");
        assert_eq!(normalize_header("   "), "");
    }
}
