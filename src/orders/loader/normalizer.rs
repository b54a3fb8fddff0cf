pub(crate) fn normalize_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| normalize_text(&raw))
        .filter(|cleaned| !cleaned.is_empty())
}
