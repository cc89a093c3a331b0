/// First `max` characters of `s`, never splitting a character.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Like `truncate_chars`, but appends "..." when something was cut.
pub fn ellipsize(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", truncate_chars(s, max))
    } else {
        s.to_string()
    }
}

/// "papa-johns" -> "Papa Johns". Hyphens and underscores become spaces.
pub fn title_case(s: &str) -> String {
    s.split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
