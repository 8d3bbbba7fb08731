//! Display-name and route-slug formatting

/// Extension of the documents the compiler picks up
pub const DOCUMENT_EXTENSION: &str = "md";

/// Convert a raw file or directory name into a display name.
///
/// One trailing `.md` suffix is removed, the rest is split on `-`, `_` and
/// whitespace, and every word is capitalized and rejoined with single spaces.
pub fn format_name(raw: &str) -> String {
    strip_document_extension(raw)
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove exactly one trailing document extension, if present
pub fn strip_document_extension(raw: &str) -> &str {
    let suffix_len = DOCUMENT_EXTENSION.len() + 1;
    if raw.len() > suffix_len {
        let split = raw.len() - suffix_len;
        if raw.is_char_boundary(split) {
            let (stem, suffix) = raw.split_at(split);
            if suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(DOCUMENT_EXTENSION) {
                return stem;
            }
        }
    }
    raw
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Route segment for a display name: lowercase, spaces become hyphens
pub fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Whether a route segment addresses the given display name
pub fn segment_matches(segment: &str, name: &str) -> bool {
    segment.to_lowercase().replace('-', " ") == name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_name() {
        assert_eq!(format_name("tactical-rules"), "Tactical Rules");
        assert_eq!(format_name("STAR_ships.md"), "Star Ships");
        assert_eq!(format_name("Дракон.md"), "Дракон");
        assert_eq!(format_name("миры-игры"), "Миры Игры");
        assert_eq!(format_name("a--b"), "A B");
        assert_eq!(format_name(""), "");
        assert_eq!(format_name(".md"), ".md");
    }

    #[test]
    fn test_strips_exactly_one_extension() {
        assert_eq!(strip_document_extension("notes.md.md"), "notes.md");
        assert_eq!(strip_document_extension("notes.MD"), "notes");
        assert_eq!(strip_document_extension("notes.markdown"), "notes.markdown");
        assert_eq!(strip_document_extension("заметки.md"), "заметки");
    }

    #[test]
    fn test_slug_and_segment() {
        assert_eq!(slug("Tactical Rules"), "tactical-rules");
        assert!(segment_matches("tactical-rules", "Tactical Rules"));
        assert!(segment_matches("БЕСТИАРИЙ", "Бестиарий"));
        assert!(!segment_matches("rules", "Tactical Rules"));
    }

    proptest! {
        #[test]
        fn format_name_is_idempotent(raw in "[a-zA-Zа-яА-ЯёЁ0-9 _-]{0,24}(\\.md)?") {
            let once = format_name(&raw);
            prop_assert_eq!(format_name(&once), once);
        }

        #[test]
        fn slug_round_trips_through_segment_match(raw in "[a-zA-Zа-яА-Я0-9 _-]{1,24}") {
            let name = format_name(&raw);
            prop_assert!(segment_matches(&slug(&name), &name));
        }
    }
}
