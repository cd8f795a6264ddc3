/// Separators recognised between artist and title, in priority order.
const SEPARATORS: [&str; 3] = [" - ", " – ", " — "];

/// Split a file stem such as `"Artist - Title"` into `(artist, title)`.
///
/// The first separator (in priority order) that appears after the first
/// character and leaves a non-empty title wins. Without one the whole trimmed
/// stem is the title and the artist is empty.
pub fn parse_artist_title(stem: &str) -> (String, String) {
    let s = stem.trim();

    for sep in SEPARATORS {
        if let Some(p) = s.find(sep) {
            if p > 0 {
                let title = s[p + sep.len()..].trim();
                if !title.is_empty() {
                    return (s[..p].trim().to_string(), title.to_string());
                }
            }
        }
    }

    (String::new(), s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(s: &str) -> (String, String) {
        parse_artist_title(s)
    }

    #[test]
    fn splits_on_each_separator() {
        for name in ["Daft Punk - Veridis Quo", "Daft Punk – Veridis Quo", "Daft Punk — Veridis Quo"] {
            assert_eq!(
                parsed(name),
                ("Daft Punk".to_string(), "Veridis Quo".to_string()),
                "{name}"
            );
        }
    }

    #[test]
    fn no_separator_means_title_only() {
        assert_eq!(parsed("NoSeparator"), (String::new(), "NoSeparator".to_string()));
        assert_eq!(parsed("  padded  "), (String::new(), "padded".to_string()));
    }

    #[test]
    fn separator_at_start_is_ignored() {
        // After trimming, "- OnlyTitle" has no " - " at a position > 0.
        assert_eq!(parsed("- OnlyTitle"), (String::new(), "- OnlyTitle".to_string()));
        assert_eq!(parsed(" - OnlyTitle"), (String::new(), "- OnlyTitle".to_string()));
    }

    #[test]
    fn empty_title_falls_through_to_next_separator() {
        assert_eq!(
            parsed("Artist – Title - "),
            ("Artist".to_string(), "Title -".to_string())
        );
        assert_eq!(parsed("Artist - "), (String::new(), "Artist -".to_string()));
    }

    #[test]
    fn first_occurrence_of_separator_splits() {
        assert_eq!(
            parsed("A - B - C"),
            ("A".to_string(), "B - C".to_string())
        );
    }

    #[test]
    fn hyphen_has_priority_over_dashes() {
        assert_eq!(
            parsed("X — Y - Z"),
            ("X — Y".to_string(), "Z".to_string())
        );
    }
}
