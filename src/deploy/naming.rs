/// Slug used whenever a name normalizes to nothing usable.
pub const FALLBACK_PROJECT_NAME: &str = "simple-api";

const MAX_PROJECT_NAME_LEN: usize = 50;

/// Maps a free-form name onto Vercel's project naming rules (`^[a-z0-9-]+$`, at most 50 chars).
///
/// Idempotent: feeding the output back in returns it unchanged.
pub fn normalize_project_name(name: &str) -> String {
    let lowered = name.to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
            in_whitespace = false;
        }
        // Dropped characters do not split a whitespace run
    }

    let trimmed = slug.trim_matches('-');
    // Only ASCII survives the filter, so byte slicing is char-safe
    let truncated = &trimmed[..trimmed.len().min(MAX_PROJECT_NAME_LEN)];
    let result = truncated.trim_end_matches('-');

    if is_valid_project_name(result) {
        result.to_string()
    } else {
        FALLBACK_PROJECT_NAME.to_string()
    }
}

fn is_valid_project_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("My Cool API!!", "my-cool-api")]
    #[case("###", "simple-api")]
    #[case("", "simple-api")]
    #[case("   ", "simple-api")]
    #[case("--already-fine--", "already-fine")]
    #[case("tabs\tand\n\nnewlines", "tabs-and-newlines")]
    #[case("Ünïcode Café", "ncode-caf")]
    #[case("a - b", "a---b")]
    #[case("a ! b", "a-b")]
    #[case("Price $ API", "price-api")]
    #[case("x!y", "xy")]
    #[case("sq", "sq")]
    fn normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_project_name(input), expected);
    }

    #[test]
    fn truncates_to_fifty_and_drops_dangling_hyphen() {
        let long = format!("{} tail", "a".repeat(49));
        let out = normalize_project_name(&long);
        assert_eq!(out, "a".repeat(49));

        let out = normalize_project_name(&"x".repeat(80));
        assert_eq!(out.len(), 50);
    }

    #[rstest]
    #[case("My Cool API!!")]
    #[case("###")]
    #[case("  leading and trailing  ")]
    #[case("Ünïcode Café")]
    #[case("Price $ API")]
    fn is_idempotent(#[case] input: &str) {
        let once = normalize_project_name(input);
        assert_eq!(normalize_project_name(&once), once);
    }
}
