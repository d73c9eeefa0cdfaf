use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Behavioural template an API falls into.
///
/// Picks the canned handler that gets deployed and the usage examples shown
/// for it, so every caller must go through [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApiKind {
    Square,
    Auth,
    Calculator,
    Generic,
}

/// Ordered rules; the first group with a hit wins.
const RULES: &[(ApiKind, &[&str])] = &[
    (ApiKind::Square, &["square"]),
    (ApiKind::Auth, &["auth", "login"]),
    (ApiKind::Calculator, &["calculator", "math"]),
];

/// Classifies free text by keyword. Deterministic; `Generic` when nothing matches.
pub fn classify(text: &str) -> ApiKind {
    let haystack = text.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(kind, _)| *kind)
        .unwrap_or(ApiKind::Generic)
}

/// Joins several signal fragments with a space before classifying.
pub fn classify_parts(parts: &[&str]) -> ApiKind {
    classify(&parts.join(" "))
}

impl ApiKind {
    pub const ALL: [ApiKind; 4] = [
        ApiKind::Square,
        ApiKind::Auth,
        ApiKind::Calculator,
        ApiKind::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKind::Square => "square",
            ApiKind::Auth => "auth",
            ApiKind::Calculator => "calculator",
            ApiKind::Generic => "generic",
        }
    }
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown api kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for ApiKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApiKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("compute the Square of a number", ApiKind::Square)]
    #[case("user LOGIN endpoint", ApiKind::Auth)]
    #[case("OAuth token exchange", ApiKind::Auth)]
    #[case("simple calculator", ApiKind::Calculator)]
    #[case("do some math", ApiKind::Calculator)]
    #[case("list all books in the library", ApiKind::Generic)]
    #[case("", ApiKind::Generic)]
    fn classifies_fixtures(#[case] text: &str, #[case] expected: ApiKind) {
        assert_eq!(classify(text), expected);
    }

    #[rstest]
    #[case("square root behind auth", ApiKind::Square)]
    #[case("login to the calculator", ApiKind::Auth)]
    #[case("square calculator", ApiKind::Square)]
    #[case("math for authors", ApiKind::Auth)]
    fn precedence_is_fixed(#[case] text: &str, #[case] expected: ApiKind) {
        assert_eq!(classify(text), expected);
    }

    #[test]
    fn user_keyword_has_no_kind_of_its_own() {
        assert_eq!(classify("create a user profile"), ApiKind::Generic);
    }

    #[test]
    fn parts_are_joined_before_matching() {
        assert_eq!(classify_parts(&["{\"endpoint\":\"/api/x\"}", "Math"]), ApiKind::Calculator);
        // Keywords never straddle fragments
        assert_eq!(classify_parts(&["squ", "are"]), ApiKind::Generic);
    }

    #[test]
    fn kinds_round_trip_through_names() {
        for kind in ApiKind::ALL {
            assert_eq!(kind.as_str().parse::<ApiKind>(), Ok(kind));
        }
        assert_eq!("CALCULATOR".parse::<ApiKind>(), Ok(ApiKind::Calculator));
        assert!("user".parse::<ApiKind>().is_err());
    }
}
