//! Yes/no token extraction from free-form model output

/// Single-word judgment returned to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintVerdict {
    Yes,
    No,
}

impl HintVerdict {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("no yes/no token in model output: {0:?}")]
pub struct HintExtractionError(pub String);

/// Strip everything but ASCII letters, digits and spaces, lowercase, and
/// take the first standalone `yes` or `no`.
///
/// Line breaks and tabs are stripped rather than treated as separators, so
/// `"yes\nno"` collapses into the single token `yesno`.
pub fn extract_hint(text: &str) -> Result<HintVerdict, HintExtractionError> {
    let normalized: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .to_lowercase();

    normalized
        .split_whitespace()
        .find_map(|word| match word {
            "yes" => Some(HintVerdict::Yes),
            "no" => Some(HintVerdict::No),
            _ => None,
        })
        .ok_or_else(|| HintExtractionError(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_answers() {
        assert_eq!(extract_hint("yes").unwrap(), HintVerdict::Yes);
        assert_eq!(extract_hint("No").unwrap(), HintVerdict::No);
    }

    #[test]
    fn test_punctuated_answer() {
        assert_eq!(extract_hint("Yes, it is.").unwrap(), HintVerdict::Yes);
        assert_eq!(extract_hint("**NO!**").unwrap(), HintVerdict::No);
        assert_eq!(extract_hint("\"Yes\"").unwrap(), HintVerdict::Yes);
    }

    #[test]
    fn test_first_token_wins() {
        assert_eq!(
            extract_hint("The answer is no, not yes.").unwrap(),
            HintVerdict::No
        );
    }

    #[test]
    fn test_substrings_do_not_count() {
        assert!(extract_hint("I'm not sure about that.").is_err());
        assert!(extract_hint("Nothing comes to mind, yesterday maybe").is_err());
        assert!(extract_hint("").is_err());
    }

    #[test]
    fn test_apostrophes_are_stripped_before_matching() {
        // "no's" becomes "nos" and is not a standalone token
        assert!(extract_hint("no's").is_err());
    }

    #[test]
    fn test_only_spaces_separate_tokens() {
        assert!(extract_hint("yes\nno").is_err());
        assert!(extract_hint("yes\tplease").is_err());
        assert_eq!(extract_hint("Answer:\n yes").unwrap(), HintVerdict::Yes);
    }
}
