use derive_more::{AsRef, Display};

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub const MAX_LEN: usize = 64;

    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.len();

        if len > Self::MAX_LEN {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }

    /// Appends a suffix, truncating the base name so the result stays within
    /// the length limit.
    #[must_use]
    pub fn with_suffix(&self, suffix: &str) -> Name {
        let limit = Self::MAX_LEN.saturating_sub(suffix.len() + 1);
        let base = if self.0.len() > limit {
            let mut end = limit;
            while !self.0.is_char_boundary(end) {
                end -= 1;
            }
            self.0[..end].trim_end()
        } else {
            &self.0
        };
        Name(format!("{base} {suffix}"))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be {max} characters or fewer ({0} > {max})", max = Name::MAX_LEN)]
    TooLong(usize),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Upper Body A", Ok(Name("Upper Body A".to_string())))]
    #[case("  Legs  ", Ok(Name("Legs".to_string())))]
    #[case("   ", Err(NameError::Empty))]
    #[case(
        "BBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB",
        Err(NameError::TooLong(65))
    )]
    fn test_name_new(#[case] name: &str, #[case] expected: Result<Name, NameError>) {
        assert_eq!(Name::new(name), expected);
    }

    #[rstest]
    #[case("Push Day", "(Copy)", "Push Day (Copy)")]
    #[case(
        "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
        "(Copy)",
        "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA (Copy)"
    )]
    fn test_name_with_suffix(#[case] name: &str, #[case] suffix: &str, #[case] expected: &str) {
        let result = Name::new(name).unwrap().with_suffix(suffix);
        assert_eq!(result.as_ref(), expected);
        assert!(result.as_ref().len() <= Name::MAX_LEN);
    }
}
