/// Longest input, in characters, accepted for conversion.
pub const MAX_INPUT_CHARS: usize = 50_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("Input text is empty")]
    EmptyInput,
    #[error("Input text is too long: {length} characters (maximum {max})")]
    TooLong { length: usize, max: usize },
}

/// Pre-flight check run before any conversion.
///
/// Length is counted in characters, not bytes, so CJK text gets the same
/// allowance as ASCII.
pub fn validate(text: &str) -> Result<(), ConvertError> {
    if text.trim().is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    let length = text.chars().count();
    if length > MAX_INPUT_CHARS {
        return Err(ConvertError::TooLong {
            length,
            max: MAX_INPUT_CHARS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t\r\n")]
    fn blank_input_is_rejected(#[case] input: &str) {
        assert_eq!(validate(input), Err(ConvertError::EmptyInput));
    }

    #[test]
    fn boundary_is_inclusive() {
        assert_eq!(validate(&"a".repeat(MAX_INPUT_CHARS)), Ok(()));
        assert_eq!(
            validate(&"a".repeat(MAX_INPUT_CHARS + 1)),
            Err(ConvertError::TooLong {
                length: MAX_INPUT_CHARS + 1,
                max: MAX_INPUT_CHARS,
            })
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 50,000 three-byte characters is 150,000 bytes but still allowed
        assert_eq!(validate(&"字".repeat(MAX_INPUT_CHARS)), Ok(()));
    }

    #[test]
    fn error_messages_are_readable() {
        let err = ConvertError::TooLong {
            length: 50_001,
            max: 50_000,
        };
        assert_eq!(
            err.to_string(),
            "Input text is too long: 50001 characters (maximum 50000)"
        );
    }
}
