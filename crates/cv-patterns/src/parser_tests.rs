// Structural parser tests; the converter math has its own tests in cv-core.

#[cfg(test)]
mod tests {
    use crate::error::ParseError;
    use crate::parser::parse_pattern;
    use cv_core::{note_to_cv, ConvertError};
    use proptest::prelude::*;

    const UNITS: u32 = 32;

    fn assert_parses(input: &str) {
        match parse_pattern(input, UNITS) {
            Ok(_) => (),
            Err(e) => panic!("Failed to parse '{}': {}", input, e),
        }
    }

    fn assert_fails(input: &str) {
        if parse_pattern(input, UNITS).is_ok() {
            panic!("Expected parse to fail for '{}'", input)
        }
    }

    #[test]
    fn test_basic_patterns() {
        assert_parses("C3/4");
        assert_parses("C3/2 C4/2");
        assert_parses("c#3/8. db4/8 -/4");
        assert_parses("(C2)C3/4 D3/4");
    }

    #[test]
    fn test_two_notes() {
        let pattern = parse_pattern("C3/2 C4/2", UNITS).unwrap();
        assert_eq!(pattern.notes.len(), 2);
        assert_eq!(pattern.notes[0].duration, 16);
        assert_eq!(pattern.notes[1].duration, 16);
        assert_eq!(pattern.notes[0].name, "C3");
        assert!(pattern.acciaccatura.is_none());
    }

    #[test]
    fn test_same_note_legato_merges() {
        let pattern = parse_pattern("C3/2~C3/4", UNITS).unwrap();
        assert_eq!(pattern.notes.len(), 1);
        assert_eq!(pattern.notes[0].duration, 24);
        assert!(!pattern.notes[0].slide);
    }

    #[test]
    fn test_merge_keeps_first_name() {
        // Db3 is the same pitch as C#3, so the tie merges; the first
        // spelling is the one retained.
        let pattern = parse_pattern("C#3/2~ Db3/2", UNITS).unwrap();
        assert_eq!(pattern.notes.len(), 1);
        assert_eq!(pattern.notes[0].name, "C#3");
        assert_eq!(pattern.notes[0].duration, 32);
    }

    #[test]
    fn test_slide_on_pitch_change() {
        let pattern = parse_pattern("C3/2~ C4/2 D4/4", UNITS).unwrap();
        assert_eq!(pattern.notes.len(), 3);
        assert!(pattern.notes[0].slide);
        assert!(!pattern.notes[1].slide);
        assert!(!pattern.notes[2].slide);
    }

    #[test]
    fn test_chained_ties() {
        // C3 merges twice, then slides into D3.
        let pattern = parse_pattern("C3/4~C3/4~C3/4~ D3/4", UNITS).unwrap();
        assert_eq!(pattern.notes.len(), 2);
        assert_eq!(pattern.notes[0].duration, 24);
        assert!(pattern.notes[0].slide);
        assert_eq!(pattern.notes[1].name, "D3");
    }

    #[test]
    fn test_rests_participate_in_legato() {
        // Tied rests merge like any equal pitch.
        let pattern = parse_pattern("-/2~-/4", UNITS).unwrap();
        assert_eq!(pattern.notes.len(), 1);
        assert_eq!(pattern.notes[0].duration, 24);
    }

    #[test]
    fn test_grace_note_at_start() {
        let pattern = parse_pattern("(C2)C3/4", UNITS).unwrap();
        let expected = note_to_cv("C2").unwrap();
        assert!((pattern.acciaccatura.unwrap() - expected).abs() < 1e-9);
        assert_eq!(pattern.notes.len(), 1);
    }

    #[test]
    fn test_grace_note_whitespace_inside() {
        let pattern = parse_pattern("(C 2)C3/4", UNITS).unwrap();
        let expected = note_to_cv("C2").unwrap();
        assert!((pattern.acciaccatura.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_grace_note_not_at_start_is_malformed() {
        let err = parse_pattern("C3/4 (C2)D3/4", UNITS).unwrap_err();
        assert!(matches!(err, ParseError::MalformedToken { .. }));
    }

    #[test]
    fn test_unclosed_grace() {
        let err = parse_pattern("(C2 C3/4", UNITS).unwrap_err();
        assert!(matches!(err, ParseError::UnclosedGrace { .. }));
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(parse_pattern("", UNITS), Err(ParseError::EmptyPattern));
        assert_eq!(parse_pattern("   ", UNITS), Err(ParseError::EmptyPattern));
        // A grace note alone is not a pattern.
        assert_eq!(
            parse_pattern("(C2)", UNITS),
            Err(ParseError::EmptyPattern)
        );
    }

    #[test]
    fn test_malformed_tokens() {
        assert_fails("C3");
        assert_fails("C3/4/8");
        assert_fails("~");
        assert_fails("C3/4 ~ C4/4");
    }

    #[test]
    fn test_converter_errors_carry_token() {
        let err = parse_pattern("C3/4 H3/4", UNITS).unwrap_err();
        match err {
            ParseError::Convert { token, source, .. } => {
                assert_eq!(token, "H3/4");
                assert!(matches!(source, ConvertError::InvalidNoteName(_)));
            }
            other => panic!("Expected Convert error, got {:?}", other),
        }
        let err = parse_pattern("C3/3", UNITS).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Convert {
                source: ConvertError::NonIntegerDuration(_),
                ..
            }
        ));
    }

    #[test]
    fn test_reparse_is_identical() {
        let source = "(G1)C3/2~ C4/4. D4/8 -/4~-/4";
        let first = parse_pattern(source, UNITS).unwrap();
        let second = parse_pattern(source, UNITS).unwrap();
        assert_eq!(first, second);
    }

    proptest! {
        // Any sequence of plain quarter notes parses to one note per token
        // with no slides.
        #[test]
        fn plain_sequences_keep_length(letters in proptest::collection::vec("[A-G]", 1..12)) {
            let source = letters
                .iter()
                .map(|l| format!("{}3/4", l))
                .collect::<Vec<_>>()
                .join(" ");
            let pattern = parse_pattern(&source, UNITS).unwrap();
            prop_assert_eq!(pattern.notes.len(), letters.len());
            prop_assert!(pattern.notes.iter().all(|n| !n.slide && n.duration == 8));
        }
    }
}
