#[cfg(test)]
mod tests {
    use crate::tally::tally;
    use crate::validation::*;

    fn opts(options: &[&str]) -> Vec<String> {
        options.iter().map(|s| s.to_string()).collect()
    }

    fn percentages(counts: &[i64]) -> Vec<f64> {
        tally(counts).into_iter().map(|r| r.percentage).collect()
    }

    #[test]
    fn test_question_bounds() {
        assert_eq!(validate_question("  Best fruit?  ").unwrap(), "Best fruit?");
        assert_eq!(validate_question("abcde").unwrap(), "abcde");
        assert!(matches!(validate_question("abcd"), Err(ValidationError::QuestionTooShort)));
        assert!(matches!(validate_question("   ab   "), Err(ValidationError::QuestionTooShort)));

        let max = "q".repeat(MAX_QUESTION_LENGTH);
        assert!(validate_question(&max).is_ok());
        let over = "q".repeat(MAX_QUESTION_LENGTH + 1);
        assert!(matches!(validate_question(&over), Err(ValidationError::QuestionTooLong)));
    }

    #[test]
    fn test_question_length_counts_characters() {
        let question = "é".repeat(MAX_QUESTION_LENGTH);
        assert!(question.len() > MAX_QUESTION_LENGTH);
        assert!(validate_question(&question).is_ok());
    }

    #[test]
    fn test_options_trimmed_and_filtered() {
        let result = normalize_options(&opts(&["  Red ", "ab", "", "Blue", "  x  "])).unwrap();
        assert_eq!(result, opts(&["Red", "Blue"]));
    }

    #[test]
    fn test_duplicate_options_preserved() {
        let result = normalize_options(&opts(&["Apple", "Banana", "Apple"])).unwrap();
        assert_eq!(result, opts(&["Apple", "Banana", "Apple"]));
    }

    #[test]
    fn test_too_few_options_after_filtering() {
        assert!(matches!(normalize_options(&opts(&["Red", "no"])), Err(ValidationError::TooFewOptions)));
        assert!(matches!(normalize_options(&[]), Err(ValidationError::TooFewOptions)));
    }

    #[test]
    fn test_too_many_options_supplied() {
        let eleven: Vec<String> = (0..11).map(|i| format!("Option {i}")).collect();
        assert!(matches!(normalize_options(&eleven), Err(ValidationError::TooManyOptions)));

        let ten: Vec<String> = (0..10).map(|i| format!("Option {i}")).collect();
        assert_eq!(normalize_options(&ten).unwrap().len(), 10);
    }

    #[test]
    fn test_option_too_long() {
        let long = "o".repeat(MAX_OPTION_LENGTH + 1);
        assert!(matches!(
            normalize_options(&[long, "Blue".into()]),
            Err(ValidationError::OptionTooLong)
        ));
        let exact = "o".repeat(MAX_OPTION_LENGTH);
        assert!(normalize_options(&[exact, "Blue".into()]).is_ok());
    }

    #[test]
    fn test_validate_poll_input() {
        let input = validate_poll_input(" Favourite colour? ", &opts(&["Red ", " Green"])).unwrap();
        assert_eq!(input.question, "Favourite colour?");
        assert_eq!(input.options, opts(&["Red", "Green"]));

        assert!(matches!(
            validate_poll_input("Hi", &opts(&["Red", "Green"])),
            Err(ValidationError::QuestionTooShort)
        ));
    }

    #[test]
    fn test_option_index_bounds() {
        assert_eq!(validate_option_index(0, 3).unwrap(), 0);
        assert_eq!(validate_option_index(2, 3).unwrap(), 2);
        assert!(matches!(validate_option_index(3, 3), Err(ValidationError::InvalidOptionIndex(3))));
        assert!(matches!(validate_option_index(-1, 3), Err(ValidationError::InvalidOptionIndex(-1))));
    }

    #[test]
    fn test_tally_scenario() {
        let results = tally(&[2, 1, 0]);
        assert_eq!(results.len(), 3);
        assert_eq!(results.iter().map(|r| r.option_index).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(results.iter().map(|r| r.votes).collect::<Vec<_>>(), vec![2, 1, 0]);
        assert_eq!(
            results.iter().map(|r| r.percentage_label()).collect::<Vec<_>>(),
            vec!["66.7", "33.3", "0.0"]
        );
    }

    #[test]
    fn test_tally_no_votes() {
        assert!(percentages(&[0, 0, 0, 0]).iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_tally_percentages_sum_to_hundred() {
        for counts in [vec![1, 1, 1], vec![7, 0, 3, 9], vec![1, 2, 3, 4, 5, 6, 7], vec![0, 5]] {
            let sum: f64 = percentages(&counts).iter().sum();
            assert!((sum - 100.0).abs() < 1e-9, "sum was {sum} for {counts:?}");
        }
    }
}
