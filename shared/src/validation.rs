pub const MIN_QUESTION_LENGTH: usize = 5;
pub const MAX_QUESTION_LENGTH: usize = 280;
pub const MIN_OPTION_LENGTH: usize = 3;
pub const MAX_OPTION_LENGTH: usize = 100;
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Question must be at least {MIN_QUESTION_LENGTH} characters long")]
    QuestionTooShort,
    #[error("Question must be at most {MAX_QUESTION_LENGTH} characters long")]
    QuestionTooLong,
    #[error("Maximum {MAX_OPTIONS} options allowed")]
    TooManyOptions,
    #[error("At least {MIN_OPTIONS} valid options are required (minimum {MIN_OPTION_LENGTH} characters each)")]
    TooFewOptions,
    #[error("Option text exceeds maximum length of {MAX_OPTION_LENGTH}")]
    OptionTooLong,
    #[error("Invalid option selected: {0}")]
    InvalidOptionIndex(i32),
}

/// Question and options after trimming and filtering, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollInput {
    pub question: String,
    pub options: Vec<String>,
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub fn validate_question(question: &str) -> Result<String, ValidationError> {
    let question = question.trim();
    match char_len(question) {
        n if n < MIN_QUESTION_LENGTH => Err(ValidationError::QuestionTooShort),
        n if n > MAX_QUESTION_LENGTH => Err(ValidationError::QuestionTooLong),
        _ => Ok(question.to_string()),
    }
}

/// Trims every option and drops the ones shorter than [`MIN_OPTION_LENGTH`].
/// Order and repeated entries are kept as supplied.
pub fn normalize_options(options: &[String]) -> Result<Vec<String>, ValidationError> {
    if options.len() > MAX_OPTIONS { return Err(ValidationError::TooManyOptions); }

    let kept: Vec<String> = options.iter()
        .map(|opt| opt.trim())
        .filter(|opt| char_len(opt) >= MIN_OPTION_LENGTH)
        .map(str::to_string)
        .collect();

    if kept.iter().any(|opt| char_len(opt) > MAX_OPTION_LENGTH) { return Err(ValidationError::OptionTooLong); }
    if kept.len() < MIN_OPTIONS { return Err(ValidationError::TooFewOptions); }

    Ok(kept)
}

pub fn validate_poll_input(question: &str, options: &[String]) -> Result<PollInput, ValidationError> {
    Ok(PollInput {
        question: validate_question(question)?,
        options: normalize_options(options)?,
    })
}

pub fn validate_option_index(option_index: i32, option_count: usize) -> Result<usize, ValidationError> {
    usize::try_from(option_index)
        .ok()
        .filter(|&idx| idx < option_count)
        .ok_or(ValidationError::InvalidOptionIndex(option_index))
}
