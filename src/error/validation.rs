use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing input (set --subject or --input, or provide them in config).")]
    MissingInput,
    #[error("Subject name must not be empty.")]
    EmptySubject,
    #[error("Invalid pixel size '{value}'. Expected a positive number.")]
    InvalidPixels { value: String },
    #[error("Invalid pixel size '{value}': {source}")]
    InvalidPixelsNumber {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("Invalid boolean '{value}'. Expected true/false.")]
    InvalidBoolean { value: String },
    #[error("Invalid base URL '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
