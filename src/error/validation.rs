use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Number of commands must be greater than zero.")]
    EmptyCommandList,
    #[error("Unknown command '{name}'. Supported commands: {supported}.")]
    UnknownCommand { name: String, supported: String },
    #[error("Command '{name}' is already registered.")]
    DuplicateCommand { name: String },
    #[error("Iteration plan must contain at least one iteration count.")]
    EmptyIterationPlan,
    #[error("Iteration plan '{value}' contains an empty entry.")]
    EmptyIterationCount { value: String },
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
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
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Missing commands (set --commands or provide in config).")]
    MissingCommands,
    #[error("Missing iteration plan (set --iterations or provide in config).")]
    MissingIterations,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
