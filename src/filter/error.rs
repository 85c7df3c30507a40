use thiserror::Error;

/// Errors that can occur when building filter predicates by hand
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown filter operator: '{0}'. Valid operators are: =, !=, ~, !~, +, -")]
    UnknownOperator(String),

    #[error("Invalid filter key: '{0}'. Keys may only contain letters, digits, '_' and '-'")]
    InvalidKey(String),

    #[error("Operator '{0}' requires a value")]
    MissingValue(String),

    #[error("Value '{0}' can't be written in a filter expression: a quoted value may only contain escaped quotes")]
    UnrepresentableValue(String),
}
