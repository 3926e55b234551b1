#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("iteration count must not be negative, got {0}")]
    InvalidIterationCount(i64),
    #[error("no permitted production for {value}")]
    UnrepresentableConfiguration { value: String },
    #[error("derivation of {value} depends on itself")]
    CyclicDerivation { value: String },
}

pub type EncodeResult<T> = Result<T, EncodeError>;
