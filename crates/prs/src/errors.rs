use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Indicates a serialization error.
    #[error("Serialization error")]
    SerializationError,

    /// Indicates that too many values were provided.
    #[error("Too many values provided: {0} exceeds limit {1}")]
    TooManyValues(usize, usize),

    /// Indicates that too few values were provided.
    #[error("Too few values provided: {0} is below limit {1}")]
    TooFewValues(usize, usize),

    /// Indicates that a plaintext value does not fit in the message space.
    #[error("Plaintext does not fit in {0} bits")]
    PlaintextOutOfRange(usize),

    /// Indicates that a randomized generation loop did not terminate within
    /// the configured number of attempts.
    #[error("Generation of {0} gave up after {1} attempts")]
    GenerationExhausted(String, usize),

    /// Indicates that values produced under different public keys were mixed.
    #[error("Incompatible public keys")]
    IncompatibleKeys,

    /// Indicates that values produced under different parameters were mixed.
    #[error("Incompatible PRS parameters")]
    IncompatibleParameters,

    /// Indicates that a server index is out of range.
    #[error("Invalid server index: {0}, must be below {1}")]
    InvalidServerIndex(usize, usize),

    /// Indicates that a cross term cannot be evaluated by any server.
    #[error("No server can evaluate the term {0:?}")]
    UncoverableTerm(Vec<usize>),

    /// Indicates that an input is invalid.
    #[error("{0}")]
    UnspecifiedInput(String),

    /// Indicates a parameter error.
    #[error("{0}")]
    ParametersError(ParametersError),
}

impl From<ParametersError> for Error {
    fn from(e: ParametersError) -> Self {
        Error::ParametersError(e)
    }
}

/// Separate enum to indicate parameters-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParametersError {
    /// Indicates that the message size is invalid.
    #[error("Invalid message size: {0}, expected at least 1 bit")]
    InvalidMessageSize(usize),

    /// Indicates that the modulus size is invalid.
    #[error("Invalid modulus size: {0}, expected an even integer of at least {1}")]
    InvalidModulusSize(usize, usize),

    /// Indicates that the encryption randomness size is invalid.
    #[error("Invalid base size: {0}, expected an integer between 1 and {1}")]
    InvalidBaseSize(usize, usize),

    /// Indicates that the number of Miller-Rabin rounds is invalid.
    #[error("Invalid number of primality rounds: {0}")]
    InvalidRounds(usize),

    /// Indicates that the retry cap is invalid.
    #[error("Invalid number of attempts: {0}")]
    InvalidAttempts(usize),

    /// Indicates that the number of servers is invalid.
    #[error("Invalid number of servers: {0}, expected at least {1}")]
    InvalidServerCount(usize, usize),

    /// Indicates that the number of inputs is invalid.
    #[error("Invalid number of inputs: {0}, expected at least {1}")]
    InvalidArity(usize, usize),

    /// Indicates that too few parameters were specified.
    #[error("{0}")]
    TooFewSpecified(String),
}
