use thiserror::Error;

/// Argument parsing error.
///
/// Every variant carries the offending token or command name. All variants
/// are fatal to the current parse call; the library itself never prints or
/// exits, mapping each kind to a usage message is the caller's business.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErr {
    /// The command selector does not match any registered command.
    #[error("unknown command {0} found in the arguments")]
    UnknownCommand(String),

    /// A well-formed flag token that is not declared on the selected
    /// command. Also raised when a plain long name reaches an inverted flag.
    #[error("unknown flag {0} found in the arguments")]
    UnknownFlag(String),

    /// A token whose shape violates the flag grammar: wrong dash count,
    /// multi-character short flag, and the like.
    #[error("unsupported flag {0} found in the arguments")]
    UnsupportedFlag(String),
}

/// Command declaration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryErr {
    /// An argument was declared after a variadic one. The variadic argument
    /// accumulates every trailing value, so it must stay last.
    #[error("cannot declare argument {name} after variadic argument {variadic}")]
    ArgAfterVariadic { name: String, variadic: String },
}
