use thiserror::Error;

/// The errors that can occur while constructing or querying the automata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("The alphabet must contain at least one symbol, got {0}")]
    InvalidAlphabetSize(usize),

    #[error("Invalid automaton: {0}")]
    InvalidNfa(String),

    #[error("Symbol {symbol} at position {position} is not in the alphabet of {num_of_symbols} symbols")]
    InvalidSymbol {
        symbol: usize,
        position: usize,
        num_of_symbols: usize,
    },

    #[error("Arithmetic overflow while computing the {0}")]
    Overflow(&'static str),

    #[error("Not enough memory to allocate the {0}")]
    OutOfMemory(&'static str),

    #[error("Subset construction exceeded the limit of {limit} states")]
    ResourceExceeded { limit: usize },
}
