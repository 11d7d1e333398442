use std::fmt;

use thiserror::Error;

/// Errors that can occur while reading symbols from text.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SymbolParseError {
    #[error("an alphabet of {num_of_symbols} symbols cannot be written with single {encoding} digits")]
    UnsupportedAlphabet {
        num_of_symbols: usize,
        encoding: SymbolEncoding,
    },

    #[error("character '{character}' at position {position} is not a digit")]
    InvalidCharacter { character: char, position: usize },

    #[error("digit '{character}' at position {position} is not a {encoding} symbol of an alphabet of size {num_of_symbols}")]
    OutOfRange {
        character: char,
        position: usize,
        num_of_symbols: usize,
        encoding: SymbolEncoding,
    },
}

/// The textual representation of symbols, one decimal digit per symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SymbolEncoding {
    /// The symbol `i` is written as the digit `i`.
    #[default]
    ZeroIndexed,
    /// The symbol `i` is written as the digit `i + 1`, the customary notation
    /// for superpermutations.
    OneIndexed,
}

impl SymbolEncoding {
    /// Returns the digit value of the smallest symbol.
    fn offset(&self) -> u32 {
        match self {
            SymbolEncoding::ZeroIndexed => 0,
            SymbolEncoding::OneIndexed => 1,
        }
    }

    /// Returns the largest alphabet that can be written with single digits.
    pub fn max_alphabet_size(&self) -> usize {
        10 - self.offset() as usize
    }
}

impl fmt::Display for SymbolEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolEncoding::ZeroIndexed => write!(f, "zero-indexed"),
            SymbolEncoding::OneIndexed => write!(f, "one-indexed"),
        }
    }
}

/// Parses a string of digits into symbols of an alphabet with `num_of_symbols`
/// symbols, whitespace is ignored.
///
/// # Examples
/// ```
/// use superperm_io::SymbolEncoding;
/// use superperm_io::parse_symbols;
///
/// assert_eq!(parse_symbols("010", 2, SymbolEncoding::ZeroIndexed).unwrap(), vec![0, 1, 0]);
/// assert_eq!(parse_symbols("123 121", 3, SymbolEncoding::OneIndexed).unwrap(), vec![0, 1, 2, 0, 1, 0]);
/// assert!(parse_symbols("013", 3, SymbolEncoding::ZeroIndexed).is_err());
/// ```
pub fn parse_symbols(text: &str, num_of_symbols: usize, encoding: SymbolEncoding) -> Result<Vec<usize>, SymbolParseError> {
    if num_of_symbols > encoding.max_alphabet_size() {
        return Err(SymbolParseError::UnsupportedAlphabet {
            num_of_symbols,
            encoding,
        });
    }

    text.chars()
        .enumerate()
        .filter(|(_, character)| !character.is_whitespace())
        .map(|(position, character)| {
            let digit = character
                .to_digit(10)
                .ok_or(SymbolParseError::InvalidCharacter { character, position })?;

            match digit.checked_sub(encoding.offset()) {
                Some(symbol) if (symbol as usize) < num_of_symbols => Ok(symbol as usize),
                _ => Err(SymbolParseError::OutOfRange {
                    character,
                    position,
                    num_of_symbols,
                    encoding,
                }),
            }
        })
        .collect()
}

/// Writes the given symbols as a string of digits.
///
/// # Examples
/// ```
/// use superperm_io::SymbolEncoding;
/// use superperm_io::format_symbols;
///
/// assert_eq!(format_symbols(&[0, 1, 2], SymbolEncoding::OneIndexed), "123");
/// ```
///
/// # Panics
///
/// When a symbol does not fit in a single digit.
pub fn format_symbols(symbols: &[usize], encoding: SymbolEncoding) -> String {
    symbols
        .iter()
        .map(|&symbol| {
            char::from_digit(symbol as u32 + encoding.offset(), 10)
                .unwrap_or_else(|| panic!("Symbol {symbol} cannot be written as a single {encoding} digit"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbols_positions() {
        assert_eq!(
            parse_symbols("01x", 2, SymbolEncoding::ZeroIndexed),
            Err(SymbolParseError::InvalidCharacter {
                character: 'x',
                position: 2
            })
        );

        assert_eq!(
            parse_symbols("120", 2, SymbolEncoding::OneIndexed),
            Err(SymbolParseError::OutOfRange {
                character: '0',
                position: 2,
                num_of_symbols: 2,
                encoding: SymbolEncoding::OneIndexed
            })
        );
    }

    #[test]
    fn test_unsupported_alphabet() {
        assert!(parse_symbols("", 10, SymbolEncoding::ZeroIndexed).is_ok());
        assert!(matches!(
            parse_symbols("", 10, SymbolEncoding::OneIndexed),
            Err(SymbolParseError::UnsupportedAlphabet { .. })
        ));
    }

    #[test]
    fn test_format_parse_one_indexed() {
        let text = "123121321";
        let symbols = parse_symbols(text, 3, SymbolEncoding::OneIndexed).unwrap();

        assert_eq!(symbols, vec![0, 1, 2, 0, 1, 0, 2, 1, 0]);
        assert_eq!(format_symbols(&symbols, SymbolEncoding::OneIndexed), text);
        assert_eq!(format_symbols(&symbols, SymbolEncoding::ZeroIndexed), "012010210");
    }
}
