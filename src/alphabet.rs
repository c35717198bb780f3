/*
 * Copyright (C) 2025 taylor.fish <contact@taylor.fish>
 *
 * This file is part of base85link.
 *
 * base85link is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * base85link is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with base85link. If not, see <https://www.gnu.org/licenses/>.
 */

//! The symbol table shared by the encoder and decoder.

use super::Digit;

/// Number of symbols in every alphabet.
pub const SIZE: usize = 85;

/// The symbols of [`LINK`], in value order.
///
/// Changing this string changes the meaning of every existing encoding.
pub const LINK_SYMBOLS: &str = "0123456789\
    abcdefghijklmnopqrstuvwxyz\
    ABCDEFGHIJKLMNOPQRSTUVWXYZ\
    .-:+=~!/*?&_,()[]{}@;$#";

/// The alphabet used by [`crate::Codec::default`] and the crate-level
/// functions.
pub static LINK: Alphabet = match Alphabet::new(LINK_SYMBOLS) {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("built-in alphabet is invalid"),
};

const NO_VALUE: u8 = u8::MAX;

/// An error encountered while building an [`Alphabet`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AlphabetError {
    /// The alphabet did not contain exactly 85 symbols.
    #[error("alphabet must have exactly 85 symbols, not {0}")]
    InvalidLength(usize),
    /// A symbol appeared more than once.
    #[error("duplicate symbol in alphabet: {0:?}")]
    DuplicateSymbol(char),
    /// A byte outside the graphic ASCII range (`!` through `~`).
    #[error("alphabet symbols must be graphic ASCII, found byte {0:#04x}")]
    NonGraphicSymbol(u8),
}

/// An ordered set of 85 distinct symbols and its inverse lookup table.
///
/// The position of a symbol is its digit value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: [u8; SIZE],
    values: [u8; 128],
}

impl Alphabet {
    /// Validates `symbols` and builds an alphabet from them.
    ///
    /// This is a `const fn`, so an alphabet stored in a `const` or `static`
    /// is checked at compile time.
    pub const fn new(symbols: &str) -> Result<Self, AlphabetError> {
        let bytes = symbols.as_bytes();

        let mut i = 0;
        while i < bytes.len() {
            if !bytes[i].is_ascii_graphic() {
                return Err(AlphabetError::NonGraphicSymbol(bytes[i]));
            }
            i += 1;
        }

        // All ASCII from here on, so bytes and chars line up.
        if bytes.len() != SIZE {
            return Err(AlphabetError::InvalidLength(bytes.len()));
        }

        let mut table = [0; SIZE];
        let mut values = [NO_VALUE; 128];
        let mut i = 0;
        while i < SIZE {
            let b = bytes[i];
            if values[b as usize] != NO_VALUE {
                return Err(AlphabetError::DuplicateSymbol(b as char));
            }
            values[b as usize] = i as u8;
            table[i] = b;
            i += 1;
        }

        Ok(Self {
            symbols: table,
            values,
        })
    }

    /// The symbols in value order.
    pub fn symbols(&self) -> &[u8; SIZE] {
        &self.symbols
    }

    /// The value of `c`, or [`None`] if `c` is not in the alphabet.
    pub fn value_of(&self, c: char) -> Option<u8> {
        self.digit(c).map(u8::from)
    }

    /// The symbol for `value`, or [`None`] if `value` is not less than 85.
    pub fn symbol_for(&self, value: u8) -> Option<char> {
        Digit::new(value).map(|d| self.symbol(d))
    }

    pub(crate) fn symbol(&self, d: Digit) -> char {
        char::from(self.symbol_byte(d))
    }

    pub(crate) fn symbol_byte(&self, d: Digit) -> u8 {
        self.symbols[usize::from(d)]
    }

    pub(crate) fn digit(&self, c: char) -> Option<Digit> {
        let i = usize::try_from(u32::from(c)).ok()?;
        self.values.get(i).copied().and_then(Digit::new)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        LINK
    }
}

#[cfg(test)]
mod tests {
    use super::{Alphabet, AlphabetError, LINK, LINK_SYMBOLS};

    #[test]
    fn link_symbols_validate_at_runtime() {
        assert_eq!(Alphabet::new(LINK_SYMBOLS), Ok(LINK));
    }

    #[test]
    fn detects_short() {
        assert_eq!(
            Alphabet::new("0123456789"),
            Err(AlphabetError::InvalidLength(10)),
        );
    }

    #[test]
    fn detects_long() {
        let long = [LINK_SYMBOLS, "0"].concat();
        assert_eq!(Alphabet::new(&long), Err(AlphabetError::InvalidLength(86)));
    }

    #[test]
    fn detects_duplicate() {
        let dup = LINK_SYMBOLS.replace('#', "0");
        assert_eq!(
            Alphabet::new(&dup),
            Err(AlphabetError::DuplicateSymbol('0')),
        );
    }

    #[test]
    fn detects_space() {
        let spaced = LINK_SYMBOLS.replace('#', " ");
        assert_eq!(
            Alphabet::new(&spaced),
            Err(AlphabetError::NonGraphicSymbol(b' ')),
        );
    }

    #[test]
    fn detects_non_ascii() {
        let accented = LINK_SYMBOLS.replace('#', "é");
        assert_eq!(
            Alphabet::new(&accented),
            Err(AlphabetError::NonGraphicSymbol(0xc3)),
        );
    }

    #[test]
    fn bijection() {
        for (value, &b) in LINK.symbols().iter().enumerate() {
            let c = char::from(b);
            assert_eq!(LINK.value_of(c), Some(value as u8));
            assert_eq!(LINK.symbol_for(value as u8), Some(c));
        }
        assert_eq!(LINK.symbol_for(85), None);
        assert_eq!(LINK.value_of(' '), None);
        assert_eq!(LINK.value_of('"'), None);
        assert_eq!(LINK.value_of('é'), None);
    }

    #[test]
    fn padding_value_is_last_symbol() {
        assert_eq!(LINK.value_of('#'), Some(crate::PAD_DIGIT));
    }
}
