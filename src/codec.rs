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

use super::alphabet::{Alphabet, AlphabetError, LINK};
use super::decode::{decode_str, decode_to_vec, DecodeResult};
use super::encode::encode_to_string;

use alloc::{string::String, vec::Vec};

/// Encodes and decodes with one fixed [`Alphabet`].
///
/// A `Codec` holds no state besides its alphabet, so it can be copied
/// freely and shared between threads.
///
/// ```
/// use base85link::Codec;
///
/// let codec = Codec::default();
/// assert_eq!(codec.encode(b"asdf"), "vrk;,");
/// assert_eq!(codec.decode("vrk;,").unwrap(), b"asdf");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Codec {
    alphabet: Alphabet,
}

impl Codec {
    /// Creates a codec that uses `alphabet`.
    pub const fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
        }
    }

    /// Validates `symbols` as an alphabet and creates a codec that uses it.
    ///
    /// Every encoding this crate produces uses [`LINK`]; this exists to
    /// check a candidate symbol set, and text encoded with any other
    /// alphabet cannot be read by [`Codec::default`] or the crate-level
    /// functions.
    ///
    /// ```
    /// use base85link::{AlphabetError, Codec};
    ///
    /// assert_eq!(
    ///     Codec::with_symbols("0123456789"),
    ///     Err(AlphabetError::InvalidLength(10)),
    /// );
    /// ```
    pub fn with_symbols(symbols: &str) -> Result<Self, AlphabetError> {
        Alphabet::new(symbols).map(Self::new).map_err(|e| {
            log::debug!("rejected alphabet: {}", e);
            e
        })
    }

    /// The alphabet this codec uses.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Encodes `bytes`. Never fails; empty input gives an empty string.
    pub fn encode(&self, bytes: impl AsRef<[u8]>) -> String {
        encode_with(bytes.as_ref(), &self.alphabet)
    }

    /// Decodes `text`.
    ///
    /// Fails if `text` contains a symbol outside the alphabet, or if it
    /// would leave a single symbol in a group of its own.
    pub fn decode(&self, text: impl AsRef<str>) -> DecodeResult<Vec<u8>> {
        decode_with(text.as_ref(), &self.alphabet)
    }
}

pub(crate) fn encode_with(bytes: &[u8], alphabet: &Alphabet) -> String {
    log::trace!("encoding {} bytes", bytes.len());
    encode_to_string(bytes.iter().copied(), alphabet)
}

pub(crate) fn decode_with(
    text: &str,
    alphabet: &Alphabet,
) -> DecodeResult<Vec<u8>> {
    decode_to_vec(decode_str(text, alphabet)).map_err(|e| {
        log::debug!("rejected {}-byte base85 input: {}", text.len(), e);
        e
    })
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(LINK)
    }
}

#[cfg(test)]
mod tests {
    use super::Codec;
    use crate::alphabet::{AlphabetError, LINK_SYMBOLS};
    use crate::DecodeError;

    #[test]
    fn with_symbols() {
        assert_eq!(Codec::with_symbols(LINK_SYMBOLS), Ok(Codec::default()));
        assert_eq!(
            Codec::with_symbols("abc"),
            Err(AlphabetError::InvalidLength(3)),
        );
    }

    #[test]
    fn reversed_alphabet() {
        let reversed: String = LINK_SYMBOLS.chars().rev().collect();
        let codec = Codec::with_symbols(&reversed).unwrap();
        let encoded = codec.encode(b"asdf");
        assert_ne!(encoded, Codec::default().encode(b"asdf"));
        assert_eq!(codec.decode(&encoded).unwrap(), b"asdf");
    }

    #[test]
    fn no_partial_output() {
        assert_eq!(
            Codec::default().decode("vrk;,vrk;,v"),
            Err(DecodeError::InvalidLength),
        );
    }

    #[test]
    fn shared_between_threads() {
        let codec = Codec::default();
        let handles: Vec<_> = (0..4_u8)
            .map(|i| {
                std::thread::spawn(move || {
                    let data = vec![i; usize::from(i) * 3];
                    codec.decode(codec.encode(&data)).unwrap() == data
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
