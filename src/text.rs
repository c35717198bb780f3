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

//! UTF-8 text on top of the byte codec.

use super::alphabet::Alphabet;
use super::codec::{decode_with, Codec};
use super::decode::DecodeError;

use alloc::string::{FromUtf8Error, String};

/// An error encountered by [`Codec::decode_text`].
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeTextError {
    /// The input was not valid base-85 text.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The decoded bytes were not valid UTF-8.
    #[error("decoded data is not valid UTF-8")]
    Utf8(#[from] FromUtf8Error),
}

impl Codec {
    /// Encodes the UTF-8 bytes of `text`.
    pub fn encode_text(&self, text: impl AsRef<str>) -> String {
        self.encode(text.as_ref().as_bytes())
    }

    /// Decodes `text` and interprets the result as UTF-8.
    ///
    /// Invalid UTF-8 is an error; it is never replaced with U+FFFD.
    pub fn decode_text(
        &self,
        text: impl AsRef<str>,
    ) -> Result<String, DecodeTextError> {
        decode_text_with(text.as_ref(), self.alphabet())
    }
}

pub(crate) fn decode_text_with(
    text: &str,
    alphabet: &Alphabet,
) -> Result<String, DecodeTextError> {
    let bytes = decode_with(text, alphabet)?;
    String::from_utf8(bytes).map_err(|e| {
        log::debug!("decoded data is not UTF-8: {}", e);
        e.into()
    })
}

#[cfg(test)]
mod tests {
    use super::DecodeTextError;
    use crate::{Codec, DecodeError};

    #[test]
    fn rejects_invalid_utf8() {
        let codec = Codec::default();
        let encoded = codec.encode([0xff, 0xfe]);
        match codec.decode_text(encoded) {
            Err(DecodeTextError::Utf8(e)) => {
                assert_eq!(e.as_bytes(), [0xff, 0xfe]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn passes_decode_errors_through() {
        assert_eq!(
            Codec::default().decode_text("a"),
            Err(DecodeTextError::Decode(DecodeError::InvalidLength)),
        );
    }

    #[test]
    fn multibyte() {
        let codec = Codec::default();
        let s = "héllo wörld ✓";
        assert_eq!(codec.encode_text(s), "xV3/=y&pCu.)TP4wfx)4Lk");
        assert_eq!(codec.decode_text(codec.encode_text(s)).unwrap(), s);
    }
}
