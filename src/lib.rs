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

//! A compact Base85 encoding whose alphabet is safe to drop into links.
//!
//! Every 4 input bytes become 5 symbols from the [`LINK`] alphabet. A final
//! group of 1 to 3 bytes becomes one more symbol than it has bytes, so no
//! padding characters are ever emitted.
//!
//! ```
//! assert_eq!(base85link::encode_text("asdf"), "vrk;,");
//! assert_eq!(base85link::decode_text("xK#0@zV").unwrap(), "hello");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod digit;

pub mod alphabet;
#[cfg(feature = "alloc")]
mod codec;
pub mod decode;
pub mod encode;
mod iter;
#[cfg(feature = "alloc")]
mod text;

const BYTES_PER_CHUNK: usize = 4;
const DIGITS_PER_CHUNK: usize = 5;

/// Digit that stands in for symbols missing from a short final group.
const PAD_DIGIT: u8 = 84;

use digit::Digit;

pub use alphabet::{Alphabet, AlphabetError, LINK};
pub use decode::{DecodeBytesError, DecodeError, DecodeResult, InvalidUtf8};

pub use decode::decode_bytes;
pub use decode::decode_chars;
pub use decode::decode_str;

pub use encode::encode_to_bytes;
pub use encode::encode_to_chars;
#[cfg(feature = "alloc")]
pub use encode::encode_to_string;

#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub use codec::Codec;

#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub use text::DecodeTextError;

#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

/// Encodes `bytes` with the [`LINK`] alphabet.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    codec::encode_with(bytes.as_ref(), &LINK)
}

/// Decodes `text` with the [`LINK`] alphabet.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode(text: impl AsRef<str>) -> DecodeResult<Vec<u8>> {
    codec::decode_with(text.as_ref(), &LINK)
}

/// Encodes the UTF-8 bytes of `text` with the [`LINK`] alphabet.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_text(text: impl AsRef<str>) -> String {
    codec::encode_with(text.as_ref().as_bytes(), &LINK)
}

/// Decodes `text` with the [`LINK`] alphabet and interprets the result as
/// UTF-8.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_text(text: impl AsRef<str>) -> Result<String, DecodeTextError> {
    text::decode_text_with(text.as_ref(), &LINK)
}
