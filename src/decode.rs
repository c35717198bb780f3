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

//! Functions and types for decoding base-85 data.

use super::alphabet::Alphabet;
use super::iter::{BaseIterator, ErrAdapter, Flatten, InspectBaseIterator};
use super::{BYTES_PER_CHUNK, DIGITS_PER_CHUNK, PAD_DIGIT};

use core::array;
use core::fmt::{self, Debug, Display, Formatter};
use core::iter::{FusedIterator, Take};
use core::str::Chars;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// An error encountered while decoding a [`str`] or sequence of [`char`]s.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The input ended with a lone symbol, which cannot hold a whole byte.
    #[error("bad input length: a single trailing symbol cannot be decoded")]
    InvalidLength,
    /// Encountered a character that is not in the alphabet.
    #[error("bad character {symbol:?} at index {index}")]
    InvalidSymbol {
        /// The offending character.
        symbol: char,
        /// Position of the character in the input, counted in chars.
        index: usize,
    },
}

use DecodeError as Error;

/// Alias of <code>[Result]\<T, [DecodeError]></code>.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Error information for [`DecodeBytesError::InvalidUtf8`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct InvalidUtf8 {
    bytes: [u8; 4],
    len: u8,
}

impl InvalidUtf8 {
    /// The bytes that were invalid UTF-8.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }
}

impl Debug for InvalidUtf8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InvalidUtf8").field(&self.bytes()).finish()
    }
}

impl Display for InvalidUtf8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "invalid UTF-8: {:?}", self.bytes())
    }
}

impl core::error::Error for InvalidUtf8 {}

/// An error encountered while decoding a sequence of bytes.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeBytesError {
    /// The provided bytes were not valid UTF-8.
    #[error(transparent)]
    InvalidUtf8(InvalidUtf8),
    /// A different decoding error occurred.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Alias of <code>[Result]\<T, [DecodeBytesError]></code>.
pub type DecodeBytesResult<T> = Result<T, DecodeBytesError>;

/// The most items a decoder can yield for `len` remaining chars, counting a
/// trailing error.
fn max_decoded_items(len: usize) -> Option<usize> {
    let full = (len / DIGITS_PER_CHUNK).checked_mul(BYTES_PER_CHUNK)?;
    match len % DIGITS_PER_CHUNK {
        0 => Some(full),
        1 => full.checked_add(1),
        rem => full.checked_add(rem - 1),
    }
}

/// Splits chars into groups of up to 5 and turns each group into the bytes
/// it stands for.
struct CharsToUnflatBytes<'a, I> {
    iter: I,
    alphabet: &'a Alphabet,
    index: usize,
    done: bool,
}

impl<'a, I> CharsToUnflatBytes<'a, I> {
    pub fn new(iter: I, alphabet: &'a Alphabet) -> Self {
        Self {
            iter,
            alphabet,
            index: 0,
            done: false,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl<I> InspectBaseIterator for CharsToUnflatBytes<'_, I> {
    type Iter = I;

    fn base_iterator(&self) -> &Self::Iter {
        &self.iter
    }
}

impl<I> CharsToUnflatBytes<'_, I>
where
    I: Iterator<Item = char>,
{
    fn next_group(&mut self) -> Option<DecodeResult<([u8; 4], usize)>> {
        let mut digits = [const_digit!(PAD_DIGIT); DIGITS_PER_CHUNK];
        let mut len = 0;
        let mut bad = None;
        for c in self.iter.by_ref().take(DIGITS_PER_CHUNK) {
            match self.alphabet.digit(c) {
                Some(d) => digits[len] = d,
                None => {
                    bad.get_or_insert(Error::InvalidSymbol {
                        symbol: c,
                        index: self.index,
                    });
                }
            }
            len += 1;
            self.index += 1;
        }

        // A lone symbol is rejected before looking at what it is.
        match (len, bad) {
            (0, _) => None,
            (1, _) => Some(Err(Error::InvalidLength)),
            (_, Some(e)) => Some(Err(e)),
            _ => {
                // Up to 85^5 - 1, which needs more than 32 bits; only the
                // low 32 bits become bytes.
                let value = digits.iter().fold(0_u64, |sum, &d| {
                    sum * 85 + u64::from(u8::from(d))
                });
                let [_, _, _, _, a, b, c, d] = value.to_be_bytes();
                Some(Ok(([a, b, c, d], len - 1)))
            }
        }
    }
}

type CharsToUnflatBytesItem = Take<array::IntoIter<DecodeResult<u8>, 4>>;

impl<I> Iterator for CharsToUnflatBytes<'_, I>
where
    I: Iterator<Item = char>,
{
    type Item = CharsToUnflatBytesItem;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let group = self.next_group();
        if !matches!(group, Some(Ok(_))) {
            self.done = true;
        }
        group.map(|res| {
            res.map_or_else(
                |e| {
                    let arr = [Err(e), Ok(0), Ok(0), Ok(0)];
                    IntoIterator::into_iter(arr).take(1)
                },
                |(arr, len)| IntoIterator::into_iter(arr.map(Ok)).take(len),
            )
        })
    }
}

impl<I: Iterator<Item = char>> FusedIterator for CharsToUnflatBytes<'_, I> {}

/// Iterator returned by [`decode_chars`].
///
/// Yields the decoded bytes in order. If the input is invalid, the error is
/// yielded after the bytes of every group before it, and then iteration
/// stops.
pub struct CharDecoder<'a, I>(
    Flatten<CharsToUnflatBytes<'a, I>, CharsToUnflatBytesItem>,
);

impl<'a, I> CharDecoder<'a, I> {
    pub(crate) fn new(iter: I, alphabet: &'a Alphabet) -> Self {
        Self(Flatten::new(CharsToUnflatBytes::new(iter, alphabet)))
    }
}

impl<I> InspectBaseIterator for CharDecoder<'_, I> {
    type Iter = I;

    fn base_iterator(&self) -> &Self::Iter {
        self.0.base_iterator()
    }
}

impl<I> Iterator for CharDecoder<'_, I>
where
    I: Iterator<Item = char>,
{
    type Item = DecodeResult<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn fold<B, F>(self, init: B, f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        self.0.fold(init, f)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (pending_lower, pending_upper) = self.0.sub_size_hint();
        if self.0.get_ref().is_done() {
            return (pending_lower, pending_upper);
        }
        let (lower, upper) = self.base_iterator().size_hint();
        (
            // Any remaining input yields at least one item, even if it is
            // only an error.
            pending_lower.saturating_add(usize::from(lower > 0)),
            upper
                .and_then(max_decoded_items)
                .zip(pending_upper)
                .and_then(|(n, pending)| n.checked_add(pending)),
        )
    }
}

impl<I: Iterator<Item = char>> FusedIterator for CharDecoder<'_, I> {}

struct Utf8ToChars<I>(I);

impl<I> Utf8ToChars<I> {
    pub fn new(iter: I) -> Self {
        Self(iter)
    }
}

impl<I: InspectBaseIterator> InspectBaseIterator for Utf8ToChars<I> {
    type Iter = I::Iter;

    fn base_iterator(&self) -> &Self::Iter {
        self.0.base_iterator()
    }
}

impl<I> Iterator for Utf8ToChars<I>
where
    I: Iterator<Item = u8>,
{
    type Item = Result<char, InvalidUtf8>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut bytes = [self.0.next()?, 0, 0, 0];
        let mut len = 1;
        loop {
            match core::str::from_utf8(&bytes[..len]) {
                Ok(s) => break s.chars().next().map(Ok),
                Err(e) => {
                    if e.error_len().is_none() && len < bytes.len() {
                        if let Some(b) = self.0.next() {
                            bytes[len] = b;
                            len += 1;
                            continue;
                        }
                    }
                }
            }
            break Some(Err(InvalidUtf8 {
                bytes,
                len: len as u8,
            }));
        }
    }
}

type Utf8Chars<I> = ErrAdapter<Utf8ToChars<BaseIterator<I>>, InvalidUtf8>;

/// Iterator returned by [`decode_bytes`].
pub struct BytesDecoder<'a, I> {
    inner: CharDecoder<'a, Utf8Chars<I>>,
    done: bool,
}

impl<'a, I> BytesDecoder<'a, I> {
    pub(crate) fn new(iter: I, alphabet: &'a Alphabet) -> Self {
        Self {
            inner: CharDecoder::new(
                ErrAdapter::new(Utf8ToChars::new(BaseIterator(iter))),
                alphabet,
            ),
            done: false,
        }
    }
}

impl<I> Iterator for BytesDecoder<'_, I>
where
    I: Iterator<Item = u8>,
{
    type Item = DecodeBytesResult<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.inner.next();
        // Invalid UTF-8 cuts the char stream short, so it must be checked
        // before trusting any bytes from the group it interrupted.
        if let Some(e) = self.inner.base_iterator().take_err() {
            self.done = true;
            return Some(Err(DecodeBytesError::InvalidUtf8(e)));
        }
        match item {
            Some(Ok(b)) => Some(Ok(b)),
            Some(Err(e)) => {
                self.done = true;
                Some(Err(e.into()))
            }
            None => {
                self.done = true;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let (pending_lower, pending_upper) = self.inner.0.sub_size_hint();
        let bytes: &I = self.inner.base_iterator().base_iterator();
        let (_, upper) = bytes.size_hint();
        (
            pending_lower,
            upper
                // Every char takes at least one byte; one more item covers
                // a UTF-8 error.
                .and_then(max_decoded_items)
                .zip(pending_upper)
                .and_then(|(n, pending)| n.checked_add(pending))
                .and_then(|n| n.checked_add(1)),
        )
    }
}

impl<I: Iterator<Item = u8>> FusedIterator for BytesDecoder<'_, I> {}

/// Iterator returned by [`decode_str`].
pub struct StrDecoder<'a>(CharDecoder<'a, Chars<'a>>);

impl<'a> StrDecoder<'a> {
    pub(crate) fn new(s: &'a str, alphabet: &'a Alphabet) -> Self {
        Self(CharDecoder::new(s.chars(), alphabet))
    }
}

impl Iterator for StrDecoder<'_> {
    type Item = DecodeResult<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn fold<B, F>(self, init: B, f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        self.0.fold(init, f)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl FusedIterator for StrDecoder<'_> {}

/// Decodes a sequence of base-85 chars.
pub fn decode_chars<I>(
    chars: I,
    alphabet: &Alphabet,
) -> CharDecoder<'_, I::IntoIter>
where
    I: IntoIterator<Item = char>,
{
    CharDecoder::new(chars.into_iter(), alphabet)
}

/// Decodes base-85 text given as UTF-8 bytes.
pub fn decode_bytes<I>(
    bytes: I,
    alphabet: &Alphabet,
) -> BytesDecoder<'_, I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    BytesDecoder::new(bytes.into_iter(), alphabet)
}

/// Decodes a base-85 `str`.
pub fn decode_str<'a>(s: &'a str, alphabet: &'a Alphabet) -> StrDecoder<'a> {
    StrDecoder::new(s, alphabet)
}

/// Takes a decoder and stores the contents in a [`Vec`].
///
/// This is equivalent to calling [`decoder.collect()`](Iterator::collect).
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_to_vec<D, E>(decoder: D) -> Result<Vec<u8>, E>
where
    D: Iterator<Item = Result<u8, E>>,
{
    decoder.collect()
}
