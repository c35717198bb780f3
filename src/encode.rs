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

//! Functions and types for encoding base-85 data.

use super::alphabet::Alphabet;
use super::iter::{BaseIterator, Flatten, InspectBaseIterator};
use super::Digit;
use super::{BYTES_PER_CHUNK, DIGITS_PER_CHUNK};

use core::array;
use core::iter::{Fuse, FusedIterator, Take};

#[cfg(feature = "alloc")]
use alloc::string::String;

/// The number of symbols produced when encoding `len` bytes, or [`None`] if
/// that number would overflow a `usize`.
///
/// Every full group of 4 bytes becomes 5 symbols, and a final group of `n`
/// bytes becomes `n + 1` symbols.
pub const fn encoded_len(len: usize) -> Option<usize> {
    let full = match (len / BYTES_PER_CHUNK).checked_mul(DIGITS_PER_CHUNK) {
        Some(n) => n,
        None => return None,
    };
    match len % BYTES_PER_CHUNK {
        0 => Some(full),
        rem => full.checked_add(rem + 1),
    }
}

struct BytesToUnflatDigits<I>(I);

impl<I> BytesToUnflatDigits<I> {
    pub fn new(iter: I) -> Self {
        Self(iter)
    }
}

impl<I: InspectBaseIterator> InspectBaseIterator for BytesToUnflatDigits<I> {
    type Iter = I::Iter;

    fn base_iterator(&self) -> &Self::Iter {
        self.0.base_iterator()
    }
}

type BytesToUnflatDigitsItem = Take<array::IntoIter<Digit, DIGITS_PER_CHUNK>>;

impl<I> Iterator for BytesToUnflatDigits<I>
where
    I: FusedIterator<Item = u8>,
{
    type Item = BytesToUnflatDigitsItem;

    fn next(&mut self) -> Option<Self::Item> {
        let mut num_bytes = 0;
        let mut sum = 0_u32;
        self.0
            .by_ref()
            .map(u32::from)
            .enumerate()
            .take(BYTES_PER_CHUNK)
            .for_each(|(i, n)| {
                num_bytes += 1;
                sum |= n << (8 * (BYTES_PER_CHUNK - 1 - i));
            });

        if num_bytes == 0 {
            return None;
        }

        let mut digits = [const_digit!(0); DIGITS_PER_CHUNK];
        digits.iter_mut().rev().for_each(|d| {
            *d = Digit::low(sum);
            sum /= Digit::RADIX;
        });
        // A short group keeps only the digits that carry its bytes.
        Some(IntoIterator::into_iter(digits).take(num_bytes + 1))
    }
}

impl<I: FusedIterator<Item = u8>> FusedIterator for BytesToUnflatDigits<I> {}

type Digits<I> = Flatten<
    BytesToUnflatDigits<BaseIterator<Fuse<I>>>,
    BytesToUnflatDigitsItem,
>;

fn digits<I: Iterator>(iter: I) -> Digits<I> {
    Flatten::new(BytesToUnflatDigits::new(BaseIterator(iter.fuse())))
}

fn digits_size_hint<I>(digits: &Digits<I>) -> (usize, Option<usize>)
where
    I: Iterator,
{
    // Groups are pulled from the input whole, so whatever is left in the
    // input starts on a group boundary.
    let (pending, _) = digits.sub_size_hint();
    let (lower, upper) = digits.base_iterator().size_hint();
    (
        encoded_len(lower)
            .and_then(|n| n.checked_add(pending))
            .unwrap_or(usize::MAX),
        upper
            .and_then(encoded_len)
            .and_then(|n| n.checked_add(pending)),
    )
}

/// Iterator returned by [`encode_to_chars`].
pub struct CharEncoder<'a, I> {
    alphabet: &'a Alphabet,
    digits: Digits<I>,
}

impl<'a, I: Iterator> CharEncoder<'a, I> {
    pub(crate) fn new(iter: I, alphabet: &'a Alphabet) -> Self {
        Self {
            alphabet,
            digits: digits(iter),
        }
    }
}

impl<I> Iterator for CharEncoder<'_, I>
where
    I: Iterator<Item = u8>,
{
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        self.digits.next().map(|d| self.alphabet.symbol(d))
    }

    fn fold<B, F>(self, init: B, mut f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        let alphabet = self.alphabet;
        self.digits.fold(init, |b, d| f(b, alphabet.symbol(d)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        digits_size_hint(&self.digits)
    }
}

impl<I: Iterator<Item = u8>> FusedIterator for CharEncoder<'_, I> {}

/// Iterator returned by [`encode_to_bytes`].
///
/// Every alphabet symbol is ASCII, so each item is one whole character of
/// the encoding.
pub struct BytesEncoder<'a, I>(CharEncoder<'a, I>);

impl<I> Iterator for BytesEncoder<'_, I>
where
    I: Iterator<Item = u8>,
{
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let encoder = &mut self.0;
        encoder.digits.next().map(|d| encoder.alphabet.symbol_byte(d))
    }

    fn fold<B, F>(self, init: B, mut f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        let alphabet = self.0.alphabet;
        self.0.digits.fold(init, |b, d| f(b, alphabet.symbol_byte(d)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<I: Iterator<Item = u8>> FusedIterator for BytesEncoder<'_, I> {}

/// Encodes a sequence of bytes as base-85 chars.
pub fn encode_to_chars<I>(
    bytes: I,
    alphabet: &Alphabet,
) -> CharEncoder<'_, I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    CharEncoder::new(bytes.into_iter(), alphabet)
}

/// Encodes a sequence of bytes as the ASCII bytes of base-85 text.
pub fn encode_to_bytes<I>(
    bytes: I,
    alphabet: &Alphabet,
) -> BytesEncoder<'_, I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    BytesEncoder(CharEncoder::new(bytes.into_iter(), alphabet))
}

/// Encodes a sequence of bytes and stores the result in a [`String`].
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_string<I>(bytes: I, alphabet: &Alphabet) -> String
where
    I: IntoIterator<Item = u8>,
{
    let s: String = encode_to_chars(bytes, alphabet).collect();
    log::trace!("encoded {} symbols", s.len());
    s
}

#[cfg(test)]
mod tests {
    use super::{encode_to_bytes, encode_to_chars, encoded_len};
    use crate::alphabet::LINK;

    #[test]
    fn partial_groups() {
        let lens: Vec<_> = (0..=9)
            .map(|n| encode_to_chars(vec![0; n], &LINK).count())
            .collect();
        assert_eq!(lens, [0, 2, 3, 4, 5, 7, 8, 9, 10, 12]);
    }

    #[test]
    fn zeros_and_ones() {
        let s: String = encode_to_chars([0, 0, 0, 0], &LINK).collect();
        assert_eq!(s, "00000");
        let s: String = encode_to_chars([0, 0, 0, 1], &LINK).collect();
        assert_eq!(s, "00001");
        let s: String = encode_to_chars([0], &LINK).collect();
        assert_eq!(s, "00");
    }

    #[test]
    fn bytes_match_chars() {
        let input = b"hello world".iter().copied();
        let bytes: Vec<u8> = encode_to_bytes(input.clone(), &LINK).collect();
        let chars: String = encode_to_chars(input, &LINK).collect();
        assert_eq!(bytes, chars.as_bytes());
    }

    #[test]
    fn size_hint_is_exact_for_slices() {
        let data = [7_u8; 11];
        let mut encoder = encode_to_chars(data.iter().copied(), &LINK);
        let mut remaining = encoded_len(data.len()).unwrap();
        loop {
            assert_eq!(encoder.size_hint(), (remaining, Some(remaining)));
            if encoder.next().is_none() {
                break;
            }
            remaining -= 1;
        }
        assert_eq!(remaining, 0);
    }

    #[test]
    fn fold_after_next() {
        let mut encoder = encode_to_chars(*b"hello", &LINK);
        let first = encoder.next();
        let rest = encoder.fold(String::new(), |mut s, c| {
            s.push(c);
            s
        });
        assert_eq!(first, Some('x'));
        assert_eq!(rest, "K#0@zV");
    }

    #[test]
    fn encoded_len_overflow() {
        assert_eq!(encoded_len(usize::MAX), None);
        assert_eq!(encoded_len(6), Some(8));
    }
}
