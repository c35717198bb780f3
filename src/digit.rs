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

/// A base-85 digit. Always less than 85.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digit(u8);

macro_rules! const_digit {
    ($n:expr) => {{
        use crate::digit::Digit;
        const DIGIT: Digit = Digit::__const($n);
        DIGIT
    }};
}

impl Digit {
    pub const RADIX: u32 = 85;

    pub fn new(x: u8) -> Option<Self> {
        (u32::from(x) < Self::RADIX).then(|| Self(x))
    }

    /// The least significant base-85 digit of `n`.
    pub fn low(n: u32) -> Self {
        Self((n % Self::RADIX) as u8)
    }

    #[doc(hidden)]
    pub const fn __const(n: u8) -> Self {
        assert!((n as u32) < Self::RADIX, "digit out of range");
        Self(n)
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> u8 {
        d.0
    }
}

impl From<Digit> for usize {
    fn from(d: Digit) -> usize {
        usize::from(d.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Digit;

    #[test]
    fn rejects_out_of_range() {
        assert!(Digit::new(84).is_some());
        assert!(Digit::new(85).is_none());
        assert!(Digit::new(u8::MAX).is_none());
    }

    #[test]
    fn low_digit() {
        assert_eq!(u8::from(Digit::low(0)), 0);
        assert_eq!(u8::from(Digit::low(85 * 3 + 7)), 7);
        assert_eq!(u8::from(Digit::low(u32::MAX)), (u32::MAX % 85) as u8);
    }

    #[test]
    fn const_digit() {
        assert_eq!(u8::from(const_digit!(84)), 84);
    }
}
