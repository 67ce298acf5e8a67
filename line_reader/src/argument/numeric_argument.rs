// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// The repeat count built up by `digit-argument`, `neg-argument`,
/// `universal-argument`, and `argument-base`, and handed to the next widget.
///
/// ```rust
/// use r3bl_line_reader::NumericArgument;
///
/// let mut argument = NumericArgument::default();
/// argument.neg_argument();
/// argument.digit_argument(1);
/// argument.digit_argument(2);
/// assert_eq!(argument.count(), -12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumericArgument {
    digits: Option<i64>,
    negative: bool,
    /// `4^n` after `n` presses of `universal-argument` with no digits.
    multiplier: i64,
    /// Radix for the digits that follow, set by `argument-base`.
    base: u32,
    active: bool,
    /// Set whenever an argument widget runs; the dispatcher uses it to decide whether
    /// to clear the argument after a widget.
    touched: bool,
}

impl Default for NumericArgument {
    fn default() -> Self {
        Self {
            digits: None,
            negative: false,
            multiplier: 1,
            base: 10,
            active: false,
            touched: false,
        }
    }
}

impl NumericArgument {
    /// Add one digit. Returns `false` if `digit` is not valid in the current base.
    pub fn digit_argument(&mut self, digit: u32) -> bool {
        if digit >= self.base {
            return false;
        }
        let value = self.digits.unwrap_or(0);
        self.digits = Some(
            value
                .saturating_mul(i64::from(self.base))
                .saturating_add(i64::from(digit))
                .min(i64::from(i32::MAX)),
        );
        self.activate();
        true
    }

    pub fn neg_argument(&mut self) {
        self.negative = !self.negative;
        self.activate();
    }

    /// Multiply by four. Once digits have been typed it starts a new count instead.
    pub fn universal_argument(&mut self) {
        if self.digits.is_some() {
            self.digits = None;
            self.multiplier = 1;
        }
        self.multiplier = self.multiplier.saturating_mul(4).min(i64::from(i32::MAX));
        self.activate();
    }

    /// Use the current count as the radix for the digits that follow. Returns `false`
    /// for a radix outside `2..=36`.
    pub fn argument_base(&mut self) -> bool {
        let Ok(base) = u32::try_from(self.count()) else {
            return false;
        };
        if !(2..=36).contains(&base) {
            return false;
        }
        *self = Self {
            base,
            touched: true,
            ..Self::default()
        };
        true
    }

    /// The count to repeat the next widget by, `1` when nothing was typed.
    #[must_use]
    pub fn count(&self) -> i32 {
        let magnitude = match self.digits {
            Some(digits) => digits,
            None => self.multiplier,
        };
        let signed = if self.negative { -magnitude } else { magnitude };
        i32::try_from(signed).unwrap_or(if signed < 0 { i32::MIN } else { i32::MAX })
    }

    /// Was anything typed.
    #[must_use]
    pub fn is_active(&self) -> bool { self.active }

    #[must_use]
    pub fn base(&self) -> u32 { self.base }

    /// Report whether an argument widget ran since the last call, and reset the flag.
    pub fn take_touched(&mut self) -> bool { std::mem::take(&mut self.touched) }

    pub fn clear(&mut self) { *self = Self::default(); }

    /// Replace the count, as if `count` had been typed. A vi operator uses this to
    /// hand its count (`3` in `3dw`) to the motion that follows.
    pub fn set_count(&mut self, count: i32) {
        *self = Self {
            digits: Some(i64::from(count).abs()),
            negative: count < 0,
            ..Self::default()
        };
        self.activate();
    }

    fn activate(&mut self) {
        self.active = true;
        self.touched = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_one() {
        let argument = NumericArgument::default();
        assert_eq!(argument.count(), 1);
        assert!(!argument.is_active());
    }

    #[test]
    fn test_digits_accumulate() {
        let mut argument = NumericArgument::default();
        argument.digit_argument(3);
        assert_eq!(argument.count(), 3);
        argument.digit_argument(0);
        assert_eq!(argument.count(), 30);
        assert!(argument.take_touched());
        assert!(!argument.take_touched());
    }

    #[test]
    fn test_neg_argument_alone_is_minus_one() {
        let mut argument = NumericArgument::default();
        argument.neg_argument();
        assert_eq!(argument.count(), -1);
    }

    #[test]
    fn test_universal_argument_multiplies() {
        let mut argument = NumericArgument::default();
        argument.universal_argument();
        argument.universal_argument();
        assert_eq!(argument.count(), 16);
        argument.digit_argument(7);
        assert_eq!(argument.count(), 7);
    }

    #[test]
    fn test_argument_base() {
        let mut argument = NumericArgument::default();
        argument.digit_argument(1);
        argument.digit_argument(6);
        assert!(argument.argument_base());
        assert_eq!(argument.base(), 16);
        assert!(argument.digit_argument(15));
        assert!(argument.digit_argument(15));
        assert_eq!(argument.count(), 255);

        argument.clear();
        assert_eq!(argument.base(), 10);
        assert!(!argument.argument_base());
    }

    #[test]
    fn test_set_count() {
        let mut argument = NumericArgument::default();
        argument.set_count(-6);
        assert_eq!(argument.count(), -6);
        assert!(argument.is_active());
    }

    #[test]
    fn test_overflow_saturates() {
        let mut argument = NumericArgument::default();
        for _ in 0..20 {
            argument.digit_argument(9);
        }
        assert_eq!(argument.count(), i32::MAX);
    }
}
