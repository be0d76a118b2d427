//! Interpretation of `--value` strings.
//!
//! A value is either absolute (`40`), a relative increase (`+40`) or a
//! relative decrease (`_40`). Relative values are resolved against the
//! light's current reading before being range-checked.

use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{ElgatoError, Result};

pub const BRIGHTNESS_RANGE: RangeInclusive<i64> = 3..=100;
pub const TEMPERATURE_RANGE: RangeInclusive<i64> = 143..=344;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Absolute(i64),
    Increase(i64),
    Decrease(i64),
}

impl Default for Adjustment {
    fn default() -> Self {
        Adjustment::Absolute(0)
    }
}

impl Adjustment {
    /// Parses `N`, `+N` or `_N`. An empty string yields `None` so the
    /// caller keeps whatever adjustment it already holds.
    pub fn parse(input: &str) -> Result<Option<Adjustment>> {
        if input.is_empty() {
            return Ok(None);
        }

        let adjustment = if input.starts_with('+') {
            Adjustment::Increase(parse_magnitude(input, input.trim_start_matches('+'))?)
        } else if input.starts_with('_') {
            Adjustment::Decrease(parse_magnitude(input, input.trim_start_matches('_'))?)
        } else {
            let value = input.parse::<i64>().map_err(|source| ElgatoError::ParseError {
                input: input.to_string(),
                source,
            })?;
            Adjustment::Absolute(value)
        };

        Ok(Some(adjustment))
    }

    pub fn is_relative(&self) -> bool {
        !matches!(self, Adjustment::Absolute(_))
    }

    /// Resolves the adjustment against `current`.
    ///
    /// A decrease never goes negative: when the magnitude exceeds the
    /// current value the operands are swapped, so `_80` against `50`
    /// yields `30`. Results saturate at the `i64` limits so a bogus device
    /// reading ends up out of bounds rather than wrapping.
    pub fn apply(&self, current: i64) -> i64 {
        match *self {
            Adjustment::Absolute(v) => v,
            Adjustment::Increase(m) => current.saturating_add(m),
            Adjustment::Decrease(m) => {
                if current > m {
                    current.saturating_sub(m)
                } else {
                    m.saturating_sub(current)
                }
            }
        }
    }
}

// Relative magnitudes are non-negative, `+-5` is rejected. Repeated
// prefixes collapse, so `++5` and `__5` both mean 5.
fn parse_magnitude(input: &str, rest: &str) -> Result<i64> {
    rest.parse::<u32>()
        .map(i64::from)
        .map_err(|source| ElgatoError::ParseError {
            input: input.to_string(),
            source,
        })
}

/// A settable light attribute with fixed device bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Brightness,
    Temperature,
}

impl Field {
    pub fn range(&self) -> RangeInclusive<i64> {
        match self {
            Field::Brightness => BRIGHTNESS_RANGE,
            Field::Temperature => TEMPERATURE_RANGE,
        }
    }

    pub fn check(&self, candidate: i64) -> Result<i64> {
        let range = self.range();
        if range.contains(&candidate) {
            Ok(candidate)
        } else {
            Err(ElgatoError::OutOfBounds {
                field: *self,
                min: *range.start(),
                max: *range.end(),
                got: candidate,
            })
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Brightness => write!(f, "brightness"),
            Field::Temperature => write!(f, "temperature"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_absolute_values() {
        for (input, expected) in &[("0", 0), ("40", 40), ("600", 600), ("-7", -7)] {
            assert_eq!(
                Adjustment::parse(input).unwrap(),
                Some(Adjustment::Absolute(*expected))
            );
        }
    }

    #[test]
    fn parses_relative_values() {
        assert_eq!(
            Adjustment::parse("+40").unwrap(),
            Some(Adjustment::Increase(40))
        );
        assert_eq!(
            Adjustment::parse("_40").unwrap(),
            Some(Adjustment::Decrease(40))
        );
    }

    #[test]
    fn repeated_prefixes_collapse() {
        assert_eq!(
            Adjustment::parse("++5").unwrap(),
            Some(Adjustment::Increase(5))
        );
        assert_eq!(
            Adjustment::parse("__5").unwrap(),
            Some(Adjustment::Decrease(5))
        );
    }

    #[test]
    fn empty_input_is_a_no_op() {
        assert_eq!(Adjustment::parse("").unwrap(), None);
    }

    #[test]
    fn rejects_garbage() {
        for input in &["abc", "+abc", "_abc", "+", "_", "++", " 40", "40 ", "+-5", "4O"] {
            match Adjustment::parse(input) {
                Err(ElgatoError::ParseError { input: got, .. }) => assert_eq!(&got, input),
                other => panic!("expected ParseError for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn increase_adds_to_current() {
        assert_eq!(Adjustment::Increase(10).apply(50), 60);
    }

    #[test]
    fn decrease_swaps_operands_instead_of_going_negative() {
        assert_eq!(Adjustment::Decrease(20).apply(50), 30);
        assert_eq!(Adjustment::Decrease(80).apply(50), 30);
        assert_eq!(Adjustment::Decrease(50).apply(50), 0);
    }

    #[test]
    fn extreme_readings_saturate_out_of_bounds() {
        assert_eq!(Adjustment::Increase(1).apply(i64::MAX), i64::MAX);
        assert_eq!(Adjustment::Decrease(5).apply(i64::MIN), i64::MAX);
        assert_eq!(Adjustment::Decrease(-5).apply(i64::MAX), i64::MAX);

        assert!(matches!(
            Field::Brightness.check(Adjustment::Increase(1).apply(i64::MAX)),
            Err(ElgatoError::OutOfBounds { got: i64::MAX, .. })
        ));
        assert!(matches!(
            Field::Temperature.check(Adjustment::Decrease(5).apply(i64::MIN)),
            Err(ElgatoError::OutOfBounds { got: i64::MAX, .. })
        ));
    }

    #[test]
    fn absolute_ignores_current() {
        assert_eq!(Adjustment::Absolute(42).apply(99), 42);
        assert!(!Adjustment::Absolute(42).is_relative());
        assert!(Adjustment::Decrease(1).is_relative());
    }

    #[test]
    fn brightness_bounds_are_inclusive() {
        assert_eq!(Field::Brightness.check(3).unwrap(), 3);
        assert_eq!(Field::Brightness.check(100).unwrap(), 100);
        assert!(matches!(
            Field::Brightness.check(2),
            Err(ElgatoError::OutOfBounds { got: 2, min: 3, max: 100, .. })
        ));
        assert!(matches!(
            Field::Brightness.check(101),
            Err(ElgatoError::OutOfBounds { got: 101, .. })
        ));
    }

    #[test]
    fn temperature_bounds_are_inclusive() {
        assert_eq!(Field::Temperature.check(143).unwrap(), 143);
        assert_eq!(Field::Temperature.check(344).unwrap(), 344);
        assert!(Field::Temperature.check(142).is_err());
        assert!(Field::Temperature.check(345).is_err());
    }

    #[test]
    fn out_of_bounds_message_names_field_and_range() {
        let err = Field::Temperature.check(400).unwrap_err();
        assert_eq!(
            err.to_string(),
            "temperature needs to be between 143 and 344, was: 400"
        );
    }
}
