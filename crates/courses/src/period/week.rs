//! Weekday bitmask used by periods.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Day names in canonical order. Index `i` corresponds to bit `1 << i`.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Set of weekdays a period meets on, one bit per day (Monday is bit 0).
///
/// An empty pattern means the days are not known yet (TBA).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct WeekPattern(u8);

impl WeekPattern {
    pub const NONE: WeekPattern = WeekPattern(0);
    pub const MONDAY: WeekPattern = WeekPattern(1 << 0);
    pub const TUESDAY: WeekPattern = WeekPattern(1 << 1);
    pub const WEDNESDAY: WeekPattern = WeekPattern(1 << 2);
    pub const THURSDAY: WeekPattern = WeekPattern(1 << 3);
    pub const FRIDAY: WeekPattern = WeekPattern(1 << 4);
    pub const SATURDAY: WeekPattern = WeekPattern(1 << 5);
    pub const SUNDAY: WeekPattern = WeekPattern(1 << 6);
    pub const ALL: WeekPattern = WeekPattern(0x7f);

    /// Builds a pattern from raw bits. Bits above Sunday are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        WeekPattern(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Bit for the day at `index` (0 = Monday .. 6 = Sunday).
    ///
    /// Out-of-range indices yield an empty pattern.
    pub const fn day_bit(index: usize) -> Self {
        if index < 7 {
            WeekPattern(1 << index)
        } else {
            Self::NONE
        }
    }

    /// Builds a pattern from day names and/or pre-encoded flags.
    ///
    /// Names are matched case-insensitively ("monday", "MONDAY" and "Monday"
    /// are the same day). Unknown names contribute nothing. Repeated days are
    /// only counted once.
    pub fn from_names<I, D>(names: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<DayInput>,
    {
        names
            .into_iter()
            .map(Into::into)
            .fold(Self::NONE, |acc, input| acc | input.to_pattern())
    }

    /// Names of the days in this pattern, Monday first.
    pub fn to_names(self) -> Vec<&'static str> {
        DAY_NAMES
            .iter()
            .enumerate()
            .filter(|(i, _)| self.is_on_day(Self::day_bit(*i)))
            .map(|(_, name)| *name)
            .collect()
    }

    /// Whether this pattern includes any of the days in `day`.
    #[inline]
    pub fn is_on_day(self, day: WeekPattern) -> bool {
        self.0 & day.0 != 0
    }

    /// Whether the two patterns share at least one day.
    #[inline]
    pub fn intersects(self, other: WeekPattern) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Indices (0 = Monday) of the days in this pattern.
    pub fn day_indices(self) -> impl Iterator<Item = usize> {
        (0..7).filter(move |i| self.is_on_day(Self::day_bit(*i)))
    }
}

// Stray high bits in data files are dropped the same way `from_bits` drops them.
impl From<u8> for WeekPattern {
    fn from(bits: u8) -> Self {
        WeekPattern::from_bits(bits)
    }
}

impl From<WeekPattern> for u8 {
    fn from(pattern: WeekPattern) -> Self {
        pattern.0
    }
}

impl BitOr for WeekPattern {
    type Output = WeekPattern;

    fn bitor(self, rhs: Self) -> Self::Output {
        WeekPattern(self.0 | rhs.0)
    }
}

impl BitOrAssign for WeekPattern {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for WeekPattern {
    type Output = WeekPattern;

    fn bitand(self, rhs: Self) -> Self::Output {
        WeekPattern(self.0 & rhs.0)
    }
}

impl fmt::Display for WeekPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_names().join(", "))
    }
}

/// One element accepted by [`WeekPattern::from_names`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayInput {
    /// A day name such as "Tuesday", any case
    Name(String),
    /// Already-encoded day bits
    Flag(u32),
}

impl DayInput {
    fn to_pattern(&self) -> WeekPattern {
        match self {
            DayInput::Name(name) => DAY_NAMES
                .iter()
                .position(|day| day.eq_ignore_ascii_case(name))
                .map(WeekPattern::day_bit)
                .unwrap_or(WeekPattern::NONE),
            DayInput::Flag(bits) => WeekPattern::from_bits((*bits & 0x7f) as u8),
        }
    }
}

impl From<&str> for DayInput {
    fn from(name: &str) -> Self {
        DayInput::Name(name.to_string())
    }
}

impl From<String> for DayInput {
    fn from(name: String) -> Self {
        DayInput::Name(name)
    }
}

impl From<&String> for DayInput {
    fn from(name: &String) -> Self {
        DayInput::Name(name.clone())
    }
}

impl From<u32> for DayInput {
    fn from(bits: u32) -> Self {
        DayInput::Flag(bits)
    }
}

impl From<WeekPattern> for DayInput {
    fn from(pattern: WeekPattern) -> Self {
        DayInput::Flag(pattern.bits() as u32)
    }
}
