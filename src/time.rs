//! Fixed-point musical time.
//!
//! Times are measured in beats (quarter notes) and stored as a signed 64-bit integer with 32
//! fractional bits. All arithmetic is integer arithmetic and saturates at the representable
//! bounds.

use crate::prelude::*;

/// A signed, fixed-point amount of beats.
///
/// The representation is exact: adding, subtracting and comparing times never rounds, and
/// multiplication only rounds below `2^-32` beats. Overflowing results saturate to
/// [`Time::MAX`](#associatedconstant.MAX) or [`Time::MIN`](#associatedconstant.MIN) instead of
/// wrapping around, so a negative time is always represented as a negative time.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Time(i64);

impl Time {
    /// Amount of fractional bits in the fixed-point representation.
    pub const FRACTION_BITS: u32 = 32;

    const SCALE: i64 = 1 << Self::FRACTION_BITS;

    /// The start of a sequence.
    pub const ZERO: Time = Time(0);
    /// Exactly one beat.
    pub const ONE: Time = Time(Self::SCALE);
    /// The latest representable time.
    pub const MAX: Time = Time(i64::MAX);
    /// The earliest representable time.
    pub const MIN: Time = Time(i64::MIN);

    /// Creates a time from a whole amount of beats.
    #[inline]
    pub const fn from_beats(beats: i32) -> Time {
        Time((beats as i64) << Self::FRACTION_BITS)
    }

    /// Creates a time from its raw fixed-point representation.
    #[inline]
    pub const fn from_raw(raw: i64) -> Time {
        Time(raw)
    }

    /// Get the raw fixed-point representation out of the wrapper.
    #[inline]
    pub const fn as_raw(self) -> i64 {
        self.0
    }

    /// Creates the time `num / den` beats, rounded to the nearest representable value.
    ///
    /// Returns `None` if `den` is zero.
    pub fn from_ratio(num: i64, den: i64) -> Option<Time> {
        if den == 0 {
            return None;
        }
        let (num, den) = if den < 0 {
            (-(num as i128), -(den as i128))
        } else {
            (num as i128, den as i128)
        };
        Some(Time::saturate(div_round(num << Self::FRACTION_BITS, den)))
    }

    /// Converts an absolute amount of MIDI ticks into beats.
    ///
    /// Returns `None` if `ticks_per_beat` is zero.
    pub fn from_ticks(ticks: u64, ticks_per_beat: u16) -> Option<Time> {
        Time::from_ratio(i64::try_from(ticks).unwrap_or(i64::MAX), ticks_per_beat as i64)
    }

    /// Converts this time into MIDI ticks at the given resolution, rounding to the nearest tick.
    pub fn to_ticks(self, ticks_per_beat: u16) -> i64 {
        let ticks = div_round(self.0 as i128 * ticks_per_beat as i128, Self::SCALE as i128);
        clamp_i64(ticks)
    }

    /// Rounds this time to the nearest multiple of `1 / grid_size` beats.
    ///
    /// Ties round away from zero.
    /// A grid size of zero describes no grid at all, and leaves the time unchanged.
    pub fn round_to_grid(self, grid_size: u32) -> Time {
        if grid_size == 0 {
            return self;
        }
        let grid = grid_size as i128;
        let cells = div_round(self.0 as i128 * grid, Self::SCALE as i128);
        Time::saturate(div_round(cells * Self::SCALE as i128, grid))
    }

    /// Whether this time lies before the zero point.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// The magnitude of this time, saturating `Time::MIN` to `Time::MAX`.
    #[inline]
    pub const fn abs(self) -> Time {
        Time(self.0.saturating_abs())
    }

    /// Approximate value in beats, for display purposes only.
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    #[inline]
    fn saturate(raw: i128) -> Time {
        Time(clamp_i64(raw))
    }
}

impl From<i32> for Time {
    /// Whole beats.
    #[inline]
    fn from(beats: i32) -> Time {
        Time::from_beats(beats)
    }
}

impl fmt::Debug for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Time({})", self)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.as_f64(), f)
    }
}

impl ops::Add for Time {
    type Output = Time;
    #[inline]
    fn add(self, rhs: Time) -> Time {
        Time(self.0.saturating_add(rhs.0))
    }
}

impl ops::Sub for Time {
    type Output = Time;
    #[inline]
    fn sub(self, rhs: Time) -> Time {
        Time(self.0.saturating_sub(rhs.0))
    }
}

impl ops::Mul for Time {
    type Output = Time;
    /// Fixed-point product, rounded to the nearest representable time.
    #[inline]
    fn mul(self, rhs: Time) -> Time {
        let product = self.0 as i128 * rhs.0 as i128;
        Time::saturate(div_round(product, Self::SCALE as i128))
    }
}

impl ops::Neg for Time {
    type Output = Time;
    #[inline]
    fn neg(self) -> Time {
        Time(self.0.saturating_neg())
    }
}

impl ops::AddAssign for Time {
    #[inline]
    fn add_assign(&mut self, rhs: Time) {
        *self = *self + rhs;
    }
}

impl ops::SubAssign for Time {
    #[inline]
    fn sub_assign(&mut self, rhs: Time) {
        *self = *self - rhs;
    }
}

/// Integer division rounding to nearest, ties away from zero.
/// `den` must be positive.
fn div_round(num: i128, den: i128) -> i128 {
    let half = den / 2;
    if num >= 0 {
        (num + half) / den
    } else {
        (num - half) / den
    }
}

fn clamp_i64(raw: i128) -> i64 {
    if raw > i64::MAX as i128 {
        i64::MAX
    } else if raw < i64::MIN as i128 {
        i64::MIN
    } else {
        raw as i64
    }
}

pub(crate) fn lerp_round(from: i128, to: i128, pos: i128, len: i128) -> i128 {
    from + div_round((to - from) * pos, len)
}
