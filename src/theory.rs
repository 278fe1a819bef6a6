//! Pitch classes, modes and modal transposition.
//!
//! Octaves follow the common MIDI convention where note 60 is `C4`.

use crate::prelude::*;
use std::str::FromStr;

/// A pitch class (`0` is C, `11` is B) together with the octave it was taken from.
///
/// As a tonic, only the class matters.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
pub struct PitchClass {
    class: u8,
    octave: i16,
}

impl PitchClass {
    pub const C: PitchClass = PitchClass::new(0, 4);
    pub const D: PitchClass = PitchClass::new(2, 4);
    pub const E: PitchClass = PitchClass::new(4, 4);
    pub const F: PitchClass = PitchClass::new(5, 4);
    pub const G: PitchClass = PitchClass::new(7, 4);
    pub const A: PitchClass = PitchClass::new(9, 4);
    pub const B: PitchClass = PitchClass::new(11, 4);

    /// Creates a pitch class, wrapping `class` into `0..12`.
    #[inline]
    pub const fn new(class: u8, octave: i16) -> PitchClass {
        PitchClass {
            class: class % 12,
            octave,
        }
    }

    /// Splits a note number into its pitch class and octave.
    ///
    /// Every `i16` note survives the split: `from_note(n).to_note() == n`.
    pub fn from_note(note: i16) -> PitchClass {
        let note = note as i32;
        PitchClass {
            class: note.rem_euclid(12) as u8,
            octave: (note.div_euclid(12) - 1) as i16,
        }
    }

    /// The note number of this pitch class in its octave, saturated to the `i16` range.
    pub fn to_note(self) -> i16 {
        let note = (self.octave as i32 + 1) * 12 + self.class as i32;
        note.max(i16::MIN as i32).min(i16::MAX as i32) as i16
    }

    /// The class, in `0..12`.
    #[inline]
    pub fn class(self) -> u8 {
        self.class
    }

    #[inline]
    pub fn octave(self) -> i16 {
        self.octave
    }

    /// The sharp-spelled name of the class, without octave.
    pub fn name(self) -> &'static str {
        const NAMES: [&str; 12] = [
            "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
        ];
        NAMES[self.class as usize]
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.name(), self.octave)
    }
}

impl FromStr for PitchClass {
    type Err = Error;

    /// Parses names like `C`, `f#`, `Bb`, `Eb3` or `G#-1`.
    /// The octave defaults to 4.
    fn from_str(s: &str) -> Result<PitchClass> {
        let mut chars = s.trim().chars();
        let base: i32 = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => bail!(Error::InvalidPitchName),
        };
        let rest = chars.as_str();
        let accidentals = rest
            .chars()
            .take_while(|c| matches!(c, '#' | 'b' | '♯' | '♭'))
            .collect::<Vec<_>>();
        let shift: i32 = accidentals
            .iter()
            .map(|c| if matches!(c, '#' | '♯') { 1 } else { -1 })
            .sum();
        let octave_str = &rest[accidentals.iter().map(|c| c.len_utf8()).sum::<usize>()..];
        let octave = if octave_str.is_empty() {
            4
        } else {
            octave_str
                .parse::<i16>()
                .map_err(|_| Error::InvalidPitchName)?
        };
        Ok(PitchClass::new((base + shift).rem_euclid(12) as u8, octave))
    }
}

/// Which way modal transposition walks the scale.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Direction {
    Up,
    Down,
}

/// A scale, described by the semitone steps between its consecutive degrees.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Mode {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    HarmonicMinor,
    MelodicMinor,
    MajorPentatonic,
    MinorPentatonic,
    WholeTone,
    Chromatic,
}

impl Mode {
    pub const MAJOR: Mode = Mode::Ionian;
    pub const MINOR: Mode = Mode::Aeolian;

    /// The semitone steps from each degree to the next, starting at the tonic.
    /// The steps of every mode add up to one octave.
    pub fn steps(self) -> &'static [u8] {
        match self {
            Mode::Ionian => &[2, 2, 1, 2, 2, 2, 1],
            Mode::Dorian => &[2, 1, 2, 2, 2, 1, 2],
            Mode::Phrygian => &[1, 2, 2, 2, 1, 2, 2],
            Mode::Lydian => &[2, 2, 2, 1, 2, 2, 1],
            Mode::Mixolydian => &[2, 2, 1, 2, 2, 1, 2],
            Mode::Aeolian => &[2, 1, 2, 2, 1, 2, 2],
            Mode::Locrian => &[1, 2, 2, 1, 2, 2, 2],
            Mode::HarmonicMinor => &[2, 1, 2, 2, 1, 3, 1],
            Mode::MelodicMinor => &[2, 1, 2, 2, 2, 2, 1],
            Mode::MajorPentatonic => &[2, 2, 3, 2, 3],
            Mode::MinorPentatonic => &[3, 2, 2, 3, 2],
            Mode::WholeTone => &[2, 2, 2, 2, 2, 2],
            Mode::Chromatic => &[1; 12],
        }
    }
}

/// Moves `pc` by `distance` degrees of the scale described by `steps`, rooted at `tonic`.
///
/// A pitch that does not belong to the scale keeps its chromatic offset from the scale degree
/// right below it. Returns the resulting note number, which is not clamped to the MIDI range.
/// An empty step pattern leaves the pitch where it is.
pub fn modal_transposition(
    pc: PitchClass,
    tonic: PitchClass,
    steps: &[u8],
    distance: u32,
    direction: Direction,
) -> i16 {
    let start = pc.to_note() as i64;
    if steps.is_empty() {
        return pc.to_note();
    }
    let len = steps.len() as u64;
    let octave: i64 = steps.iter().map(|&s| s as i64).sum();

    //Find the scale degree at or right below the pitch
    let offset = (pc.class as i64 - tonic.class as i64).rem_euclid(12);
    let mut degree = 0;
    let mut acc = 0;
    for (i, &step) in steps.iter().enumerate() {
        if acc > offset {
            break;
        }
        degree = i;
        acc += step as i64;
    }

    let whole = (distance as u64 / len) as i64;
    let partial = distance as u64 % len;
    let mut delta = whole.saturating_mul(octave);
    match direction {
        Direction::Up => {
            for i in 0..partial {
                delta += steps[((degree as u64 + i) % len) as usize] as i64;
            }
        }
        Direction::Down => {
            delta = -delta;
            for i in 0..partial {
                let below = (degree as u64 + len - 1 - (i % len)) % len;
                delta -= steps[below as usize] as i64;
            }
        }
    }
    let note = start.saturating_add(delta);
    note.max(i16::MIN as i64).min(i16::MAX as i64) as i16
}
