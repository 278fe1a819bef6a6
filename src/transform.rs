//! Sequence-to-sequence operations.
//!
//! Every operation visits each message once and builds a new sequence. Variant-specific rules
//! are written as exhaustive matches without wildcard arms, so a new message kind cannot be
//! added without deciding what each operation does with it.

use crate::{
    curve::VelocityCurve,
    instrument,
    prelude::*,
    theory::{self, Direction, Mode, PitchClass},
};
use log::{debug, trace};

/// The note around which [`Transform::extract`](trait.Transform.html#tymethod.extract) keeps
/// notes: middle C.
pub const EXTRACT_CENTER: i16 = 60;

/// The order in which the notes of a chord would be broken up.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum ArpeggioPattern {
    Up,
    Down,
    UpDown,
    DownUp,
}

/// Musical edits over an ordered run of messages.
///
/// This trait is implemented for `[Message]`, and through `Deref` it is available on
/// [`Sequence`](struct.Sequence.html) and `Vec<Message>` as well.
/// None of the methods modify their input; each one returns a newly allocated sequence.
pub trait Transform {
    /// Shifts the note of every `NoteOn` and `NoteOff` by `semitones`.
    ///
    /// Notes are not clamped to the MIDI range; the result may contain notes below 0 or above
    /// 127 (saturating at the bounds of `i16`). All other messages are kept as they are.
    fn transpose(&self, semitones: i32) -> Sequence;

    /// Plays the sequence backwards.
    ///
    /// Messages come out in reverse order, with every time `t` reflected to
    /// `(last - t) + first`, where `first` and `last` are the times of the first and last
    /// messages. A meta message without time at either end makes that bound zero.
    /// `NoteOn` and `NoteOff` swap roles, so that every note still starts before it ends.
    fn reverse(&self) -> Sequence;

    /// Snaps the times of `NoteOn` and `NoteOff` messages to the nearest multiple of
    /// `1 / grid_size` beats, see [`Time::round_to_grid`](struct.Time.html#method.round_to_grid).
    fn quantize(&self, grid_size: u32) -> Sequence;

    /// Keeps only the notes strictly within `note_range` semitones of middle C.
    ///
    /// The bounds are `max(0, 60 - note_range)` and `min(127, 60 + note_range)`, both exclusive.
    /// Every message that is not a `NoteOn` or `NoteOff` is dropped.
    fn extract(&self, note_range: u8) -> Sequence;

    /// Multiplies every time in the sequence by `factor`.
    fn scale_duration(&self, factor: Time) -> Sequence;

    /// Rewrites the tempo of every `SetTempo` message.
    ///
    /// No tempo message is inserted if there is none.
    fn set_tempo(&self, tempo: u32) -> Sequence;

    /// Replaces the value of every `ControlChange` with the next instrument of its General MIDI
    /// family, see [`instrument::next_in_group`](instrument/fn.next_in_group.html).
    ///
    /// `channel` is currently not used to select messages: every control change is remapped.
    fn remap_instruments(&self, channel: u4) -> Sequence;

    /// The tempo of the last `SetTempo` message, or `0` if there is none.
    ///
    /// This is the `get_bpm` query of other sequencers; the returned value is the stored tempo,
    /// in whatever unit the messages carry.
    fn bpm(&self) -> u32;

    /// Adds a harmony voice to the sequence.
    ///
    /// Every `NoteOn` is preceded by a copy moved `|steps|` degrees through `mode` rooted at
    /// `tonic`: upwards when `steps` is negative and downwards otherwise. Every `NoteOff` is
    /// preceded by a copy moved by `steps` plain semitones. Other messages appear once.
    fn generate_harmony(&self, steps: i32, tonic: PitchClass, mode: Mode) -> Sequence;

    /// Breaks chords up into arpeggios.
    ///
    /// Not supported: this always returns [`Error::Unsupported`](enum.Error.html).
    fn arpeggiate_chords(&self, pattern: ArpeggioPattern) -> Result<Sequence>;

    /// Sets the velocity of every `NoteOn` and `NoteOff` to the value of `curve` at its time.
    ///
    /// Notes where the curve is not defined keep their velocity.
    fn edit_dynamics(&self, curve: &VelocityCurve) -> Sequence;
}

impl Transform for [Message] {
    fn transpose(&self, semitones: i32) -> Sequence {
        trace!("transposing {} messages by {} semitones", self.len(), semitones);
        self.iter()
            .map(|&msg| match msg {
                Message::NoteOn {
                    channel,
                    note,
                    vel,
                    time,
                } => Message::NoteOn {
                    channel,
                    note: shift_note(note, semitones),
                    vel,
                    time,
                },
                Message::NoteOff {
                    channel,
                    note,
                    vel,
                    time,
                } => Message::NoteOff {
                    channel,
                    note: shift_note(note, semitones),
                    vel,
                    time,
                },
                Message::SetTempo { .. }
                | Message::TimeSignature { .. }
                | Message::ControlChange { .. }
                | Message::PitchWheel { .. }
                | Message::AfterTouch { .. }
                | Message::PolyTouch { .. }
                | Message::ProgramChange { .. } => msg,
            })
            .collect()
    }

    fn reverse(&self) -> Sequence {
        let maxtime = self.last().and_then(Message::time).unwrap_or_default();
        let mintime = self.first().and_then(Message::time).unwrap_or_default();
        trace!(
            "reversing {} messages between {} and {}",
            self.len(),
            mintime,
            maxtime
        );
        let reflect = |t: Time| (maxtime - t) + mintime;
        self.iter()
            .rev()
            .map(|&msg| match msg {
                Message::NoteOn {
                    channel,
                    note,
                    vel,
                    time,
                } => Message::NoteOff {
                    channel,
                    note,
                    vel,
                    time: reflect(time),
                },
                Message::NoteOff {
                    channel,
                    note,
                    vel,
                    time,
                } => Message::NoteOn {
                    channel,
                    note,
                    vel,
                    time: reflect(time),
                },
                Message::SetTempo { .. }
                | Message::TimeSignature { .. }
                | Message::ControlChange { .. }
                | Message::PitchWheel { .. }
                | Message::AfterTouch { .. }
                | Message::PolyTouch { .. }
                | Message::ProgramChange { .. } => msg.map_time(reflect),
            })
            .collect()
    }

    fn quantize(&self, grid_size: u32) -> Sequence {
        trace!("quantizing {} messages to 1/{}", self.len(), grid_size);
        self.iter()
            .map(|&msg| match msg {
                Message::NoteOn { .. } | Message::NoteOff { .. } => {
                    msg.map_time(|t| t.round_to_grid(grid_size))
                }
                Message::SetTempo { .. }
                | Message::TimeSignature { .. }
                | Message::ControlChange { .. }
                | Message::PitchWheel { .. }
                | Message::AfterTouch { .. }
                | Message::PolyTouch { .. }
                | Message::ProgramChange { .. } => msg,
            })
            .collect()
    }

    fn extract(&self, note_range: u8) -> Sequence {
        let range = note_range as i16;
        let lower = (EXTRACT_CENTER - range).max(0);
        let upper = (EXTRACT_CENTER + range).min(127);
        trace!(
            "extracting notes strictly between {} and {} from {} messages",
            lower,
            upper,
            self.len()
        );
        self.iter()
            .filter(|msg| match **msg {
                Message::NoteOn { note, .. } | Message::NoteOff { note, .. } => {
                    lower < note && note < upper
                }
                Message::SetTempo { .. }
                | Message::TimeSignature { .. }
                | Message::ControlChange { .. }
                | Message::PitchWheel { .. }
                | Message::AfterTouch { .. }
                | Message::PolyTouch { .. }
                | Message::ProgramChange { .. } => false,
            })
            .copied()
            .collect()
    }

    fn scale_duration(&self, factor: Time) -> Sequence {
        trace!("scaling the times of {} messages by {}", self.len(), factor);
        self.iter()
            .map(|&msg| msg.map_time(|t| t * factor))
            .collect()
    }

    fn set_tempo(&self, tempo: u32) -> Sequence {
        trace!("setting the tempo of {} messages to {}", self.len(), tempo);
        self.iter()
            .map(|&msg| match msg {
                Message::SetTempo { time, .. } => Message::SetTempo { tempo, time },
                Message::NoteOn { .. }
                | Message::NoteOff { .. }
                | Message::TimeSignature { .. }
                | Message::ControlChange { .. }
                | Message::PitchWheel { .. }
                | Message::AfterTouch { .. }
                | Message::PolyTouch { .. }
                | Message::ProgramChange { .. } => msg,
            })
            .collect()
    }

    fn remap_instruments(&self, channel: u4) -> Sequence {
        trace!(
            "remapping instruments of {} messages (channel {} requested)",
            self.len(),
            channel
        );
        self.iter()
            .map(|&msg| match msg {
                Message::ControlChange {
                    channel,
                    control,
                    value,
                    time,
                } => Message::ControlChange {
                    channel,
                    control,
                    value: instrument::next_in_group(value),
                    time,
                },
                Message::NoteOn { .. }
                | Message::NoteOff { .. }
                | Message::SetTempo { .. }
                | Message::TimeSignature { .. }
                | Message::PitchWheel { .. }
                | Message::AfterTouch { .. }
                | Message::PolyTouch { .. }
                | Message::ProgramChange { .. } => msg,
            })
            .collect()
    }

    fn bpm(&self) -> u32 {
        let mut bpm = 0;
        for msg in self {
            match *msg {
                Message::SetTempo { tempo, .. } => bpm = tempo,
                Message::NoteOn { .. }
                | Message::NoteOff { .. }
                | Message::TimeSignature { .. }
                | Message::ControlChange { .. }
                | Message::PitchWheel { .. }
                | Message::AfterTouch { .. }
                | Message::PolyTouch { .. }
                | Message::ProgramChange { .. } => {}
            }
        }
        bpm
    }

    fn generate_harmony(&self, steps: i32, tonic: PitchClass, mode: Mode) -> Sequence {
        let direction = if steps < 0 {
            Direction::Up
        } else {
            Direction::Down
        };
        let distance = steps.unsigned_abs();
        trace!(
            "harmonizing {} messages {} degrees {:?} in {} {:?}",
            self.len(),
            distance,
            direction,
            tonic.name(),
            mode
        );
        let mut out = Vec::with_capacity(self.len() * 2);
        for &msg in self {
            match msg {
                Message::NoteOn {
                    channel,
                    note,
                    vel,
                    time,
                } => {
                    let voiced = theory::modal_transposition(
                        PitchClass::from_note(note),
                        tonic,
                        mode.steps(),
                        distance,
                        direction,
                    );
                    out.push(Message::NoteOn {
                        channel,
                        note: voiced,
                        vel,
                        time,
                    });
                    out.push(msg);
                }
                Message::NoteOff {
                    channel,
                    note,
                    vel,
                    time,
                } => {
                    out.push(Message::NoteOff {
                        channel,
                        note: shift_note(note, steps),
                        vel,
                        time,
                    });
                    out.push(msg);
                }
                Message::SetTempo { .. }
                | Message::TimeSignature { .. }
                | Message::ControlChange { .. }
                | Message::PitchWheel { .. }
                | Message::AfterTouch { .. }
                | Message::PolyTouch { .. }
                | Message::ProgramChange { .. } => out.push(msg),
            }
        }
        Sequence::from(out)
    }

    fn arpeggiate_chords(&self, pattern: ArpeggioPattern) -> Result<Sequence> {
        debug!(
            "refusing to arpeggiate {} messages with pattern {:?}",
            self.len(),
            pattern
        );
        Err(Error::Unsupported("chord arpeggiation"))
    }

    fn edit_dynamics(&self, curve: &VelocityCurve) -> Sequence {
        trace!(
            "shaping the dynamics of {} messages over {:?}",
            self.len(),
            curve.span()
        );
        self.iter()
            .map(|&msg| match msg {
                Message::NoteOn {
                    channel,
                    note,
                    vel,
                    time,
                } => Message::NoteOn {
                    channel,
                    note,
                    vel: curve.sample(time).unwrap_or(vel),
                    time,
                },
                Message::NoteOff {
                    channel,
                    note,
                    vel,
                    time,
                } => Message::NoteOff {
                    channel,
                    note,
                    vel: curve.sample(time).unwrap_or(vel),
                    time,
                },
                Message::SetTempo { .. }
                | Message::TimeSignature { .. }
                | Message::ControlChange { .. }
                | Message::PitchWheel { .. }
                | Message::AfterTouch { .. }
                | Message::PolyTouch { .. }
                | Message::ProgramChange { .. } => msg,
            })
            .collect()
    }
}

/// Plain semitone arithmetic, saturating at the bounds of the note type.
fn shift_note(note: i16, semitones: i32) -> i16 {
    let shifted = (note as i32).saturating_add(semitones);
    shifted.max(i16::MIN as i32).min(i16::MAX as i32) as i16
}
