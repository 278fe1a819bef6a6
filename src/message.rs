//! The closed set of MIDI messages a sequence is made of.

use crate::prelude::*;

/// A single timestamped MIDI event.
///
/// Channel messages always carry a [`Time`](struct.Time.html).
/// The two meta messages, `SetTempo` and `TimeSignature`, carry an *optional* time: an absent
/// time is distinct from a time of zero and stays absent through every transform.
///
/// Note numbers are plain signed integers rather than 7-bit values, so that the results of
/// note arithmetic remain visible even when they leave the MIDI range.
/// See [`Sequence::validate`](struct.Sequence.html#method.validate).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Message {
    /// Start playing a note.
    NoteOn {
        /// The MIDI channel of the note.
        channel: u4,
        /// The note number, middle C being 60.
        note: i16,
        /// The velocity (strength) with which to press it.
        vel: u7,
        time: Time,
    },
    /// Stop playing a note.
    NoteOff {
        channel: u4,
        /// The note number to stop playing.
        note: i16,
        /// The velocity with which to release it.
        vel: u7,
        time: Time,
    },
    /// Change the tempo of the stream.
    SetTempo {
        /// The tempo value.
        ///
        /// The engine treats this value as opaque: it may be a BPM-equivalent or, when read from
        /// a Standard Midi File, microseconds per beat.
        tempo: u32,
        time: Option<Time>,
    },
    /// Change the time signature of the stream.
    TimeSignature {
        numerator: u8,
        /// The real denominator, such as 4 or 8 (not its logarithm).
        denominator: u8,
        /// MIDI clocks per metronome click.
        clocks_per_click: u8,
        time: Option<Time>,
    },
    /// Modify the value of a MIDI controller.
    ControlChange {
        channel: u4,
        /// The controller to modify.
        control: u7,
        /// The value to set it to.
        value: u7,
        time: Time,
    },
    /// Set the pitch bend value for the entire channel.
    PitchWheel {
        channel: u4,
        /// The raw 14-bit bend, `0x2000` being centered.
        pitch: u14,
        time: Time,
    },
    /// Change the pressure of a whole channel at once.
    AfterTouch { channel: u4, value: u7, time: Time },
    /// Change the pressure of a single playing note.
    PolyTouch {
        channel: u4,
        note: i16,
        value: u7,
        time: Time,
    },
    /// Change the program (also known as instrument) of a channel.
    ProgramChange {
        channel: u4,
        program: u7,
        time: Time,
    },
}

impl Message {
    /// The time at which this message happens, if it has one.
    ///
    /// Channel messages always return `Some`.
    pub fn time(&self) -> Option<Time> {
        match *self {
            Message::NoteOn { time, .. }
            | Message::NoteOff { time, .. }
            | Message::ControlChange { time, .. }
            | Message::PitchWheel { time, .. }
            | Message::AfterTouch { time, .. }
            | Message::PolyTouch { time, .. }
            | Message::ProgramChange { time, .. } => Some(time),
            Message::SetTempo { time, .. } | Message::TimeSignature { time, .. } => time,
        }
    }

    /// Returns a copy of this message with `f` applied to its time.
    ///
    /// Absent optional times stay absent and `f` is not called for them.
    pub fn map_time<F: FnOnce(Time) -> Time>(self, f: F) -> Message {
        match self {
            Message::NoteOn {
                channel,
                note,
                vel,
                time,
            } => Message::NoteOn {
                channel,
                note,
                vel,
                time: f(time),
            },
            Message::NoteOff {
                channel,
                note,
                vel,
                time,
            } => Message::NoteOff {
                channel,
                note,
                vel,
                time: f(time),
            },
            Message::SetTempo { tempo, time } => Message::SetTempo {
                tempo,
                time: time.map(f),
            },
            Message::TimeSignature {
                numerator,
                denominator,
                clocks_per_click,
                time,
            } => Message::TimeSignature {
                numerator,
                denominator,
                clocks_per_click,
                time: time.map(f),
            },
            Message::ControlChange {
                channel,
                control,
                value,
                time,
            } => Message::ControlChange {
                channel,
                control,
                value,
                time: f(time),
            },
            Message::PitchWheel {
                channel,
                pitch,
                time,
            } => Message::PitchWheel {
                channel,
                pitch,
                time: f(time),
            },
            Message::AfterTouch {
                channel,
                value,
                time,
            } => Message::AfterTouch {
                channel,
                value,
                time: f(time),
            },
            Message::PolyTouch {
                channel,
                note,
                value,
                time,
            } => Message::PolyTouch {
                channel,
                note,
                value,
                time: f(time),
            },
            Message::ProgramChange {
                channel,
                program,
                time,
            } => Message::ProgramChange {
                channel,
                program,
                time: f(time),
            },
        }
    }

    /// The channel this message is addressed to, or `None` for meta messages.
    pub fn channel(&self) -> Option<u4> {
        match *self {
            Message::NoteOn { channel, .. }
            | Message::NoteOff { channel, .. }
            | Message::ControlChange { channel, .. }
            | Message::PitchWheel { channel, .. }
            | Message::AfterTouch { channel, .. }
            | Message::PolyTouch { channel, .. }
            | Message::ProgramChange { channel, .. } => Some(channel),
            Message::SetTempo { .. } | Message::TimeSignature { .. } => None,
        }
    }

    /// The note number carried by `NoteOn`, `NoteOff` and `PolyTouch` messages.
    pub fn note(&self) -> Option<i16> {
        match *self {
            Message::NoteOn { note, .. }
            | Message::NoteOff { note, .. }
            | Message::PolyTouch { note, .. } => Some(note),
            Message::SetTempo { .. }
            | Message::TimeSignature { .. }
            | Message::ControlChange { .. }
            | Message::PitchWheel { .. }
            | Message::AfterTouch { .. }
            | Message::ProgramChange { .. } => None,
        }
    }

    /// The velocity of `NoteOn` and `NoteOff` messages.
    pub fn velocity(&self) -> Option<u7> {
        match *self {
            Message::NoteOn { vel, .. } | Message::NoteOff { vel, .. } => Some(vel),
            Message::SetTempo { .. }
            | Message::TimeSignature { .. }
            | Message::ControlChange { .. }
            | Message::PitchWheel { .. }
            | Message::AfterTouch { .. }
            | Message::PolyTouch { .. }
            | Message::ProgramChange { .. } => None,
        }
    }

    /// Whether this is a `NoteOn` or `NoteOff` message.
    #[inline]
    pub fn is_note(&self) -> bool {
        matches!(self, Message::NoteOn { .. } | Message::NoteOff { .. })
    }

    /// Whether this is one of the two meta messages, whose time is optional.
    #[inline]
    pub fn is_meta(&self) -> bool {
        matches!(self, Message::SetTempo { .. } | Message::TimeSignature { .. })
    }
}
