use std::io;

/// Represents an error while editing or encoding a MIDI sequence.
///
/// Transforms themselves are total (except for
/// [`arpeggiate_chords`](trait.Transform.html#tymethod.arpeggiate_chords)), so most of these
/// errors come from validation and from the Standard Midi File bridge.
///
/// Arithmetic that leaves the MIDI value ranges (for example transposing a note above 127) is
/// *not* an error by itself: transforms never check it. Use
/// [`Sequence::validate`](struct.Sequence.html#method.validate) to find such notes, or enable the
/// `strict` feature to have track encoding reject them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested operation is not supported by this engine.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// A note number left the `0..=127` range, usually after transposition.
    #[error("note {note} of message {index} is outside the midi range 0..=127")]
    NoteOutOfRange {
        /// Position of the offending message in its sequence.
        index: usize,
        /// The out-of-range note number.
        note: i16,
    },

    /// A message is timestamped before the message preceding it, so no delta time can represent
    /// it in a track.
    #[error("message {index} happens before the message preceding it")]
    OutOfOrder {
        /// Position of the offending message in its sequence.
        index: usize,
    },

    /// The gap between a message and the one preceding it does not fit a 28-bit delta time.
    #[error("message {index} is too far from the message preceding it")]
    DeltaOverflow {
        /// Position of the offending message in its sequence.
        index: usize,
    },

    /// A time signature denominator that is not a power of two cannot be encoded.
    #[error("time signature of message {index} has denominator {denominator}, which is not a power of two")]
    InvalidTimeSignature {
        /// Position of the offending message in its sequence.
        index: usize,
        /// The real denominator, as stored in the message.
        denominator: u8,
    },

    /// A tempo does not fit the 24 bits of a tempo meta event.
    #[error("tempo {tempo} of message {index} does not fit in 24 bits")]
    TempoOutOfRange {
        /// Position of the offending message in its sequence.
        index: usize,
        /// The out-of-range tempo.
        tempo: u32,
    },

    /// Only metrical (ticks per beat) timing can be mapped onto beat-based time.
    #[error("timecode-based midi timing is not supported")]
    UnsupportedTiming,

    /// A pitch name could not be parsed.
    #[error("invalid pitch name")]
    InvalidPitchName,

    /// The underlying midi decoder failed.
    #[error("midi decoding failed: {0}")]
    Midi(#[from] midly::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether this error is the hard refusal of an unimplemented operation.
    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported(_))
    }
}

/// The result type used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
