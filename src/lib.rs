//! # Overview
//!
//! `midiseq` edits MIDI message sequences the way a musician thinks about them: transpose,
//! reverse, quantize, scale, re-tempo, re-voice and re-shape dynamics.
//! Every edit is a pure function; the input sequence is left untouched and a freshly allocated
//! [`Sequence`](struct.Sequence.html) is returned.
//!
//! ```rust
//! use midiseq::{num::u4, num::u7, Message, Sequence, Time, Transform};
//!
//! let seq = Sequence::new()
//!     .append(Message::NoteOn {
//!         channel: u4::new(0),
//!         note: 60,
//!         vel: u7::new(100),
//!         time: Time::ZERO,
//!     })
//!     .append(Message::NoteOff {
//!         channel: u4::new(0),
//!         note: 60,
//!         vel: u7::new(0),
//!         time: Time::ONE,
//!     });
//!
//! let up = seq.transpose(2);
//! assert_eq!(up[0].note(), Some(62));
//! assert_eq!(seq[0].note(), Some(60));
//! ```
//!
//! # Transforms
//!
//! All operations live on the [`Transform`](trait.Transform.html) trait, which is implemented
//! for message slices. Since `Sequence` dereferences to `[Message]`, transforms can be called
//! directly on sequences, vectors and slices alike, and chained:
//!
//! ```rust
//! # use midiseq::{Sequence, Time, Transform};
//! # let seq = Sequence::new();
//! let edited = seq.transpose(-12).quantize(4).scale_duration(Time::from_beats(2));
//! # assert!(edited.is_empty());
//! ```
//!
//! # About time
//!
//! Timestamps are [`Time`](struct.Time.html) values: signed fixed-point numbers of beats.
//! Arithmetic on them is exact and saturating, so repeatedly scaling, quantizing and reversing a
//! sequence never accumulates floating point drift.
//!
//! Tempo and time signature messages carry an *optional* time. An absent time stays absent
//! through every transform.
//!
//! # Reading and writing files
//!
//! Standard Midi Files are read and written through the `midly` crate, see
//! [`Song`](struct.Song.html):
//!
//! ```rust,no_run
//! use midiseq::{Song, Transform};
//!
//! let song = Song::parse(&std::fs::read("in.mid")?)?;
//! let song = song.map(|track| track.transpose(3));
//! song.save("out.mid")?;
//! # Ok::<(), midiseq::Error>(())
//! ```
//!
//! # About features
//!
//! - The `parallel` feature (enabled by default) lets [`Song::map`](struct.Song.html#method.map)
//!   process the tracks of large songs on multiple threads through `rayon`.
//!
//! - The `strict` feature makes track encoding reject notes outside `0..=127` and time signatures
//!   whose denominator is not a power of two, instead of repairing them.

macro_rules! bail {
    ($err:expr) => {{
        return Err($err.into());
    }};
}
macro_rules! ensure {
    ($cond:expr, $err:expr) => {{
        if !$cond {
            bail!($err)
        }
    }};
}

/// All of the errors this crate produces.
mod error;

mod prelude {
    pub(crate) use crate::{
        error::{Error, Result},
        message::Message,
        sequence::Sequence,
        time::Time,
    };
    pub(crate) use core::{convert::TryFrom, fmt, ops};
    pub(crate) use midly::num::{u14, u15, u4, u7};
}

mod curve;
pub mod instrument;
mod message;
mod sequence;
mod smf;
pub mod theory;
mod time;
mod transform;

pub use crate::{
    curve::VelocityCurve,
    error::{Error, Result},
    message::Message,
    sequence::Sequence,
    smf::Song,
    theory::{Direction, Mode, PitchClass},
    time::Time,
    transform::{ArpeggioPattern, Transform},
};

/// Restricted integers used by MIDI message fields, re-exported from `midly`.
pub mod num {
    pub use midly::num::{u14, u15, u4, u7};
}
