//! Bridge between sequences and Standard Midi Files, through `midly`.

use crate::prelude::*;
use log::{trace, warn};
use midly::{
    num::{u24, u28},
    Format, Header, MetaMessage, MidiMessage, PitchBend, Smf, Timing, Track, TrackEvent,
    TrackEventKind,
};
use std::{io, path::Path};

/// Songs with fewer messages than this are always mapped on the calling thread.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 4 * 1024;

/// MIDI files only carry the power-of-two of the denominator, and this many 32nd notes per beat.
const THIRTY_SECONDS_PER_BEAT: u8 = 8;

/// A set of sequences sharing one tick resolution, as stored in a Standard Midi File.
///
/// Only the messages [`Message`](enum.Message.html) can represent survive reading: text,
/// SysEx and other meta events are dropped.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Song {
    /// Resolution used when converting between beats and ticks.
    pub ticks_per_beat: u15,
    pub tracks: Vec<Sequence>,
}

impl Song {
    pub fn new(ticks_per_beat: u15, tracks: Vec<Sequence>) -> Song {
        Song {
            ticks_per_beat,
            tracks,
        }
    }

    /// Decodes a Standard Midi File.
    pub fn parse(raw: &[u8]) -> Result<Song> {
        let smf = Smf::parse(raw)?;
        Song::from_smf(&smf)
    }

    /// Converts a parsed `midly` file into sequences of absolute, beat-based times.
    ///
    /// Only metrical timing is supported.
    pub fn from_smf(smf: &Smf) -> Result<Song> {
        let ticks_per_beat = match smf.header.timing {
            Timing::Metrical(tpb) if tpb.as_int() > 0 => tpb,
            _ => bail!(Error::UnsupportedTiming),
        };
        let tracks = smf
            .tracks
            .iter()
            .map(|track| read_track(track, ticks_per_beat.as_int()))
            .collect();
        Ok(Song {
            ticks_per_beat,
            tracks,
        })
    }

    /// Encodes every sequence as a track of a `midly` file.
    ///
    /// A single sequence produces a single-track file, several produce a parallel file.
    pub fn to_smf(&self) -> Result<Smf<'static>> {
        let format = if self.tracks.len() == 1 {
            Format::SingleTrack
        } else {
            Format::Parallel
        };
        let tracks = self
            .tracks
            .iter()
            .map(|seq| write_track(seq, self.ticks_per_beat.as_int()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Smf {
            header: Header::new(format, Timing::Metrical(self.ticks_per_beat)),
            tracks,
        })
    }

    /// Encodes the song and writes it to the given writer.
    pub fn write<W: io::Write>(&self, out: W) -> Result<()> {
        self.to_smf()?.write_std(out)?;
        Ok(())
    }

    /// Encodes the song and saves it at the given path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_smf()?.save(path)?;
        Ok(())
    }

    /// Applies `f` to every track, returning the transformed song.
    ///
    /// Large songs are processed in parallel if the `parallel` feature is enabled.
    pub fn map<F>(&self, f: F) -> Song
    where
        F: Fn(&Sequence) -> Sequence + Send + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            if self.use_multithreading() {
                use rayon::prelude::*;

                let tracks = self.tracks.par_iter().map(|seq| f(seq)).collect();
                return Song::new(self.ticks_per_beat, tracks);
            }
        }
        let tracks = self.tracks.iter().map(|seq| f(seq)).collect();
        Song::new(self.ticks_per_beat, tracks)
    }

    /// Applies a fallible `f` to every track, stopping at the first error.
    pub fn try_map<F>(&self, f: F) -> Result<Song>
    where
        F: Fn(&Sequence) -> Result<Sequence> + Send + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            if self.use_multithreading() {
                use rayon::prelude::*;

                let tracks = self
                    .tracks
                    .par_iter()
                    .map(|seq| f(seq))
                    .collect::<Result<Vec<_>>>()?;
                return Ok(Song::new(self.ticks_per_beat, tracks));
            }
        }
        let tracks = self
            .tracks
            .iter()
            .map(|seq| f(seq))
            .collect::<Result<Vec<_>>>()?;
        Ok(Song::new(self.ticks_per_beat, tracks))
    }

    #[cfg(feature = "parallel")]
    fn use_multithreading(&self) -> bool {
        let messages: usize = self.tracks.iter().map(|seq| seq.len()).sum();
        self.tracks.len() > 1 && messages >= PARALLEL_THRESHOLD
    }
}

fn read_track(track: &[TrackEvent], ticks_per_beat: u16) -> Sequence {
    let mut ticks: u64 = 0;
    let mut messages = Vec::with_capacity(track.len());
    for (index, ev) in track.iter().enumerate() {
        ticks += ev.delta.as_int() as u64;
        let time = Time::from_ticks(ticks, ticks_per_beat).unwrap_or_default();
        let msg = match ev.kind {
            TrackEventKind::Midi { channel, message } => match message {
                MidiMessage::NoteOff { key, vel } => Message::NoteOff {
                    channel,
                    note: key.as_int() as i16,
                    vel,
                    time,
                },
                MidiMessage::NoteOn { key, vel } => Message::NoteOn {
                    channel,
                    note: key.as_int() as i16,
                    vel,
                    time,
                },
                MidiMessage::Aftertouch { key, vel } => Message::PolyTouch {
                    channel,
                    note: key.as_int() as i16,
                    value: vel,
                    time,
                },
                MidiMessage::Controller { controller, value } => Message::ControlChange {
                    channel,
                    control: controller,
                    value,
                    time,
                },
                MidiMessage::ProgramChange { program } => Message::ProgramChange {
                    channel,
                    program,
                    time,
                },
                MidiMessage::ChannelAftertouch { vel } => Message::AfterTouch {
                    channel,
                    value: vel,
                    time,
                },
                MidiMessage::PitchBend { bend } => Message::PitchWheel {
                    channel,
                    pitch: bend.0,
                    time,
                },
            },
            TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => Message::SetTempo {
                tempo: tempo.as_int(),
                time: Some(time),
            },
            TrackEventKind::Meta(MetaMessage::TimeSignature(numerator, power, clocks, _)) => {
                match 1u8.checked_shl(power as u32) {
                    Some(denominator) => Message::TimeSignature {
                        numerator,
                        denominator,
                        clocks_per_click: clocks,
                        time: Some(time),
                    },
                    None => {
                        warn!(
                            "dropping event {}: time signature denominator 2^{} is too large",
                            index, power
                        );
                        continue;
                    }
                }
            }
            other => {
                trace!("dropping event {}: {:?}", index, other);
                continue;
            }
        };
        messages.push(msg);
    }
    Sequence::from(messages)
}

fn write_track(seq: &Sequence, ticks_per_beat: u16) -> Result<Track<'static>> {
    let mut cursor: i64 = 0;
    let mut track = Vec::with_capacity(seq.len() + 1);
    for (index, msg) in seq.iter().enumerate() {
        let ticks = match msg.time() {
            Some(time) => time.to_ticks(ticks_per_beat),
            None => cursor,
        };
        ensure!(ticks >= cursor, Error::OutOfOrder { index });
        let delta = u32::try_from(ticks - cursor)
            .ok()
            .filter(|&delta| delta <= u28::max_value().as_int())
            .ok_or(Error::DeltaOverflow { index })?;
        cursor = ticks;

        let kind = match *msg {
            Message::NoteOn {
                channel,
                note,
                vel,
                time: _,
            } => TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn {
                    key: encode_note(index, note)?,
                    vel,
                },
            },
            Message::NoteOff {
                channel,
                note,
                vel,
                time: _,
            } => TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff {
                    key: encode_note(index, note)?,
                    vel,
                },
            },
            Message::SetTempo { tempo, time: _ } => {
                TrackEventKind::Meta(MetaMessage::Tempo(encode_tempo(index, tempo)?))
            }
            Message::TimeSignature {
                numerator,
                denominator,
                clocks_per_click,
                time: _,
            } => TrackEventKind::Meta(MetaMessage::TimeSignature(
                numerator,
                encode_denominator(index, denominator)?,
                clocks_per_click,
                THIRTY_SECONDS_PER_BEAT,
            )),
            Message::ControlChange {
                channel,
                control,
                value,
                time: _,
            } => TrackEventKind::Midi {
                channel,
                message: MidiMessage::Controller {
                    controller: control,
                    value,
                },
            },
            Message::PitchWheel {
                channel,
                pitch,
                time: _,
            } => TrackEventKind::Midi {
                channel,
                message: MidiMessage::PitchBend {
                    bend: PitchBend(pitch),
                },
            },
            Message::AfterTouch {
                channel,
                value,
                time: _,
            } => TrackEventKind::Midi {
                channel,
                message: MidiMessage::ChannelAftertouch { vel: value },
            },
            Message::PolyTouch {
                channel,
                note,
                value,
                time: _,
            } => TrackEventKind::Midi {
                channel,
                message: MidiMessage::Aftertouch {
                    key: encode_note(index, note)?,
                    vel: value,
                },
            },
            Message::ProgramChange {
                channel,
                program,
                time: _,
            } => TrackEventKind::Midi {
                channel,
                message: MidiMessage::ProgramChange { program },
            },
        };
        track.push(TrackEvent {
            delta: u28::from(delta),
            kind,
        });
    }
    track.push(TrackEvent {
        delta: u28::from(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    Ok(track)
}

fn encode_note(index: usize, note: i16) -> Result<u7> {
    if (0..=127).contains(&note) {
        return Ok(u7::new(note as u8));
    }
    ensure!(
        !cfg!(feature = "strict"),
        Error::NoteOutOfRange { index, note }
    );
    warn!("masking out-of-range note {} of message {}", note, index);
    Ok(u7::from(note as u8))
}

fn encode_tempo(index: usize, tempo: u32) -> Result<u24> {
    if let Some(tempo) = u24::try_from(tempo) {
        return Ok(tempo);
    }
    ensure!(
        !cfg!(feature = "strict"),
        Error::TempoOutOfRange { index, tempo }
    );
    warn!(
        "clamping out-of-range tempo {} of message {} to {}",
        tempo,
        index,
        u24::max_value()
    );
    Ok(u24::max_value())
}

fn encode_denominator(index: usize, denominator: u8) -> Result<u8> {
    if denominator.is_power_of_two() {
        return Ok(denominator.trailing_zeros() as u8);
    }
    ensure!(
        !cfg!(feature = "strict"),
        Error::InvalidTimeSignature { index, denominator }
    );
    let power = if denominator == 0 {
        0
    } else {
        7 - denominator.leading_zeros() as u8
    };
    warn!(
        "flooring time signature denominator {} of message {} to {}",
        denominator,
        index,
        1u32 << power
    );
    Ok(power)
}
