//! The General MIDI instrument set.
//!
//! General MIDI arranges its 128 programs into 16 families of 8 related instruments.
//! [`next_in_group`](fn.next_in_group.html) cycles through a family, which is what
//! [`Transform::remap_instruments`](../trait.Transform.html#tymethod.remap_instruments) uses.

use crate::prelude::*;

/// Amount of programs in each family.
pub const GROUP_SIZE: u8 = 8;

static NAMES: [&str; 128] = [
    // Piano
    "Acoustic Grand Piano",
    "Bright Acoustic Piano",
    "Electric Grand Piano",
    "Honky-tonk Piano",
    "Electric Piano 1",
    "Electric Piano 2",
    "Harpsichord",
    "Clavinet",
    // Chromatic percussion
    "Celesta",
    "Glockenspiel",
    "Music Box",
    "Vibraphone",
    "Marimba",
    "Xylophone",
    "Tubular Bells",
    "Dulcimer",
    // Organ
    "Drawbar Organ",
    "Percussive Organ",
    "Rock Organ",
    "Church Organ",
    "Reed Organ",
    "Accordion",
    "Harmonica",
    "Tango Accordion",
    // Guitar
    "Acoustic Guitar (nylon)",
    "Acoustic Guitar (steel)",
    "Electric Guitar (jazz)",
    "Electric Guitar (clean)",
    "Electric Guitar (muted)",
    "Overdriven Guitar",
    "Distortion Guitar",
    "Guitar Harmonics",
    // Bass
    "Acoustic Bass",
    "Electric Bass (finger)",
    "Electric Bass (pick)",
    "Fretless Bass",
    "Slap Bass 1",
    "Slap Bass 2",
    "Synth Bass 1",
    "Synth Bass 2",
    // Strings
    "Violin",
    "Viola",
    "Cello",
    "Contrabass",
    "Tremolo Strings",
    "Pizzicato Strings",
    "Orchestral Harp",
    "Timpani",
    // Ensemble
    "String Ensemble 1",
    "String Ensemble 2",
    "Synth Strings 1",
    "Synth Strings 2",
    "Choir Aahs",
    "Voice Oohs",
    "Synth Voice",
    "Orchestra Hit",
    // Brass
    "Trumpet",
    "Trombone",
    "Tuba",
    "Muted Trumpet",
    "French Horn",
    "Brass Section",
    "Synth Brass 1",
    "Synth Brass 2",
    // Reed
    "Soprano Sax",
    "Alto Sax",
    "Tenor Sax",
    "Baritone Sax",
    "Oboe",
    "English Horn",
    "Bassoon",
    "Clarinet",
    // Pipe
    "Piccolo",
    "Flute",
    "Recorder",
    "Pan Flute",
    "Blown Bottle",
    "Shakuhachi",
    "Whistle",
    "Ocarina",
    // Synth lead
    "Lead 1 (square)",
    "Lead 2 (sawtooth)",
    "Lead 3 (calliope)",
    "Lead 4 (chiff)",
    "Lead 5 (charang)",
    "Lead 6 (voice)",
    "Lead 7 (fifths)",
    "Lead 8 (bass + lead)",
    // Synth pad
    "Pad 1 (new age)",
    "Pad 2 (warm)",
    "Pad 3 (polysynth)",
    "Pad 4 (choir)",
    "Pad 5 (bowed)",
    "Pad 6 (metallic)",
    "Pad 7 (halo)",
    "Pad 8 (sweep)",
    // Synth effects
    "FX 1 (rain)",
    "FX 2 (soundtrack)",
    "FX 3 (crystal)",
    "FX 4 (atmosphere)",
    "FX 5 (brightness)",
    "FX 6 (goblins)",
    "FX 7 (echoes)",
    "FX 8 (sci-fi)",
    // Ethnic
    "Sitar",
    "Banjo",
    "Shamisen",
    "Koto",
    "Kalimba",
    "Bagpipe",
    "Fiddle",
    "Shanai",
    // Percussive
    "Tinkle Bell",
    "Agogo",
    "Steel Drums",
    "Woodblock",
    "Taiko Drum",
    "Melodic Tom",
    "Synth Drum",
    "Reverse Cymbal",
    // Sound effects
    "Guitar Fret Noise",
    "Breath Noise",
    "Seashore",
    "Bird Tweet",
    "Telephone Ring",
    "Helicopter",
    "Applause",
    "Gunshot",
];

/// The 16 General MIDI instrument families, in program order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum InstrumentFamily {
    Piano,
    ChromaticPercussion,
    Organ,
    Guitar,
    Bass,
    Strings,
    Ensemble,
    Brass,
    Reed,
    Pipe,
    SynthLead,
    SynthPad,
    SynthEffects,
    Ethnic,
    Percussive,
    SoundEffects,
}

impl InstrumentFamily {
    const ALL: [InstrumentFamily; 16] = [
        InstrumentFamily::Piano,
        InstrumentFamily::ChromaticPercussion,
        InstrumentFamily::Organ,
        InstrumentFamily::Guitar,
        InstrumentFamily::Bass,
        InstrumentFamily::Strings,
        InstrumentFamily::Ensemble,
        InstrumentFamily::Brass,
        InstrumentFamily::Reed,
        InstrumentFamily::Pipe,
        InstrumentFamily::SynthLead,
        InstrumentFamily::SynthPad,
        InstrumentFamily::SynthEffects,
        InstrumentFamily::Ethnic,
        InstrumentFamily::Percussive,
        InstrumentFamily::SoundEffects,
    ];

    /// The first program of the family.
    #[inline]
    pub fn first_program(self) -> u7 {
        u7::new(self as u8 * GROUP_SIZE)
    }

    /// All programs of the family, in order.
    pub fn programs(self) -> impl Iterator<Item = u7> {
        let first = self.first_program().as_int();
        (first..first + GROUP_SIZE).map(u7::new)
    }
}

/// The family a program belongs to.
#[inline]
pub fn family(program: u7) -> InstrumentFamily {
    InstrumentFamily::ALL[(program.as_int() / GROUP_SIZE) as usize]
}

/// The General MIDI name of a program.
#[inline]
pub fn instrument_name(program: u7) -> &'static str {
    NAMES[program.as_int() as usize]
}

/// Looks up a program by its General MIDI name, ignoring ASCII case.
pub fn find_program(name: &str) -> Option<u7> {
    let name = name.trim();
    NAMES
        .iter()
        .position(|known| known.eq_ignore_ascii_case(name))
        .map(|idx| u7::new(idx as u8))
}

/// The next instrument of the same family, wrapping from the last one back to the first.
#[inline]
pub fn next_in_group(program: u7) -> u7 {
    let program = program.as_int();
    let first = program - program % GROUP_SIZE;
    u7::new(first + (program + 1) % GROUP_SIZE)
}
