// muzik -- procedurally synthesized chords as raw PCM
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The fixed pieces that can be rendered, and how a piece turns into a single wave.

use log::debug;

use crate::generator::{render, Voice};
use crate::note::{ChordFormula, Note, OCTAVE};
use crate::oscillator::Oscillator;
use crate::tuning::Tuning;
use crate::wave::{mix_all, samples_for_millis, try_combine_all, SampleBuffer, WaveError};

/// How long each chord of the default progression is held.
pub const NOTE_DURATION_MILLIS: usize = 1200;

/// Volume of each single note. Four simultaneous notes stay within the 16 bit range.
pub const VOLUME: f64 = 0.2;

/// The chord progression, as fundamental and kind of chord.
pub static CHORDS: [(Note, ChordFormula); 16] = [
    (Note::A, ChordFormula::MAJOR),
    (Note::A, ChordFormula::MAJOR),
    (Note::E, ChordFormula::MAJOR),
    (Note::E, ChordFormula::MAJOR),
    (Note::E, ChordFormula::MAJOR7),
    (Note::E, ChordFormula::MAJOR7),
    (Note::A, ChordFormula::MAJOR),
    (Note::A, ChordFormula::MAJOR),
    (Note::A, ChordFormula::MAJOR),
    (Note::A, ChordFormula::MAJOR),
    (Note::D, ChordFormula::MAJOR),
    (Note::D, ChordFormula::MAJOR),
    (Note::A, ChordFormula::MAJOR),
    (Note::E, ChordFormula::MAJOR),
    (Note::A, ChordFormula::MAJOR),
    (Note::A, ChordFormula::MAJOR),
];

/// One octave of the major scale, played note by note.
pub static SCALE: [Note; 8] = [
    Note::C,
    Note::D,
    Note::E,
    Note::F,
    Note::G,
    Note::A,
    Note::B,
    Note::C.transpose(OCTAVE),
];

/// A piece of music: chords played one after the other, all notes of a chord at the same time.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub chords: Vec<Vec<Note>>,
    /// Duration of every chord.
    pub note_millis: usize,
    pub voice: Voice,
    /// Volume of each individual note.
    pub volume: f64,
    pub tuning: Tuning,
}

impl Composition {
    /// The [`CHORDS`] progression with fading sine notes.
    pub fn chords() -> Self {
        Composition {
            chords: CHORDS
                .iter()
                .map(|&(fundamental, formula)| formula.chord(fundamental))
                .collect(),
            note_millis: NOTE_DURATION_MILLIS,
            voice: Voice::default(),
            volume: VOLUME,
            tuning: Tuning::default(),
        }
    }

    /// The [`SCALE`], one note at a time.
    pub fn scale() -> Self {
        Composition {
            chords: SCALE.iter().map(|&note| vec![note]).collect(),
            ..Composition::chords()
        }
    }

    /// A single tone of `frequency`, held for `millis`.
    ///
    /// # Examples
    ///
    /// ```
    /// use muzik::generator::Voice;
    /// use muzik::oscillator::Oscillator;
    /// use muzik::song::Composition;
    ///
    /// let tone = Composition::tone(220.0, 500, Voice::plain(Oscillator::Sine));
    /// let wave = tone.render().unwrap();
    /// assert_eq!(wave.duration(), Ok(22050));
    /// ```
    pub fn tone(frequency: f64, millis: usize, voice: Voice) -> Self {
        Composition {
            chords: vec![vec![Note(0)]],
            note_millis: millis,
            voice,
            volume: 1.0,
            tuning: Tuning {
                reference_frequency: frequency,
            },
        }
    }

    /// Ten seconds of a frequency modulated 220 Hz tone.
    pub fn fm_tone() -> Self {
        let fm = Oscillator::Fm {
            modulation_index: 0.01,
            modulation_frequency: 10.0,
        };
        Composition::tone(220.0, 10_000, Voice::plain(fm))
    }

    /// Number of samples per channel that [`Composition::render`] will produce.
    pub fn duration_samples(&self) -> usize {
        let chord_samples = samples_for_millis(self.note_millis);
        self.chords
            .iter()
            .filter(|chord| !chord.is_empty())
            .count()
            * chord_samples
    }

    /// Render all notes of a chord and mix them.
    pub fn render_chord(&self, chord: &[Note]) -> Result<SampleBuffer, WaveError> {
        mix_all(chord.iter().map(|&note| {
            let frequency = self.tuning.frequency(note);
            render(frequency, self.note_millis, &self.voice, self.volume)
        }))
    }

    /// Render the whole piece into a single wave.
    ///
    /// Chords are appended strictly in order; each finished chord is dropped
    /// as soon as it has been appended.
    pub fn render(&self) -> Result<SampleBuffer, WaveError> {
        try_combine_all(self.chords.iter().enumerate().map(|(index, chord)| {
            debug!("chord {}: {:?}", index, chord);
            self.render_chord(chord)
        }))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wave::CHANNELS;

    #[test]
    fn progression() {
        let song = Composition::chords();
        assert_eq!(song.chords.len(), 16);
        assert_eq!(song.chords[0], vec![Note(9), Note(13), Note(16)]);
        assert_eq!(song.chords[4], vec![Note(4), Note(8), Note(11), Note(14)]);
        assert_eq!(song.chords[10], vec![Note(2), Note(6), Note(9)]);
    }

    #[test]
    fn full_render_keeps_every_chord() {
        let song = Composition::chords();
        let wave = song.render().unwrap();
        let chord_lengths: usize = song
            .chords
            .iter()
            .map(|chord| song.render_chord(chord).unwrap().duration().unwrap())
            .sum();
        assert_eq!(wave.channel_count(), CHANNELS);
        assert_eq!(wave.duration(), Ok(chord_lengths));
        assert_eq!(chord_lengths, 16 * 52920);
        assert_eq!(song.duration_samples(), chord_lengths);
        assert_eq!(wave.channel(0), wave.channel(1));
        assert!(!wave.exceeds_pcm16());
    }

    #[test]
    fn chords_are_appended_in_order() {
        let song = Composition {
            note_millis: 50,
            ..Composition::chords()
        };
        let wave = song.render().unwrap();
        let chord_samples = samples_for_millis(50);
        for (index, chord) in song.chords.iter().enumerate() {
            let expected = song.render_chord(chord).unwrap();
            let start = index * chord_samples;
            assert_eq!(
                &wave.channel(0)[start..start + chord_samples],
                expected.channel(0)
            );
        }
    }

    #[test]
    fn empty_chords_add_nothing() {
        let song = Composition {
            chords: vec![vec![Note::C], vec![], vec![Note::E]],
            note_millis: 10,
            ..Composition::chords()
        };
        assert_eq!(song.render().unwrap().duration(), Ok(2 * 441));
        assert_eq!(song.duration_samples(), 2 * 441);

        let nothing = Composition {
            chords: vec![],
            ..Composition::chords()
        };
        assert_eq!(nothing.render(), Ok(SampleBuffer::empty(CHANNELS)));
    }

    #[test]
    fn scale_and_tones() {
        let scale = Composition::scale();
        assert_eq!(scale.chords.len(), 8);
        assert_eq!(scale.chords[7], vec![Note(12)]);
        assert_eq!(scale.duration_samples(), 8 * 52920);

        let fm = Composition::fm_tone();
        assert_eq!(fm.duration_samples(), 441_000);
    }
}
