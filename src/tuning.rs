// muzik -- procedurally synthesized chords as raw PCM
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use crate::note::*;

/// Defines the tuning of an instrument by assigning a frequency to `Note(0)`.
/// This defines the frequencies of all other notes at a standard tuning of 12 half-tones per octave.
///
/// # Examples
///
/// ```
/// use muzik::note::*;
/// use muzik::tuning::*;
/// assert_eq!(Tuning::default().frequency(Note(0)), 110.0);
/// assert_eq!(Tuning::default().frequency(Note(12)), 220.0);
/// assert_eq!(Tuning::default().frequency(Note(-12)), 55.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub reference_frequency: f64,
}

impl Tuning {
    /// Return the frequency of a note relative to this tuning.
    pub fn frequency(&self, note: Note) -> f64 {
        frequency(note, self.reference_frequency)
    }
}

/// Tuning with `Note(0)` at 110 Hz.
impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            reference_frequency: 110.0,
        }
    }
}

/// Frequency of a note `note` semitones away from `reference_frequency`.
pub fn frequency(note: Note, reference_frequency: f64) -> f64 {
    let octaves = note.index() as f64 / 12.0;
    reference_frequency * 2.0f64.powf(octaves)
}
