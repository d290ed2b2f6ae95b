// muzik -- procedurally synthesized chords as raw PCM
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Definitions of what a note and a chord are.

/// A "note" is a number of semitones above (or, when negative, below) the
/// reference pitch of a [`Tuning`](crate::tuning::Tuning).
///
/// Twelve semitones make up one octave, so `Note::C` and `Note::C.transpose(OCTAVE)`
/// sound an octave apart.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Note(pub i32);

impl Note {
    pub const C: Note = Note(0);
    pub const D: Note = Note(2);
    pub const E: Note = Note(4);
    pub const F: Note = Note(5);
    pub const G: Note = Note(7);
    pub const A: Note = Note(9);
    pub const B: Note = Note(11);

    /// Return the semitone offset, convenient for further calculations.
    pub fn index(self) -> i32 {
        self.0
    }

    /// Move the note by the given number of semitones.
    ///
    /// # Examples
    ///
    /// ```
    /// use muzik::note::*;
    ///
    /// assert_eq!(Note::C.transpose(OCTAVE), Note(12));
    /// assert_eq!(Note::E.transpose(FLAT), Note(3));
    /// assert_eq!(Note::F.transpose(SHARP), Note(6));
    /// ```
    pub const fn transpose(self, semitones: i32) -> Note {
        Note(self.0 + semitones)
    }
}

/// The note is a half-tone lower then indicated by its name.
pub const FLAT: i32 = -1;
/// The note is a half-tone higher then indicated by its name.
pub const SHARP: i32 = 1;

// Intervals, in semitones above the fundamental.
pub const FUNDAMENTAL: i32 = 0;
pub const MINOR_THIRD: i32 = 3;
pub const MAJOR_THIRD: i32 = 4;
pub const FIFTH: i32 = 7;
pub const SEVENTH: i32 = 10;
pub const OCTAVE: i32 = 12;

/// Build a chord by adding each interval to the fundamental, keeping the order of the intervals.
///
/// # Examples
///
/// ```
/// use muzik::note::*;
///
/// assert_eq!(expand_chord(Note::A, &[0, 4, 7]), vec![Note(9), Note(13), Note(16)]);
/// ```
pub fn expand_chord(fundamental: Note, intervals: &[i32]) -> Vec<Note> {
    intervals
        .iter()
        .map(|&interval| fundamental.transpose(interval))
        .collect()
}

/// The intervals making up a kind of chord.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChordFormula(&'static [i32]);

impl ChordFormula {
    pub const MINOR: ChordFormula = ChordFormula(&[FUNDAMENTAL, MINOR_THIRD, FIFTH]);
    pub const MAJOR: ChordFormula = ChordFormula(&[FUNDAMENTAL, MAJOR_THIRD, FIFTH]);
    pub const MAJOR7: ChordFormula = ChordFormula(&[FUNDAMENTAL, MAJOR_THIRD, FIFTH, SEVENTH]);

    pub fn intervals(self) -> &'static [i32] {
        self.0
    }

    /// The notes of this chord on top of `fundamental`.
    pub fn chord(self, fundamental: Note) -> Vec<Note> {
        expand_chord(fundamental, self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn chords() {
        assert_eq!(
            ChordFormula::MINOR.chord(Note::A),
            vec![Note(9), Note(12), Note(16)]
        );
        assert_eq!(
            ChordFormula::MAJOR.chord(Note::D),
            vec![Note(2), Note(6), Note(9)]
        );
        assert_eq!(
            ChordFormula::MAJOR7.chord(Note::E),
            vec![Note(4), Note(8), Note(11), Note(14)]
        );
    }

    #[test]
    fn interval_order_is_kept() {
        assert_eq!(
            expand_chord(Note::C, &[FIFTH, FUNDAMENTAL, MAJOR_THIRD]),
            vec![Note(7), Note(0), Note(4)]
        );
        assert_eq!(expand_chord(Note::C, &[]), vec![]);
    }
}
