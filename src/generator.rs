// muzik -- procedurally synthesized chords as raw PCM
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Rendering single tones into sample buffers.

use log::trace;

use crate::envelope::Fade;
use crate::oscillator::Oscillator;
use crate::wave::{samples_for_millis, SampleBuffer, CHANNELS};

/// How a note is played: which wave, and whether it fades in and out.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Voice {
    pub oscillator: Oscillator,
    pub fade: Option<Fade>,
}

impl Voice {
    /// The oscillator at full level for the whole note.
    pub fn plain(oscillator: Oscillator) -> Self {
        Self {
            oscillator,
            fade: None,
        }
    }

    pub fn faded(oscillator: Oscillator, fade: Fade) -> Self {
        Self {
            oscillator,
            fade: Some(fade),
        }
    }

    /// Sample `t` of a note with the given frequency lasting `note_millis`.
    pub fn sample(&self, frequency: f64, note_millis: usize, t: usize) -> i32 {
        let value = self.oscillator.value(frequency, t);
        match self.fade {
            Some(fade) => (value as f64 * fade.coefficient(note_millis, t)) as i32,
            None => value,
        }
    }
}

/// A sine wave fading in over 200 ms and out over 400 ms.
impl Default for Voice {
    fn default() -> Self {
        Voice::faded(Oscillator::Sine, Fade::default())
    }
}

/// Render a tone of `frequency` lasting `duration_millis` on all [`CHANNELS`].
///
/// `volume` scales every sample and is expected to be in `[0, 1]`.
/// Scaled values are truncated toward zero.
pub fn render(frequency: f64, duration_millis: usize, voice: &Voice, volume: f64) -> SampleBuffer {
    let sample_count = samples_for_millis(duration_millis);
    trace!(
        "rendering {:.2} Hz for {} samples with {:?}",
        frequency,
        sample_count,
        voice
    );
    let samples = (0..sample_count)
        .map(|t| (volume * voice.sample(frequency, duration_millis, t) as f64) as i32)
        .collect();
    SampleBuffer::from_mono(samples, CHANNELS)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::oscillator::MAX_AMPLITUDE;

    #[test]
    fn one_second_of_a440() {
        let wave = render(440.0, 1000, &Voice::plain(Oscillator::Sine), 1.0);
        assert_eq!(wave.channel_count(), 2);
        assert_eq!(wave.duration(), Ok(44100));
        assert_eq!(wave.channel(0), wave.channel(1));
        let peak = wave.peak();
        assert!(peak >= MAX_AMPLITUDE - 1 && peak <= MAX_AMPLITUDE, "{}", peak);
    }

    #[test]
    fn volume_scales() {
        let voice = Voice::plain(Oscillator::Sine);
        let full = render(11025.0, 10, &voice, 1.0);
        let quiet = render(11025.0, 10, &voice, 0.5);
        assert_eq!(full.channel(0)[1], MAX_AMPLITUDE);
        assert_eq!(quiet.channel(0)[1], MAX_AMPLITUDE / 2);
        assert_eq!(quiet.channel(0)[3], -(MAX_AMPLITUDE / 2));
    }

    #[test]
    fn faded_note_starts_and_ends_silent() {
        let wave = render(440.0, 1200, &Voice::default(), 1.0);
        assert_eq!(wave.duration(), Ok(52920));
        let left = wave.channel(0);
        assert_eq!(left[0], 0);
        assert!(left[52919].abs() <= 2);
        // the middle of the note is not attenuated
        let plain = render(440.0, 1200, &Voice::plain(Oscillator::Sine), 1.0);
        assert_eq!(&left[10000..30000], &plain.channel(0)[10000..30000]);
    }

    #[test]
    fn empty_duration() {
        let wave = render(440.0, 0, &Voice::default(), 1.0);
        assert_eq!(wave, SampleBuffer::empty(CHANNELS));
    }
}
