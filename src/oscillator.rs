// muzik -- procedurally synthesized chords as raw PCM
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Stateless oscillators, evaluated directly at a sample index.

use std::f64::consts::PI;

use crate::wave::SAMPLE_RATE;

/// Largest positive value of a signed 16 bit sample.
pub const MAX_AMPLITUDE: i32 = 32767;

/// The available kinds of waves.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Oscillator {
    /// Plain sine wave.
    Sine,
    /// Sine wave whose carrier frequency is shifted by
    /// `modulation_index * sin(2π * modulation_frequency * t / sample_rate)`.
    Fm {
        modulation_index: f64,
        modulation_frequency: f64,
    },
}

fn sine(frequency: f64, t: usize) -> f64 {
    let angle = t as f64 * 2.0 * PI * frequency / SAMPLE_RATE as f64;
    angle.sin()
}

impl Oscillator {
    /// Unit amplitude value of the wave at sample `t`.
    pub fn eval(self, frequency: f64, t: usize) -> f64 {
        match self {
            Oscillator::Sine => sine(frequency, t),
            Oscillator::Fm {
                modulation_index,
                modulation_frequency,
            } => {
                let modulation = modulation_index * sine(modulation_frequency, t);
                sine(frequency + modulation, t)
            }
        }
    }

    /// Value of the wave at sample `t`, scaled to the 16 bit range and rounded.
    ///
    /// # Examples
    ///
    /// ```
    /// use muzik::oscillator::*;
    ///
    /// // a quarter of the period of 11025 Hz is exactly one sample
    /// assert_eq!(Oscillator::Sine.value(11025.0, 0), 0);
    /// assert_eq!(Oscillator::Sine.value(11025.0, 1), MAX_AMPLITUDE);
    /// assert_eq!(Oscillator::Sine.value(11025.0, 3), -MAX_AMPLITUDE);
    /// ```
    pub fn value(self, frequency: f64, t: usize) -> i32 {
        (self.eval(frequency, t) * MAX_AMPLITUDE as f64).round() as i32
    }
}
