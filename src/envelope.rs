// muzik -- procedurally synthesized chords as raw PCM
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Fading notes in and out.
//!
//! Both fades are plain functions of the sample index, so a note can be
//! evaluated at any point without stepping through it.

use crate::wave::samples_for_millis;

/// Linear fade-in over the first `fade_samples` samples.
///
/// Returns `1.0` strictly after the fade window and `1.0` for an empty window.
///
/// # Examples
///
/// ```
/// use muzik::envelope::*;
///
/// assert_eq!(fade_in(100, 0), 0.0);
/// assert_eq!(fade_in(100, 50), 0.5);
/// assert_eq!(fade_in(100, 150), 1.0);
/// ```
pub fn fade_in(fade_samples: usize, t: usize) -> f64 {
    if fade_samples == 0 || t > fade_samples {
        return 1.0;
    }
    1.0 - (fade_samples - t) as f64 / fade_samples as f64
}

/// Linear fade-out over the last `fade_samples` samples of a note lasting `total_samples`.
///
/// The value is not bounded below: past `total_samples` it turns negative.
/// Returns `1.0` for an empty window.
///
/// # Examples
///
/// ```
/// use muzik::envelope::*;
///
/// assert_eq!(fade_out(100, 1000, 500), 1.0);
/// assert_eq!(fade_out(100, 1000, 950), 0.5);
/// assert_eq!(fade_out(100, 1000, 1000), 0.0);
/// ```
pub fn fade_out(fade_samples: usize, total_samples: usize, t: usize) -> f64 {
    let fade = fade_samples as i64;
    let total = total_samples as i64;
    let t = t as i64;
    if fade == 0 || t < total - fade {
        return 1.0;
    }
    (total - t) as f64 / fade as f64
}

/// Fade windows of a note, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fade {
    pub fade_in_millis: usize,
    pub fade_out_millis: usize,
}

impl Fade {
    /// Envelope gain at sample `t` of a note lasting `note_millis`.
    pub fn coefficient(&self, note_millis: usize, t: usize) -> f64 {
        let fade_in_samples = samples_for_millis(self.fade_in_millis);
        let fade_out_samples = samples_for_millis(self.fade_out_millis);
        let total_samples = samples_for_millis(note_millis);
        fade_in(fade_in_samples, t) * fade_out(fade_out_samples, total_samples, t)
    }
}

/// 200 ms in, 400 ms out.
impl Default for Fade {
    fn default() -> Self {
        Fade {
            fade_in_millis: 200,
            fade_out_millis: 400,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fade_in_ramp() {
        assert!(fade_in(100, 0).abs() < 1e-12);
        assert!(fade_in(100, 100) <= 1.0);
        assert_eq!(fade_in(100, 101), 1.0);
        assert_eq!(fade_in(0, 0), 1.0);
    }

    #[test]
    fn fade_out_ramp() {
        assert_eq!(fade_out(100, 1000, 899), 1.0);
        assert_eq!(fade_out(100, 1000, 900), 1.0);
        assert_eq!(fade_out(100, 1000, 975), 0.25);
        assert_eq!(fade_out(0, 1000, 1000), 1.0);
    }

    #[test]
    fn fade_out_is_unclamped() {
        assert_eq!(fade_out(100, 1000, 1050), -0.5);
    }

    #[test]
    fn window_longer_than_note() {
        // the whole note lies inside the fade-out window
        assert_eq!(fade_out(100, 50, 0), 0.5);
    }

    #[test]
    fn combined_coefficient() {
        let fade = Fade::default();
        let note_millis = 1200;
        let total = samples_for_millis(note_millis);
        assert_eq!(fade.coefficient(note_millis, 0), 0.0);
        assert_eq!(fade.coefficient(note_millis, total / 2), 1.0);
        assert_eq!(fade.coefficient(note_millis, total), 0.0);
        let quiet = fade.coefficient(note_millis, total - samples_for_millis(200));
        assert!((quiet - 0.5).abs() < 1e-12);
    }
}
