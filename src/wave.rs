// muzik -- procedurally synthesized chords as raw PCM
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Sampled waves and the two ways of putting them together.
//!
//! A [`SampleBuffer`] holds one sequence of integer samples per channel.
//! Buffers are combined either by [`mix`]ing them, which lets them sound at the
//! same time, or by [`combine`]ing them, which plays one after the other.

use snafu::Snafu;

/// Number of samples per second.
pub const SAMPLE_RATE: usize = 44100;

/// Number of channels of every rendered wave.
pub const CHANNELS: usize = 2;

/// Convert a duration in milliseconds to a number of samples, rounding down.
///
/// # Examples
///
/// ```
/// use muzik::wave::*;
///
/// assert_eq!(samples_for_millis(1000), 44100);
/// assert_eq!(samples_for_millis(1200), 52920);
/// assert_eq!(samples_for_millis(0), 0);
/// ```
pub fn samples_for_millis(millis: usize) -> usize {
    SAMPLE_RATE * millis / 1000
}

/// Structural errors when assembling waves.
///
/// These never depend on the music being rendered, only on how the buffers were put together.
#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum WaveError {
    #[snafu(display(
        "Different channel counts, cannot {} waves: {} != {}",
        operation,
        left,
        right
    ))]
    ChannelMismatch {
        operation: &'static str,
        left: usize,
        right: usize,
    },
    #[snafu(display("Waves should have same sample count: {} != {}", expected, actual))]
    LengthMismatch { expected: usize, actual: usize },
}

/// Integer samples for a fixed number of channels.
///
/// Samples are kept as `i32` so that summing several notes does not overflow
/// before the wave is encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleBuffer {
    channels: Vec<Vec<i32>>,
}

impl SampleBuffer {
    /// A buffer with `channel_count` channels and no samples.
    pub fn empty(channel_count: usize) -> Self {
        Self {
            channels: vec![Vec::new(); channel_count],
        }
    }

    /// Wrap raw channel data. The channel lengths are not checked here;
    /// use [`SampleBuffer::duration`] to validate them.
    pub fn from_channels(channels: Vec<Vec<i32>>) -> Self {
        Self { channels }
    }

    /// Copy a mono signal onto every channel.
    pub fn from_mono(samples: Vec<i32>, channel_count: usize) -> Self {
        Self {
            channels: vec![samples; channel_count],
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples of one channel.
    ///
    /// # Panics
    ///
    /// - If `index` is not less than [`SampleBuffer::channel_count`].
    pub fn channel(&self, index: usize) -> &[i32] {
        &self.channels[index]
    }

    pub fn channels(&self) -> &[Vec<i32>] {
        &self.channels
    }

    pub fn into_channels(self) -> Vec<Vec<i32>> {
        self.channels
    }

    /// The number of samples per channel.
    /// Fails if the channels disagree on their length.
    ///
    /// # Examples
    ///
    /// ```
    /// use muzik::wave::*;
    ///
    /// let ok = SampleBuffer::from_channels(vec![vec![1, 2], vec![3, 4]]);
    /// assert_eq!(ok.duration(), Ok(2));
    ///
    /// let broken = SampleBuffer::from_channels(vec![vec![1, 2], vec![3]]);
    /// assert_eq!(
    ///     broken.duration(),
    ///     Err(WaveError::LengthMismatch { expected: 2, actual: 1 })
    /// );
    /// ```
    pub fn duration(&self) -> Result<usize, WaveError> {
        let mut lengths = self.channels.iter().map(Vec::len);
        let expected = match lengths.next() {
            Some(length) => length,
            None => return Ok(0),
        };
        for actual in lengths {
            if actual != expected {
                return Err(WaveError::LengthMismatch { expected, actual });
            }
        }
        Ok(expected)
    }

    /// Largest absolute sample value over all channels.
    pub fn peak(&self) -> i32 {
        self.channels
            .iter()
            .flat_map(|channel| channel.iter())
            .map(|sample| sample.abs())
            .max()
            .unwrap_or(0)
    }

    /// Whether any sample lies outside of the signed 16 bit range.
    pub fn exceeds_pcm16(&self) -> bool {
        self.channels
            .iter()
            .flat_map(|channel| channel.iter())
            .any(|&sample| sample < i16::MIN as i32 || sample > i16::MAX as i32)
    }
}

fn check_channels(
    operation: &'static str,
    a: &SampleBuffer,
    b: &SampleBuffer,
) -> Result<(), WaveError> {
    if a.channel_count() != b.channel_count() {
        Err(WaveError::ChannelMismatch {
            operation,
            left: a.channel_count(),
            right: b.channel_count(),
        })
    } else {
        Ok(())
    }
}

/// Superimpose two waves by summing them sample by sample.
///
/// # Examples
///
/// ```
/// use muzik::wave::*;
///
/// let a = SampleBuffer::from_channels(vec![vec![1, 2], vec![3, 4]]);
/// let b = SampleBuffer::from_channels(vec![vec![10, 20], vec![30, 40]]);
/// assert_eq!(
///     mix(&a, &b).unwrap(),
///     SampleBuffer::from_channels(vec![vec![11, 22], vec![33, 44]])
/// );
/// ```
pub fn mix(a: &SampleBuffer, b: &SampleBuffer) -> Result<SampleBuffer, WaveError> {
    check_channels("mix", a, b)?;
    if a.channel_count() == 0 {
        return Ok(SampleBuffer::empty(0));
    }
    let expected = a.duration()?;
    let actual = b.duration()?;
    if expected != actual {
        return Err(WaveError::LengthMismatch { expected, actual });
    }

    let channels = a
        .channels
        .iter()
        .zip(b.channels.iter())
        .map(|(left, right)| left.iter().zip(right.iter()).map(|(x, y)| x + y).collect())
        .collect();
    Ok(SampleBuffer { channels })
}

/// Append `b` to `a` in time, channel by channel.
///
/// The operand order is the playing order, so `combine(a, b)` and `combine(b, a)`
/// generally differ.
///
/// # Examples
///
/// ```
/// use muzik::wave::*;
///
/// let a = SampleBuffer::from_channels(vec![vec![1], vec![2]]);
/// let b = SampleBuffer::from_channels(vec![vec![3, 4], vec![5, 6]]);
/// assert_eq!(
///     combine(&a, &b).unwrap(),
///     SampleBuffer::from_channels(vec![vec![1, 3, 4], vec![2, 5, 6]])
/// );
/// ```
pub fn combine(a: &SampleBuffer, b: &SampleBuffer) -> Result<SampleBuffer, WaveError> {
    check_channels("combine", a, b)?;
    let channels = a
        .channels
        .iter()
        .zip(b.channels.iter())
        .map(|(first, second)| {
            let mut joined = Vec::with_capacity(first.len() + second.len());
            joined.extend_from_slice(first);
            joined.extend_from_slice(second);
            joined
        })
        .collect();
    Ok(SampleBuffer { channels })
}

/// Left fold of `op` over `buffers`, stopping at the first error.
/// An empty sequence results in an empty buffer with [`CHANNELS`] channels.
///
/// Buffers are pulled from the iterator one at a time, so each one is dropped
/// right after it has been folded in.
fn reduce<I, F>(buffers: I, op: F) -> Result<SampleBuffer, WaveError>
where
    I: IntoIterator<Item = Result<SampleBuffer, WaveError>>,
    F: Fn(&SampleBuffer, &SampleBuffer) -> Result<SampleBuffer, WaveError>,
{
    let mut buffers = buffers.into_iter();
    match buffers.next() {
        Some(first) => buffers.try_fold(first?, |acc, next| op(&acc, &next?)),
        None => Ok(SampleBuffer::empty(CHANNELS)),
    }
}

/// Mix all buffers into one, e.g. the notes of a chord.
pub fn mix_all<I: IntoIterator<Item = SampleBuffer>>(
    buffers: I,
) -> Result<SampleBuffer, WaveError> {
    reduce(buffers.into_iter().map(Ok), mix)
}

/// Combine all buffers in iteration order, e.g. the chords of a song.
pub fn combine_all<I: IntoIterator<Item = SampleBuffer>>(
    buffers: I,
) -> Result<SampleBuffer, WaveError> {
    try_combine_all(buffers.into_iter().map(Ok))
}

/// Like [`combine_all`], for buffers that are produced lazily and may fail.
/// The first error aborts the fold.
pub fn try_combine_all<I: IntoIterator<Item = Result<SampleBuffer, WaveError>>>(
    buffers: I,
) -> Result<SampleBuffer, WaveError> {
    reduce(buffers, combine)
}
