// muzik -- procedurally synthesized chords as raw PCM
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Serializing waves as interleaved signed 16 bit little endian PCM.

use std::io;

use crate::wave::{SampleBuffer, WaveError, CHANNELS, SAMPLE_RATE};

/// Bytes per sample of a single channel.
pub const BYTES_PER_SAMPLE: usize = 2;

/// Description of a raw PCM stream, as needed by whoever plays or wraps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub sample_rate: usize,
    pub sample_size_in_bits: usize,
    pub channels: usize,
    pub signed: bool,
    pub big_endian: bool,
}

impl PcmFormat {
    /// Size in bytes of one sample for every channel.
    pub fn frame_size(&self) -> usize {
        self.channels * self.sample_size_in_bits / 8
    }
}

/// 44.1 kHz signed 16 bit little endian stereo.
impl Default for PcmFormat {
    fn default() -> Self {
        PcmFormat {
            sample_rate: SAMPLE_RATE,
            sample_size_in_bits: 16,
            channels: CHANNELS,
            signed: true,
            big_endian: false,
        }
    }
}

/// Encode a wave as interleaved PCM: for every sample index, the low and then the high
/// byte of each channel in order.
///
/// Samples outside of the 16 bit range wrap around, only their lowest 16 bits are kept.
///
/// # Examples
///
/// ```
/// use muzik::pcm::*;
/// use muzik::wave::*;
///
/// let wave = SampleBuffer::from_channels(vec![vec![1, 256], vec![-2, -1]]);
/// assert_eq!(
///     encode(&wave).unwrap(),
///     vec![0x01, 0x00, 0xfe, 0xff, 0x00, 0x01, 0xff, 0xff]
/// );
/// ```
pub fn encode(wave: &SampleBuffer) -> Result<Vec<u8>, WaveError> {
    let duration = wave.duration()?;
    let channels = wave.channels();
    let mut bytes = Vec::with_capacity(duration * BYTES_PER_SAMPLE * channels.len());
    for t in 0..duration {
        for channel in channels {
            bytes.extend_from_slice(&(channel[t] as i16).to_le_bytes());
        }
    }
    Ok(bytes)
}

/// Reverse of [`encode`]. A trailing incomplete frame is ignored.
pub fn decode(bytes: &[u8], channel_count: usize) -> SampleBuffer {
    let mut channels = vec![Vec::new(); channel_count];
    if channel_count == 0 {
        return SampleBuffer::from_channels(channels);
    }
    for frame in bytes.chunks_exact(channel_count * BYTES_PER_SAMPLE) {
        for (channel, sample) in channels
            .iter_mut()
            .zip(frame.chunks_exact(BYTES_PER_SAMPLE))
        {
            channel.push(i16::from_le_bytes([sample[0], sample[1]]) as i32);
        }
    }
    SampleBuffer::from_channels(channels)
}

/// Encoded audio, readable as a byte stream.
pub struct PcmStream {
    format: PcmFormat,
    data: io::Cursor<Vec<u8>>,
}

impl PcmStream {
    pub fn new(format: PcmFormat, bytes: Vec<u8>) -> Self {
        Self {
            format,
            data: io::Cursor::new(bytes),
        }
    }

    /// Encode `wave` in the default format, with as many channels as the wave has.
    pub fn encode(wave: &SampleBuffer) -> Result<Self, WaveError> {
        let format = PcmFormat {
            channels: wave.channel_count(),
            ..PcmFormat::default()
        };
        Ok(Self::new(format, encode(wave)?))
    }

    pub fn format(&self) -> PcmFormat {
        self.format
    }

    pub fn frame_size(&self) -> usize {
        self.format.frame_size()
    }

    /// Total number of frames in the stream, regardless of how much was read already.
    pub fn frame_length(&self) -> usize {
        match self.frame_size() {
            0 => 0,
            frame_size => self.byte_len() / frame_size,
        }
    }

    pub fn byte_len(&self) -> usize {
        self.data.get_ref().len()
    }

    /// Length of the stream in seconds.
    pub fn seconds(&self) -> f64 {
        self.frame_length() as f64 / self.format.sample_rate as f64
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data.into_inner()
    }
}

impl io::Read for PcmStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        io::Read::read(&mut self.data, buf)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Read;

    #[test]
    fn round_trip() {
        let wave = SampleBuffer::from_channels(vec![
            vec![0, 1, -1, 32767, -32768, 12345],
            vec![-12345, 255, 256, -256, 7, 0],
        ]);
        let bytes = encode(&wave).unwrap();
        assert_eq!(bytes.len(), 6 * 2 * 2);
        assert_eq!(decode(&bytes, 2), wave);
    }

    #[test]
    fn out_of_range_wraps() {
        let wave = SampleBuffer::from_channels(vec![vec![32768, 65537], vec![-32769, 0]]);
        let decoded = decode(&encode(&wave).unwrap(), 2);
        assert_eq!(decoded.channel(0), &[-32768, 1]);
        assert_eq!(decoded.channel(1), &[32767, 0]);
    }

    #[test]
    fn uneven_channels_are_rejected() {
        let wave = SampleBuffer::from_channels(vec![vec![1, 2, 3], vec![1, 2]]);
        assert_eq!(
            encode(&wave),
            Err(WaveError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn no_channels() {
        assert_eq!(encode(&SampleBuffer::empty(0)), Ok(vec![]));
        assert_eq!(decode(&[1, 2, 3], 0), SampleBuffer::empty(0));
    }

    #[test]
    fn stream() {
        let wave = SampleBuffer::from_mono(vec![100; 441], CHANNELS);
        let mut stream = PcmStream::encode(&wave).unwrap();
        assert_eq!(stream.format(), PcmFormat::default());
        assert_eq!(stream.frame_size(), 4);
        assert_eq!(stream.frame_length(), 441);
        assert!((stream.seconds() - 0.01).abs() < 1e-12);

        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes.len(), 441 * 4);
        assert_eq!(&bytes[..4], &[100, 0, 100, 0]);
        assert_eq!(stream.frame_length(), 441);
    }
}
