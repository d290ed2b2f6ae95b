// muzik -- procedurally synthesized chords as raw PCM
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Turn a composition into a PCM stream and send it somewhere audible.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info, warn};
use snafu::Snafu;
use structopt::StructOpt;

use crate::generator::Voice;
use crate::oscillator::Oscillator;
use crate::output::sox::{with_sox, SoxTarget};
use crate::pcm::PcmStream;
use crate::song::Composition;
use crate::wave::WaveError;

/// The pieces that can be rendered from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    Chords,
    Scale,
    Tone,
    Fm,
}

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum ParsePieceError {
    #[snafu(display("Unknown piece {:?}, expected one of chords, scale, tone, fm", name))]
    UnknownPiece { name: String },
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "chords" => Ok(Piece::Chords),
            "scale" => Ok(Piece::Scale),
            "tone" => Ok(Piece::Tone),
            "fm" => Ok(Piece::Fm),
            _ => Err(ParsePieceError::UnknownPiece { name: name.into() }),
        }
    }
}

impl Piece {
    pub fn composition(self) -> Composition {
        match self {
            Piece::Chords => Composition::chords(),
            Piece::Scale => Composition::scale(),
            Piece::Tone => Composition::tone(220.0, 10_000, Voice::plain(Oscillator::Sine)),
            Piece::Fm => Composition::fm_tone(),
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(name = "muzik", about = "Synthesizing chords into raw PCM")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Which piece to render: chords, scale, tone or fm.
    #[structopt(short, long, default_value = "chords")]
    piece: Piece,

    /// Output file (any sox-supported format). Music is played directly if not given.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Write the signed 16 bit little endian samples to this file as they are, without sox.
    #[structopt(long, parse(from_os_str), conflicts_with = "output")]
    raw: Option<PathBuf>,

    /// Write the raw samples to stdout. Logging is disabled since it would end up in the stream.
    #[structopt(long, conflicts_with_all = &["output", "raw"])]
    stdout: bool,

    /// Dump the description of the composition before rendering it
    /// (to stdout by default, or to stderr when the samples go to stdout).
    #[structopt(long)]
    #[allow(clippy::option_option)]
    dump_description: Option<Option<PathBuf>>,
}

pub fn song_main() -> io::Result<()> {
    let opt: Opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    // simple_logger prints to stdout
    if !opt.stdout {
        simple_logger::init_with_level(level)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    }

    let composition = opt.piece.composition();
    let default_dump = if opt.stdout {
        "/dev/stderr"
    } else {
        "/dev/stdout"
    };
    let dump_out = opt
        .dump_description
        .map(|path| path.unwrap_or_else(|| default_dump.into()));
    if let Some(dump_out_path) = dump_out {
        use std::io::Write;
        let mut f = File::create(dump_out_path)?;
        writeln!(f, "{:#?}", composition)?;
    }

    let stream =
        make_noise(&composition).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if opt.stdout {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        return write_stream(stream, &mut out);
    }
    match opt.raw {
        Some(path) => write_raw(stream, &path),
        None => play(stream, opt.output.as_deref()),
    }
}

/// Render and encode a composition.
pub fn make_noise(composition: &Composition) -> Result<PcmStream, WaveError> {
    info!(
        "rendering {} chords of {} ms",
        composition.chords.len(),
        composition.note_millis
    );
    let wave = composition.render()?;
    debug!("peak amplitude {}", wave.peak());
    if wave.exceeds_pcm16() {
        warn!("samples exceed the 16 bit range and will wrap around");
    }

    let stream = PcmStream::encode(&wave)?;
    info!(
        "total length {} samples ({:.2} seconds), {} bytes per frame",
        stream.frame_length(),
        stream.seconds(),
        stream.frame_size()
    );
    Ok(stream)
}

/// Play the stream on the default speakers, or convert it to `outfile` using sox.
pub fn play(mut stream: PcmStream, outfile: Option<&Path>) -> io::Result<()> {
    let target = match outfile {
        None => SoxTarget::Play,
        Some(path) => SoxTarget::File(path),
    };
    let format = stream.format();
    with_sox(format, target, |audio_stream| {
        io::copy(&mut stream, audio_stream)?;
        Ok(())
    })
}

/// Write the bytes of the stream to `path` without any header.
pub fn write_raw(stream: PcmStream, path: &Path) -> io::Result<()> {
    info!("writing raw PCM to {}", path.display());
    let mut file = File::create(path)?;
    write_stream(stream, &mut file)
}

/// Copy the bytes of the stream to `out` and flush it.
pub fn write_stream<W: io::Write>(mut stream: PcmStream, out: &mut W) -> io::Result<()> {
    io::copy(&mut stream, out)?;
    out.flush()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pieces() {
        assert_eq!("chords".parse::<Piece>(), Ok(Piece::Chords));
        assert_eq!("fm".parse::<Piece>(), Ok(Piece::Fm));
        assert_eq!(
            "waltz".parse::<Piece>(),
            Err(ParsePieceError::UnknownPiece {
                name: "waltz".into()
            })
        );
        assert_eq!(Piece::Chords.composition(), Composition::chords());
    }

    #[test]
    fn written_bytes_are_the_encoded_wave() {
        let composition = Composition {
            note_millis: 20,
            ..Composition::scale()
        };
        let expected = crate::pcm::encode(&composition.render().unwrap()).unwrap();

        let mut out = Vec::new();
        write_stream(make_noise(&composition).unwrap(), &mut out).unwrap();
        assert_eq!(out.len(), 8 * 882 * 4);
        assert_eq!(out, expected);
    }

    #[test]
    fn stdout_excludes_file_outputs() {
        assert!(Opt::from_iter_safe(&["muzik", "--stdout"]).unwrap().stdout);
        assert!(Opt::from_iter_safe(&["muzik", "--stdout", "--raw", "x.pcm"]).is_err());
        assert!(Opt::from_iter_safe(&["muzik", "--stdout", "-o", "x.wav"]).is_err());
    }

    #[test]
    fn noise() {
        let composition = Composition {
            note_millis: 100,
            ..Composition::chords()
        };
        let stream = make_noise(&composition).unwrap();
        assert_eq!(stream.frame_size(), 4);
        assert_eq!(stream.frame_length(), 16 * 4410);
        assert_eq!(stream.byte_len(), 16 * 4410 * 4);
    }
}
