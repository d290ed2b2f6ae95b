// muzik -- procedurally synthesized chords as raw PCM
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Easy interface for getting sound to play using a sox subprocess.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::pcm::PcmFormat;

pub enum SoxTarget<'a> {
    Play,
    File(&'a Path),
}

/// Arguments telling sox how to interpret raw samples on its standard input.
fn input_args(format: PcmFormat) -> Vec<String> {
    let encoding = if format.signed {
        "signed-integer"
    } else {
        "unsigned-integer"
    };
    let endian = if format.big_endian { "big" } else { "little" };
    vec![
        "-R".into(), // make the output reproducible
        "--channels".into(),
        format.channels.to_string(),
        "--rate".into(),
        format.sample_rate.to_string(),
        "--bits".into(),
        format.sample_size_in_bits.to_string(),
        "--encoding".into(),
        encoding.into(),
        "--endian".into(),
        endian.into(),
        "--type".into(),
        "raw".into(),
        "/dev/stdin".into(),
    ]
}

/// Spawn sox, hand its standard input to `callback`, and wait for sox to finish.
pub fn with_sox<R, F: FnOnce(&mut dyn io::Write) -> io::Result<R>>(
    format: PcmFormat,
    target: SoxTarget,
    callback: F,
) -> io::Result<R> {
    let args = input_args(format);
    log::debug!("sox input arguments {:?}", args);

    let mut player = match target {
        SoxTarget::Play => Command::new("play")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?,
        SoxTarget::File(outfile) => Command::new("sox")
            .args(&args)
            .arg(outfile)
            .stdin(Stdio::piped())
            .spawn()?,
    };

    let mut audio_stream = player
        .stdin
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "sox has no standard input"))?;

    let result = callback(&mut audio_stream);

    // sox exits once its input is closed
    drop(audio_stream);
    let status = player.wait()?;
    if !status.success() {
        log::error!("sox exited with {}", status);
    }

    result
}
