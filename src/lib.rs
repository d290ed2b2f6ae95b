// muzik -- procedurally synthesized chords as raw PCM
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

// making sounds
pub mod envelope;
pub mod generator;
pub mod note;
pub mod oscillator;
pub mod tuning;
pub mod wave;

// building songs
pub mod pcm;
pub mod song;

// getting them out
pub mod output;
pub mod play;
