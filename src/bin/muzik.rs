// muzik -- procedurally synthesized chords as raw PCM
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `muzik` renders one of the built-in pieces and plays it, or stores it in a file.

use std::io;

fn main() -> io::Result<()> {
    muzik::play::song_main()
}
