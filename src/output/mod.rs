//! Destinations for rendered audio.

pub mod sox;
