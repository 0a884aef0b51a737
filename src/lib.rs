//! Conditioning and classification of frequency-domain acoustic
//! measurement data: octave-band mapping, fractional-octave Gaussian
//! smoothing, and phase/polarity cleanup for charting.
//!
//! The engine is pure and synchronous: operations are functions of their
//! numeric inputs, and the only state is the reusable [`SmoothingTable`].

pub mod band;
pub mod error;
pub mod phase;
pub mod signal;
pub mod smoothing;

pub use band::mapper;
pub use band::{
    FrequencyRangeSelection, OctaveBand, OctaveRange, RelativeBandwidth, HIGH_FREQUENCY_LIMIT_HZ,
    LOW_FREQUENCY_LIMIT_HZ, OCTAVE_BANDS, WIDE_BAND_LABEL,
};
pub use error::EngineError;
pub use smoothing::{
    smooth_spectrum, Smoothing, SmoothingTable, SMOOTHING_TABLE_WIDTH, SMOOTHING_WINDOW_RADIUS,
};
