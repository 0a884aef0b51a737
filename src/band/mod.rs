pub mod mapper;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Data model
// ---------------------------------------------------------------------------

/// Lower limit of the lowest octave band, in Hz.
pub const LOW_FREQUENCY_LIMIT_HZ: f64 = 10.0;

/// Upper limit of the highest octave band, in Hz.
pub const HIGH_FREQUENCY_LIMIT_HZ: f64 = 20000.0;

/// Label of the single wide-band range covering all eleven octave bands.
///
/// The capital "To" is a historical inconsistency relative to the per-band
/// labels; persisted configurations key off the exact spelling, so it must
/// not be normalized.
pub const WIDE_BAND_LABEL: &str = "20 Hz To 20 kHz";

/// One of the eleven standard octave ranges spanning 10 Hz to 20 kHz.
///
/// Ranges are half-open `[low, high)` except the last, which is closed at
/// 20 kHz. The boundaries are offset from pure log midpoints to match
/// historical measurement convention and are reproduced verbatim, not
/// derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OctaveBand {
    Hz10To20,
    Hz20To40,
    Hz40To80,
    Hz80To160,
    Hz160To315,
    Hz315To630,
    Hz630To1250,
    Hz1250To2500,
    Hz2500To5000,
    Hz5000To10000,
    Hz10000To20000,
}

/// All eleven octave bands in frequency-ascending order.
pub const OCTAVE_BANDS: [OctaveBand; 11] = [
    OctaveBand::Hz10To20,
    OctaveBand::Hz20To40,
    OctaveBand::Hz40To80,
    OctaveBand::Hz80To160,
    OctaveBand::Hz160To315,
    OctaveBand::Hz315To630,
    OctaveBand::Hz630To1250,
    OctaveBand::Hz1250To2500,
    OctaveBand::Hz2500To5000,
    OctaveBand::Hz5000To10000,
    OctaveBand::Hz10000To20000,
];

impl OctaveBand {
    /// Legacy display/persistence label for this band (case-sensitive).
    pub fn label(self) -> &'static str {
        match self {
            OctaveBand::Hz10To20 => "10 Hz to 20 Hz",
            OctaveBand::Hz20To40 => "20 Hz to 40 Hz",
            OctaveBand::Hz40To80 => "40 Hz to 80 Hz",
            OctaveBand::Hz80To160 => "80 Hz to 160 Hz",
            OctaveBand::Hz160To315 => "160 Hz to 315 Hz",
            OctaveBand::Hz315To630 => "315 Hz to 630 Hz",
            OctaveBand::Hz630To1250 => "630 Hz to 1.25 kHz",
            OctaveBand::Hz1250To2500 => "1.25 kHz to 2.5 kHz",
            OctaveBand::Hz2500To5000 => "2.5 kHz to 5 kHz",
            OctaveBand::Hz5000To10000 => "5 kHz to 10 kHz",
            OctaveBand::Hz10000To20000 => "10 kHz to 20 kHz",
        }
    }

    /// Numeric boundaries `(low, high)` in Hz. Half-open `[low, high)`
    /// except the last band, which includes 20 kHz.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            OctaveBand::Hz10To20 => (10.0, 20.0),
            OctaveBand::Hz20To40 => (20.0, 39.0),
            OctaveBand::Hz40To80 => (39.0, 78.0),
            OctaveBand::Hz80To160 => (78.0, 156.0),
            OctaveBand::Hz160To315 => (156.0, 312.0),
            OctaveBand::Hz315To630 => (312.0, 624.0),
            OctaveBand::Hz630To1250 => (624.0, 1248.0),
            OctaveBand::Hz1250To2500 => (1248.0, 2496.0),
            OctaveBand::Hz2500To5000 => (2496.0, 4992.0),
            OctaveBand::Hz5000To10000 => (4992.0, 9986.0),
            OctaveBand::Hz10000To20000 => (9986.0, 20000.0),
        }
    }

    /// Ordinal position of this band, counted from the 10 Hz origin (0–10).
    /// Used for indexing parallel per-band arrays.
    pub fn index(self) -> usize {
        OCTAVE_BANDS.iter().position(|&b| b == self).unwrap_or(0)
    }

    /// Nominal "musical" center frequency for this band.
    ///
    /// For the three lowest bands the narrow-band convention differs
    /// slightly from the standard value (15.6 vs 16, 31.2 vs 31.5,
    /// 62.5 vs 63). Both tables are intentional; do not unify them.
    pub fn nominal_center_frequency(self, narrow_band: bool) -> f64 {
        match self {
            OctaveBand::Hz10To20 => {
                if narrow_band {
                    15.6
                } else {
                    16.0
                }
            }
            OctaveBand::Hz20To40 => {
                if narrow_band {
                    31.2
                } else {
                    31.5
                }
            }
            OctaveBand::Hz40To80 => {
                if narrow_band {
                    62.5
                } else {
                    63.0
                }
            }
            OctaveBand::Hz80To160 => 125.0,
            OctaveBand::Hz160To315 => 250.0,
            OctaveBand::Hz315To630 => 500.0,
            OctaveBand::Hz630To1250 => 1000.0,
            OctaveBand::Hz1250To2500 => 2000.0,
            OctaveBand::Hz2500To5000 => 4000.0,
            OctaveBand::Hz5000To10000 => 8000.0,
            OctaveBand::Hz10000To20000 => 16000.0,
        }
    }

    /// Look up a band by its exact legacy label.
    pub fn from_label(label: &str) -> Option<OctaveBand> {
        OCTAVE_BANDS.iter().copied().find(|b| b.label() == label)
    }
}

// ---------------------------------------------------------------------------
// Octave range (a band, or the permissive wide-band selection)
// ---------------------------------------------------------------------------

/// A selectable octave range: one of the eleven fixed bands, or the single
/// wide-band range covering all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OctaveRange {
    Wide,
    Band(OctaveBand),
}

impl OctaveRange {
    pub fn label(self) -> &'static str {
        match self {
            OctaveRange::Wide => WIDE_BAND_LABEL,
            OctaveRange::Band(band) => band.label(),
        }
    }

    pub fn from_label(label: &str) -> Option<OctaveRange> {
        if label == WIDE_BAND_LABEL {
            return Some(OctaveRange::Wide);
        }
        OctaveBand::from_label(label).map(OctaveRange::Band)
    }

    /// Whether a center frequency falls within this range.
    ///
    /// The wide-band range accepts everything. The first and last bands
    /// accept frequencies beyond their outer boundary, so a center frequency
    /// outside 10 Hz–20 kHz cues a closest match instead of a default.
    pub fn contains_center_frequency(self, center_frequency_hz: f64) -> bool {
        match self {
            OctaveRange::Wide => true,
            OctaveRange::Band(band) => {
                let (low, high) = band.bounds();
                let above_low =
                    band == OctaveBand::Hz10To20 || center_frequency_hz >= low;
                let below_high =
                    band == OctaveBand::Hz10000To20000 || center_frequency_hz < high;
                above_low && below_high
            }
        }
    }
}

// Octave-range labels are a wire format: serialize to the exact legacy
// strings, reject anything else on read.
impl Serialize for OctaveRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for OctaveRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        OctaveRange::from_label(&label)
            .ok_or_else(|| de::Error::custom(format!("unknown octave range: '{label}'")))
    }
}

// ---------------------------------------------------------------------------
// Relative bandwidth
// ---------------------------------------------------------------------------

/// Fractional-octave relative bandwidth, from one octave down to 1/48
/// octave. Smaller divider means coarser resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelativeBandwidth {
    OneOctave,
    #[default]
    ThirdOctave,
    SixthOctave,
    TwelfthOctave,
    TwentyFourthOctave,
    FortyEighthOctave,
}

impl RelativeBandwidth {
    /// Integer octave divider, usable as the denominator in fractional
    /// octave calculations.
    pub fn octave_divider(self) -> u32 {
        match self {
            RelativeBandwidth::OneOctave => 1,
            RelativeBandwidth::ThirdOctave => 3,
            RelativeBandwidth::SixthOctave => 6,
            RelativeBandwidth::TwelfthOctave => 12,
            RelativeBandwidth::TwentyFourthOctave => 24,
            RelativeBandwidth::FortyEighthOctave => 48,
        }
    }

    /// Abbreviated value, e.g. `"1/3"`.
    pub fn abbreviated(self) -> &'static str {
        match self {
            RelativeBandwidth::OneOctave => "1",
            RelativeBandwidth::ThirdOctave => "1/3",
            RelativeBandwidth::SixthOctave => "1/6",
            RelativeBandwidth::TwelfthOctave => "1/12",
            RelativeBandwidth::TwentyFourthOctave => "1/24",
            RelativeBandwidth::FortyEighthOctave => "1/48",
        }
    }

    /// Presentation value, e.g. `"1/3 octave"`. Also the persisted form.
    pub fn presentation(self) -> String {
        format!("{} octave", self.abbreviated())
    }

    /// Parse a presentation string. Unknown strings fall back to the
    /// default third-octave bandwidth (legacy behavior).
    pub fn from_presentation(s: &str) -> RelativeBandwidth {
        match s {
            "1 octave" => RelativeBandwidth::OneOctave,
            "1/3 octave" => RelativeBandwidth::ThirdOctave,
            "1/6 octave" => RelativeBandwidth::SixthOctave,
            "1/12 octave" => RelativeBandwidth::TwelfthOctave,
            "1/24 octave" => RelativeBandwidth::TwentyFourthOctave,
            "1/48 octave" => RelativeBandwidth::FortyEighthOctave,
            _ => RelativeBandwidth::default(),
        }
    }

    /// Parse an abbreviated string, e.g. `"1/6"`, with the same fallback.
    pub fn from_abbreviated(s: &str) -> RelativeBandwidth {
        RelativeBandwidth::from_presentation(&format!("{s} octave"))
    }
}

impl Serialize for RelativeBandwidth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.presentation())
    }
}

impl<'de> Deserialize<'de> for RelativeBandwidth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(RelativeBandwidth::from_presentation(&s))
    }
}

// ---------------------------------------------------------------------------
// Frequency range selection
// ---------------------------------------------------------------------------

/// A user or analysis selection of relative bandwidth, octave range and
/// center frequency.
///
/// Setters keep the invariant that the center frequency lies inside the
/// selected octave range (the wide-band range is intentionally permissive):
/// changing one side snaps the other to match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRangeSelection {
    relative_bandwidth: RelativeBandwidth,
    octave_range: OctaveRange,
    center_frequency_hz: f64,
}

/// Default center frequency for the wide-band range, in Hz.
pub const WIDE_BAND_CENTER_FREQUENCY_DEFAULT_HZ: f64 = 4000.0;

impl Default for FrequencyRangeSelection {
    fn default() -> Self {
        Self {
            relative_bandwidth: RelativeBandwidth::default(),
            octave_range: OctaveRange::Wide,
            center_frequency_hz: WIDE_BAND_CENTER_FREQUENCY_DEFAULT_HZ,
        }
    }
}

impl FrequencyRangeSelection {
    /// Build a selection, snapping the center frequency to the range's
    /// nominal default when it falls outside the range.
    pub fn new(
        relative_bandwidth: RelativeBandwidth,
        octave_range: OctaveRange,
        center_frequency_hz: f64,
    ) -> Self {
        let mut selection = Self {
            relative_bandwidth,
            octave_range,
            center_frequency_hz,
        };
        if !octave_range.contains_center_frequency(center_frequency_hz) {
            selection.center_frequency_hz =
                mapper::default_center_frequency_for_range(octave_range, false);
        }
        selection
    }

    pub fn relative_bandwidth(&self) -> RelativeBandwidth {
        self.relative_bandwidth
    }

    pub fn octave_range(&self) -> OctaveRange {
        self.octave_range
    }

    pub fn center_frequency_hz(&self) -> f64 {
        self.center_frequency_hz
    }

    pub fn set_relative_bandwidth(&mut self, relative_bandwidth: RelativeBandwidth) {
        self.relative_bandwidth = relative_bandwidth;
    }

    /// Select an octave range. If the current center frequency is not in
    /// the new range, it snaps to the range's nominal default.
    pub fn set_octave_range(&mut self, octave_range: OctaveRange) {
        self.octave_range = octave_range;
        if !octave_range.contains_center_frequency(self.center_frequency_hz) {
            self.center_frequency_hz =
                mapper::default_center_frequency_for_range(octave_range, false);
        }
    }

    /// Select a center frequency. If it lies outside the current octave
    /// range, the range snaps to the band containing the frequency.
    pub fn set_center_frequency(&mut self, center_frequency_hz: f64) {
        self.center_frequency_hz = center_frequency_hz;
        if !self.octave_range.contains_center_frequency(center_frequency_hz) {
            if let Ok(band) = mapper::band_for_frequency(center_frequency_hz) {
                self.octave_range = OctaveRange::Band(band);
            }
        }
    }

    /// Restore the default selection.
    pub fn reset(&mut self) {
        *self = FrequencyRangeSelection::default();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
