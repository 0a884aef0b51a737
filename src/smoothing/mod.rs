use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::error::EngineError;
use crate::signal;

// ---------------------------------------------------------------------------
// Data model
// ---------------------------------------------------------------------------

/// Half-width of the per-bin analysis window, in bins.
///
/// The window spans `[i - 15, i + 15]`, so a smoothing table row holds at
/// most `2 * 15 + 1` weights. The radius and the table's second dimension
/// are one contract: change them together.
pub const SMOOTHING_WINDOW_RADIUS: usize = 15;

/// Second dimension of a smoothing table row.
pub const SMOOTHING_TABLE_WIDTH: usize = 2 * SMOOTHING_WINDOW_RADIUS + 1;

/// Reference attenuation defining the kernel's half-width, in dB.
const HALF_WIDTH_REFERENCE_DB: f64 = -6.0;

/// Smoothing resolution selection, keyed by octave divider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Smoothing {
    #[default]
    NarrowBand,
    ThirdOctaveBand,
    SixthOctaveBand,
}

impl Smoothing {
    /// Octave divider for this smoothing; 0 means narrow band (none).
    pub fn octave_divider(self) -> u32 {
        match self {
            Smoothing::NarrowBand => 0,
            Smoothing::ThirdOctaveBand => 3,
            Smoothing::SixthOctaveBand => 6,
        }
    }

    /// Map an octave divider back to a smoothing selection. Unknown
    /// dividers fall back to narrow band (legacy behavior).
    pub fn from_octave_divider(octave_divider: u32) -> Smoothing {
        match octave_divider {
            3 => Smoothing::ThirdOctaveBand,
            6 => Smoothing::SixthOctaveBand,
            _ => Smoothing::NarrowBand,
        }
    }

    /// Presentation value, also the persisted form.
    pub fn presentation(self) -> &'static str {
        match self {
            Smoothing::NarrowBand => "No Smoothing",
            Smoothing::ThirdOctaveBand => "1/3 Octave Smoothing",
            Smoothing::SixthOctaveBand => "1/6 Octave Smoothing",
        }
    }

    /// Parse a presentation string, falling back to narrow band.
    pub fn from_presentation(s: &str) -> Smoothing {
        match s {
            "1/3 Octave Smoothing" => Smoothing::ThirdOctaveBand,
            "1/6 Octave Smoothing" => Smoothing::SixthOctaveBand,
            _ => Smoothing::NarrowBand,
        }
    }
}

impl Serialize for Smoothing {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.presentation())
    }
}

impl<'de> Deserialize<'de> for Smoothing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Smoothing::from_presentation(&s))
    }
}

// ---------------------------------------------------------------------------
// Smoothing table
// ---------------------------------------------------------------------------

/// Per-bin Gaussian weight table for fractional-octave smoothing.
///
/// Built once per `(frequency bins, octave divider)` pair and reused across
/// applications; immutable after construction and safe to share read-only.
/// Rebuild only when the bin layout or the divider changes.
#[derive(Debug, Clone)]
pub struct SmoothingTable {
    weights: Vec<[f64; SMOOTHING_TABLE_WIDTH]>,
    octave_divider: u32,
}

impl SmoothingTable {
    /// Build the Gaussian-in-log-frequency kernel for the given bin layout.
    ///
    /// The kernel weight for window bin `j` around center bin `i` is
    /// `exp(-ln(f_j / f_i)² / w)` with `w` sized so the kernel's −6 dB
    /// half-width spans `1/octave_divider` octave. Bin frequencies must be
    /// positive and finite.
    pub fn build(frequency_bins: &[f64], octave_divider: u32) -> Result<Self, EngineError> {
        if octave_divider == 0 {
            return Err(EngineError::InvalidArgument {
                message: "octave divider must be positive".to_string(),
            });
        }
        if let Some(bad) = frequency_bins
            .iter()
            .find(|f| !f.is_finite() || **f <= 0.0)
        {
            return Err(EngineError::InvalidArgument {
                message: format!("frequency bins must be positive and finite, got {bad}"),
            });
        }

        let voltage_ratio = signal::voltage_ratio(HALF_WIDTH_REFERENCE_DB);
        let window_center = (std::f64::consts::LN_2 / (f64::from(octave_divider) * 2.0)).exp();
        let ln_window_center = window_center.ln();
        let window_width = -(ln_window_center * ln_window_center) / voltage_ratio.ln();

        let num_bins = frequency_bins.len();
        let mut weights = vec![[0.0; SMOOTHING_TABLE_WIDTH]; num_bins];

        for (bin_index, row) in weights.iter_mut().enumerate() {
            let window_start = bin_index.saturating_sub(SMOOTHING_WINDOW_RADIUS);
            let window_end = bin_index + SMOOTHING_WINDOW_RADIUS;
            let ln_reference = frequency_bins[bin_index].ln();

            for (smoothing_index, window_index) in (window_start..=window_end).enumerate() {
                if window_index >= num_bins {
                    break;
                }
                let ln_offset = frequency_bins[window_index].ln() - ln_reference;
                row[smoothing_index] = (-(ln_offset * ln_offset) / window_width).exp();
            }
        }

        debug!(
            "built smoothing table: {} bins, 1/{} octave",
            num_bins, octave_divider
        );

        Ok(SmoothingTable {
            weights,
            octave_divider,
        })
    }

    /// Number of frequency bins the table was built for.
    pub fn num_bins(&self) -> usize {
        self.weights.len()
    }

    /// Octave divider the table was built for.
    pub fn octave_divider(&self) -> u32 {
        self.octave_divider
    }

    /// Smooth `input` into `output` using the precomputed weights.
    ///
    /// Each output bin is the weighted average of the input over the same
    /// window used to build the table, normalized by the sum of weights
    /// actually used (which handles the clamped left edge). A zero weight
    /// sum produces 0 rather than a division by zero.
    ///
    /// Only third- and sixth-octave smoothing are supported. The divider
    /// is validated but does not otherwise select behavior; the weights
    /// come from the table.
    pub fn apply(
        &self,
        input: &[f64],
        output: &mut [f64],
        octave_divider: u32,
    ) -> Result<(), EngineError> {
        if octave_divider != 3 && octave_divider != 6 {
            return Err(EngineError::UnsupportedSmoothing { octave_divider });
        }
        let num_bins = self.weights.len();
        if input.len() != num_bins || output.len() != num_bins {
            return Err(EngineError::InvalidArgument {
                message: format!(
                    "length mismatch: table has {} bins, input {}, output {}",
                    num_bins,
                    input.len(),
                    output.len()
                ),
            });
        }

        for (bin_index, row) in self.weights.iter().enumerate() {
            let window_start = bin_index.saturating_sub(SMOOTHING_WINDOW_RADIUS);
            let window_end = bin_index + SMOOTHING_WINDOW_RADIUS;

            let mut accumulated = 0.0;
            let mut weight_sum = 0.0;
            for (smoothing_index, window_index) in (window_start..=window_end).enumerate() {
                if window_index >= num_bins {
                    break;
                }
                let weight = row[smoothing_index];
                accumulated += weight * input[window_index];
                weight_sum += weight;
            }

            output[bin_index] = if weight_sum > 0.0 {
                accumulated / weight_sum
            } else {
                0.0
            };
        }

        Ok(())
    }
}

/// Build a table and apply it in one call.
///
/// Convenience for one-shot use; callers smoothing many spectra over the
/// same bin layout should build the table once and reuse it.
pub fn smooth_spectrum(
    frequency_bins: &[f64],
    magnitudes: &[f64],
    octave_divider: u32,
) -> Result<Vec<f64>, EngineError> {
    debug!(
        "smooth_spectrum: {} points, 1/{} octave",
        magnitudes.len(),
        octave_divider
    );
    let table = SmoothingTable::build(frequency_bins, octave_divider)?;
    let mut output = vec![0.0; magnitudes.len()];
    table.apply(magnitudes, &mut output, octave_divider)?;
    Ok(output)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
