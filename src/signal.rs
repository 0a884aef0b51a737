// Frequency-signal helpers shared by the smoothing kernel and downstream
// magnitude/phase conditioning call sites.

use std::f64::consts::PI;

use crate::error::EngineError;

/// Ratio between a one-octave bandwidth and its quality factor.
///
/// The textbook value from `N = (2/ln2)·sinh⁻¹(1/(2Q))` is close to 1.41,
/// but 1.43 is the historical constant used by compatible tooling; keep it.
pub const OCTAVE_BANDWIDTH_TO_Q_RATIO: f64 = 1.43;

/// Convert a linear magnitude to decibels: `20·log10(x)`.
pub fn magnitude_to_db(magnitude: f64) -> f64 {
    20.0 * magnitude.log10()
}

/// Convert decibels to a linear magnitude: `10^(dB/20)`.
pub fn db_to_magnitude(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert a linear power ratio to decibels: `10·log10(x)`.
pub fn power_ratio_to_db(power_ratio: f64) -> f64 {
    10.0 * power_ratio.log10()
}

/// Convert decibels to a linear power ratio: `10^(dB/10)`.
pub fn db_to_power_ratio(db: f64) -> f64 {
    10.0_f64.powf(db / 10.0)
}

/// Linear voltage ratio equivalent to a dB power level: `10^(dB/20)`.
/// For all but peaking and shelving filters.
pub fn voltage_ratio(power_ratio_db: f64) -> f64 {
    10.0_f64.powf(power_ratio_db / 20.0)
}

/// Linear voltage ratio for peaking and shelving filters: `10^(dB/40)`.
pub fn peaking_voltage_ratio(power_ratio_db: f64) -> f64 {
    10.0_f64.powf(power_ratio_db / 40.0)
}

/// Angular frequency in radians per second for a frequency in Hz.
pub fn angular_frequency(frequency_hz: f64) -> f64 {
    2.0 * PI * frequency_hz
}

/// Convert a bandwidth in octaves to a quality factor (Q).
pub fn bandwidth_to_q(bandwidth_octaves: f64) -> f64 {
    OCTAVE_BANDWIDTH_TO_Q_RATIO / bandwidth_octaves
}

/// Format a frequency for display: Hz below 1 kHz with up to one decimal,
/// kHz above with up to four.
pub fn format_frequency(frequency_hz: f64) -> String {
    if frequency_hz < 1000.0 {
        let rounded = (frequency_hz * 10.0).round() / 10.0;
        if rounded.fract() == 0.0 {
            format!("{} Hz", rounded as i64)
        } else {
            format!("{rounded} Hz")
        }
    } else {
        let khz = (frequency_hz / 1000.0 * 10000.0).round() / 10000.0;
        if khz.fract() == 0.0 {
            format!("{} kHz", khz as i64)
        } else {
            format!("{khz} kHz")
        }
    }
}

/// Parse a possibly metric-abbreviated frequency string back to Hz.
///
/// Accepts `"250"`, `"250 Hz"`, `"250Hz"`, `"1.25 kHz"`. The unit suffix is
/// optional; a `kHz` suffix scales by 1000.
pub fn parse_frequency(s: &str) -> Result<f64, EngineError> {
    let trimmed = s.trim();
    let (numeric, scale) = if let Some(stripped) = trimmed.strip_suffix("kHz") {
        (stripped, 1000.0)
    } else if let Some(stripped) = trimmed.strip_suffix("Hz") {
        (stripped, 1.0)
    } else {
        (trimmed, 1.0)
    };

    let value: f64 = numeric.trim().parse().map_err(|_| EngineError::InvalidArgument {
        message: format!("invalid frequency: '{s}'"),
    })?;
    Ok(value * scale)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
