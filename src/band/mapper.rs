use crate::error::EngineError;

use super::{
    OctaveBand, OctaveRange, HIGH_FREQUENCY_LIMIT_HZ, LOW_FREQUENCY_LIMIT_HZ, OCTAVE_BANDS,
    WIDE_BAND_CENTER_FREQUENCY_DEFAULT_HZ,
};

/// Third-octave band number of the 1 kHz reference band.
const THIRD_OCTAVE_BAND_NUMBER_AT_1KHZ: f64 = 30.0;

/// Classify a frequency into one of the eleven standard octave bands.
///
/// Frequencies below 10 Hz clamp to the first band; frequencies at or above
/// 20 kHz clamp to the last. Only non-positive or non-finite input is an
/// error.
pub fn band_for_frequency(frequency_hz: f64) -> Result<OctaveBand, EngineError> {
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
        return Err(EngineError::InvalidArgument {
            message: format!("frequency must be positive and finite, got {frequency_hz}"),
        });
    }

    if frequency_hz < LOW_FREQUENCY_LIMIT_HZ {
        return Ok(OCTAVE_BANDS[0]);
    }
    if frequency_hz >= HIGH_FREQUENCY_LIMIT_HZ {
        return Ok(OCTAVE_BANDS[10]);
    }

    let band = OCTAVE_BANDS
        .iter()
        .copied()
        .find(|band| {
            let (low, high) = band.bounds();
            frequency_hz >= low && frequency_hz < high
        })
        .unwrap_or(OCTAVE_BANDS[10]);
    Ok(band)
}

/// Nominal center frequency of a band (see
/// [`OctaveBand::nominal_center_frequency`] for the narrow-band variants).
pub fn nominal_center_frequency(band: OctaveBand, narrow_band: bool) -> f64 {
    band.nominal_center_frequency(narrow_band)
}

/// Center frequency from a fractional-octave band number.
///
/// Implements `fc = 1000 · 2^((n − n1k)/O)` where `n1k = round((O/3)·30)`
/// is the band number of 1 kHz under octave divider `O`. At `O = 3`,
/// band 30 is exactly 1 kHz.
pub fn center_frequency_from_band_number(
    band_number: i32,
    octave_divider: u32,
) -> Result<f64, EngineError> {
    if octave_divider == 0 {
        return Err(EngineError::InvalidArgument {
            message: "octave divider must be positive".to_string(),
        });
    }

    let divider = f64::from(octave_divider);
    let divider_ratio = divider / 3.0;
    let band_number_at_1khz = (divider_ratio * THIRD_OCTAVE_BAND_NUMBER_AT_1KHZ).round();
    let bands_from_1khz = f64::from(band_number) - band_number_at_1khz;
    Ok(1000.0 * 2.0_f64.powf(bands_from_1khz / divider))
}

/// Ordinal offset (0–10) of an octave-range label from the 10 Hz origin.
///
/// Unknown labels return 0. This is a legacy fallback: call sites index
/// parallel per-band arrays with the result and expect a valid offset.
pub fn octave_offset_from_10hz(octave_range_label: &str) -> usize {
    OctaveBand::from_label(octave_range_label)
        .map(OctaveBand::index)
        .unwrap_or(0)
}

/// Nominal default center frequency for an octave-range selection.
/// The wide-band range defaults to 4 kHz.
pub fn default_center_frequency_for_range(range: OctaveRange, narrow_band: bool) -> f64 {
    match range {
        OctaveRange::Wide => WIDE_BAND_CENTER_FREQUENCY_DEFAULT_HZ,
        OctaveRange::Band(band) => band.nominal_center_frequency(narrow_band),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_audible_frequency_maps_to_exactly_one_band() {
        // Sweep the full range on a fine grid; each frequency must land in
        // exactly one band, and that band's bounds must contain it.
        let mut f = 10.0;
        while f < 20000.0 {
            let band = band_for_frequency(f).unwrap();
            let (low, high) = band.bounds();
            assert!(
                f >= low && f < high,
                "{f} Hz mapped to {:?} with bounds [{low}, {high})",
                band
            );
            f += 7.3;
        }
    }

    #[test]
    fn out_of_range_frequencies_clamp() {
        assert_eq!(band_for_frequency(1.0).unwrap(), OctaveBand::Hz10To20);
        assert_eq!(band_for_frequency(9.99).unwrap(), OctaveBand::Hz10To20);
        assert_eq!(
            band_for_frequency(20000.0).unwrap(),
            OctaveBand::Hz10000To20000
        );
        assert_eq!(
            band_for_frequency(96000.0).unwrap(),
            OctaveBand::Hz10000To20000
        );
    }

    #[test]
    fn invalid_frequencies_fail() {
        assert!(band_for_frequency(0.0).is_err());
        assert!(band_for_frequency(-100.0).is_err());
        assert!(band_for_frequency(f64::NAN).is_err());
        assert!(band_for_frequency(f64::INFINITY).is_err());
    }

    #[test]
    fn band_30_at_third_octave_is_1khz() {
        let fc = center_frequency_from_band_number(30, 3).unwrap();
        assert_eq!(fc, 1000.0);
    }

    #[test]
    fn band_number_formula_tracks_divider() {
        // One third-octave step up from 1 kHz.
        let fc = center_frequency_from_band_number(31, 3).unwrap();
        assert!((fc - 1000.0 * 2.0_f64.powf(1.0 / 3.0)).abs() < 1e-9);

        // 1 kHz anchors at band 300 under a 1/30-octave-compatible divider:
        // n1k = round((30/3)*30) = 300.
        let fc = center_frequency_from_band_number(300, 30).unwrap();
        assert_eq!(fc, 1000.0);

        // Sixth-octave: n1k = 60, one step down is 2^(-1/6).
        let fc = center_frequency_from_band_number(59, 6).unwrap();
        assert!((fc - 1000.0 * 2.0_f64.powf(-1.0 / 6.0)).abs() < 1e-9);
    }

    #[test]
    fn zero_divider_fails() {
        assert!(center_frequency_from_band_number(30, 0).is_err());
    }

    #[test]
    fn analytic_formula_consistent_with_nominal_third_octave_centers() {
        // The third-octave grid hits 10 Hz at band 10, 100 Hz at band 20,
        // 1 kHz at band 30, 10 kHz at band 40 (within renard rounding).
        for (band_number, nominal) in [(10, 10.0), (20, 100.0), (30, 1000.0), (40, 10000.0)] {
            let fc = center_frequency_from_band_number(band_number, 3).unwrap();
            assert!(
                (fc / nominal - 1.0).abs() < 0.01,
                "band {band_number}: {fc} vs nominal {nominal}"
            );
        }
    }

    #[test]
    fn nominal_centers_round_trip_through_classification() {
        for band in OCTAVE_BANDS {
            let fc = nominal_center_frequency(band, false);
            assert_eq!(band_for_frequency(fc).unwrap(), band, "{fc} Hz");
        }
    }

    #[test]
    fn narrow_centers_round_trip_through_classification() {
        for band in OCTAVE_BANDS {
            let fc = nominal_center_frequency(band, true);
            assert_eq!(band_for_frequency(fc).unwrap(), band, "{fc} Hz");
        }
    }

    #[test]
    fn octave_offsets_cover_all_labels() {
        assert_eq!(octave_offset_from_10hz("10 Hz to 20 Hz"), 0);
        assert_eq!(octave_offset_from_10hz("630 Hz to 1.25 kHz"), 6);
        assert_eq!(octave_offset_from_10hz("10 kHz to 20 kHz"), 10);
    }

    #[test]
    fn unknown_label_offsets_to_zero() {
        // Legacy fallback, relied on by parallel-array call sites.
        assert_eq!(octave_offset_from_10hz("not a range"), 0);
        assert_eq!(octave_offset_from_10hz(""), 0);
    }

    #[test]
    fn default_centers_for_ranges() {
        assert_eq!(
            default_center_frequency_for_range(OctaveRange::Wide, false),
            4000.0
        );
        assert_eq!(
            default_center_frequency_for_range(OctaveRange::Band(OctaveBand::Hz20To40), true),
            31.2
        );
    }
}
