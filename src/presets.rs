//! Coefficient tables used for gesture windows.
//!
//! The coefficients are precomputed Butterworth designs normalized to
//! `a[0] = 1.0`. This crate does not design filters, it only applies them.

/// Numerator and denominator coefficients of a discrete-time transfer
/// function.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coefficients {
    /// The numerator (feed-forward) coefficients.
    pub b: Vec<f64>,
    /// The denominator (feed-back) coefficients, assuming `a[0] = 1.0`.
    pub a: Vec<f64>,
}

impl Coefficients {
    /// Creates a new coefficient pair.
    #[must_use]
    pub fn new(b: impl Into<Vec<f64>>, a: impl Into<Vec<f64>>) -> Self {
        Self {
            b: b.into(),
            a: a.into(),
        }
    }
}

/// Built-in filter designs for IMU gesture windows.
///
/// # Example
///
/// ```
/// use zerophase::{ButterworthFilter, FilterPreset};
///
/// let filter = ButterworthFilter::from_preset(FilterPreset::High)?;
/// assert_eq!(filter.ntaps(), 3);
/// assert_eq!(filter.min_signal_len(), 10);
/// # Ok::<(), zerophase::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FilterPreset {
    /// Second order band-pass, the default for gesture recognition.
    #[default]
    Standard,
    /// Second order band-pass with a low pass band.
    Low,
    /// Second order band-pass with a mid-range pass band.
    Mid,
    /// Second order high-pass.
    High,
}

impl FilterPreset {
    /// All presets, in declaration order.
    pub const ALL: [FilterPreset; 4] = [Self::Standard, Self::Low, Self::Mid, Self::High];

    /// Returns the coefficients of this preset.
    #[must_use]
    pub fn coefficients(self) -> Coefficients {
        match self {
            Self::Standard => Coefficients::new(
                [0.636_024_26, 0.0, -1.272_048_51, 0.0, 0.636_024_26],
                [1.0, -0.848_565_11, -0.870_908_05, 0.310_342_15, 0.409_231_66],
            ),
            Self::Low => Coefficients::new(
                [0.043_668_36, 0.0, -0.087_336_72, 0.0, 0.043_668_36],
                [1.0, -3.314_699_91, 4.136_217_7, -2.324_241_14, 0.502_769_22],
            ),
            Self::Mid => Coefficients::new(
                [0.274_726_85, 0.0, -0.549_453_7, 0.0, 0.274_726_85],
                [1.0, -0.879_029_61, 0.297_557_39, -0.177_485_27, 0.172_531_25],
            ),
            Self::High => Coefficients::new(
                [0.175_087_64, -0.350_175_29, 0.175_087_64],
                [1.0, 0.519_303_41, 0.219_653_98],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    use super::*;
    use crate::ButterworthFilter;

    #[test]
    fn default_is_standard() {
        assert_eq!(FilterPreset::default(), FilterPreset::Standard);
    }

    #[test]
    fn denominators_are_normalized() {
        for preset in FilterPreset::ALL {
            let Coefficients { b, a } = preset.coefficients();
            assert_eq!(a[0], 1.0, "{preset:?}");
            assert_eq!(a.len(), b.len(), "{preset:?}");
        }
    }

    #[test]
    fn presets_block_dc() {
        for preset in FilterPreset::ALL {
            let Coefficients { b, .. } = preset.coefficients();
            assert_abs_diff_eq!(b.iter().sum::<f64>(), 0.0, epsilon = 1e-7);
        }
    }

    #[test]
    fn presets_filter_gesture_windows() {
        let window: Vec<f64> = (0..100_i32)
            .map(|i| {
                let t = f64::from(i) * 0.01;
                9.81 + 0.2 * t + (2.0 * PI * 5.0 * t).sin()
            })
            .collect();

        for preset in FilterPreset::ALL {
            let filter = ButterworthFilter::from_preset(preset).unwrap();
            let filtered = filter.filter(&window).unwrap();

            assert_eq!(filtered.len(), window.len());
            assert!(filtered.iter().all(|value| value.is_finite()), "{preset:?}");
        }
    }

    #[test]
    fn coefficients_build_filters() {
        let coefficients = Coefficients::new([0.5, 0.5], [1.0]);
        let filter = ButterworthFilter::from_coefficients(&coefficients).unwrap();

        assert_eq!(filter.b(), &[0.5, 0.5]);
        assert_eq!(filter.a(), &[1.0, 0.0]);
    }
}
