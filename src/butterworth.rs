//! Zero-phase Butterworth filtering of bounded signal segments.
//!
//! [`ButterworthFilter`] runs a recursive filter forward and then backward
//! over a signal (`filtfilt`), cancelling the phase delay of the recursion.
//! Before filtering, the signal is linearly detrended and extended at both
//! ends by an odd reflection, so that the start-up transients of both passes
//! decay inside the extension instead of the data.

use log::{debug, trace};
use nalgebra::DVector;

use crate::error::{Error, Result};
use crate::presets::{Coefficients, FilterPreset};

/// `Σa` magnitudes at or below this are treated as zero when seeding the state.
const DC_GAIN_EPSILON: f64 = 1e-6;

/// Removes the least-squares linear trend from `signal`.
///
/// Signals with at most one sample are returned unchanged.
///
/// # Example
///
/// ```
/// use zerophase::butterworth::detrend;
///
/// let residual = detrend(&[1.0, 3.0, 2.0]);
/// assert_eq!(residual, vec![-0.5, 1.0, -0.5]);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn detrend(signal: &[f64]) -> Vec<f64> {
    let n = signal.len();
    if n <= 1 {
        return signal.to_vec();
    }

    let y = DVector::from_vec(signal.to_vec());
    let x = DVector::from_fn(n, |i, _| i as f64);

    let mean_x = x.mean();
    let mean_y = y.mean();

    let dx = x.add_scalar(-mean_x);
    let dy = y.add_scalar(-mean_y);

    let denominator = dx.dot(&dx);
    let slope = if denominator == 0.0 {
        0.0
    } else {
        dx.dot(&dy) / denominator
    };
    let intercept = mean_y - slope * mean_x;

    y.zip_map(&x, |value, index| value - (slope * index + intercept))
        .as_slice()
        .to_vec()
}

/// A zero-phase IIR filter defined by its transfer function coefficients.
///
/// The numerator `b` and denominator `a` are zero-padded to a common length
/// `ntaps` on construction and never change afterwards, so one filter can be
/// shared between threads and reused for any number of independent signals.
///
/// The denominator is assumed to be normalized, i.e. `a[0] == 1.0`. It is
/// stored as given; un-normalized coefficients yield a different filter than
/// the normalized transfer function would.
///
/// # Example
///
/// ```
/// use zerophase::ButterworthFilter;
///
/// let filter = ButterworthFilter::new([0.5, 0.5], [1.0, 0.0])?;
///
/// // A perfectly linear signal detrends to zero, and so filters to zero.
/// let signal: Vec<f64> = (1..=13_i32).map(f64::from).collect();
/// let filtered = filter.filter(&signal)?;
///
/// assert_eq!(filtered.len(), signal.len());
/// assert!(filtered.iter().all(|value| value.abs() < 1e-9));
/// # Ok::<(), zerophase::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ButterworthFilter {
    /// The numerator (feed-forward) coefficients.
    b: DVector<f64>,
    /// The denominator (feed-back) coefficients, assuming `a[0] = 1.0`.
    a: DVector<f64>,
}

impl ButterworthFilter {
    /// Creates a new filter from numerator `b` and denominator `a`.
    ///
    /// The shorter sequence is padded with zeros to the length of the longer
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoefficients`] if both sequences are empty.
    pub fn new(b: impl Into<Vec<f64>>, a: impl Into<Vec<f64>>) -> Result<Self> {
        let mut b = b.into();
        let mut a = a.into();

        if b.is_empty() && a.is_empty() {
            return Err(Error::InvalidCoefficients);
        }

        let ntaps = b.len().max(a.len());
        b.resize(ntaps, 0.0);
        a.resize(ntaps, 0.0);

        debug!("created zero-phase filter with {ntaps} taps, b = {b:?}, a = {a:?}");

        Ok(Self {
            b: DVector::from_vec(b),
            a: DVector::from_vec(a),
        })
    }

    /// Creates a new filter from a [`Coefficients`] pair.
    ///
    /// # Errors
    ///
    /// See [`ButterworthFilter::new`].
    pub fn from_coefficients(coefficients: &Coefficients) -> Result<Self> {
        Self::new(coefficients.b.as_slice(), coefficients.a.as_slice())
    }

    /// Creates a new filter using one of the built-in coefficient tables.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in tables, the signature matches
    /// [`ButterworthFilter::new`].
    pub fn from_preset(preset: FilterPreset) -> Result<Self> {
        Self::from_coefficients(&preset.coefficients())
    }

    /// The numerator coefficients, zero-padded to [`Self::ntaps`].
    #[must_use]
    pub fn b(&self) -> &[f64] {
        self.b.as_slice()
    }

    /// The denominator coefficients, zero-padded to [`Self::ntaps`].
    #[must_use]
    pub fn a(&self) -> &[f64] {
        self.a.as_slice()
    }

    /// Number of filter taps, `max(len(a), len(b))`.
    #[must_use]
    pub fn ntaps(&self) -> usize {
        self.b.len()
    }

    /// Number of samples added by the odd extension on each side of a signal.
    #[must_use]
    pub fn edge(&self) -> usize {
        3 * self.ntaps()
    }

    /// The shortest signal [`Self::filter`] accepts.
    #[must_use]
    pub fn min_signal_len(&self) -> usize {
        self.edge() + 1
    }

    /// Removes the least-squares linear trend from `signal`.
    ///
    /// This is the same as the free function [`detrend`], exposed on the
    /// filter for callers that only hold a filter.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn detrend(&self, signal: &[f64]) -> Vec<f64> {
        detrend(signal)
    }

    /// Detrends `signal` and filters it forward and backward, returning a
    /// zero-phase filtered signal of the same length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientSignalLength`] if `signal` is not longer
    /// than [`Self::edge`]. No output is produced in that case.
    pub fn filter(&self, signal: &[f64]) -> Result<Vec<f64>> {
        let detrended = detrend(signal);
        let (edge, padded) = self.validate_pad(&detrended)?;
        let zi = self.lfilter_zi();

        let x0 = padded[0];
        let (mut forward, _) = self.lfilter(&padded, &zi * x0);

        let y0 = forward[forward.len() - 1];
        forward.reverse();
        let (mut output, _) = self.lfilter(&forward, zi * y0);
        output.reverse();

        trace!(
            "filtered {} samples, edge = {edge}, padded length = {}",
            detrended.len(),
            padded.len()
        );

        output.truncate(output.len() - edge);
        output.drain(..edge);
        Ok(output)
    }

    /// Extends `signal` by `edge` samples on both sides using an odd
    /// reflection about its first and last sample.
    ///
    /// Returns the extension length together with the padded signal.
    pub(crate) fn validate_pad(&self, signal: &[f64]) -> Result<(usize, Vec<f64>)> {
        let edge = self.edge();
        let n = signal.len();

        if n <= edge {
            return Err(Error::InsufficientSignalLength {
                len: n,
                required: self.min_signal_len(),
            });
        }

        let first = signal[0];
        let last = signal[n - 1];

        let mut padded = vec![0.0; n + 2 * edge];
        padded[edge..edge + n].copy_from_slice(signal);

        let end = padded.len() - 1;
        for i in 0..edge {
            padded[i] = 2.0 * first - signal[edge - i - 1];
            padded[end - i] = 2.0 * last - signal[n - 2 - i];
        }

        Ok((edge, padded))
    }

    /// Initial state of a single filter pass, for a unit boundary value.
    ///
    /// Every entry holds the DC gain `Σb / Σa`, or zero when `Σa` vanishes.
    pub(crate) fn lfilter_zi(&self) -> DVector<f64> {
        let sum_a = self.a.sum();
        let gain = if sum_a.abs() > DC_GAIN_EPSILON {
            self.b.sum() / sum_a
        } else {
            0.0
        };

        DVector::from_element(self.ntaps() - 1, gain)
    }

    /// Runs the transposed direct form II recursion over `signal`, starting
    /// from state `zi`.
    ///
    /// Returns the output and the final state.
    pub(crate) fn lfilter(&self, signal: &[f64], zi: DVector<f64>) -> (Vec<f64>, DVector<f64>) {
        let order = zi.len();
        let mut z = zi;
        let mut output = Vec::with_capacity(signal.len());

        for &x in signal {
            let y = self.b[0] * x + if order > 0 { z[0] } else { 0.0 };

            for j in 1..=order {
                let carry = if j < order { z[j] } else { 0.0 };
                z[j - 1] = self.b[j] * x - self.a[j] * y + carry;
            }

            output.push(y);
        }

        (output, z)
    }
}
