//! Zero-phase Butterworth filtering for wrist-worn IMU signals.
//!
//! Accelerometer and gyroscope windows are cleaned in one call to
//! [`ButterworthFilter::filter`], which removes the linear trend, extends the
//! window by an odd reflection, and runs the filter forward and backward so
//! that the result has no phase delay.
//!
//! ```
//! use zerophase::{ButterworthFilter, FilterPreset};
//!
//! let filter = ButterworthFilter::from_preset(FilterPreset::Standard)?;
//!
//! let window: Vec<f64> = (0..100_i32)
//!     .map(|i| (f64::from(i) * 0.3).sin() + 0.01 * f64::from(i))
//!     .collect();
//! let filtered = filter.filter(&window)?;
//!
//! assert_eq!(filtered.len(), window.len());
//! # Ok::<(), zerophase::Error>(())
//! ```
//!
//! Filter coefficients are an input: either pass `b`/`a` directly to
//! [`ButterworthFilter::new`], or pick one of the [`FilterPreset`] tables.
//! The orientation estimator that consumes the same sensor streams is only
//! modelled as an interface, see [`orientation::OrientationEstimator`].

pub mod butterworth;
mod channels;
mod error;
pub mod orientation;
pub mod presets;

pub use butterworth::{detrend, ButterworthFilter};
pub use error::{Error, Result};
pub use presets::{Coefficients, FilterPreset};
