//! Interface to the orientation estimator that runs alongside the filter.
//!
//! The estimator fuses gyroscope and accelerometer samples into a 6D
//! orientation quaternion (no magnetometer). Its algorithm lives outside this
//! crate, only the narrow interface the host drives it through is modelled
//! here, together with a helper that replays recorded sample streams.

use nalgebra::{Quaternion, UnitQuaternion};

use crate::error::{Error, Result};

/// Sample time of the wrist sensor in seconds, i.e. `100Hz = 0.01 seconds`.
pub const DEFAULT_SAMPLE_TIME: f64 = 0.01;

/// A stateful gyroscope/accelerometer orientation estimator.
pub trait OrientationEstimator {
    /// Creates a new estimator for the given gyroscope and accelerometer
    /// sample times, in seconds.
    fn new(gyro_sample_time: f64, accel_sample_time: f64) -> Self
    where
        Self: Sized;

    /// Feeds one gyroscope sample in rad/s, taken `dt` seconds after the
    /// previous one.
    fn update_gyr(&mut self, dt: f64, gyr: [f64; 3]);

    /// Feeds one accelerometer sample in m/s^2, taken `dt` seconds after the
    /// previous one.
    fn update_acc(&mut self, dt: f64, acc: [f64; 3]);

    /// Returns the current 6D orientation as `[w, x, y, z]`.
    fn quat_6d(&self) -> [f64; 4];

    /// Returns the current 6D orientation as a unit quaternion.
    fn orientation(&self) -> UnitQuaternion<f64> {
        let [w, x, y, z] = self.quat_6d();
        UnitQuaternion::from_quaternion(Quaternion::new(w, x, y, z))
    }
}

/// Replays paired gyroscope and accelerometer samples through `estimator`,
/// returning the orientation after each pair.
///
/// Each pair is fed gyroscope first, then accelerometer, both with the same
/// `dt`.
///
/// # Errors
///
/// Returns [`Error::SampleCountMismatch`] if the streams differ in length.
/// The estimator is left untouched in that case.
pub fn track_orientation<E>(
    estimator: &mut E,
    dt: f64,
    gyr: &[[f64; 3]],
    acc: &[[f64; 3]],
) -> Result<Vec<[f64; 4]>>
where
    E: OrientationEstimator + ?Sized,
{
    if gyr.len() != acc.len() {
        return Err(Error::SampleCountMismatch {
            gyroscope: gyr.len(),
            accelerometer: acc.len(),
        });
    }

    Ok(gyr
        .iter()
        .zip(acc)
        .map(|(&gyr, &acc)| {
            estimator.update_gyr(dt, gyr);
            estimator.update_acc(dt, acc);
            estimator.quat_6d()
        })
        .collect())
}
