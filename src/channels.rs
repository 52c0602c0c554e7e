//! Column-wise filtering of fixed-width sample frames.
//!
//! A window of IMU data is usually stored row by row, one frame of `N`
//! channels per sample (e.g. three accelerometer and three gyroscope axes).
//! These helpers run [`ButterworthFilter::filter`] over every channel
//! independently and write the result back into the same layout.

use log::warn;

use crate::butterworth::ButterworthFilter;
use crate::error::Result;

impl ButterworthFilter {
    /// Filters every channel of `frames` independently.
    ///
    /// # Errors
    ///
    /// Fails with the first channel error, see [`ButterworthFilter::filter`].
    /// Since all channels share the window length, either all channels are
    /// filtered or none are.
    ///
    /// # Example
    ///
    /// ```
    /// use zerophase::{ButterworthFilter, FilterPreset};
    ///
    /// let filter = ButterworthFilter::from_preset(FilterPreset::Standard)?;
    /// let frames: Vec<[f64; 3]> = (0..64_i32)
    ///     .map(|i| {
    ///         let t = f64::from(i) * 0.01;
    ///         [t.sin(), t.cos(), 9.81]
    ///     })
    ///     .collect();
    ///
    /// let filtered = filter.filter_frames(&frames)?;
    /// assert_eq!(filtered.len(), frames.len());
    /// # Ok::<(), zerophase::Error>(())
    /// ```
    pub fn filter_frames<const N: usize>(&self, frames: &[[f64; N]]) -> Result<Vec<[f64; N]>> {
        let mut filtered = vec![[0.0; N]; frames.len()];

        for channel in 0..N {
            let column = self.filter(&Self::column(frames, channel))?;
            for (frame, value) in filtered.iter_mut().zip(column) {
                frame[channel] = value;
            }
        }

        Ok(filtered)
    }

    /// Filters every channel of `frames` independently, passing through the
    /// raw samples of any channel that cannot be filtered.
    #[must_use]
    pub fn filter_frames_or_raw<const N: usize>(&self, frames: &[[f64; N]]) -> Vec<[f64; N]> {
        let mut filtered = frames.to_vec();

        for channel in 0..N {
            match self.filter(&Self::column(frames, channel)) {
                Ok(column) => {
                    for (frame, value) in filtered.iter_mut().zip(column) {
                        frame[channel] = value;
                    }
                }
                Err(error) => {
                    warn!("channel {channel} left unfiltered: {error}");
                }
            }
        }

        filtered
    }

    fn column<const N: usize>(frames: &[[f64; N]], channel: usize) -> Vec<f64> {
        frames.iter().map(|frame| frame[channel]).collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::Error;

    fn frames(len: i32) -> Vec<[f64; 3]> {
        (0..len)
            .map(|i| {
                let t = f64::from(i);
                [2.0 * t - 1.0, (t * 0.4).sin(), (t * 0.1).cos() + 0.05 * t]
            })
            .collect()
    }

    #[test]
    fn channels_match_single_signal_filtering() {
        let filter =
            ButterworthFilter::new([0.0675, 0.1349, 0.0675], [1.0, -1.1430, 0.4128]).unwrap();
        let frames = frames(80);

        let filtered = filter.filter_frames(&frames).unwrap();
        assert_eq!(filtered.len(), frames.len());

        for frame in &filtered {
            assert_abs_diff_eq!(frame[0], 0.0, epsilon = 1e-9);
        }

        for channel in 1..3 {
            let column: Vec<f64> = frames.iter().map(|frame| frame[channel]).collect();
            let expected = filter.filter(&column).unwrap();
            for (frame, value) in filtered.iter().zip(expected) {
                assert_eq!(frame[channel], value);
            }
        }
    }

    #[test]
    fn short_window_fails() {
        let filter = ButterworthFilter::new([0.5, 0.5], [1.0, 0.0]).unwrap();
        let frames = frames(5);

        assert_eq!(
            filter.filter_frames(&frames),
            Err(Error::InsufficientSignalLength {
                len: 5,
                required: 7,
            })
        );
    }

    #[test]
    fn short_window_passes_through_raw() {
        let filter = ButterworthFilter::new([0.5, 0.5], [1.0, 0.0]).unwrap();
        let frames = frames(5);

        assert_eq!(filter.filter_frames_or_raw(&frames), frames);
        assert!(filter.filter_frames_or_raw::<6>(&[]).is_empty());
    }

    #[test]
    fn long_window_is_filtered_in_place_of_raw() {
        let filter = ButterworthFilter::new([0.5, 0.5], [1.0, 0.0]).unwrap();
        let frames = frames(40);

        assert_eq!(
            filter.filter_frames_or_raw(&frames),
            filter.filter_frames(&frames).unwrap()
        );
    }
}
