//! The McLeod Pitch Method detector.
//!
//! The algorithm is described in *[A Smarter Way to Find
//! Pitch](http://www.cs.otago.ac.nz/tartini/papers/A_Smarter_Way_to_Find_Pitch.pdf)*
//! by Philip McLeod and Geoff Wyvill. For a window of $N$ samples it
//! computes the *normalised square difference function*
//! $$ n(\tau) = \frac{2\,r'(\tau)}{m'(\tau)}, $$
//! which is bounded in $[-1, 1]$ and equals $1$ at lags where the window
//! lines up perfectly with itself. The lag of the first sufficiently high
//! *key maximum* of $n$ determines the pitch period, and the interpolated
//! value of $n$ at that lag is reported as the *clarity* of the estimate.

use crate::autocorr::Autocorrelator;
use crate::error::Error;
use crate::float::Float;
use crate::utils::buffer::{new_real_buffer, square_sum};
use crate::utils::peak::key_maxima;

#[doc(hidden)]
pub mod internals;

/// A pitch estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pitch<T>
where
    T: Float,
{
    /// The estimated fundamental frequency in hertz.
    pub frequency: T,
    /// How tonal the analyzed window is, between 0 and 1. A clarity close
    /// to 1 indicates a nearly perfectly periodic window.
    pub clarity: T,
}

/// A reusable monophonic pitch detector for windows of a fixed length.
///
/// A detector is created once for a given window length and then fed one
/// window at a time; all scratch buffers are owned by the instance, so the
/// steady-state [`find_pitch`](Self::find_pitch) path does not allocate.
/// The detector keeps no state between windows apart from those buffers,
/// whose contents are unspecified between calls.
pub struct PitchDetector<T>
where
    T: Float,
{
    autocorr: Autocorrelator<T>,
    nsdf: Vec<T>,
    key_maxima: Vec<usize>,
    clarity_threshold: T,
    max_input_amplitude: T,
    min_volume_absolute: T,
}

impl<T> PitchDetector<T>
where
    T: Float,
{
    /// Creates a detector for windows of `input_length` samples, with a
    /// clarity threshold of 0.9, a maximum input amplitude of 1 and no
    /// volume gate.
    pub fn new(input_length: usize) -> Result<Self, Error> {
        let autocorr = Autocorrelator::new(input_length)?;
        log::debug!("created pitch detector: input_length={}", input_length);
        Ok(PitchDetector {
            autocorr,
            nsdf: new_real_buffer(input_length),
            // A key maximum needs a positive and a negative zero crossing,
            // so there can never be more than input_length / 2 of them.
            key_maxima: Vec::with_capacity(input_length / 2),
            clarity_threshold: T::from_f64(0.9).unwrap(),
            max_input_amplitude: T::one(),
            min_volume_absolute: T::zero(),
        })
    }

    /// The window length this instance was constructed for.
    pub fn input_length(&self) -> usize {
        self.autocorr.input_length()
    }

    /// The minimum fraction of the highest key maximum a candidate lag
    /// must reach to be chosen.
    pub fn clarity_threshold(&self) -> T {
        self.clarity_threshold
    }

    /// Sets the clarity threshold. Must be a finite number in `(0, 1]`.
    /// Lower values bias the detector toward lower frequencies.
    pub fn set_clarity_threshold(&mut self, clarity_threshold: T) -> Result<(), Error> {
        if !clarity_threshold.is_finite()
            || clarity_threshold <= T::zero()
            || clarity_threshold > T::one()
        {
            return Err(Error::InvalidConfig {
                parameter: "clarity_threshold",
                reason: format!("must be a finite number in (0, 1], got {}", clarity_threshold),
            });
        }
        self.clarity_threshold = clarity_threshold;
        Ok(())
    }

    /// The largest amplitude the host delivers, used as the reference for
    /// decibel volume thresholds.
    pub fn max_input_amplitude(&self) -> T {
        self.max_input_amplitude
    }

    /// Sets the maximum input amplitude. Must be finite and positive.
    /// An already configured absolute volume threshold is left unchanged.
    pub fn set_max_input_amplitude(&mut self, max_input_amplitude: T) -> Result<(), Error> {
        if !max_input_amplitude.is_finite() || max_input_amplitude <= T::zero() {
            return Err(Error::InvalidConfig {
                parameter: "max_input_amplitude",
                reason: format!("must be a finite positive number, got {}", max_input_amplitude),
            });
        }
        self.max_input_amplitude = max_input_amplitude;
        Ok(())
    }

    /// The RMS amplitude below which windows are reported as pitchless.
    pub fn min_volume_absolute(&self) -> T {
        self.min_volume_absolute
    }

    /// Sets the volume gate as an absolute RMS amplitude. Must be finite
    /// and within `[0, max_input_amplitude]`. Zero disables the gate.
    pub fn set_min_volume_absolute(&mut self, min_volume_absolute: T) -> Result<(), Error> {
        if !min_volume_absolute.is_finite()
            || min_volume_absolute < T::zero()
            || min_volume_absolute > self.max_input_amplitude
        {
            return Err(Error::InvalidConfig {
                parameter: "min_volume_absolute",
                reason: format!(
                    "must be a finite number in [0, {}], got {}",
                    self.max_input_amplitude, min_volume_absolute
                ),
            });
        }
        self.min_volume_absolute = min_volume_absolute;
        Ok(())
    }

    /// Sets the volume gate in decibels relative to the maximum input
    /// amplitude. Must be finite and at most 0. The stored absolute
    /// threshold is `max_input_amplitude * 10^(db / 10)`.
    pub fn set_min_volume_decibels(&mut self, decibels: T) -> Result<(), Error> {
        if !decibels.is_finite() || decibels > T::zero() {
            return Err(Error::InvalidConfig {
                parameter: "min_volume_decibels",
                reason: format!("must be a finite number <= 0, got {}", decibels),
            });
        }
        let ten = T::from_f64(10.0).unwrap();
        self.min_volume_absolute = self.max_input_amplitude * ten.powf(decibels / ten);
        log::debug!(
            "volume gate set to {} dB ({} absolute)",
            decibels,
            self.min_volume_absolute
        );
        Ok(())
    }

    /// Estimates the pitch of `signal`, a window of
    /// [`input_length`](Self::input_length) samples captured at
    /// `sample_rate` hertz.
    ///
    /// Returns `Ok(None)` when no pitch is detected: the window is quieter
    /// than the volume gate, is all zeros, or its NSDF has no key maxima.
    pub fn find_pitch(
        &mut self,
        signal: &[T],
        sample_rate: usize,
    ) -> Result<Option<Pitch<T>>, Error> {
        let input_length = self.input_length();
        if signal.len() != input_length {
            return Err(Error::WrongLength {
                expected: input_length,
                got: signal.len(),
            });
        }
        if sample_rate == 0 {
            return Err(Error::InvalidConfig {
                parameter: "sample_rate",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.min_volume_absolute > T::zero() {
            let mean_square = square_sum(signal) / T::from_usize(input_length).unwrap();
            if mean_square.sqrt() < self.min_volume_absolute {
                return Ok(None);
            }
        }

        internals::normalized_square_difference(signal, &mut self.autocorr, &mut self.nsdf)?;
        key_maxima(&self.nsdf, &mut self.key_maxima);
        if self.key_maxima.is_empty() {
            return Ok(None);
        }

        Ok(internals::pitch_from_key_maxima(
            &self.nsdf,
            &self.key_maxima,
            sample_rate,
            self.clarity_threshold,
        ))
    }
}
