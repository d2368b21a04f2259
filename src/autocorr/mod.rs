//! FFT-based autocorrelation with pre-sized scratch buffers.
//!
//! Let $S=(s_0,s_1,\ldots,s_{N-1})$ be a discrete signal. The linear sample
//! autocorrelation at lag $\tau$ is
//! $$ r'(\tau) = \sum_{j=0}^{N-1-\tau} s_j\,s_{j+\tau}. $$
//! Computing it directly is $O(N^2)$. This module instead zero pads the
//! signal to the next power of two at least $2N$ and uses the identity
//! between the inverse transform of the power spectrum and the circular
//! autocorrelation; the padding makes the circular result agree with the
//! linear one over the first $N$ lags.
//!
//! All buffers are allocated once at construction, so a single instance can
//! be reused on a real-time thread without touching the heap.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::error::Error;
use crate::float::Float;
use crate::utils::buffer::{
    copy_complex_to_real, copy_real_to_complex, modulus_squared, new_complex_buffer,
    new_real_buffer,
};

/// Computes the first `input_length` lags of the autocorrelation of a
/// fixed-length signal.
pub struct Autocorrelator<T>
where
    T: Float,
{
    input_length: usize,
    forward: Arc<dyn Fft<T>>,
    inverse: Arc<dyn Fft<T>>,
    work: Vec<Complex<T>>,
    scratch: Vec<Complex<T>>,
}

impl<T> Autocorrelator<T>
where
    T: Float,
{
    /// Creates an autocorrelator for signals of `input_length` samples.
    /// The FFT plans and scratch buffers are prepared here, once.
    pub fn new(input_length: usize) -> Result<Self, Error> {
        if input_length < 1 {
            return Err(Error::InvalidLength);
        }
        let fft_length = (2 * input_length).next_power_of_two();
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(fft_length);
        let inverse = planner.plan_fft_inverse(fft_length);
        let scratch_length = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());
        log::debug!(
            "planned autocorrelation FFTs: input_length={}, fft_length={}",
            input_length,
            fft_length
        );
        Ok(Autocorrelator {
            input_length,
            forward,
            inverse,
            work: new_complex_buffer(fft_length),
            scratch: new_complex_buffer(scratch_length),
        })
    }

    /// The signal length this instance was constructed for.
    pub fn input_length(&self) -> usize {
        self.input_length
    }

    /// Writes the autocorrelation of `input` into `output`, so that
    /// `output[tau]` holds `r'(tau)` for lags `0..input_length`. In
    /// particular `output[0]` is the square sum of the signal, up to FFT
    /// round-trip error. Both slices must have the configured input length.
    pub fn autocorrelate(&mut self, input: &[T], output: &mut [T]) -> Result<(), Error> {
        if input.len() != self.input_length {
            return Err(Error::WrongLength {
                expected: self.input_length,
                got: input.len(),
            });
        }
        if output.len() != self.input_length {
            return Err(Error::WrongLength {
                expected: self.input_length,
                got: output.len(),
            });
        }

        copy_real_to_complex(input, &mut self.work);
        self.forward.process_with_scratch(&mut self.work, &mut self.scratch);
        modulus_squared(&mut self.work);
        self.inverse.process_with_scratch(&mut self.work, &mut self.scratch);

        // The imaginary parts of the inverse are rounding noise; keep the
        // real parts of the first input_length lags. rustfft leaves the
        // inverse transform unscaled, so the 1/N_fft normalisation is
        // applied here.
        copy_complex_to_real(&self.work, output);
        let scale = T::one() / T::from_usize(self.work.len()).unwrap();
        for out in output.iter_mut() {
            *out = *out * scale;
        }
        Ok(())
    }

    /// Like [`autocorrelate`](Self::autocorrelate), but allocates the
    /// output buffer.
    pub fn autocorrelate_to_vec(&mut self, input: &[T]) -> Result<Vec<T>, Error> {
        let mut output = new_real_buffer(self.input_length);
        self.autocorrelate(input, &mut output)?;
        Ok(output)
    }
}
