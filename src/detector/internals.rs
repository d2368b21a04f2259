use crate::autocorr::Autocorrelator;
use crate::detector::Pitch;
use crate::error::Error;
use crate::float::Float;
use crate::utils::peak::refine_peak;

/// Computes the normalised square difference function of `signal` into
/// `nsdf`, as defined in equations (6) and (9) of the McLeod paper:
/// `nsdf[tau] = 2 * r'(tau) / m'(tau)`.
///
/// `m'` is produced incrementally from `m'(0) = 2 * r'(0)` by subtracting
/// `signal[tau]^2 + signal[n - 1 - tau]^2` per lag, so the whole function
/// costs one autocorrelation plus a single pass.
pub fn normalized_square_difference<T>(
    signal: &[T],
    autocorr: &mut Autocorrelator<T>,
    nsdf: &mut [T],
) -> Result<(), Error>
where
    T: Float,
{
    autocorr.autocorrelate(signal, nsdf)?;

    let n = signal.len();
    let two = T::from_usize(2).unwrap();
    let mut m = two * nsdf[0];
    let mut tau = 0;
    // m' is mathematically non-negative and non-increasing, but rounding
    // can push it just below zero near the end of the window. Any
    // non-positive m is terminal.
    while tau < n && m > T::zero() {
        let r = nsdf[tau];
        nsdf[tau] = two * r / m;
        let head = signal[tau];
        let tail = signal[n - 1 - tau];
        m = m - head * head - tail * tail;
        tau += 1;
    }
    for value in nsdf[tau..].iter_mut() {
        *value = T::zero();
    }
    Ok(())
}

/// Picks the pitch from the key maxima of `nsdf`: the reference value is
/// the highest maximum, and the chosen lag is the first (smallest) one
/// whose value reaches `clarity_threshold` times that reference, which
/// biases the choice toward the fundamental rather than a harmonic. The
/// chosen lag is then refined by parabolic interpolation.
///
/// Returns `None` when `maxima` is empty.
pub fn pitch_from_key_maxima<T>(
    nsdf: &[T],
    maxima: &[usize],
    sample_rate: usize,
    clarity_threshold: T,
) -> Option<Pitch<T>>
where
    T: Float,
{
    let mut highest = T::neg_infinity();
    for &k in maxima {
        if nsdf[k] > highest {
            highest = nsdf[k];
        }
    }
    let threshold = clarity_threshold * highest;
    // Non-empty whenever `maxima` is: the maximum itself qualifies.
    let chosen = maxima.iter().copied().find(|&k| nsdf[k] >= threshold)?;

    let (lag, value) = refine_peak(chosen, nsdf);
    let frequency = T::from_usize(sample_rate).unwrap() / lag;
    let clarity = if value > T::one() { T::one() } else { value };
    Some(Pitch { frequency, clarity })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::buffer::new_real_buffer;

    // Computes m' by the naive summation it is defined as. Only used to
    // cross-check the incremental form.
    fn m_prime_sum(signal: &[f64], result: &mut [f64]) {
        let n = signal.len();
        for tau in 0..n {
            let mut sum = 0.0;
            for j in 0..n - tau {
                sum += signal[j] * signal[j] + signal[j + tau] * signal[j + tau];
            }
            result[tau] = sum;
        }
    }

    fn pseudo_random_signal(size: usize, seed: u64) -> Vec<f64> {
        // Small xorshift generator, good enough for test signals.
        let mut state = seed.max(1);
        (0..size)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state as f64 / u64::MAX as f64) * 2.0 - 1.0
            })
            .collect()
    }

    #[test]
    fn nsdf_starts_at_one() {
        let signal = pseudo_random_signal(64, 7);
        let mut autocorr = Autocorrelator::new(signal.len()).unwrap();
        let mut nsdf = new_real_buffer(signal.len());
        normalized_square_difference(&signal, &mut autocorr, &mut nsdf).unwrap();
        assert!((nsdf[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn nsdf_of_zero_signal_is_zero() {
        let signal = vec![0.0; 32];
        let mut autocorr = Autocorrelator::new(signal.len()).unwrap();
        let mut nsdf = new_real_buffer(signal.len());
        normalized_square_difference(&signal, &mut autocorr, &mut nsdf).unwrap();
        assert!(nsdf.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn nsdf_is_bounded() {
        for seed in 1..6 {
            let signal = pseudo_random_signal(256, seed);
            let mut autocorr = Autocorrelator::new(signal.len()).unwrap();
            let mut nsdf = new_real_buffer(signal.len());
            normalized_square_difference(&signal, &mut autocorr, &mut nsdf).unwrap();
            for &v in nsdf.iter() {
                assert!(v.is_finite());
            }
            // The bound only holds up to FFT rounding, and the error is
            // amplified at large lags where m' is a sum of few terms, so
            // check it over the half of the array a detector would use.
            for &v in nsdf[..128].iter() {
                assert!(v.abs() <= 1.0 + 1e-6, "nsdf out of range: {}", v);
            }
        }
    }

    #[test]
    fn incremental_m_prime_matches_naive_sum() {
        let signal = pseudo_random_signal(48, 42);
        let n = signal.len();

        let mut naive = vec![0.0; n];
        m_prime_sum(&signal, &mut naive);

        // Replay the incremental recurrence used by the NSDF loop.
        let square_sum: f64 = signal.iter().map(|x| x * x).sum();
        let mut m = 2.0 * square_sum;
        let mut previous = f64::INFINITY;
        for tau in 0..n {
            assert!((m - naive[tau]).abs() < 1e-9 * naive[0]);
            assert!(m <= previous, "m' must never increase");
            previous = m;
            m -= signal[tau] * signal[tau] + signal[n - 1 - tau] * signal[n - 1 - tau];
        }
    }
}
