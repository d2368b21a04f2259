//! Real-time monophonic pitch detection using the
//! [McLeod Pitch Method](http://www.cs.otago.ac.nz/tartini/papers/A_Smarter_Way_to_Find_Pitch.pdf).
//!
//! Given a fixed-length window of time-domain samples and the rate they
//! were captured at, [`PitchDetector`] estimates the fundamental frequency
//! of the window together with a *clarity* value in `[0, 1]` describing
//! how tonal the window is. The pipeline is an FFT-based autocorrelation,
//! the normalised square difference function, key-maximum picking and
//! parabolic refinement of the chosen lag; after construction it performs
//! no heap allocation, which makes it suitable for audio threads.
//!
//! The detector is monophonic and stateless across windows: smoothing,
//! note segmentation and polyphony are up to the host.
//!
//! # Example
//!
//! ```
//! use mcleod_pitch::PitchDetector;
//!
//! let sample_rate: usize = 48_000;
//! let window: Vec<f64> = (0..2048)
//!     .map(|i| (2.0 * std::f64::consts::PI * 440.0 * i as f64 / sample_rate as f64).sin())
//!     .collect();
//!
//! let mut detector = PitchDetector::new(window.len())?;
//! detector.set_clarity_threshold(0.7)?;
//!
//! match detector.find_pitch(&window, sample_rate)? {
//!     Some(pitch) => println!("{:.1} Hz, clarity {:.2}", pitch.frequency, pitch.clarity),
//!     None => println!("no pitch"),
//! }
//! # Ok::<(), mcleod_pitch::Error>(())
//! ```

pub mod autocorr;
pub mod detector;
pub mod error;
pub mod float;
pub mod utils;

pub use autocorr::Autocorrelator;
pub use detector::{Pitch, PitchDetector};
pub use error::Error;
