use num_traits::float::Float as NumFloat;
use num_traits::FromPrimitive;
use rustfft::FftNum;
use std::fmt::{Debug, Display};

/// The floating-point element type of sample windows and scratch buffers.
///
/// Implemented for `f32` and `f64`. Generic heap buffers of either flavour
/// are plain `Vec<T>`s.
pub trait Float: Display + Debug + NumFloat + FromPrimitive + FftNum {}

impl Float for f64 {}
impl Float for f32 {}
