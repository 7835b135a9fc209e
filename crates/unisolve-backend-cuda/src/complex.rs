//! GPU-resident complex types.
//!
//! Two-field (re, im) records with no padding, bit-compatible with both
//! the host [`Complex32`]/[`Complex64`] types and the vendor library's
//! complex layout, so device buffers can be filled from host data with a
//! plain element-wise conversion.

use cudarc::driver::{DeviceRepr, ValidAsZeroBits};
use num_complex::{Complex32, Complex64};

/// Single-precision complex value in device memory.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GpuComplex32 {
    pub re: f32,
    pub im: f32,
}

/// Double-precision complex value in device memory.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GpuComplex64 {
    pub re: f64,
    pub im: f64,
}

// Safety: plain pairs of floats with the same layout as the vendor's
// complex types.
unsafe impl DeviceRepr for GpuComplex32 {}
unsafe impl ValidAsZeroBits for GpuComplex32 {}
unsafe impl DeviceRepr for GpuComplex64 {}
unsafe impl ValidAsZeroBits for GpuComplex64 {}

impl From<Complex32> for GpuComplex32 {
    fn from(c: Complex32) -> Self {
        Self { re: c.re, im: c.im }
    }
}

impl From<GpuComplex32> for Complex32 {
    fn from(c: GpuComplex32) -> Self {
        Complex32::new(c.re, c.im)
    }
}

impl From<Complex64> for GpuComplex64 {
    fn from(c: Complex64) -> Self {
        Self { re: c.re, im: c.im }
    }
}

impl From<GpuComplex64> for Complex64 {
    fn from(c: GpuComplex64) -> Self {
        Complex64::new(c.re, c.im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn layout_matches_host_complex() {
        assert_eq!(size_of::<GpuComplex32>(), size_of::<Complex32>());
        assert_eq!(size_of::<GpuComplex64>(), size_of::<Complex64>());
        assert_eq!(offset_of!(GpuComplex64, re), 0);
        assert_eq!(offset_of!(GpuComplex64, im), size_of::<f64>());
    }

    #[test]
    fn conversion_round_trips() {
        let c = Complex64::new(1.5, -2.5);
        let g: GpuComplex64 = c.into();
        assert_eq!(Complex64::from(g), c);
    }
}
