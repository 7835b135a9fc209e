//! The scalar-type family the routine set is generic over.

use bytemuck::Pod;
use num_complex::{Complex32, Complex64};

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for num_complex::Complex32 {}
    impl Sealed for num_complex::Complex64 {}
}

/// Element type accepted by the dense routine set.
///
/// Implemented for exactly `f32`, `f64`, [`Complex32`] and [`Complex64`];
/// the four instantiations of each routine share one generic
/// implementation instead of four hand-duplicated entry points. The `Pod`
/// bound pins the byte layout: complex values are two-field (re, im)
/// records with no padding, exactly twice the size of the underlying real
/// scalar, so buffers are interchangeable with code built against the
/// same layout in other languages.
pub trait Scalar:
    Copy + Default + PartialEq + std::fmt::Debug + Pod + Send + Sync + private::Sealed + 'static
{
    /// The matching real scalar (`Self` for real types). Eigenvalues,
    /// singular values, and tridiagonal/bidiagonal coefficients are
    /// always of this type.
    type Real: Scalar;

    const IS_COMPLEX: bool;

    /// LAPACK-style precision tag: 's', 'd', 'c' or 'z'.
    const TAG: char;
}

impl Scalar for f32 {
    type Real = f32;
    const IS_COMPLEX: bool = false;
    const TAG: char = 's';
}

impl Scalar for f64 {
    type Real = f64;
    const IS_COMPLEX: bool = false;
    const TAG: char = 'd';
}

impl Scalar for Complex32 {
    type Real = f32;
    const IS_COMPLEX: bool = true;
    const TAG: char = 'c';
}

impl Scalar for Complex64 {
    type Real = f64;
    const IS_COMPLEX: bool = true;
    const TAG: char = 'z';
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, offset_of, size_of};

    #[test]
    fn complex_layout_is_two_packed_fields() {
        assert_eq!(size_of::<Complex32>(), 2 * size_of::<f32>());
        assert_eq!(size_of::<Complex64>(), 2 * size_of::<f64>());
        assert_eq!(size_of::<Complex64>(), 2 * size_of::<Complex32>());
        assert_eq!(align_of::<Complex32>(), align_of::<f32>());
        assert_eq!(align_of::<Complex64>(), align_of::<f64>());
        assert_eq!(offset_of!(Complex32, re), 0);
        assert_eq!(offset_of!(Complex32, im), size_of::<f32>());
        assert_eq!(offset_of!(Complex64, re), 0);
        assert_eq!(offset_of!(Complex64, im), size_of::<f64>());
    }

    #[test]
    fn complex_buffers_reinterpret_as_real_pairs() {
        let data = [Complex64::new(1.0, -2.0), Complex64::new(3.5, 0.25)];
        let raw: &[f64] = bytemuck::cast_slice(&data);
        assert_eq!(raw, &[1.0, -2.0, 3.5, 0.25]);
    }

    #[test]
    fn tags() {
        assert_eq!(f32::TAG, 's');
        assert_eq!(f64::TAG, 'd');
        assert_eq!(Complex32::TAG, 'c');
        assert_eq!(Complex64::TAG, 'z');
        assert!(!f64::IS_COMPLEX);
        assert!(Complex32::IS_COMPLEX);
    }
}
