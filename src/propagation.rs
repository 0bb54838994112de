//! Centered 2D Fourier transform

use ndarray::{Array2, ArrayView2, Axis};
use num_complex::Complex64;
use rustfft::FftPlanner;

/// Circularly shifts `array` by `(shift_rows, shift_cols)`: `out[i] = in[i - shift]`
fn roll<T: Clone>(array: ArrayView2<T>, shift_rows: usize, shift_cols: usize) -> Array2<T> {
    let (rows, cols) = array.dim();
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        let a = (i + rows - shift_rows % rows) % rows;
        let b = (j + cols - shift_cols % cols) % cols;
        array[[a, b]].clone()
    })
}

/// Moves the zero frequency term from index (0,0) to the array center `(rows/2, cols/2)`
pub fn fftshift<T: Clone>(array: ArrayView2<T>) -> Array2<T> {
    let (rows, cols) = array.dim();
    roll(array, rows / 2, cols / 2)
}

/// Moves the array center `(rows/2, cols/2)` to index (0,0), the inverse of [fftshift]
pub fn ifftshift<T: Clone>(array: ArrayView2<T>) -> Array2<T> {
    let (rows, cols) = array.dim();
    roll(array, rows - rows / 2, cols - cols / 2)
}

/// Forward, unnormalized, 2D discrete Fourier transform
pub fn fft2(mut field: Array2<Complex64>) -> Array2<Complex64> {
    let (rows, cols) = field.dim();
    let mut planner = FftPlanner::<f64>::new();
    for (axis, len) in [(Axis(1), cols), (Axis(0), rows)] {
        let fft = planner.plan_fft_forward(len);
        let mut buffer = Vec::with_capacity(len);
        for mut lane in field.lanes_mut(axis) {
            buffer.clear();
            buffer.extend(lane.iter().copied());
            fft.process(&mut buffer);
            lane.iter_mut()
                .zip(&buffer)
                .for_each(|(value, transformed)| *value = *transformed);
        }
    }
    field
}

/// Propagates the aperture field: shift to the origin, transform, shift back to the center
pub fn propagate(field: ArrayView2<Complex64>) -> Array2<Complex64> {
    fftshift(fft2(ifftshift(field)).view())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::Rng;
    use std::f64::consts::PI;

    fn naive_dft2(field: &Array2<Complex64>) -> Array2<Complex64> {
        let (rows, cols) = field.dim();
        Array2::from_shape_fn((rows, cols), |(k, l)| {
            field
                .indexed_iter()
                .map(|((m, n), &value)| {
                    let angle = -2f64
                        * PI
                        * ((k * m) as f64 / rows as f64 + (l * n) as f64 / cols as f64);
                    value * Complex64::cis(angle)
                })
                .sum()
        })
    }

    #[test]
    fn shifts() {
        let a = array![[0, 1, 2], [3, 4, 5]];
        assert_eq!(fftshift(a.view()), array![[5, 3, 4], [2, 0, 1]]);
        assert_eq!(ifftshift(a.view()), array![[4, 5, 3], [1, 2, 0]]);
        let b = Array2::from_shape_fn((5, 4), |(i, j)| i * 4 + j);
        assert_eq!(ifftshift(fftshift(b.view()).view()), b);
        assert_eq!(fftshift(ifftshift(b.view()).view()), b);
    }

    #[test]
    fn even_shifts_coincide() {
        let a = Array2::from_shape_fn((6, 8), |(i, j)| i * 8 + j);
        assert_eq!(fftshift(a.view()), ifftshift(a.view()));
        // center goes to the origin
        assert_eq!(ifftshift(a.view())[[0, 0]], a[[3, 4]]);
    }

    #[test]
    fn matches_naive_dft() {
        let mut rng = rand::thread_rng();
        let field = Array2::from_shape_fn((5, 6), |_| {
            Complex64::new(rng.gen_range(-1f64..1f64), rng.gen_range(-1f64..1f64))
        });
        let expected = naive_dft2(&field);
        let computed = fft2(field);
        for (e, c) in expected.iter().zip(computed.iter()) {
            assert!((e - c).norm() < 1e-9, "{e} != {c}");
        }
    }

    #[test]
    fn centered_point_source_is_flat() {
        let mut field = Array2::<Complex64>::zeros((7, 8));
        field[[3, 4]] = Complex64::new(1f64, 0f64);
        let propagated = propagate(field.view());
        assert!(propagated
            .iter()
            .all(|z| (z - Complex64::new(1f64, 0f64)).norm() < 1e-12));
    }

    #[test]
    fn uniform_field_focuses_at_the_center() {
        let field = Array2::from_elem((4, 6), Complex64::new(1f64, 0f64));
        let propagated = propagate(field.view());
        assert!((propagated[[2, 3]].re - 24f64).abs() < 1e-12);
        let rest: f64 = propagated
            .indexed_iter()
            .filter(|&((i, j), _)| (i, j) != (2, 3))
            .map(|(_, z)| z.norm())
            .sum();
        assert!(rest < 1e-10);
    }
}
