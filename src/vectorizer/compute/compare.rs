use num::Num;

/// Similarity measures over two position-aligned vectors
pub trait Compare<N>
where
    N: Num + Copy,
{
    /// dot積
    /// d(a, b) = Σ(a_i * b_i)
    fn dot(vec: &[N], other: &[N]) -> f64;
    /// 二乗ノルム
    /// ||a||^2 = Σ(a_i^2)
    fn norm_sq(vec: &[N]) -> f64;
    /// コサイン類似度
    /// cos(θ) = Σ(a_i * b_i) / sqrt(||a||^2 * ||b||^2)
    /// 0 when either vector has zero magnitude
    fn cosine_similarity(vec: &[N], other: &[N]) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCompare;

impl<N> Compare<N> for DefaultCompare
where
    N: Num + Copy + Into<f64>,
{
    #[inline]
    fn dot(vec: &[N], other: &[N]) -> f64 {
        debug_assert_eq!(vec.len(), other.len());
        vec.iter()
            .zip(other)
            .map(|(&a, &b)| a.into() * b.into())
            .sum()
    }

    #[inline]
    fn norm_sq(vec: &[N]) -> f64 {
        vec.iter()
            .map(|&a| {
                let a: f64 = a.into();
                a * a
            })
            .sum()
    }

    #[inline]
    fn cosine_similarity(vec: &[N], other: &[N]) -> f64 {
        let denominator = (<Self as Compare<N>>::norm_sq(vec) * <Self as Compare<N>>::norm_sq(other)).sqrt();
        if denominator == 0.0 {
            0.0
        } else {
            <Self as Compare<N>>::dot(vec, other) / denominator
        }
    }
}

/// Cosine similarity of two f64 vectors, 0 for zero-magnitude input
#[inline]
pub fn cosine_similarity(vec: &[f64], other: &[f64]) -> f64 {
    <DefaultCompare as Compare<f64>>::cosine_similarity(vec, other)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn identical_direction_is_one() {
        let a = [1.0, 2.0, 3.0];
        let b = [2.0, 4.0, 6.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < EPS);
    }

    #[test]
    fn orthogonal_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]), 0.0);
    }

    #[test]
    fn opposite_is_minus_one() {
        assert!((cosine_similarity(&[1.0, -2.0], &[-1.0, 2.0]) + 1.0).abs() < EPS);
    }

    #[test]
    fn zero_magnitude_is_zero_not_nan() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn bounded_for_arbitrary_vectors() {
        let samples: [[f64; 4]; 4] = [
            [0.3, -1.2, 4.0, 0.0],
            [2.5, 0.1, -0.7, 3.3],
            [-1.0, -1.0, -1.0, -1.0],
            [10.0, 0.0, 0.5, 0.25],
        ];
        for a in &samples {
            for b in &samples {
                let c = cosine_similarity(a, b);
                assert!((-1.0 - EPS..=1.0 + EPS).contains(&c), "{c}");
            }
        }
    }

    #[test]
    fn non_negative_vectors_stay_in_unit_interval() {
        let a = [0.0, 1.5, 2.0, 0.0, 7.0];
        let b = [3.0, 0.0, 2.0, 1.0, 0.5];
        let c = cosine_similarity(&a, &b);
        assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn works_for_integer_and_f32_elements() {
        let a: [u32; 3] = [1, 0, 2];
        let b: [u32; 3] = [2, 0, 4];
        assert!((<DefaultCompare as Compare<u32>>::cosine_similarity(&a, &b) - 1.0).abs() < EPS);
        assert_eq!(<DefaultCompare as Compare<u32>>::dot(&a, &b), 10.0);

        let x: [f32; 2] = [3.0, 4.0];
        assert_eq!(<DefaultCompare as Compare<f32>>::norm_sq(&x), 25.0);
    }
}
