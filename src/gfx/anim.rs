// Progress math shared by the block animation.
//
// A progress value sweeps a unit interval; `divide_scale` carves it into equal
// sub-intervals so siblings animate one after another.

/// Per-tick progress gap.
pub const SC_GAP: f32 = 0.05;
/// Threshold at which the step size switches from `1/a` to `1/b`.
pub const SC_DIV: f32 = 0.51;

pub fn inverse(n: usize) -> f32 {
    if n == 0 {
        return 0.0;
    }
    1.0 / n as f32
}

pub fn max_scale(x: f32, i: usize, n: usize) -> f32 {
    (x - i as f32 * inverse(n)).max(0.0)
}

/// Progress of sub-interval `i` out of `n`, in `[0, 1]`.
pub fn divide_scale(x: f32, i: usize, n: usize) -> f32 {
    inverse(n).min(max_scale(x, i, n)) * n as f32
}

pub fn scale_factor(x: f32) -> f32 {
    (x / SC_DIV).floor()
}

pub fn mirror_scale(x: f32, a: usize, b: usize) -> f32 {
    let k = scale_factor(x);
    (1.0 - k) * inverse(a) + k * inverse(b)
}

pub fn update_value(x: f32, direction: f32, a: usize, b: usize) -> f32 {
    mirror_scale(x, a, b) * direction * SC_GAP
}

pub fn sf(n: usize) -> f32 {
    1.0 - 2.0 * n as f32
}

/// +1 for even `n`, -1 for odd.
pub fn sjf(n: usize) -> f32 {
    sf(n % 2)
}

pub fn mirror(n: usize) -> f32 {
    1.0 - n as f32
}

/// 1 for even `n`, 0 for odd.
pub fn j_mirror(n: usize) -> f32 {
    mirror(n % 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn divide_scale_is_monotone_and_bounded() {
        for n in 1..=4 {
            for i in 0..n {
                let mut prev = 0.0;
                for step in 0..=200 {
                    let x = step as f32 / 100.0 - 0.5;
                    let v = divide_scale(x, i, n);
                    assert!((0.0..=1.0 + EPS).contains(&v), "x={} i={} n={} v={}", x, i, n, v);
                    assert!(v + EPS >= prev, "not monotone at x={} i={} n={}", x, i, n);
                    prev = v;
                }
                assert!((divide_scale(1.0, i, n) - 1.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn sub_intervals_form_a_staircase() {
        let n = 4;
        for step in 0..=100 {
            let x = step as f32 / 100.0;
            let total: f32 = (0..n).map(|i| divide_scale(x, i, n)).sum();
            assert!((total - x * n as f32).abs() < 1e-4, "x={} total={}", x, total);

            // At most one sub-interval is partially filled at any x.
            let partial = (0..n)
                .map(|i| divide_scale(x, i, n))
                .filter(|v| *v > EPS && *v < 1.0 - EPS)
                .count();
            assert!(partial <= 1);
        }
    }

    #[test]
    fn step_size_switches_at_threshold() {
        assert!((update_value(0.0, 1.0, 4, 1) - 0.0125).abs() < EPS);
        assert!((update_value(0.5, 1.0, 4, 1) - 0.0125).abs() < EPS);
        assert!((update_value(0.6, 1.0, 4, 1) - 0.05).abs() < EPS);
        assert!((update_value(0.6, -1.0, 4, 1) + 0.05).abs() < EPS);
        assert_eq!(update_value(0.3, 0.0, 4, 1), 0.0);
    }

    #[test]
    fn parity_helpers_alternate() {
        assert_eq!([sjf(0), sjf(1), sjf(2), sjf(3)], [1.0, -1.0, 1.0, -1.0]);
        assert_eq!([j_mirror(0), j_mirror(1), j_mirror(2), j_mirror(3)], [1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn zero_divisor_yields_zero() {
        assert_eq!(inverse(0), 0.0);
        assert_eq!(divide_scale(0.7, 0, 0), 0.0);
    }
}
