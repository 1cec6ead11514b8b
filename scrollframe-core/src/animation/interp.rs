/// Clamped piecewise-linear map from `input` stops to `output` stops.
///
/// `input` must be non-decreasing and the same length as `output`. Values outside the input
/// span are clamped to the first/last output. Non-finite `v` maps to the first output.
pub fn interpolate(input: &[f64], output: &[f64], v: f64) -> f64 {
    debug_assert_eq!(input.len(), output.len());
    let n = input.len().min(output.len());
    if n == 0 {
        return 0.0;
    }
    if n == 1 || !v.is_finite() || v <= input[0] {
        return output[0];
    }
    if v >= input[n - 1] {
        return output[n - 1];
    }

    for i in 0..n - 1 {
        let (a, b) = (input[i], input[i + 1]);
        if v <= b {
            let span = b - a;
            if span <= 0.0 {
                return output[i + 1];
            }
            let t = (v - a) / span;
            return output[i] + (output[i + 1] - output[i]) * t;
        }
    }
    output[n - 1]
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
