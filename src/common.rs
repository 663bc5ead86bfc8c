//! Common utilities shared across series modules

/// Initialize a result vector with NaN values
#[inline]
pub fn nan_vec(len: usize) -> Vec<f64> {
    vec![f64::NAN; len]
}

/// Positional shift. Positive `periods` move values towards the end and
/// leave NaN at the front; negative `periods` move them towards the start.
pub fn shift(values: &[f64], periods: i64) -> Vec<f64> {
    let n = values.len();
    let mut result = nan_vec(n);
    let k = periods.unsigned_abs() as usize;
    if k >= n {
        return result;
    }

    if periods >= 0 {
        result[k..].copy_from_slice(&values[..n - k]);
    } else {
        result[..n - k].copy_from_slice(&values[k..]);
    }
    result
}

/// Lagged difference `values[i] - values[i - lag]`, same length as input.
///
/// Positions without a partner are NaN. A negative lag differences against
/// later values, a zero lag against the value itself.
pub fn diff(values: &[f64], lag: i64) -> Vec<f64> {
    let shifted = shift(values, lag);
    values
        .iter()
        .zip(shifted.iter())
        .map(|(&v, &s)| v - s)
        .collect()
}

/// Index of the first maximum. A NaN counts as the maximum, and an empty
/// slice gives 0.
pub fn argmax(values: &[f64]) -> usize {
    first_extreme(values, |candidate, best| candidate > best)
}

/// Index of the first minimum. A NaN counts as the minimum, and an empty
/// slice gives 0.
pub fn argmin(values: &[f64]) -> usize {
    first_extreme(values, |candidate, best| candidate < best)
}

fn first_extreme<F>(values: &[f64], better: F) -> usize
where
    F: Fn(f64, f64) -> bool,
{
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            return i;
        }
        if better(v, values[best]) {
            best = i;
        }
    }
    best
}

/// Distance from the end of `window` to its most recent maximum.
///
/// # Example
/// ```
/// use ta_utils::recent_maximum_index;
/// // 5.0 appears twice; the later one is 1 step from the end
/// assert_eq!(recent_maximum_index(&[5.0, 1.0, 5.0, 2.0]), 1);
/// ```
pub fn recent_maximum_index(window: &[f64]) -> usize {
    let reversed: Vec<f64> = window.iter().rev().copied().collect();
    argmax(&reversed)
}

/// Distance from the end of `window` to its most recent minimum.
pub fn recent_minimum_index(window: &[f64]) -> usize {
    let reversed: Vec<f64> = window.iter().rev().copied().collect();
    argmin(&reversed)
}

/// Turn an identifier like `camelCaseName` into `Camel Case Name`.
///
/// Words are split where a lowercase letter meets an uppercase one, then
/// every letter following a non-letter is uppercased and the rest lowercased.
pub fn camel_case_to_title(x: &str) -> String {
    let mut spaced = String::with_capacity(x.len() + 8);
    let mut prev: Option<char> = None;
    for c in x.chars() {
        if let Some(p) = prev {
            if p.is_lowercase() && c.is_uppercase() {
                spaced.push(' ');
            }
        }
        spaced.push(c);
        prev = Some(c);
    }

    let mut titled = String::with_capacity(spaced.len());
    let mut after_letter = false;
    for c in spaced.chars() {
        if c.is_alphabetic() {
            if after_letter {
                titled.extend(c.to_lowercase());
            } else {
                titled.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            titled.push(c);
            after_letter = false;
        }
    }
    titled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_same(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!(
                (x.is_nan() && y.is_nan()) || x == y,
                "Values differ: {:?} vs {:?}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_nan_vec() {
        let v = nan_vec(5);
        assert_eq!(v.len(), 5);
        assert!(v.iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_shift_forward() {
        let v = vec![1.0, 2.0, 3.0, 4.0];
        assert_same(&shift(&v, 2), &[f64::NAN, f64::NAN, 1.0, 2.0]);
    }

    #[test]
    fn test_shift_backward() {
        let v = vec![1.0, 2.0, 3.0, 4.0];
        assert_same(&shift(&v, -1), &[2.0, 3.0, 4.0, f64::NAN]);
    }

    #[test]
    fn test_shift_past_length() {
        let v = vec![1.0, 2.0];
        assert!(shift(&v, 5).iter().all(|x| x.is_nan()));
        assert!(shift(&v, -2).iter().all(|x| x.is_nan()));
        assert!(shift(&[], 1).is_empty());
    }

    #[test]
    fn test_diff() {
        let v = vec![1.0, 3.0, 6.0, 10.0];
        assert_same(&diff(&v, 1), &[f64::NAN, 2.0, 3.0, 4.0]);
        assert_same(&diff(&v, 2), &[f64::NAN, f64::NAN, 5.0, 7.0]);
        assert_same(&diff(&v, -1), &[-2.0, -3.0, -4.0, f64::NAN]);
        assert_same(&diff(&v, 0), &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_argmax_argmin_first_occurrence() {
        let v = vec![3.0, 5.0, 1.0, 5.0, 1.0];
        assert_eq!(argmax(&v), 1);
        assert_eq!(argmin(&v), 2);
        assert_eq!(argmax(&[]), 0);
    }

    #[test]
    fn test_argmax_nan_wins() {
        let v = vec![3.0, f64::NAN, 9.0];
        assert_eq!(argmax(&v), 1);
        assert_eq!(argmin(&v), 1);
    }

    #[test]
    fn test_recent_extreme_index() {
        let window = vec![4.0, 9.0, 2.0, 9.0, 2.0, 3.0];
        // reversed: [3, 2, 9, 2, 9, 4]
        assert_eq!(recent_maximum_index(&window), 2);
        assert_eq!(recent_minimum_index(&window), 1);
    }

    #[test]
    fn test_recent_extreme_at_end() {
        let window = vec![1.0, 2.0, 3.0];
        assert_eq!(recent_maximum_index(&window), 0);
        assert_eq!(recent_minimum_index(&window), 2);
    }

    #[test]
    fn test_camel_case_to_title() {
        assert_eq!(camel_case_to_title("camelCaseString"), "Camel Case String");
        assert_eq!(camel_case_to_title("already Split"), "Already Split");
        assert_eq!(camel_case_to_title("HTTPServer"), "Httpserver");
        assert_eq!(camel_case_to_title("a1b"), "A1B");
        assert_eq!(camel_case_to_title(""), "");
    }
}
