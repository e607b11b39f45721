use std::cmp::Ordering;

/// Orders indices by descending value, breaking ties by ascending index.
///
/// Uses `total_cmp`, so NaN ranks above every number instead of breaking the
/// sort. Adding `0.0` folds `-0.0` into `0.0` so signed zeros still tie.
fn by_value_desc(values: &[f32]) -> impl Fn(&usize, &usize) -> Ordering + '_ {
    move |&a, &b| {
        (values[b] + 0.0)
            .total_cmp(&(values[a] + 0.0))
            .then(a.cmp(&b))
    }
}

/// Returns the indices of the `k` largest values, best first.
pub(crate) fn top_k_indices(values: &[f32], k: usize) -> Vec<usize> {
    let k = k.min(values.len());
    if k == 0 {
        return Vec::new();
    }

    let cmp = by_value_desc(values);
    let mut indices: Vec<usize> = (0..values.len()).collect();
    if k < indices.len() {
        indices.select_nth_unstable_by(k - 1, &cmp);
        indices.truncate(k);
    }
    indices.sort_by(&cmp);
    indices
}

/// Index of the maximum value; the first occurrence wins on ties.
pub(crate) fn argmax(values: &[f32]) -> Option<usize> {
    top_k_indices(values, 1).first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_break_by_ascending_index() {
        let values = [0.2, 0.3, 0.2, 0.3];
        assert_eq!(top_k_indices(&values, 4), vec![1, 3, 0, 2]);
        assert_eq!(argmax(&values), Some(1));
    }

    #[test]
    fn test_k_larger_than_len() {
        assert_eq!(top_k_indices(&[0.1, 0.9], 5), vec![1, 0]);
        assert!(top_k_indices(&[], 5).is_empty());
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_partial_selection_matches_full_sort() {
        let values: Vec<f32> = (0..50).map(|i| ((i * 37) % 11) as f32).collect();
        let full = top_k_indices(&values, values.len());
        assert_eq!(top_k_indices(&values, 8), full[..8].to_vec());
    }

    #[test]
    fn test_signed_zero_ties() {
        assert_eq!(argmax(&[-0.0, 0.0]), Some(0));
    }

    #[test]
    fn test_nan_values_keep_a_total_order() {
        let values: Vec<f32> = (0..200)
            .map(|i| if i % 3 == 0 { f32::NAN } else { (i % 17) as f32 })
            .collect();
        let ranked = top_k_indices(&values, 8);
        assert_eq!(ranked, vec![0, 3, 6, 9, 12, 15, 18, 21]);
        assert_eq!(top_k_indices(&values, 8), ranked);
    }
}
