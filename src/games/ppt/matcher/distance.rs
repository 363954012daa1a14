use std::mem;

/// Levenshtein distance over unicode scalar values.
///
/// Keeps two rows of the table, sized by the shorter input.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len();
    }

    let mut previous: Vec<usize> = (0..=short.len()).collect();
    let mut current = vec![0; short.len() + 1];

    for (i, long_ch) in long.iter().enumerate() {
        current[0] = i + 1;

        for (j, short_ch) in short.iter().enumerate() {
            current[j + 1] = if long_ch == short_ch {
                previous[j]
            } else {
                let substitution = previous[j];
                let insertion = current[j];
                let deletion = previous[j + 1];

                substitution.min(insertion).min(deletion) + 1
            };
        }

        mem::swap(&mut previous, &mut current);
    }

    previous[short.len()]
}
