/// Partial-ratio similarity in `0..=100`.
///
/// The shorter string (by character count, ties keep `a`) is slid over every
/// window of equal length in the longer one; the best indel ratio wins.
/// Either side empty scores 0.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    let mut best = 0.0_f64;
    for window in long.windows(short.len()) {
        let score = indel_ratio(window, short);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }

    best.round() as u8
}

/// `100 * (len_a + len_b - indel_distance) / (len_a + len_b)`, i.e.
/// `200 * lcs / (len_a + len_b)`. A substitution costs two edits.
fn indel_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Longest common subsequence length, one rolling row.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let up = row[j + 1];
            row[j + 1] = if ca == cb { diag + 1 } else { up.max(row[j]) };
            diag = up;
        }
    }
    row[b.len()]
}
