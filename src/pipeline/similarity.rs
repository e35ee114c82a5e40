//! String similarity and normalization used for entity matching.

/// Case-insensitive similarity between two strings in `[0.0, 1.0]`.
///
/// Ratcliff/Obershelp: twice the number of characters in common (counted
/// over recursively-found longest matching blocks) divided by the total
/// number of characters. `1.0` means identical ignoring case.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let matched = matching_chars(&a, &b);
    (2.0 * matched as f64) / ((a.len() + b.len()) as f64)
}

/// Total characters covered by matching blocks between `a` and `b`.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (start_a, start_b, len) = longest_match(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..start_a], &b[..start_b])
        + matching_chars(&a[start_a + len..], &b[start_b + len..])
}

/// Longest common contiguous block, earliest in `a` then `b` on ties.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // lengths of the common suffix ending at each position of b, for the
    // previous row of a
    let mut prev = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        let mut cur = vec![0usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                cur[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = cur;
    }

    best
}

/// Normalized form of a name for exact-match comparison.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalized form of a website URL for exact-match comparison.
///
/// Scheme and a single trailing slash are insignificant; everything else
/// (including `www.`) is kept as scraped.
pub fn normalize_website(url: &str) -> String {
    let url = url.trim().to_lowercase();
    let url = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(&url);
    url.strip_suffix('/').unwrap_or(url).to_string()
}
