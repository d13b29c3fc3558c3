use anyhow::{ensure, Context};
use rand::Rng;

/// `count` uniformly drawn values in `min..=max`.
pub fn generate_numbers(rng: &mut impl Rng, count: usize, min: u64, max: u64) -> Vec<u64> {
    (0..count).map(|_| rng.gen_range(min..=max)).collect()
}

/// Parses a comma or whitespace separated list such as `170, 45 75`.
pub fn parse_numbers(raw: &str) -> anyhow::Result<Vec<u64>> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            ensure!(
                !part.starts_with('-'),
                "'{part}' is negative; only non-negative integers can be sorted"
            );
            part.parse::<u64>()
                .with_context(|| format!("'{part}' is not a non-negative integer"))
        })
        .collect()
}
