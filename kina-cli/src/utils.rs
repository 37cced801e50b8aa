use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

/// Split repeated `name=path` sample specifiers.
pub fn parse_samples(raw: &[String]) -> Result<Vec<(String, PathBuf)>> {
    let mut samples: Vec<(String, PathBuf)> = Vec::with_capacity(raw.len());
    for spec in raw {
        let (name, path) = spec
            .split_once('=')
            .ok_or_else(|| anyhow!("Sample must be given as name=path: {}", spec))?;
        samples.push((name.to_string(), PathBuf::from(path)));
    }
    Ok(samples)
}

/// Parse a comma-joined depth threshold list.
pub fn parse_thresholds(raw: &str) -> Result<Vec<u32>> {
    raw.split(',')
        .map(|value| {
            value
                .trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid depth threshold: {}", value))
        })
        .collect()
}

/// Split a comma-joined list, dropping empty entries.
pub fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}
