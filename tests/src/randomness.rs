//! Cheap randomness heuristics

use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Number of differing bits between two equal-length buffers
pub fn hamming_distance(a: &[u8], b: &[u8]) -> u32 {
    assert_eq!(a.len(), b.len(), "hamming distance needs equal lengths");
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}

/// Fraction of set bits in `data`
pub fn ones_fraction(data: &[u8]) -> f64 {
    let ones: u64 = data.iter().map(|b| u64::from(b.count_ones())).sum();
    ones as f64 / (data.len() as f64 * 8.0)
}

/// Result of a chi-square goodness-of-fit test on byte frequencies
#[derive(Debug, Clone, Copy)]
pub struct ByteFrequency {
    /// Chi-square statistic over the 256 byte values
    pub statistic: f64,
    /// Probability of a statistic at least this large from a uniform source
    pub p_value: f64,
}

/// Chi-square test of `data` against the uniform byte distribution
pub fn byte_frequency(data: &[u8]) -> ByteFrequency {
    let mut counts = [0u64; 256];
    for &b in data {
        counts[b as usize] += 1;
    }
    let expected = data.len() as f64 / 256.0;
    let statistic: f64 = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum();

    // 256 categories, 255 degrees of freedom
    let p_value = match ChiSquared::new(255.0) {
        Ok(dist) => 1.0 - dist.cdf(statistic),
        Err(_) => 0.0,
    };
    ByteFrequency { statistic, p_value }
}

/// Ratio of distinct values to samples, for detecting repeated output
pub fn distinct_ratio<T: Ord + Clone>(samples: &[T]) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted.len() as f64 / samples.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamming_distance() {
        assert_eq!(hamming_distance(&[0x00, 0xff], &[0x00, 0xff]), 0);
        assert_eq!(hamming_distance(&[0x00, 0x00], &[0xff, 0x01]), 9);
    }

    #[test]
    fn test_ones_fraction() {
        assert_eq!(ones_fraction(&[0x00; 4]), 0.0);
        assert_eq!(ones_fraction(&[0xff; 4]), 1.0);
        assert_eq!(ones_fraction(&[0x0f; 4]), 0.5);
    }

    #[test]
    fn test_byte_frequency_rejects_constant_data() {
        let report = byte_frequency(&[0x42; 4096]);
        assert!(report.p_value < 1e-12);
    }

    #[test]
    fn test_byte_frequency_accepts_uniform_counts() {
        let data: Vec<u8> = (0..256 * 64).map(|i| i as u8).collect();
        let report = byte_frequency(&data);
        assert_eq!(report.statistic, 0.0);
        assert!(report.p_value > 0.99);
    }

    #[test]
    fn test_distinct_ratio() {
        assert_eq!(distinct_ratio(&[1, 2, 3, 4]), 1.0);
        assert_eq!(distinct_ratio(&[7, 7, 7, 7]), 0.25);
    }
}
