//! Per-site estimators from population allele frequencies.
//!
//! The within-population estimator sums `2 p_i p_j` over every unordered pair of
//! bases, so for a biallelic site it is the familiar `2pq`, corrected by
//! `n / (n - 1)` for `n` sampled alleles (Nei 1987, eqn. 10.5). Divergence is
//! Nei (1987) eqn. 10.20 with `d_ij = 1` for `i != j`.
use popdiv_core::consts::NUM_BASES;

///
/// Within-population diversity, pi.
///
/// # Arguments
/// - freqs: base frequencies of the population
/// - n_alleles: number of non-missing alleles behind `freqs`
///
pub fn pi_hat(freqs: &[f64; NUM_BASES], n_alleles: u32) -> f64 {
    let mut pi = 0.0;
    for i in 0..NUM_BASES - 1 {
        for j in i + 1..NUM_BASES {
            pi += 2.0 * freqs[i] * freqs[j];
        }
    }

    // n / (n - 1) is undefined below two alleles
    if n_alleles >= 2 {
        pi *= n_alleles as f64 / (n_alleles - 1) as f64;
    }
    pi
}

///
/// Absolute divergence between two populations, D_xy.
///
pub fn dxy_hat(x: &[f64; NUM_BASES], y: &[f64; NUM_BASES]) -> f64 {
    let mut dxy = 0.0;
    for i in 0..NUM_BASES {
        for j in 0..NUM_BASES {
            if i != j {
                dxy += x[i] * y[j];
            }
        }
    }
    dxy
}

///
/// Net divergence, D_a = D_xy - (pi_x + pi_y) / 2.
///
pub fn da_hat(dxy: f64, pi_x: f64, pi_y: f64) -> f64 {
    dxy - (pi_x + pi_y) / 2.0
}
