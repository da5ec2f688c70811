///
/// Between-population estimates for one population pair at one site.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairDivergence {
    /// Absolute divergence, D_xy
    pub dxy: f64,
    /// Net divergence, D_a = D_xy - (pi_p + pi_q) / 2
    pub da: f64,
}

///
/// Outcome of estimating one aligned site.
///
/// A site is `Usable` only when every population contributed at least two
/// non-missing alleles; otherwise it is `Omitted` and carries no statistics.
///
#[derive(Debug, Clone, PartialEq)]
pub enum SiteEstimate {
    Usable {
        /// Per population, in population order
        pi: Vec<f64>,
        /// Per population pair `(p, q)`, `p < q`, in pair order
        divergence: Vec<PairDivergence>,
    },
    Omitted,
}

impl SiteEstimate {
    pub fn is_usable(&self) -> bool {
        matches!(self, SiteEstimate::Usable { .. })
    }
}
