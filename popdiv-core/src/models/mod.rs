pub mod population;
pub mod scaffold;
pub mod site;

// re-export for cleaner imports
pub use self::population::{PopulationCount, PopulationLookup, PopulationMap, population_pairs};
pub use self::scaffold::{SampleSequence, Scaffold};
pub use self::site::{PairDivergence, SiteEstimate};
