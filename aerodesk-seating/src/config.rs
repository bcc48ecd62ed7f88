use crate::classifier::AgePolicy;
use crate::grouping::PriorityWeights;
use crate::layout::LayoutCatalog;
use crate::resolver::ResolverConfig;
use crate::seat_class::SeatClassTable;
use serde::{Deserialize, Serialize};

/// Tunables of the seat allocation. Every section falls back to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatingConfig {
    #[serde(default)]
    pub classes: SeatClassTable,
    #[serde(default)]
    pub priorities: PriorityWeights,
    #[serde(default)]
    pub ages: AgePolicy,
    #[serde(default)]
    pub layouts: LayoutCatalog,
    #[serde(default)]
    pub resolver: ResolverConfig,
}
