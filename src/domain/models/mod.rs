pub mod candidate;
pub mod config;
pub mod custom_entries;
pub mod fact_base;
pub mod outcome;
pub mod proposal;
pub mod verdict;

pub use candidate::{Candidate, SearchHit};
pub use config::{
    Config, HandoffSettings, LoggingSettings, OptimizationSettings, OracleSettings,
    SearchSettings, ServerSettings,
};
pub use custom_entries::{CustomEntry, CustomEntryTable};
pub use fact_base::FactBase;
pub use outcome::{LoopOutcome, LoopReport, RoundResult};
pub use proposal::ProposedEntry;
pub use verdict::{SelectedSite, SelectionVerdict};
