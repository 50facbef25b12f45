//! Service layer: the convergence loop and its two stage wrappers, plus
//! result enhancement and the downstream rewrite planner.

pub mod convergence_loop;
pub mod enhancer;
pub mod optimizer;
pub mod parsing;
pub mod rewrite;
pub mod selector;

pub use convergence_loop::{LoopConfig, OptimizationLoop};
pub use enhancer::enhance_results;
pub use optimizer::SnippetOptimizer;
pub use rewrite::RewritePlanner;
pub use selector::SiteSelector;
