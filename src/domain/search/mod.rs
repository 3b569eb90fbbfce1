// 探索関連のドメインモデル

pub mod config;
pub mod result;

pub use config::{GenerationPolicy, InnerCap, NodeCount, SearchConfig, TrialBudget};
pub use result::{GammaPair, SearchOutcome, SearchSummary};
