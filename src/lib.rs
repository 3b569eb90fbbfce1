// モジュラー積支配数探索 - ライブラリモジュール
//
// 条件 γ(G⊗G) ≥ γ(G) + 2（⊗ はモジュラー積、γ は支配数）を満たす
// 単純グラフ G を確率的に探索する研究用ライブラリ。

pub mod constants;
pub mod domain; // ドメイン層
pub mod search; // 探索コア（乱択手続き＋ドライバ）
pub mod application; // アプリケーション層
pub mod infrastructure; // インフラ層
pub mod logging;

// 外部クレートの再エクスポート
pub use anyhow::{anyhow, Context, Result};

// 主要な型を再エクスポート
pub use domain::error::DomainError;
pub use domain::graph::{modular_product, Graph};
pub use domain::search::{
    GammaPair, GenerationPolicy, InnerCap, NodeCount, SearchConfig, SearchOutcome, TrialBudget,
};
pub use domain::solver::{domination_number, CoverBackend, CoverInstance};
pub use infrastructure::solver::BranchBoundBackend;
pub use search::engine::{collect_gamma_pairs, run_search};
