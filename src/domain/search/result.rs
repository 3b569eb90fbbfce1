// 探索結果の定義

use serde::{Deserialize, Serialize};

use crate::domain::graph::Graph;

/// 1候補に対する支配数の対 (γ(G), γ(G⊗G))
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GammaPair {
    pub gamma_g: u32,
    pub gamma_product: u32,
}

impl GammaPair {
    /// 受理条件 γ(G⊗G) ≥ γ(G) + gap を満たすか
    pub fn satisfies_gap(&self, gap: u32) -> bool {
        self.gamma_product >= self.gamma_g + gap
    }
}

/// 1回の探索実行の結果
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// 受理されたグラフ。Resample 方策では高々1件、
    /// Rebuild / PruneRetry 方策では予算内の全受理。
    pub accepted: Vec<Graph<u32>>,
    /// 消化した外側試行数
    pub trials: u64,
}

impl SearchOutcome {
    /// 最初の受理グラフ（なければ None — 予算切れは正常な否定的結果）
    pub fn first(&self) -> Option<&Graph<u32>> {
        self.accepted.first()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// 探索サマリー
#[derive(Clone, Debug, Default)]
pub struct SearchSummary {
    pub accepted_count: u64,
    pub total_trials: u64,
    pub elapsed_seconds: f64,
    pub trials_per_second: f64,
}
