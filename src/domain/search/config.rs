// 探索設定のValue Objects

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INNER_CAP, MAX_NODE_COUNT, MAX_TRIAL_BUDGET};
use crate::domain::error::DomainError;

/// 頂点数を表すValue Object
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeCount(u32);

impl NodeCount {
    pub fn new(n: u32) -> Result<Self> {
        if n == 0 {
            return Err(DomainError::EmptyInput("頂点数は1以上である必要があります".into()).into());
        }
        if n > MAX_NODE_COUNT {
            return Err(anyhow!(
                "頂点数が大きすぎます: {} (上限 {})",
                n,
                MAX_NODE_COUNT
            ));
        }
        Ok(Self(n))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// 単純グラフの最大辺数 n(n-1)/2
    pub fn max_edges(&self) -> usize {
        let n = self.0 as usize;
        n * (n - 1) / 2
    }
}

/// 試行回数上限を表すValue Object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBudget(u64);

impl TrialBudget {
    pub fn new(max_iter: u64) -> Result<Self> {
        if max_iter == 0 {
            return Err(anyhow!("試行回数は1以上である必要があります"));
        }
        if max_iter > MAX_TRIAL_BUDGET {
            return Err(anyhow!("試行回数が大きすぎます: {}", max_iter));
        }
        Ok(Self(max_iter))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Prune-and-retry 方策の内側反復回数を表すValue Object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerCap(u32);

impl InnerCap {
    pub fn new(cap: u32) -> Result<Self> {
        if cap == 0 {
            return Err(anyhow!("内側反復回数は1以上である必要があります"));
        }
        Ok(Self(cap))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for InnerCap {
    fn default() -> Self {
        Self(DEFAULT_INNER_CAP)
    }
}

/// 候補グラフの生成方策
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationPolicy {
    /// 毎試行 G(n,m) を引き直す。非連結な引きは破棄（直径削減に進まない）。
    /// 最初の受理で停止する。
    Resample,
    /// 毎試行、辺ゼロから連結性修復で連結グラフを構成する。
    /// 予算内の受理をすべて収集する。
    Rebuild,
    /// 外側試行ごとに連結グラフを1つ作り、内側で
    /// 削減→判定→失敗なら辺のランダム削除、を状態を引き継いで繰り返す。
    PruneRetry,
}

/// 探索設定のValue Object
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    pub nodes: NodeCount,
    pub budget: TrialBudget,
    pub policy: GenerationPolicy,
    pub inner_cap: InnerCap,
    /// 乱数シード。同一シード・同一設定なら結果は再現する。
    pub seed: u64,
}

impl SearchConfig {
    pub fn new(n: u32, max_iter: u64, policy: GenerationPolicy, seed: u64) -> Result<Self> {
        Ok(Self {
            nodes: NodeCount::new(n)?,
            budget: TrialBudget::new(max_iter)?,
            policy,
            inner_cap: InnerCap::default(),
            seed,
        })
    }

    pub fn with_inner_cap(mut self, cap: InnerCap) -> Self {
        self.inner_cap = cap;
        self
    }

    pub fn validate(&self) -> Result<()> {
        // Value Objectsで既に検証済み
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            nodes: NodeCount::new(5).unwrap(),
            budget: TrialBudget::new(1000).unwrap(),
            policy: GenerationPolicy::Resample,
            inner_cap: InnerCap::default(),
            seed: 0,
        }
    }
}
