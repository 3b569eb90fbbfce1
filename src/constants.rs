// 探索全体で使う定数

/// 直径削減ループのショートカット追加試行の上限。
/// ループの停止は乱択に依存するため（構造的な保証はない）、
/// ここで打ち切って「未収束」として候補を破棄する。
pub const REDUCE_ITERATION_CAP: usize = 10_000;

/// Prune-and-retry 方策の内側反復回数のデフォルト
pub const DEFAULT_INNER_CAP: u32 = 100;

/// 頂点数の上限（支配数計算と積構成が指数的なため小規模に限定）
pub const MAX_NODE_COUNT: u32 = 12;

/// 試行回数上限の上限値
pub const MAX_TRIAL_BUDGET: u64 = 100_000_000;

/// 受理条件の差分: γ(G⊗G) ≥ γ(G) + ACCEPT_GAMMA_GAP
pub const ACCEPT_GAMMA_GAP: u32 = 2;
