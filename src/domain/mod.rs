// ドメイン層 - グラフモデルと最適化定式化の中核

pub mod error;
pub mod graph;
pub mod search;
pub mod solver;
