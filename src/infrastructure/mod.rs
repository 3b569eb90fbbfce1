// インフラ層 - 最適化バックエンドと並列実行

pub mod executor;
pub mod solver;

pub use executor::ParallelExecutor;
pub use solver::BranchBoundBackend;
