// 被覆問題ソルバーのバックエンド実装

pub mod branch_bound;

pub use branch_bound::BranchBoundBackend;
