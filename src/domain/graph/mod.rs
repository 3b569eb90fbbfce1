// グラフ関連のドメインモデル

pub mod graph;
pub mod product;

pub use graph::{Graph, NodeId};
pub use product::modular_product;
