// 探索コア - 乱択手続きと探索ドライバ

pub mod engine;
pub mod generate;
pub mod reduce;
pub mod repair;

pub use engine::{collect_gamma_pairs, run_search};
pub use generate::{build_connected_graph, gnm_random_graph, random_trial_graph};
pub use reduce::reduce_diameter;
pub use repair::connect_components;
