// アプリケーション層 - 探索のオーケストレーション

pub mod progress;
pub mod search;

pub use progress::{ProgressManager, ProgressStats};
pub use search::{SearchHandle, SearchMessage, SearchService};
