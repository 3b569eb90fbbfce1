// 探索アプリケーションサービス

pub mod service;

pub use service::{SearchHandle, SearchMessage, SearchService};
