// 探索サービス

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{unbounded, Receiver};
use std::sync::Arc;
use std::thread;

use crate::application::progress::{ProgressManager, ProgressStats};
use crate::domain::search::{SearchConfig, SearchOutcome, SearchSummary};
use crate::infrastructure::solver::BranchBoundBackend;
use crate::search::engine::run_search;

/// サービスから呼び出し側へのメッセージ
#[derive(Debug)]
pub enum SearchMessage {
    /// ワーカースレッドで探索を開始した
    Started,
    /// 探索が完了した（受理ゼロも正常完了）
    Finished(SearchOutcome),
    /// エラーで終了した
    Error(String),
}

/// 実行中の探索へのハンドル
pub struct SearchHandle {
    pub progress: Arc<ProgressManager>,
    rx: Receiver<SearchMessage>,
}

impl SearchHandle {
    /// 探索を中断（試行境界で協調的に停止する）
    pub fn abort(&self) {
        self.progress.abort();
    }

    /// 中断されたかチェック
    pub fn is_aborted(&self) -> bool {
        self.progress.is_aborted()
    }

    /// 進捗統計を取得
    pub fn get_progress(&self) -> ProgressStats {
        self.progress.get_stats()
    }

    /// メッセージをブロッキング受信
    pub fn recv(&self) -> Result<SearchMessage> {
        self.rx
            .recv()
            .map_err(|e| anyhow!("メッセージの受信に失敗しました: {}", e))
    }

    /// メッセージをノンブロッキング受信
    pub fn try_recv(&self) -> Option<SearchMessage> {
        self.rx.try_recv().ok()
    }

    /// 完了まで待って結果を取り出す
    pub fn wait(&self) -> Result<SearchOutcome> {
        loop {
            match self.recv()? {
                SearchMessage::Started => continue,
                SearchMessage::Finished(outcome) => return Ok(outcome),
                SearchMessage::Error(msg) => return Err(anyhow!("探索が失敗しました: {}", msg)),
            }
        }
    }
}

/// 確率的探索を管理するサービス
pub struct SearchService {
    progress: Arc<ProgressManager>,
}

impl SearchService {
    pub fn new() -> Self {
        Self {
            progress: Arc::new(ProgressManager::new()),
        }
    }

    /// 探索を開始（メインユースケース）。
    /// 設定を検証し、ワーカースレッドでエンジンを走らせてハンドルを返す。
    pub fn start_search(&mut self, config: SearchConfig) -> Result<SearchHandle> {
        // 1. 事前検証
        config.validate().context("探索設定が不正です")?;

        // 2. 実行ごとに進捗マネージャーを新規作成。
        //    過去のハンドルが生きていても再実行でき、旧統計も汚れない。
        self.progress = Arc::new(ProgressManager::new());

        // 3. ワーカースレッドでエンジンを起動
        let (tx, rx) = unbounded::<SearchMessage>();
        let progress = Arc::clone(&self.progress);
        thread::spawn(move || {
            let _ = tx.send(SearchMessage::Started);
            let backend = BranchBoundBackend::new();
            match run_search(&config, &backend, &progress) {
                Ok(outcome) => {
                    let _ = tx.send(SearchMessage::Finished(outcome));
                }
                Err(e) => {
                    let _ = tx.send(SearchMessage::Error(format!("{e:?}")));
                }
            }
        });

        Ok(SearchHandle {
            progress: Arc::clone(&self.progress),
            rx,
        })
    }

    /// 探索結果のサマリーを作成
    pub fn create_summary(&self, outcome: &SearchOutcome) -> SearchSummary {
        SearchSummary {
            accepted_count: outcome.accepted.len() as u64,
            total_trials: outcome.trials,
            elapsed_seconds: self.progress.elapsed().as_secs_f64(),
            trials_per_second: self.progress.trials_per_second(),
        }
    }
}

impl Default for SearchService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::GenerationPolicy;

    #[test]
    fn search_runs_to_completion() {
        let mut service = SearchService::new();
        let config = SearchConfig::new(4, 10, GenerationPolicy::Rebuild, 8).unwrap();
        let handle = service.start_search(config).unwrap();
        let outcome = handle.wait().unwrap();
        assert_eq!(outcome.trials, 10);
        assert_eq!(handle.get_progress().trials, 10);
    }

    #[test]
    fn handle_can_abort() {
        let mut service = SearchService::new();
        let config = SearchConfig::new(4, 1000, GenerationPolicy::Rebuild, 8).unwrap();
        let handle = service.start_search(config).unwrap();
        handle.abort();
        assert!(handle.is_aborted());
        // 中断後も正常完了メッセージが届く
        let outcome = handle.wait().unwrap();
        assert!(outcome.trials <= 1000);
    }

    #[test]
    fn service_can_start_again_while_old_handle_lives() {
        let mut service = SearchService::new();
        let cfg = SearchConfig::new(4, 5, GenerationPolicy::Rebuild, 1).unwrap();
        let first = service.start_search(cfg).unwrap();
        assert_eq!(first.wait().unwrap().trials, 5);

        // 旧ハンドルを保持したままでも次の実行を開始できる
        let second = service.start_search(cfg).unwrap();
        assert_eq!(second.wait().unwrap().trials, 5);
        // 旧ハンドルの統計は新しい実行に上書きされない
        assert_eq!(first.get_progress().trials, 5);
    }

    #[test]
    fn summary_reflects_outcome() {
        let service = SearchService::new();
        let outcome = SearchOutcome {
            accepted: vec![],
            trials: 42,
        };
        let summary = service.create_summary(&outcome);
        assert_eq!(summary.accepted_count, 0);
        assert_eq!(summary.total_trials, 42);
    }
}
