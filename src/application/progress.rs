// 進捗管理

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// 進捗統計
#[derive(Clone, Debug, Default)]
pub struct ProgressStats {
    /// 消化した外側試行数
    pub trials: u64,
    /// 直径 ≤ 2 まで削減できた候補数
    pub reductions: u64,
    /// 支配数ソルバーの呼び出し回数
    pub solver_calls: u64,
    /// 受理されたグラフ数
    pub accepted: u64,
}

/// 進捗マネージャー。
/// エンジンが原子カウンタを更新し、呼び出し側が任意のタイミングで読む。
/// 中断フラグは試行境界で協調的にチェックされる。
pub struct ProgressManager {
    abort_flag: AtomicBool,
    trials: AtomicU64,
    reductions: AtomicU64,
    solver_calls: AtomicU64,
    accepted: AtomicU64,
    start_time: Instant,
}

impl ProgressManager {
    pub fn new() -> Self {
        Self {
            abort_flag: AtomicBool::new(false),
            trials: AtomicU64::new(0),
            reductions: AtomicU64::new(0),
            solver_calls: AtomicU64::new(0),
            accepted: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// 探索を中断
    pub fn abort(&self) {
        self.abort_flag.store(true, Ordering::Relaxed);
    }

    /// 中断されたかチェック
    pub fn is_aborted(&self) -> bool {
        self.abort_flag.load(Ordering::Relaxed)
    }

    /// 試行数を追加
    pub fn add_trials(&self, count: u64) {
        self.trials.fetch_add(count, Ordering::Relaxed);
    }

    /// 削減完了数を追加
    pub fn add_reductions(&self, count: u64) {
        self.reductions.fetch_add(count, Ordering::Relaxed);
    }

    /// ソルバー呼び出し数を追加
    pub fn add_solver_calls(&self, count: u64) {
        self.solver_calls.fetch_add(count, Ordering::Relaxed);
    }

    /// 受理数を追加
    pub fn add_accepted(&self, count: u64) {
        self.accepted.fetch_add(count, Ordering::Relaxed);
    }

    /// 現在の統計を取得
    pub fn get_stats(&self) -> ProgressStats {
        ProgressStats {
            trials: self.trials.load(Ordering::Relaxed),
            reductions: self.reductions.load(Ordering::Relaxed),
            solver_calls: self.solver_calls.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
        }
    }

    /// 経過時間を取得
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 探索速度（試行/秒）を取得
    pub fn trials_per_second(&self) -> f64 {
        let trials = self.trials.load(Ordering::Relaxed) as f64;
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            trials / elapsed
        } else {
            0.0
        }
    }

}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}
