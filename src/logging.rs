// 探索トレース用のファイルロギング

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::domain::search::GammaPair;

/// グローバルな詳細トレースフラグ
static VERBOSE_TRACE: AtomicBool = AtomicBool::new(false);

/// トレースファイルのグローバルハンドル
static TRACE_FILE: Mutex<Option<std::fs::File>> = Mutex::new(None);

/// トレースファイルを初期化する（上書きモード）
pub fn init_trace_file(path: &str) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    let mut trace = TRACE_FILE.lock().unwrap();
    *trace = Some(file);
    Ok(())
}

/// トレース行をファイルに書き込む
pub fn write_trace(message: String) {
    if let Ok(mut trace) = TRACE_FILE.lock() {
        if let Some(ref mut file) = *trace {
            let _ = writeln!(file, "{}", message);
            let _ = file.flush();
        }
    }
}

/// 詳細トレースの有効/無効を切り替える
pub fn set_verbose(enabled: bool) {
    VERBOSE_TRACE.store(enabled, Ordering::Relaxed);
}

/// 詳細トレースが有効かチェック
pub fn is_verbose() -> bool {
    VERBOSE_TRACE.load(Ordering::Relaxed)
}

/// 詳細トレース出力マクロ（ファイル出力）
#[macro_export]
macro_rules! vlog {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            let message = format!($($arg)*);
            $crate::logging::write_trace(message);
        }
    };
}

/// 評価済み候補のトレース1行（方策・試行番号・γ値の固定フィールド）
fn format_trial(policy: &str, trial: u64, pair: &GammaPair) -> String {
    format!(
        "policy={} trial={} gamma_g={} gamma_product={}",
        policy, trial, pair.gamma_g, pair.gamma_product
    )
}

/// 評価済み候補をトレースファイルへ記録する（詳細トレース有効時のみ）
pub fn trace_trial(policy: &str, trial: u64, pair: &GammaPair) {
    vlog!("{}", format_trial(policy, trial, pair));
}
