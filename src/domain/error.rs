// ドメインエラーの種別定義

use std::fmt;

/// コアが区別するエラー種別。
/// anyhow::Error に包んで伝播し、必要なら downcast_ref で判別する。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainError {
    /// 非連結なグラフに対して距離/直径を問い合わせた
    Disconnected,
    /// 被覆定式化が解を持たない（整形式のグラフでは発生しない）
    Infeasible(String),
    /// 空の入力（n = 0 や頂点のないグラフ）
    EmptyInput(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Disconnected => {
                write!(f, "グラフが連結ではありません（距離が定義できません）")
            }
            DomainError::Infeasible(msg) => write!(f, "被覆定式化が実行不能です: {}", msg),
            DomainError::EmptyInput(msg) => write!(f, "空の入力です: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
