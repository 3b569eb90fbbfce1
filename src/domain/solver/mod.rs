// 支配数の 0/1 被覆定式化（ドメイン層）

use anyhow::Result;

use crate::domain::graph::{Graph, NodeId};

/// 0/1 被覆問題のインスタンス。
///
/// 変数は頂点ごとに1つ（支配集合に入れるか否か）。
/// `constraints[v]` は頂点 v を支配できる変数の添字一覧
/// （v の閉近傍 N[v]、v 自身を含む）。目的はすべての制約を
/// 満たす変数集合の最小サイズ。
#[derive(Clone, Debug)]
pub struct CoverInstance {
    pub num_vars: usize,
    pub constraints: Vec<Vec<usize>>,
}

/// 被覆問題の厳密ソルバーの狭いインターフェース。
/// バックエンド（分枝限定法、ILP、SAT 等）はこの1メソッドの実装を
/// 差し替えるだけで交換できる。近似解は契約違反。
pub trait CoverBackend {
    /// 最小被覆のサイズを返す。定式化が不正（空制約など）なら Infeasible。
    fn minimum_cover(&self, instance: &CoverInstance) -> Result<u32>;
}

/// グラフ G の支配数 γ(G) を厳密に計算する。
///
/// 各頂点 v に対し「v の閉近傍から少なくとも1頂点を選ぶ」被覆制約を立て、
/// バックエンドで最小値を解く。非連結なグラフも受け付ける
/// （D = V が常に実行可能なので、整形式の入力で Infeasible は起きない）。
/// 頂点のないグラフの支配数は 0。
pub fn domination_number<N: NodeId, B: CoverBackend>(g: &Graph<N>, backend: &B) -> Result<u32> {
    let nodes: Vec<N> = g.nodes().collect();
    if nodes.is_empty() {
        return Ok(0);
    }

    // 頂点 → 変数添字（BTree 順なので決定的）
    let index_of = |n: &N| nodes.binary_search(n).expect("頂点は必ず存在する");

    let constraints: Vec<Vec<usize>> = nodes
        .iter()
        .map(|&v| {
            let mut closed: Vec<usize> = vec![index_of(&v)];
            closed.extend(g.neighbors(v).map(|u| index_of(&u)));
            closed.sort_unstable();
            closed
        })
        .collect();

    let instance = CoverInstance {
        num_vars: nodes.len(),
        constraints,
    };
    backend.minimum_cover(&instance)
}
