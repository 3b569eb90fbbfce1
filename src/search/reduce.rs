// 直径削減

use anyhow::Result;
use rand::Rng;

use crate::domain::graph::{Graph, NodeId};
use crate::search::repair::connect_components;

/// グラフの直径を 2 以下に削減する乱択手続き。
///
/// 非連結なら先に連結性修復を行う。その後、直径対（最遠頂点対）を求め、
/// 距離が 2 を超える間、その最短路上の相異なる2位置を一様に選んで
/// ショートカット辺を追加する。辺の追加は距離を縮めるか保つだけなので
/// 反復で直径 2 に収束することが期待できるが、停止は乱択頼みで
/// 構造的な保証はない。そのため `cap` 回で打ち切り、
/// 収束したら Ok(true)、打ち切りなら Ok(false) を返す。
///
/// 事後条件（Ok(true) のとき）: 直径 ≤ 2、頂点集合は不変、
/// 辺集合は元の上位集合（修復辺＋ショートカット辺のみ追加）。
pub fn reduce_diameter<N: NodeId, R: Rng>(
    g: &mut Graph<N>,
    rng: &mut R,
    cap: usize,
) -> Result<bool> {
    if !g.is_connected() {
        connect_components(g, rng);
    }

    for _ in 0..cap {
        let Some((u, v, dist)) = g.diametral_pair()? else {
            // 頂点数 < 2 なら直径 0 で条件は自明に満たされる
            return Ok(true);
        };
        if dist <= 2 {
            return Ok(true);
        }
        let path = g.shortest_path(u, v)?;
        // 距離 > 2 なら中間頂点があり頂点列長は 4 以上
        if path.len() > 3 {
            let idx = rand::seq::index::sample(rng, path.len(), 2);
            let (mut i, mut j) = (idx.index(0), idx.index(1));
            if i > j {
                std::mem::swap(&mut i, &mut j);
            }
            // 隣接位置を引いた場合は既存辺への冪等な追加となり、この反復は空振り
            g.add_edge(path[i], path[j]);
        }
    }
    Ok(false)
}
