// 連結性修復

use rand::Rng;

use crate::domain::graph::{Graph, NodeId};

/// 非連結なグラフを連結にする乱択手続き。
///
/// 成分が2つ以上ある間、現在の成分から一様に2つ選び、
/// それぞれから一様に選んだ頂点同士を辺で結ぶ。
/// 1反復ごとに成分数がちょうど1減るため、
/// 正確に (成分数 - 1) 回で停止する（開放型の探索ではない）。
/// 追加した辺数を返す。
pub fn connect_components<N: NodeId, R: Rng>(g: &mut Graph<N>, rng: &mut R) -> usize {
    let mut added = 0;
    loop {
        let comps = g.connected_components();
        if comps.len() <= 1 {
            break;
        }
        // 相異なる2成分を一様に選ぶ
        let i = rng.gen_range(0..comps.len());
        let mut j = rng.gen_range(0..comps.len() - 1);
        if j >= i {
            j += 1;
        }
        let a = pick_uniform(&comps[i], rng);
        let b = pick_uniform(&comps[j], rng);
        g.add_edge(a, b);
        added += 1;
    }
    added
}

/// 成分から一様ランダムに1頂点選ぶ
fn pick_uniform<N: NodeId, R: Rng>(comp: &std::collections::BTreeSet<N>, rng: &mut R) -> N {
    let k = rng.gen_range(0..comp.len());
    *comp.iter().nth(k).expect("成分は空でない")
}
