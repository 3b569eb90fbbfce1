// 候補グラフのランダム生成

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::graph::Graph;
use crate::search::repair::connect_components;

/// 頂点 0..n、辺なしのグラフ
pub fn empty_graph(n: u32) -> Graph<u32> {
    Graph::with_nodes(0..n)
}

/// G(n, m) 一様ランダムグラフ: 全頂点対から m 本を等確率に選ぶ。
/// m が最大辺数を超える場合は最大辺数に切り詰める。
pub fn gnm_random_graph<R: Rng>(n: u32, m: usize, rng: &mut R) -> Graph<u32> {
    let mut g = empty_graph(n);
    let mut pairs: Vec<(u32, u32)> = Vec::with_capacity((n as usize) * (n as usize - 1) / 2);
    for a in 0..n {
        for b in (a + 1)..n {
            pairs.push((a, b));
        }
    }
    let m = m.min(pairs.len());
    let (chosen, _) = pairs.partial_shuffle(rng, m);
    for &(a, b) in chosen.iter() {
        g.add_edge(a, b);
    }
    g
}

/// Resample 方策の1引き: 辺数を [n-1, n(n-1)/2] から一様に選んで G(n,m) を引く。
/// 連結性は保証しない（非連結の引きは呼び出し側が破棄する）。
pub fn random_trial_graph<R: Rng>(n: u32, rng: &mut R) -> Graph<u32> {
    let lo = n.saturating_sub(1) as usize;
    let hi = (n as usize) * (n as usize - 1) / 2;
    let m = if lo >= hi { hi } else { rng.gen_range(lo..=hi) };
    gnm_random_graph(n, m, rng)
}

/// Rebuild 方策の1引き: 辺ゼロから連結性修復で連結グラフを構成する
/// （非連結の引きを捨てる代わりに、必ず削減フェーズへ進める）。
pub fn build_connected_graph<R: Rng>(n: u32, rng: &mut R) -> Graph<u32> {
    let mut g = empty_graph(n);
    connect_components(&mut g, rng);
    g
}
