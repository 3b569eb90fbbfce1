// モジュラー積の構成

use super::graph::{Graph, NodeId};

/// 2つのグラフ G, H のモジュラー積 G⊗H を構成する。
///
/// 頂点集合は V(G) × V(H)。相異なる頂点対 (g1,h1), (g2,h2) に対して、
/// 次の3規則のいずれかちょうど1つが成り立つとき辺を張る：
///   1. 片座標一致: g1 = g2 かつ (h1,h2) ∈ E(H)、または h1 = h2 かつ (g1,g2) ∈ E(G)
///   2. 対角隣接: g1 ≠ g2, h1 ≠ h2, (g1,g2) ∈ E(G) かつ (h1,h2) ∈ E(H)
///   3. 対角非隣接: g1 ≠ g2, h1 ≠ h2, (g1,g2) ∉ E(G) かつ (h1,h2) ∉ E(H)
///
/// 各非順序対は一度だけ評価する。対評価は O((|V(G)|·|V(H)|)²) で、
/// 小規模グラフ専用（研究スケール前提）。
/// 構成後の積グラフは変更しない（G や H が変わったら作り直す）。
pub fn modular_product<N: NodeId, M: NodeId>(g: &Graph<N>, h: &Graph<M>) -> Graph<(N, M)> {
    let mut product: Graph<(N, M)> = Graph::new();
    let mut nodes: Vec<(N, M)> = Vec::with_capacity(g.node_count() * h.node_count());
    for gn in g.nodes() {
        for hn in h.nodes() {
            nodes.push((gn, hn));
            product.add_node((gn, hn));
        }
    }

    for i in 0..nodes.len() {
        let (g1, h1) = nodes[i];
        for &(g2, h2) in nodes.iter().skip(i + 1) {
            let g_adj = g.has_edge(g1, g2);
            let h_adj = h.has_edge(h1, h2);
            let aligned = (g1 == g2 && h_adj) || (h1 == h2 && g_adj);
            let diagonal = g1 != g2 && h1 != h2 && ((g_adj && h_adj) || (!g_adj && !h_adj));
            if aligned || diagonal {
                product.add_edge((g1, h1), (g2, h2));
            }
        }
    }
    product
}
