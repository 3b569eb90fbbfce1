// 無向単純グラフ（ドメイン層）

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use crate::domain::error::DomainError;

/// グラフの頂点識別子に要求する性質。
/// BTree コンテナで順序付けできること（＝反復順が決定的であること）が重要で、
/// これによりシード固定時のタイブレークが再現可能になる。
pub trait NodeId: Copy + Ord + fmt::Debug {}

impl<T: Copy + Ord + fmt::Debug> NodeId for T {}

/// 可変な無向単純グラフ。
///
/// 隣接集合を BTreeMap/BTreeSet で保持する（自己ループ・多重辺なし）。
/// 辺の追加/削除は冪等：既存辺の追加や存在しない辺の削除は no-op。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph<N: NodeId> {
    adj: BTreeMap<N, BTreeSet<N>>,
}

impl<N: NodeId> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId> Graph<N> {
    /// 空グラフを作成
    pub fn new() -> Self {
        Self {
            adj: BTreeMap::new(),
        }
    }

    /// 頂点列からグラフを作成（辺なし）
    pub fn with_nodes<I: IntoIterator<Item = N>>(nodes: I) -> Self {
        let mut g = Self::new();
        for n in nodes {
            g.add_node(n);
        }
        g
    }

    /// 頂点を追加（既存なら no-op）
    pub fn add_node(&mut self, n: N) {
        self.adj.entry(n).or_default();
    }

    /// 辺を追加（冪等）。端点は頂点集合に自動追加される。
    /// 自己ループは不変条件により無視する。
    pub fn add_edge(&mut self, a: N, b: N) {
        if a == b {
            return;
        }
        self.adj.entry(a).or_default().insert(b);
        self.adj.entry(b).or_default().insert(a);
    }

    /// 辺を削除（冪等）
    pub fn remove_edge(&mut self, a: N, b: N) {
        if let Some(set) = self.adj.get_mut(&a) {
            set.remove(&b);
        }
        if let Some(set) = self.adj.get_mut(&b) {
            set.remove(&a);
        }
    }

    /// 複数の辺をまとめて削除
    pub fn remove_edges<I: IntoIterator<Item = (N, N)>>(&mut self, edges: I) {
        for (a, b) in edges {
            self.remove_edge(a, b);
        }
    }

    /// 頂点の存在チェック
    pub fn has_node(&self, n: N) -> bool {
        self.adj.contains_key(&n)
    }

    /// 隣接チェック
    pub fn has_edge(&self, a: N, b: N) -> bool {
        self.adj.get(&a).is_some_and(|set| set.contains(&b))
    }

    /// 頂点数
    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// 辺数
    pub fn edge_count(&self) -> usize {
        self.adj.values().map(|s| s.len()).sum::<usize>() / 2
    }

    /// 頂点の反復（昇順）
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.adj.keys().copied()
    }

    /// 辺の一覧（a < b の順序付き対、辞書順）
    pub fn edges(&self) -> Vec<(N, N)> {
        let mut out = Vec::with_capacity(self.edge_count());
        for (&a, nbrs) in &self.adj {
            for &b in nbrs {
                if a < b {
                    out.push((a, b));
                }
            }
        }
        out
    }

    /// 頂点の隣接頂点（昇順）。未知の頂点なら空。
    pub fn neighbors(&self, n: N) -> impl Iterator<Item = N> + '_ {
        self.adj
            .get(&n)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// 次数
    pub fn degree(&self, n: N) -> usize {
        self.adj.get(&n).map_or(0, |s| s.len())
    }

    /// 開始頂点から到達可能な全頂点への BFS 距離（辺数）
    pub fn distances_from(&self, start: N) -> BTreeMap<N, usize> {
        let mut dist = BTreeMap::new();
        if !self.has_node(start) {
            return dist;
        }
        dist.insert(start, 0);
        let mut queue = VecDeque::new();
        queue.push_back(start);
        while let Some(u) = queue.pop_front() {
            let d = dist[&u];
            for v in self.neighbors(u) {
                if let std::collections::btree_map::Entry::Vacant(e) = dist.entry(v) {
                    e.insert(d + 1);
                    queue.push_back(v);
                }
            }
        }
        dist
    }

    /// 2頂点間の最短距離。別成分（または未知の頂点）なら Disconnected。
    pub fn distance(&self, a: N, b: N) -> Result<usize> {
        self.distances_from(a)
            .get(&b)
            .copied()
            .ok_or_else(|| DomainError::Disconnected.into())
    }

    /// 2頂点間の最短路（頂点列、両端を含む）。
    /// BFS の隣接展開が BTree 順なので経路選択は決定的。
    pub fn shortest_path(&self, a: N, b: N) -> Result<Vec<N>> {
        if !self.has_node(a) || !self.has_node(b) {
            return Err(DomainError::Disconnected.into());
        }
        if a == b {
            return Ok(vec![a]);
        }
        let mut parent: BTreeMap<N, N> = BTreeMap::new();
        let mut seen: BTreeSet<N> = BTreeSet::new();
        seen.insert(a);
        let mut queue = VecDeque::new();
        queue.push_back(a);
        'bfs: while let Some(u) = queue.pop_front() {
            for v in self.neighbors(u) {
                if seen.insert(v) {
                    parent.insert(v, u);
                    if v == b {
                        break 'bfs;
                    }
                    queue.push_back(v);
                }
            }
        }
        if !parent.contains_key(&b) {
            return Err(DomainError::Disconnected.into());
        }
        let mut path = vec![b];
        let mut cur = b;
        while cur != a {
            cur = parent[&cur];
            path.push(cur);
        }
        path.reverse();
        Ok(path)
    }

    /// 連結か（頂点数 ≤ 1 なら自明に真）
    pub fn is_connected(&self) -> bool {
        match self.nodes().next() {
            None => true,
            Some(start) => self.distances_from(start).len() == self.node_count(),
        }
    }

    /// 連結成分の一覧（頂点集合の分割、最小頂点の昇順）
    pub fn connected_components(&self) -> Vec<BTreeSet<N>> {
        let mut components = Vec::new();
        let mut visited: BTreeSet<N> = BTreeSet::new();
        for n in self.nodes() {
            if visited.contains(&n) {
                continue;
            }
            let comp: BTreeSet<N> = self.distances_from(n).into_keys().collect();
            visited.extend(comp.iter().copied());
            components.push(comp);
        }
        components
    }

    /// 最遠頂点対（直径対）とその距離。
    /// 頂点数 < 2 なら None。非連結なら Disconnected。
    /// 最大距離が複数あれば BTree 順で最初の対を返す（決定的タイブレーク）。
    pub fn diametral_pair(&self) -> Result<Option<(N, N, usize)>> {
        if self.node_count() < 2 {
            return Ok(None);
        }
        let n = self.node_count();
        let mut best: Option<(N, N, usize)> = None;
        for u in self.nodes() {
            let dist = self.distances_from(u);
            if dist.len() != n {
                return Err(DomainError::Disconnected.into());
            }
            for (&v, &d) in &dist {
                if best.map_or(true, |(_, _, bd)| d > bd) {
                    best = Some((u, v, d));
                }
            }
        }
        Ok(best)
    }

    /// 直径（最大最短距離）。頂点数 ≤ 1 なら 0。非連結なら Disconnected。
    pub fn diameter(&self) -> Result<usize> {
        match self.diametral_pair()? {
            None => Ok(0),
            Some((_, _, d)) => Ok(d),
        }
    }
}
