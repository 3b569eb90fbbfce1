// 厳密な最小被覆の分枝限定法バックエンド

use anyhow::Result;
use std::cmp::Reverse;

use crate::domain::error::DomainError;
use crate::domain::solver::{CoverBackend, CoverInstance};

// 制約集合を u64 ワード列のビット集合で扱う
type Mask = Vec<u64>;

#[inline(always)]
fn word_count(bits: usize) -> usize {
    bits.div_ceil(64)
}

#[inline(always)]
fn set_bit(mask: &mut Mask, i: usize) {
    mask[i / 64] |= 1u64 << (i % 64);
}

#[inline(always)]
fn get_bit(mask: &Mask, i: usize) -> bool {
    mask[i / 64] & (1u64 << (i % 64)) != 0
}

#[inline(always)]
fn union_into(dst: &mut Mask, src: &Mask) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d |= s;
    }
}

#[inline(always)]
fn popcount(mask: &Mask) -> u32 {
    mask.iter().map(|w| w.count_ones()).sum()
}

/// dst に含まれず src に含まれるビット数（新規被覆量）
#[inline(always)]
fn gain(dominated: &Mask, cover: &Mask) -> u32 {
    dominated
        .iter()
        .zip(cover.iter())
        .map(|(d, c)| (c & !d).count_ones())
        .sum()
}

/// 分枝限定法による厳密な最小被覆ソルバー。
///
/// 上界は貪欲被覆、下界は ⌈未被覆数 / 最大被覆量⌉
/// （支配数の古典的下界 m/(Δ+1) の被覆版）。
/// 分枝は「未被覆制約のうち候補変数が最少のもの」の候補全列挙なので、
/// 探索は網羅的であり返り値は厳密な最適値。
#[derive(Clone, Copy, Debug, Default)]
pub struct BranchBoundBackend;

impl BranchBoundBackend {
    pub fn new() -> Self {
        Self
    }
}

impl CoverBackend for BranchBoundBackend {
    fn minimum_cover(&self, instance: &CoverInstance) -> Result<u32> {
        let n = instance.num_vars;
        if n == 0 {
            return Ok(0);
        }
        if instance.constraints.len() != n {
            return Err(DomainError::Infeasible(format!(
                "制約数 {} が変数数 {} と一致しません",
                instance.constraints.len(),
                n
            ))
            .into());
        }
        for (v, c) in instance.constraints.iter().enumerate() {
            if c.is_empty() {
                return Err(
                    DomainError::Infeasible(format!("制約 {} に候補変数がありません", v)).into(),
                );
            }
            if c.iter().any(|&i| i >= n) {
                return Err(
                    DomainError::Infeasible(format!("制約 {} の変数添字が範囲外です", v)).into(),
                );
            }
        }

        let words = word_count(n);
        // cover[i] = 変数 i が満たす制約のビット集合
        let mut cover: Vec<Mask> = vec![vec![0u64; words]; n];
        for (v, c) in instance.constraints.iter().enumerate() {
            for &i in c {
                set_bit(&mut cover[i], v);
            }
        }

        // 下界用: 1変数が被覆できる制約数の最大（閉近傍サイズの最大 = Δ+1）
        let max_cover = cover.iter().map(popcount).max().unwrap_or(1).max(1);

        // 貪欲被覆で初期上界を作る
        let mut best = greedy_upper_bound(n, &cover);

        let mut dominated = vec![0u64; words];
        branch(
            0,
            &mut dominated,
            n,
            &cover,
            &instance.constraints,
            max_cover,
            &mut best,
        );
        Ok(best)
    }
}

/// 貪欲法: 新規被覆量が最大の変数を取り続ける（上界として常に実行可能）
fn greedy_upper_bound(n: usize, cover: &[Mask]) -> u32 {
    let words = cover[0].len();
    let mut dominated = vec![0u64; words];
    let mut chosen = 0u32;
    let total = n as u32;
    while popcount(&dominated) < total {
        let pick = (0..n)
            .max_by_key(|&i| gain(&dominated, &cover[i]))
            .expect("変数は1つ以上ある");
        // すべての制約が閉近傍を持つため貪欲は必ず前進する
        union_into(&mut dominated, &cover[pick]);
        chosen += 1;
    }
    chosen
}

#[allow(clippy::too_many_arguments)]
fn branch(
    chosen: u32,
    dominated: &mut Mask,
    n: usize,
    cover: &[Mask],
    constraints: &[Vec<usize>],
    max_cover: u32,
    best: &mut u32,
) {
    let remaining = n as u32 - popcount(dominated);
    if remaining == 0 {
        *best = (*best).min(chosen);
        return;
    }
    // 下界による枝刈り
    let lower = remaining.div_ceil(max_cover);
    if chosen + lower >= *best {
        return;
    }

    // 分枝対象: 未被覆制約のうち候補変数が最少のもの
    let v = (0..n)
        .filter(|&v| !get_bit(dominated, v))
        .min_by_key(|&v| constraints[v].len())
        .expect("未被覆の制約が存在する");

    // 新規被覆量の大きい候補から試す（上界が早く締まる）
    let mut candidates = constraints[v].clone();
    candidates.sort_by_key(|&i| Reverse(gain(dominated, &cover[i])));

    for i in candidates {
        let saved = dominated.clone();
        union_into(dominated, &cover[i]);
        branch(chosen + 1, dominated, n, cover, constraints, max_cover, best);
        *dominated = saved;
    }
}
