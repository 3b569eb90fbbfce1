// 探索ドライバ

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::application::progress::ProgressManager;
use crate::constants::{ACCEPT_GAMMA_GAP, REDUCE_ITERATION_CAP};
use crate::domain::graph::{modular_product, Graph};
use crate::domain::search::{GammaPair, GenerationPolicy, SearchConfig, SearchOutcome};
use crate::domain::solver::{domination_number, CoverBackend};
use crate::logging::trace_trial;
use crate::search::generate::{build_connected_graph, random_trial_graph};
use crate::search::reduce::reduce_diameter;

/// 候補 G について γ(G) と γ(G⊗G) を計算する
fn evaluate_candidate<B: CoverBackend>(
    g: &Graph<u32>,
    backend: &B,
    progress: &ProgressManager,
) -> Result<GammaPair> {
    let gamma_g = domination_number(g, backend)?;
    let gg = modular_product(g, g);
    let gamma_product = domination_number(&gg, backend)?;
    progress.add_solver_calls(2);
    Ok(GammaPair {
        gamma_g,
        gamma_product,
    })
}

/// 確率的探索の実行。
///
/// 設定の方策に従って候補グラフを生成し、直径を 2 以下へ削減した候補について
/// γ(G⊗G) ≥ γ(G) + 2 を判定する。Resample 方策は最初の受理で停止、
/// Rebuild / PruneRetry 方策は予算内の受理をすべて収集する。
/// 予算を使い切って受理ゼロでもエラーではなく空の結果を返す
/// （正当な否定的知見）。同一シードなら結果は再現する。
pub fn run_search<B: CoverBackend>(
    config: &SearchConfig,
    backend: &B,
    progress: &ProgressManager,
) -> Result<SearchOutcome> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    match config.policy {
        GenerationPolicy::Resample => run_resample(config, backend, progress, &mut rng),
        GenerationPolicy::Rebuild => run_rebuild(config, backend, progress, &mut rng),
        GenerationPolicy::PruneRetry => run_prune_retry(config, backend, progress, &mut rng),
    }
}

/// Resample 方策: 毎試行 G(n,m) を引き直し、非連結な引きは
/// 直径削減に進めず破棄する。最初の受理で停止。
fn run_resample<B: CoverBackend>(
    config: &SearchConfig,
    backend: &B,
    progress: &ProgressManager,
    rng: &mut StdRng,
) -> Result<SearchOutcome> {
    let n = config.nodes.get();
    let mut outcome = SearchOutcome::default();
    for _ in 0..config.budget.get() {
        if progress.is_aborted() {
            break;
        }
        outcome.trials += 1;
        progress.add_trials(1);

        let mut g = random_trial_graph(n, rng);
        if !g.is_connected() {
            continue;
        }
        if !reduce_diameter(&mut g, rng, REDUCE_ITERATION_CAP)? {
            continue; // 未収束の候補は破棄して次の試行へ
        }
        progress.add_reductions(1);

        let pair = evaluate_candidate(&g, backend, progress)?;
        trace_trial("resample", outcome.trials, &pair);
        if pair.satisfies_gap(ACCEPT_GAMMA_GAP) {
            outcome.accepted.push(g);
            progress.add_accepted(1);
            break;
        }
    }
    Ok(outcome)
}

/// Rebuild 方策: 毎試行、辺ゼロから連結性修復で連結グラフを構成する。
/// すべての試行が削減フェーズへ進む。予算内の受理を全収集。
fn run_rebuild<B: CoverBackend>(
    config: &SearchConfig,
    backend: &B,
    progress: &ProgressManager,
    rng: &mut StdRng,
) -> Result<SearchOutcome> {
    let n = config.nodes.get();
    let mut outcome = SearchOutcome::default();
    for _ in 0..config.budget.get() {
        if progress.is_aborted() {
            break;
        }
        outcome.trials += 1;
        progress.add_trials(1);

        let mut g = build_connected_graph(n, rng);
        if !reduce_diameter(&mut g, rng, REDUCE_ITERATION_CAP)? {
            continue;
        }
        progress.add_reductions(1);

        let pair = evaluate_candidate(&g, backend, progress)?;
        trace_trial("rebuild", outcome.trials, &pair);
        if pair.satisfies_gap(ACCEPT_GAMMA_GAP) {
            outcome.accepted.push(g);
            progress.add_accepted(1);
        }
    }
    Ok(outcome)
}

/// Prune-and-retry 方策: 外側試行ごとに連結グラフを1つ作り、
/// 内側で 削減→判定→失敗なら辺のランダム削除 を状態を引き継いで繰り返す。
/// 外側試行数は 予算 / 内側上限（切り捨て、最低1）。
fn run_prune_retry<B: CoverBackend>(
    config: &SearchConfig,
    backend: &B,
    progress: &ProgressManager,
    rng: &mut StdRng,
) -> Result<SearchOutcome> {
    let n = config.nodes.get();
    let inner_cap = config.inner_cap.get() as u64;
    let outer_trials = (config.budget.get() / inner_cap).max(1);
    let mut outcome = SearchOutcome::default();

    'outer: for _ in 0..outer_trials {
        if progress.is_aborted() {
            break;
        }
        outcome.trials += 1;
        progress.add_trials(1);

        let mut g = build_connected_graph(n, rng);
        for _ in 0..inner_cap {
            if progress.is_aborted() {
                break 'outer;
            }
            if !reduce_diameter(&mut g, rng, REDUCE_ITERATION_CAP)? {
                break; // この候補系列は打ち切り
            }
            progress.add_reductions(1);

            let pair = evaluate_candidate(&g, backend, progress)?;
            trace_trial("prune", outcome.trials, &pair);
            if pair.satisfies_gap(ACCEPT_GAMMA_GAP) {
                outcome.accepted.push(g.clone());
                progress.add_accepted(1);
                break;
            }
            prune_random_edges(&mut g, rng);
        }
    }
    Ok(outcome)
}

/// 失敗した候補の辺の 1〜半数をランダムに削除して作り直しの素地にする
fn prune_random_edges<R: Rng>(g: &mut Graph<u32>, rng: &mut R) {
    let edges = g.edges();
    if edges.is_empty() {
        return;
    }
    let max_remove = (edges.len() / 2).max(1);
    let k = rng.gen_range(1..=max_remove);
    let picked = rand::seq::index::sample(rng, edges.len(), k);
    g.remove_edges(picked.iter().map(|i| edges[i]));
}

/// 診断用: 受理の有無にかかわらず、観測した (γ(G), γ(G⊗G)) の列を集める。
/// 下流の統計分析向け。3方策すべてに対応する:
/// Resample は非連結の引きを記録せず、Rebuild は毎試行記録し、
/// PruneRetry は内側反復ごとに受理判定の前に記録する。
pub fn collect_gamma_pairs<B: CoverBackend>(
    config: &SearchConfig,
    backend: &B,
    progress: &ProgressManager,
) -> Result<Vec<GammaPair>> {
    config.validate()?;
    let n = config.nodes.get();
    let mut rng = StdRng::seed_from_u64(config.seed);
    if config.policy == GenerationPolicy::PruneRetry {
        return collect_prune_pairs(config, backend, progress, &mut rng);
    }
    let mut pairs = Vec::new();

    for _ in 0..config.budget.get() {
        if progress.is_aborted() {
            break;
        }
        progress.add_trials(1);

        let mut g = match config.policy {
            GenerationPolicy::Resample => {
                let g = random_trial_graph(n, &mut rng);
                if !g.is_connected() {
                    continue;
                }
                g
            }
            GenerationPolicy::Rebuild => build_connected_graph(n, &mut rng),
            GenerationPolicy::PruneRetry => unreachable!(),
        };
        if !reduce_diameter(&mut g, &mut rng, REDUCE_ITERATION_CAP)? {
            continue;
        }
        progress.add_reductions(1);
        pairs.push(evaluate_candidate(&g, backend, progress)?);
    }
    Ok(pairs)
}

/// PruneRetry 方策のγペア収集。探索版と同じ外側/内側構造で、
/// 内側反復ごとに評価したペアを（受理判定の前に）記録する。
/// 受理された系列はそこで打ち切り、次の外側試行へ進む。
fn collect_prune_pairs<B: CoverBackend>(
    config: &SearchConfig,
    backend: &B,
    progress: &ProgressManager,
    rng: &mut StdRng,
) -> Result<Vec<GammaPair>> {
    let n = config.nodes.get();
    let inner_cap = config.inner_cap.get() as u64;
    let outer_trials = (config.budget.get() / inner_cap).max(1);
    let mut pairs = Vec::new();

    'outer: for _ in 0..outer_trials {
        if progress.is_aborted() {
            break;
        }
        progress.add_trials(1);

        let mut g = build_connected_graph(n, rng);
        for _ in 0..inner_cap {
            if progress.is_aborted() {
                break 'outer;
            }
            if !reduce_diameter(&mut g, rng, REDUCE_ITERATION_CAP)? {
                break;
            }
            progress.add_reductions(1);

            let pair = evaluate_candidate(&g, backend, progress)?;
            pairs.push(pair);
            if pair.satisfies_gap(ACCEPT_GAMMA_GAP) {
                break;
            }
            prune_random_edges(&mut g, rng);
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::{GenerationPolicy, SearchConfig};
    use crate::infrastructure::solver::BranchBoundBackend;

    fn config(policy: GenerationPolicy, budget: u64, seed: u64) -> SearchConfig {
        SearchConfig::new(4, budget, policy, seed).unwrap()
    }

    #[test]
    fn resample_run_is_reproducible() {
        let backend = BranchBoundBackend::new();
        let cfg = config(GenerationPolicy::Resample, 50, 1234);
        let a = run_search(&cfg, &backend, &ProgressManager::new()).unwrap();
        let b = run_search(&cfg, &backend, &ProgressManager::new()).unwrap();
        assert_eq!(a.trials, b.trials);
        assert_eq!(a.accepted, b.accepted);
    }

    #[test]
    fn accepted_candidates_satisfy_inequality() {
        // 受理グラフは独立に再計算しても条件を満たす
        let backend = BranchBoundBackend::new();
        for policy in [
            GenerationPolicy::Resample,
            GenerationPolicy::Rebuild,
            GenerationPolicy::PruneRetry,
        ] {
            let cfg = config(policy, 40, 7);
            let outcome = run_search(&cfg, &backend, &ProgressManager::new()).unwrap();
            for g in &outcome.accepted {
                let gamma_g = domination_number(g, &backend).unwrap();
                let gg = modular_product(g, g);
                let gamma_gg = domination_number(&gg, &backend).unwrap();
                assert!(gamma_gg >= gamma_g + ACCEPT_GAMMA_GAP);
                assert!(g.is_connected());
                assert!(g.diameter().unwrap() <= 2);
            }
        }
    }

    #[test]
    fn budget_exhaustion_is_not_an_error() {
        let backend = BranchBoundBackend::new();
        let cfg = config(GenerationPolicy::Rebuild, 5, 42);
        let outcome = run_search(&cfg, &backend, &ProgressManager::new()).unwrap();
        assert_eq!(outcome.trials, 5);
        // 受理ゼロでも Ok（空の結果が正当な否定的知見）
    }

    #[test]
    fn abort_stops_before_any_trial() {
        let backend = BranchBoundBackend::new();
        let progress = ProgressManager::new();
        progress.abort();
        let cfg = config(GenerationPolicy::Resample, 100, 1);
        let outcome = run_search(&cfg, &backend, &progress).unwrap();
        assert_eq!(outcome.trials, 0);
    }

    #[test]
    fn gamma_pairs_are_collected_for_every_reduced_candidate() {
        let backend = BranchBoundBackend::new();
        let cfg = config(GenerationPolicy::Rebuild, 10, 5);
        let progress = ProgressManager::new();
        let pairs = collect_gamma_pairs(&cfg, &backend, &progress).unwrap();
        // Rebuild は毎試行連結なので全試行が記録される
        assert_eq!(pairs.len(), 10);
        for p in &pairs {
            assert!(p.gamma_g >= 1);
            assert!(p.gamma_product >= 1);
        }
    }

    #[test]
    fn gamma_pairs_are_collected_inside_prune_inner_loop() {
        let backend = BranchBoundBackend::new();
        // 予算 200 / 内側上限 100 → 外側 2 試行、各系列は反復ごとに記録
        let cfg = config(GenerationPolicy::PruneRetry, 200, 5);
        let progress = ProgressManager::new();
        let pairs = collect_gamma_pairs(&cfg, &backend, &progress).unwrap();
        assert!(pairs.len() >= 2); // 外側試行ごとに最低1ペア
        assert!(pairs.len() <= 200);
        assert_eq!(progress.get_stats().trials, 2);
        for p in &pairs {
            assert!(p.gamma_g >= 1);
            assert!(p.gamma_product >= 1);
        }
        // 同一シードで再現する
        let again = collect_gamma_pairs(&cfg, &backend, &ProgressManager::new()).unwrap();
        assert_eq!(pairs, again);
    }

    #[test]
    fn prune_retry_counts_outer_trials_only() {
        let backend = BranchBoundBackend::new();
        let cfg = config(GenerationPolicy::PruneRetry, 400, 3);
        // 内側上限 100 → 外側 4 試行
        let outcome = run_search(&cfg, &backend, &ProgressManager::new()).unwrap();
        assert!(outcome.trials <= 4);
    }
}
