use std::time::{Duration, Instant};

use crate::prelude::*;

#[derive(Clone, Debug)]
/// Progress after one depth of iterative deepening.
pub struct Report<M>
{
    pub depth:   Depth,
    pub nodes:   u64,
    pub score:   i32,
    pub elapsed: Duration,
    pub pv:      Variation<M>,
}

/// Performs the main iterative deepening loop, returning the best move of the deepest (partial) depth.
///
/// Cancellation and the deadline are checked between root moves and between depths; a root move that
/// has started runs to completion unless the budget also asks for in-tree polling. `on_report` hears
/// about every depth that managed to score at least one root move.
pub fn run<G, E, F>(
    state: &mut G,
    table: &TranspositionTable<G::Move>,
    evaluator: &E,
    budget: &SearchBudget,
    cancel: CancelToken,
    mut on_report: F,
) -> Option<G::Move>
where
    G: Game,
    E: Evaluator<G>,
    F: FnMut(&Report<G::Move>),
{
    let start = Instant::now();
    let mut context = SearchContext::new(table, evaluator, budget, cancel);
    let root = state.zobrist();

    for depth in budget.max_depth.deepening()
    {
        // If we ran out of time, we should quit early.
        if context.should_stop()
        {
            break;
        }

        let hint = table.probe(root).and_then(|entry| entry.best_move);
        let moves = ordering::ordered_moves(state, hint.as_ref());
        let total = moves.len();

        let mut best: Option<(G::Move, i32)> = None;
        let mut searched = 0;

        for mv in moves
        {
            if context.should_stop()
            {
                break;
            }

            let score = -context.descend(state, &mv, depth - 1, -INF, INF);

            // An interrupted subtree has no trustworthy score.
            if context.run.aborted
            {
                break;
            }

            searched += 1;
            if best.as_ref().map_or(true, |(_, best_score)| score > *best_score)
            {
                best = Some((mv, score));
            }
        }

        let Some((mv, score)) = best
        else
        {
            break;
        };

        // Only a fully searched root is worth remembering as exact.
        if searched == total
        {
            let entry = TTEntry {
                depth,
                score,
                bound: TTBound::Exact,
                best_move: Some(mv.clone()),
            };
            table.store(root, entry);
        }

        let mut pv = Variation::default();
        state.play(&mv);
        let rest = table.principal_variation(state);
        state.undo();
        pv.load(mv.clone(), &rest);
        pv.score = score;

        context.run.best_move = Some(mv);

        on_report(&Report {
            depth,
            nodes: context.run.nodes,
            score,
            elapsed: start.elapsed(),
            pv,
        });
    }

    let elapsed = start.elapsed();
    log::debug!("took {: >3.1}s and visited {} nodes", elapsed.as_secs_f64(), context.run.nodes);
    context.run.best_move
}
