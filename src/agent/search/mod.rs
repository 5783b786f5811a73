use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::prelude::*;

mod controller;
mod negamax;

pub use controller::{run, Report};

#[derive(Clone, Debug, Default)]
/// A sticky stop flag shared between the session and one search run.
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken
{
    /// Asks the search to stop at its next check.
    pub fn cancel(&self)
    {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool
    {
        self.0.load(Ordering::SeqCst)
    }

    pub fn new() -> Self
    {
        CancelToken::default()
    }
}

#[derive(Clone, Debug)]
/// The bookkeeping owned by exactly one search run.
pub struct SearchRunState<M>
{
    pub nodes:     u64,
    pub cancel:    CancelToken,
    pub best_move: Option<M>,

    /// Set when an in-tree poll stopped the search partway through a subtree.
    pub aborted: bool,
}

impl<M> SearchRunState<M>
{
    pub fn new(cancel: CancelToken) -> Self
    {
        SearchRunState {
            nodes: 0,
            cancel,
            best_move: None,
            aborted: false,
        }
    }
}

/// Everything a search needs to reach, passed down explicitly instead of living in globals.
pub struct SearchContext<'a, G: Game, E: Evaluator<G>>
{
    pub table:     &'a TranspositionTable<G::Move>,
    pub evaluator: &'a E,
    pub budget:    &'a SearchBudget,
    pub run:       SearchRunState<G::Move>,

    /// Distance from the root of the current node.
    pub ply: usize,
}

impl<'a, G: Game, E: Evaluator<G>> SearchContext<'a, G, E>
{
    pub fn new(table: &'a TranspositionTable<G::Move>, evaluator: &'a E, budget: &'a SearchBudget, cancel: CancelToken) -> Self
    {
        SearchContext {
            table,
            evaluator,
            budget,
            run: SearchRunState::new(cancel),
            ply: 0,
        }
    }

    /// Whether the run has been cancelled or has used up its time.
    pub fn should_stop(&self) -> bool
    {
        self.run.cancel.is_cancelled() || self.budget.expired()
    }
}
