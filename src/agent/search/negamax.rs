use crate::prelude::*;

impl<'a, G: Game, E: Evaluator<G>> SearchContext<'a, G, E>
{
    /// Searches a position to a fixed depth with alpha-beta pruning.
    ///
    /// The result is from the perspective of the side to move in `state`. Every completed call
    /// leaves its result in the transposition table.
    pub fn search(&mut self, state: &mut G, depth: Depth, alpha: i32, beta: i32) -> i32
    {
        self.run.nodes += 1;

        if self.poll()
        {
            return 0;
        }

        // Try the transposition table, and check for a cutoff.
        let key = state.zobrist();
        let hit = self.table.probe(key);
        if let Some(entry) = &hit
        {
            // Only consider entries at least as deep; otherwise, we'd rather recompute this position.
            if entry.depth >= depth
            {
                let score = scores::normalize(entry.score, self.ply);
                match entry.bound
                {
                    | TTBound::Exact => return score,
                    | TTBound::Lower if score >= beta => return beta,
                    | TTBound::Upper if score <= alpha => return alpha,
                    | _ =>
                    {}
                }
            }
        }

        if depth <= Depth::NIL || state.is_terminal()
        {
            return self.evaluate(state);
        }

        let hint = hit.and_then(|entry| entry.best_move);
        let moves = ordering::ordered_moves(state, hint.as_ref());

        // Terminal detection should have caught this already.
        if moves.is_empty()
        {
            return self.evaluate(state);
        }

        let original_alpha = alpha;
        let mut alpha = alpha;
        let (mut best_score, mut best_move) = (-INF, None);

        for mv in moves
        {
            let score = -self.descend(state, &mv, depth - 1, -beta, -alpha);

            if self.run.aborted
            {
                return 0;
            }

            if score > best_score
            {
                best_score = score;
                best_move = Some(mv);
            }

            alpha = alpha.max(score);
            if alpha >= beta
            {
                break;
            }
        }

        let entry = TTEntry {
            depth,
            score: scores::reconstruct(best_score, self.ply),
            bound: TTBound::classify(best_score, original_alpha, beta),
            best_move,
        };
        self.table.store(key, entry);

        best_score
    }

    /// Plays a move, searches the child with the given window, and takes the move back.
    ///
    /// The score is the child's, from the perspective of the side to move in the child.
    pub fn descend(&mut self, state: &mut G, mv: &G::Move, depth: Depth, alpha: i32, beta: i32) -> i32
    {
        state.play(mv);
        self.ply += 1;

        let score = self.search(state, depth, alpha, beta);

        self.ply -= 1;
        state.undo();
        score
    }

    /// Scores a leaf, embedding the distance to any mate it represents.
    fn evaluate(&self, state: &G) -> i32
    {
        scores::normalize(self.evaluator.evaluate(state), self.ply)
    }

    /// Checks for a stop every so many nodes, if the budget asks for in-tree checks at all.
    fn poll(&mut self) -> bool
    {
        let interval = self.budget.poll_interval;
        if !self.run.aborted && interval > 0 && self.run.nodes % interval == 0 && self.should_stop()
        {
            log::trace!("search interrupted after {} nodes", self.run.nodes);
            self.run.aborted = true;
        }
        self.run.aborted
    }
}
