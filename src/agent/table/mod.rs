use std::sync::Arc;

use dashmap::DashMap;

use crate::prelude::*;

mod entry;

pub use entry::{TTBound, TTEntry};
use entry::TTSlot;

#[derive(Debug)]
/// A transposition table from position keys to the last search result for that position.
///
/// Stores always replace whatever occupied the slot. Access is serialized by the session, which
/// never lets two searches run at once; the concurrent map is only there so the table can be
/// shared with the search thread.
pub struct TranspositionTable<M>
{
    map: Arc<DashMap<u64, TTSlot<M>>>,
    cap: usize,
}

impl<M: Clone + Eq> TranspositionTable<M>
{
    /// Creates a new transposition table with the given memory constraints. Zero bytes means unbounded.
    pub fn new(bytes: usize) -> TranspositionTable<M>
    {
        let cap = bytes / std::mem::size_of::<TTSlot<M>>();
        log::trace!("Allocated a TranspositionTable with {} entries. ({} bytes)", cap, bytes);

        TranspositionTable {
            map: Arc::new(DashMap::with_capacity(cap)),
            cap,
        }
    }

    /// Creates a table with no bound on its size.
    pub fn unbounded() -> TranspositionTable<M>
    {
        TranspositionTable::new(0)
    }

    /// The number of slots, or zero if unbounded.
    pub fn capacity(&self) -> usize
    {
        self.cap
    }

    /// Forgets every entry.
    pub fn clear(&self)
    {
        self.map.clear();
    }

    pub fn is_empty(&self) -> bool
    {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize
    {
        self.map.len()
    }

    /// Finds the entry stored for this key, if one exists.
    pub fn probe(&self, key: u64) -> Option<TTEntry<M>>
    {
        let slot = self.map.get(&self.slot(key))?;
        (slot.key == key).then(|| slot.entry.clone())
    }

    /// Stores a search result, replacing whatever was in its slot.
    pub fn store(&self, key: u64, entry: TTEntry<M>)
    {
        self.map.insert(self.slot(key), TTSlot { key, entry });
    }

    /// Follows stored best moves from the given position.
    ///
    /// Stops on a missing entry, a stored move that is not legal here, or a repeated position.
    pub fn principal_variation<G>(&self, state: &G) -> Variation<M>
    where
        G: Game<Move = M>,
    {
        let mut variation = Variation::default();
        let mut state = state.clone();
        let mut history = vec![state.zobrist()];
        let mut moves = Vec::new();

        while !variation.moves.is_full()
        {
            let key = state.zobrist();
            let Some(hit) = self.probe(key)
            else
            {
                break;
            };

            if variation.moves.is_empty()
            {
                variation.score = hit.score;
            }

            let Some(mv) = hit.best_move
            else
            {
                break;
            };

            moves.clear();
            state.generate_moves(&mut moves);
            if !moves.contains(&mv)
            {
                break;
            }

            state.play(&mv);
            variation.moves.push(mv);

            let next = state.zobrist();
            if history.contains(&next)
            {
                break;
            }
            history.push(next);
        }

        variation
    }
}

/// Private mapping implementation for the table.
impl<M> TranspositionTable<M>
{
    /// Maps a key into the table's slots, avoiding reallocation when bounded.
    fn slot(&self, key: u64) -> u64
    {
        match self.cap
        {
            | 0 => key,
            | cap => key % (cap as u64),
        }
    }
}
