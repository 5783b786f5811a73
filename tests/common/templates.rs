use std::sync::{Arc, Mutex};

use chessmind::prelude::*;

#[derive(Clone, Debug)]
/// One node of a hand-built game tree.
pub struct Node
{
    pub children: Vec<usize>,
    /// The static score of this node for the side to move in it.
    pub value:    i32,
    pub capture:  bool,
}

#[derive(Clone, Debug)]
/// A game whose positions are the nodes of a fixed tree, and whose moves are child indices.
pub struct TreeGame
{
    pub nodes: Arc<Vec<Node>>,
    pub path:  Vec<usize>,
}

impl TreeGame
{
    /// Builds a tree from `(children, value)` pairs, rooted at node 0.
    pub fn new(nodes: &[(&[usize], i32)]) -> Self
    {
        let nodes = nodes
            .iter()
            .map(|(children, value)| Node {
                children: children.to_vec(),
                value:    *value,
                capture:  false,
            })
            .collect();

        TreeGame {
            nodes: Arc::new(nodes),
            path:  vec![0],
        }
    }

    /// Marks the given nodes as reached by captures.
    pub fn with_captures(mut self, captures: &[usize]) -> Self
    {
        let nodes = Arc::make_mut(&mut self.nodes);
        for index in captures
        {
            nodes[*index].capture = true;
        }
        self
    }

    pub fn current(&self) -> usize
    {
        *self.path.last().unwrap()
    }
}

impl Game for TreeGame
{
    type Move = usize;

    fn is_capture(&self, mv: &usize) -> bool
    {
        self.nodes[*mv].capture
    }

    fn is_terminal(&self) -> bool
    {
        self.nodes[self.current()].children.is_empty()
    }

    fn generate_moves(&self, moves: &mut Vec<usize>)
    {
        moves.extend(self.nodes[self.current()].children.iter().copied());
    }

    fn play(&mut self, mv: &usize)
    {
        self.path.push(*mv);
    }

    fn undo(&mut self)
    {
        if self.path.len() > 1
        {
            self.path.pop();
        }
    }

    fn zobrist(&self) -> u64
    {
        self.current() as u64
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Reads node values straight out of the tree.
pub struct TreeEval;

impl Evaluator<TreeGame> for TreeEval
{
    fn evaluate(&self, state: &TreeGame) -> i32
    {
        state.nodes[state.current()].value
    }
}

/// A two-ply tree whose minimax value is 1, reached through node 2.
///
///           0
///        /     \
///       1       2
///      / \     / \
///     3   4   5   6
///     3  -2   8   1
pub fn two_ply_tree() -> TreeGame
{
    TreeGame::new(&[(&[1, 2], 0), (&[3, 4], 0), (&[5, 6], 0), (&[], 3), (&[], -2), (&[], 8), (&[], 1)])
}

/// A server writing into a buffer, with a small table.
pub fn server() -> (Server, Arc<Mutex<Vec<u8>>>)
{
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let sink: Sink = buffer.clone();
    let options = UciOptions {
        table_memory: 1,
        ..UciOptions::default()
    };
    (Server::with_sink(options, sink), buffer)
}

/// Everything written to the buffer so far, one entry per line.
pub fn lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<String>
{
    let bytes = buffer.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap().lines().map(str::to_owned).collect()
}

/// The lines starting with `bestmove`.
pub fn best_moves(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<String>
{
    lines(buffer)
        .into_iter()
        .filter_map(|line| line.strip_prefix("bestmove ").map(str::to_owned))
        .collect()
}

/// Feeds a script of commands to a server.
pub fn feed(server: &mut Server, commands: &[&str])
{
    for command in commands
    {
        server.apply(command).unwrap();
    }
}
