use std::{
    io::{BufRead, Write},
    sync::{Arc, Mutex},
    thread::JoinHandle,
};

use clap::Parser;
use itertools::Itertools;
use shakmaty::Move;

use crate::prelude::*;

#[derive(Clone, Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct UciOptions
{
    #[arg(short, long, default_value = "info")]
    /// lowest log level to show
    pub log_level: String,

    #[arg(long, default_value_t = 64)]
    /// maximum memory in MB for transpositions (0 for unbounded)
    pub table_memory: usize,

    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1 ..= 64))]
    /// search depth when go carries neither a depth nor a clock
    pub default_depth: u8,
}

impl Default for UciOptions
{
    fn default() -> Self
    {
        UciOptions::parse_from([env!("CARGO_PKG_NAME")])
    }
}

/// Where protocol output goes. Shared with the search thread, one whole line at a time.
pub type Sink = Arc<Mutex<dyn Write + Send>>;

/// Writes one protocol line and flushes it.
fn emit(sink: &Sink, line: &str) -> Result<()>
{
    let mut out = sink.lock().map_err(|_| Error::new(Kind::InternalError, "output sink poisoned".into()))?;
    writeln!(out, "{}", line)?;
    out.flush()?;
    Ok(())
}

/// The search running in the background, if any.
struct SearchTask
{
    cancel: CancelToken,
    handle: JoinHandle<Result<()>>,
}

/// A UCI session: one position, one table, and at most one search at a time.
pub struct Server<E = evaluators::Material>
{
    options:        UciOptions,
    engine_options: EngineOptions,
    board:          ChessBoard,
    table:          Arc<TranspositionTable<Move>>,
    evaluator:      Arc<E>,
    out:            Sink,
    task:           Option<SearchTask>,
    running:        bool,
}

impl<E> Server<E>
where
    E: Evaluator<ChessBoard> + Default + 'static,
{
    /// Creates a new server speaking on stdout.
    pub fn new(options: UciOptions) -> Self
    {
        Server::with_sink(options, Arc::new(Mutex::new(std::io::stdout())))
    }

    /// Creates a new server speaking into the given sink.
    pub fn with_sink(options: UciOptions, out: Sink) -> Self
    {
        let bytes = options.table_memory * 1024 * 1024;

        Server {
            options,
            engine_options: EngineOptions::default(),
            board: ChessBoard::default(),
            table: Arc::new(TranspositionTable::new(bytes)),
            evaluator: Arc::new(E::default()),
            out,
            task: None,
            running: true,
        }
    }

    /// Runs the command loop on stdin until `quit` or the end of input.
    pub fn run(&mut self) -> Result<()>
    {
        self.serve(std::io::stdin().lock())
    }

    /// Runs the command loop on any line source. Bytes that are not UTF-8 are replaced, not fatal.
    pub fn serve<R: BufRead>(&mut self, mut input: R) -> Result<()>
    {
        let mut bytes = Vec::new();

        while self.running
        {
            bytes.clear();
            if input.read_until(b'\n', &mut bytes)? == 0
            {
                log::debug!("end of input");
                self.apply("quit")?;
                break;
            }

            let cmdstr = String::from_utf8_lossy(&bytes);
            self.apply(&cmdstr)?;
        }

        Ok(())
    }

    /// Handles one line of input. Only errors that leave the session unusable come back out.
    pub fn apply(&mut self, line: &str) -> Result<()>
    {
        let args: Vec<&str> = line.split_whitespace().collect();
        let cmd = *args.first().unwrap_or(&"");
        let args = args.get(1 ..).unwrap_or_default();

        let result = match cmd
        {
            | "" => Ok(()),
            | "d" => self.display(),
            | "go" => self.go(args),
            | "isready" => self.say("readyok"),
            | "position" => self.position(args),
            | "quit" => self.quit(),
            | "setoption" => self.engine_options.set_from_args(args),
            | "stop" => self.stop(),
            | "uci" => self.handshake(),
            | "ucinewgame" => self.new_game(),
            | _ => Err(Error::new(Kind::UnrecognizedCommand, cmd.into())),
        };

        match result
        {
            | Ok(_) =>
            {
                log::debug!("Command completed successfully: {cmd} {}", args.join(" "));
                Ok(())
            }
            | Err(err) => match err.fatal()
            {
                | true => Err(err),
                | false =>
                {
                    // UCI has no error channel, so a bad command is simply dropped.
                    log::warn!("ignoring command '{}':\n{err}", line.trim());
                    Ok(())
                }
            },
        }
    }

    /// The current position.
    pub fn board(&self) -> &ChessBoard
    {
        &self.board
    }

    /// The options set so far.
    pub fn engine_options(&self) -> &EngineOptions
    {
        &self.engine_options
    }

    /// Whether `quit` has been seen.
    pub fn is_running(&self) -> bool
    {
        self.running
    }

    /// Whether a search task exists that has not been joined yet.
    pub fn is_searching(&self) -> bool
    {
        self.task.is_some()
    }

    /// The shared transposition table.
    pub fn table(&self) -> &TranspositionTable<Move>
    {
        &self.table
    }

    /// Waits for the current search, if any, to finish on its own.
    pub fn wait(&mut self) -> Result<()>
    {
        self.join(false)
    }
}

impl<E> Server<E>
where
    E: Evaluator<ChessBoard> + Default + 'static,
{
    /// Prints the current position, for humans.
    fn display(&self) -> Result<()>
    {
        self.say(&format!("Fen: {}", self.board.fen()))?;
        self.say(&format!("Key: {:016X}", self.board.zobrist()))?;
        self.say(&format!("Eval: {}", self.evaluator.evaluate(&self.board)))
    }

    /// Starts searching the current position, after retiring any search already running.
    fn go(&mut self, args: &[&str]) -> Result<()>
    {
        let search_args = SearchArgs::parse(args)?;
        self.join(true)?;

        let fallback = self.fallback_depth();
        let budget = search_args.budget(
            self.board.white_to_move(),
            self.engine_options.default_depth(fallback),
            self.engine_options.node_poll(),
        );
        log::debug!("searching to depth {} with {:?}", budget.max_depth, budget.deadline.map(|d| d.saturating_duration_since(std::time::Instant::now())));

        let mut board = self.board.clone();
        let table = Arc::clone(&self.table);
        let evaluator = Arc::clone(&self.evaluator);
        let out = Arc::clone(&self.out);
        let cancel = CancelToken::new();
        let token = cancel.clone();

        let handle = std::thread::Builder::new().name("search".into()).spawn(move || {
            let best = search::run(&mut board, &table, &*evaluator, &budget, token, |report| {
                if let Err(err) = emit(&out, &Self::info(report))
                {
                    log::error!("could not report progress: {err}");
                }
            });

            let mv = best.map(|mv| ChessBoard::uci(&mv)).unwrap_or_else(|| "0000".into());
            log::debug!("found {: ^8}", mv);
            emit(&out, &format!("bestmove {}", mv))
        })?;

        self.task = Some(SearchTask { cancel, handle });
        Ok(())
    }

    /// Answers the `uci` handshake.
    fn handshake(&self) -> Result<()>
    {
        self.say(&format!("id name {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")))?;
        self.say(&format!("id author {}", env!("CARGO_PKG_AUTHORS")))?;
        for line in EngineOptions::advertise(self.fallback_depth())
        {
            self.say(&line)?;
        }
        self.say("uciok")
    }

    /// The configured default depth, kept within the plies a search can handle.
    fn fallback_depth(&self) -> Depth
    {
        let plies = i32::from(self.options.default_depth);
        Depth::new(plies.clamp(Depth::PLY.plies(), Depth::MAX.plies()))
    }

    /// Formats a progress report as an `info` line.
    fn info(report: &Report<Move>) -> String
    {
        let mut line = format!(
            "info depth {} nodes {} score cp {} time {}",
            report.depth,
            report.nodes,
            report.score,
            report.elapsed.as_millis()
        );

        if !report.pv.moves.is_empty()
        {
            line.push_str(" pv ");
            line.push_str(&report.pv.moves.iter().map(ChessBoard::uci).join(" "));
        }
        line
    }

    /// Retires the running search, cancelling it first if asked. Its `bestmove` is out once this returns.
    fn join(&mut self, cancel: bool) -> Result<()>
    {
        let Some(task) = self.task.take()
        else
        {
            return Ok(());
        };

        if cancel
        {
            task.cancel.cancel();
        }

        match task.handle.join()
        {
            | Ok(result) => result,
            | Err(_) => Err(Error::new(Kind::InternalError, "the search thread panicked".into())),
        }
    }

    /// Starts a new game from the standard position, forgetting everything learned so far.
    fn new_game(&mut self) -> Result<()>
    {
        self.join(true)?;
        self.table.clear();
        self.board = ChessBoard::default();
        Ok(())
    }

    /// Sets up a position, from the start or from FEN, and replays any moves after it.
    ///
    /// A bad FEN leaves the position alone. A bad move stops the replay where it is.
    fn position(&mut self, args: &[&str]) -> Result<()>
    {
        let split = args.iter().position(|arg| *arg == "moves").unwrap_or(args.len());
        let (setup, moves) = (&args[.. split], args.get(split + 1 ..).unwrap_or_default());

        let mut board = match setup
        {
            | ["startpos"] => ChessBoard::default(),
            | ["fen", fen @ ..] if !fen.is_empty() => fen.join(" ").parse::<ChessBoard>()?,
            | _ => return Err(Error::for_parse::<ChessBoard>(setup.join(" "))),
        };

        for mv in moves
        {
            if let Err(err) = board.play_uci(mv)
            {
                log::warn!("stopped replaying moves at '{}':\n{err}", mv);
                break;
            }
        }

        self.board = board;
        Ok(())
    }

    /// Stops everything and leaves the command loop.
    fn quit(&mut self) -> Result<()>
    {
        self.join(true)?;
        self.running = false;
        Ok(())
    }

    /// Prints a line to the protocol stream.
    fn say(&self, line: &str) -> Result<()>
    {
        emit(&self.out, line)
    }

    /// Cancels the running search; it answers with its best move so far.
    fn stop(&mut self) -> Result<()>
    {
        self.join(true)
    }
}

impl<E> Drop for Server<E>
{
    fn drop(&mut self)
    {
        if let Some(task) = self.task.take()
        {
            task.cancel.cancel();
            let _ = task.handle.join();
        }
    }
}
