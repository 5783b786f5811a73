use std::time::{Duration, Instant};

use crate::prelude::*;

/// Time reserved for the round trip to the GUI when we allocate from the clock.
const MOVE_OVERHEAD: Duration = Duration::from_millis(50);

/// How many moves we assume are left when the GUI does not say.
const DEFAULT_MOVES_TO_GO: u64 = 30;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Options with which the GUI can control a search, as given on `go`.
pub struct SearchArgs
{
    pub depth:     Option<Depth>,
    pub movetime:  Option<Duration>,
    pub wtime:     Option<Duration>,
    pub btime:     Option<Duration>,
    pub winc:      Option<Duration>,
    pub binc:      Option<Duration>,
    pub movestogo: Option<u64>,
    pub infinite:  bool,
}

impl SearchArgs
{
    /// Tries to parse the arguments of `go` into a set of search options.
    ///
    /// Unknown tokens are skipped, but a known key with a bad value spoils the whole command.
    pub fn parse(args: &[&str]) -> Result<SearchArgs>
    {
        let base = Error::for_parse::<Self>(args.join(" "));
        let mut parsed = SearchArgs::default();
        let mut tokens = args.iter();

        while let Some(token) = tokens.next()
        {
            match *token
            {
                | "infinite" => parsed.infinite = true,
                | "depth" =>
                {
                    let plies = Self::value::<u8>(tokens.next()).map_err(|e| e.chain(base.clone()))?;
                    let depth = Depth::from(plies);
                    if depth < Depth::PLY || !depth.valid()
                    {
                        let err = Error::new(Kind::ParseError, format!("Depth must be between 1 and {}.", MAXIMUM_PLY));
                        return Err(err.chain(base));
                    }
                    parsed.depth = Some(depth);
                }
                | "movetime" => parsed.movetime = Some(Self::millis(tokens.next()).map_err(|e| e.chain(base.clone()))?),
                | "wtime" => parsed.wtime = Some(Self::millis(tokens.next()).map_err(|e| e.chain(base.clone()))?),
                | "btime" => parsed.btime = Some(Self::millis(tokens.next()).map_err(|e| e.chain(base.clone()))?),
                | "winc" => parsed.winc = Some(Self::millis(tokens.next()).map_err(|e| e.chain(base.clone()))?),
                | "binc" => parsed.binc = Some(Self::millis(tokens.next()).map_err(|e| e.chain(base.clone()))?),
                | "movestogo" =>
                {
                    let n = Self::value::<u64>(tokens.next()).map_err(|e| e.chain(base.clone()))?;
                    parsed.movestogo = Some(n.max(1));
                }
                | "nodes" | "mate" =>
                {
                    // Accepted but not acted on.
                    Self::value::<u64>(tokens.next()).map_err(|e| e.chain(base.clone()))?;
                }
                | other => log::debug!("skipping unsupported go argument '{}'", other),
            }
        }

        Ok(parsed)
    }

    /// Whether any form of clock was given.
    pub fn timed(&self) -> bool
    {
        self.movetime.is_some() || self.wtime.is_some() || self.btime.is_some()
    }

    /// Resolves these options into a concrete budget for a search starting now.
    pub fn budget(&self, white_to_move: bool, default_depth: Depth, poll_interval: u64) -> SearchBudget
    {
        let max_depth = match self.depth
        {
            | Some(depth) => depth,
            | None if self.infinite || self.timed() => Depth::MAX,
            | None => default_depth,
        };

        SearchBudget {
            max_depth,
            deadline: self.allotment(white_to_move).and_then(|time| Instant::now().checked_add(time)),
            poll_interval,
        }
    }

    /// Decides how long to think for, if at all limited.
    fn allotment(&self, white_to_move: bool) -> Option<Duration>
    {
        if self.infinite
        {
            return None;
        }

        if let Some(movetime) = self.movetime
        {
            return Some(movetime);
        }

        let (remaining, increment) = match white_to_move
        {
            | true => (self.wtime?, self.winc.unwrap_or_default()),
            | false => (self.btime?, self.binc.unwrap_or_default()),
        };

        let moves = self.movestogo.unwrap_or(DEFAULT_MOVES_TO_GO).max(1);
        let share = remaining / u32::try_from(moves).unwrap_or(u32::MAX) + increment / 2;
        let ceiling = remaining.saturating_sub(MOVE_OVERHEAD).max(Duration::from_millis(1));
        Some(share.min(ceiling))
    }

    fn millis(token: Option<&&str>) -> Result<Duration>
    {
        let ms = Self::value::<i64>(token)?;
        match u64::try_from(ms)
        {
            | Ok(ms) => Ok(Duration::from_millis(ms)),
            | Err(_) => Err(Error::new(Kind::InvalidTime, format!("{}ms is not a duration.", ms))),
        }
    }

    fn value<T: FromStr>(token: Option<&&str>) -> Result<T>
    {
        let Some(token) = token
        else
        {
            return Err(Error::new(Kind::ParseError, "Expected a value.".into()));
        };

        token.parse::<T>().map_err(|_| Error::for_parse::<T>((*token).to_owned()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The limits of one search run. Fixed once the run starts.
pub struct SearchBudget
{
    pub max_depth:     Depth,
    pub deadline:      Option<Instant>,

    /// Nodes between in-tree stop checks; zero keeps checks at root-move boundaries only.
    pub poll_interval: u64,
}

impl SearchBudget
{
    /// A budget limited only by depth.
    pub fn depth(max_depth: Depth) -> Self
    {
        SearchBudget {
            max_depth,
            deadline: None,
            poll_interval: 0,
        }
    }

    /// Whether the deadline, if any, has passed.
    pub fn expired(&self) -> bool
    {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}
