use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::prelude::*;

lazy_static! {
    /// `setoption name <N> value <V>`, where both the name and the value may contain spaces.
    static ref SETOPTION: Regex = Regex::new(r"^name\s+(?<name>.+?)\s+value\s+(?<value>.+)$").unwrap();
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// The options a GUI has set on this engine, keyed by name.
///
/// Names are case-insensitive as per UCI; values are kept verbatim.
pub struct EngineOptions
{
    values: HashMap<String, String>,
}

impl EngineOptions
{
    /// The depth used when `go` carries neither a depth nor a clock.
    pub const DEFAULT_DEPTH: &'static str = "DefaultDepth";

    /// The node interval at which a search polls for cancellation inside its tree.
    pub const NODE_POLL: &'static str = "NodePoll";

    /// The option lines advertised during the handshake.
    pub fn advertise(default_depth: Depth) -> Vec<String>
    {
        vec![
            format!("option name {} type spin default {} min 1 max {}", Self::DEFAULT_DEPTH, default_depth, scalars::MAXIMUM_PLY),
            format!("option name {} type spin default 0 min 0 max 1000000", Self::NODE_POLL),
        ]
    }

    /// Reads the default search depth, falling back to the given value if unset or garbled.
    pub fn default_depth(&self, fallback: Depth) -> Depth
    {
        self.parsed::<u8>(Self::DEFAULT_DEPTH)
            .map(Depth::from)
            .filter(|d| *d >= Depth::PLY && d.valid())
            .unwrap_or(fallback)
    }

    /// Gets the raw value of an option.
    pub fn get(&self, name: &str) -> Option<&str>
    {
        self.values.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool
    {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize
    {
        self.values.len()
    }

    /// Reads the in-tree polling interval in nodes; zero disables it.
    pub fn node_poll(&self) -> u64
    {
        self.parsed::<u64>(Self::NODE_POLL).unwrap_or(0)
    }

    /// Parses an option into a particular type.
    pub fn parsed<T: FromStr>(&self, name: &str) -> Option<T>
    {
        self.get(name).and_then(|v| v.trim().parse::<T>().ok())
    }

    /// Stores an option.
    pub fn set(&mut self, name: &str, value: &str)
    {
        self.values.insert(name.to_ascii_lowercase(), value.to_owned());
    }

    /// Applies the arguments of a `setoption` command.
    pub fn set_from_args(&mut self, args: &[&str]) -> Result<()>
    {
        let joined = args.join(" ");
        let Some(caps) = SETOPTION.captures(&joined)
        else
        {
            return Err(Error::new(Kind::InvalidOption, format!("'setoption {}' needs a name and a value.", joined)));
        };

        let (name, value) = (&caps["name"], &caps["value"]);
        log::debug!("option {} = {}", name, value);
        self.set(name, value);
        Ok(())
    }
}
