pub mod agent;
pub(crate) mod error;
pub mod chess;
pub mod options;
pub mod uci;

#[allow(unused)]
pub mod prelude
{
    pub use std::str::FromStr;

    pub use log::{self};

    pub use crate::{
        agent::*,
        chess::ChessBoard,
        error::{Error, Kind, Result},
        options::EngineOptions,
        uci::{Server, Sink, UciOptions},
    };
}
