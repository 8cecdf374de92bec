//! Protocol model shared between the session core and its transports.

pub mod protocol;

pub use protocol::{ClientCommand, GameId, ProtocolError, ServerEvent};
