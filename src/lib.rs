//! skiff - client transport for the skiffd remote file-transfer protocol
//!
//! A single blocking TCP connection carries sequential command/response
//! exchanges: 4-byte network-order command and status codes, plus
//! length-prefixed Latin-1 text for the daemon's legacy 8-bit world.

pub mod charset;
pub mod interrupt;
pub mod net;
pub mod protocol;
pub mod remote;
