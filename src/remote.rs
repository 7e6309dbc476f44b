//! Thin command layer over the transport
//!
//! Each helper is one complete command/response exchange. Transport failures
//! bubble up as connection-fatal errors; a nonzero remote status is rendered
//! through the protocol error taxonomy and leaves the connection usable.

use crate::net::Connection;
use crate::protocol::{self, command, STATUS_SUCCESS};
use anyhow::{bail, Result};

fn warn_lost(argument: &str, lost: usize) {
    if lost > 0 {
        eprintln!(
            "warning: {lost} character(s) of \"{argument}\" have no Latin-1 form and were dropped"
        );
    }
}

/// Changes the daemon's working directory.
pub fn change_dir(conn: &mut Connection, dir: &str) -> Result<()> {
    let lost = conn.send_command_with_text(command::CD, dir)?;
    warn_lost(dir, lost);

    let status = conn.recv_status()?;
    if status != STATUS_SUCCESS {
        bail!("cd {dir}: {}", protocol::error_string(status));
    }
    Ok(())
}

/// Reads back the daemon's current working directory.
pub fn current_dir(conn: &mut Connection) -> Result<String> {
    conn.send_command(command::CWD)?;
    let length = conn.recv_u32()?;
    Ok(conn.recv_text(length)?)
}
