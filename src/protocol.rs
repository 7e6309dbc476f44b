//! Shared protocol constants for the skiffd wire protocol

use std::time::Duration;

/// Default skiffd listen port, overridable with a `host:port` target.
pub const DEFAULT_PORT: u16 = 6969;

/// Bound on the connect readiness wait. Data transfer itself is blocking
/// and carries no per-call timeout; the daemon is expected to either answer
/// or close the connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

// Command codes (keep numeric stable for compat with deployed skiffd)
pub mod command {
    pub const SEND: u32 = 1;
    pub const DIR: u32 = 2;
    pub const CD: u32 = 3;
    pub const CWD: u32 = 4;
    pub const SUCK: u32 = 5;
    pub const RUN: u32 = 6;
}

/// Status 0 in a reply frame means success; anything else indexes the
/// error taxonomy below.
pub const STATUS_SUCCESS: u32 = 0;

// Remote status codes. The daemon reports failures as one of these in its
// 4-byte status reply.
pub mod status {
    pub const FATAL_ERROR: u32 = 1;
    pub const RECV_FAILED: u32 = 2;
    pub const SEND_FAILED: u32 = 3;
    pub const CREATE_OS_RESOURCE_FAILED: u32 = 4;
    pub const CREATE_FILE_FAILED: u32 = 5;
    pub const FILE_WRITE_FAILED: u32 = 6;
    pub const FILE_READ_FAILED: u32 = 7;
    pub const SET_DATESTAMP_FAILED: u32 = 8;
    pub const SET_PROTECTION_FAILED: u32 = 9;
    pub const CD_FAILED: u32 = 10;
    pub const EXEC_FAILED: u32 = 11;
    pub const FILE_IS_DIRECTORY: u32 = 12;
}

const ERROR_STRINGS: [&str; 13] = [
    "unknown error",
    "fatal error",
    "recv failed",
    "send failed",
    "failed to create os resource",
    "create file failed",
    "file write failed",
    "file read failed",
    "set datestamp failed",
    "set protection failed",
    "cd failed",
    "exec failed",
    "directory where a file was required",
];

/// Renders a remote status code as its canonical message. Total over the
/// whole code space: out-of-range codes fall back to the code-0 string.
pub fn error_string(code: u32) -> &'static str {
    ERROR_STRINGS
        .get(code as usize)
        .copied()
        .unwrap_or(ERROR_STRINGS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_string_known_codes() {
        assert_eq!(error_string(status::RECV_FAILED), "recv failed");
        assert_eq!(error_string(status::CD_FAILED), "cd failed");
        assert_eq!(
            error_string(status::FILE_IS_DIRECTORY),
            "directory where a file was required"
        );
    }

    #[test]
    fn error_string_is_total() {
        assert_eq!(error_string(0), "unknown error");
        assert_eq!(error_string(13), error_string(0));
        assert_eq!(error_string(u32::MAX), error_string(0));
    }
}
