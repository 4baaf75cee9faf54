//! Reply formatting
//!
//! Replies are FTP-style: optional `NNN-` continuation lines, then a final `NNN text` line.

pub const OK: u16 = 200;
pub const READY: u16 = 220;
pub const GOODBYE: u16 = 221;
pub const LOGIN_SUCCESS: u16 = 230;
pub const LOGGED_OUT: u16 = 231;
pub const NAVIGATED: u16 = 250;
pub const SERVICE_UNAVAILABLE: u16 = 421;
pub const STORE_UNAVAILABLE: u16 = 451;
pub const UNKNOWN_COMMAND: u16 = 500;
pub const EMPTY_FIELD: u16 = 501;
pub const BAD_SEQUENCE: u16 = 503;
pub const PAGE_NOT_NAVIGABLE: u16 = 504;
pub const AUTH_FAILED: u16 = 530;

/// Format a single-line reply
pub fn format_response(code: u16, message: &str) -> String {
    format!("{} {}\r\n", code, message)
}

/// Format a multi-line reply: each of `lines` as a continuation, then the final line
pub fn format_multiline<S: AsRef<str>>(code: u16, lines: &[S], message: &str) -> String {
    let mut reply = String::new();
    for line in lines {
        reply.push_str(&format!("{}-{}\r\n", code, line.as_ref()));
    }
    reply.push_str(&format_response(code, message));
    reply
}

/// True if `line` ends a reply (`NNN ` rather than `NNN-`).
pub fn is_final_line(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 4 && bytes[..3].iter().all(u8::is_ascii_digit) && bytes[3] == b' '
}
