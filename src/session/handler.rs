//! Session handler
//!
//! Runs one client connection: greets with the login page, then reads
//! command lines and writes replies until the client quits or disconnects.

use log::{error, info};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::net::TcpStream;

use crate::auth::CredentialCache;
use crate::error::AppError;
use crate::error::handlers::{error_to_reply_code, handle_error};
use crate::protocol::responses::format_response;
use crate::protocol::{
    Command, CommandStatus, Connection, greeting, handle_command, parse_command,
};

/// One attempt at reading a command line.
#[derive(Debug, PartialEq)]
enum LineRead {
    Line(String),
    TooLong,
    InvalidUtf8,
    Eof,
}

/// Reads one line of at most `max_len` bytes, excluding the line ending.
///
/// Never buffers more than `max_len + 2` bytes; the rest of an overlong
/// line is discarded up to its newline.
async fn read_command<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max_len: usize,
) -> io::Result<LineRead> {
    buf.clear();
    let limit = max_len as u64 + 2;
    let n = (&mut *reader).take(limit).read_until(b'\n', buf).await?;

    if n == 0 {
        return Ok(LineRead::Eof);
    }

    if buf.last() != Some(&b'\n') && n as u64 == limit {
        discard_line(reader).await?;
        return Ok(LineRead::TooLong);
    }

    while matches!(buf.last(), Some(&(b'\n' | b'\r'))) {
        buf.pop();
    }

    if buf.len() > max_len {
        return Ok(LineRead::TooLong);
    }

    match String::from_utf8(std::mem::take(buf)) {
        Ok(line) => Ok(LineRead::Line(line)),
        Err(_) => Ok(LineRead::InvalidUtf8),
    }
}

/// Skips input up to and including the next newline (or EOF).
async fn discard_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> io::Result<()> {
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(());
            }
            None => {
                let len = available.len();
                reader.consume(len);
            }
        }
    }
}

/// Serves a single session over `stream`.
///
/// The session's state lives on this task's stack and is dropped with it.
pub async fn handle_session(
    stream: TcpStream,
    client_addr: SocketAddr,
    credentials: Arc<CredentialCache>,
    max_command_length: usize,
) -> io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut buf = Vec::new();

    // The first session pays for the one file read, off the async workers.
    if !credentials.is_loaded() {
        let cache = Arc::clone(&credentials);
        tokio::task::spawn_blocking(move || {
            cache.get();
        })
        .await
        .map_err(io::Error::other)?;
    }
    let credentials = credentials.get();
    let mut conn = Connection::new();

    write_half.write_all(greeting(credentials).as_bytes()).await?;
    write_half.flush().await?;

    loop {
        let line = match read_command(&mut reader, &mut buf, max_command_length).await {
            Ok(LineRead::Line(line)) => line,
            Ok(LineRead::Eof) => {
                info!("Connection closed by client {}", client_addr);
                return Ok(());
            }
            Ok(LineRead::TooLong) => {
                reject_line(&mut write_half, "Command too long").await?;
                continue;
            }
            Ok(LineRead::InvalidUtf8) => {
                reject_line(&mut write_half, "Command is not valid UTF-8").await?;
                continue;
            }
            Err(e) => {
                error!("Failed to read from {}: {}", client_addr, e);
                return Err(e);
            }
        };

        let command = parse_command(&line);
        match &command {
            // Never log the password field.
            Command::Pass(_) => info!("Received from {}: Pass(..)", client_addr),
            other => info!("Received from {}: {:?}", client_addr, other),
        }

        let result = handle_command(&mut conn, &command, credentials);

        if let Some(msg) = &result.message {
            write_half.write_all(msg.as_bytes()).await?;
            write_half.flush().await?;
        }

        if result.status == CommandStatus::CloseConnection {
            info!("Client {} requested to quit", client_addr);
            return Ok(());
        }
    }
}

/// Replies to a line that could not be turned into a command; the session continues.
async fn reject_line<W: AsyncWrite + Unpin>(writer: &mut W, reason: &str) -> io::Result<()> {
    let err = AppError::ProtocolError(reason.to_string());
    handle_error(&err);
    writer
        .write_all(format_response(error_to_reply_code(&err), &err.notice()).as_bytes())
        .await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn read_all(input: &[u8], max_len: usize) -> Vec<LineRead> {
        let mut reader = BufReader::new(input);
        let mut buf = Vec::new();
        let mut reads = Vec::new();
        loop {
            let read = read_command(&mut reader, &mut buf, max_len).await.unwrap();
            if read == LineRead::Eof {
                return reads;
            }
            reads.push(read);
        }
    }

    #[tokio::test]
    async fn test_reads_lines_without_endings() {
        let reads = read_all(b"SHOW\r\nNAV home\nQUIT", 16).await;
        assert_eq!(
            reads,
            vec![
                LineRead::Line("SHOW".into()),
                LineRead::Line("NAV home".into()),
                LineRead::Line("QUIT".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_limit_excludes_line_ending() {
        let reads = read_all(b"12345678\r\n123456789\r\n", 8).await;
        assert_eq!(
            reads,
            vec![LineRead::Line("12345678".into()), LineRead::TooLong]
        );
    }

    #[tokio::test]
    async fn test_overlong_line_is_discarded_to_newline() {
        let mut input = vec![b'x'; 5000];
        input.extend_from_slice(b"\r\nSHOW\r\n");

        let reads = read_all(&input, 16).await;
        assert_eq!(reads, vec![LineRead::TooLong, LineRead::Line("SHOW".into())]);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_reported() {
        let reads = read_all(b"USER caf\xe9\r\nSHOW\r\n", 64).await;
        assert_eq!(reads, vec![LineRead::InvalidUtf8, LineRead::Line("SHOW".into())]);
    }
}
