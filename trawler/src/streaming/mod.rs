//! Newline-delimited JSON stream handling.
//!
//! Crawl-family operations can stream one JSON record per page as the
//! server discovers them. This module reassembles those records from the
//! raw byte stream, however the transport fragments it into chunks, and
//! feeds them to a per-record callback in arrival order.

use crate::errors::Error;
use futures::StreamExt;
use serde_json::Value;
use tracing::debug;

/// Incremental decoder for newline-delimited JSON.
///
/// Bytes are pushed in arbitrary chunks; every complete line is parsed as
/// one JSON value and returned in input order. Lines that fail to parse
/// are dropped so a single malformed record cannot abort an otherwise
/// healthy stream. Each decoder owns its buffer: concurrent streams never
/// share state.
#[derive(Debug, Default)]
pub struct JsonLineDecoder {
    buf: Vec<u8>,
}

impl JsonLineDecoder {
    /// Creates an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk of bytes, returning the records completed by it.
    ///
    /// A chunk may complete zero lines (it ended mid-record) or several;
    /// the split points carry no meaning.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Value> {
        self.buf.extend_from_slice(chunk);

        let mut records = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            if let Some(record) = parse_line(&line) {
                records.push(record);
            }
        }
        records
    }

    /// Flushes the trailing unterminated line, if any.
    ///
    /// Must be called once the underlying stream is exhausted: the final
    /// record is not required to carry a newline terminator.
    pub fn finish(&mut self) -> Option<Value> {
        let rest = std::mem::take(&mut self.buf);
        parse_line(&rest)
    }

    /// Whether the decoder holds no partial line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Parses one line, dropping anything that is not well-formed JSON.
fn parse_line(line: &[u8]) -> Option<Value> {
    let trimmed = trim_ascii(line);
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_slice(trimmed) {
        Ok(record) => Some(record),
        Err(err) => {
            debug!(error = %err, "dropping malformed stream record");
            None
        }
    }
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |p| p + 1);
    &bytes[start..end]
}

/// Reads an open response body to completion, invoking `on_record` for
/// each well-formed JSONL record.
///
/// Records are delivered in stream order, at most once each. The function
/// resolves when the stream is exhausted; it never accumulates the full
/// result set. A transport failure mid-stream fails the call, but records
/// already delivered to the callback stand.
pub async fn for_each_record<F>(
    response: reqwest::Response,
    action: &str,
    mut on_record: F,
) -> Result<(), Error>
where
    F: FnMut(Value) + Send,
{
    let mut decoder = JsonLineDecoder::new();
    let mut body = response.bytes_stream();

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| Error::transport(action.to_string(), e))?;
        for record in decoder.push(&chunk) {
            on_record(record);
        }
    }
    if let Some(record) = decoder.finish() {
        on_record(record);
    }
    Ok(())
}
