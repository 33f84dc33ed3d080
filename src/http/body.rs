//! Raw request body reading.
//!
//! # Responsibilities
//! - Read a whole body (async `Body` or sync `Read`) into text
//! - Bound reads by a `BodyLimit` extension when one is installed
//!
//! # Design Decisions
//! - Text is decoded lossily; a leading UTF-8 BOM is dropped
//! - Reading consumes: a second `raw()` on the same request yields ""
//! - `raw_buffered()` puts the bytes back for later readers

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::Request;
use std::io::{self, Read};
use thiserror::Error;

/// Default raw body limit (2MB).
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Raw body size limit, shared with handlers as a request extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLimit(pub usize);

impl Default for BodyLimit {
    fn default() -> Self {
        Self(DEFAULT_BODY_LIMIT)
    }
}

/// Errors from reading a body.
#[derive(Debug, Error)]
pub enum BodyError {
    /// Stream failure or limit exceeded.
    #[error("failed to read request body: {0}")]
    Body(#[from] axum::Error),

    #[error("failed to read input stream: {0}")]
    Io(#[from] io::Error),
}

/// Decode raw bytes as text.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Read everything left in `reader` as text.
pub fn try_read_raw<R: Read>(mut reader: R) -> Result<String, BodyError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(decode_text(&buf))
}

/// Read everything left in `reader` as text, or "" on failure.
pub fn read_raw<R: Read>(reader: R) -> String {
    try_read_raw(reader).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Raw input read failed");
        String::new()
    })
}

/// Collect a body up to `limit` bytes.
pub async fn read_body(body: Body, limit: usize) -> Result<Bytes, BodyError> {
    Ok(axum::body::to_bytes(body, limit).await?)
}

/// Raw body access on requests.
///
/// Reads are unbounded unless the request carries a `BodyLimit` extension.
#[async_trait]
pub trait RawBodyExt: Send {
    /// Take the body and decode it.
    async fn try_raw(&mut self) -> Result<String, BodyError>;

    /// Take the body and decode it, or "" on failure.
    async fn raw(&mut self) -> String {
        self.try_raw().await.unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Raw body read failed");
            String::new()
        })
    }

    /// Decode the body and leave an identical one in place.
    ///
    /// Over the limit this yields "" but the body is still put back.
    async fn raw_buffered(&mut self) -> String;
}

fn body_limit<B>(request: &Request<B>) -> usize {
    request
        .extensions()
        .get::<BodyLimit>()
        .map(|limit| limit.0)
        .unwrap_or(usize::MAX)
}

#[async_trait]
impl RawBodyExt for Request<Body> {
    async fn try_raw(&mut self) -> Result<String, BodyError> {
        let limit = body_limit(self);
        let body = std::mem::take(self.body_mut());
        let bytes = read_body(body, limit).await?;
        Ok(decode_text(&bytes))
    }

    async fn raw_buffered(&mut self) -> String {
        let limit = body_limit(self);
        let body = std::mem::take(self.body_mut());
        let bytes = match read_body(body, usize::MAX).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(error = %e, "Raw body read failed");
                return String::new();
            }
        };
        *self.body_mut() = Body::from(bytes.clone());
        if bytes.len() > limit {
            tracing::debug!(len = bytes.len(), limit, "Raw body over limit");
            return String::new();
        }
        decode_text(&bytes)
    }
}
