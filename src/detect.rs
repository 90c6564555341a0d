//! PDF format detection and input payload decoding.
//!
//! Boundary checks that run before the core pipeline: empty buffers,
//! invalid base64, and non-PDF payloads are rejected here.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// An extraction input before decoding.
///
/// Both variants decode to the same byte buffer before reaching the core.
#[derive(Debug, Clone)]
pub enum Payload<'a> {
    /// Raw document bytes
    Raw(&'a [u8]),
    /// Base64-encoded document bytes
    Base64(&'a str),
}

/// Decode a payload into validated document bytes.
///
/// Rejects empty buffers ([`Error::EmptyInput`]), undecodable base64
/// ([`Error::InvalidBase64`]), and buffers without the PDF magic header
/// ([`Error::UnknownFormat`]).
pub fn decode_payload(payload: Payload<'_>) -> Result<Vec<u8>> {
    let bytes = match payload {
        Payload::Raw(bytes) => bytes.to_vec(),
        Payload::Base64(data) => BASE64
            .decode(data.trim())
            .map_err(|e| Error::InvalidBase64(e.to_string()))?,
    };

    if bytes.is_empty() {
        return Err(Error::EmptyInput);
    }
    if !is_pdf_bytes(&bytes) {
        return Err(Error::UnknownFormat);
    }
    Ok(bytes)
}

/// Check if bytes start with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Check if a file is a PDF by reading its header.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 5];
    match reader.read_exact(&mut header) {
        Ok(()) => is_pdf_bytes(&header),
        Err(_) => false,
    }
}
