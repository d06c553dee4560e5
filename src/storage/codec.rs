// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snapshot file codec.
//!
//! Only stored documents are persisted. Postings are derived data and are
//! rebuilt by the analyzer on load, which keeps the file small and means a
//! changed analyzer configuration can never read stale postings.
//!
//! # Layout
//!
//! ```text
//! ┌──────────────────────────── header (16 bytes) ────────────────────────────┐
//! │ magic "FOLI" │ version u8 │ flags u8 │ doc_count u32 │ payload_len u32 │ 2 │
//! ├────────────────────────────────────────────────────────────────────────────┤
//! │ payload: brotli(JSON array of SearchDocument)                              │
//! ├──────────────────────────── footer (8 bytes) ─────────────────────────────┤
//! │ crc32 u32 (header + payload) │ magic "ILOF"                               │
//! └────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers are little-endian.

use crate::error::{Error, Result};
use crate::types::SearchDocument;
use crc32fast::Hasher as Crc32Hasher;
use std::io::{Read, Write};
use std::sync::Arc;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "FOLI" in ASCII (header)
pub const MAGIC: [u8; 4] = *b"FOLI";

/// Footer magic: "ILOF" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = *b"ILOF";

pub const VERSION: u8 = 1;

pub const HEADER_SIZE: usize = 16;
pub const FOOTER_SIZE: usize = 8;

/// Maximum payload size: 1 GiB (prevents huge allocations from corrupt headers)
pub const MAX_PAYLOAD_SIZE: usize = 1024 * 1024 * 1024;

/// Maximum decompressed JSON size: 1 GiB (caps brotli expansion of a small payload)
pub const MAX_DECOMPRESSED_SIZE: usize = 1024 * 1024 * 1024;

/// Brotli quality. 11 is slow; snapshots are rewritten on every commit.
const BROTLI_QUALITY: u32 = 5;
const BROTLI_WINDOW: u32 = 22;
const BROTLI_BUFFER: usize = 4096;

// ============================================================================
// HEADER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub version: u8,
    pub flags: u8,
    pub doc_count: u32,
    pub payload_len: u32,
}

impl SnapshotHeader {
    fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(&MAGIC);
        buf[4] = self.version;
        buf[5] = self.flags;
        buf[6..10].copy_from_slice(&self.doc_count.to_le_bytes());
        buf[10..14].copy_from_slice(&self.payload_len.to_le_bytes());
        // buf[14..16] is reserved
        buf
    }

    fn from_bytes(buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_SIZE {
            return Err(Error::Corrupt(format!(
                "snapshot is {} bytes, shorter than the {} byte header",
                buf.len(),
                HEADER_SIZE
            )));
        }
        if buf[0..4] != MAGIC {
            return Err(Error::Corrupt(format!(
                "invalid magic: expected FOLI, got {:?}",
                &buf[0..4]
            )));
        }
        let header = SnapshotHeader {
            version: buf[4],
            flags: buf[5],
            doc_count: u32::from_le_bytes([buf[6], buf[7], buf[8], buf[9]]),
            payload_len: u32::from_le_bytes([buf[10], buf[11], buf[12], buf[13]]),
        };
        if header.version != VERSION {
            return Err(Error::Corrupt(format!(
                "unsupported snapshot version {} (expected {})",
                header.version, VERSION
            )));
        }
        Ok(header)
    }
}

fn checksum(parts: &[&[u8]]) -> u32 {
    let mut hasher = Crc32Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize()
}

// ============================================================================
// ENCODE / DECODE
// ============================================================================

/// Serialize documents into a complete snapshot file image.
pub fn encode_snapshot(documents: &[Arc<SearchDocument>]) -> Result<Vec<u8>> {
    let borrowed: Vec<&SearchDocument> = documents.iter().map(Arc::as_ref).collect();
    let json = serde_json::to_vec(&borrowed)?;
    frame(&compress(&json)?, documents.len() as u32)
}

fn compress(json: &[u8]) -> Result<Vec<u8>> {
    let mut payload = Vec::with_capacity(json.len() / 4);
    {
        let mut encoder = brotli::CompressorWriter::new(
            &mut payload,
            BROTLI_BUFFER,
            BROTLI_QUALITY,
            BROTLI_WINDOW,
        );
        encoder.write_all(json)?;
        encoder.flush()?;
    }
    Ok(payload)
}

/// Wrap a compressed payload in header and footer.
fn frame(payload: &[u8], doc_count: u32) -> Result<Vec<u8>> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(Error::Corrupt(format!(
            "snapshot payload of {} bytes exceeds the {} byte limit",
            payload.len(),
            MAX_PAYLOAD_SIZE
        )));
    }

    let header = SnapshotHeader {
        version: VERSION,
        flags: 0,
        doc_count,
        payload_len: payload.len() as u32,
    }
    .to_bytes();
    let crc = checksum(&[&header, payload]);

    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len() + FOOTER_SIZE);
    out.extend_from_slice(&header);
    out.extend_from_slice(payload);
    out.extend_from_slice(&crc.to_le_bytes());
    out.extend_from_slice(&FOOTER_MAGIC);
    Ok(out)
}

/// Validate and deserialize a snapshot file image.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Vec<SearchDocument>> {
    decode_snapshot_with_limit(bytes, MAX_DECOMPRESSED_SIZE)
}

/// [`decode_snapshot`] with an explicit cap on the decompressed payload.
pub fn decode_snapshot_with_limit(bytes: &[u8], max_decompressed: usize) -> Result<Vec<SearchDocument>> {
    let header = SnapshotHeader::from_bytes(bytes)?;
    let payload_len = header.payload_len as usize;
    if payload_len > MAX_PAYLOAD_SIZE {
        return Err(Error::Corrupt(format!(
            "payload length {} exceeds limit",
            payload_len
        )));
    }

    let expected_len = HEADER_SIZE + payload_len + FOOTER_SIZE;
    if bytes.len() != expected_len {
        return Err(Error::Corrupt(format!(
            "snapshot is {} bytes, header describes {}",
            bytes.len(),
            expected_len
        )));
    }

    let payload = &bytes[HEADER_SIZE..HEADER_SIZE + payload_len];
    let footer = &bytes[HEADER_SIZE + payload_len..];
    if footer[4..8] != FOOTER_MAGIC {
        return Err(Error::Corrupt("invalid footer magic".into()));
    }
    let stored_crc = u32::from_le_bytes([footer[0], footer[1], footer[2], footer[3]]);
    let actual_crc = checksum(&[&bytes[..HEADER_SIZE], payload]);
    if stored_crc != actual_crc {
        return Err(Error::Corrupt(format!(
            "checksum mismatch: stored {:08x}, computed {:08x}",
            stored_crc, actual_crc
        )));
    }

    // One byte past the limit tells "exactly at the limit" from "over it"
    let mut json = Vec::new();
    brotli::Decompressor::new(payload, BROTLI_BUFFER)
        .take(max_decompressed as u64 + 1)
        .read_to_end(&mut json)?;
    if json.len() > max_decompressed {
        return Err(Error::Corrupt(format!(
            "payload expands beyond {} bytes",
            max_decompressed
        )));
    }
    let documents: Vec<SearchDocument> = serde_json::from_slice(&json)?;

    if documents.len() != header.doc_count as usize {
        return Err(Error::Corrupt(format!(
            "header claims {} documents, payload holds {}",
            header.doc_count,
            documents.len()
        )));
    }
    Ok(documents)
}
