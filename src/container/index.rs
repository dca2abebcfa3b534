//! Container header and index entries.
//!
//! All fields are little-endian.

use super::{ContainerError, MAX_SIZE_FIELD};

/// `index_location` (8) + `index_count` (4).
pub const HEADER_SIZE: usize = 12;

/// `order` (4) + `location` (8) + `compressed_size` (3) + `uncompressed_size` (3).
pub const INDEX_ENTRY_SIZE: usize = 18;

// ─────────────────────────────────────────────────────────────────────────────
// Header
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    pub index_location: u64,
    pub index_count: u32,
}

impl ContainerHeader {
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..8].copy_from_slice(&self.index_location.to_le_bytes());
        out[8..12].copy_from_slice(&self.index_count.to_le_bytes());
        out
    }

    pub fn from_bytes(b: &[u8; HEADER_SIZE]) -> Self {
        let mut loc = [0u8; 8];
        loc.copy_from_slice(&b[0..8]);
        ContainerHeader {
            index_location: u64::from_le_bytes(loc),
            index_count: u32::from_le_bytes([b[8], b[9], b[10], b[11]]),
        }
    }

    /// Byte length of the index region this header describes.
    #[inline]
    pub fn index_len(&self) -> u64 {
        self.index_count as u64 * INDEX_ENTRY_SIZE as u64
    }

    /// Checks that the index region starts after the header and ends inside
    /// a file of `file_size` bytes.
    pub fn validate(&self, file_size: u64) -> Result<(), ContainerError> {
        let len = self.index_len();
        let in_bounds = self.index_location >= HEADER_SIZE as u64
            && self
                .index_location
                .checked_add(len)
                .is_some_and(|end| end <= file_size);
        if !in_bounds {
            return Err(ContainerError::IndexOutOfBounds {
                offset: self.index_location,
                len,
                file_size,
            });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Index entry
// ─────────────────────────────────────────────────────────────────────────────

/// Where one block lives and how big it is.  Written once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    /// Position of the block in the original input.
    pub order: u32,
    /// Byte offset of the compressed block inside the container.
    pub location: u64,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
}

impl IndexEntry {
    pub fn write_to(&self, out: &mut Vec<u8>) {
        debug_assert!(self.compressed_size as usize <= MAX_SIZE_FIELD);
        debug_assert!(self.uncompressed_size as usize <= MAX_SIZE_FIELD);
        out.extend_from_slice(&self.order.to_le_bytes());
        out.extend_from_slice(&self.location.to_le_bytes());
        out.extend_from_slice(&self.compressed_size.to_le_bytes()[..3]);
        out.extend_from_slice(&self.uncompressed_size.to_le_bytes()[..3]);
    }

    pub fn from_bytes(b: &[u8]) -> Self {
        debug_assert!(b.len() >= INDEX_ENTRY_SIZE);
        let mut loc = [0u8; 8];
        loc.copy_from_slice(&b[4..12]);
        IndexEntry {
            order: u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            location: u64::from_le_bytes(loc),
            compressed_size: u32::from_le_bytes([b[12], b[13], b[14], 0]),
            uncompressed_size: u32::from_le_bytes([b[15], b[16], b[17], 0]),
        }
    }

    /// Checks that the block lies between the header and the end of the file.
    pub fn validate(&self, file_size: u64) -> Result<(), ContainerError> {
        let len = self.compressed_size as u64;
        let in_bounds = self.location >= HEADER_SIZE as u64
            && self
                .location
                .checked_add(len)
                .is_some_and(|end| end <= file_size);
        if !in_bounds {
            return Err(ContainerError::IndexOutOfBounds {
                offset: self.location,
                len,
                file_size,
            });
        }
        Ok(())
    }
}

/// Serializes `entries` in the given order.
pub fn encode_index(entries: &[IndexEntry]) -> Vec<u8> {
    let mut out = Vec::with_capacity(entries.len() * INDEX_ENTRY_SIZE);
    for e in entries {
        e.write_to(&mut out);
    }
    out
}

/// Parses an index region, validates every entry against `file_size`, and
/// returns the entries sorted by `order`.
pub fn decode_index(bytes: &[u8], file_size: u64) -> Result<Vec<IndexEntry>, ContainerError> {
    let mut entries = Vec::with_capacity(bytes.len() / INDEX_ENTRY_SIZE);
    for chunk in bytes.chunks_exact(INDEX_ENTRY_SIZE) {
        let entry = IndexEntry::from_bytes(chunk);
        entry.validate(file_size)?;
        entries.push(entry);
    }
    entries.sort_unstable_by_key(|e| e.order);
    if let Some(w) = entries.windows(2).find(|w| w[0].order == w[1].order) {
        return Err(ContainerError::DuplicateBlock { order: w[0].order });
    }
    Ok(entries)
}
