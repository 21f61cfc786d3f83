//! Log record format
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, whole record including this field)
//! +------------------+
//! | Kind             | (u8: 1 = put, 2 = delete)
//! +------------------+
//! | Collection       | (length-prefixed UTF-8)
//! +------------------+
//! | Document ID      | (12 raw bytes)
//! +------------------+
//! | Body             | (length-prefixed JSON, empty for deletes)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! The checksum covers every byte before it. A put always carries the full
//! document, never a delta.

use std::io::{self, Cursor, Read};

use super::checksum::{compute_checksum, verify_checksum};
use super::object_id::{ObjectId, OBJECT_ID_LEN};
use super::Document;

/// Smallest possible record: length + kind + empty collection + id + empty body + checksum
pub(crate) const MIN_RECORD_SIZE: usize = 4 + 1 + 4 + OBJECT_ID_LEN + 4 + 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Put = 1,
    Delete = 2,
}

impl RecordKind {
    fn from_byte(byte: u8) -> io::Result<Self> {
        match byte {
            1 => Ok(Self::Put),
            2 => Ok(Self::Delete),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown record kind: {}", other),
            )),
        }
    }
}

/// One entry of the store log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub kind: RecordKind,
    pub collection: String,
    pub id: ObjectId,
    /// Serialized document (empty for deletes)
    pub body: Vec<u8>,
}

impl LogRecord {
    /// Full-document write.
    pub fn put(collection: &str, id: ObjectId, document: &Document) -> serde_json::Result<Self> {
        Ok(Self {
            kind: RecordKind::Put,
            collection: collection.to_string(),
            id,
            body: serde_json::to_vec(document)?,
        })
    }

    /// Tombstone.
    pub fn delete(collection: &str, id: ObjectId) -> Self {
        Self {
            kind: RecordKind::Delete,
            collection: collection.to_string(),
            id,
            body: Vec::new(),
        }
    }

    /// Decodes the body back into a document.
    pub fn document(&self) -> serde_json::Result<Document> {
        serde_json::from_slice(&self.body)
    }

    fn serialize_body(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1 + 4 + self.collection.len() + OBJECT_ID_LEN + 4 + self.body.len());

        buf.push(self.kind as u8);

        buf.extend_from_slice(&(self.collection.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.collection.as_bytes());

        buf.extend_from_slice(&self.id.bytes());

        buf.extend_from_slice(&(self.body.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.body);

        buf
    }

    /// Serialize the complete record to bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let body = self.serialize_body();
        let record_length = (4 + body.len() + 4) as u32;

        let mut record = Vec::with_capacity(record_length as usize);
        record.extend_from_slice(&record_length.to_le_bytes());
        record.extend_from_slice(&body);

        let checksum = compute_checksum(&record);
        record.extend_from_slice(&checksum.to_le_bytes());

        record
    }

    /// Deserialize a record from bytes, verifying the checksum.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Record too short",
            ));
        }

        let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if record_length < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid record length: {}", record_length),
            ));
        }

        if data.len() < record_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Record truncated: expected {} bytes, got {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let stored_checksum = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);
        if !verify_checksum(&data[..checksum_offset], stored_checksum) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Checksum mismatch: computed {:08x}, stored {:08x}",
                    compute_checksum(&data[..checksum_offset]),
                    stored_checksum
                ),
            ));
        }

        let mut cursor = Cursor::new(&data[4..checksum_offset]);

        let mut kind_buf = [0u8; 1];
        cursor.read_exact(&mut kind_buf)?;
        let kind = RecordKind::from_byte(kind_buf[0])?;

        let collection = String::from_utf8(read_bytes(&mut cursor)?).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {}", e))
        })?;

        let mut id_buf = [0u8; OBJECT_ID_LEN];
        cursor.read_exact(&mut id_buf)?;

        let body = read_bytes(&mut cursor)?;

        Ok((
            Self {
                kind,
                collection,
                id: ObjectId::from_bytes(id_buf),
                body,
            },
            record_length,
        ))
    }
}

fn read_bytes<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}
