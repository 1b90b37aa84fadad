// src/encoding/serializer.rs
//
// Append-only byte builder. Output feeds hashing/signing, so every method is
// deterministic and nothing is ever reordered or rewritten.

/// Append-only byte buffer builder
///
/// Every `write_*` consumes and returns the builder so calls chain:
///
/// ```
/// use hdwallet_core::encoding::ByteSerializer;
///
/// let bytes = ByteSerializer::new()
///     .write_u8(0)
///     .write_u32_be(0x8000_0000)
///     .write_varuint(300)
///     .serialize();
/// assert_eq!(bytes, vec![0x00, 0x80, 0x00, 0x00, 0x00, 0xac, 0x02]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteSerializer {
    buf: Vec<u8>,
}

impl ByteSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append raw bytes
    #[must_use]
    pub fn write(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    #[must_use]
    pub fn write_u8(mut self, value: u8) -> Self {
        self.buf.push(value);
        self
    }

    #[must_use]
    pub fn write_u16_be(self, value: u16) -> Self {
        self.write(&value.to_be_bytes())
    }

    #[must_use]
    pub fn write_u32_be(self, value: u32) -> Self {
        self.write(&value.to_be_bytes())
    }

    #[must_use]
    pub fn write_u64_be(self, value: u64) -> Self {
        self.write(&value.to_be_bytes())
    }

    /// EOS-style wire fields (names, amounts) are little-endian
    #[must_use]
    pub fn write_u64_le(self, value: u64) -> Self {
        self.write(&value.to_le_bytes())
    }

    #[must_use]
    pub fn write_i64_le(self, value: i64) -> Self {
        self.write(&value.to_le_bytes())
    }

    /// Unsigned LEB128: 7 bits per byte, least significant group first,
    /// high bit set on every byte except the last. Always minimal length.
    #[must_use]
    pub fn write_varuint(mut self, mut value: u64) -> Self {
        loop {
            let group = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.buf.push(group);
                return self;
            }
            self.buf.push(group | 0x80);
        }
    }

    /// Length-prefixed byte string (varuint length, then the bytes)
    #[must_use]
    pub fn write_bytes_with_len(self, bytes: &[u8]) -> Self {
        self.write_varuint(bytes.len() as u64).write(bytes)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Finish and hand out the accumulated buffer
    pub fn serialize(self) -> Vec<u8> {
        self.buf
    }
}

// =============================================================================
// TESTS
// =============================================================================
