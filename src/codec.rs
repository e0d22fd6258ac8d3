//! Byte/TLV codec: hex helpers, concatenation, and a BER-TLV reader.
//!
//! No canonicalisation is performed anywhere in this module: tags are
//! returned in the order they appear in the input, and callers that need a
//! particular tag dispatch on it themselves (see [`crate::card_signature`]).

use crate::error::TunnelError;

/// Decode a hex string into bytes, rejecting non-hex characters and
/// odd-length input.
pub fn from_hex(s: &str) -> Result<Vec<u8>, TunnelError> {
    hex::decode(s).map_err(|e| TunnelError::Parse(format!("invalid hex: {e}")))
}

/// Encode bytes as a lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Concatenate any number of byte slices into one owned buffer.
pub fn concat(parts: &[&[u8]]) -> Vec<u8> {
    let total: usize = parts.iter().map(|p| p.len()).sum();
    let mut out = Vec::with_capacity(total);
    for p in parts {
        out.extend_from_slice(p);
    }
    out
}

/// A single decoded TLV entry: the tag byte and a borrowed slice of its
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tlv<'a> {
    pub tag: u8,
    pub value: &'a [u8],
}

/// A forward-only BER-TLV reader over a byte slice.
///
/// Supports single-byte tags and BER short-form (length < 0x80) and
/// long-form length encodings of one or two subsequent length octets
/// (`0x81 len`, `0x82 len_hi len_lo`), which covers every length this
/// protocol's TLVs ever carry (at most a few hundred bytes, for the `cvc`
/// trailer).
pub struct TlvReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> TlvReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        TlvReader { data, pos: 0 }
    }

    fn read_length(&mut self) -> Result<usize, TunnelError> {
        let first = *self
            .data
            .get(self.pos)
            .ok_or_else(|| TunnelError::Parse("truncated TLV length".into()))?;
        self.pos += 1;

        if first & 0x80 == 0 {
            return Ok(first as usize);
        }

        let num_octets = (first & 0x7F) as usize;
        if num_octets == 0 || num_octets > 2 {
            return Err(TunnelError::Parse(format!(
                "unsupported BER length form (0x{first:02x})"
            )));
        }
        let end = self
            .pos
            .checked_add(num_octets)
            .filter(|&e| e <= self.data.len())
            .ok_or_else(|| TunnelError::Parse("truncated TLV length octets".into()))?;
        let mut len: usize = 0;
        for &b in &self.data[self.pos..end] {
            len = (len << 8) | b as usize;
        }
        self.pos = end;
        Ok(len)
    }
}

impl<'a> Iterator for TlvReader<'a> {
    type Item = Result<Tlv<'a>, TunnelError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.data.len() {
            return None;
        }

        let tag = self.data[self.pos];
        self.pos += 1;

        let len = match self.read_length() {
            Ok(len) => len,
            Err(e) => return Some(Err(e)),
        };

        let end = match self.pos.checked_add(len).filter(|&e| e <= self.data.len()) {
            Some(end) => end,
            None => {
                return Some(Err(TunnelError::Parse(format!(
                    "TLV tag 0x{tag:02x} declares length {len} beyond remaining input"
                ))))
            }
        };

        let value = &self.data[self.pos..end];
        self.pos = end;
        Some(Ok(Tlv { tag, value }))
    }
}

/// Encode a single primitive TLV, picking the shortest BER length form that
/// fits `value`.
///
/// The request body this core emits never needs more than a short-form
/// length, but test scaffolding builds synthetic card responses that wrap a
/// `0x83` card-identity blob well past 127 bytes, so this picks short-form,
/// one-octet long-form (`0x81`), or two-octet long-form (`0x82`) as needed --
/// the same forms [`TlvReader`] decodes.
pub fn encode_tlv(tag: u8, value: &[u8]) -> Vec<u8> {
    let len = value.len();
    let mut out = Vec::with_capacity(4 + len);
    out.push(tag);
    if len < 0x80 {
        out.push(len as u8);
    } else if len <= 0xFF {
        out.push(0x81);
        out.push(len as u8);
    } else if len <= 0xFFFF {
        out.push(0x82);
        out.push((len >> 8) as u8);
        out.push((len & 0xFF) as u8);
    } else {
        panic!("encode_tlv: value of {len} bytes exceeds the two-octet BER length form");
    }
    out.extend_from_slice(value);
    out
}
