//! Fixed-schema binary codec shared by account records and instruction arguments.
//!
//! A [Layout] is an ordered list of named [Field]s. Encoding concatenates each field's
//! representation in declared order with no padding; integers are little-endian, booleans
//! take one byte (nonzero reads as `true`), public keys and byte arrays are written raw.
//! Vectors carry a `u32` little-endian element count before their elements.
//!
//! Values are exact Rust types, so a field can never receive more bits than it declares.
//! Narrowing a wider integer with `as` before handing it to the codec wraps silently; that
//! is the caller's concern, not the codec's.

use solana_program::pubkey::Pubkey;

use crate::{error::ClientError, Result};

/// Width in bytes of a vector's element count prefix.
pub const VEC_LEN_PREFIX: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    U64,
    I64,
    Bool,
    /// Raw byte array of the given length.
    Bytes(usize),
    Pubkey,
    /// Fixed-length array of another kind.
    Array(&'static FieldKind, usize),
    /// Length-prefixed vector of another kind.
    Vec(&'static FieldKind),
}

impl FieldKind {
    /// Bytes taken by this kind. Vectors count only their length prefix.
    pub const fn width(&self) -> usize {
        match self {
            FieldKind::U8 | FieldKind::Bool => 1,
            FieldKind::U64 | FieldKind::I64 => 8,
            FieldKind::Bytes(len) => *len,
            FieldKind::Pubkey => 32,
            FieldKind::Array(inner, len) => inner.width() * *len,
            FieldKind::Vec(_) => VEC_LEN_PREFIX,
        }
    }

    pub const fn is_fixed(&self) -> bool {
        match self {
            FieldKind::Array(inner, _) => inner.is_fixed(),
            FieldKind::Vec(_) => false,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A decoded (or to-be-encoded) field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    U8(u8),
    U64(u64),
    I64(i64),
    Bool(bool),
    Bytes(Vec<u8>),
    Pubkey(Pubkey),
    List(Vec<Value>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    fields: &'static [Field],
}

impl Layout {
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    pub const fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Sum of the declared field widths. For layouts containing vectors this is the
    /// smallest buffer that can possibly decode (every vector empty).
    pub const fn width(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].kind.width();
            i += 1;
        }
        total
    }

    pub fn is_fixed(&self) -> bool {
        self.fields.iter().all(|field| field.kind.is_fixed())
    }

    /// Encodes `values` in field order. Fails only when a value does not match the kind its
    /// field declares.
    pub fn encode(&self, values: &[Value]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.width());
        self.encode_into(values, &mut out)?;
        Ok(out)
    }

    pub fn encode_into(&self, values: &[Value], out: &mut Vec<u8>) -> Result<()> {
        if values.len() != self.fields.len() {
            return Err(ClientError::FieldCountMismatch {
                expected: self.fields.len(),
                actual: values.len(),
            });
        }
        for (field, value) in self.fields.iter().zip(values) {
            write_value(field.name, &field.kind, value, out)?;
        }
        Ok(())
    }

    /// Decodes one value per field, reading from the start of `data`. Bytes past the last
    /// field are ignored.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<Value>> {
        let mut reader = Reader::new(data);
        self.fields
            .iter()
            .map(|field| reader.read(&field.kind))
            .collect()
    }

    /// Decodes and pairs each value with its field for by-name access.
    pub fn decode_fields(&self, data: &[u8]) -> Result<DecodedFields> {
        let values = self.decode(data)?;
        Ok(DecodedFields {
            fields: self.fields,
            values: values.into_iter(),
            index: 0,
        })
    }
}

fn mismatch(field: &'static str, kind: &FieldKind) -> ClientError {
    ClientError::ValueMismatch {
        field,
        expected: *kind,
    }
}

fn write_value(
    field: &'static str,
    kind: &FieldKind,
    value: &Value,
    out: &mut Vec<u8>,
) -> Result<()> {
    match (kind, value) {
        (FieldKind::U8, Value::U8(v)) => out.push(*v),
        (FieldKind::U64, Value::U64(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (FieldKind::I64, Value::I64(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (FieldKind::Bool, Value::Bool(v)) => out.push(u8::from(*v)),
        (FieldKind::Bytes(len), Value::Bytes(bytes)) if bytes.len() == *len => {
            out.extend_from_slice(bytes)
        }
        (FieldKind::Pubkey, Value::Pubkey(key)) => out.extend_from_slice(key.as_ref()),
        (FieldKind::Array(inner, len), Value::List(items)) if items.len() == *len => {
            for item in items {
                write_value(field, inner, item, out)?;
            }
        }
        (FieldKind::Vec(inner), Value::List(items)) => {
            let count = u32::try_from(items.len()).map_err(|_| mismatch(field, kind))?;
            out.extend_from_slice(&count.to_le_bytes());
            for item in items {
                write_value(field, inner, item, out)?;
            }
        }
        _ => return Err(mismatch(field, kind)),
    }
    Ok(())
}

/// Forward-only cursor over an input buffer.
struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(ClientError::MalformedInput {
                expected: self.offset.saturating_add(len),
                actual: self.data.len(),
            })?;
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    fn read(&mut self, kind: &FieldKind) -> Result<Value> {
        let value = match kind {
            FieldKind::U8 => Value::U8(self.take_array::<1>()?[0]),
            FieldKind::U64 => Value::U64(u64::from_le_bytes(self.take_array()?)),
            FieldKind::I64 => Value::I64(i64::from_le_bytes(self.take_array()?)),
            FieldKind::Bool => Value::Bool(self.take_array::<1>()?[0] != 0),
            FieldKind::Bytes(len) => Value::Bytes(self.take(*len)?.to_vec()),
            FieldKind::Pubkey => Value::Pubkey(Pubkey::new_from_array(self.take_array()?)),
            FieldKind::Array(inner, len) => Value::List(
                (0..*len)
                    .map(|_| self.read(inner))
                    .collect::<Result<Vec<_>>>()?,
            ),
            FieldKind::Vec(inner) => {
                let count = u32::from_le_bytes(self.take_array()?) as usize;
                // Reject counts the remaining bytes cannot hold before allocating.
                let needed = count.saturating_mul(inner.width().max(1));
                if needed > self.data.len() - self.offset {
                    return Err(ClientError::MalformedInput {
                        expected: self.offset.saturating_add(needed),
                        actual: self.data.len(),
                    });
                }
                Value::List(
                    (0..count)
                        .map(|_| self.read(inner))
                        .collect::<Result<Vec<_>>>()?,
                )
            }
        };
        Ok(value)
    }
}

/// Decoded values consumed in field order by typed records.
pub struct DecodedFields {
    fields: &'static [Field],
    values: std::vec::IntoIter<Value>,
    index: usize,
}

impl DecodedFields {
    fn next(&mut self) -> Result<(&'static Field, Value)> {
        let field = self
            .fields
            .get(self.index)
            .ok_or(ClientError::FieldCountMismatch {
                expected: self.fields.len(),
                actual: self.index + 1,
            })?;
        let value = self.values.next().ok_or(ClientError::FieldCountMismatch {
            expected: self.fields.len(),
            actual: self.index,
        })?;
        self.index += 1;
        Ok((field, value))
    }

    pub fn u8(&mut self) -> Result<u8> {
        match self.next()? {
            (_, Value::U8(v)) => Ok(v),
            (field, _) => Err(mismatch(field.name, &field.kind)),
        }
    }

    pub fn u64(&mut self) -> Result<u64> {
        match self.next()? {
            (_, Value::U64(v)) => Ok(v),
            (field, _) => Err(mismatch(field.name, &field.kind)),
        }
    }

    pub fn i64(&mut self) -> Result<i64> {
        match self.next()? {
            (_, Value::I64(v)) => Ok(v),
            (field, _) => Err(mismatch(field.name, &field.kind)),
        }
    }

    pub fn bool(&mut self) -> Result<bool> {
        match self.next()? {
            (_, Value::Bool(v)) => Ok(v),
            (field, _) => Err(mismatch(field.name, &field.kind)),
        }
    }

    pub fn pubkey(&mut self) -> Result<Pubkey> {
        match self.next()? {
            (_, Value::Pubkey(v)) => Ok(v),
            (field, _) => Err(mismatch(field.name, &field.kind)),
        }
    }

    pub fn bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        match self.next()? {
            (field, Value::Bytes(v)) => {
                <[u8; N]>::try_from(v.as_slice()).map_err(|_| mismatch(field.name, &field.kind))
            }
            (field, _) => Err(mismatch(field.name, &field.kind)),
        }
    }

    /// A vector of 32-byte entries, e.g. a merkle proof.
    pub fn hashes(&mut self) -> Result<Vec<[u8; 32]>> {
        let (field, value) = self.next()?;
        let Value::List(items) = value else {
            return Err(mismatch(field.name, &field.kind));
        };
        items
            .into_iter()
            .map(|item| match item {
                Value::Bytes(bytes) => <[u8; 32]>::try_from(bytes.as_slice())
                    .map_err(|_| mismatch(field.name, &field.kind)),
                _ => Err(mismatch(field.name, &field.kind)),
            })
            .collect()
    }
}
