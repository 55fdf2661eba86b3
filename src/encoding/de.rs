use super::*;
use crate::{util::djb8, vecmap::VecMap, Float};
use std::convert::TryFrom;

/// Stateful decoder, maintaining the inverse of the encoder caches.
///
/// After any decoding error the cache contents are unspecified and the
/// instance must be discarded.
#[derive(Default)]
pub struct Decoder {
    cache: Cache,
}

impl Decoder {
    /// Creates a decoder with empty caches.
    pub fn new() -> Decoder { Decoder::default() }

    /// Decodes exactly one value from `data`, leaving any trailing bytes
    /// in the buffer. With `header`, a leading `jk!` magic is consumed
    /// when present and ignored when absent.
    ///
    /// # Example
    ///
    /// ```
    /// use jksn::prelude::*;
    ///
    /// let mut dec = Decoder::new();
    /// let value = dec.decode(&mut [0x1a_u8].as_slice(), false).unwrap();
    /// assert_eq!(value, Value::Int(10));
    /// ```
    pub fn decode<B: Buf>(&mut self, data: &mut B, header: bool) -> Result<Value, DecodingError> {
        if header {
            skip_magic(data);
        }
        self.parse_value(data)
    }

    fn parse_value<B: Buf>(&mut self, data: &mut B) -> Result<Value, DecodingError> {
        let control = read_u8(data)?;
        match control & MASK_CLASS {
            TYPE_CON => match control {
                CON_UNDEFINED => Ok(Value::Undefined),
                CON_NULL => Ok(Value::Null),
                CON_FALSE => Ok(Value::Bool(false)),
                CON_TRUE => Ok(Value::Bool(true)),
                CON_JSON => Err(DecodingError::new(
                    "this decoder does not support JSON literals",
                )),
                unknown => Err(unrecognized(unknown)),
            },
            TYPE_INT => {
                let number = match control {
                    INT_I32 => read_uint_be(data, 4)? as u32 as i32 as i64,
                    INT_I16 => read_uint_be(data, 2)? as u16 as i16 as i64,
                    INT_I8 => read_uint_be(data, 1)? as u8 as i8 as i64,
                    INT_VAR_NEG => read_varint_negative(data)?,
                    INT_VAR => read_varint_i64(data)?,
                    immediate => i64::from(immediate & MASK_META),
                };
                self.cache.lastint = Some(number);
                Ok(Value::Int(number))
            }
            TYPE_FLOAT => match control {
                FLOAT_NAN => Ok(Value::from(f64::NAN)),
                FLOAT_LONG_DOUBLE => Err(DecodingError::new(
                    "this build does not support long double numbers",
                )),
                FLOAT_DOUBLE => {
                    let bits = read_uint_be(data, 8)?;
                    Ok(Value::Float(Float::Double(bits)))
                }
                FLOAT_SINGLE => {
                    let bits = read_uint_be(data, 4)? as u32;
                    Ok(Value::Float(Float::Single(bits)))
                }
                FLOAT_NEG_INF => Ok(Value::from(f64::NEG_INFINITY)),
                FLOAT_POS_INF => Ok(Value::from(f64::INFINITY)),
                unknown => Err(unrecognized(unknown)),
            },
            TYPE_UTF16 => {
                if control == STR_HASHREF {
                    return self.resolve_hashref(data);
                }
                let units = read_length(data, control)?;
                let len = units
                    .checked_mul(2)
                    .ok_or_else(|| overlong_length())?;
                let payload = read_bytes(data, len)?;
                let text = Bytes::from(crate::unicode::utf16le_to_utf8(&payload));
                if payload.len() > 1 {
                    self.cache.texthash[djb8(&payload) as usize] = Some(text.clone());
                }
                Ok(Value::Str(text))
            }
            TYPE_UTF8 => {
                let len = read_length(data, control)?;
                let payload = read_bytes(data, len)?;
                if payload.len() > 1 {
                    self.cache.texthash[djb8(&payload) as usize] = Some(payload.clone());
                }
                Ok(Value::Str(payload))
            }
            TYPE_BLOB => {
                if control == BLOB_RESERVED {
                    return Err(unrecognized(control));
                }
                let len = read_length(data, control)?;
                let payload = read_bytes(data, len)?;
                if payload.len() > 1 {
                    self.cache.blobhash[djb8(&payload) as usize] = Some(payload.clone());
                }
                Ok(Value::Blob(payload))
            }
            TYPE_ARRAY => {
                let len = read_length(data, control)?;
                let mut out = Vec::with_capacity(len);
                for _ in 0..len {
                    out.push(self.parse_value(data)?);
                }
                Ok(Value::Array(out))
            }
            TYPE_OBJECT => {
                let len = read_length(data, control)?;
                let mut out = VecMap::with_capacity(len);
                for _ in 0..len {
                    let key = self.parse_value(data)?;
                    let value = self.parse_value(data)?;
                    if out.insert(key, value).is_some() {
                        return Err(DecodingError::new("object contains a duplicate key"));
                    }
                }
                Ok(Value::Object(out))
            }
            TYPE_SWAP => {
                if control == CON_UNSPECIFIED {
                    return Ok(Value::Unspecified);
                }
                self.parse_swapped(data, control)
            }
            TYPE_DELTA => {
                let delta = match control {
                    0xb0..=0xb5 => i64::from(control & MASK_META),
                    0xb6..=0xba => i64::from(control & MASK_META) - 11,
                    DELTA_I32 => read_uint_be(data, 4)? as u32 as i32 as i64,
                    DELTA_I16 => read_uint_be(data, 2)? as u16 as i16 as i64,
                    DELTA_I8 => read_uint_be(data, 1)? as u8 as i8 as i64,
                    DELTA_VAR_NEG => read_varint_negative(data)?,
                    _ => read_varint_i64(data)?,
                };
                let last = self.cache.lastint.ok_or_else(|| {
                    DecodingError::new("delta record without a previously decoded integer")
                })?;
                let number = last.checked_add(delta).ok_or_else(|| {
                    DecodingError::new("delta record overflows the integer width")
                })?;
                self.cache.lastint = Some(number);
                Ok(Value::Int(number))
            }
            _ => Err(unrecognized(control)),
        }
    }

    /// Shared string/blob reference. Text entries take precedence; the
    /// encoder never emits a blob reference into a text-occupied slot.
    fn resolve_hashref<B: Buf>(&mut self, data: &mut B) -> Result<Value, DecodingError> {
        let index = read_u8(data)? as usize;
        if let Some(text) = &self.cache.texthash[index] {
            Ok(Value::Str(text.clone()))
        } else if let Some(blob) = &self.cache.blobhash[index] {
            Ok(Value::Blob(blob.clone()))
        } else {
            Err(DecodingError::new(&format!(
                "hash reference to an unset cache slot: {}",
                index
            )))
        }
    }

    /// Rebuilds an array of objects from a column-swapped record: the
    /// column count comes from the control byte, the row count from the
    /// varint that follows it, then each column holds a key record and
    /// one cell per row.
    fn parse_swapped<B: Buf>(&mut self, data: &mut B, control: u8) -> Result<Value, DecodingError> {
        let columns = read_length(data, control)?;
        let rows = usize::try_from(read_varint(data)?).map_err(|_| overlong_length())?;
        let mut out: Vec<VecMap<Value, Value>> = vec![VecMap::new(); rows];
        for _ in 0..columns {
            let key = self.parse_value(data)?;
            for row in out.iter_mut() {
                let cell = self.parse_value(data)?;
                if cell == Value::Unspecified {
                    continue;
                }
                if row.insert(key.clone(), cell).is_some() {
                    return Err(DecodingError::new(
                        "column-swapped array repeats a column key",
                    ));
                }
            }
        }
        Ok(Value::Array(out.into_iter().map(Value::Object).collect()))
    }
}

fn skip_magic<B: Buf>(data: &mut B) {
    if data.remaining() >= MAGIC.len() {
        let chunk = data.chunk();
        if chunk.len() >= MAGIC.len() && chunk[..MAGIC.len()] == MAGIC {
            data.advance(MAGIC.len());
        }
    }
}

fn unrecognized(control: u8) -> DecodingError {
    DecodingError::new(&format!("unrecognized control byte: {:#04x}", control))
}

fn overlong_length() -> DecodingError {
    DecodingError::new("length prefix overflows the address width")
}

/// Try to read a single byte from the buffer.
fn read_u8<B: Buf>(data: &mut B) -> Result<u8, DecodingError> {
    if data.has_remaining() {
        Ok(data.get_u8())
    } else {
        Err(DecodingError::new(
            "buffer was empty, the stream may be truncated",
        ))
    }
}

/// Try to read a specific number of bytes from the buffer.
fn read_bytes<B: Buf>(data: &mut B, num_bytes: usize) -> Result<Bytes, DecodingError> {
    if data.remaining() >= num_bytes {
        let mut bts = vec![0; num_bytes];
        data.copy_to_slice(&mut bts);
        Ok(Bytes::from(bts))
    } else {
        Err(DecodingError::new(&format!(
            "requested {} bytes, but only {} bytes were left",
            num_bytes,
            data.remaining()
        )))
    }
}

/// Try to read a fixed-width big-endian unsigned integer.
fn read_uint_be<B: Buf>(data: &mut B, width: usize) -> Result<u64, DecodingError> {
    if data.remaining() >= width {
        Ok(data.get_uint(width))
    } else {
        Err(DecodingError::new(&format!(
            "requested {} bytes, but only {} bytes were left",
            width,
            data.remaining()
        )))
    }
}

/// Try to read a base-128 varint, rejecting accumulations that would
/// shift bits off the top of a `u64`.
fn read_varint<B: Buf>(data: &mut B) -> Result<u64, DecodingError> {
    let mut result: u64 = 0;
    loop {
        if result >> (64 - 7) != 0 {
            return Err(DecodingError::new(
                "variable length integer overflows the integer width",
            ));
        }
        let byte = read_u8(data)?;
        result = (result << 7) | u64::from(byte & 0x7f);
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }
}

fn read_varint_i64<B: Buf>(data: &mut B) -> Result<i64, DecodingError> {
    let magnitude = read_varint(data)?;
    i64::try_from(magnitude).map_err(|_| {
        DecodingError::new("variable length integer overflows the integer width")
    })
}

fn read_varint_negative<B: Buf>(data: &mut B) -> Result<i64, DecodingError> {
    let magnitude = read_varint(data)?;
    if magnitude > i64::min_value().unsigned_abs() {
        return Err(DecodingError::new(
            "variable length integer overflows the integer width",
        ));
    }
    Ok((magnitude as i64).wrapping_neg())
}

/// Reads the length carried by `control`: an immediate low nibble or one
/// of the u8 / u16 / varint forms.
fn read_length<B: Buf>(data: &mut B, control: u8) -> Result<usize, DecodingError> {
    match control & MASK_META {
        LEN_U16 => Ok(read_uint_be(data, 2)? as usize),
        LEN_U8 => Ok(read_uint_be(data, 1)? as usize),
        LEN_VAR => {
            let len = read_varint(data)?;
            usize::try_from(len).map_err(|_| overlong_length())
        }
        immediate => Ok(immediate as usize),
    }
}
