use super::*;
use crate::{
    errors::EncodingError,
    unicode,
    util::{djb8, u64_to_be_digits, u64_to_varint_digits},
    vecmap::VecMap,
    Float,
};
use hashbrown::HashSet;
use smallvec::SmallVec;
use std::io::{self, Write};

/// Encoder-side record awaiting the optimization pass.
///
/// Serialization order is the control byte, the fixed header `data`
/// (length prefix, immediate integer, delta, hash index, float bits),
/// the trailing payload `buf`, then the children depth-first.
pub(crate) struct Proxy {
    control: u8,
    data: SmallVec<[u8; 8]>,
    buf: Bytes,
    children: Vec<Proxy>,
    /// Source integer, kept so the optimizer can compute deltas.
    origin: Option<i64>,
    /// DJB8 of `buf`.
    hash: u8,
}

impl Proxy {
    fn leaf(control: u8) -> Proxy {
        Proxy {
            control,
            data: SmallVec::new(),
            buf: Bytes::new(),
            children: Vec::new(),
            origin: None,
            hash: 0,
        }
    }

    fn sized(control: u8, data: SmallVec<[u8; 8]>) -> Proxy {
        Proxy {
            data,
            ..Proxy::leaf(control)
        }
    }

    fn payload(control: u8, data: SmallVec<[u8; 8]>, buf: Bytes) -> Proxy {
        Proxy {
            data,
            buf,
            ..Proxy::leaf(control)
        }
    }

    /// Cumulative encoded size. `depth == 0` measures the whole subtree;
    /// `depth == 1` stops at this record; larger depths include that many
    /// levels of children.
    fn size(&self, depth: usize) -> usize {
        let mut result = 1 + self.data.len() + self.buf.len();
        if depth == 0 {
            for child in &self.children {
                result += child.size(0);
            }
        } else if depth != 1 {
            for child in &self.children {
                result += child.size(depth - 1);
            }
        }
        result
    }

    fn push_to(&self, out: &mut Vec<u8>) {
        out.push(self.control);
        out.extend_from_slice(&self.data);
        out.extend_from_slice(&self.buf);
        for child in &self.children {
            child.push_to(out);
        }
    }

    fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&[self.control])?;
        out.write_all(&self.data)?;
        out.write_all(&self.buf)?;
        for child in &self.children {
            child.write_to(out)?;
        }
        Ok(())
    }
}

/// Stateful encoder.
///
/// The dedup caches and the delta anchor live as long as the instance,
/// so values encoded through one encoder share hash references and must
/// be decoded in the same order through one [`Decoder`].
#[derive(Default)]
pub struct Encoder {
    cache: Cache,
}

impl Encoder {
    /// Creates an encoder with empty caches.
    pub fn new() -> Encoder { Encoder::default() }

    /// Encodes `value` into a fresh vector of bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use jksn::prelude::*;
    ///
    /// let mut enc = Encoder::new();
    /// assert_eq!(enc.encode(&Value::Bool(true), false), vec![0x03]);
    /// ```
    pub fn encode(&mut self, value: &Value, header: bool) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(value, &mut out, header);
        out
    }

    /// Encodes `value`, appending the bytes to `out`.
    pub fn encode_into(&mut self, value: &Value, out: &mut Vec<u8>, header: bool) {
        let proxy = self.dump_to_proxy(value);
        if header {
            out.extend_from_slice(&MAGIC);
        }
        proxy.push_to(out);
    }

    /// Encodes `value` into a writer. On failure the stream holds a
    /// truncated prefix.
    pub fn encode_to<W: Write>(
        &mut self,
        out: &mut W,
        value: &Value,
        header: bool,
    ) -> Result<(), EncodingError> {
        let proxy = self.dump_to_proxy(value);
        if header {
            out.write_all(&MAGIC).map_err(EncodingError::from)?;
        }
        proxy.write_to(out).map_err(EncodingError::from)
    }

    fn dump_to_proxy(&mut self, value: &Value) -> Proxy {
        let mut proxy = dump_value(value);
        self.optimize(&mut proxy);
        proxy
    }

    /// Post-order rewrite pass carrying the instance cache: integers
    /// become deltas against the previous integer, repeated string and
    /// blob payloads become 1-byte hash references.
    fn optimize(&mut self, proxy: &mut Proxy) {
        match proxy.control & MASK_CLASS {
            TYPE_INT => {
                if let Some(current) = proxy.origin {
                    if let Some(last) = self.cache.lastint {
                        self.try_delta(proxy, current, last);
                    }
                    self.cache.lastint = Some(current);
                }
            }
            TYPE_UTF16 | TYPE_UTF8 => self.dedup_payload(proxy, true),
            TYPE_BLOB => self.dedup_payload(proxy, false),
            _ => {
                for child in &mut proxy.children {
                    self.optimize(child);
                }
            }
        }
    }

    fn try_delta(&mut self, proxy: &mut Proxy, current: i64, last: i64) {
        let delta = match current.checked_sub(last) {
            Some(delta) => delta,
            None => return,
        };
        if delta.unsigned_abs() >= current.unsigned_abs() {
            return;
        }
        let (control, data) = delta_record(delta);
        if data.len() < proxy.data.len() {
            proxy.control = control;
            proxy.data = data;
        }
    }

    fn dedup_payload(&mut self, proxy: &mut Proxy, text: bool) {
        if proxy.buf.len() <= 1 {
            return;
        }
        let index = proxy.hash as usize;
        // The decoder resolves a shared reference against the text cache
        // first, so a blob reference is only unambiguous while no text
        // payload occupies the slot.
        let shadowed = !text && self.cache.texthash[index].is_some();
        let slot = if text {
            &mut self.cache.texthash[index]
        } else {
            &mut self.cache.blobhash[index]
        };
        match slot {
            Some(cached) if *cached == proxy.buf => {
                if shadowed {
                    return;
                }
                proxy.control = STR_HASHREF;
                proxy.data = SmallVec::from_slice(&[proxy.hash]);
                proxy.buf = Bytes::new();
            }
            stale => *stale = Some(proxy.buf.clone()),
        }
    }
}

fn dump_value(value: &Value) -> Proxy {
    match value {
        Value::Undefined => Proxy::leaf(CON_UNDEFINED),
        Value::Null => Proxy::leaf(CON_NULL),
        Value::Bool(false) => Proxy::leaf(CON_FALSE),
        Value::Bool(true) => Proxy::leaf(CON_TRUE),
        Value::Int(number) => dump_int(*number),
        Value::Float(float) => dump_float(*float),
        Value::Str(utf8) => dump_string(utf8),
        Value::Blob(blob) => dump_blob(blob),
        Value::Array(items) => dump_array(items),
        Value::Object(map) => dump_object(map),
        Value::Unspecified => Proxy::leaf(CON_UNSPECIFIED),
    }
}

fn dump_int(number: i64) -> Proxy {
    let mut proxy = if (0..=INT_IMM_MAX).contains(&number) {
        Proxy::leaf(TYPE_INT | number as u8)
    } else if (-0x80..=0x7f).contains(&number) {
        Proxy::sized(INT_I8, u64_to_be_digits(number as u64, 1))
    } else if (-0x8000..=0x7fff).contains(&number) {
        Proxy::sized(INT_I16, u64_to_be_digits(number as u64, 2))
    } else if (-0x8000_0000..=-0x0020_0000).contains(&number)
        || (0x0020_0000..=0x7fff_ffff).contains(&number)
    {
        Proxy::sized(INT_I32, u64_to_be_digits(number as u64, 4))
    } else if number >= 0 {
        Proxy::sized(INT_VAR, u64_to_varint_digits(number as u64))
    } else {
        Proxy::sized(INT_VAR_NEG, u64_to_varint_digits(number.unsigned_abs()))
    };
    proxy.origin = Some(number);
    proxy
}

fn dump_float(float: Float) -> Proxy {
    match float {
        Float::Single(bits) => {
            let number = f32::from_bits(bits);
            if number.is_nan() {
                Proxy::leaf(FLOAT_NAN)
            } else if number.is_infinite() {
                Proxy::leaf(if number.is_sign_positive() {
                    FLOAT_POS_INF
                } else {
                    FLOAT_NEG_INF
                })
            } else {
                Proxy::sized(FLOAT_SINGLE, SmallVec::from_slice(&bits.to_be_bytes()))
            }
        }
        Float::Double(bits) => {
            let number = f64::from_bits(bits);
            if number.is_nan() {
                Proxy::leaf(FLOAT_NAN)
            } else if number.is_infinite() {
                Proxy::leaf(if number.is_sign_positive() {
                    FLOAT_POS_INF
                } else {
                    FLOAT_NEG_INF
                })
            } else {
                Proxy::sized(FLOAT_DOUBLE, SmallVec::from_slice(&bits.to_be_bytes()))
            }
        }
    }
}

fn dump_string(utf8: &Bytes) -> Proxy {
    let mut proxy = match unicode::utf8_to_utf16le(utf8) {
        Some(wide) if wide.len() < utf8.len() => {
            let units = wide.len() / 2;
            framed(TYPE_UTF16, units, Bytes::from(wide), IMM_LEN_MAX)
        }
        _ => framed(TYPE_UTF8, utf8.len(), utf8.clone(), IMM_LEN_MAX_WIDE),
    };
    proxy.hash = djb8(&proxy.buf);
    proxy
}

fn dump_blob(blob: &Bytes) -> Proxy {
    let mut proxy = framed(TYPE_BLOB, blob.len(), blob.clone(), IMM_LEN_MAX);
    proxy.hash = djb8(&proxy.buf);
    proxy
}

/// Builds a length-prefixed record, choosing the smallest covering
/// length form for the class.
fn framed(class: u8, len: usize, buf: Bytes, imm_max: usize) -> Proxy {
    if len <= imm_max {
        Proxy::payload(class | len as u8, SmallVec::new(), buf)
    } else if len <= 0xff {
        Proxy::payload(class | LEN_U8, u64_to_be_digits(len as u64, 1), buf)
    } else if len <= 0xffff {
        Proxy::payload(class | LEN_U16, u64_to_be_digits(len as u64, 2), buf)
    } else {
        Proxy::payload(class | LEN_VAR, u64_to_varint_digits(len as u64), buf)
    }
}

fn dump_array(items: &[Value]) -> Proxy {
    let mut result = dump_straight_array(items);
    if swap_available(items) {
        let swapped = dump_swapped_array(items);
        if swapped.size(3) < result.size(3) {
            result = swapped;
        }
    }
    result
}

/// The swap form applies when every element is an object, at least one
/// is non-empty, and no entry value is `Unspecified` (an `Unspecified`
/// cell marks an absent key, so a present-but-unspecified entry would
/// not survive reconstruction).
fn swap_available(items: &[Value]) -> bool {
    let mut columns = false;
    for row in items {
        match row {
            Value::Object(map) => {
                if map.iter().any(|(_, v)| *v == Value::Unspecified) {
                    return false;
                }
                columns = columns || !map.is_empty();
            }
            _ => return false,
        }
    }
    columns
}

fn dump_straight_array(items: &[Value]) -> Proxy {
    let mut result = framed(TYPE_ARRAY, items.len(), Bytes::new(), IMM_LEN_MAX_WIDE);
    result.children = items.iter().map(dump_value).collect();
    result
}

fn dump_swapped_array(rows: &[Value]) -> Proxy {
    let mut columns: Vec<&Value> = Vec::new();
    let mut seen: HashSet<&Value> = HashSet::new();
    for row in rows {
        if let Value::Object(map) = row {
            for (key, _) in map.iter() {
                if seen.insert(key) {
                    columns.push(key);
                }
            }
        }
    }
    let mut result = framed(TYPE_SWAP, columns.len(), Bytes::new(), IMM_LEN_MAX_WIDE);
    // row count follows the column count in the header data
    result
        .data
        .extend_from_slice(&u64_to_varint_digits(rows.len() as u64));
    result.children.reserve(columns.len() * (rows.len() + 1));
    for key in columns {
        result.children.push(dump_value(key));
        for row in rows {
            let cell = match row {
                Value::Object(map) => map.get(key),
                _ => None,
            };
            result.children.push(match cell {
                Some(value) => dump_value(value),
                None => Proxy::leaf(CON_UNSPECIFIED),
            });
        }
    }
    result
}

fn dump_object(map: &VecMap<Value, Value>) -> Proxy {
    let mut result = framed(TYPE_OBJECT, map.len(), Bytes::new(), IMM_LEN_MAX_WIDE);
    result.children.reserve(map.len() * 2);
    for (key, value) in map.iter() {
        result.children.push(dump_value(key));
        result.children.push(dump_value(value));
    }
    result
}

/// Maps a delta onto the class-0xB ladder, mirroring the integer forms.
fn delta_record(delta: i64) -> (u8, SmallVec<[u8; 8]>) {
    if (0..=DELTA_IMM_MAX).contains(&delta) {
        (TYPE_DELTA | delta as u8, SmallVec::new())
    } else if (-0x5..=-0x1).contains(&delta) {
        (TYPE_DELTA | (delta + 11) as u8, SmallVec::new())
    } else if (-0x80..=0x7f).contains(&delta) {
        (DELTA_I8, u64_to_be_digits(delta as u64, 1))
    } else if (-0x8000..=0x7fff).contains(&delta) {
        (DELTA_I16, u64_to_be_digits(delta as u64, 2))
    } else if (-0x8000_0000..=-0x0020_0000).contains(&delta)
        || (0x0020_0000..=0x7fff_ffff).contains(&delta)
    {
        (DELTA_I32, u64_to_be_digits(delta as u64, 4))
    } else if delta >= 0 {
        (DELTA_VAR, u64_to_varint_digits(delta as u64))
    } else {
        (DELTA_VAR_NEG, u64_to_varint_digits(delta.unsigned_abs()))
    }
}
