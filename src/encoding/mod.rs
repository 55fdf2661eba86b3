//! # JKSN binary encoder and decoder
//!
//! Encode and decode functions for [`Value`] trees.
//!
//! # Example
//!
//! ```
//! use jksn::prelude::*;
//!
//! let value = Value::from(vec![Value::from(100), Value::from("hello")]);
//!
//! // one-shot helpers construct a fresh codec instance per call
//! let enc = encode_full(&value, false);
//! let dec = decode_full(enc.as_slice(), false).unwrap();
//!
//! assert_eq!(dec, value);
//! ```
//!
//! [`Encoder`] and [`Decoder`] instances keep their dedup caches alive
//! across calls, so a sequence of values encoded through one instance
//! must be decoded through one instance in the same order.

use crate::{errors::DecodingError, Value};
use bytes::{Buf, Bytes};

mod constants;
pub(crate) use constants::*;
pub mod de;
pub mod ser;
pub use de::Decoder;
pub use ser::Encoder;

/// Optional stream magic emitted before the first value.
pub const MAGIC: [u8; 3] = *b"jk!";

/// Per-instance codec state: the delta anchor and the two 256-slot dedup
/// tables. The encoder stores wire payloads; the decoder stores the
/// decoded bytes under the hash of the wire payload, keeping the two
/// views in lockstep.
pub(crate) struct Cache {
    pub(crate) lastint: Option<i64>,
    pub(crate) texthash: [Option<Bytes>; 256],
    pub(crate) blobhash: [Option<Bytes>; 256],
}

impl Default for Cache {
    fn default() -> Cache {
        Cache {
            lastint: None,
            texthash: std::array::from_fn(|_| None),
            blobhash: std::array::from_fn(|_| None),
        }
    }
}

/// Encodes a [`Value`] into a vector of bytes through a fresh [`Encoder`].
///
/// # Arguments
///
/// * `value` - A reference to the [`Value`] to be encoded.
/// * `header` - Whether to prepend the `jk!` magic.
///
/// # Example
///
/// ```
/// use jksn::prelude::*;
///
/// let enc: Vec<u8> = encode_full(&Value::Null, false);
/// assert_eq!(enc, vec![0x01]);
/// ```
pub fn encode_full(value: &Value, header: bool) -> Vec<u8> {
    Encoder::new().encode(value, header)
}

/// Decodes one value from a buffer through a fresh [`Decoder`], returning
/// a [`DecodingError`] if decoding fails.
///
/// # Arguments
///
/// * `data` - A buffer containing a binary encoded value.
/// * `header` - Whether to consume a leading `jk!` magic when present.
///
/// # Example
///
/// ```
/// use jksn::prelude::*;
///
/// let dec = decode_full([0x01u8].as_slice(), false).unwrap();
/// assert_eq!(dec, Value::Null);
/// ```
pub fn decode_full<B: Buf>(mut data: B, header: bool) -> Result<Value, DecodingError> {
    Decoder::new().decode(&mut data, header)
}
