//! A prelude containing the types needed to work with encoded values.

pub use crate::{
    encoding::{decode_full, encode_full, Decoder, Encoder, MAGIC},
    errors::{DecodingError, EncodingError},
    float::Float,
    vecmap::VecMap,
    Value,
};
pub use bytes::Bytes;
