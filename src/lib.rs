//! # JKSN
//!
//! A compact binary serialization format for a JSON superset. Values are
//! dynamically typed trees of [`Value`]; [`encoding`] turns them into
//! byte streams and back.
//!
//! ```
//! use jksn::prelude::*;
//!
//! let record: VecMap<Value, Value> = vec![
//!     (Value::from("id"), Value::from(42)),
//!     (Value::from("name"), Value::from("example")),
//! ]
//! .into_iter()
//! .collect();
//!
//! let value = Value::Object(record);
//! let bytes = encode_full(&value, true);
//! let back = decode_full(bytes.as_slice(), true).unwrap();
//!
//! assert_eq!(back, value);
//! ```

/// Binary encoder and decoder.
pub mod encoding;
/// Error types.
pub mod errors;
/// Floating point variants.
pub mod float;
/// Prelude
pub mod prelude;
/// UTF-8 / UTF-16LE transcoding.
pub mod unicode;
/// Byte-level wire primitives and helper macros.
pub mod util;
/// A map wrapper around a sorted vector of pairs.
pub mod vecmap;

pub use bytes::Bytes;
pub use float::Float;
pub use vecmap::VecMap;

use std::convert::TryFrom;

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
/// JKSN value types.
pub enum Value {
    /// The `undefined` sentinel.
    Undefined,
    /// Null type. Equivalent to `None`.
    Null,
    /// Boolean type.
    Bool(bool),
    /// Integer type.
    Int(i64),
    /// Floating point type, stored as IEEE-754 bits.
    Float(Float),
    /// String type, a UTF-8 byte sequence.
    Str(Bytes),
    /// Opaque bytestring type.
    Blob(Bytes),
    /// Array type.
    Array(Vec<Value>),
    /// Object type, a map ordered by key.
    Object(VecMap<Value, Value>),
    /// The absent-cell sentinel of column-swapped arrays.
    Unspecified,
}

impl Value {
    /// Converts a static bytestring literal to a `Value` blob.
    ///
    /// # Example
    ///
    /// ```
    /// use jksn::Value;
    ///
    /// let blob = Value::from_static(b"raw bytes");
    /// assert!(blob.to_blob().is_some());
    /// ```
    pub fn from_static(bytes: &'static [u8]) -> Value { Value::Blob(Bytes::from_static(bytes)) }

    /// Indicates whether a value is `Null`.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            _ => false,
        }
    }

    /// Indicates whether a value is `Undefined`.
    pub fn is_undefined(&self) -> bool {
        match self {
            Value::Undefined => true,
            _ => false,
        }
    }

    /// Indicates whether a value is the `Unspecified` sentinel.
    pub fn is_unspecified(&self) -> bool {
        match self {
            Value::Unspecified => true,
            _ => false,
        }
    }

    /// Tries to convert a value to a `bool`.
    /// This will return `None` if the value is not a boolean.
    ///
    /// # Example
    ///
    /// ```
    /// use jksn::Value;
    ///
    /// assert_eq!(Value::from(true).to_bool(), Some(true));
    /// ```
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Tries to convert a value to an `i64`.
    /// This will return `None` if the value is not an integer.
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Tries to convert a value to a [`Float`].
    /// This will return `None` if the value is not a float.
    pub fn to_float(&self) -> Option<Float> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the UTF-8 byte view of a string value.
    /// This will return `None` if the value is not a string.
    ///
    /// # Example
    ///
    /// ```
    /// use jksn::Value;
    ///
    /// let greeting = Value::from("hello");
    /// assert_eq!(&greeting.to_str().unwrap()[..], b"hello");
    /// ```
    pub fn to_str(&self) -> Option<&Bytes> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a string value as `&str` when its bytes are well-formed
    /// UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => std::str::from_utf8(s).ok(),
            _ => None,
        }
    }

    /// Returns the bytes of a blob value.
    /// This will return `None` if the value is not a blob.
    pub fn to_blob(&self) -> Option<&Bytes> {
        match self {
            Value::Blob(b) => Some(b),
            _ => None,
        }
    }

    /// Converts a value to a vector of `Value`.
    /// This will return `None` if the value is not an array.
    ///
    /// # Example
    ///
    /// ```
    /// use jksn::Value;
    ///
    /// let numbers = Value::from(vec![1i64, 2, 3]);
    /// assert_eq!(numbers.to_vec().unwrap().len(), 3);
    /// ```
    pub fn to_vec(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Consumes a value, converting it into a vector of `Value`.
    /// This will return `None` if the value is not an array.
    pub fn into_vec(self) -> Option<Vec<Value>> { self.try_into_ok() }

    /// Converts a value to a [`VecMap`].
    /// This will return `None` if the value is not an object.
    pub fn to_vecmap(&self) -> Option<&VecMap<Value, Value>> {
        match self {
            Value::Object(m) => Some(m),
            _ => None,
        }
    }

    /// Consumes a value, converting it into a [`VecMap`].
    /// This will return `None` if the value is not an object.
    pub fn into_vecmap(self) -> Option<VecMap<Value, Value>> { self.try_into_ok() }

    fn try_into_ok<T: TryFrom<Value>>(self) -> Option<T> { T::try_from(self).ok() }
}

macro_rules! try_from_ctor {
    ($from:ty, $to:ty, $ctor:path) => {
        impl TryFrom<$from> for $to {
            type Error = $from;

            fn try_from(from: $from) -> Result<$to, $from> {
                match from {
                    $ctor(a) => Ok(a),
                    f => Err(f),
                }
            }
        }
    };
}

from_fn!(Value, bool, Value::Bool);
try_from_ctor!(Value, bool, Value::Bool);
from_fn!(Value, i64, Value::Int);
try_from_ctor!(Value, i64, Value::Int);
from_fn!(Value, Float, Value::Float);
try_from_ctor!(Value, Float, Value::Float);
from_fn!(Value, Bytes, Value::Blob);

try_from_ctor!(Value, Vec<Value>, Value::Array);
try_from_ctor!(Value, VecMap<Value, Value>, Value::Object);

compose_from!(Value, Float, f32);
compose_from!(Value, Float, f64);

from_as!(Value, i8, i64);
from_as!(Value, i16, i64);
from_as!(Value, i32, i64);
from_as!(Value, u8, i64);
from_as!(Value, u16, i64);
from_as!(Value, u32, i64);

impl From<String> for Value {
    fn from(s: String) -> Value { Value::Str(Bytes::from(s)) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value { Value::Str(Bytes::copy_from_slice(s.as_bytes())) }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value { Value::Array(v.into_iter().map(T::into).collect()) }
}

impl From<VecMap<Value, Value>> for Value {
    fn from(m: VecMap<Value, Value>) -> Value { Value::Object(m) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_tests() {
        assert!(Value::Null.is_null());
        assert!(Value::Undefined.is_undefined());
        assert!(Value::Unspecified.is_unspecified());

        assert_eq!(Value::from(5).to_int(), Some(5));
        assert!(Value::from(true).to_bool().unwrap());
        assert_eq!(
            Value::from_static(b"word").to_blob().unwrap(),
            &Bytes::from_static(b"word")
        );
        assert_eq!(Value::from("word").as_str(), Some("word"));
    }

    #[test]
    fn from_vec() {
        let v = vec![0i64, 1, 2, 3, 4];
        let val = Value::from(v);
        assert_eq!(val.to_vec().map(Vec::len), Some(5));
        assert_eq!(val.into_vec().map(|v| v.len()), Some(5));
    }

    #[test]
    fn object_round_trip_conversions() {
        let map: VecMap<Value, Value> =
            vec![(Value::from("k"), Value::from(1))].into_iter().collect();
        let val = Value::from(map.clone());
        assert_eq!(val.to_vecmap(), Some(&map));
        assert_eq!(val.into_vecmap(), Some(map));
    }
}
