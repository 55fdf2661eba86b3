/// Type-class mask, 0xf0
pub(crate) const MASK_CLASS: u8 = 0b1111_0000;
/// Immediate/variant mask, 0x0f
pub(crate) const MASK_META: u8 = 0b0000_1111;

/// Specials class bits
pub(crate) const TYPE_CON: u8 = 0x00;
/// `Undefined` constant
pub(crate) const CON_UNDEFINED: u8 = 0x00;
/// `Null` constant
pub(crate) const CON_NULL: u8 = 0x01;
/// `false` constant
pub(crate) const CON_FALSE: u8 = 0x02;
/// `true` constant
pub(crate) const CON_TRUE: u8 = 0x03;
/// Reserved JSON literal passthrough, always rejected
pub(crate) const CON_JSON: u8 = 0x0f;

/// Integer class bits
pub(crate) const TYPE_INT: u8 = 0x10;
/// Largest integer encodable in the control byte itself
pub(crate) const INT_IMM_MAX: i64 = 0x0a;
/// 4-byte big-endian signed integer follows
pub(crate) const INT_I32: u8 = 0x1b;
/// 2-byte big-endian signed integer follows
pub(crate) const INT_I16: u8 = 0x1c;
/// 1-byte signed integer follows
pub(crate) const INT_I8: u8 = 0x1d;
/// Varint of the magnitude of a negative integer follows
pub(crate) const INT_VAR_NEG: u8 = 0x1e;
/// Varint of a non-negative integer follows
pub(crate) const INT_VAR: u8 = 0x1f;

/// Float class bits; the bare class byte is NaN
pub(crate) const TYPE_FLOAT: u8 = 0x20;
/// Not-a-number, no payload
pub(crate) const FLOAT_NAN: u8 = 0x20;
/// Extended-precision float, declined by this build
pub(crate) const FLOAT_LONG_DOUBLE: u8 = 0x2b;
/// 8-byte big-endian binary64 follows
pub(crate) const FLOAT_DOUBLE: u8 = 0x2c;
/// 4-byte big-endian binary32 follows
pub(crate) const FLOAT_SINGLE: u8 = 0x2d;
/// Negative infinity, no payload
pub(crate) const FLOAT_NEG_INF: u8 = 0x2e;
/// Positive infinity, no payload
pub(crate) const FLOAT_POS_INF: u8 = 0x2f;

/// UTF-16LE string class bits
pub(crate) const TYPE_UTF16: u8 = 0x30;
/// UTF-8 string class bits
pub(crate) const TYPE_UTF8: u8 = 0x40;
/// Blob class bits
pub(crate) const TYPE_BLOB: u8 = 0x50;
/// Straight array class bits
pub(crate) const TYPE_ARRAY: u8 = 0x80;
/// Object class bits
pub(crate) const TYPE_OBJECT: u8 = 0x90;
/// Column-swapped array class bits
pub(crate) const TYPE_SWAP: u8 = 0xa0;
/// Integer delta class bits
pub(crate) const TYPE_DELTA: u8 = 0xb0;

/// 1-byte hash reference, shared by the string and blob classes
pub(crate) const STR_HASHREF: u8 = 0x3c;
/// Reserved: the blob-class nibble a hash reference would otherwise use
pub(crate) const BLOB_RESERVED: u8 = 0x5c;
/// `Unspecified` sentinel, also the bare swap class byte
pub(crate) const CON_UNSPECIFIED: u8 = 0xa0;

/// Length-form selector: u16 length follows
pub(crate) const LEN_U16: u8 = 0x0d;
/// Length-form selector: u8 length follows
pub(crate) const LEN_U8: u8 = 0x0e;
/// Length-form selector: varint length follows
pub(crate) const LEN_VAR: u8 = 0x0f;

/// Largest immediate length for UTF-16 strings and blobs
pub(crate) const IMM_LEN_MAX: usize = 0x0b;
/// Largest immediate length for UTF-8 strings, arrays, objects, and
/// swap column counts
pub(crate) const IMM_LEN_MAX_WIDE: usize = 0x0c;

/// Largest non-negative delta encodable in the control byte
pub(crate) const DELTA_IMM_MAX: i64 = 0x05;
/// 4-byte big-endian signed delta follows
pub(crate) const DELTA_I32: u8 = 0xbb;
/// 2-byte big-endian signed delta follows
pub(crate) const DELTA_I16: u8 = 0xbc;
/// 1-byte signed delta follows
pub(crate) const DELTA_I8: u8 = 0xbd;
/// Varint of the magnitude of a negative delta follows
pub(crate) const DELTA_VAR_NEG: u8 = 0xbe;
/// Varint of a non-negative delta follows
pub(crate) const DELTA_VAR: u8 = 0xbf;
