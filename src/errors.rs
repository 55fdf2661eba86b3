use std::{error::Error, fmt, io};

#[derive(Debug, Clone)]
pub struct EncodingError(pub String);

impl EncodingError {
    pub fn new(s: &str) -> Self { EncodingError(s.to_string()) }
}

impl Error for EncodingError {}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Encoding failed with error: {}", self.0)
    }
}

impl From<io::Error> for EncodingError {
    fn from(e: io::Error) -> Self { EncodingError(e.to_string()) }
}

#[derive(Debug, Clone, Default)]
pub struct DecodingError(pub String);

impl DecodingError {
    pub fn new(s: &str) -> Self { DecodingError(s.to_string()) }
}

impl Error for DecodingError {}

impl fmt::Display for DecodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Decoding failed with error: {}", self.0)
    }
}
