pub mod clock;
pub mod decoder;
pub mod source;

pub use clock::GpsClock;
pub use decoder::{GpsReading, NmeaDecoder};
pub use source::{FixSource, ReaderSource};
