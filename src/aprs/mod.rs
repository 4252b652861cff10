pub mod packet;
pub mod position;

pub use packet::{PositionReport, source_address};
pub use position::{Axis, EncodedPosition, build_comment, encode_coordinate};
