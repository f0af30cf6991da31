mod common;
mod rapsodo;
pub(crate) mod schema;
mod trackman;

pub use rapsodo::RapsodoCsvParser;
pub use schema::PitchColumn;
pub use trackman::TrackmanCsvParser;

pub(crate) use common::{
    normalize_header, parse_date, parse_optional_f64, parse_optional_u32, parse_time,
    LineCounter,
};
