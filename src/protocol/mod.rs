mod error;
mod parser;
mod step;

pub use error::ProtocolError;
pub use parser::{parse, strip_code_fence};
pub use step::Step;
