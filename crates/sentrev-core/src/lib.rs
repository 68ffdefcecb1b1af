pub mod annotation;
pub mod codec;
pub mod schema;

pub use annotation::{Annotation, AskUnit, ReviewField};
pub use codec::{CodecError, decode, encode};
