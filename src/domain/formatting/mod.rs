//! Response rendering and output bounds.

mod bounds;
mod formatter;

pub use bounds::{
    validate, FormatViolation, ResponseShape, MAX_BULLETS, MAX_SENTENCES, MAX_WORDS,
};
pub use formatter::ResponseFormatter;
