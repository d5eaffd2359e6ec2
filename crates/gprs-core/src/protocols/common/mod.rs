pub mod error;
pub mod reader;
pub mod value;

pub use error::FieldError;
pub use reader::Cursor;
pub use value::Voltage;
