pub mod error;
pub mod module;
pub mod time;

pub use error::ServiceError;
pub use module::Module;
pub use time::parse_timestamp;
