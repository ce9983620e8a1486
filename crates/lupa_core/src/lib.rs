mod error;
pub mod jpeg;
mod traits;
mod types;

pub use error::{CoreError, Result};
pub use traits::ByteSource;
pub use types::FileType;
