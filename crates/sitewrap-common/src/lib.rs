pub mod errors;
pub mod token;

pub use errors::{ConfigError, PlatformError, ShellError};
pub use token::{next_token, WindowToken};

pub type Result<T> = std::result::Result<T, ShellError>;
