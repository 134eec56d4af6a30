use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("badge error: {0}")]
    BadgeError(String),

    #[error("dialog error: {0}")]
    DialogError(String),

    #[error("path error: {0}")]
    PathError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("window error: {0}")]
    Window(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("zoom must be positive".into());
        assert_eq!(
            err.to_string(),
            "config validation error: zoom must be positive"
        );
    }

    #[test]
    fn platform_error_display() {
        let err = PlatformError::BadgeError("dock tile unavailable".into());
        assert_eq!(err.to_string(), "badge error: dock tile unavailable");

        let err = PlatformError::NotSupported("native tabs".into());
        assert_eq!(err.to_string(), "not supported: native tabs");
    }

    #[test]
    fn shell_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let shell_err: ShellError = config_err.into();
        assert!(matches!(shell_err, ShellError::Config(_)));
        assert!(shell_err.to_string().contains("bad toml"));
    }

    #[test]
    fn shell_error_from_platform() {
        let platform_err = PlatformError::DialogError("no display".into());
        let shell_err: ShellError = platform_err.into();
        assert!(matches!(shell_err, ShellError::Platform(_)));
        assert!(shell_err.to_string().contains("no display"));
    }

    #[test]
    fn shell_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let shell_err: ShellError = io_err.into();
        assert!(matches!(shell_err, ShellError::Io(_)));
        assert!(shell_err.to_string().contains("file missing"));
    }

    #[test]
    fn shell_error_other_variants() {
        let err = ShellError::WebView("handler panicked".into());
        assert_eq!(err.to_string(), "webview error: handler panicked");

        let err = ShellError::Window("creation failed".into());
        assert_eq!(err.to_string(), "window error: creation failed");

        let err = ShellError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
