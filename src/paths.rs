use std::path::PathBuf;
use std::sync::OnceLock;

/// XDG-compliant directory layout for spinclass.
///
/// On Linux this follows the XDG Base Directory Specification:
///   Config:  $XDG_CONFIG_HOME/spinclass  (~/.config/spinclass)
///   Data:    $XDG_DATA_HOME/spinclass    (~/.local/share/spinclass)
///
/// On macOS both live under ~/Library/Application Support/spinclass.
///
/// The `dirs` crate handles platform detection. We cache the resolved
/// base paths in static OnceLock cells so directory lookup only happens once.

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Root data directory: $XDG_DATA_HOME/spinclass
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spinclass")
    })
}

/// Root config directory: $XDG_CONFIG_HOME/spinclass
pub fn config_dir() -> &'static PathBuf {
    CONFIG_DIR.get_or_init(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spinclass")
    })
}

/// Config file path: <config_dir>/config.toml
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Log file path: <data_dir>/spinclass.log
///
/// The TUI owns stdout while a ride is running, so logs go here instead.
pub fn log_file() -> PathBuf {
    data_dir().join("spinclass.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_app_name() {
        assert!(data_dir().ends_with("spinclass"));
    }

    #[test]
    fn config_dir_ends_with_app_name() {
        assert!(config_dir().ends_with("spinclass"));
    }

    #[test]
    fn config_file_structure() {
        assert!(config_file().ends_with("spinclass/config.toml"));
    }

    #[test]
    fn log_file_structure() {
        assert!(log_file().ends_with("spinclass/spinclass.log"));
    }
}
