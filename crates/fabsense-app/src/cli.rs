//! CLI argument definitions for the Fabsense assistant.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Fabsense: a fab analytics assistant for yield, equipment and root-cause questions.
#[derive(Parser, Debug)]
#[command(name = "fabsense", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Directory for conversation exports.
    #[arg(short = 'e', long = "export-dir")]
    pub export_dir: Option<PathBuf>,

    /// Seed for reply selection and delays (reproducible sessions).
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Print replies as HTML message bubbles instead of plain text.
    #[arg(long = "html")]
    pub html: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > FABSENSE_CONFIG env var > ~/.fabsense/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("FABSENSE_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Resolve the export directory.
    ///
    /// Priority: --export-dir flag > config file value.
    pub fn resolve_export_dir(&self, config_dir: &std::path::Path) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| config_dir.to_path_buf())
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".fabsense").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".fabsense").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "fabsense",
            "--config",
            "/etc/fabsense.toml",
            "-l",
            "debug",
            "--export-dir",
            "/tmp/out",
            "--seed",
            "7",
            "--html",
        ]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("/etc/fabsense.toml"));
        assert_eq!(args.resolve_log_level("info"), "debug");
        assert_eq!(args.resolve_export_dir(Path::new(".")), PathBuf::from("/tmp/out"));
        assert_eq!(args.seed, Some(7));
        assert!(args.html);
    }

    #[test]
    fn test_defaults_fall_back_to_config() {
        let args = CliArgs::parse_from(["fabsense"]);
        assert_eq!(args.resolve_log_level("warn"), "warn");
        assert_eq!(
            args.resolve_export_dir(Path::new("/var/exports")),
            PathBuf::from("/var/exports")
        );
        assert!(args.seed.is_none());
        assert!(!args.html);
    }
}
