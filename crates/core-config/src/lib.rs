//! Configuration loading and parsing.
//!
//! Parses `termblock.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [terminal]
//! tag = "terminal"
//! header = "Terminal"
//! escape = false
//! ```
//!
//! Every field is optional. Defaults register the block as `terminal`, omit
//! the header and interpolate content verbatim. Unknown fields are ignored
//! (TOML deserialization tolerance). A missing file yields defaults; a file
//! that fails to parse also yields defaults after a `config` warning.

use anyhow::Result;
use core_render::RenderOptions;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "termblock.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    #[serde(default = "TerminalConfig::default_tag")]
    pub tag: String,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub escape: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            tag: Self::default_tag(),
            header: None,
            escape: false,
        }
    }
}

impl TerminalConfig {
    fn default_tag() -> String {
        "terminal".to_string()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub terminal: TerminalConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    // Prefer a local `termblock.toml` next to the site sources.
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("termblock").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        debug!(target: "config", path = %path.display(), "config_absent_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            debug!(
                target: "config",
                path = %path.display(),
                tag = file.terminal.tag.as_str(),
                header = file.terminal.header.as_deref(),
                escape = file.terminal.escape,
                "config_loaded"
            );
            Ok(Config {
                raw: Some(content),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Name the terminal block is registered under.
    pub fn tag_name(&self) -> &str {
        &self.file.terminal.tag
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            header: self.file.terminal.header.clone(),
            escape: self.file.terminal.escape,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert!(cfg.raw.is_none());
        assert_eq!(cfg.tag_name(), "terminal");
        assert_eq!(cfg.render_options(), RenderOptions::default());
    }

    #[test]
    fn parses_terminal_section() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[terminal]\ntag = \"console\"\nheader = \"Terminal\"\nescape = true\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.tag_name(), "console");
        assert_eq!(
            cfg.render_options(),
            RenderOptions {
                header: Some("Terminal".into()),
                escape: true,
            }
        );
        assert!(cfg.raw.is_some());
    }

    #[test]
    fn partial_section_keeps_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[terminal]\nheader = \"bash\"\n[unrelated]\nx = 1\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.tag_name(), "terminal");
        assert_eq!(cfg.file.terminal.header.as_deref(), Some("bash"));
        assert!(!cfg.file.terminal.escape);
    }

    #[test]
    fn parse_error_logs_and_falls_back() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[terminal]\nescape = \"maybe\"\n").unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::WARN)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || load_from(Some(tmp.path().to_path_buf()))).unwrap();

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("config_parse_failed_using_defaults"));
        assert!(!cfg.file.terminal.escape);
        assert!(cfg.raw.is_none());
    }
}
