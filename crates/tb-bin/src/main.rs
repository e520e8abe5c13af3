//! termblock entrypoint: render one terminal block from a file or stdin.
use anyhow::{Context, Result};
use clap::Parser;
use core_config::{Config, load_from};
use core_plugin::{TagRegistry, TerminalTag};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "termblock", version, about = "Terminal-window markup for static sites")] // minimal metadata
struct Args {
    /// Already-rendered block content. Read from stdin when omitted.
    pub path: Option<PathBuf>,
    /// Prompt token repeated in the left column; empty disables the column.
    #[arg(long, short, default_value = "", allow_hyphen_values = true)]
    pub prompt: String,
    /// Tag name to dispatch (defaults to the configured name).
    #[arg(long)]
    pub tag: Option<String>,
    /// Optional configuration file path (overrides discovery of `termblock.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Title bar text (overrides `[terminal] header`).
    #[arg(long)]
    pub header: Option<String>,
    /// HTML-escape prompt and content before interpolation.
    #[arg(long)]
    pub escape: bool,
    /// Write tracing output to this file instead of stderr.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

struct AppStartup {
    // Flushes the non-blocking log writer on drop.
    _log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { _log_guard: None }
    }

    fn configure_logging(&mut self, log_file: Option<&Path>) -> Result<()> {
        let builder =
            tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env());
        match log_file {
            Some(path) => {
                let dir = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(Path::new("."));
                let name = path
                    .file_name()
                    .with_context(|| format!("log file path has no file name: {}", path.display()))?;
                let file_appender = tracing_appender::rolling::never(dir, name);
                let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
                match builder.with_ansi(false).with_writer(nb_writer).try_init() {
                    Ok(_) => {
                        self._log_guard = Some(guard);
                    }
                    Err(_err) => {
                        // Global tracing subscriber already installed; drop guard so writer shuts down.
                    }
                }
            }
            None => {
                let _ = builder.with_writer(io::stderr).try_init();
            }
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// Apply CLI overrides on top of the loaded configuration.
fn effective_config(mut config: Config, args: &Args) -> Config {
    if let Some(header) = args.header.as_ref() {
        config.file.terminal.header = Some(header.clone());
    }
    if args.escape {
        config.file.terminal.escape = true;
    }
    config
}

fn build_registry(config: &Config) -> Result<TagRegistry> {
    TagRegistry::builder()
        .register(
            config.tag_name(),
            TerminalTag::with_options(config.render_options()),
        )
        .build()
        .context("building tag registry")
}

fn read_content(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading block content from {}", path.display())),
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("reading block content from stdin")?;
            Ok(content)
        }
    }
}

fn render_block(args: &Args, content: &str) -> Result<String> {
    let config = effective_config(load_from(args.config.clone())?, args);
    let registry = build_registry(&config)?;
    let tag = args.tag.as_deref().unwrap_or(config.tag_name());
    info!(
        target: "runtime",
        tag,
        prompt = args.prompt.as_str(),
        content_bytes = content.len(),
        header = config.file.terminal.header.as_deref(),
        escape = config.file.terminal.escape,
        "render_block"
    );
    registry.render(tag, &args.prompt, &content)
}

fn run(args: &Args) -> Result<()> {
    let content = read_content(args.path.as_deref())?;
    let markup = render_block(args, &content)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{markup}").context("writing markup to stdout")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging(args.log_file.as_deref())?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let result = run(&args);
    if let Err(e) = &result {
        error!(target: "runtime", error = %e, "render_failed");
    }
    result
}
