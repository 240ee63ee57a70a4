use crate::config::{LoggingConfig, Section};
use crate::paths::resolve_log_path;
use std::collections::HashMap;
use std::{
    io::Write,
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::{filter::Targets, fmt};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

// -------- level helpers --------

fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

fn level_filter(s: &str) -> LevelFilter {
    parse_tracing_level(s)
        .map(LevelFilter::from_level)
        .unwrap_or(LevelFilter::OFF)
}

/// Returns true if target == crate_name or target starts with "crate_name::"
fn matches_crate_prefix(target: &str, crate_name: &str) -> bool {
    target == crate_name
        || (target.starts_with(crate_name) && target[crate_name.len()..].starts_with("::"))
}

// -------- rotating writer for files --------

#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

#[derive(Clone)]
struct RotWriterHandle(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().unwrap().flush()
    }
}

// A writer handle that may be None (drops writes)
#[derive(Clone)]
struct RoutedWriterHandle(Option<RotWriterHandle>);

impl Write for RoutedWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.0 {
            Some(w) => w.write(buf),
            None => Ok(buf.len()), // drop silently
        }
    }
    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.0 {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

/// Route log records to per-subsystem files by target prefix, falling back
/// to the "default" section's file.
struct FileRouter {
    default: Option<RotWriter>,
    by_prefix: HashMap<String, RotWriter>,
}

impl FileRouter {
    fn resolve_for(&self, target: &str) -> Option<RotWriterHandle> {
        for (crate_name, wr) in &self.by_prefix {
            if matches_crate_prefix(target, crate_name) {
                return Some(RotWriterHandle(wr.0.clone()));
            }
        }
        self.default.as_ref().map(|w| RotWriterHandle(w.0.clone()))
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_prefix.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = RoutedWriterHandle;

    fn make_writer(&'a self) -> Self::Writer {
        RoutedWriterHandle(self.default.as_ref().map(|w| RotWriterHandle(w.0.clone())))
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        RoutedWriterHandle(self.resolve_for(meta.target()))
    }
}

/// Create a rotating writer for a section's log file, ensuring the parent
/// directory exists. Relative paths are resolved against `base_dir`.
fn create_section_writer(name: &str, section: &Section, base_dir: &Path) -> Option<RotWriter> {
    if section.file.trim().is_empty() {
        return None;
    }

    let log_path = resolve_log_path(&section.file, base_dir);
    if let Some(parent) = log_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!(
                "Failed to create log dir for '{}': {} ({})",
                name,
                parent.display(),
                e
            );
            return None;
        }
    }

    let max_bytes = section.max_size_mb.unwrap_or(100) as usize * 1024 * 1024;
    let max_backups = section.max_backups.unwrap_or(3);

    let rot = FileRotate::new(
        &log_path,
        AppendTimestamp::default(FileLimit::MaxFiles(max_backups)),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None, // file permissions (Unix only)
    );

    Some(RotWriter(Arc::new(Mutex::new(rot))))
}

// -------- public init --------

/// Initialize logging from a configuration.
/// - `cfg`: LoggingConfig containing the logging sections
/// - `base_dir`: base directory used to resolve relative log file paths (usually server.home_dir)
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    use tracing_subscriber::{layer::SubscriberExt, prelude::*, Registry};

    // Bridge `log` → `tracing` *before* installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    let default_section = cfg.get("default");
    let subsystem_sections: Vec<(&String, &Section)> =
        cfg.iter().filter(|(k, _)| k.as_str() != "default").collect();

    // Console: one layer, Targets carry the default level plus per-subsystem overrides.
    let mut console_targets = Targets::new().with_default(
        default_section
            .map(|s| level_filter(&s.console_level))
            .unwrap_or(LevelFilter::INFO),
    );
    for &(name, section) in &subsystem_sections {
        console_targets =
            console_targets.with_target(name.as_str(), level_filter(&section.console_level));
    }

    let ansi = atty::is(atty::Stream::Stdout);
    let console_layer = fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(console_targets);

    // Files: JSON lines routed per subsystem, falling back to the default file.
    let mut router = FileRouter {
        default: default_section.and_then(|s| create_section_writer("default", s, base_dir)),
        by_prefix: HashMap::new(),
    };
    let mut file_targets = Targets::new().with_default(match (&router.default, default_section) {
        (Some(_), Some(s)) => level_filter(&s.file_level),
        _ => LevelFilter::OFF,
    });
    for &(name, section) in &subsystem_sections {
        if let Some(writer) = create_section_writer(name, section, base_dir) {
            router.by_prefix.insert(name.clone(), writer);
            file_targets =
                file_targets.with_target(name.as_str(), level_filter(&section.file_level));
        }
    }

    if router.is_empty() {
        let _ = Registry::default().with(console_layer).try_init();
        return;
    }

    let file_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(router)
        .with_filter(file_targets);

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

fn init_default_logging() {
    let _ = fmt()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}

// =================== tests ===================
