//! File logging for the wizard.
//!
//! Everything goes to `parastudy.log` in the data directory. The file is
//! trimmed at startup once it grows past its size cap.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "parastudy.log";

const ROTATED_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// When to trim the log and how much of its tail survives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub keep_bytes: u64,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            keep_bytes: 1024 * 1024,
        }
    }
}

impl RotationPolicy {
    /// Trim `path` down to its last `keep_bytes`, cut at a line start.
    ///
    /// Returns whether the file was rewritten. A missing file is not an error.
    pub fn apply(&self, path: &Path) -> io::Result<bool> {
        let len = match fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if len <= self.max_bytes {
            return Ok(false);
        }

        let tail = read_tail(path, len.saturating_sub(self.keep_bytes))?;
        let mut rotated = ROTATED_MARKER.to_vec();
        rotated.extend_from_slice(whole_lines(&tail));

        let scratch = path.with_extension("log.rotating");
        fs::write(&scratch, &rotated)?;
        fs::rename(&scratch, path)?;
        Ok(true)
    }
}

fn read_tail(path: &Path, from: u64) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(from))?;
    let mut tail = Vec::new();
    file.read_to_end(&mut tail)?;
    Ok(tail)
}

/// Drop a partial first line
fn whole_lines(tail: &[u8]) -> &[u8] {
    match tail.iter().position(|&b| b == b'\n') {
        Some(newline) => &tail[newline + 1..],
        None => tail,
    }
}

fn default_directives(level: &str) -> String {
    format!("parastudy={level},parastudy_core=warn")
}

/// Install the global subscriber writing to `{data_dir}/parastudy.log`.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join(LOG_FILE_NAME);

    if let Err(e) = RotationPolicy::default().apply(&log_path) {
        eprintln!("Warning: could not trim {}: {}", log_path.display(), e);
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!(log_path = %log_path.display(), "Parastudy logging initialized");
    Ok(())
}
