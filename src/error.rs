use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

/// The host of a request could not be resolved
#[derive(Debug, Clone)]
pub struct Unresolved {
    pub host: String,
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not resolve host: {}", self.host)
    }
}

impl std::error::Error for Unresolved {}

/// What ends up in the error log
#[derive(Debug, Clone)]
pub enum Failure {
    DirectoryAccess(PathBuf),
    DirectoryCreate(PathBuf),
    NetworkResolution { root: String },
    Scrape,
}

impl Failure {
    /// Only DNS failures get their own message, everything else is a scrape
    /// failure.
    pub fn classify(err: &anyhow::Error, root: &str) -> Self {
        if err.chain().any(|cause| cause.is::<Unresolved>()) {
            Self::NetworkResolution {
                root: root.to_string(),
            }
        } else {
            Self::Scrape
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryAccess(dir) => {
                write!(f, "Error accessing directory: {}", dir.display())
            }
            Self::DirectoryCreate(dir) => write!(f, "Error making directory: {}", dir.display()),
            Self::NetworkResolution { root } => write!(
                f,
                "Could not resolve host name for {root} Please check your internet connection."
            ),
            Self::Scrape => write!(f, "Error during scraping process."),
        }
    }
}

/// Append-only error log, one `[date] <message>` line per entry
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, failure: &Failure) -> io::Result<()> {
        log::error!("{failure}");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let date = Local::now().format("%a %b %d %Y %H:%M:%S GMT%z");
        writeln!(file, "[{date}] <{failure}>")
    }
}
