use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Something that can hand over the raw header text of one message.
///
/// Failures here belong to the caller's own error path; they are never turned
/// into a verdict.
pub trait HeaderSource {
    /// Short label used in history rows and panel titles.
    fn label(&self) -> String;

    fn fetch_raw_headers(&self) -> Result<String>;
}

/// Keep only the header block of a full message.
///
/// Header-only input comes back unchanged. If mailparse rejects the input the
/// whole text is kept and left to the lenient header parser.
pub fn header_block(raw: &[u8]) -> String {
    match mailparse::parse_headers(raw) {
        Ok((_headers, body_start)) => String::from_utf8_lossy(&raw[..body_start]).into_owned(),
        Err(e) => {
            log::debug!("mailparse could not find the header block ({e}); keeping full text");
            String::from_utf8_lossy(raw).into_owned()
        }
    }
}

/// How raw input is turned into header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A full message: everything after the header block is body and dropped.
    Message,
    /// Bare header text: blank lines only separate blocks, nothing is dropped.
    Dump,
}

impl InputKind {
    /// `.eml` files are messages; any other file is read as a header dump.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("eml") => InputKind::Message,
            _ => InputKind::Dump,
        }
    }

    fn prepare(self, raw: &[u8]) -> String {
        match self {
            InputKind::Message => header_block(raw),
            InputKind::Dump => String::from_utf8_lossy(raw).into_owned(),
        }
    }
}

/// A `.eml` file or a saved header dump.
pub struct FileSource {
    path: PathBuf,
    kind: InputKind,
}

impl FileSource {
    /// Input kind follows the file extension, see [`InputKind::for_path`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = InputKind::for_path(&path);
        Self { path, kind }
    }

    pub fn with_kind(path: impl Into<PathBuf>, kind: InputKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HeaderSource for FileSource {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_raw_headers(&self) -> Result<String> {
        let raw = std::fs::read(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        Ok(self.kind.prepare(&raw))
    }
}

/// Standard input, read in full on first fetch.
pub struct StdinSource {
    cached: std::cell::OnceCell<Vec<u8>>,
    kind: InputKind,
}

impl StdinSource {
    pub fn new(kind: InputKind) -> Self {
        Self {
            cached: std::cell::OnceCell::new(),
            kind,
        }
    }
}

impl HeaderSource for StdinSource {
    fn label(&self) -> String {
        "<stdin>".to_string()
    }

    fn fetch_raw_headers(&self) -> Result<String> {
        if let Some(raw) = self.cached.get() {
            return Ok(self.kind.prepare(raw));
        }
        let mut raw = Vec::new();
        std::io::stdin()
            .read_to_end(&mut raw)
            .context("reading standard input")?;
        let raw = self.cached.get_or_init(|| raw);
        Ok(self.kind.prepare(raw))
    }
}

/// Pick a source from a CLI path argument; `None` or `-` means stdin.
///
/// With `dump` set the input is always a header dump. Otherwise stdin is a
/// message and files go by extension.
pub fn from_arg(path: Option<&Path>, dump: bool) -> Box<dyn HeaderSource> {
    match path {
        Some(p) if p != Path::new("-") => {
            if dump {
                Box::new(FileSource::with_kind(p, InputKind::Dump))
            } else {
                Box::new(FileSource::new(p))
            }
        }
        _ if dump => Box::new(StdinSource::new(InputKind::Dump)),
        _ => Box::new(StdinSource::new(InputKind::Message)),
    }
}
