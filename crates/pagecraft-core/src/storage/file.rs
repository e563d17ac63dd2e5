//! One JSON file per page in a directory.
//!
//! The blocking `*_page` methods do the actual disk work; the [`Storage`]
//! impl wraps them for callers that are fine running I/O inline (the CLI and
//! tests). Async servers should move them onto a blocking pool instead.

use super::{slug_owner, sort_summaries, BoxFuture, PageSummary, Storage, StorageError, StorageResult};
use crate::page::Page;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// File name for a page id. Anything outside `[A-Za-z0-9_-]` becomes `_`.
fn file_name(id: &str) -> String {
    let stem: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{stem}.{EXTENSION}")
}

/// Replace `path` through a temporary sibling. If `write` fails, the old
/// file is left as it was and the temporary is removed.
fn write_atomic(path: &Path, write: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        let out: &mut dyn Write = &mut writer;
        write(out)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl FileStorage {
    /// Open (and create if needed) a page directory.
    pub fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).map_err(io_error(&base_path))?;
        Ok(Self { base_path })
    }

    /// `pagecraft/pages` under the user's local data directory.
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Other("could not determine a data directory".to_string()))?;
        Self::new(base.join("pagecraft").join("pages"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn page_path(&self, id: &str) -> PathBuf {
        self.base_path.join(file_name(id))
    }

    pub fn read_page(&self, id: &str) -> StorageResult<Page> {
        let path = self.page_path(id);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(id.to_string()));
            }
            Err(e) => return Err(io_error(&path)(e)),
        };
        let page: Page = serde_json::from_reader(BufReader::new(file))?;
        for violation in page.content.violations() {
            log::warn!("page {}: {}", page.id, violation);
        }
        Ok(page)
    }

    pub fn write_page(&self, page: &Page) -> StorageResult<()> {
        if let Some(owner) = slug_owner(self.summaries()?.iter(), page) {
            return Err(StorageError::SlugTaken {
                slug: page.slug.clone(),
                existing: owner.id.clone(),
            });
        }
        let path = self.page_path(&page.id);
        write_atomic(&path, |out| Ok(serde_json::to_writer_pretty(out, page)?)).map_err(io_error(&path))?;
        log::debug!("wrote page {} to {}", page.id, path.display());
        Ok(())
    }

    pub fn remove_page(&self, id: &str) -> StorageResult<()> {
        let path = self.page_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    /// Summaries of every readable page file. Unreadable files are skipped
    /// with a warning so one bad file does not hide the rest.
    pub fn summaries(&self) -> StorageResult<Vec<PageSummary>> {
        let entries = fs::read_dir(&self.base_path).map_err(io_error(&self.base_path))?;
        let mut summaries = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != EXTENSION) {
                continue;
            }
            let parsed = File::open(&path)
                .map_err(io_error(&path))
                .and_then(|f| Ok(serde_json::from_reader::<_, Page>(BufReader::new(f))?));
            match parsed {
                Ok(page) => summaries.push(PageSummary::from(&page)),
                Err(e) => log::warn!("skipping {}: {}", path.display(), e),
            }
        }
        sort_summaries(&mut summaries);
        Ok(summaries)
    }

    pub fn find_page(&self, site_id: &str, slug: &str) -> StorageResult<Page> {
        let summary = self
            .summaries()?
            .into_iter()
            .find(|p| p.site_id == site_id && p.slug == slug)
            .ok_or_else(|| StorageError::NotFound(format!("{site_id}/{slug}")))?;
        self.read_page(&summary.id)
    }
}

impl Storage for FileStorage {
    fn save(&self, page: &Page) -> BoxFuture<'_, StorageResult<()>> {
        let page = page.clone();
        Box::pin(async move { self.write_page(&page) })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Page>> {
        let id = id.to_string();
        Box::pin(async move { self.read_page(&id) })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move { self.remove_page(&id) })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<PageSummary>>> {
        Box::pin(async move { self.summaries() })
    }

    fn find_by_slug(&self, site_id: &str, slug: &str) -> BoxFuture<'_, StorageResult<Page>> {
        let site_id = site_id.to_string();
        let slug = slug.to_string();
        Box::pin(async move { self.find_page(&site_id, &slug) })
    }
}
