use std::{
    fs,
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use tempfile::TempDir;

/// Where relocated character images live for the life of the process.
///
/// The ephemeral variant owns its directory and removes it when the store is
/// dropped at shutdown, replacing ambient process-exit hooks with a scoped
/// resource.
#[derive(Debug)]
enum MediaRoot {
    Persistent(PathBuf),
    Ephemeral(TempDir),
}

impl MediaRoot {
    fn path(&self) -> &Path {
        match self {
            Self::Persistent(path) => path,
            Self::Ephemeral(dir) => dir.path(),
        }
    }
}

/// File storage for web-servable images, keyed by relative path.
///
/// Relocated archive images are stored under `<root>/<owner_id>/<basename>`.
/// The store makes no durability promises; an ephemeral root is an accepted
/// deployment mode.
#[derive(Clone, Debug)]
pub struct MediaStore {
    root: Arc<MediaRoot>,
}

impl MediaStore {
    pub fn persistent(path: &Path) -> io::Result<Self> {
        fs::create_dir_all(path)?;

        Ok(Self {
            root: Arc::new(MediaRoot::Persistent(path.to_path_buf())),
        })
    }

    pub fn ephemeral() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("tradelist_media_").tempdir()?;

        Ok(Self {
            root: Arc::new(MediaRoot::Ephemeral(dir)),
        })
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn put(&self, relative_path: &str, bytes: &[u8]) -> io::Result<()> {
        let dest = self.root.path().join(relative_path);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(dest, bytes)
    }

    pub fn exists(&self, relative_path: &str) -> bool {
        self.root.path().join(relative_path).is_file()
    }

    pub fn delete(&self, relative_path: &str) -> io::Result<()> {
        let target = self.root.path().join(relative_path);

        if target.is_file() {
            fs::remove_file(target)?;
        }

        Ok(())
    }

    /// Remove every stored image for one owner.
    pub fn delete_owner(&self, owner_id: &str) -> io::Result<()> {
        let dir = self.root.path().join(owner_id);

        if dir.is_dir() {
            fs::remove_dir_all(dir)?;
        }

        Ok(())
    }
}
