//! Staging of uploaded files.
//!
//! Uploads are written under a single flat directory, keyed by a sanitized
//! version of the client-supplied filename. A same-named upload replaces the
//! previously staged file; concurrent identically-named uploads may race,
//! which is an accepted limitation rather than a guaranteed-safe contract.

use std::path::{Path, PathBuf};

use crate::errors::Error;

#[derive(Debug, Clone)]
pub struct Storage {
	root: PathBuf,
}

impl Storage {
	/// Open (creating if necessary) the staging directory.
	///
	/// # Errors
	///
	/// Returns an error if the directory cannot be created.
	pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
		let root = root.as_ref().to_path_buf();
		std::fs::create_dir_all(&root)?;

		Ok(Self { root })
	}

	/// Reduce a client-supplied filename to a single safe path component.
	/// Anything up to the last `/` or `\` is dropped, so a traversal attempt
	/// like `../../etc/passwd` stages as plain `passwd`. Names that reduce
	/// to nothing usable are rejected.
	#[must_use]
	pub fn sanitize(name: &str) -> Option<String> {
		let name = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
		if name.is_empty() || name == "." || name == ".." {
			return None;
		}

		Some(name.to_string())
	}

	/// Write the upload into the staging directory and return the name it
	/// was staged under.
	///
	/// # Errors
	///
	/// Returns an error if the filename is unusable or the write fails.
	pub async fn stage(&self, name: &str, bytes: &[u8]) -> Result<String, Error> {
		let staged = Self::sanitize(name).ok_or_else(|| Error::UnsafeFilename {
			name: name.to_string(),
		})?;

		tokio::fs::write(self.root.join(&staged), bytes)
			.await
			.map_err(|source| Error::Staging {
				name: staged.clone(),
				source,
			})?;

		Ok(staged)
	}

	/// Resolve a staged name back to its on-disk path. Returns `None` for
	/// names that wouldn't have been staged in the first place.
	#[must_use]
	pub fn resolve(&self, name: &str) -> Option<PathBuf> {
		Self::sanitize(name).map(|staged| self.root.join(staged))
	}

	#[must_use]
	pub fn root(&self) -> &Path {
		&self.root
	}
}
