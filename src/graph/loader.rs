//! Folder loading.
//!
//! Every `*.graphml` file directly inside a folder becomes one named graph.
//! A file that fails to read or parse is logged and skipped.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::graphml::parse_graphml;
use super::types::Graph;
use crate::error::LoadError;

/// File name suffix that marks a graph file.
pub const GRAPH_EXTENSION: &str = ".graphml";

/// Graphs keyed by dataset name (file name without the extension).
pub type Catalog = BTreeMap<String, Graph>;

/// Result of loading a folder.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
	/// The folder does not exist.
	NotFound(PathBuf),
	/// The folder exists. The catalog is empty when no graph file loaded.
	Loaded(Catalog),
}

impl LoadOutcome {
	/// The loaded catalog, or `None` if the folder was missing.
	pub fn catalog(&self) -> Option<&Catalog> {
		match self {
			LoadOutcome::Loaded(catalog) => Some(catalog),
			LoadOutcome::NotFound(_) => None,
		}
	}
}

/// Dataset name for a file name, or `None` if it is not a graph file.
pub fn dataset_name(file_name: &str) -> Option<&str> {
	file_name.strip_suffix(GRAPH_EXTENSION)
}

/// Load every graph file directly inside `folder`.
pub fn load_folder(folder: impl AsRef<Path>) -> LoadOutcome {
	let folder = folder.as_ref();
	if !folder.exists() {
		warn!("graph folder {} does not exist", folder.display());
		return LoadOutcome::NotFound(folder.to_path_buf());
	}

	let entries = match fs::read_dir(folder) {
		Ok(entries) => entries,
		Err(e) => {
			warn!("cannot list graph folder {}: {e}", folder.display());
			return LoadOutcome::Loaded(Catalog::new());
		}
	};

	let mut catalog = Catalog::new();
	let mut skipped = 0usize;
	for entry in entries.flatten() {
		let path = entry.path();
		if !path.is_file() {
			continue;
		}
		let file_name = entry.file_name().to_string_lossy().into_owned();
		let Some(name) = dataset_name(&file_name) else {
			debug!("ignoring {}", path.display());
			continue;
		};
		match read_graph(&path, &file_name) {
			Ok(graph) => {
				catalog.insert(name.to_string(), graph);
			}
			Err(e) => {
				warn!("skipping {file_name}: {e}");
				skipped += 1;
			}
		}
	}

	info!(
		"loaded {} graph(s) from {} ({skipped} skipped)",
		catalog.len(),
		folder.display()
	);
	LoadOutcome::Loaded(catalog)
}

fn read_graph(path: &Path, file_name: &str) -> Result<Graph, LoadError> {
	let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	parse_file(file_name, &text)
}

fn parse_file(file_name: &str, text: &str) -> Result<Graph, LoadError> {
	let mut graph = parse_graphml(text).map_err(|source| LoadError::Parse {
		name: file_name.to_string(),
		source,
	})?;
	graph.attributes_mut().for_each(|attrs| attrs.coerce_size());
	Ok(graph)
}

/// Build a catalog from in-memory files given as `(file name, contents)`.
///
/// Applies the same filtering, naming and skip-on-failure rules as
/// [`load_folder`]. Used when files come from somewhere other than the local
/// filesystem, such as a browser file picker.
pub fn load_sources<I, N, T>(files: I) -> Catalog
where
	I: IntoIterator<Item = (N, T)>,
	N: AsRef<str>,
	T: AsRef<str>,
{
	let mut catalog = Catalog::new();
	for (file_name, text) in files {
		let file_name = file_name.as_ref();
		let Some(name) = dataset_name(file_name) else {
			continue;
		};
		match parse_file(file_name, text.as_ref()) {
			Ok(graph) => {
				catalog.insert(name.to_string(), graph);
			}
			Err(e) => warn!("skipping {file_name}: {e}"),
		}
	}
	info!("loaded {} graph(s) from picked files", catalog.len());
	catalog
}
