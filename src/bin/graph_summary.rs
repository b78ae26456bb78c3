//! Print every dataset in a graph folder with its encoded summary.
//!
//! Usage: `graph_summary [FOLDER]` (defaults to `data`).

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
	use std::process::ExitCode;

	use force_graph_explorer::DEFAULT_DATA_DIR;
	use force_graph_explorer::encoding::encode;
	use force_graph_explorer::graph::{CatalogCache, LoadOutcome};
	use log::{error, warn};

	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let folder = std::env::args()
		.nth(1)
		.unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
	let cache = CatalogCache::new();

	let outcome = cache.get_or_load(&folder);
	let catalog = match &*outcome {
		LoadOutcome::NotFound(path) => {
			error!("The folder path could not be found: {}", path.display());
			return ExitCode::FAILURE;
		}
		LoadOutcome::Loaded(catalog) if catalog.is_empty() => {
			warn!("No .graphml files found in {folder}");
			return ExitCode::SUCCESS;
		}
		LoadOutcome::Loaded(catalog) => catalog,
	};

	for (name, graph) in catalog {
		match encode(graph, name) {
			Ok(bundle) => println!(
				"{name}: {} nodes, {} edges, degree {}..{}, community {}..{}",
				bundle.node_count(),
				bundle.edge_count(),
				bundle.degree_range.0,
				bundle.degree_range.1,
				bundle.community_range.0,
				bundle.community_range.1,
			),
			Err(e) => {
				error!("{name}: {e}");
				return ExitCode::FAILURE;
			}
		}
	}
	ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {}
