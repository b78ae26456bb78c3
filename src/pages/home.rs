use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FileList, HtmlInputElement};

use crate::components::force_graph::ForceGraphCanvas;
use crate::encoding::{GeometryBundle, encode};
use crate::graph::{GRAPH_EXTENSION, LoadOutcome, load_sources};

/// Read every picked file as text, skipping the ones the browser refuses.
async fn read_files(files: FileList) -> Vec<(String, String)> {
	let mut sources = Vec::new();
	for i in 0..files.length() {
		let Some(file) = files.get(i) else {
			continue;
		};
		match JsFuture::from(file.text()).await {
			Ok(text) => sources.push((file.name(), text.as_string().unwrap_or_default())),
			Err(e) => warn!("could not read {}: {e:?}", file.name()),
		}
	}
	sources
}

/// Message shown instead of the graph for a folder with nothing to draw.
fn outcome_message(outcome: Option<&LoadOutcome>) -> Option<(&'static str, String)> {
	match outcome {
		None => Some(("hint", "Pick a folder of graph files to begin.".to_string())),
		Some(LoadOutcome::NotFound(path)) => Some((
			"error",
			format!("❌ The folder path could not be found: `{}`", path.display()),
		)),
		Some(LoadOutcome::Loaded(catalog)) if catalog.is_empty() => Some((
			"warning",
			format!("⚠️ No {GRAPH_EXTENSION} files found in the selected folder"),
		)),
		Some(LoadOutcome::Loaded(_)) => None,
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (outcome, set_outcome) = signal(None::<Arc<LoadOutcome>>);
	let (selected, set_selected) = signal(String::new());
	let picker_ref = NodeRef::<leptos::html::Input>::new();

	Effect::new(move |_| {
		// Lets the picker select a whole folder.
		if let Some(input) = picker_ref.get() {
			let _ = input.set_attribute("webkitdirectory", "");
		}
	});

	let on_pick = move |ev: leptos::ev::Event| {
		let input: HtmlInputElement = event_target(&ev);
		let Some(files) = input.files() else {
			return;
		};
		spawn_local(async move {
			let catalog = load_sources(read_files(files).await);
			set_selected.set(catalog.keys().next().cloned().unwrap_or_default());
			set_outcome.set(Some(Arc::new(LoadOutcome::Loaded(catalog))));
		});
	};

	let names = Signal::derive(move || {
		outcome
			.get()
			.and_then(|o| o.catalog().map(|c| c.keys().cloned().collect::<Vec<_>>()))
			.unwrap_or_default()
	});

	let counts = Signal::derive(move || {
		let outcome = outcome.get()?;
		let graph = outcome.catalog()?.get(&selected.get())?;
		Some((graph.node_count(), graph.edge_count()))
	});

	// Layout is recomputed on every switch, never cached.
	let encoded = Memo::new(move |_| {
		let outcome = outcome.get()?;
		let name = selected.get();
		let graph = outcome.catalog()?.get(&name)?;
		Some(encode(graph, &name))
	});
	let geometry = Signal::derive(move || match encoded.get() {
		Some(Ok(bundle)) => bundle,
		_ => GeometryBundle::default(),
	});
	let render_error = Signal::derive(move || match encoded.get() {
		Some(Err(e)) => Some(e.to_string()),
		_ => None,
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<ForceGraphCanvas data=geometry fullscreen=true />
				<div class="graph-overlay">
					<h1>"🌐 Interactive Skills Network"</h1>
					<p class="subtitle">
						"Nodes are colored by Community ID and sized by Degree."
					</p>

					<section class="graph-controls">
						<h2>"Graph Controls"</h2>
						<input
							node_ref=picker_ref
							type="file"
							multiple=true
							accept=GRAPH_EXTENSION
							on:change=on_pick
						/>
						<select on:change=move |ev| set_selected.set(event_target_value(&ev))>
							<For
								each=move || names.get()
								key=|name| name.clone()
								children=move |name| {
									let value = name.clone();
									let label = name.clone();
									let is_selected = move || selected.get() == value;
									view! {
										<option value=name selected=is_selected>
											{label}
										</option>
									}
								}
							/>
						</select>
						{move || {
							counts
								.get()
								.map(|(nodes, edges)| {
									view! {
										<div class="metric">"Nodes: " <strong>{nodes}</strong></div>
										<div class="metric">"Edges: " <strong>{edges}</strong></div>
									}
								})
						}}
					</section>

					{move || {
						outcome_message(outcome.get().as_deref())
							.map(|(class, text)| view! { <p class=class>{text}</p> })
					}}
					{move || {
						render_error
							.get()
							.map(|e| view! { <p class="error">"Cannot draw this graph: " {e}</p> })
					}}
					{move || {
						counts
							.get()
							.map(|_| view! { <h3>"Analyzing: " {selected.get()}</h3> })
					}}
					<p class="subtitle">
						"Scroll to zoom. Drag the background to pan. Hover a node for details."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use super::*;
	use crate::graph::Catalog;

	#[test]
	fn messages_distinguish_missing_from_empty() {
		let missing = LoadOutcome::NotFound(PathBuf::from("data"));
		let empty = LoadOutcome::Loaded(Catalog::new());
		assert_eq!(outcome_message(Some(&missing)).map(|m| m.0), Some("error"));
		assert_eq!(outcome_message(Some(&empty)).map(|m| m.0), Some("warning"));
		assert_eq!(outcome_message(None).map(|m| m.0), Some("hint"));
	}
}
