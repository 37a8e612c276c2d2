use std::sync::Arc;

use leptos::prelude::*;

use crate::catalog::Catalog;
use crate::components::diagram::DiagramCanvas;
use crate::graph::Variant;
use crate::visibility::Toggles;

/// Every entity as a simulated particle, with genre and series switches.
#[component]
pub fn ForcePage() -> impl IntoView {
	let catalog = expect_context::<Arc<Catalog>>();
	let show_genres = RwSignal::new(true);
	let show_series = RwSignal::new(true);
	let toggles = Signal::derive(move || Toggles {
		show_genres: show_genres.get(),
		show_series: show_series.get(),
	});

	view! {
		<div class="fullscreen-graph">
			<DiagramCanvas catalog=catalog variant=Variant::Force toggles=toggles fullscreen=true />
			<div class="graph-overlay">
				<h1>"Discworld Relationships"</h1>
				<p class="subtitle">
					"Drag nodes to pin them. Scroll to zoom. Drag background to pan. "
					<a href="/">"Grid view"</a>
				</p>
				<label>
					<input type="checkbox" bind:checked=show_genres />
					" Show genres"
				</label>
				<label>
					<input type="checkbox" bind:checked=show_series />
					" Show series"
				</label>
			</div>
		</div>
	}
}
