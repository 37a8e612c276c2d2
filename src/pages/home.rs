use std::sync::Arc;

use leptos::prelude::*;

use crate::catalog::Catalog;
use crate::components::diagram::DiagramCanvas;
use crate::graph::Variant;

/// Books on a fixed grid joined by character journeys.
#[component]
pub fn Home() -> impl IntoView {
	let catalog = expect_context::<Arc<Catalog>>();

	view! {
		<div class="fullscreen-graph">
			<DiagramCanvas catalog=catalog variant=Variant::Grid fullscreen=true />
			<div class="graph-overlay">
				<h1>"Discworld Journeys"</h1>
				<p class="subtitle">
					"Hover a journey or legend entry to trace it. Click to pin the highlight. "
					<a href="/force">"Force view"</a>
				</p>
			</div>
		</div>
	}
}
