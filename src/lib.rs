//! Interactive diagram of the Discworld novels and their running characters.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, error, info};

// Modules
mod catalog;
mod components;
mod error;
mod graph;
mod highlight;
mod layout;
mod legend;
mod pages;
mod router;
mod tooltip;
mod visibility;

// Top-Level pages
use crate::catalog::Catalog;
use crate::pages::force::ForcePage;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router with the grid diagram at `/` and the force diagram at
/// `/force`. The catalog is built once and shared through context.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let catalog = match Catalog::discworld() {
		Ok(catalog) => catalog,
		Err(e) => {
			error!("catalog: {e}");
			return view! {
				<h1>"The catalog could not be loaded"</h1>
				<p>{e.to_string()}</p>
			}
			.into_any();
		}
	};
	info!(
		"catalog: {} books, {} characters, {} warnings",
		catalog.books().len(),
		catalog.characters().len(),
		catalog.warnings().len()
	);
	provide_context(Arc::new(catalog));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Discworld Journeys" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/force") view=ForcePage />
			</Routes>
		</Router>
	}
	.into_any()
}
