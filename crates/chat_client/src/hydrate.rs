//! Startup hydration of the page text from the server's `config.json`.

use crate::client::ChatClient;
use crate::messages::UiConfig;
use crate::view::View;

/// Fetch `config.json` once and apply it. Failures leave the defaults in place.
pub async fn hydrate(client: &ChatClient, view: &dyn View) {
    match client.fetch_config().await {
        Ok(config) => apply_config(view, &config),
        Err(e) => tracing::warn!(error = %e, "using default UI text"),
    }
}

/// Overwrite each binding whose field is present and non-empty.
pub fn apply_config(view: &dyn View, config: &UiConfig) {
    if let Some(title) = non_empty(&config.title) {
        view.set_title(title);
    }
    if let Some(heading) = non_empty(&config.heading) {
        view.set_heading(heading);
    }
    if let Some(placeholder) = non_empty(&config.placeholder) {
        view.set_placeholder(placeholder);
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
