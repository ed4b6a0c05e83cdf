use api::ApiConfig;
use dioxus::prelude::*;

use ui::views::DirectoryView;
use ui::DirectoryProvider;

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Optional endpoint file next to the binary's working directory.
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_FILE: &str = "directory.toml";

fn main() {
    dioxus::logger::initialize_default();

    // The endpoint is fixed for the whole session.
    let config = load_config().unwrap_or_else(|e| {
        tracing::error!("Invalid API configuration, using defaults: {}", e);
        ApiConfig::default()
    });
    tracing::info!("User collection at {}", config.collection_url());

    dioxus::LaunchBuilder::new()
        .with_context(config)
        .launch(App);
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> Result<ApiConfig, api::ConfigError> {
    ApiConfig::from_build_env()
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> Result<ApiConfig, api::ConfigError> {
    ApiConfig::from_file_or_env(CONFIG_FILE)
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        DirectoryProvider {
            DirectoryView {}
        }
    }
}
