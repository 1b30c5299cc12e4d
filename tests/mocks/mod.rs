//! Test doubles shared by the integration tests.

mod mock_lookup_client;
mod recording_bridge;

#[allow(unused_imports)]
pub use mock_lookup_client::{MockLookupClient, MockResponse};
#[allow(unused_imports)]
pub use recording_bridge::{RecordingTarget, RecordingUi};

use deliverease_widget::{
    Catalog, FrameContext, Language, Metrics, WidgetConfig, WidgetController, WidgetParts,
};
use std::sync::Arc;

/// A controller wired to mocks, plus handles on those mocks.
#[allow(dead_code)]
pub struct Harness {
    pub widget: WidgetController,
    pub client: Arc<MockLookupClient>,
    pub parent: Arc<RecordingTarget>,
    pub ui: Arc<RecordingUi>,
}

/// Build an English widget in `context` backed by `client`.
#[allow(dead_code)]
pub fn harness(context: FrameContext, client: MockLookupClient) -> Harness {
    harness_with_language(context, client, Language::En)
}

#[allow(dead_code)]
pub fn harness_with_language(
    context: FrameContext,
    client: MockLookupClient,
    language: Language,
) -> Harness {
    let client = Arc::new(client);
    let parent = Arc::new(RecordingTarget::new());
    let ui = Arc::new(RecordingUi::new());
    let config = WidgetConfig {
        api_url: "http://localhost:8000".to_string(),
        language,
        embedded: context.is_embedded(),
        ..Default::default()
    };

    let widget = WidgetController::new(
        context,
        &config,
        Catalog::builtin(language),
        WidgetParts {
            client: client.clone(),
            parent: parent.clone(),
            ui: ui.clone(),
            metrics: Metrics::new(),
        },
    );

    Harness {
        widget,
        client,
        parent,
        ui,
    }
}
