pub mod autocomplete;
pub mod backend;
pub mod beacon;
pub mod chat;
pub mod enrichment;
pub mod format;
pub mod providers;
pub mod renderer;
pub mod search;
pub mod session;
pub mod toggle;
pub mod view;

pub use autocomplete::Autocomplete;
pub use backend::{HttpBackend, RecommendationBackend};
pub use enrichment::{EnrichmentPipeline, PipelineOptions};
pub use renderer::DetailsRenderer;
pub use search::{RunOutcome, SearchController};
pub use session::Session;
pub use view::{RecordingView, ViewSink, ViewUpdate};
