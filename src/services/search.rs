use serde::Serialize;
use std::time::Duration;

use crate::{
    error::{AppError, Stage},
    models::{MovieId, MovieSummary},
    services::{
        enrichment::EnrichmentPipeline,
        renderer::DetailsRenderer,
        session::Session,
        view::{ViewSink, LOADER_GRACE},
    },
};

/// How a details run ended, as seen by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Rendered { title: String },
    NoResults,
    Failed { alert: String },
    /// A newer run started before this one finished; nothing was shown
    Superseded,
}

enum RunTarget<'a> {
    Title(&'a str),
    Known(MovieSummary),
}

/// Drives the page through one search: loader, pipeline, render, failure UI.
///
/// Overlapping runs in one session are sequenced latest-wins: a run that
/// finishes after a newer one started leaves the view alone.
#[derive(Clone)]
pub struct SearchController {
    pipeline: EnrichmentPipeline,
    renderer: DetailsRenderer,
    loader_grace: Duration,
}

impl SearchController {
    pub fn new(pipeline: EnrichmentPipeline, renderer: DetailsRenderer) -> Self {
        Self {
            pipeline,
            renderer,
            loader_grace: LOADER_GRACE,
        }
    }

    /// Search box submit
    pub async fn search(
        &self,
        session: &Session,
        title: &str,
        view: &mut dyn ViewSink,
    ) -> RunOutcome {
        if title.is_empty() {
            view.show_no_results();
            return RunOutcome::NoResults;
        }

        self.run(session, RunTarget::Title(title), view).await
    }

    /// Recommendation card click; skips the title search when the id is known
    pub async fn open_recommendation(
        &self,
        session: &Session,
        title: &str,
        movie_id: Option<MovieId>,
        view: &mut dyn ViewSink,
    ) -> RunOutcome {
        let target = match movie_id {
            Some(id) => RunTarget::Known(MovieSummary {
                id,
                title: title.to_string(),
                original_title: title.to_string(),
            }),
            None if title.is_empty() => {
                view.show_no_results();
                return RunOutcome::NoResults;
            }
            None => RunTarget::Title(title),
        };

        self.run(session, target, view).await
    }

    async fn run(
        &self,
        session: &Session,
        target: RunTarget<'_>,
        view: &mut dyn ViewSink,
    ) -> RunOutcome {
        // Leaving the current details view closes its viewing session
        let _ = session.beacon.flush().await;

        let ticket = session.begin_run();
        view.show_loader();

        let enriched = match target {
            RunTarget::Title(title) => self.pipeline.enrich(title).await,
            RunTarget::Known(movie) => self.pipeline.enrich_known(movie).await,
        };
        let rendered = match enriched {
            Ok(record) => self
                .renderer
                .render(&record)
                .await
                .map(|html| (record, html)),
            Err(e) => Err(e),
        };

        if !session.is_latest(ticket) {
            tracing::debug!(ticket, "Discarding superseded details run");
            return RunOutcome::Superseded;
        }

        let outcome = match rendered {
            Ok((record, html)) => {
                view.replace_results(html);
                session.beacon.start(&record.display_title).await;
                RunOutcome::Rendered {
                    title: record.display_title,
                }
            }
            Err(AppError::NotFound(msg)) => {
                tracing::info!(reason = %msg, "No results");
                view.show_no_results();
                RunOutcome::NoResults
            }
            Err(e) => {
                let alert = e
                    .stage()
                    .map(|stage| stage.alert_message())
                    .unwrap_or(Stage::Render.alert_message());
                tracing::error!(error = %e, "Details run failed");
                view.alert(alert);
                RunOutcome::Failed {
                    alert: alert.to_string(),
                }
            }
        };

        view.dismiss_loader(self.loader_grace);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppResult;
    use crate::models::{
        TmdbCredits, TmdbMovieDetail, TmdbPerson, TmdbSearchHit, SIMILARITY_NOT_FOUND,
    };
    use crate::services::backend::{MockRecommendationBackend, RecommendationBackend};
    use crate::services::enrichment::PipelineOptions;
    use crate::services::providers::{MetadataProvider, MockMetadataProvider};
    use crate::services::view::{RecordingView, ViewUpdate};
    use std::sync::Arc;

    fn hit(id: MovieId, title: &str) -> TmdbSearchHit {
        TmdbSearchHit {
            id,
            title: title.to_string(),
            original_title: title.to_string(),
            poster_path: None,
        }
    }

    fn detail() -> TmdbMovieDetail {
        TmdbMovieDetail {
            imdb_id: None,
            poster_path: None,
            overview: None,
            genres: vec![],
            vote_average: 7.0,
            vote_count: 10,
            release_date: None,
            runtime: Some(100),
            status: None,
        }
    }

    fn working_metadata() -> MockMetadataProvider {
        let mut metadata = MockMetadataProvider::new();
        metadata.expect_name().return_const("mock");
        metadata
            .expect_search_movies()
            .returning(|query| Ok(vec![hit(949, query)]));
        metadata.expect_movie_detail().returning(|_| Ok(detail()));
        metadata
            .expect_movie_credits()
            .returning(|_| Ok(TmdbCredits { cast: vec![] }));
        metadata
    }

    fn controller(
        metadata: Arc<dyn MetadataProvider>,
        backend: Arc<dyn RecommendationBackend>,
    ) -> SearchController {
        let pipeline = EnrichmentPipeline::new(
            metadata,
            backend.clone(),
            PipelineOptions {
                image_base_url: "https://image.tmdb.org/t/p/original".to_string(),
                lookup_concurrency: 2,
            },
        );
        SearchController::new(pipeline, DetailsRenderer::new(backend))
    }

    fn rendering_backend() -> MockRecommendationBackend {
        let mut backend = MockRecommendationBackend::new();
        backend
            .expect_similar_titles()
            .returning(|_| Ok("Thief".to_string()));
        backend
            .expect_render_details()
            .returning(|_| Ok("<section>details</section>".to_string()));
        backend.expect_log_interaction().returning(|_| Ok(()));
        backend
    }

    #[tokio::test]
    async fn test_successful_search_renders_and_starts_viewing_session() {
        let backend: Arc<dyn RecommendationBackend> = Arc::new(rendering_backend());
        let controller = controller(Arc::new(working_metadata()), backend.clone());
        let session = Session::new(backend);
        let mut view = RecordingView::new();

        let outcome = controller.search(&session, "Heat", &mut view).await;

        assert_eq!(
            outcome,
            RunOutcome::Rendered {
                title: "Heat".to_string()
            }
        );
        assert_eq!(
            view.into_updates(),
            vec![
                ViewUpdate::ShowLoader,
                ViewUpdate::ReplaceResults {
                    html: "<section>details</section>".to_string()
                },
                ViewUpdate::DismissLoader { delay_ms: 500 },
            ]
        );
        assert_eq!(session.beacon.current_title().await.as_deref(), Some("Heat"));
    }

    #[tokio::test]
    async fn test_empty_title_shows_no_results_without_calls() {
        let mut metadata = MockMetadataProvider::new();
        metadata.expect_search_movies().never();
        let backend: Arc<dyn RecommendationBackend> = Arc::new(MockRecommendationBackend::new());
        let controller = controller(Arc::new(metadata), backend.clone());
        let session = Session::new(backend);
        let mut view = RecordingView::new();

        let outcome = controller.search(&session, "", &mut view).await;

        assert_eq!(outcome, RunOutcome::NoResults);
        assert_eq!(view.into_updates(), vec![ViewUpdate::ShowNoResults]);
    }

    #[tokio::test]
    async fn test_not_found_shows_no_results_panel() {
        let mut backend = MockRecommendationBackend::new();
        backend
            .expect_similar_titles()
            .returning(|_| Ok(SIMILARITY_NOT_FOUND.to_string()));
        backend.expect_render_details().never();
        let backend: Arc<dyn RecommendationBackend> = Arc::new(backend);

        let controller = controller(Arc::new(working_metadata()), backend.clone());
        let session = Session::new(backend);
        let mut view = RecordingView::new();

        let outcome = controller.search(&session, "Obscure", &mut view).await;

        assert_eq!(outcome, RunOutcome::NoResults);
        assert_eq!(
            view.into_updates(),
            vec![
                ViewUpdate::ShowLoader,
                ViewUpdate::ShowNoResults,
                ViewUpdate::DismissLoader { delay_ms: 500 },
            ]
        );
        assert_eq!(session.beacon.current_title().await, None);
    }

    #[tokio::test]
    async fn test_api_failure_raises_stage_alert() {
        let mut backend = MockRecommendationBackend::new();
        backend
            .expect_similar_titles()
            .returning(|_| Err(AppError::ExternalApi("500".to_string())));
        let backend: Arc<dyn RecommendationBackend> = Arc::new(backend);

        let controller = controller(Arc::new(working_metadata()), backend.clone());
        let session = Session::new(backend);
        let mut view = RecordingView::new();

        let outcome = controller.search(&session, "Heat", &mut view).await;

        assert_eq!(
            outcome,
            RunOutcome::Failed {
                alert: "Error getting recommendations".to_string()
            }
        );
        assert_eq!(
            view.updates()[1],
            ViewUpdate::Alert {
                message: "Error getting recommendations".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_render_failure_alerts_api_error() {
        let mut backend = MockRecommendationBackend::new();
        backend
            .expect_similar_titles()
            .returning(|_| Ok("Thief".to_string()));
        backend
            .expect_render_details()
            .returning(|_| Err(AppError::ExternalApi("502".to_string())));
        let backend: Arc<dyn RecommendationBackend> = Arc::new(backend);

        let controller = controller(Arc::new(working_metadata()), backend.clone());
        let session = Session::new(backend);
        let mut view = RecordingView::new();

        let outcome = controller.search(&session, "Heat", &mut view).await;
        assert_eq!(
            outcome,
            RunOutcome::Failed {
                alert: "API Error!".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_new_search_flushes_previous_viewing_session() {
        let mut backend = MockRecommendationBackend::new();
        backend
            .expect_similar_titles()
            .returning(|_| Ok("Thief".to_string()));
        backend
            .expect_render_details()
            .returning(|_| Ok("<section/>".to_string()));
        backend
            .expect_log_interaction()
            .withf(|log| log.title == "Heat")
            .times(1)
            .returning(|_| Ok(()));
        let backend: Arc<dyn RecommendationBackend> = Arc::new(backend);

        let controller = controller(Arc::new(working_metadata()), backend.clone());
        let session = Session::new(backend);

        controller
            .search(&session, "Heat", &mut RecordingView::new())
            .await;
        controller
            .search(&session, "Collateral", &mut RecordingView::new())
            .await;

        assert_eq!(
            session.beacon.current_title().await.as_deref(),
            Some("Collateral")
        );
        // Let the spawned beacon send run before the mock verifies
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_card_click_with_id_skips_title_search() {
        let mut metadata = MockMetadataProvider::new();
        metadata.expect_name().return_const("mock");
        metadata
            .expect_search_movies()
            .withf(|query| query == "Thief")
            .returning(|_| Ok(vec![]));
        metadata
            .expect_movie_detail()
            .withf(|id| *id == 11524)
            .times(1)
            .returning(|_| Ok(detail()));
        metadata
            .expect_movie_credits()
            .returning(|_| Ok(TmdbCredits { cast: vec![] }));

        let backend: Arc<dyn RecommendationBackend> = Arc::new(rendering_backend());
        let controller = controller(Arc::new(metadata), backend.clone());
        let session = Session::new(backend);

        let outcome = controller
            .open_recommendation(&session, "Thief", Some(11524), &mut RecordingView::new())
            .await;

        assert_eq!(
            outcome,
            RunOutcome::Rendered {
                title: "Thief".to_string()
            }
        );
    }

    /// Metadata source where searching "Slow" takes a while
    struct SlowSearch;

    #[async_trait::async_trait]
    impl MetadataProvider for SlowSearch {
        async fn search_movies(&self, query: &str) -> AppResult<Vec<TmdbSearchHit>> {
            if query == "Slow" {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Ok(vec![hit(1, query)])
        }

        async fn movie_detail(&self, _id: MovieId) -> AppResult<TmdbMovieDetail> {
            Ok(detail())
        }

        async fn movie_credits(&self, _id: MovieId) -> AppResult<TmdbCredits> {
            Ok(TmdbCredits { cast: vec![] })
        }

        async fn person(&self, _id: u64) -> AppResult<TmdbPerson> {
            Ok(TmdbPerson::default())
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_run_leaves_view_alone() {
        let backend: Arc<dyn RecommendationBackend> = Arc::new(rendering_backend());
        let controller = controller(Arc::new(SlowSearch), backend.clone());
        let session = Session::new(backend);

        let mut slow_view = RecordingView::new();
        let mut fast_view = RecordingView::new();

        let (slow, fast) = tokio::join!(
            controller.search(&session, "Slow", &mut slow_view),
            controller.search(&session, "Fast", &mut fast_view),
        );

        assert_eq!(slow, RunOutcome::Superseded);
        assert_eq!(
            fast,
            RunOutcome::Rendered {
                title: "Fast".to_string()
            }
        );
        assert_eq!(slow_view.into_updates(), vec![ViewUpdate::ShowLoader]);
        assert_eq!(session.beacon.current_title().await.as_deref(), Some("Fast"));
    }

    #[tokio::test]
    async fn test_whitespace_title_shows_no_results_not_alert() {
        let mut metadata = MockMetadataProvider::new();
        metadata.expect_name().return_const("mock");
        metadata
            .expect_search_movies()
            .withf(|query| query == "   ")
            .times(1)
            .returning(|_| Ok(vec![]));
        let mut backend = MockRecommendationBackend::new();
        backend.expect_similar_titles().never();
        let backend: Arc<dyn RecommendationBackend> = Arc::new(backend);
        let controller = controller(Arc::new(metadata), backend.clone());
        let session = Session::new(backend);
        let mut view = RecordingView::new();

        let outcome = controller.search(&session, "   ", &mut view).await;

        assert_eq!(outcome, RunOutcome::NoResults);
        assert_eq!(
            view.into_updates(),
            vec![
                ViewUpdate::ShowLoader,
                ViewUpdate::ShowNoResults,
                ViewUpdate::DismissLoader { delay_ms: 500 },
            ]
        );
    }
}
