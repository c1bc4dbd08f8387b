// Dashboard controller - Client use cases: load, edit and save a dashboard
use crate::application::chart_source::{ChartDataSource, FetchError};
use crate::application::dashboard_repository::DashboardRepository;
use crate::application::editor::{Completion, EditorSession, EditorWorkflow, FetchTicket, RequestToken};
use crate::application::store::DashboardStore;
use crate::domain::layout::LayoutItem;
use crate::infrastructure::config::ClientConfig;
use crate::infrastructure::http_client::{HttpChartDataSource, HttpDashboardRepository};
use serde_json::Value;
use std::sync::Arc;

/// Owns the store and the editor, and performs their network side effects.
///
/// Every failure is logged and swallowed; callers only learn whether the
/// attempted change happened.
pub struct DashboardController {
    store: DashboardStore,
    editor: EditorWorkflow,
    repository: Arc<dyn DashboardRepository>,
    data_source: Arc<dyn ChartDataSource>,
}

impl DashboardController {
    pub fn new(
        repository: Arc<dyn DashboardRepository>,
        data_source: Arc<dyn ChartDataSource>,
    ) -> Self {
        Self {
            store: DashboardStore::new(),
            editor: EditorWorkflow::new(),
            repository,
            data_source,
        }
    }

    /// Controller wired to the dashboard service and data endpoints over HTTP.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            Arc::new(HttpDashboardRepository::from_config(&config.client)),
            Arc::new(HttpChartDataSource::from_config(&config.client)),
        )
    }

    pub fn store(&self) -> &DashboardStore {
        &self.store
    }

    pub fn editor(&self) -> &EditorWorkflow {
        &self.editor
    }

    pub fn layout(&self) -> Vec<LayoutItem> {
        self.store.layout()
    }

    /// Replace the dashboard with the remote snapshot.
    pub async fn load(&mut self) -> bool {
        match self.repository.load_snapshot().await {
            Ok(snapshot) => {
                tracing::info!("Loaded dashboard with {} widgets", snapshot.widgets.len());
                self.store.replace_all(snapshot.widgets);
                true
            }
            Err(e) => {
                tracing::error!("There was an error loading the dashboard state: {:#}", e);
                false
            }
        }
    }

    /// Push the store as-is. Geometry is whatever `add` or `apply_layout` left.
    pub async fn save(&self) -> bool {
        match self.repository.save_snapshot(&self.store.snapshot()).await {
            Ok(receipt) => {
                tracing::info!("{}", receipt.message);
                true
            }
            Err(e) => {
                tracing::error!("There was an error saving the dashboard state: {:#}", e);
                false
            }
        }
    }

    /// Read back the grid's live geometry, then save.
    pub async fn save_with_layout(&mut self, live_layout: &[LayoutItem]) -> bool {
        let moved = self.store.apply_layout(live_layout);
        tracing::debug!("Read back geometry for {} moved widgets", moved);
        self.save().await
    }

    pub fn remove_widget(&mut self, id: &str) -> bool {
        self.store.remove(id)
    }

    pub fn open_editor(&mut self) {
        self.editor.open();
    }

    /// Open the editor on widget `id`. Returns `false` if there is no such widget.
    pub fn edit_widget(&mut self, id: &str) -> bool {
        match self.store.get(id) {
            Some(record) => {
                self.editor.open_for(record);
                true
            }
            None => false,
        }
    }

    pub fn editor_session_mut(&mut self) -> Option<&mut EditorSession> {
        self.editor.session_mut()
    }

    pub fn cancel_editor(&mut self) {
        self.editor.cancel();
    }

    /// Start the fetch for the open session without holding on to the controller.
    ///
    /// The editor stays usable while the returned fetch runs: cancelling or
    /// confirming again makes its result stale. Returns `None` if the editor
    /// is not open.
    pub fn begin_confirm(&mut self) -> Option<PendingFetch> {
        let ticket = self.editor.confirm()?;
        Some(PendingFetch {
            ticket,
            data_source: self.data_source.clone(),
        })
    }

    /// Hand a finished fetch back to the editor.
    pub fn finish_confirm(&mut self, fetched: FetchedData) -> Completion {
        self.editor.complete(fetched.token, fetched.result, &mut self.store)
    }

    /// Fetch the session's endpoint and commit the result in one step.
    ///
    /// Returns `None` if the editor is not open.
    pub async fn confirm(&mut self) -> Option<Completion> {
        let fetched = self.begin_confirm()?.run().await;
        Some(self.finish_confirm(fetched))
    }
}

/// An editor fetch that has been started but not yet run.
pub struct PendingFetch {
    ticket: FetchTicket,
    data_source: Arc<dyn ChartDataSource>,
}

/// The outcome of a `PendingFetch`, tagged with the request it answers.
#[derive(Debug)]
pub struct FetchedData {
    token: RequestToken,
    result: Result<Value, FetchError>,
}

impl PendingFetch {
    pub fn ticket(&self) -> &FetchTicket {
        &self.ticket
    }

    pub async fn run(self) -> FetchedData {
        let result = self.data_source.fetch(&self.ticket.endpoint).await;
        FetchedData {
            token: self.ticket.token,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::{DashboardSnapshot, SaveReceipt};
    use crate::domain::widget::ChartType;
    use crate::infrastructure::config::ClientSettings;
    use crate::test_utils::ErrorCounter;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryRepository {
        stored: Mutex<Option<DashboardSnapshot>>,
        fail_save: bool,
    }

    #[async_trait]
    impl DashboardRepository for MemoryRepository {
        async fn load_snapshot(&self) -> anyhow::Result<DashboardSnapshot> {
            self.stored
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| anyhow::anyhow!("Dashboard state not found"))
        }

        async fn save_snapshot(&self, snapshot: &DashboardSnapshot) -> anyhow::Result<SaveReceipt> {
            if self.fail_save {
                anyhow::bail!("connection reset");
            }
            *self.stored.lock().unwrap() = Some(snapshot.clone());
            Ok(SaveReceipt {
                message: "Dashboard state saved successfully".to_string(),
            })
        }
    }

    struct FixedSource;

    struct HangingSource;

    #[async_trait]
    impl ChartDataSource for HangingSource {
        async fn fetch(&self, _endpoint: &str) -> Result<Value, FetchError> {
            std::future::pending().await
        }
    }

    #[async_trait]
    impl ChartDataSource for FixedSource {
        async fn fetch(&self, endpoint: &str) -> Result<Value, FetchError> {
            if endpoint.starts_with("http://ok") {
                Ok(json!({"labels": ["x"], "datasets": [{"data": [1]}]}))
            } else {
                Err(FetchError::Transport {
                    endpoint: endpoint.to_string(),
                    reason: "unreachable".to_string(),
                })
            }
        }
    }

    fn controller(repository: Arc<MemoryRepository>) -> DashboardController {
        DashboardController::new(repository, Arc::new(FixedSource))
    }

    async fn add_widget(controller: &mut DashboardController, chart_type: ChartType) -> String {
        controller.open_editor();
        {
            let session = controller.editor_session_mut().unwrap();
            session.api_endpoint = "http://ok/series".to_string();
            session.chart_type = chart_type;
        }
        match controller.confirm().await {
            Some(Completion::Created(id)) => id,
            other => panic!("expected a created widget, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_failure_leaves_store_empty() {
        let errors = ErrorCounter::default();
        let _guard = tracing::subscriber::set_default(errors.subscriber());
        let mut controller = controller(Arc::new(MemoryRepository::default()));

        assert!(!controller.load().await);
        assert!(controller.store().is_empty());
        assert_eq!(errors.count(), 1);
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let repository = Arc::new(MemoryRepository::default());
        let mut first = controller(repository.clone());
        add_widget(&mut first, ChartType::Bar).await;
        add_widget(&mut first, ChartType::Pie).await;
        assert!(first.save().await);

        let mut second = controller(repository);
        assert!(second.load().await);
        assert_eq!(second.store().widgets(), first.store().widgets());
    }

    #[tokio::test]
    async fn test_load_replaces_existing_widgets() {
        let repository = Arc::new(MemoryRepository::default());
        let mut controller = controller(repository.clone());
        add_widget(&mut controller, ChartType::Line).await;
        *repository.stored.lock().unwrap() = Some(DashboardSnapshot::default());

        assert!(controller.load().await);
        assert!(controller.store().is_empty());
    }

    #[tokio::test]
    async fn test_save_failure_is_swallowed() {
        let repository = Arc::new(MemoryRepository {
            fail_save: true,
            ..Default::default()
        });
        let mut controller = controller(repository);
        add_widget(&mut controller, ChartType::Line).await;

        let errors = ErrorCounter::default();
        let _guard = tracing::subscriber::set_default(errors.subscriber());
        assert!(!controller.save().await);
        assert_eq!(controller.store().len(), 1);
        assert_eq!(errors.count(), 1);
    }

    #[tokio::test]
    async fn test_failed_confirm_keeps_editor_open() {
        let mut controller = controller(Arc::new(MemoryRepository::default()));
        controller.open_editor();
        controller.editor_session_mut().unwrap().api_endpoint = "http://down/series".to_string();

        let errors = ErrorCounter::default();
        let _guard = tracing::subscriber::set_default(errors.subscriber());
        assert_eq!(controller.confirm().await, Some(Completion::Failed));
        assert_eq!(errors.count(), 1);
        assert!(controller.store().is_empty());
        let session = controller.editor().session().unwrap();
        assert_eq!(session.target(), None);
        assert_eq!(session.api_endpoint, "http://down/series");
    }

    #[tokio::test]
    async fn test_confirm_without_editor() {
        let mut controller = controller(Arc::new(MemoryRepository::default()));
        assert_eq!(controller.confirm().await, None);
    }

    #[tokio::test]
    async fn test_edit_and_remove() {
        let mut controller = controller(Arc::new(MemoryRepository::default()));
        let id = add_widget(&mut controller, ChartType::Line).await;

        assert!(!controller.edit_widget("missing"));
        assert!(controller.edit_widget(&id));
        controller.editor_session_mut().unwrap().border_color = "#f00".to_string();
        assert_eq!(controller.confirm().await, Some(Completion::Updated(id.clone())));
        let widget = controller.store().get(&id).unwrap();
        assert_eq!(widget.border_color, "#f00");
        assert_eq!(widget.data["datasets"][0]["borderColor"], "#f00");

        assert!(controller.remove_widget(&id));
        assert!(!controller.remove_widget(&id));
        assert!(controller.layout().is_empty());
    }

    #[tokio::test]
    async fn test_save_with_layout_persists_dragged_geometry() {
        let repository = Arc::new(MemoryRepository::default());
        let mut controller = controller(repository.clone());
        let id = add_widget(&mut controller, ChartType::Line).await;

        let mut live = controller.layout();
        live[0].x = 8;
        live[0].y = 6;
        assert!(controller.save_with_layout(&live).await);

        let stored = repository.stored.lock().unwrap().clone().unwrap();
        assert_eq!(stored.widgets[0].id, id);
        assert_eq!((stored.widgets[0].x, stored.widgets[0].y), (8, 6));
    }

    #[tokio::test]
    async fn test_cancel_during_fetch_drops_response() {
        let mut controller = controller(Arc::new(MemoryRepository::default()));
        controller.open_editor();
        controller.editor_session_mut().unwrap().api_endpoint = "http://ok/series".to_string();

        let pending = controller.begin_confirm().unwrap();
        controller.cancel_editor();
        let fetched = pending.run().await;

        assert_eq!(controller.finish_confirm(fetched), Completion::Stale);
        assert!(controller.store().is_empty());
        assert!(!controller.editor().is_open());
    }

    #[tokio::test]
    async fn test_second_confirm_supersedes_first() {
        let mut controller = controller(Arc::new(MemoryRepository::default()));
        controller.open_editor();
        controller.editor_session_mut().unwrap().api_endpoint = "http://ok/series".to_string();

        let first = controller.begin_confirm().unwrap();
        let second = controller.begin_confirm().unwrap();
        assert_ne!(first.ticket().token, second.ticket().token);

        let (first, second) = tokio::join!(first.run(), second.run());
        assert_eq!(controller.finish_confirm(first), Completion::Stale);
        assert!(matches!(controller.finish_confirm(second), Completion::Created(_)));
        assert_eq!(controller.store().len(), 1);
    }

    #[tokio::test]
    async fn test_hanging_fetch_does_not_block_editor() {
        let mut controller =
            DashboardController::new(Arc::new(MemoryRepository::default()), Arc::new(HangingSource));
        controller.open_editor();

        let pending = controller.begin_confirm().unwrap();
        let fetch = tokio::spawn(pending.run());
        assert!(controller.editor_session_mut().is_none());

        controller.cancel_editor();
        controller.open_editor();
        assert!(controller.editor_session_mut().is_some());

        fetch.abort();
        assert!(fetch.await.unwrap_err().is_cancelled());
        assert!(controller.store().is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = ClientConfig {
            client: ClientSettings {
                base_url: "http://localhost:4004".to_string(),
                fetch_timeout_secs: 5,
            },
        };
        let controller = DashboardController::from_config(&config);
        assert!(controller.store().is_empty());
        assert!(!controller.editor().is_open());
    }
}
