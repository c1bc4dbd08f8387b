// Widget editor workflow - create/edit sessions and their fetch lifecycle
use crate::application::chart_source::FetchError;
use crate::application::store::DashboardStore;
use crate::domain::chart_data::decorate;
use crate::domain::widget::{
    ChartType, WidgetContent, WidgetRecord, DEFAULT_BACKGROUND_COLOR, DEFAULT_BORDER_COLOR,
    DEFAULT_TITLE,
};
use serde_json::Value;

/// Working copy of the editor form. Nothing here touches the store until a
/// fetch for it succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSession {
    target: Option<String>,
    pub api_endpoint: String,
    pub chart_type: ChartType,
    pub title: String,
    pub background_color: String,
    pub border_color: String,
}

impl EditorSession {
    /// Fresh defaults for a new widget.
    pub fn create() -> Self {
        Self {
            target: None,
            api_endpoint: String::new(),
            chart_type: ChartType::default(),
            title: DEFAULT_TITLE.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            border_color: DEFAULT_BORDER_COLOR.to_string(),
        }
    }

    /// Form pre-filled from an existing widget and bound to its id.
    pub fn edit(record: &WidgetRecord) -> Self {
        Self {
            target: Some(record.id.clone()),
            api_endpoint: record.api_endpoint.clone(),
            chart_type: record.chart_type,
            title: record.title.clone(),
            background_color: record.background_color.clone(),
            border_color: record.border_color.clone(),
        }
    }

    /// Id of the widget being edited, `None` when creating.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    fn into_content(self, data: Value) -> (Option<String>, ChartType, WidgetContent) {
        let content = WidgetContent {
            title: self.title,
            data,
            background_color: self.background_color,
            border_color: self.border_color,
            api_endpoint: self.api_endpoint,
        };
        (self.target, self.chart_type, content)
    }
}

/// Identifies one outbound fetch. Only the most recent token is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// What `confirm` asks the caller to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: RequestToken,
    pub endpoint: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    Closed,
    Open(EditorSession),
    Fetching {
        session: EditorSession,
        token: RequestToken,
    },
}

/// Result of handing a fetch response back to the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// A new widget with this id was appended.
    Created(String),
    /// The bound widget was updated (silently skipped if it vanished meanwhile).
    Updated(String),
    /// The fetch failed; the editor is open again with its fields intact.
    Failed,
    /// The token was superseded or cancelled; nothing changed.
    Stale,
}

#[derive(Debug, Clone)]
pub struct EditorWorkflow {
    state: EditorState,
    last_token: u64,
}

impl Default for EditorWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorWorkflow {
    pub fn new() -> Self {
        Self {
            state: EditorState::Closed,
            last_token: 0,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// True while the editor is visible, including during a fetch.
    pub fn is_open(&self) -> bool {
        !matches!(self.state, EditorState::Closed)
    }

    pub fn session(&self) -> Option<&EditorSession> {
        match &self.state {
            EditorState::Closed => None,
            EditorState::Open(session) | EditorState::Fetching { session, .. } => Some(session),
        }
    }

    /// Mutable form access. Only available while open and idle.
    pub fn session_mut(&mut self) -> Option<&mut EditorSession> {
        match &mut self.state {
            EditorState::Open(session) => Some(session),
            _ => None,
        }
    }

    /// Open a blank create session, dropping any previous one.
    pub fn open(&mut self) {
        self.state = EditorState::Open(EditorSession::create());
    }

    /// Open an edit session bound to `record`.
    pub fn open_for(&mut self, record: &WidgetRecord) {
        self.state = EditorState::Open(EditorSession::edit(record));
    }

    /// Close without touching the store. Any in-flight fetch becomes stale.
    pub fn cancel(&mut self) {
        self.state = EditorState::Closed;
    }

    /// Start a fetch for the current session.
    ///
    /// Confirming again while a fetch is in flight supersedes it. Returns
    /// `None` when the editor is closed.
    pub fn confirm(&mut self) -> Option<FetchTicket> {
        let state = std::mem::replace(&mut self.state, EditorState::Closed);
        let session = match state {
            EditorState::Closed => return None,
            EditorState::Open(session) | EditorState::Fetching { session, .. } => session,
        };

        self.last_token += 1;
        let token = RequestToken(self.last_token);
        let endpoint = session.api_endpoint.clone();
        self.state = EditorState::Fetching { session, token };

        Some(FetchTicket { token, endpoint })
    }

    /// Deliver the outcome of the fetch identified by `token`.
    pub fn complete(
        &mut self,
        token: RequestToken,
        result: Result<Value, FetchError>,
        store: &mut DashboardStore,
    ) -> Completion {
        let state = std::mem::replace(&mut self.state, EditorState::Closed);
        let session = match state {
            EditorState::Fetching { session, token: current } if current == token => session,
            other => {
                tracing::debug!("Dropping stale fetch result for token {:?}", token);
                self.state = other;
                return Completion::Stale;
            }
        };

        let decorated = result.and_then(|payload| {
            decorate(payload, &session.background_color, &session.border_color)
                .map_err(FetchError::from)
        });

        match decorated {
            Ok(data) => {
                let (target, chart_type, content) = session.into_content(data);
                match target {
                    Some(id) => {
                        if !store.update(&id, content) {
                            tracing::debug!("Widget {} was removed before its edit landed", id);
                        }
                        Completion::Updated(id)
                    }
                    None => Completion::Created(store.add(chart_type, content).id.clone()),
                }
            }
            Err(e) => {
                tracing::error!("Error fetching widget data from {:?}: {}", session.api_endpoint, e);
                self.state = EditorState::Open(session);
                Completion::Failed
            }
        }
    }
}
