// Dashboard state store - the single owner of the widget collection
use crate::domain::dashboard::DashboardSnapshot;
use crate::domain::layout::{project, LayoutItem};
use crate::domain::widget::{default_position, ChartType, WidgetContent, WidgetRecord};
use chrono::Utc;

#[derive(Debug, Clone, Default)]
pub struct DashboardStore {
    widgets: Vec<WidgetRecord>,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn widgets(&self) -> &[WidgetRecord] {
        &self.widgets
    }

    pub fn get(&self, id: &str) -> Option<&WidgetRecord> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Overwrite the whole collection. Loads never merge.
    pub fn replace_all(&mut self, widgets: Vec<WidgetRecord>) {
        self.widgets = widgets;
    }

    /// Append a widget at the next default grid slot with a freshly minted id.
    pub fn add(&mut self, chart_type: ChartType, content: WidgetContent) -> &WidgetRecord {
        let id = self.mint_id();
        let position = default_position(self.widgets.len());
        self.widgets.push(WidgetRecord::new(id, chart_type, position, content));
        &self.widgets[self.widgets.len() - 1]
    }

    /// Replace the editable fields of widget `id`. Returns `false` if absent.
    pub fn update(&mut self, id: &str, content: WidgetContent) -> bool {
        match self.widgets.iter_mut().find(|w| w.id == id) {
            Some(widget) => {
                widget.apply_content(content);
                true
            }
            None => false,
        }
    }

    /// Delete widget `id`. Returns `false` if absent.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.widgets.len();
        self.widgets.retain(|w| w.id != id);
        self.widgets.len() != before
    }

    /// Initial geometry for the grid renderer.
    pub fn layout(&self) -> Vec<LayoutItem> {
        project(&self.widgets)
    }

    /// Copy live grid geometry back onto the matching widgets.
    ///
    /// Items for unknown ids are ignored, as are widgets the layout omits.
    /// Returns how many widgets changed.
    pub fn apply_layout(&mut self, items: &[LayoutItem]) -> usize {
        let mut changed = 0;
        for item in items {
            if item.w <= 0 || item.h <= 0 || item.x < 0 || item.y < 0 {
                tracing::warn!("Ignoring invalid geometry for widget {}", item.i);
                continue;
            }
            if let Some(widget) = self.widgets.iter_mut().find(|w| w.id == item.i) {
                if (widget.x, widget.y, widget.w, widget.h) != (item.x, item.y, item.w, item.h) {
                    widget.x = item.x;
                    widget.y = item.y;
                    widget.w = item.w;
                    widget.h = item.h;
                    changed += 1;
                }
            }
        }
        changed
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot::new(self.widgets.clone())
    }

    /// Ids are millisecond timestamps, bumped forward until unused.
    fn mint_id(&self) -> String {
        let mut stamp = Utc::now().timestamp_millis();
        loop {
            let candidate = stamp.to_string();
            if self.get(&candidate).is_none() {
                return candidate;
            }
            stamp += 1;
        }
    }
}
