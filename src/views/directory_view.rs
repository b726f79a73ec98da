use serde::Serialize;

use super::Notice;
use crate::models::Captain;
use crate::services::directory_service::filter_captains;

/// Vista del directorio de capitanes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectoryView {
    pub captains: Vec<Captain>,
    pub query: String,
    pub loading: bool,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryEvent {
    LoadStarted,
    Loaded(Vec<Captain>),
    LoadFailed(String),
    QueryChanged(String),
}

impl DirectoryView {
    pub fn apply(mut self, event: DirectoryEvent) -> Self {
        match event {
            DirectoryEvent::LoadStarted => {
                self.loading = true;
                self.notice = None;
            }
            DirectoryEvent::Loaded(captains) => {
                self.loading = false;
                self.captains = captains;
            }
            DirectoryEvent::LoadFailed(message) => {
                self.loading = false;
                self.notice = Some(Notice::error(message));
            }
            DirectoryEvent::QueryChanged(query) => {
                self.query = query;
            }
        }
        self
    }

    /// Capitanes que coinciden con el filtro actual
    pub fn visible(&self) -> Vec<Captain> {
        filter_captains(&self.captains, &self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_filters_without_reload() {
        let view = DirectoryView::default()
            .apply(DirectoryEvent::Loaded(vec![
                Captain {
                    id: 1,
                    name: "Mahmoud".to_string(),
                    phone: "0991".to_string(),
                },
                Captain {
                    id: 2,
                    name: "Ali".to_string(),
                    phone: "0552".to_string(),
                },
            ]))
            .apply(DirectoryEvent::QueryChanged("ALI".to_string()));
        let visible = view.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
        assert_eq!(view.captains.len(), 2);
    }
}
