use crate::dto::captain_dto::CaptainsResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::views::DirectoryEvent;

pub struct DirectoryController {
    state: AppState,
}

impl DirectoryController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    async fn dispatch(&self, event: DirectoryEvent) -> CaptainsResponse {
        let mut view = self.state.directory_view.write().await;
        *view = view.clone().apply(event);
        let captains = view.visible();
        CaptainsResponse {
            query: view.query.clone(),
            total: view.captains.len(),
            captains,
        }
    }

    /// Activar la vista: trae la tabla completa y aplica el filtro
    pub async fn activate(&self, query: String) -> Result<CaptainsResponse, AppError> {
        self.dispatch(DirectoryEvent::LoadStarted).await;

        match self.state.directory_service.fetch_all().await {
            Ok(captains) => {
                self.dispatch(DirectoryEvent::Loaded(captains)).await;
                Ok(self.dispatch(DirectoryEvent::QueryChanged(query)).await)
            }
            Err(e) => {
                self.dispatch(DirectoryEvent::LoadFailed(e.user_notice())).await;
                Err(e)
            }
        }
    }

    /// Solo filtra la colección ya cargada
    pub async fn filter(&self, query: String) -> CaptainsResponse {
        self.dispatch(DirectoryEvent::QueryChanged(query)).await
    }
}
