use crate::models::Captain;
use crate::repositories::captain_repository::CaptainRepository;
use crate::utils::errors::AppResult;

/// Directorio de capitanes: carga completa y filtro en memoria
#[derive(Clone)]
pub struct DirectoryService {
    repository: CaptainRepository,
}

impl DirectoryService {
    pub fn new(repository: CaptainRepository) -> Self {
        Self { repository }
    }

    pub async fn fetch_all(&self) -> AppResult<Vec<Captain>> {
        let captains = self.repository.find_all().await.map_err(|e| {
            log::error!("❌ Error fetching captains: {}", e);
            e
        })?;
        log::info!("👥 Loaded {} captains", captains.len());
        Ok(captains)
    }
}

/// Coincidencia por subcadena sin distinguir mayúsculas, en nombre o teléfono
pub fn filter_captains(captains: &[Captain], query: &str) -> Vec<Captain> {
    let needle = query.to_lowercase();
    captains
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle) || c.phone.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
