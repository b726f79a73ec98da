//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las variables tienen un valor por defecto salvo las credenciales del
//! backend remoto; un valor mal formado es un error de arranque.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::models::GeoCoordinate;
use crate::services::route_view_service::{ColorStrategy, DEFAULT_ZOOM};
use crate::utils::errors::AppError;

/// Origen de los datos del panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBackend {
    Supabase,
    Memory,
}

impl FromStr for DataBackend {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "supabase" => Ok(DataBackend::Supabase),
            "memory" => Ok(DataBackend::Memory),
            other => Err(AppError::Config(format!("unknown DATA_BACKEND '{}'", other))),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub log_level: String,
    pub cors_origins: Vec<String>,
    pub data_backend: DataBackend,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub storage_bucket: String,
    pub orders_table: String,
    pub listings_table: String,
    pub captains_table: String,
    pub listing_category: String,
    pub geocoding_url: String,
    pub geocoding_country: String,
    pub map_center: GeoCoordinate,
    pub map_zoom: u8,
    pub route_colors: ColorStrategy,
    pub http_timeout: Duration,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            log_level: "info".to_string(),
            cors_origins: Vec::new(),
            data_backend: DataBackend::Supabase,
            supabase_url: None,
            supabase_anon_key: None,
            storage_bucket: "images".to_string(),
            orders_table: "delv_orders".to_string(),
            listings_table: "services".to_string(),
            captains_table: "users".to_string(),
            listing_category: "ads".to_string(),
            geocoding_url: "https://nominatim.openstreetmap.org".to_string(),
            geocoding_country: "sy".to_string(),
            map_center: GeoCoordinate {
                lat: 33.5138,
                lon: 36.2765,
            },
            map_zoom: DEFAULT_ZOOM,
            route_colors: ColorStrategy::Stable,
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración del proceso
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Leer la configuración desde cualquier fuente clave/valor
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let data_backend = match var("DATA_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.data_backend,
        };

        let config = Self {
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var(&var, "PORT", defaults.port)?,
            host: var("HOST").unwrap_or(defaults.host),
            log_level: var("LOG_LEVEL").unwrap_or(defaults.log_level),
            cors_origins: var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            data_backend,
            supabase_url: var("SUPABASE_URL"),
            supabase_anon_key: var("SUPABASE_ANON_KEY"),
            storage_bucket: var("STORAGE_BUCKET").unwrap_or(defaults.storage_bucket),
            orders_table: var("ORDERS_TABLE").unwrap_or(defaults.orders_table),
            listings_table: var("LISTINGS_TABLE").unwrap_or(defaults.listings_table),
            captains_table: var("CAPTAINS_TABLE").unwrap_or(defaults.captains_table),
            listing_category: var("LISTING_CATEGORY").unwrap_or(defaults.listing_category),
            geocoding_url: var("GEOCODING_URL").unwrap_or(defaults.geocoding_url),
            geocoding_country: var("GEOCODING_COUNTRY").unwrap_or(defaults.geocoding_country),
            map_center: GeoCoordinate::new(
                parse_var(&var, "MAP_DEFAULT_LAT", defaults.map_center.lat)?,
                parse_var(&var, "MAP_DEFAULT_LON", defaults.map_center.lon)?,
            )
            .map_err(|e| AppError::Config(format!("invalid map center: {}", e)))?,
            map_zoom: parse_var(&var, "MAP_ZOOM", defaults.map_zoom)?,
            route_colors: match var("ROUTE_COLORS") {
                Some(value) => value
                    .parse()
                    .map_err(|_| AppError::Config(format!("unknown ROUTE_COLORS '{}'", value)))?,
                None => defaults.route_colors,
            },
            http_timeout: Duration::from_secs(parse_var(
                &var,
                "HTTP_TIMEOUT_SECS",
                defaults.http_timeout.as_secs(),
            )?),
        };

        if config.data_backend == DataBackend::Supabase
            && (config.supabase_url.is_none() || config.supabase_anon_key.is_none())
        {
            return Err(AppError::Config(
                "SUPABASE_URL and SUPABASE_ANON_KEY must be set when DATA_BACKEND=supabase".to_string(),
            ));
        }

        Ok(config)
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T, V>(var: &V, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    V: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(value) => value
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value '{}'", key, value))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_memory_backend_uses_defaults() {
        let config = EnvironmentConfig::from_lookup(lookup(&[("DATA_BACKEND", "memory")])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.orders_table, "delv_orders");
        assert_eq!(config.listing_category, "ads");
        assert_eq!(config.map_zoom, 13);
        assert_eq!(config.route_colors, ColorStrategy::Stable);
        assert_eq!(config.server_url(), "0.0.0.0:3000");
    }

    #[test]
    fn test_supabase_requires_credentials() {
        let result = EnvironmentConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(AppError::Config(_))));

        let config = EnvironmentConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_ANON_KEY", "key"),
        ]))
        .unwrap();
        assert_eq!(config.data_backend, DataBackend::Supabase);
    }

    #[test]
    fn test_malformed_number_is_config_error() {
        let result = EnvironmentConfig::from_lookup(lookup(&[("DATA_BACKEND", "memory"), ("PORT", "abc")]));
        assert!(matches!(result, Err(AppError::Config(_))));

        let result =
            EnvironmentConfig::from_lookup(lookup(&[("DATA_BACKEND", "memory"), ("MAP_DEFAULT_LAT", "NaN")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_cors_origins_split() {
        let config = EnvironmentConfig::from_lookup(lookup(&[
            ("DATA_BACKEND", "memory"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
        ]))
        .unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }
}
