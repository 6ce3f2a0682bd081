use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

// Claves que el portal necesita para hablar con sus servicios externos.
// Solo avisamos si faltan: el servidor arranca igual.
const EXPECTED_KEYS: [&str; 5] = [
    "SUPABASE_URL",
    "SUPABASE_SERVICE_ROLE_KEY",
    "IMAGEKIT_PUBLIC_KEY",
    "IMAGEKIT_PRIVATE_KEY",
    "IMAGEKIT_URL_ENDPOINT",
];

#[derive(Debug, Clone, Default)]
pub struct ImageKitConfig {
    pub public_key: String,
    pub private_key: String,
    pub url_endpoint: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub imagekit: Option<ImageKitConfig>,
    pub public_dir: String,
    pub site_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: None,
            supabase_url: None,
            supabase_key: None,
            imagekit: None,
            public_dir: "public".to_string(),
            site_name: "La Lupa".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        for key in EXPECTED_KEYS {
            if optional(key).is_none() {
                warn!("❌ La variable {key} no está definida en .env");
            }
        }

        let imagekit = match (
            optional("IMAGEKIT_PUBLIC_KEY"),
            optional("IMAGEKIT_PRIVATE_KEY"),
            optional("IMAGEKIT_URL_ENDPOINT"),
        ) {
            (Some(public_key), Some(private_key), Some(url_endpoint)) => Some(ImageKitConfig {
                public_key,
                private_key,
                url_endpoint,
            }),
            _ => None,
        };

        Self {
            port: try_load("PORT", 3000),
            database_url: optional("DATABASE_URL"),
            supabase_url: optional("SUPABASE_URL"),
            supabase_key: optional("SUPABASE_SERVICE_ROLE_KEY"),
            imagekit,
            public_dir: try_load("PUBLIC_DIR", "public".to_string()),
            site_name: try_load("SITE_NAME", "La Lupa".to_string()),
        }
    }
}

// Valores vacíos cuentan como ausentes; se recortan espacios (p.ej. el endpoint de ImageKit)
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match optional(key) {
        None => {
            info!("{key} no definida, usando valor por defecto: {default}");
            default
        }
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Valor inválido para {key} '{raw}': {e}, usando valor por defecto: {default}");
            default
        }),
    }
}
