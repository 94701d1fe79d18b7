use std::env;

use anyhow::Context;

use crate::models::pet::PetSpecies;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    // Onboarding defaults for the companion pet
    pub pet_name: String,
    pub pet_species: PetSpecies,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            frontend_url: "http://localhost:3000".into(),
            cors_extra_origins: Vec::new(),
            pet_name: "Frodo".into(),
            pet_species: PetSpecies::Frog,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().context("PORT must be a number")?,
            Err(_) => defaults.port,
        };

        let pet_species = match env::var("PET_SPECIES") {
            Ok(raw) => raw
                .parse::<PetSpecies>()
                .map_err(|e| anyhow::anyhow!("PET_SPECIES: {}", e))?,
            Err(_) => defaults.pet_species,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            cors_extra_origins: env::var("CORS_EXTRA_ORIGINS")
                .map(|extra| {
                    extra
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),

            pet_name: env::var("PET_NAME")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.pet_name),
            pet_species,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
