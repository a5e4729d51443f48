use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateInfo {
    pub sigla: String,
    pub nome: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityInfo {
    pub id: i64,
    pub nome: String,
}

/// Read-only lookup against the IBGE localities API with a static fallback:
/// a slow, failing or empty remote must never leave the location pickers
/// blank.
#[derive(Clone)]
pub struct LocationService {
    client: Client,
    base_url: String,
}

impl LocationService {
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self { client, base_url }
    }

    pub async fn list_states(&self) -> Result<Vec<StateInfo>> {
        match self.fetch_states().await {
            Ok(states) if !states.is_empty() => Ok(states),
            Ok(_) => {
                tracing::warn!("IBGE returned an empty state list, using fallback");
                Ok(fallback_states())
            }
            Err(err) => {
                tracing::warn!(error = ?err, "IBGE state lookup failed, using fallback");
                Ok(fallback_states())
            }
        }
    }

    pub async fn list_cities(&self, uf: &str) -> Result<Vec<CityInfo>> {
        match self.fetch_cities(uf).await {
            Ok(cities) => Ok(cities),
            Err(err) => {
                tracing::warn!(error = ?err, uf, "IBGE municipality lookup failed");
                Ok(Vec::new())
            }
        }
    }

    async fn fetch_states(&self) -> Result<Vec<StateInfo>> {
        let url = Url::parse(&format!("{}/estados?orderBy=nome", self.base_url))
            .map_err(|e| crate::error::Error::Internal(format!("Bad IBGE URL: {e}")))?;
        let states = self
            .client
            .get(url)
            .send()
            .await?
            .json::<Vec<StateInfo>>()
            .await?;
        Ok(states)
    }

    async fn fetch_cities(&self, uf: &str) -> Result<Vec<CityInfo>> {
        let url = Url::parse(&format!("{}/estados/{}/municipios", self.base_url, uf))
            .map_err(|e| crate::error::Error::Internal(format!("Bad IBGE URL: {e}")))?;
        let cities = self
            .client
            .get(url)
            .send()
            .await?
            .json::<Vec<CityInfo>>()
            .await?;
        Ok(cities)
    }
}

/// The 27 federative units, shipped locally.
pub fn fallback_states() -> Vec<StateInfo> {
    [
        ("AC", "Acre"),
        ("AL", "Alagoas"),
        ("AP", "Amapá"),
        ("AM", "Amazonas"),
        ("BA", "Bahia"),
        ("CE", "Ceará"),
        ("DF", "Distrito Federal"),
        ("ES", "Espírito Santo"),
        ("GO", "Goiás"),
        ("MA", "Maranhão"),
        ("MT", "Mato Grosso"),
        ("MS", "Mato Grosso do Sul"),
        ("MG", "Minas Gerais"),
        ("PA", "Pará"),
        ("PB", "Paraíba"),
        ("PR", "Paraná"),
        ("PE", "Pernambuco"),
        ("PI", "Piauí"),
        ("RJ", "Rio de Janeiro"),
        ("RN", "Rio Grande do Norte"),
        ("RS", "Rio Grande do Sul"),
        ("RO", "Rondônia"),
        ("RR", "Roraima"),
        ("SC", "Santa Catarina"),
        ("SP", "São Paulo"),
        ("SE", "Sergipe"),
        ("TO", "Tocantins"),
    ]
    .into_iter()
    .map(|(sigla, nome)| StateInfo {
        sigla: sigla.to_string(),
        nome: nome.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_covers_all_federative_units() {
        let states = fallback_states();
        assert_eq!(states.len(), 27);
        assert!(states.iter().any(|s| s.sigla == "SP"));
        assert!(states.iter().any(|s| s.sigla == "DF"));
    }
}
