use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

/// `GET {endpoint}/models` with a bearer key, OpenAI-compatible shape.
/// Returns the sorted model ids; any HTTP or shape problem is an error the
/// caller surfaces without touching its configuration.
pub async fn fetch_model_ids(endpoint: &str, key: &str) -> Result<Vec<String>, AppError> {
    let base = endpoint.trim_end_matches('/');
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/models", base))
        .bearer_auth(key)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(AppError::Other(format!(
            "models endpoint returned {}",
            response.status()
        )));
    }

    let body: ModelsResponse = response.json().await?;
    let mut ids: Vec<String> = body.data.into_iter().map(|m| m.id).collect();
    ids.sort();
    Ok(ids)
}
