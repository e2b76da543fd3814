//! HTTP implementation of the workout gateway.

use crate::domain::{GatewayError, GatewayResult, NewWorkout, WorkoutGateway, WorkoutRecord};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Talks to `{base}/api/workouts` with a blocking reqwest client.
///
/// The client is built without a request timeout: a backend that never
/// answers keeps the request pending.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn workouts_url(&self) -> String {
        format!("{}/api/workouts", self.base_url)
    }
}

impl WorkoutGateway for HttpGateway {
    fn create_workout(&self, payload: &NewWorkout) -> GatewayResult<()> {
        let response = self
            .client
            .post(self.workouts_url())
            .json(payload)
            .send()
            .map_err(|err| {
                warn!(error = %err, "create request failed");
                GatewayError::SaveFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(%status, %body, "backend rejected workout");
            return Err(GatewayError::SaveFailed);
        }
        debug!(%status, "workout created");
        Ok(())
    }

    fn list_workouts(&self, user_id: &str) -> GatewayResult<Vec<WorkoutRecord>> {
        let response = self
            .client
            .get(self.workouts_url())
            .query(&[("user_id", user_id)])
            .send()
            .map_err(|err| {
                warn!(error = %err, "list request failed");
                GatewayError::FetchFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, user_id, "backend refused workout list");
            return Err(GatewayError::FetchFailed);
        }
        response.json::<Vec<WorkoutRecord>>().map_err(|err| {
            warn!(error = %err, user_id, "unreadable workout list");
            GatewayError::FetchFailed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let gateway = HttpGateway::new("http://localhost:8000/").unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:8000");
        assert_eq!(gateway.workouts_url(), "http://localhost:8000/api/workouts");
    }
}
