//! Caller for model listing, querying and inference.
//!
//! The read endpoints return the response body verbatim as JSON text; the
//! shapes are owned by the serialization layer (see
//! [`crate::objects::InsightResponse`] for prediction results).

use tracing::error;

use crate::api::endpoint::Model;
use crate::client::session::InsightClient;
use crate::error::{InsightError, Result};
use crate::objects::TensorInstances;

pub struct ModelCaller<'a> {
    client: &'a InsightClient,
}

impl<'a> ModelCaller<'a> {
    pub(crate) fn new(client: &'a InsightClient) -> Self {
        ModelCaller { client }
    }

    fn require_connected(&self) -> Result<()> {
        if !self.client.is_connected() {
            return Err(InsightError::Configuration("no active client".to_string()));
        }
        Ok(())
    }

    fn read(&self, variant: Model, id: Option<&str>, datasource: Option<&str>) -> Result<Option<String>> {
        self.require_connected()?;
        let path = variant.to_path(self.client.project_id(), id, datasource)?;

        Ok(self.client.call_cloud(
            || self.client.get(&path, None),
            |response| {
                if !response.is_successful() {
                    error!(
                        "failed to list models for project {}, url {}, code {} and reason {}",
                        self.client.project_id(),
                        self.client.url(),
                        response.code(),
                        response.message()
                    );
                    return Ok(None);
                }
                Ok(Some(response.text()))
            },
        ))
    }

    /// List every model of the project.
    pub fn all(&self) -> Result<Option<String>> {
        self.read(Model::All, None, None)
    }

    /// List models trained on a datasource; falls back to the configured
    /// default datasource when none is given.
    pub fn by_datasource(&self, datasource: Option<&str>) -> Result<Option<String>> {
        let datasource = datasource.unwrap_or(self.client.configuration().datasource());
        self.read(Model::ByDatasource, None, Some(datasource))
    }

    /// List published models carrying a label.
    pub fn published(&self, label: &str) -> Result<Option<String>> {
        self.read(Model::Published, None, Some(label))
    }

    /// Fetch the corpus delta of a model.
    pub fn delta(&self, model_id: &str) -> Result<Option<String>> {
        self.read(Model::Delta, Some(model_id), None)
    }

    /// Run a prediction against a model with the given tensor instances.
    pub fn predict(
        &self,
        model_name: &str,
        datasource: &str,
        instances: &TensorInstances,
    ) -> Result<Option<String>> {
        self.require_connected()?;
        let payload = serde_json::to_string(instances)?;
        let path = Model::Predict.to_path(
            self.client.project_id(),
            Some(model_name),
            Some(datasource),
        )?;

        Ok(self.client.call_cloud(
            || self.client.post(&path, None, &payload),
            |response| {
                if !response.is_successful() {
                    error!(
                        "failed to predict for project {}, payload {}, url {}, code {} and reason {}",
                        self.client.project_id(),
                        payload,
                        self.client.url(),
                        response.code(),
                        response.message()
                    );
                    return Ok(None);
                }
                Ok(Some(response.text()))
            },
        ))
    }
}
