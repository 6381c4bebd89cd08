//! Deployment notes

use reqwest::Method;
use tracing::debug;

use super::{deployment_path, require_api};
use crate::client::{DeploymentApi, segment};
use crate::error::Result;
use crate::models::{Note, Notes};
use crate::validate::MultiError;

fn notes_path(deployment_id: &str) -> String {
    format!("{}/notes", deployment_path(deployment_id))
}

#[derive(Debug, Clone, Default)]
pub struct NotesParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub deployment_id: String,
}

impl<'a> NotesParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi, deployment_id: impl Into<String>) -> Self {
        Self {
            api: Some(api),
            deployment_id: deployment_id.into(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new("deployment note list");
        merr.check_api(self.api);
        merr.check_deployment_id(&self.deployment_id);
        merr.into_result()
    }
}

pub async fn list_notes(params: &NotesParams<'_>) -> Result<Notes> {
    params.validate()?;
    let api = require_api(params.api, "deployment note list")?;
    api.send_body(api.request(Method::GET, &notes_path(&params.deployment_id)))
        .await
}

#[derive(Debug, Clone, Default)]
pub struct AddNoteParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub deployment_id: String,
    pub message: String,
}

impl<'a> AddNoteParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi, deployment_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            api: Some(api),
            deployment_id: deployment_id.into(),
            message: message.into(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new("deployment note add");
        merr.check_api(self.api);
        merr.check_deployment_id(&self.deployment_id);
        merr.check_not_empty(&self.message, "note message");
        merr.into_result()
    }
}

/// Attach a note; the reply lists every note of the deployment
pub async fn add_note(params: &AddNoteParams<'_>) -> Result<Notes> {
    params.validate()?;
    let api = require_api(params.api, "deployment note add")?;

    let note = Note {
        message: params.message.clone(),
        ..Default::default()
    };
    debug!(deployment_id = %params.deployment_id, "adding note");
    let request = api
        .request(Method::POST, &notes_path(&params.deployment_id))
        .json(&note);
    api.send_body(request).await
}

#[derive(Debug, Clone, Default)]
pub struct UpdateNoteParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub deployment_id: String,
    pub note_id: String,
    pub message: String,
    /// Expected note version; the update fails on mismatch
    pub version: Option<String>,
}

impl<'a> UpdateNoteParams<'a> {
    #[must_use]
    pub fn new(
        api: &'a DeploymentApi,
        deployment_id: impl Into<String>,
        note_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            api: Some(api),
            deployment_id: deployment_id.into(),
            note_id: note_id.into(),
            message: message.into(),
            version: None,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new("deployment note update");
        merr.check_api(self.api);
        merr.check_deployment_id(&self.deployment_id);
        merr.check_not_empty(&self.note_id, "note id");
        merr.check_not_empty(&self.message, "note message");
        merr.into_result()
    }
}

pub async fn update_note(params: &UpdateNoteParams<'_>) -> Result<Note> {
    params.validate()?;
    let api = require_api(params.api, "deployment note update")?;

    let path = format!("{}/{}", notes_path(&params.deployment_id), segment(&params.note_id));
    let mut request = api.request(Method::PUT, &path).json(&Note {
        message: params.message.clone(),
        ..Default::default()
    });
    if let Some(version) = &params.version {
        request = request.query(&[("version", version)]);
    }
    api.send_body(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DEPLOYMENT_ID, api, deployment_path};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_notes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{}/notes", deployment_path())))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "notes": [{ "id": "1", "message": "resized", "user_id": "admin" }]
            })))
            .mount(&server)
            .await;

        let api = api(&server);
        let notes = list_notes(&NotesParams::new(&api, DEPLOYMENT_ID)).await.unwrap();
        assert_eq!(notes.notes[0].message, "resized");
    }

    #[tokio::test]
    async fn test_add_note() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{}/notes", deployment_path())))
            .and(body_json(json!({ "message": "maintenance window" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "notes": [{ "id": "2", "message": "maintenance window" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api(&server);
        let notes = add_note(&AddNoteParams::new(&api, DEPLOYMENT_ID, "maintenance window"))
            .await
            .unwrap();
        assert_eq!(notes.notes.len(), 1);
    }

    #[tokio::test]
    async fn test_update_note_with_version() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(format!("{}/notes/2", deployment_path())))
            .and(query_param("version", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "2",
                "message": "edited"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api(&server);
        let mut params = UpdateNoteParams::new(&api, DEPLOYMENT_ID, "2", "edited");
        params.version = Some("3".to_string());
        let note = update_note(&params).await.unwrap();
        assert_eq!(note.id.as_deref(), Some("2"));
    }

    #[test]
    fn test_empty_message_rejected() {
        let params = AddNoteParams {
            deployment_id: DEPLOYMENT_ID.to_string(),
            message: " ".to_string(),
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "deployment note add: 2 errors occurred:\n\
             \t* api reference is required for the operation\n\
             \t* note message cannot be empty"
        );
    }
}
