//! Asynchronous actions on a project page.
//!
//! A project page lives at `<site>/projects/<id>`; its scripts remove mods
//! from the mod list and load modal form fragments from paths below it.
//! CSRF tokens are left to the caller's HTTP session.

use std::time::Duration;

use modlog_common::error::{ModlogError, Result};
use thiserror::Error;

/// Failure of a project page action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// The request never produced a response.
    #[error("{action} failed: {message}")]
    Network {
        /// Action being performed.
        action: &'static str,
        /// Transport error description.
        message: String,
    },

    /// The site rejected the request.
    #[error("{action} returned HTTP {status}")]
    Status {
        /// Action being performed.
        action: &'static str,
        /// HTTP status code.
        status: u16,
    },
}

/// A modal form the project page can load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormRequest {
    /// Blank update post.
    NewUpdate,
    /// Existing update post.
    EditUpdate {
        /// Update to edit.
        update_id: String,
    },
    /// Blank mod entry.
    AddMod,
    /// Follower list.
    Followers,
    /// Existing comment.
    EditComment {
        /// Comment to edit.
        comment_id: String,
    },
}

impl FormRequest {
    /// Value of the `form` query parameter.
    #[must_use]
    pub const fn form_name(&self) -> &'static str {
        match self {
            Self::NewUpdate => "newUpdate",
            Self::EditUpdate { .. } => "editUpdate",
            Self::AddMod => "addMod",
            Self::Followers => "followers",
            Self::EditComment { .. } => "editComment",
        }
    }

    /// Full query string parameters.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("form", self.form_name().to_string())];
        match self {
            Self::EditUpdate { update_id } => params.push(("updateId", update_id.clone())),
            Self::EditComment { comment_id } => params.push(("commentId", comment_id.clone())),
            Self::NewUpdate | Self::AddMod | Self::Followers => {}
        }
        params
    }
}

/// Client for one project page.
#[derive(Debug, Clone)]
pub struct ProjectClient {
    http: reqwest::Client,
    project_url: String,
}

impl ProjectClient {
    /// Creates a client for the project page at `project_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(project_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModlogError::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        let project_url = project_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, project_url })
    }

    /// Project page URL, without a trailing slash.
    #[must_use]
    pub fn project_url(&self) -> &str {
        &self.project_url
    }

    /// Removes the mod at `index` from the project's mod list.
    ///
    /// Returns `true` only when the site answers 200, the signal the page
    /// uses to drop the entry from view.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::Status` for a rejected request (403 for a
    /// non-owner, 404 for an index past the end of the list).
    pub async fn delete_mod(&self, index: usize) -> std::result::Result<bool, ProjectError> {
        const ACTION: &str = "delete mod";
        let url = format!("{}/delete-mod/{index}", self.project_url);
        tracing::debug!(%url, "deleting mod");

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| network(ACTION, &e))?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "error deleting mod");
            return Err(ProjectError::Status {
                action: ACTION,
                status: status.as_u16(),
            });
        }
        Ok(status == reqwest::StatusCode::OK)
    }

    /// Fetches the HTML fragment for a modal form.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::Status` if the site refuses the form (403 for
    /// owner-only forms, 400 for an unknown form).
    pub async fn fetch_form(&self, request: &FormRequest) -> std::result::Result<String, ProjectError> {
        const ACTION: &str = "fetch form";
        let url = format!("{}/get-form", self.project_url);
        tracing::debug!(%url, form = request.form_name(), "fetching form");

        let response = self
            .http
            .get(&url)
            .query(&request.params())
            .send()
            .await
            .map_err(|e| network(ACTION, &e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProjectError::Status {
                action: ACTION,
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(|e| network(ACTION, &e))
    }
}

fn network(action: &'static str, error: &reqwest::Error) -> ProjectError {
    ProjectError::Network {
        action,
        message: error.to_string(),
    }
}
