//! `modlog form` — fetch a project modal form fragment.

use std::time::Duration;

use clap::{Args, ValueEnum};
use modlog_common::config::ModlogConfig;
use modlog_sdk::project::{FormRequest, ProjectClient};

/// Modal form kinds.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormKind {
    /// New update post.
    NewUpdate,
    /// Edit an update post (needs `--update-id`).
    EditUpdate,
    /// New mod entry.
    AddMod,
    /// Follower list.
    Followers,
    /// Edit a comment (needs `--comment-id`).
    EditComment,
}

/// Arguments for the `form` command.
#[derive(Args, Debug)]
pub struct FormArgs {
    /// Project page URL.
    #[arg(long)]
    pub project: String,

    /// Form to fetch.
    #[arg(value_enum)]
    pub kind: FormKind,

    /// Update to edit.
    #[arg(long, required_if_eq("kind", "edit-update"))]
    pub update_id: Option<String>,

    /// Comment to edit.
    #[arg(long, required_if_eq("kind", "edit-comment"))]
    pub comment_id: Option<String>,
}

impl FormArgs {
    /// Builds the request, checking that edit forms carry their id.
    ///
    /// # Errors
    ///
    /// Returns an error if an edit form is missing its id.
    pub fn request(&self) -> anyhow::Result<FormRequest> {
        Ok(match self.kind {
            FormKind::NewUpdate => FormRequest::NewUpdate,
            FormKind::AddMod => FormRequest::AddMod,
            FormKind::Followers => FormRequest::Followers,
            FormKind::EditUpdate => FormRequest::EditUpdate {
                update_id: self
                    .update_id
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("edit-update needs --update-id"))?,
            },
            FormKind::EditComment => FormRequest::EditComment {
                comment_id: self
                    .comment_id
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("edit-comment needs --comment-id"))?,
            },
        })
    }
}

/// Executes the `form` command, printing the HTML fragment.
///
/// # Errors
///
/// Returns an error if the site refuses the form.
pub async fn execute(config: &ModlogConfig, args: FormArgs) -> anyhow::Result<()> {
    let request = args.request()?;
    let client = ProjectClient::new(&args.project, Duration::from_millis(config.timeout_ms))
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let html = client.fetch_form(&request).await?;
    println!("{html}");
    Ok(())
}
