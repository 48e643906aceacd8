//! Action metadata document advertised to the calling UI.
//!
//! The UI renders a form from `actions[].params` and posts the collected
//! values back to `actions[].path`.

use crate::config::MetadataConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MetadataError {
    #[error("metadata field '{0}' must not be empty")]
    Empty(&'static str),

    #[error("metadata field '{field}' is not an absolute http(s) URL: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("metadata must declare at least one action")]
    NoActions,

    #[error("action path must start with '/': {0}")]
    InvalidPath(String),

    #[error("duplicate action parameter '{0}'")]
    DuplicateParam(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Dynamic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionChains {
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionParam {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub label: String,
    pub description: String,
    pub chains: ActionChains,
    pub path: String,
    pub params: Vec<ActionParam>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionMetadata {
    pub url: String,
    pub icon: String,
    pub title: String,
    pub base_url: String,
    pub description: String,
    pub actions: Vec<DynamicAction>,
}

fn text_param(name: &str, label: &str, description: &str) -> ActionParam {
    ActionParam {
        name: name.to_string(),
        label: label.to_string(),
        kind: "text".to_string(),
        required: true,
        description: description.to_string(),
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), MetadataError> {
    match reqwest::Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        _ => Err(MetadataError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}

impl ActionMetadata {
    /// Build the mint action document
    pub fn from_config(config: &MetadataConfig) -> Self {
        Self {
            url: config.url.clone(),
            icon: config.icon.clone(),
            title: config.title.clone(),
            base_url: config.base_url.clone(),
            description: config.description.clone(),
            actions: vec![DynamicAction {
                kind: ActionKind::Dynamic,
                label: "Validate your X post".to_string(),
                description: "Validate".to_string(),
                chains: ActionChains {
                    source: config.chain_source.clone(),
                },
                path: config.action_path.clone(),
                params: vec![
                    text_param("eventCode", "Event code", "Enter the event code"),
                    text_param("userHandle", "X handle", "Enter your X (Twitter) username"),
                ],
            }],
        }
    }

    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.title.trim().is_empty() {
            return Err(MetadataError::Empty("title"));
        }
        if self.description.trim().is_empty() {
            return Err(MetadataError::Empty("description"));
        }

        check_url("url", &self.url)?;
        check_url("icon", &self.icon)?;
        check_url("baseUrl", &self.base_url)?;

        if self.actions.is_empty() {
            return Err(MetadataError::NoActions);
        }

        for action in &self.actions {
            if action.label.trim().is_empty() {
                return Err(MetadataError::Empty("actions.label"));
            }
            if !action.path.starts_with('/') {
                return Err(MetadataError::InvalidPath(action.path.clone()));
            }

            let mut seen = HashSet::new();
            for param in &action.params {
                if !seen.insert(param.name.as_str()) {
                    return Err(MetadataError::DuplicateParam(param.name.clone()));
                }
            }
        }

        Ok(())
    }
}
