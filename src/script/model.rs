use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{CodecastError, CodecastResult};

/// What a [`CodeAction`] does to its file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// A new file is typed from scratch.
    Create,
    /// An existing file is retyped with its new contents.
    Update,
    /// A file is removed; `content` is what stays on screen meanwhile.
    Delete,
}

impl ActionKind {
    /// Upper-case label shown in the editor status bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

/// One atomic edit step of a tutorial.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CodeAction {
    /// Target file path. Opaque; never touched on disk.
    pub file: String,
    /// Edit kind.
    #[serde(rename = "action")]
    pub kind: ActionKind,
    /// Text progressively revealed while the action is active.
    pub content: String,
    /// Wall-clock budget of the action, in seconds. Must be > 0.
    #[serde(rename = "duration")]
    pub duration_secs: f64,
}

impl CodeAction {
    /// Build an action.
    pub fn new(
        file: impl Into<String>,
        kind: ActionKind,
        content: impl Into<String>,
        duration_secs: f64,
    ) -> Self {
        Self {
            file: file.into(),
            kind,
            content: content.into(),
            duration_secs,
        }
    }
}

/// Narration plus ordered code actions, as produced by the script generator.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    /// Text handed to speech synthesis.
    #[serde(default)]
    pub narration: String,
    /// Edit steps in playback order.
    #[serde(default)]
    pub code_actions: Vec<CodeAction>,
}

impl Script {
    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CodecastResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CodecastError::serde(format!("parse script JSON: {e}")))
    }

    /// Parse a script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CodecastResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CodecastError::validation(format!("open script JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> CodecastResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CodecastError::serde(format!("serialize script JSON: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/model.rs"]
mod tests;
