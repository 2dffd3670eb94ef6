use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Wire tags that select [`SlaveKind::Container`].
///
/// `"docker"` is the tag used by existing slave maps.
const CONTAINER_TAGS: &[&str] = &["container", "docker"];

/// How a slave is started.
///
/// Each variant carries the parameters its launch strategy needs.
/// Tags without a launch strategy are kept as [`SlaveKind::Unsupported`] so the launcher can report them per slave
/// instead of rejecting the whole slave map.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSlaveKind", into = "RawSlaveKind")]
pub enum SlaveKind {
    /// Run the slave inside a container on a remote container engine.
    Container {
        /// Image reference (e.g. `"slave:latest"`).
        image: String,
        /// Endpoint of the container engine (e.g. `"tcp://host:2375"`).
        engine_url: String,
    },
    /// Any other `type` value.
    Unsupported { kind: String },
}

impl SlaveKind {
    /// Returns a short symbolic identifier for logging and routing:
    /// - `"container"`
    /// - the raw tag for unsupported kinds
    pub fn kind(&self) -> &str {
        match self {
            SlaveKind::Container { .. } => "container",
            SlaveKind::Unsupported { kind } => kind,
        }
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self, SlaveKind::Container { .. })
    }
}

#[derive(Serialize, Deserialize)]
struct RawSlaveKind {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    engine_url: Option<String>,
}

impl TryFrom<RawSlaveKind> for SlaveKind {
    type Error = ModelError;

    fn try_from(raw: RawSlaveKind) -> Result<Self, Self::Error> {
        let tag = raw.kind.trim();
        if tag.is_empty() {
            return Err(ModelError::EmptyKind);
        }
        if !CONTAINER_TAGS.contains(&tag) {
            return Ok(SlaveKind::Unsupported {
                kind: tag.to_string(),
            });
        }

        let image = raw.image.ok_or_else(|| ModelError::MissingField {
            kind: tag.to_string(),
            field: "image",
        })?;
        let engine_url = raw.engine_url.ok_or_else(|| ModelError::MissingField {
            kind: tag.to_string(),
            field: "engine_url",
        })?;
        Ok(SlaveKind::Container { image, engine_url })
    }
}

impl From<SlaveKind> for RawSlaveKind {
    fn from(kind: SlaveKind) -> Self {
        match kind {
            SlaveKind::Container { image, engine_url } => RawSlaveKind {
                kind: "container".to_string(),
                image: Some(image),
                engine_url: Some(engine_url),
            },
            SlaveKind::Unsupported { kind } => RawSlaveKind {
                kind,
                image: None,
                engine_url: None,
            },
        }
    }
}
