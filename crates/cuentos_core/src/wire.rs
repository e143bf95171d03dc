//! JSON contract with the generation service.

use cuentos_error::{TransportError, TransportErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Service endpoints, each a JSON POST.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum Endpoint {
    /// `/resumen`
    #[strum(serialize = "/resumen")]
    Summary,
    /// `/villanos`
    #[strum(serialize = "/villanos")]
    Villains,
    /// `/heroes`
    #[strum(serialize = "/heroes")]
    Heroes,
    /// `/historia`
    #[strum(serialize = "/historia")]
    Story,
    /// `/scrape`
    #[strum(serialize = "/scrape")]
    Scrape,
}

impl Endpoint {
    /// URL path, leading slash included.
    pub fn path(self) -> &'static str {
        self.into()
    }

    /// Field that carries the payload on success.
    pub fn success_field(self) -> &'static str {
        match self {
            Endpoint::Summary => "resumen",
            Endpoint::Villains => "villanos",
            Endpoint::Heroes => "heroes",
            Endpoint::Story => "historia",
            Endpoint::Scrape => "archivo_txt",
        }
    }
}

/// Body of `/resumen`: an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {}

/// Body of `/villanos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VillainsRequest {
    /// Summary the villains are generated from
    pub resumen: String,
}

/// Body of `/heroes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroesRequest {
    /// Summary text
    pub resumen: String,
    /// Chosen villain
    pub villano: String,
}

/// Body of `/historia`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRequest {
    /// Summary text
    pub resumen: String,
    /// Chosen villain
    pub villano: String,
    /// Chosen hero
    pub heroe: String,
}

/// Body of `/scrape`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// Page whose text seeds the summary
    pub url: String,
}

/// A reply that was read successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageReply<T> {
    /// The success field was present
    Success(T),
    /// The `error` field was present instead
    BusinessError(String),
}

impl StageReply<String> {
    /// Classify a decoded JSON body for `endpoint`.
    ///
    /// The success field wins if both are present. A body carrying neither
    /// is a transport failure.
    ///
    /// ```
    /// use cuentos_core::{Endpoint, StageReply};
    /// use serde_json::json;
    ///
    /// let reply = StageReply::from_value(Endpoint::Heroes, json!({"error": "x"})).unwrap();
    /// assert_eq!(reply, StageReply::BusinessError("x".to_string()));
    /// ```
    pub fn from_value(endpoint: Endpoint, body: Value) -> Result<Self, TransportError> {
        let field = endpoint.success_field();
        if let Some(Value::String(text)) = body.get(field) {
            return Ok(StageReply::Success(text.clone()));
        }
        match body.get("error") {
            Some(Value::String(message)) => Ok(StageReply::BusinessError(message.clone())),
            Some(other) if !other.is_null() => Ok(StageReply::BusinessError(other.to_string())),
            _ => Err(TransportError::new(TransportErrorKind::MalformedReply {
                endpoint: endpoint.path().to_string(),
                field: field.to_string(),
            })),
        }
    }

    /// Decode a raw body for `endpoint`.
    pub fn from_slice(endpoint: Endpoint, bytes: &[u8]) -> Result<Self, TransportError> {
        let body: Value = serde_json::from_slice(bytes)
            .map_err(|e| TransportError::new(TransportErrorKind::Decode(e.to_string())))?;
        Self::from_value(endpoint, body)
    }
}
