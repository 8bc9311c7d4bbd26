//! Parsing of `POST /optimize` bodies.
//!
//! Fields are read leniently: a JSON number or a string holding a finite
//! number is accepted, a missing or `null` field keeps the server default.

use super::error::ApiError;
use crate::steel::RunConfig;
use serde_json::{Map, Value};

/// Caller-supplied run parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OptimizeRequest {
    pub min_strength: Option<f64>,
    pub max_cost: Option<f64>,
}

impl OptimizeRequest {
    /// Parses a raw request body. An empty (or whitespace-only) body is
    /// treated as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::InvalidInput(format!("malformed JSON body: {e}")))?;
        let Value::Object(fields) = value else {
            return Err(ApiError::InvalidInput(
                "request body must be a JSON object".to_string(),
            ));
        };

        Ok(Self {
            min_strength: numeric_field(&fields, "min_strength")?,
            max_cost: numeric_field(&fields, "max_cost")?,
        })
    }

    /// Overlays the supplied fields on `defaults`.
    pub fn apply(&self, defaults: &RunConfig) -> RunConfig {
        let mut config = defaults.clone();
        if let Some(v) = self.min_strength {
            config = config.with_min_strength(v);
        }
        if let Some(v) = self.max_cost {
            config = config.with_max_cost(v);
        }
        config
    }
}

fn numeric_field(fields: &Map<String, Value>, name: &str) -> Result<Option<f64>, ApiError> {
    let parsed = match fields.get(name) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ApiError::InvalidInput(format!(
            "{name} must be a finite number"
        ))),
    }
}
