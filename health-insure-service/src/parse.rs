use serde::de::DeserializeOwned;
use tracing::warn;

use crate::{
    error::{Result, ServiceError},
    models::{FindHospitalsResponse, MAX_HOSPITALS},
};

/// Decodes AI output as strict JSON into `T`. No repair is attempted.
pub fn parse_ai_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str::<T>(text.trim()).map_err(|e| {
        warn!(
            error = %e,
            response_length = %text.len(),
            "AI response did not match the expected shape"
        );
        ServiceError::MalformedAiResponse(e.to_string())
    })
}

pub fn parse_hospitals(text: &str) -> Result<FindHospitalsResponse> {
    let parsed: FindHospitalsResponse = parse_ai_json(text)?;
    if parsed.hospitals.len() > MAX_HOSPITALS {
        return Err(ServiceError::MalformedAiResponse(format!(
            "expected at most {} hospitals, got {}",
            MAX_HOSPITALS,
            parsed.hospitals.len()
        )));
    }
    Ok(parsed)
}
