//! Validation boundary for vision provider output
//!
//! Model responses are free text that usually, but not always, contain a
//! bare JSON object. Sometimes it is wrapped in a markdown code fence or
//! surrounded by prose. Everything that leaves this module is a fully
//! populated `FacialAnalysis`; anything else is rejected with a message
//! naming the first missing or malformed field.

use serde_json::{Map, Value};

use crate::{
    error::{AppError, AppResult},
    models::{FacialAnalysis, FacialFeatures, Recommendation},
};

const FEATURE_KEYS: [&str; 8] = [
    "eyes",
    "lips",
    "cheeks",
    "jawline",
    "forehead",
    "noseShape",
    "skinTexture",
    "symmetry",
];

fn invalid(detail: impl std::fmt::Display) -> AppError {
    AppError::ExternalApi(format!("Invalid response format: {}", detail))
}

/// Extracts the outermost JSON object from a model response
pub fn extract_json(response: &str) -> AppResult<&str> {
    let start = response.find('{');
    let end = response.rfind('}');

    match (start, end) {
        (Some(start), Some(end)) if end > start => Ok(&response[start..=end]),
        _ => Err(AppError::ExternalApi(
            "Could not find valid JSON in response".to_string(),
        )),
    }
}

/// Parses and validates a raw model response into a `FacialAnalysis`
pub fn parse_analysis(response: &str) -> AppResult<FacialAnalysis> {
    let json = extract_json(response)?;
    let value: Value = serde_json::from_str(json).map_err(|e| invalid(e))?;
    let root = value
        .as_object()
        .ok_or_else(|| invalid("expected a JSON object"))?;

    let skin_type = required_str(root, "skinType")?;
    let concerns = string_list(root, "concerns")?;
    let features = parse_features(root)?;

    let recommendations = root
        .get("recommendations")
        .and_then(Value::as_array)
        .filter(|recs| !recs.is_empty())
        .ok_or_else(|| invalid("recommendations must be a non-empty array"))?
        .iter()
        .enumerate()
        .map(|(index, rec)| parse_recommendation(index, rec))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(FacialAnalysis {
        skin_type,
        concerns,
        features,
        recommendations,
    })
}

fn required_str(object: &Map<String, Value>, key: &str) -> AppResult<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| invalid(format!("missing {}", key)))
}

fn string_list(object: &Map<String, Value>, key: &str) -> AppResult<Vec<String>> {
    let items = object
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| invalid(format!("{} must be an array", key)))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(format!("{} must contain only strings", key)))
        })
        .collect()
}

fn parse_features(root: &Map<String, Value>) -> AppResult<FacialFeatures> {
    let features = root
        .get("features")
        .and_then(Value::as_object)
        .ok_or_else(|| invalid("missing features"))?;

    for key in FEATURE_KEYS {
        required_str(features, key).map_err(|_| invalid(format!("missing feature {}", key)))?;
    }

    serde_json::from_value(Value::Object(features.clone())).map_err(|e| invalid(e))
}

fn parse_recommendation(index: usize, value: &Value) -> AppResult<Recommendation> {
    let rec = value
        .as_object()
        .ok_or_else(|| invalid(format!("recommendation {} is not an object", index)))?;

    let field = |key: &str| {
        required_str(rec, key)
            .map_err(|_| invalid(format!("recommendation {} is missing {}", index, key)))
    };

    let category = field("category")?;
    let product_type = field("productType")?;
    let reason = field("reason")?;

    let priority = rec
        .get("priority")
        .and_then(Value::as_u64)
        .filter(|p| *p >= 1)
        .and_then(|p| u32::try_from(p).ok())
        .ok_or_else(|| {
            invalid(format!(
                "recommendation {} must have a positive integer priority",
                index
            ))
        })?;

    let ingredients = string_list(rec, "ingredients")
        .map_err(|_| invalid(format!("recommendation {} has invalid ingredients", index)))?;

    Ok(Recommendation {
        category,
        product_type,
        reason,
        priority,
        ingredients,
    })
}
