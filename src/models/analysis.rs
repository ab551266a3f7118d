use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One product suggestion produced by the vision provider
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Compared case-insensitively against `Product::category`
    pub category: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub priority: u32,
    /// Ingredient names looked for inside product ingredients
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Per-feature descriptions returned alongside the skin analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FacialFeatures {
    pub eyes: String,
    pub lips: String,
    pub cheeks: String,
    pub jawline: String,
    pub forehead: String,
    pub nose_shape: String,
    pub skin_texture: String,
    pub symmetry: String,
}

/// Validated output of a vision provider call
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FacialAnalysis {
    pub skin_type: String,
    #[serde(default)]
    pub concerns: Vec<String>,
    pub features: FacialFeatures,
    pub recommendations: Vec<Recommendation>,
}

/// An analysis about to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnalysis {
    /// Data URL of the submitted photo
    pub image_url: String,
    pub analysis: FacialAnalysis,
}

impl NewAnalysis {
    pub fn new(image_url: String, analysis: FacialAnalysis) -> Self {
        Self {
            image_url,
            analysis,
        }
    }
}

/// A stored analysis record. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub id: i32,
    pub image_url: String,
    pub features: FacialFeatures,
    pub skin_type: String,
    #[serde(default)]
    pub concerns: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub created_at: DateTime<Utc>,
}

impl Analysis {
    /// Builds the stored record for `new` under the given id
    pub fn from_new(id: i32, new: NewAnalysis, created_at: DateTime<Utc>) -> Self {
        let NewAnalysis {
            image_url,
            analysis,
        } = new;

        Self {
            id,
            image_url,
            features: analysis.features,
            skin_type: analysis.skin_type,
            concerns: analysis.concerns,
            recommendations: analysis.recommendations,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_deserializes_without_concerns() {
        let json = serde_json::json!({
            "id": 1,
            "imageUrl": "data:image/jpeg;base64,AAAA",
            "features": FacialFeatures::default(),
            "skinType": "oily",
            "recommendations": [{ "category": "serum", "ingredients": ["Niacinamide"] }],
            "createdAt": "2024-05-01T12:00:00Z"
        });

        let analysis: Analysis = serde_json::from_value(json).unwrap();
        assert!(analysis.concerns.is_empty());
        assert_eq!(analysis.recommendations[0].category, "serum");
        assert_eq!(analysis.recommendations[0].priority, 0);
    }

    #[test]
    fn test_from_new_copies_provider_output() {
        let facial = FacialAnalysis {
            skin_type: "dry".to_string(),
            concerns: vec!["redness".to_string()],
            features: FacialFeatures::default(),
            recommendations: vec![Recommendation {
                category: "moisturizer".to_string(),
                ..Default::default()
            }],
        };
        let new = NewAnalysis::new("data:image/png;base64,AAAA".to_string(), facial);

        let analysis = Analysis::from_new(3, new, Utc::now());
        assert_eq!(analysis.id, 3);
        assert_eq!(analysis.skin_type, "dry");
        assert_eq!(analysis.concerns, vec!["redness".to_string()]);
        assert_eq!(analysis.image_url, "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_features_use_camel_case_keys() {
        let json = serde_json::to_value(FacialFeatures::default()).unwrap();
        assert!(json.get("noseShape").is_some());
        assert!(json.get("skinTexture").is_some());
    }
}
