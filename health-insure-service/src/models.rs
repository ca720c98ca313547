use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Debug, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub document_context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadDocResponse {
    pub status: String,
    pub filename: String,
    pub summary: String,
    pub full_text: String,
}

#[derive(Debug, Clone)]
pub struct ClaimCheckRequest {
    pub claim_type: String,
    pub document_context: String,
    pub bill_attached: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimDecision {
    Eligible,
    Ineligible,
    #[serde(rename = "More Information Needed")]
    MoreInformationNeeded,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClaimCheckResponse {
    pub decision: ClaimDecision,
    pub reason: String,
    pub required_documents: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PolicyRecommendationRequest {
    pub age: String,
    pub gender: String,
    pub health_conditions: String,
    pub coverage: String,
    pub budget: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyRecommendation {
    pub policy_name: String,
    pub reasoning: String,
    pub key_features: Vec<String>,
    pub estimated_premium: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendPolicyResponse {
    pub recommendations: Vec<PolicyRecommendation>,
}

#[derive(Debug, Deserialize)]
pub struct HospitalQuery {
    pub location: String,
}

/// Upper bound on hospitals returned by `/find-hospitals`.
pub const MAX_HOSPITALS: usize = 5;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hospital {
    pub name: String,
    pub address: String,
    pub specialties: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FindHospitalsResponse {
    pub hospitals: Vec<Hospital>,
}

/// Labelled series as rendered by the dashboard charts.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyMetrics {
    pub total_claims: u64,
    // Kept as raw numbers so integer and decimal renderings pass through untouched.
    pub approval_rate: Number,
    pub avg_claim_amount: Number,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsResponse {
    pub claim_status_distribution: ChartSeries,
    pub monthly_claims: ChartSeries,
    pub key_metrics: KeyMetrics,
}
