//! Prompt templates, one per endpoint. All builders are pure string interpolation.

use crate::models::{ClaimCheckRequest, PolicyRecommendationRequest};

/// Characters of policy text forwarded to the summariser.
pub const SUMMARY_INPUT_CHARS: usize = 8000;

const ANALYTICS_PROMPT: &str = r#"Generate realistic health insurance analytics data for an Indian dashboard:

Return valid JSON:
{
  "claim_status_distribution": {
    "labels": ["Approved", "Pending", "Rejected"],
    "data": [int, int, int]
  },
  "monthly_claims": {
    "labels": ["March", "April", "May", "June", "July", "August"],
    "data": [int, int, int, int, int, int]
  },
  "key_metrics": {
    "total_claims": int,
    "approval_rate": float,
    "avg_claim_amount": int
  }
}"#;

/// Blank or whitespace-only context counts as no context.
pub fn ask_prompt(question: &str, document_context: Option<&str>) -> String {
    match document_context.filter(|c| !c.trim().is_empty()) {
        Some(context) => format!(
            "You are a helpful insurance assistant. A user uploaded a policy and asked:
Context:
---
{context}
---
Question: {question}
Answer:"
        ),
        None => format!(
            "You are a helpful insurance assistant. The user asked a general health insurance question:
Question: {question}
Answer:"
        ),
    }
}

pub fn summary_prompt(full_text: &str) -> String {
    let excerpt: String = full_text.chars().take(SUMMARY_INPUT_CHARS).collect();
    format!("Summarize the following insurance policy in bullet points:\n\n{excerpt}")
}

pub fn claim_check_prompt(request: &ClaimCheckRequest) -> String {
    format!(
        "You are an expert insurance claim analyst. Evaluate the following claim based on the policy:

Context:
---
{context}
---
Claim Type: {claim_type}
Bill Attached: {bill}

Return JSON with:
- decision: Eligible/Ineligible/More Information Needed
- reason: explanation
- required_documents: list of required documents

JSON:",
        context = request.document_context,
        claim_type = request.claim_type,
        bill = if request.bill_attached { "Yes" } else { "No" },
    )
}

pub fn recommend_policy_prompt(request: &PolicyRecommendationRequest) -> String {
    format!(
        "Suggest 2-3 health insurance policies for:
- Age: {age}
- Gender: {gender}
- Conditions: {conditions}
- Coverage: {coverage}
- Budget: ₹{budget}

Return JSON with:
recommendations: [
  {{policy_name, reasoning, key_features (list), estimated_premium}}
]",
        age = request.age,
        gender = request.gender,
        conditions = request.health_conditions,
        coverage = request.coverage,
        budget = request.budget,
    )
}

pub fn find_hospitals_prompt(location: &str) -> String {
    format!(
        "Find up to 5 major cashless network hospitals in \"{location}\" (India).
Return JSON with:
hospitals: [{{ name, address, specialties (list) }}]"
    )
}

pub fn analytics_prompt() -> &'static str {
    ANALYTICS_PROMPT
}
