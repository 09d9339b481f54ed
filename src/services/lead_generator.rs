use serde_json::Value;

use crate::domain::lead::{lead_batch_schema, Lead, LeadBatch, LeadQuery};
use crate::error::LeadError;

use super::{CompletionModel, CompletionRequest};

// Warm sampling so repeated batches vary.
const LEAD_TEMPERATURE: f32 = 0.8;

pub struct LeadGenerator {
    client: Box<dyn CompletionModel>,
    model: String,
}

impl LeadGenerator {
    pub fn new(client: Box<dyn CompletionModel>, model: String) -> Self {
        LeadGenerator { client, model }
    }

    pub async fn generate(
        &self,
        query: &LeadQuery,
        credential: &str,
    ) -> Result<LeadBatch, LeadError> {
        if credential.trim().is_empty() {
            return Err(LeadError::MissingCredential);
        }

        let request = CompletionRequest {
            model: self.model.clone(),
            prompt: build_lead_prompt(query),
            schema: lead_batch_schema(),
            temperature: LEAD_TEMPERATURE,
        };

        let raw = self.client.complete(credential, &request).await?;
        let mut batch = parse_lead_batch(&raw)?;

        if batch.len() > query.count as usize {
            log::warn!(
                "Model returned {} leads for a request of {}, truncating",
                batch.len(),
                query.count
            );
            batch.leads.truncate(query.count as usize);
        }

        Ok(batch)
    }
}

fn build_lead_prompt(query: &LeadQuery) -> String {
    format!(
        "Act as an expert B2B lead generation specialist. \
        Your task is to generate a list of {} potential clients for a web development agency. \
        The target is \"{}\" located in \"{}\". \
        For each lead, provide the required information in the specified JSON format. \
        The pain points should be specific and actionable, and the pitch should be directly \
        tied to solving that pain point.",
        query.count, query.industry, query.location
    )
}

/// The schema request constrains the model but is not trusted: the payload
/// must still turn out to be an object carrying a `leads` array, and every
/// record must carry all four fields.
fn parse_lead_batch(raw: &str) -> Result<LeadBatch, LeadError> {
    let payload: Value = serde_json::from_str(raw.trim())
        .map_err(|error| LeadError::MalformedResponse(format!("not valid JSON ({})", error)))?;

    let leads_value = match payload.get("leads") {
        Some(value) if value.is_array() => value.clone(),
        _ => {
            return Err(LeadError::MalformedResponse(
                "expected a 'leads' array".to_string(),
            ))
        }
    };

    let leads: Vec<Lead> = serde_json::from_value(leads_value).map_err(|error| {
        LeadError::MalformedResponse(format!("lead record missing required fields ({})", error))
    })?;

    Ok(LeadBatch { leads })
}
