use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::LeadError;

pub const MAX_LEAD_COUNT: u8 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct LeadQuery {
    pub industry: String,
    pub location: String,
    pub count: u8,
}

impl LeadQuery {
    pub fn parse(industry: &str, location: &str, count: u8) -> Result<LeadQuery, LeadError> {
        let industry = industry.trim();
        let location = location.trim();

        if industry.is_empty() || location.is_empty() {
            return Err(LeadError::Validation(
                "Please fill in both industry and location fields.".to_string(),
            ));
        }
        if count == 0 || count > MAX_LEAD_COUNT {
            return Err(LeadError::Validation(format!(
                "Number of leads must be between 1 and {}.",
                MAX_LEAD_COUNT
            )));
        }

        Ok(LeadQuery {
            industry: industry.to_string(),
            location: location.to_string(),
            count,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub business_name: String,
    pub website: String,
    pub potential_pain_point: String,
    pub personalized_pitch: String,
}

impl Lead {
    /// "N/A" means the model found no website; it must never become a link.
    /// Bare domains get an https:// prefix.
    pub fn website_link(&self) -> Option<String> {
        let website = self.website.trim();
        if website.is_empty() || website == "N/A" {
            return None;
        }
        if website.starts_with("http") {
            Some(website.to_string())
        } else {
            Some(format!("https://{}", website))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadBatch {
    pub leads: Vec<Lead>,
}

impl LeadBatch {
    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }
}

// The field descriptions steer the model and are part of the contract.
pub fn lead_batch_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "leads": {
                "type": "array",
                "description": "A list of generated business leads.",
                "items": {
                    "type": "object",
                    "properties": {
                        "businessName": {
                            "type": "string",
                            "description": "The name of the business."
                        },
                        "website": {
                            "type": "string",
                            "description": "The business's website URL. Should be 'N/A' if not found."
                        },
                        "potentialPainPoint": {
                            "type": "string",
                            "description": "A specific, plausible problem this business might face with their current online presence (e.g., 'Outdated design not mobile-friendly', 'Slow page load speed affecting user experience', 'Lack of a clear call-to-action')."
                        },
                        "personalizedPitch": {
                            "type": "string",
                            "description": "A concise, compelling 2-3 sentence pitch that introduces the web development agency and highlights how it can solve the identified pain point."
                        }
                    },
                    "required": ["businessName", "website", "potentialPainPoint", "personalizedPitch"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["leads"],
        "additionalProperties": false
    })
}
