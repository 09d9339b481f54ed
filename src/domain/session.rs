use crate::domain::lead::LeadBatch;
use crate::error::LeadError;

#[derive(Debug, Clone)]
pub struct Session {
    pub industry: String,
    pub location: String,
    pub count: u8,
    pub generating: bool,
    pub error: Option<String>,
    pub batch: LeadBatch,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            industry: "e-commerce stores using Shopify".to_string(),
            location: "California, USA".to_string(),
            count: 5,
            generating: false,
            error: None,
            batch: LeadBatch::default(),
        }
    }
}

impl Session {
    pub fn update_inputs(&mut self, industry: &str, location: &str, count: u8) {
        self.industry = industry.to_string();
        self.location = location.to_string();
        self.count = count;
    }

    // Returns false when a generation is already in flight.
    pub fn begin_generation(&mut self) -> bool {
        if self.generating {
            return false;
        }
        self.generating = true;
        self.error = None;
        self.batch = LeadBatch::default();
        true
    }

    // A success never renders next to an error, so any message raised while
    // the call was in flight is dropped with the settlement.
    pub fn complete_generation(&mut self, outcome: Result<LeadBatch, LeadError>) {
        match outcome {
            Ok(batch) => {
                self.batch = batch;
                self.error = None;
            }
            Err(error) => self.error = Some(error.to_string()),
        }
        self.generating = false;
    }

    // Local validation; keeps the displayed batch.
    pub fn fail_validation(&mut self, message: String) {
        self.error = Some(message);
    }
}
