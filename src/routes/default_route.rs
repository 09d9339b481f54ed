use std::sync::Mutex;

use actix_web::{get, web, HttpResponse};
use askama::Template;

use crate::domain::{Lead, Session};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    industry: String,
    location: String,
    count: u8,
    generating: bool,
    error: Option<String>,
    leads: Vec<LeadCard>,
}

// Website link precomputed so the template never sees the "N/A" marker.
struct LeadCard {
    business_name: String,
    website_link: Option<String>,
    potential_pain_point: String,
    personalized_pitch: String,
}

impl From<&Lead> for LeadCard {
    fn from(lead: &Lead) -> Self {
        LeadCard {
            business_name: lead.business_name.clone(),
            website_link: lead.website_link(),
            potential_pain_point: lead.potential_pain_point.clone(),
            personalized_pitch: lead.personalized_pitch.clone(),
        }
    }
}

pub fn render_index(session: &Session) -> HttpResponse {
    let template = IndexTemplate {
        industry: session.industry.clone(),
        location: session.location.clone(),
        count: session.count,
        generating: session.generating,
        error: session.error.clone(),
        leads: session.batch.leads.iter().map(LeadCard::from).collect(),
    };
    HttpResponse::Ok().body(template.render().unwrap())
}

#[get("/")]
async fn index(session: web::Data<Mutex<Session>>) -> HttpResponse {
    let session = session.lock().unwrap();
    render_index(&session)
}
