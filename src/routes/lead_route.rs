use std::sync::Mutex;

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use crate::configuration::ApiKeySettings;
use crate::domain::{export, LeadQuery, Session};
use crate::routes::default_route::render_index;
use crate::services::LeadGenerator;

#[derive(Deserialize)]
struct GenerateLeadsForm {
    industry: String,
    location: String,
    count: u8,
}

#[post("/generate")]
async fn generate_leads(
    form: web::Form<GenerateLeadsForm>,
    generator: web::Data<LeadGenerator>,
    api_keys: web::Data<ApiKeySettings>,
    session: web::Data<Mutex<Session>>,
) -> HttpResponse {
    // Validate and flip the in-flight flag under the lock, then release it
    // for the duration of the provider call.
    let query = {
        let mut state = session.lock().unwrap();
        state.update_inputs(&form.industry, &form.location, form.count);

        match LeadQuery::parse(&form.industry, &form.location, form.count) {
            Ok(query) => {
                if !state.begin_generation() {
                    log::warn!("Ignoring generate request, another one is in flight");
                    return render_index(&state);
                }
                query
            }
            Err(error) => {
                state.fail_validation(error.to_string());
                return render_index(&state);
            }
        }
    };

    log::info!(
        "Generating {} leads for {} in {}",
        query.count,
        query.industry,
        query.location
    );
    let outcome = generator.generate(&query, &api_keys.openai).await;

    let mut state = session.lock().unwrap();
    state.complete_generation(outcome);
    render_index(&state)
}

#[get("/export/csv")]
async fn export_csv(session: web::Data<Mutex<Session>>) -> HttpResponse {
    let state = session.lock().unwrap();
    if state.batch.is_empty() {
        return HttpResponse::SeeOther()
            .insert_header(("Location", "/"))
            .finish();
    }

    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!(r#"attachment; filename="{}""#, export::CSV_FILE_NAME),
        ))
        .body(export::to_csv(&state.batch.leads))
}

#[get("/export/clipboard")]
async fn export_clipboard(session: web::Data<Mutex<Session>>) -> HttpResponse {
    let state = session.lock().unwrap();
    if state.batch.is_empty() {
        return HttpResponse::NoContent().finish();
    }

    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(export::to_clipboard_text(&state.batch.leads))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use async_trait::async_trait;

    use crate::configuration::ApiKeySettings;
    use crate::domain::{LeadBatch, Session};
    use crate::routes::lead_route::{export_clipboard, export_csv, generate_leads};
    use crate::services::{CompletionError, CompletionModel, CompletionRequest, LeadGenerator};

    struct StubModel {
        body: String,
        calls: AtomicUsize,
    }

    impl StubModel {
        fn returning(body: &str) -> Arc<Self> {
            Arc::new(StubModel {
                body: body.to_string(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CompletionModel for Arc<StubModel> {
        async fn complete(
            &self,
            _credential: &str,
            _request: &CompletionRequest,
        ) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    fn app_data(
        stub: &Arc<StubModel>,
    ) -> (
        web::Data<LeadGenerator>,
        web::Data<ApiKeySettings>,
        web::Data<Mutex<Session>>,
    ) {
        (
            web::Data::new(LeadGenerator::new(
                Box::new(stub.clone()),
                "gpt-4o-mini".to_string(),
            )),
            web::Data::new(ApiKeySettings {
                openai: "sk-test".to_string(),
            }),
            web::Data::new(Mutex::new(Session::default())),
        )
    }

    const TWO_LEADS: &str = r#"{"leads":[
        {"businessName":"Crumb & Co","website":"crumb.co","potentialPainPoint":"No online ordering","personalizedPitch":"We can add ordering to your site."},
        {"businessName":"Flour Power","website":"N/A","potentialPainPoint":"Outdated website","personalizedPitch":"We can rebuild it."}
    ]}"#;

    #[actix_web::test]
    async fn generate_renders_the_returned_leads() {
        let stub = StubModel::returning(TWO_LEADS);
        let (generator, api_keys, session) = app_data(&stub);
        let app = test::init_service(
            App::new()
                .app_data(generator)
                .app_data(api_keys)
                .app_data(session)
                .service(web::scope("/lead").service(generate_leads)),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/lead/generate")
            .set_form([
                ("industry", "bakeries"),
                ("location", "Austin, TX"),
                ("count", "2"),
            ])
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(response).await.to_vec()).unwrap();
        assert!(body.contains("Crumb &amp; Co"));
        assert!(body.contains("Flour Power"));
        assert!(body.contains("Generated Leads (2)"));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn generate_with_blank_industry_shows_error_and_skips_the_model() {
        let stub = StubModel::returning(TWO_LEADS);
        let (generator, api_keys, session) = app_data(&stub);
        let app = test::init_service(
            App::new()
                .app_data(generator)
                .app_data(api_keys)
                .app_data(session)
                .service(web::scope("/lead").service(generate_leads)),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/lead/generate")
            .set_form([
                ("industry", "   "),
                ("location", "Austin, TX"),
                ("count", "2"),
            ])
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(response).await.to_vec()).unwrap();
        assert!(body.contains("Please fill in both industry and location fields."));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn csv_export_with_no_leads_redirects_home() {
        let stub = StubModel::returning(TWO_LEADS);
        let (generator, api_keys, session) = app_data(&stub);
        let app = test::init_service(
            App::new()
                .app_data(generator)
                .app_data(api_keys)
                .app_data(session)
                .service(web::scope("/lead").service(export_csv)),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/lead/export/csv")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get("Location").unwrap(), "/");
    }

    #[actix_web::test]
    async fn csv_export_downloads_the_current_batch() {
        let stub = StubModel::returning(TWO_LEADS);
        let (generator, api_keys, session) = app_data(&stub);
        {
            let mut state = session.lock().unwrap();
            let batch: LeadBatch = serde_json::from_str(TWO_LEADS).unwrap();
            state.complete_generation(Ok(batch));
        }
        let app = test::init_service(
            App::new()
                .app_data(generator)
                .app_data(api_keys)
                .app_data(session)
                .service(web::scope("/lead").service(export_csv)),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/lead/export/csv")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get("Content-Disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(disposition, r#"attachment; filename="leads.csv""#);
        let body = String::from_utf8(test::read_body(response).await.to_vec()).unwrap();
        assert!(body.starts_with("Business Name,Website,Potential Pain Point,Personalized Pitch\n"));
        assert!(body.contains(r#""Crumb & Co""#));
    }

    #[actix_web::test]
    async fn clipboard_export_with_no_leads_answers_no_content() {
        let stub = StubModel::returning(TWO_LEADS);
        let (generator, api_keys, session) = app_data(&stub);
        let app = test::init_service(
            App::new()
                .app_data(generator)
                .app_data(api_keys)
                .app_data(session)
                .service(web::scope("/lead").service(export_clipboard)),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/lead/export/clipboard")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let body = test::read_body(response).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn clipboard_export_serves_the_current_batch_as_text() {
        let stub = StubModel::returning(TWO_LEADS);
        let (generator, api_keys, session) = app_data(&stub);
        {
            let mut state = session.lock().unwrap();
            let batch: LeadBatch = serde_json::from_str(TWO_LEADS).unwrap();
            state.complete_generation(Ok(batch));
        }
        let app = test::init_service(
            App::new()
                .app_data(generator)
                .app_data(api_keys)
                .app_data(session)
                .service(web::scope("/lead").service(export_clipboard)),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/lead/export/clipboard")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get("Content-Type")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
        let body = String::from_utf8(test::read_body(response).await.to_vec()).unwrap();
        assert!(body.starts_with("Business Name: Crumb & Co\n"));
        assert!(body.contains("\n\n---\n\n"));
        assert!(body.contains("Website: N/A"));
    }
}
