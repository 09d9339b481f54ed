use std::net::TcpListener;
use std::sync::Mutex;

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::ApiKeySettings,
    domain::Session,
    routes::{default_route, lead_route},
    services::LeadGenerator,
};

pub fn run(
    listener: TcpListener,
    generator: LeadGenerator,
    api_keys: ApiKeySettings,
) -> Result<Server, std::io::Error> {
    let generator = web::Data::new(generator);
    let api_keys = web::Data::new(api_keys);
    let session = web::Data::new(Mutex::new(Session::default()));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .service(default_route::index)
            .service(
                web::scope("/lead")
                    .service(lead_route::generate_leads)
                    .service(lead_route::export_csv)
                    .service(lead_route::export_clipboard),
            )
            .app_data(generator.clone())
            .app_data(api_keys.clone())
            .app_data(session.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
