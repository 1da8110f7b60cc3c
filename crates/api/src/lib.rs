mod auth;
mod comment;
mod error;
mod job_schedulers;
mod notification;
mod shared;
mod status;
mod tag;
mod task;
mod user;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use job_schedulers::start_notification_job;
use std::net::TcpListener;
use tarefa_infra::TarefaContext;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    auth::configure_routes(cfg);
    comment::configure_routes(cfg);
    notification::configure_routes(cfg);
    status::configure_routes(cfg);
    tag::configure_routes(cfg);
    task::configure_routes(cfg);
    user::configure_routes(cfg);
}

fn configure_cors(ctx: &TarefaContext) -> Cors {
    if ctx.config.cors_allowed_origins.is_empty() {
        return Cors::permissive();
    }
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allow_any_header()
        .supports_credentials()
        .max_age(3600);
    for origin in &ctx.config.cors_allowed_origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: TarefaContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        start_notification_job(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(context: TarefaContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(configure_cors(&ctx))
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
