use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::aweber_client::AweberClient;
use crate::configuration::Settings;
use crate::routes::{aweber_trigger, health_check};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let aweber_client = config.aweber.client()?;

        let address = format!("{}:{}", config.app.host, config.app.port);
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind {address}."))?;
        let port = listener.local_addr()?.port();
        let server = run(listener, aweber_client)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(listener: TcpListener, aweber_client: AweberClient) -> Result<Server, anyhow::Error> {
    let aweber_client = web::Data::new(aweber_client);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/triggers/aweber", web::post().to(aweber_trigger))
            .app_data(aweber_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
