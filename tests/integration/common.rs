use std::net::SocketAddr;

use echo_service::api::{create_router, AppState, ServiceIdentity};
use echo_service::config::Config;
use tokio::net::TcpListener;

/// Serve `config` on 127.0.0.1 with an OS-assigned port and return the base URL.
pub async fn spawn_server(config: Config) -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    let state = AppState::new(ServiceIdentity::from_config(&config));
    let router = create_router(state, &config);
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server error");
    });

    format!("http://{addr}")
}

/// Test config with a recognisable service name.
pub fn test_config() -> Config {
    Config {
        service_name: "Integration API".to_string(),
        ..Config::default()
    }
}
