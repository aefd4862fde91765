use std::net::SocketAddr;
use tokio::net::TcpListener;

pub struct TestServer {
    pub url: String,
    #[allow(dead_code)]
    pub addr: SocketAddr,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(gallery_server::config::Config {
            port: 0, // OS assigns port
            ..Default::default()
        })
        .await
    }

    pub async fn start_with(config: gallery_server::config::Config) -> Self {
        let state = gallery_server::state::AppState::new(&config).await.unwrap();
        let app = gallery_server::routes::router(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give server a moment to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            url: format!("http://{addr}"),
            addr,
        }
    }
}

/// Claims header value for a caller, as the upstream authenticator would set it
#[allow(dead_code)]
pub fn claims(subject: Option<&str>, roles: &[&str]) -> String {
    let mut claims = Vec::new();
    if let Some(subject) = subject {
        claims.push(serde_json::json!({
            "type": "sub",
            "value": subject,
            "issuer": "https://idp.test",
        }));
    }
    for role in roles {
        claims.push(serde_json::json!({ "type": "role", "value": role }));
    }
    serde_json::Value::Array(claims).to_string()
}
