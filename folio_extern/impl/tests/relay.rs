use std::sync::Arc;

use folio_demo::{JANE_PAYLOAD, NOW_DISPLAY, RECIPIENT_NAME};
use folio_extern_contracts::relay::MailRelayApiService;
use folio_extern_impl::{
    http::HttpClient,
    relay::{MailRelayApiServiceConfig, MailRelayApiServiceImpl},
};
use folio_testing::relay::{ReceivedMessage, RelayCredentials, RelayServer, SEND_ROUTE};
use tokio::net::TcpListener;
use url::Url;

#[tokio::test]
async fn send() {
    let relay = setup(false).await;

    let result = relay.service(&relay.credentials).send(JANE_PAYLOAD.clone()).await;

    assert!(result.unwrap());
    assert_eq!(
        relay.server.received(),
        [ReceivedMessage {
            from_name: "Jane Doe".into(),
            from_email: "jane@example.com".into(),
            message: "Let's build something together".into(),
            time: NOW_DISPLAY.into(),
            to_name: RECIPIENT_NAME.into(),
        }]
    );
}

#[tokio::test]
async fn send_rejected() {
    let relay = setup(true).await;

    let result = relay.service(&relay.credentials).send(JANE_PAYLOAD.clone()).await;

    assert!(!result.unwrap());
    assert!(relay.server.received().is_empty());
}

#[tokio::test]
async fn send_invalid_credentials() {
    let relay = setup(false).await;
    let credentials = RelayCredentials {
        template_id: "some-other-template".into(),
        ..relay.credentials.clone()
    };

    let result = relay.service(&credentials).send(JANE_PAYLOAD.clone()).await;

    assert!(!result.unwrap());
    assert!(relay.server.received().is_empty());
}

#[tokio::test]
async fn send_unreachable() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = MailRelayApiServiceImpl::new(
        config(
            format!("http://{addr}{SEND_ROUTE}").parse().unwrap(),
            &RelayCredentials::default(),
        ),
        HttpClient::new().unwrap(),
    );

    service.send(JANE_PAYLOAD.clone()).await.unwrap_err();
}

struct TestRelay {
    server: RelayServer,
    credentials: RelayCredentials,
    endpoint: Url,
}

impl TestRelay {
    fn service(&self, credentials: &RelayCredentials) -> MailRelayApiServiceImpl {
        MailRelayApiServiceImpl::new(
            config(self.endpoint.clone(), credentials),
            HttpClient::new().unwrap(),
        )
    }
}

fn config(endpoint: Url, credentials: &RelayCredentials) -> MailRelayApiServiceConfig {
    MailRelayApiServiceConfig {
        send_endpoint: Arc::new(endpoint),
        service_id: credentials.service_id.clone(),
        template_id: credentials.template_id.clone(),
        public_key: credentials.public_key.clone(),
        private_key: None,
    }
}

async fn setup(reject: bool) -> TestRelay {
    let credentials = RelayCredentials::default();
    let server = RelayServer::new(credentials.clone(), reject);

    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = server.router();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    TestRelay {
        server,
        credentials,
        endpoint: format!("http://{addr}{SEND_ROUTE}").parse().unwrap(),
    }
}
