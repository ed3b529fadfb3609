use aweber_tags::{
    configuration::get_configuration,
    routes::TriggerResponse,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};
use once_cell::sync::Lazy;
use secrecy::SecretString;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const LIST_ID: &str = "6187432";

pub struct TestApp {
    pub address: String,
    pub aweber_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_trigger(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/triggers/aweber", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn trigger(&self, body: &serde_json::Value) -> TriggerResponse {
        let response = self.post_trigger(body).await;
        assert_eq!(200, response.status().as_u16());
        response
            .json()
            .await
            .expect("Failed to parse the trigger response.")
    }

    pub fn aweber_url(&self, route: &str) -> String {
        format!("{}/1.0/{}", self.aweber_server.uri(), route)
    }

    pub fn subscriber_link(&self) -> String {
        self.aweber_url(&format!("accounts/1/lists/{LIST_ID}/subscribers/7"))
    }

    /// Mounts the account and list collections the reconciler resolves first.
    pub async fn mount_account_and_list(&self) {
        Mock::given(method("GET"))
            .and(path("/1.0/accounts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "entries": [{
                    "id": 1,
                    "self_link": self.aweber_url("accounts/1"),
                    "lists_collection_link": self.aweber_url("accounts/1/lists")
                }],
                "total_size": 1
            })))
            .mount(&self.aweber_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/1.0/accounts/1/lists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "entries": [
                    {
                        "id": 1000,
                        "name": "other",
                        "self_link": self.aweber_url("accounts/1/lists/1000"),
                        "subscribers_collection_link": self.aweber_url("accounts/1/lists/1000/subscribers")
                    },
                    {
                        "id": LIST_ID.parse::<u64>().unwrap(),
                        "name": "newsletter",
                        "self_link": self.aweber_url(&format!("accounts/1/lists/{LIST_ID}")),
                        "subscribers_collection_link": self.aweber_url(&format!("accounts/1/lists/{LIST_ID}/subscribers"))
                    }
                ],
                "total_size": 2
            })))
            .mount(&self.aweber_server)
            .await;
    }

    pub fn subscriber_json(&self, email: &str, tags: serde_json::Value) -> serde_json::Value {
        json!({
            "id": 7,
            "email": email,
            "name": "Ada",
            "tags": tags,
            "custom_fields": {},
            "status": "subscribed",
            "self_link": self.subscriber_link(),
            "uuid": "3f2b1c4e-0a7d-4c1e-9a51-3c6e2b8f0d11"
        })
    }
}

pub fn subscribers_path() -> String {
    format!("/1.0/accounts/1/lists/{LIST_ID}/subscribers")
}

pub fn subscriber_path() -> String {
    format!("/1.0/accounts/1/lists/{LIST_ID}/subscribers/7")
}

/// A trigger body for form fields `10` (email) and `11` (name).
pub fn trigger_body(metas: serde_json::Value, tags: &str) -> serde_json::Value {
    json!({
        "action": {
            "list_id": LIST_ID,
            "fields": { "email": "10", "name": "11", "tags": tags }
        },
        "entry": { "id": 99, "metas": metas },
        "form": { "id": 3, "name": "Webinar signup" }
    })
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_token(Some(SecretString::from("test-access-token".to_string()))).await
}

pub async fn spawn_app_with_token(access_token: Option<SecretString>) -> TestApp {
    Lazy::force(&TRACING);

    let aweber_server = MockServer::start().await;

    let config = {
        let mut c = get_configuration().expect("Failed to read configuration");
        c.app.port = 0;
        c.aweber.base_url = format!("{}/1.0/", aweber_server.uri());
        c.aweber.access_token = access_token;
        c
    };

    let application = Application::build(config)
        .await
        .expect("Failed to build application.");
    let port = application.get_port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        aweber_server,
        api_client: reqwest::Client::new(),
    }
}
