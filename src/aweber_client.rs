use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url, header::LOCATION};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_aux::field_attributes::deserialize_string_from_number;

use crate::{
    domain::{Subscriber, SubscriberEmail, SubscriberPatch, VariableSet},
    routes::error_chain_fmt,
};

#[derive(Clone)]
pub struct AweberClient {
    http_client: Client,
    accounts_url: Url,
    access_token: Option<SecretString>,
}

/// One page of an AWeber collection resource.
#[derive(serde::Deserialize, Debug)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub entries: Vec<T>,
    #[serde(default)]
    pub next_collection_link: Option<String>,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Account {
    pub id: u64,
    pub lists_collection_link: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct MailingList {
    #[serde(deserialize_with = "deserialize_string_from_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub subscribers_collection_link: String,
}

#[derive(Debug)]
pub enum FindOutcome {
    Found(Subscriber),
    NotFound,
}

#[derive(thiserror::Error)]
pub enum AweberError {
    #[error("Failed to talk to the AWeber API.")]
    Transport(#[from] reqwest::Error),
    #[error("AWeber API responded with {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("AWeber API did not return the location of the created subscriber.")]
    MissingLocation,
}

impl std::fmt::Debug for AweberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl AweberClient {
    pub fn new(
        base_url: &str,
        access_token: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Failed parsing AWeber api url {base_url}."))?;
        let accounts_url = base_url
            .join("accounts")
            .context("Failed joining accounts route to AWeber api url.")?;
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the AWeber http client.")?;

        Ok(Self {
            http_client,
            accounts_url,
            access_token,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.access_token.is_some()
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AweberError> {
        let response = self.authorized(self.http_client.get(url)).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    /// The account this installation is connected to, if any.
    #[tracing::instrument(name = "Resolving the AWeber account", skip(self))]
    pub async fn active_account(&self) -> Result<Option<Account>, AweberError> {
        if !self.has_credentials() {
            return Ok(None);
        }

        let accounts: Collection<Account> = self.get_json(self.accounts_url.as_str()).await?;
        Ok(accounts.entries.into_iter().next())
    }

    #[tracing::instrument(
        name = "Looking up the AWeber list",
        skip(self, account),
        fields(account_id = account.id)
    )]
    pub async fn find_list(
        &self,
        account: &Account,
        list_id: &str,
    ) -> Result<Option<MailingList>, AweberError> {
        let mut next_page = Some(account.lists_collection_link.clone());

        while let Some(page_url) = next_page {
            let page: Collection<MailingList> = self.get_json(&page_url).await?;
            if let Some(list) = page.entries.into_iter().find(|l| l.id == list_id) {
                return Ok(Some(list));
            }
            next_page = page.next_collection_link;
        }

        Ok(None)
    }

    #[tracing::instrument(
        name = "Finding subscriber by email",
        skip(self, list),
        fields(list_id = %list.id, list_name = ?list.name)
    )]
    pub async fn find_subscriber(
        &self,
        list: &MailingList,
        email: &SubscriberEmail,
    ) -> Result<FindOutcome, AweberError> {
        let response = self
            .authorized(
                self.http_client
                    .get(&list.subscribers_collection_link)
                    .query(&[("ws.op", "find"), ("email", email.as_ref())]),
            )
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(FindOutcome::NotFound);
        }

        let found: Collection<Subscriber> = ensure_success(response).await?.json().await?;
        Ok(match found.entries.into_iter().next() {
            Some(subscriber) => FindOutcome::Found(subscriber),
            None => FindOutcome::NotFound,
        })
    }

    #[tracing::instrument(
        name = "Creating a new subscriber",
        skip(self, list, variables),
        fields(list_id = %list.id)
    )]
    pub async fn create_subscriber(
        &self,
        list: &MailingList,
        variables: &VariableSet,
    ) -> Result<Subscriber, AweberError> {
        let response = self
            .authorized(
                self.http_client
                    .post(&list.subscribers_collection_link)
                    .json(variables),
            )
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AweberError::MissingLocation)?
            .to_string();

        self.get_json(&location).await
    }

    #[tracing::instrument(name = "Updating an existing subscriber", skip(self, patch))]
    pub async fn update_subscriber(
        &self,
        self_link: &str,
        patch: &SubscriberPatch,
    ) -> Result<Subscriber, AweberError> {
        let response = self
            .authorized(self.http_client.patch(self_link).json(patch))
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }
}

async fn ensure_success(response: Response) -> Result<Response, AweberError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AweberError::Api { status, body })
}
