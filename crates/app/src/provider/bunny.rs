//! bunny.net DNS API client.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header::CONTENT_TYPE};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{debug, warn};
use zonegate_core::dns::{
    ListZonesOptions, ListZonesResponse, Record, RecordId, RecordRequest, Zone, ZoneId,
};

use crate::{
    crypto::mask_secret,
    domain::credentials::CredentialsService,
    provider::{DnsProvider, ProviderError},
};

/// Default bunny.net API endpoint.
pub const DEFAULT_BUNNY_API_URL: &str = "https://api.bunny.net";

/// Header carrying the bunny.net API key.
pub const ACCESS_KEY_HEADER: &str = "AccessKey";

/// Configuration for the upstream client.
#[derive(Debug, Clone)]
pub struct BunnyConfig {
    /// API base URL without a trailing slash.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for BunnyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BUNNY_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the bunny.net DNS API.
///
/// The master credential is loaded from the credential store for every call, so replacing it
/// takes effect without a restart.
#[derive(Clone)]
pub struct BunnyClient {
    base_url: String,
    http: Client,
    credentials: Arc<dyn CredentialsService>,
}

impl BunnyClient {
    /// Build a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        config: BunnyConfig,
        credentials: Arc<dyn CredentialsService>,
    ) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("zonegate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ProviderError::Transport)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            credentials,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    /// Attach the master credential, send, and map non-success statuses.
    async fn send(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder + Send,
    ) -> Result<Response, ProviderError> {
        let master = self.credentials.get_master_credential().await?;

        let started = Instant::now();

        let response = build(self.request(method.clone(), path))
            .header(ACCESS_KEY_HEADER, master.expose())
            .send()
            .await;

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let response = match response {
            Ok(response) => response,
            Err(error) => {
                warn!(
                    method = %method,
                    path,
                    elapsed_ms,
                    error = %error,
                    "bunny api call failed"
                );

                return Err(error.into());
            }
        };

        let status = response.status();

        debug!(
            method = %method,
            path,
            status = status.as_u16(),
            elapsed_ms,
            access_key = %mask_secret(master.expose()),
            "bunny api call"
        );

        if status.is_success() {
            return Ok(response);
        }

        Err(error_from_response(status, response).await)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder + Send,
    ) -> Result<T, ProviderError> {
        let response = self.send(method, path, build).await?;

        response.json::<T>().await.map_err(Into::into)
    }
}

impl std::fmt::Debug for BunnyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BunnyClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiErrorBody {
    #[serde(default)]
    error_key: String,

    #[serde(default)]
    field: String,

    #[serde(default)]
    message: String,
}

async fn error_from_response(status: StatusCode, response: Response) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED => return ProviderError::Unauthorized,
        StatusCode::NOT_FOUND => return ProviderError::NotFound,
        _ => {}
    }

    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<ApiErrorBody>(&text).unwrap_or_default();

    let message = if body.message.is_empty() {
        if text.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("upstream error")
                .to_string()
        } else {
            text.trim().to_string()
        }
    } else {
        body.message
    };

    ProviderError::Api {
        status: status.as_u16(),
        error_key: body.error_key,
        field: body.field,
        message,
    }
}

/// Query parameters for zone listing, in the provider's casing.
fn list_query(options: &ListZonesOptions) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();

    if let Some(page) = options.page {
        query.push(("page", page.to_string()));
    }

    if let Some(per_page) = options.per_page {
        query.push(("perPage", per_page.to_string()));
    }

    if let Some(search) = options.search.as_ref().filter(|search| !search.is_empty()) {
        query.push(("search", search.clone()));
    }

    query
}

#[async_trait]
impl DnsProvider for BunnyClient {
    async fn list_zones(
        &self,
        options: &ListZonesOptions,
    ) -> Result<ListZonesResponse, ProviderError> {
        let query = list_query(options);

        self.send_json(Method::GET, "/dnszone", move |request| request.query(&query))
            .await
    }

    async fn get_zone(&self, zone: ZoneId) -> Result<Zone, ProviderError> {
        self.send_json(Method::GET, &format!("/dnszone/{zone}"), |request| request)
            .await
    }

    async fn create_zone(&self, body: Value) -> Result<Zone, ProviderError> {
        self.send_json(Method::POST, "/dnszone", move |request| request.json(&body))
            .await
    }

    async fn update_zone(&self, zone: ZoneId, body: Value) -> Result<Zone, ProviderError> {
        self.send_json(Method::POST, &format!("/dnszone/{zone}"), move |request| {
            request.json(&body)
        })
        .await
    }

    async fn delete_zone(&self, zone: ZoneId) -> Result<(), ProviderError> {
        self.send(Method::DELETE, &format!("/dnszone/{zone}"), |request| request)
            .await
            .map(|_| ())
    }

    async fn check_availability(&self, body: Value) -> Result<Value, ProviderError> {
        self.send_json(Method::POST, "/dnszone/checkavailability", move |request| {
            request.json(&body)
        })
        .await
    }

    async fn import_records(
        &self,
        zone: ZoneId,
        body: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<Value, ProviderError> {
        self.send_json(
            Method::POST,
            &format!("/dnszone/{zone}/import"),
            move |request| {
                let request = match content_type {
                    Some(content_type) => request.header(CONTENT_TYPE, content_type),
                    None => request,
                };

                request.body(body)
            },
        )
        .await
    }

    async fn export_records(&self, zone: ZoneId) -> Result<String, ProviderError> {
        let response = self
            .send(Method::GET, &format!("/dnszone/{zone}/export"), |request| request)
            .await?;

        response.text().await.map_err(Into::into)
    }

    async fn set_dnssec(&self, zone: ZoneId, enabled: bool) -> Result<Value, ProviderError> {
        let method = if enabled { Method::POST } else { Method::DELETE };

        let response = self
            .send(method, &format!("/dnszone/{zone}/dnssec"), |request| request)
            .await?;

        let text = response.text().await?;

        if text.trim().is_empty() {
            return Ok(json!({ "Enabled": enabled }));
        }

        serde_json::from_str(&text).map_err(|_| ProviderError::Api {
            status: StatusCode::BAD_GATEWAY.as_u16(),
            error_key: "invalid_response".to_string(),
            field: String::new(),
            message: "invalid DNSSEC response from upstream".to_string(),
        })
    }

    async fn issue_certificate(&self, zone: ZoneId, body: Value) -> Result<(), ProviderError> {
        self.send(
            Method::POST,
            &format!("/dnszone/{zone}/certificate/issue"),
            move |request| request.json(&body),
        )
        .await
        .map(|_| ())
    }

    async fn add_record(
        &self,
        zone: ZoneId,
        record: RecordRequest,
    ) -> Result<Record, ProviderError> {
        self.send_json(
            Method::PUT,
            &format!("/dnszone/{zone}/records"),
            move |request| request.json(&record),
        )
        .await
    }

    async fn update_record(
        &self,
        zone: ZoneId,
        record: RecordId,
        body: RecordRequest,
    ) -> Result<Option<Record>, ProviderError> {
        let response = self
            .send(
                Method::POST,
                &format!("/dnszone/{zone}/records/{record}"),
                move |request| request.json(&body),
            )
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response.text().await?;

        if text.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|_| ProviderError::Api {
                status: StatusCode::BAD_GATEWAY.as_u16(),
                error_key: "invalid_response".to_string(),
                field: String::new(),
                message: "invalid record response from upstream".to_string(),
            })
    }

    async fn delete_record(&self, zone: ZoneId, record: RecordId) -> Result<(), ProviderError> {
        self.send(
            Method::DELETE,
            &format!("/dnszone/{zone}/records/{record}"),
            |request| request,
        )
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use testresult::TestResult;
    use zonegate_core::dns::RecordType;

    use crate::{
        crypto::Secret,
        domain::credentials::{CredentialsServiceError, MockCredentialsService},
    };

    use super::*;

    fn credentials(times: usize) -> Arc<dyn CredentialsService> {
        let mut credentials = MockCredentialsService::new();
        credentials
            .expect_get_master_credential()
            .times(times)
            .returning(|| Ok(Secret::new("bunny-master-key")));

        Arc::new(credentials)
    }

    fn client(server: &MockServer, credentials: Arc<dyn CredentialsService>) -> TestResult<BunnyClient> {
        Ok(BunnyClient::new(
            BunnyConfig {
                base_url: server.base_url(),
                timeout: Duration::from_secs(5),
            },
            credentials,
        )?)
    }

    #[tokio::test]
    async fn list_zones_sends_access_key_and_paging() -> TestResult {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/dnszone")
                    .header("accesskey", "bunny-master-key")
                    .query_param("page", "2")
                    .query_param("perPage", "5");
                then.status(200).json_body(json!({
                    "CurrentPage": 2,
                    "TotalItems": 6,
                    "HasMoreItems": false,
                    "Items": [{ "Id": 1, "Domain": "example.com", "Records": [] }]
                }));
            })
            .await;

        let response = client(&server, credentials(1))?
            .list_zones(&ListZonesOptions {
                page: Some(2),
                per_page: Some(5),
                search: None,
            })
            .await?;

        mock.assert_async().await;

        assert_eq!(response.total_items, 6);
        assert_eq!(response.items.first().map(|zone| zone.id), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn add_record_puts_body_to_records_endpoint() -> TestResult {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/dnszone/7/records")
                    .json_body(json!({ "Type": 3, "Name": "_acme", "Value": "v" }));
                then.status(201)
                    .json_body(json!({ "Id": 99, "Type": 3, "Name": "_acme", "Value": "v" }));
            })
            .await;

        let request: RecordRequest =
            serde_json::from_value(json!({ "Type": "TXT", "Name": "_acme", "Value": "v" }))?;

        let record = client(&server, credentials(1))?.add_record(7, request).await?;

        mock.assert_async().await;

        assert_eq!(record.id, 99);
        assert_eq!(record.record_type, RecordType::Txt);

        Ok(())
    }

    #[tokio::test]
    async fn update_record_without_body_returns_none() -> TestResult {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/dnszone/7/records/99");
                then.status(204);
            })
            .await;

        let request: RecordRequest = serde_json::from_value(json!({ "Type": 3, "Value": "new" }))?;

        let updated = client(&server, credentials(1))?
            .update_record(7, 99, request)
            .await?;

        assert!(updated.is_none(), "204 should map to no record");

        Ok(())
    }

    #[tokio::test]
    async fn status_codes_map_to_errors() -> TestResult {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/dnszone/1");
                then.status(401);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/dnszone/2");
                then.status(404);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/dnszone/3");
                then.status(400).json_body(json!({
                    "ErrorKey": "validation_error",
                    "Field": "Value",
                    "Message": "The value is invalid."
                }));
            })
            .await;

        let client = client(&server, credentials(3))?;

        let unauthorized = client.get_zone(1).await;
        let not_found = client.get_zone(2).await;
        let api = client.get_zone(3).await;

        assert!(
            matches!(unauthorized, Err(ProviderError::Unauthorized)),
            "expected Unauthorized, got {unauthorized:?}"
        );
        assert!(
            matches!(not_found, Err(ProviderError::NotFound)),
            "expected NotFound, got {not_found:?}"
        );
        assert!(
            matches!(
                &api,
                Err(ProviderError::Api { status: 400, error_key, field, message })
                    if error_key == "validation_error"
                        && field == "Value"
                        && message == "The value is invalid."
            ),
            "expected structured Api error, got {api:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unparseable_error_body_falls_back_to_text() -> TestResult {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/dnszone/5");
                then.status(500).body("upstream exploded");
            })
            .await;

        let result = client(&server, credentials(1))?.delete_zone(5).await;

        assert!(
            matches!(
                &result,
                Err(ProviderError::Api { status: 500, message, .. }) if message == "upstream exploded"
            ),
            "expected raw text message, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn missing_master_credential_skips_upstream_call() -> TestResult {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.path("/dnszone/1");
                then.status(200);
            })
            .await;

        let mut credentials = MockCredentialsService::new();
        credentials
            .expect_get_master_credential()
            .once()
            .return_once(|| Err(CredentialsServiceError::NotConfigured));

        let result = client(&server, Arc::new(credentials))?.get_zone(1).await;

        assert!(
            matches!(result, Err(ProviderError::NotConfigured)),
            "expected NotConfigured, got {result:?}"
        );

        mock.assert_hits_async(0).await;

        Ok(())
    }

    #[tokio::test]
    async fn export_returns_plain_text() -> TestResult {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/dnszone/4/export");
                then.status(200)
                    .header("content-type", "text/plain")
                    .body("$ORIGIN example.com.\n");
            })
            .await;

        let exported = client(&server, credentials(1))?.export_records(4).await?;

        assert_eq!(exported, "$ORIGIN example.com.\n");

        Ok(())
    }
}
