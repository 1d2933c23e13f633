//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::WatermarkApi;
use crate::error::{ApiError, ApiResult};
use crate::middleware::HttpErrorInterceptor;
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;
use watermark_core::Navigator;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Watermark backend client
///
/// Every request goes through the installed [`HttpErrorInterceptor`], if any.
/// There is no retry: a failed request stays failed.
#[derive(Clone)]
pub struct WatermarkClient {
    inner: Client,
    config: Arc<ClientConfig>,
    interceptor: Option<HttpErrorInterceptor>,
}

impl WatermarkClient {
    /// Create a new client with default configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let inner = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("watermark-api-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            interceptor: None,
        })
    }

    /// Route failed requests to error views through `navigator`
    #[must_use]
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.interceptor = Some(HttpErrorInterceptor::new(navigator));
        self
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Access the watermark endpoint
    #[must_use]
    pub fn watermark(&self) -> WatermarkApi {
        WatermarkApi::new(self.clone())
    }

    /// POST a multipart form and return the raw response body
    #[instrument(skip(self, form), fields(request_id))]
    pub async fn post_binary(&self, path: &str, form: Form) -> ApiResult<Vec<u8>> {
        let request = self.request_builder(Method::POST, path).multipart(form);
        let result = self.execute_binary(request).await;
        self.intercept(result)
    }

    /// Build a request builder for custom requests
    pub fn request_builder(&self, method: Method, path: &str) -> RequestBuilder {
        self.inner.request(method, self.config.endpoint_url(path))
    }

    /// Send a request and collect a binary body
    async fn execute_binary(&self, request: RequestBuilder) -> ApiResult<Vec<u8>> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let start = Instant::now();
        let response = request.header(X_REQUEST_ID, &request_id).send().await?;
        let body = Self::handle_response(response).await;

        debug!(
            request_id = %request_id,
            elapsed_ms = start.elapsed().as_millis(),
            ok = body.is_ok(),
            "Request finished"
        );

        body
    }

    /// Turn non-2xx responses into errors
    async fn handle_response(response: Response) -> ApiResult<Vec<u8>> {
        let status = response.status();

        if status.is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ApiError::api_response(status.as_u16(), message))
        }
    }

    /// Apply the error interceptor, when one is installed
    fn intercept<T>(&self, result: ApiResult<T>) -> ApiResult<T> {
        match &self.interceptor {
            Some(interceptor) => interceptor.intercept(result),
            None => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use watermark_core::Route;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Route>>);

    impl Navigator for Recorder {
        fn navigate(&self, route: Route) {
            self.0.lock().unwrap().push(route);
        }
    }

    fn client_for(uri: &str, recorder: &Arc<Recorder>) -> WatermarkClient {
        WatermarkClient::with_config(ClientConfig::default().with_base_url(uri))
            .unwrap()
            .with_navigator(recorder.clone())
    }

    fn form() -> Form {
        Form::new().text("photo", "p")
    }

    #[test]
    fn test_client_creation() {
        let client = WatermarkClient::with_config(ClientConfig::development());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ClientConfig::default().with_base_url("localhost:8000");
        assert!(WatermarkClient::with_config(config).is_err());
    }

    #[tokio::test]
    async fn test_post_binary_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/watermark"))
            .and(header_exists("x-request-id"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, b'P', b'N', b'G']))
            .expect(1)
            .mount(&server)
            .await;

        let recorder = Arc::new(Recorder::default());
        let body = client_for(&server.uri(), &recorder)
            .post_binary("watermark", form())
            .await
            .unwrap();

        assert_eq!(body, vec![0x89, b'P', b'N', b'G']);
        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_error_status_navigates_and_reraises() {
        for (status, route) in [
            (415, Route::UnsupportedMedia),
            (422, Route::ValidationError),
            (500, Route::Error),
        ] {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status).set_body_string("{\"detail\":\"x\"}"))
                .expect(1)
                .mount(&server)
                .await;

            let recorder = Arc::new(Recorder::default());
            let err = client_for(&server.uri(), &recorder)
                .post_binary("watermark", form())
                .await
                .unwrap_err();

            assert_eq!(err.status(), Some(status));
            assert_eq!(*recorder.0.lock().unwrap(), vec![route]);
        }
    }

    #[tokio::test]
    async fn test_connection_failure_goes_to_generic_error() {
        let recorder = Arc::new(Recorder::default());
        let err = client_for("http://127.0.0.1:1", &recorder)
            .post_binary("watermark", form())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Request(_)));
        assert_eq!(*recorder.0.lock().unwrap(), vec![Route::Error]);
    }

    #[tokio::test]
    async fn test_without_navigator_errors_pass_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let client =
            WatermarkClient::with_config(ClientConfig::default().with_base_url(server.uri())).unwrap();
        let err = client.post_binary("watermark", form()).await.unwrap_err();
        assert_eq!(err.status(), Some(422));
    }
}
