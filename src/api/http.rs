//! `reqwest`-backed implementation of [`PlannerApi`].

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::endpoints;
use super::types::{
	Ack, AddDependencyRequest, AddSubjectRequest, GraphPayload, PathOutcome, SyllabusLookup,
	SyllabusRequest, WeakTopic,
};
use super::PlannerApi;
use crate::config::PlannerConfig;
use crate::error::{Error, Result};
use crate::marks::MarksMap;

/// HTTP/JSON client for the planning service.
#[derive(Clone, Debug)]
pub struct HttpApi {
	client: Client,
	base_url: String,
	timeout: Duration,
}

impl HttpApi {
	/// Create a client for the service at `base_url`.
	pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
		Self {
			client: Client::new(),
			base_url: base_url.into().trim_end_matches('/').to_string(),
			timeout,
		}
	}

	/// Base address and timeout from the page configuration.
	pub fn from_config(config: &PlannerConfig) -> Self {
		Self::new(&config.api_base, config.request_timeout())
	}

	/// Base address without a trailing slash.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn url(&self, endpoint: &str) -> String {
		format!("{}{}", self.base_url, endpoint)
	}

	/// URL of the syllabus lookup with `subject` percent-encoded as one segment.
	fn syllabus_url(&self, subject: &str) -> Result<Url> {
		let mut url =
			Url::parse(&self.base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
		url.path_segments_mut()
			.map_err(|_| Error::InvalidUrl(self.base_url.clone()))?
			.pop_if_empty()
			.push(endpoints::GET_SYLLABUS.trim_start_matches('/'))
			.push(subject);
		Ok(url)
	}

	/// Send a request and return its status code and body text.
	async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<(u16, String)> {
		debug!("study-planner: -> {}", endpoint);
		let response = request
			.timeout(self.timeout)
			.send()
			.await
			.map_err(|e| transport_error(endpoint, e))?;
		let status = response.status().as_u16();
		let text = response
			.text()
			.await
			.map_err(|e| transport_error(endpoint, e))?;
		debug!("study-planner: <- {} {}", endpoint, status);
		Ok((status, text))
	}

	async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
		let (status, text) = self.send(endpoint, self.client.get(self.url(endpoint))).await?;
		decode(endpoint, status, &text)
	}

	async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Ack> {
		let request = self.client.post(self.url(endpoint)).json(body);
		let (status, text) = self.send(endpoint, request).await?;
		acknowledge(endpoint, status, &text)
	}
}

#[async_trait(?Send)]
impl PlannerApi for HttpApi {
	async fn fetch_graph(&self) -> Result<GraphPayload> {
		self.get(endpoints::GET_GRAPH).await
	}

	async fn add_subject(&self, subject: &str) -> Result<Ack> {
		self.post(endpoints::ADD_SUBJECT, &AddSubjectRequest { subject })
			.await
	}

	async fn add_dependency(&self, prerequisite: &str, dependent: &str) -> Result<Ack> {
		let body = AddDependencyRequest {
			prerequisite,
			dependent,
		};
		self.post(endpoints::ADD_DEPENDENCY, &body).await
	}

	async fn generate_path(&self) -> Result<PathOutcome> {
		self.get(endpoints::GENERATE_PATH).await
	}

	async fn submit_marks(&self, marks: &MarksMap) -> Result<Ack> {
		self.post(endpoints::SUBMIT_MARKS, marks).await
	}

	async fn fetch_weak_topics(&self) -> Result<Vec<WeakTopic>> {
		self.get(endpoints::GET_WEAK_TOPICS).await
	}

	async fn save_syllabus(&self, request: &SyllabusRequest) -> Result<Ack> {
		self.post(endpoints::ADD_SYLLABUS, request).await
	}

	async fn fetch_syllabus(&self, subject: &str) -> Result<SyllabusLookup> {
		let url = self.syllabus_url(subject)?;
		let (status, text) = self
			.send(endpoints::GET_SYLLABUS, self.client.get(url))
			.await?;
		decode(endpoints::GET_SYLLABUS, status, &text)
	}
}

fn transport_error(endpoint: &str, source: reqwest::Error) -> Error {
	if source.is_timeout() {
		Error::Timeout {
			endpoint: endpoint.to_string(),
		}
	} else {
		Error::Transport {
			endpoint: endpoint.to_string(),
			source,
		}
	}
}

fn is_success(status: u16) -> bool {
	(200..300).contains(&status)
}

/// Decode a response body.
///
/// The service reports some outcomes (missing syllabus, for one) with an error
/// status and a JSON body, so a body matching `T` wins over the status code.
fn decode<T: DeserializeOwned>(endpoint: &str, status: u16, text: &str) -> Result<T> {
	match serde_json::from_str(text) {
		Ok(value) => Ok(value),
		Err(_) if !is_success(status) => Err(Error::Status {
			endpoint: endpoint.to_string(),
			status,
		}),
		Err(source) => Err(Error::Decode {
			endpoint: endpoint.to_string(),
			source,
		}),
	}
}

/// Interpret the answer to a mutation. Any successful body is an acknowledgement.
fn acknowledge(endpoint: &str, status: u16, text: &str) -> Result<Ack> {
	match serde_json::from_str::<Value>(text) {
		Ok(value) => Ok(Ack::from_value(&value)),
		Err(_) if is_success(status) => Ok(Ack::default()),
		Err(_) => Err(Error::Status {
			endpoint: endpoint.to_string(),
			status,
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_url_drops_trailing_slash() {
		let api = HttpApi::new("http://127.0.0.1:5000/", Duration::from_secs(1));
		assert_eq!(api.base_url(), "http://127.0.0.1:5000");
		assert_eq!(api.url(endpoints::GET_GRAPH), "http://127.0.0.1:5000/get-graph");
	}

	#[test]
	fn syllabus_url_encodes_subject() {
		let api = HttpApi::new("http://127.0.0.1:5000", Duration::from_secs(1));
		let url = api.syllabus_url("Computer Science/2").unwrap();
		assert_eq!(
			url.as_str(),
			"http://127.0.0.1:5000/get-syllabus/Computer%20Science%2F2"
		);
	}

	#[test]
	fn syllabus_url_rejects_unusable_base() {
		let api = HttpApi::new("not a url", Duration::from_secs(1));
		assert!(matches!(api.syllabus_url("Maths"), Err(Error::InvalidUrl(_))));
	}

	#[test]
	fn decode_prefers_body_over_status() {
		let lookup: SyllabusLookup =
			decode(endpoints::GET_SYLLABUS, 404, r#"{"error": "Syllabus not found"}"#).unwrap();
		assert!(lookup.name.is_none());
	}

	#[test]
	fn decode_reports_status_when_body_is_unusable() {
		let err = decode::<GraphPayload>(endpoints::GET_GRAPH, 500, "<html>oops</html>").unwrap_err();
		assert!(matches!(err, Error::Status { status: 500, .. }));
		let err = decode::<GraphPayload>(endpoints::GET_GRAPH, 200, "[1,").unwrap_err();
		assert!(matches!(err, Error::Decode { .. }));
	}

	#[test]
	fn acknowledge_accepts_rejections_with_bodies() {
		let ack = acknowledge(endpoints::ADD_SUBJECT, 400, r#"{"error": "Exists"}"#).unwrap();
		assert_eq!(ack.error.as_deref(), Some("Exists"));
		let ack = acknowledge(endpoints::SUBMIT_MARKS, 200, "").unwrap();
		assert_eq!(ack, Ack::default());
		assert!(acknowledge(endpoints::ADD_SUBJECT, 502, "Bad Gateway").is_err());
	}
}
