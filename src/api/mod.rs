//! Typed client for the remote optimization service.
//!
//! Every call is a read-only GET. Non-2xx responses never become panics or
//! opaque JS errors; they resolve to [`ApiError::Status`] carrying the
//! server's message text when it sent one, the status line otherwise.

mod types;

pub use types::*;

use std::pin::pin;

use futures::future::{Either, select};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;

/// Liveness-check budget before the indicator reports an error.
const PING_TIMEOUT_MS: u32 = 5_000;

/// Failure modes of a remote call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
	/// The service answered with a non-2xx status.
	#[error("Error {status}: {message}")]
	Status { status: u16, message: String },
	/// The request never produced a response (network refused, aborted).
	#[error("Request failed: {0}")]
	Transport(String),
	/// The response body did not match the expected shape.
	#[error("Malformed response: {0}")]
	Decode(String),
}

/// Connectivity as reported by the liveness check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConnectionState {
	#[default]
	Unknown,
	Connected,
	Error,
}

/// Thin typed wrapper over `gloo-net` against one service base address.
#[derive(Clone, Debug)]
pub struct ApiClient {
	base_url: String,
}

impl ApiClient {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
		}
	}

	/// GET `path` (query already encoded) and decode the JSON body.
	async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
		let url = format!("{}{}", self.base_url, path);
		let response = Request::get(&url)
			.send()
			.await
			.map_err(|e| ApiError::Transport(e.to_string()))?;

		if !response.ok() {
			let body = response.text().await.unwrap_or_default();
			let message = if body.trim().is_empty() {
				response.status_text()
			} else {
				body
			};
			return Err(ApiError::Status {
				status: response.status(),
				message,
			});
		}

		response
			.json::<T>()
			.await
			.map_err(|e| ApiError::Decode(e.to_string()))
	}

	/// Liveness check against `/ping`. A timeout counts as disconnected.
	pub async fn ping(&self) -> ConnectionState {
		let url = format!("{}/ping", self.base_url);
		let request = pin!(Request::get(&url).send());
		let deadline = pin!(TimeoutFuture::new(PING_TIMEOUT_MS));
		match select(request, deadline).await {
			Either::Left((Ok(response), _)) if response.ok() => ConnectionState::Connected,
			_ => ConnectionState::Error,
		}
	}

	pub async fn shelters(&self) -> Result<Vec<Shelter>, ApiError> {
		self.get_json("/shelters").await
	}

	pub async fn dogs(&self) -> Result<Vec<Dog>, ApiError> {
		self.get_json("/dogs").await
	}

	pub async fn adopters(&self) -> Result<Vec<Adopter>, ApiError> {
		self.get_json("/adopters").await
	}

	pub async fn reachability(
		&self,
		from: &str,
		to: &str,
		method: TraversalMethod,
	) -> Result<ReachabilityResult, ApiError> {
		self.get_json(&format!(
			"/graph/reachable?from={from}&to={to}&method={}",
			method.query()
		))
		.await
	}

	pub async fn shortest_path(
		&self,
		from: &str,
		to: &str,
	) -> Result<ShortestPathResult, ApiError> {
		self.get_json(&format!("/routes/shortest?from={from}&to={to}"))
			.await
	}

	pub async fn tour(&self, nodes: &[String]) -> Result<TourResult, ApiError> {
		self.get_json(&format!("/routes/tsp/bnb?nodes={}", nodes.join(",")))
			.await
	}

	pub async fn spanning_tree(
		&self,
		algorithm: MstAlgorithm,
	) -> Result<SpanningTreeResult, ApiError> {
		self.get_json(&format!("/network/mst?algorithm={}", algorithm.query()))
			.await
	}

	pub async fn greedy_assignment(
		&self,
		adopter_id: &str,
	) -> Result<GreedyAssignmentResult, ApiError> {
		self.get_json(&format!("/adoptions/greedy?adopterId={adopter_id}"))
			.await
	}

	pub async fn exhaustive_assignment(&self) -> Result<AssignmentSetResult, ApiError> {
		self.get_json("/adoptions/constraints/backtracking").await
	}

	pub async fn sort_dogs(
		&self,
		criteria: SortCriteria,
		algorithm: SortAlgorithm,
	) -> Result<SortedDogs, ApiError> {
		let payload: SortPayload = self
			.get_json(&format!(
				"/dogs/sort?criteria={}&algorithm={}",
				criteria.query(),
				algorithm.query()
			))
			.await?;
		Ok(payload.into())
	}

	pub async fn capacity_packing(&self, capacity_kg: f64) -> Result<PackingResult, ApiError> {
		self.get_json(&format!("/transport/optimal-dp?capacityKg={capacity_kg}"))
			.await
	}

	pub async fn graph_topology(&self) -> Result<GraphTopology, ApiError> {
		self.get_json("/network/graph").await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_error_carries_server_message() {
		let err = ApiError::Status {
			status: 500,
			message: "no dogs available".into(),
		};
		assert_eq!(err.to_string(), "Error 500: no dogs available");
	}

	#[test]
	fn transport_error_mentions_the_cause() {
		let err = ApiError::Transport("connection refused".into());
		assert!(err.to_string().contains("connection refused"));
	}
}
