use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Router;
use axum::routing::get;
use easel_engine::{HTML_MIME, SandboxPolicy, export_document};
use easel_worker::{CancellationToken, Generation};
use futures_util::Stream;
use tokio::net::TcpListener;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, trace};

use crate::PLAYGROUND_ROUTE;
use crate::host::Shared;
use crate::page::host_page;

/// HTTP front of a [`ServedPreview`](crate::ServedPreview). Cheap to clone.
#[derive(Clone)]
pub struct PreviewSite {
	shared: Arc<Shared>,
}

impl PreviewSite {
	pub(crate) fn new(shared: Arc<Shared>) -> Self {
		Self { shared }
	}

	pub fn current_generation(&self) -> Option<Generation> {
		self.shared.current_generation()
	}

	pub fn sandbox(&self) -> SandboxPolicy {
		self.shared.sandbox
	}

	pub fn router(&self) -> Router {
		Router::new()
			.route("/", get(root))
			.route(PLAYGROUND_ROUTE, get(playground))
			.route("/playground/frame/{generation}", get(frame))
			.route("/playground/events", get(events))
			.route("/playground/export", get(export))
			.with_state(self.clone())
	}

	/// Serves the site on `listener` until `shutdown` fires.
	///
	/// Open event streams end on shutdown, and the host stops accepting
	/// documents with [`PreviewError::Closed`](easel_engine::PreviewError::Closed).
	pub async fn serve(self, listener: TcpListener, shutdown: CancellationToken) -> std::io::Result<()> {
		let addr = listener.local_addr()?;
		info!(%addr, "preview.listen");
		let closing = self.shared.closing.clone();
		axum::serve(listener, self.router())
			.with_graceful_shutdown(async move {
				shutdown.cancelled().await;
				closing.cancel();
				debug!("preview.shutdown");
			})
			.await
	}
}

async fn root() -> Redirect {
	Redirect::to(PLAYGROUND_ROUTE)
}

async fn playground(State(site): State<PreviewSite>) -> Html<String> {
	Html(host_page(site.shared.sandbox, site.current_generation()))
}

async fn frame(State(site): State<PreviewSite>, Path(generation): Path<u64>) -> Response {
	let Some(current) = site.shared.current().filter(|c| c.generation == Generation(generation)) else {
		trace!(generation, "preview.frame.gone");
		return (StatusCode::GONE, "this preview generation has been replaced").into_response();
	};

	(
		[
			(header::CONTENT_TYPE, HTML_MIME.to_string()),
			(header::CONTENT_SECURITY_POLICY, site.shared.sandbox.csp_header_value()),
			(header::CACHE_CONTROL, "no-store".to_string()),
			(header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
		],
		current.document.as_str().to_owned(),
	)
		.into_response()
}

fn generation_event(generation: Generation) -> Event {
	Event::default().event("generation").data(generation.to_string())
}

async fn events(State(site): State<PreviewSite>) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
	// Subscribe before reading the current generation so none is missed; the
	// host page ignores repeats.
	let rx = site.shared.events.subscribe();
	let initial = site.current_generation();
	let closing = site.shared.closing.clone();

	let stream = futures_util::stream::unfold((rx, initial, closing), |(mut rx, initial, closing)| async move {
		if let Some(generation) = initial {
			return Some((Ok::<_, Infallible>(generation_event(generation)), (rx, None, closing)));
		}
		loop {
			let received = tokio::select! {
				_ = closing.cancelled() => return None,
				received = rx.recv() => received,
			};
			match received {
				Ok(generation) => return Some((Ok(generation_event(generation)), (rx, None, closing))),
				Err(RecvError::Lagged(skipped)) => trace!(skipped, "preview.events.lagged"),
				Err(RecvError::Closed) => return None,
			}
		}
	});

	Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn export(State(site): State<PreviewSite>) -> Response {
	let Some(current) = site.shared.current() else {
		return (StatusCode::SERVICE_UNAVAILABLE, "nothing has been rendered yet").into_response();
	};
	let artifact = export_document(&current.document, &site.shared.export_name);
	(
		[
			(header::CONTENT_TYPE, artifact.mime().to_string()),
			(header::CONTENT_DISPOSITION, artifact.content_disposition()),
		],
		artifact.body().as_str().to_owned(),
	)
		.into_response()
}
