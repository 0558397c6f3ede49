use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use easel_engine::{PreviewError, PreviewHost, SandboxPolicy, compose};
use easel_worker::{CancellationToken, Generation};
use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use super::*;

fn host() -> ServedPreview {
	ServedPreview::new(SandboxPolicy::default(), "playground.html")
}

async fn get(site: &PreviewSite, uri: &str) -> Response {
	site.router()
		.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
		.await
		.unwrap()
}

async fn body_text(response: Response) -> String {
	let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
	String::from_utf8(bytes.to_vec()).unwrap()
}

fn header_value<'a>(response: &'a Response, name: header::HeaderName) -> &'a str {
	response.headers().get(name).unwrap().to_str().unwrap()
}

#[tokio::test]
async fn root_redirects_to_playground() {
	let site = host().site();
	let response = get(&site, "/").await;
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert_eq!(header_value(&response, header::LOCATION), "/playground");
}

#[tokio::test]
async fn frame_is_served_in_script_only_sandbox() {
	let mut host = host();
	let site = host.site();
	let generation = host.render(&compose("<p>hi</p>", "", "")).unwrap();
	assert_eq!(generation, Generation(1));

	let response = get(&site, "/playground/frame/1").await;
	assert_eq!(response.status(), StatusCode::OK);
	let csp = header_value(&response, header::CONTENT_SECURITY_POLICY).to_string();
	assert_eq!(csp, "sandbox allow-scripts");
	assert!(!csp.contains("allow-same-origin"));
	assert_eq!(header_value(&response, header::CACHE_CONTROL), "no-store");
	assert_eq!(header_value(&response, header::X_CONTENT_TYPE_OPTIONS), "nosniff");
	assert!(body_text(response).await.contains("<p>hi</p>"));
}

#[tokio::test]
async fn host_page_embeds_sandboxed_iframe() {
	let mut host = host();
	let site = host.site();

	let empty = body_text(get(&site, "/playground").await).await;
	assert!(!empty.contains("<iframe"));
	assert!(empty.contains("new EventSource('/playground/events')"));

	host.render(&compose("", "", "")).unwrap();
	let page = body_text(get(&site, "/playground").await).await;
	assert!(page.contains(r#"<iframe id="preview" title="Preview" sandbox="allow-scripts" src="/playground/frame/1">"#));
	assert!(page.contains("let shown = 1;"));
	assert!(!page.contains("allow-same-origin"));
}

#[tokio::test]
async fn retired_generation_is_gone() {
	let mut host = host();
	let site = host.site();
	host.render(&compose("<p>one</p>", "", "")).unwrap();
	host.render(&compose("<p>two</p>", "", "")).unwrap();
	assert_eq!(site.current_generation(), Some(Generation(2)));

	assert_eq!(get(&site, "/playground/frame/1").await.status(), StatusCode::GONE);
	assert_eq!(get(&site, "/playground/frame/3").await.status(), StatusCode::GONE);
	let current = get(&site, "/playground/frame/2").await;
	assert_eq!(current.status(), StatusCode::OK);
	assert!(body_text(current).await.contains("<p>two</p>"));
}

#[tokio::test]
async fn events_announce_each_generation() {
	let mut host = host();
	let site = host.site();
	host.render(&compose("", "", "")).unwrap();

	let response = get(&site, "/playground/events").await;
	assert_eq!(header_value(&response, header::CONTENT_TYPE), "text/event-stream");
	let mut stream = response.into_body().into_data_stream();

	let first = stream.next().await.unwrap().unwrap();
	assert_eq!(std::str::from_utf8(&first).unwrap(), "event: generation\ndata: 1\n\n");

	host.render(&compose("<p>next</p>", "", "")).unwrap();
	let second = stream.next().await.unwrap().unwrap();
	assert_eq!(std::str::from_utf8(&second).unwrap(), "event: generation\ndata: 2\n\n");
}

#[tokio::test]
async fn export_is_an_attachment() {
	let mut host = host();
	let site = host.site();
	assert_eq!(get(&site, "/playground/export").await.status(), StatusCode::SERVICE_UNAVAILABLE);

	host.render(&compose("<h1>saved</h1>", "", "")).unwrap();
	let response = get(&site, "/playground/export").await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		header_value(&response, header::CONTENT_DISPOSITION),
		r#"attachment; filename="playground.html""#
	);
	assert_eq!(header_value(&response, header::CONTENT_TYPE), "text/html; charset=utf-8");
	assert!(body_text(response).await.contains("<h1>saved</h1>"));
}

#[tokio::test]
async fn extra_sandbox_flags_reach_header_and_iframe() {
	let mut host = ServedPreview::new(SandboxPolicy::ALLOW_SCRIPTS | SandboxPolicy::ALLOW_MODALS, "out.html");
	let site = host.site();
	host.render(&compose("", "", "")).unwrap();

	let frame = get(&site, "/playground/frame/1").await;
	assert_eq!(
		header_value(&frame, header::CONTENT_SECURITY_POLICY),
		"sandbox allow-scripts allow-modals"
	);
	let page = body_text(get(&site, "/playground").await).await;
	assert!(page.contains(r#"sandbox="allow-scripts allow-modals""#));
}

#[tokio::test]
async fn shutdown_closes_host() {
	let mut host = host();
	let site = host.site();
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let shutdown = CancellationToken::new();
	let server = tokio::spawn(site.clone().serve(listener, shutdown.clone()));

	host.render(&compose("", "", "")).unwrap();
	shutdown.cancel();
	server.await.unwrap().unwrap();

	assert!(matches!(host.render(&compose("", "", "")), Err(PreviewError::Closed)));
	assert_eq!(site.current_generation(), Some(Generation(1)));
}
