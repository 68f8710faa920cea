use crate::controller::{
    fibonacci_controller, health_check_controller, random_controller, stream_controller,
};
use crate::AppState;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

// This is the global definition of our OpenAPI document. To be a part
// of the rendered document, a path must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Event Loop Demos API"
        ),
        paths(
            fibonacci_controller::compute_async,
            fibonacci_controller::compute_blocking,
            health_check_controller::health_check,
            random_controller::random,
            stream_controller::stream_data,
        ),
        tags(
            (name = "event_loop_demos", description = "Streaming and blocking-workload offload demos")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(stream_routes())
        .merge(random_routes())
        .merge(fibonacci_routes(app_state))
        .merge(api_doc_routes())
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn stream_routes() -> Router {
    Router::new().route("/stream-data", get(stream_controller::stream_data))
}

fn random_routes() -> Router {
    Router::new().route("/random", get(random_controller::random))
}

/// Two paths over the same computation: offloaded to a worker, and inline on the
/// control thread.
fn fibonacci_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/fibonacci/:n", get(fibonacci_controller::compute_async))
        .route(
            "/fibonacci-block/:n",
            get(fibonacci_controller::compute_blocking),
        )
        .with_state(app_state)
}

fn api_doc_routes() -> Router {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use offload::{Computation, Fibonacci};
    use service::config::Config;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    struct Panicking;

    impl Computation for Panicking {
        fn compute(&self, _n: u32) -> u64 {
            panic!("boom")
        }
    }

    /// Sleeps `n` milliseconds and echoes `n` back.
    struct Sleepy;

    impl Computation for Sleepy {
        fn compute(&self, n: u32) -> u64 {
            std::thread::sleep(Duration::from_millis(n as u64));
            n as u64
        }
    }

    fn app(computation: Arc<dyn Computation>) -> Router {
        define_routes(AppState::new(Config::default(), computation))
    }

    async fn request(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check_responds_healthy() {
        let response = request(app(Arc::new(Fibonacci)), "/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "healthy");
    }

    #[tokio::test]
    async fn test_random_returns_a_number_between_zero_and_one() {
        let response = request(app(Arc::new(Fibonacci)), "/random").await;

        assert_eq!(response.status(), StatusCode::OK);
        let value: f64 = body_text(response).await.parse().unwrap();
        assert!((0.0..1.0).contains(&value));
    }

    #[tokio::test]
    async fn test_offloaded_and_blocking_paths_compute_the_same_value() {
        let offloaded = request(app(Arc::new(Fibonacci)), "/fibonacci/10").await;
        let blocking = request(app(Arc::new(Fibonacci)), "/fibonacci-block/10").await;

        assert_eq!(offloaded.status(), StatusCode::OK);
        assert_eq!(blocking.status(), StatusCode::OK);
        assert_eq!(body_text(offloaded).await, "Fibonacci: 55");
        assert_eq!(body_text(blocking).await, "Fibonacci: 55");
    }

    #[tokio::test]
    async fn test_non_numeric_parameter_is_an_invalid_argument() {
        for uri in ["/fibonacci/abc", "/fibonacci-block/abc", "/fibonacci/-1"] {
            let response = request(app(Arc::new(Fibonacci)), uri).await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            assert!(body_text(response).await.starts_with("Invalid argument:"));
        }
    }

    #[tokio::test]
    async fn test_worker_panic_is_a_server_error() {
        let response = request(app(Arc::new(Panicking)), "/fibonacci/3").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = request(app(Arc::new(Panicking)), "/fibonacci-block/3").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_slow_worker_times_out_when_configured() {
        let config = Config::default().set_worker_timeout(Some(Duration::from_secs(1)));
        let router = define_routes(AppState::new(config, Arc::new(Sleepy)));

        let response = request(router, "/fibonacci/1500").await;

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_data_sets_event_stream_headers() {
        let response = request(app(Arc::new(Fibonacci)), "/stream-data").await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "text/event-stream");
        assert_eq!(headers[header::CACHE_CONTROL], "no-cache");
        assert_eq!(headers[header::CONNECTION], "keep-alive");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_data_emits_fifteen_events_then_streamend() {
        let response = request(app(Arc::new(Fibonacci)), "/stream-data").await;
        let body = body_text(response).await;

        let messages: Vec<&str> = body.split_terminator("\n\n").collect();
        assert_eq!(messages.len(), 16);

        for (expected_id, message) in messages[..15].iter().enumerate() {
            let json = message.strip_prefix("data: ").unwrap();
            let event: serde_json::Value = serde_json::from_str(json).unwrap();

            assert_eq!(event["id"], expected_id);
            assert_eq!(
                event["message"],
                format!("Event stream count: {expected_id}")
            );
            assert!(json.starts_with(&format!("{{\"id\":{expected_id},\"timestamp\":\"")));
        }

        assert_eq!(messages[15], "event: streamend\ndata: Stream complete");
        assert!(body.ends_with("\n\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_data_disconnect_never_sends_streamend() {
        let response = request(app(Arc::new(Fibonacci)), "/stream-data").await;
        let mut body = response.into_body();

        let mut received = Vec::new();
        for _ in 0..3 {
            let frame = body.frame().await.unwrap().unwrap();
            let chunk = frame.into_data().unwrap();
            received.push(String::from_utf8(chunk.to_vec()).unwrap());
        }

        // The client hangs up: the body, and the session inside it, are dropped.
        drop(body);

        assert_eq!(received.len(), 3);
        for (expected_id, chunk) in received.iter().enumerate() {
            assert!(chunk.starts_with(&format!("data: {{\"id\":{expected_id},")));
            assert!(!chunk.contains("streamend"));
        }
    }

    #[tokio::test]
    async fn test_openapi_document_lists_every_route() {
        let response = request(app(Arc::new(Fibonacci)), "/api-docs/openapi.json").await;
        assert_eq!(response.status(), StatusCode::OK);

        let doc: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        for path in [
            "/fibonacci/{n}",
            "/fibonacci-block/{n}",
            "/health",
            "/random",
            "/stream-data",
        ] {
            assert!(doc["paths"].get(path).is_some(), "missing {path}");
        }
    }
}
