use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use campus_nav::api::{AppState, build_router};
use campus_nav::common::campus_graph::CampusGraph;
use campus_nav::loading::catalog::{default_catalog, parse_catalog};
use campus_nav::notify::TextSender;

/// Stands in for a real transport, keeping hold of every message it is
/// asked to send
struct RecordingSender {
    accept: bool,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSender {
    fn new(accept: bool) -> Arc<Self> {
        Arc::new(RecordingSender {
            accept,
            sent: Mutex::new(Vec::new()),
        })
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl TextSender for RecordingSender {
    fn send_text(&self, recipient: &str, body: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), body.to_string()));
        self.accept
    }
}

fn get_test_graph() -> CampusGraph {
    CampusGraph::from_catalog(default_catalog().unwrap()).unwrap()
}

fn get_router(sms: Option<Arc<dyn TextSender>>) -> Router {
    build_router(AppState::new(get_test_graph(), sms))
}

fn get_router_with(sender: &Arc<RecordingSender>) -> Router {
    let sms: Arc<dyn TextSender> = sender.clone();
    get_router(Some(sms))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(get_router(None), get("/healthcheck")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn test_get_locations() {
    let (status, body) = send(get_router(None), get("/get_locations")).await;

    assert_eq!(status, StatusCode::OK);

    let locations = body["locations"].as_array().unwrap();
    assert_eq!(locations.len(), 17);
    assert_eq!(locations[0], json!({"id": 1, "name": "Main Gate"}));
    assert_eq!(locations[16], json!({"id": 17, "name": "Maggipoint"}));
}

#[tokio::test]
async fn test_get_graph() {
    let (status, body) = send(get_router(None), get("/graph")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nodes"].as_object().unwrap().len(), 17);
    assert_eq!(body["nodes"]["14"]["name"], "Ground");
    assert_eq!(body["nodes"]["14"]["type"], "open_space");
    assert_eq!(body["edges"]["14"]["17"]["path_type"], "food_court");
    assert_eq!(body["edges"]["17"]["14"]["distance"], 100.0);
    assert_eq!(body["path_styles"]["stairs"]["color"], "#EA4335");
}

#[cfg(test)]
mod test_get_path {

    use super::*;

    #[tokio::test]
    async fn test_gate_to_maggipoint() {
        let request = post_json("/get_path", &json!({"start": 1, "end": 17}));
        let (status, body) = send(get_router(None), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let path = &body["path"];
        assert_eq!(path["nodes"], json!([1, 14, 17]));
        assert_eq!(path["path_length"], 3);
        assert_eq!(path["estimated_time"], "2.9 minutes");
        assert_eq!(path["start"]["name"], "Main Gate");
        assert_eq!(path["end"]["name"], "Maggipoint");

        // Three locations, with nine curve points on each of the two
        // segments between them
        let coordinates = path["coordinates"].as_array().unwrap();
        assert_eq!(coordinates.len(), 21);
        assert_eq!(coordinates[0]["type"], "node");
        assert_eq!(coordinates[0]["node_id"], 1);
        assert_eq!(coordinates[1]["type"], "path");
        assert_eq!(coordinates[1]["path_type"], "open_path");
        assert_eq!(coordinates[10]["node_id"], 14);
        assert_eq!(coordinates[20]["node_id"], 17);

        let bounds = json!({
            "min_x": 100.0,
            "min_y": 300.0,
            "max_x": 110.0,
            "max_y": 500.0
        });
        assert_eq!(path["bounds"], bounds);
        assert_eq!(path["centre"], json!([105.0, 400.0]));
        assert_eq!(body["path_styles"]["food_court"]["color"], "#673AB7");
    }

    /// Ids sent as strings are accepted
    #[tokio::test]
    async fn test_string_ids() {
        let request =
            post_json("/get_path", &json!({"start": "1", "end": "17"}));
        let (status, body) = send(get_router(None), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["path"]["nodes"], json!([1, 14, 17]));
    }

    /// Routes which stay put have no segments to draw
    #[tokio::test]
    async fn test_same_start_and_end() {
        let request = post_json("/get_path", &json!({"start": 7, "end": 7}));
        let (status, body) = send(get_router(None), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["path"]["nodes"], json!([7]));
        assert_eq!(body["path"]["coordinates"], json!([]));
        assert_eq!(body["path"]["estimated_time"], "0.0 minutes");
        assert_eq!(body["path"]["bounds"], Value::Null);
    }

    #[tokio::test]
    async fn test_no_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/get_path")
            .header("content-type", "text/plain")
            .body(Body::from("1 to 17"))
            .unwrap();
        let (status, body) = send(get_router(None), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No JSON data provided");
    }

    #[tokio::test]
    async fn test_missing_field() {
        let request = post_json("/get_path", &json!({"start": 1}));
        let (status, body) = send(get_router(None), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");
        assert_eq!(body["required"], json!(["start", "end"]));
        assert_eq!(body["received"], json!(["start"]));
    }

    #[tokio::test]
    async fn test_invalid_ids() {
        let request =
            post_json("/get_path", &json!({"start": "gate", "end": 17}));
        let (status, body) = send(get_router(None), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Node IDs must be integers");
        assert_eq!(body["start_received"], "gate");
        assert_eq!(body["end_received"], 17);
    }

    #[tokio::test]
    async fn test_unknown_start() {
        let request = post_json("/get_path", &json!({"start": 99, "end": 1}));
        let (status, body) = send(get_router(None), request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Start node 99 not found");
        assert_eq!(body["available_nodes"].as_array().unwrap().len(), 17);
    }

    #[tokio::test]
    async fn test_unknown_end() {
        let request = post_json("/get_path", &json!({"start": 1, "end": 0}));
        let (status, body) = send(get_router(None), request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "End node 0 not found");
    }

    /// Locations with no segments can't be reached
    #[tokio::test]
    async fn test_no_route() {
        let raw = r#"{
            "locations": {
                "1": {"name": "A", "x": 0, "y": 0, "type": "entrance"},
                "2": {"name": "B", "x": 100, "y": 0, "type": "academic"},
                "3": {"name": "C", "x": 50, "y": 50, "type": "sports"}
            },
            "path_types": {},
            "connections": {
                "1": {"2": {"distance": 50, "path_type": "open_path"}}
            }
        }"#;
        let campus =
            CampusGraph::from_catalog(parse_catalog(raw).unwrap()).unwrap();
        let router = build_router(AppState::new(campus, None));

        let request = post_json("/get_path", &json!({"start": 1, "end": 3}));
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["error"],
            "No path found between the selected locations"
        );
        assert_eq!(body["start_node"], 1);
        assert_eq!(body["end_node"], 3);
    }
}

#[cfg(test)]
mod test_send_sms {

    use super::*;

    fn sms_body(phone: &str) -> Value {
        json!({
            "phone": phone,
            "path": {
                "start": {"node_id": 1, "name": "Main Gate"},
                "end": {"node_id": 17, "name": "Maggipoint"},
                "estimated_time": "2.9 minutes"
            }
        })
    }

    #[tokio::test]
    async fn test_not_configured() {
        let request = post_json("/send_sms", &sms_body("+15550001111"));
        let (status, body) = send(get_router(None), request).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "SMS service not configured");
    }

    /// The route is recomputed, and the rendered directions are both sent
    /// and returned as a preview
    #[tokio::test]
    async fn test_sent() {
        let sender = RecordingSender::new(true);
        let router = get_router_with(&sender);

        let request = post_json("/send_sms", &sms_body("+15550001111"));
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "SMS sent successfully");

        let target = "🚶 Campus Navigation Directions 🚶\n\n\
            From: Main Gate\n\
            To: Maggipoint\n\n\
            Route:\n\
            1. Main Gate to Ground via open_path\n\
            2. Ground to Maggipoint via food_court\n\n\
            Estimated Time: 2.9 minutes";

        assert_eq!(body["preview"], target);
        assert_eq!(
            sender.sent(),
            vec![("+15550001111".to_string(), target.to_string())]
        );
    }

    /// Bare ids are accepted in place of location records
    #[tokio::test]
    async fn test_bare_ids() {
        let sender = RecordingSender::new(true);
        let router = get_router_with(&sender);

        let body = json!({
            "phone": "+15550001111",
            "path": {"start": "3", "end": 8}
        });
        let (status, _) = send(router, post_json("/send_sms", &body)).await;

        assert_eq!(status, StatusCode::OK);

        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        let target = "From: Visvesvaraya Block\nTo: Business School\n";
        assert!(sent[0].1.contains(target));
    }

    #[tokio::test]
    async fn test_invalid_phone() {
        let sender = RecordingSender::new(true);
        let router = get_router_with(&sender);

        let request = post_json("/send_sms", &sms_body("5550001111"));
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid phone number format");
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn test_missing_field() {
        let sender = RecordingSender::new(true);
        let router = get_router_with(&sender);

        let request = post_json("/send_sms", &json!({"phone": "+1555"}));
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["required"], json!(["phone", "path"]));
    }

    #[tokio::test]
    async fn test_unknown_location() {
        let sender = RecordingSender::new(true);
        let router = get_router_with(&sender);

        let body = json!({
            "phone": "+15550001111",
            "path": {"start": 1, "end": 99}
        });
        let (status, body) = send(router, post_json("/send_sms", &body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "End node 99 not found");
        assert!(sender.sent().is_empty());
    }

    /// Messages refused by the transport are reported as failures
    #[tokio::test]
    async fn test_send_failed() {
        let sender = RecordingSender::new(false);
        let router = get_router_with(&sender);

        let request = post_json("/send_sms", &sms_body("+15550001111"));
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to send SMS");
        assert_eq!(sender.sent().len(), 1);
    }
}
