use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Form, Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const USERNAME: &str = "mockuser";

#[derive(Clone, Debug, Serialize)]
pub struct FormRecord {
    pub id: String,
    pub username: String,
    pub title: String,
    pub status: String,
    pub count: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Submission {
    pub id: String,
    pub form_id: String,
    pub status: String,
    pub answers: BTreeMap<String, String>,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    forms: BTreeMap<String, FormRecord>,
    submissions: BTreeMap<String, Submission>,
    webhooks: HashMap<String, Vec<String>>,
}

impl Store {
    /// Jotform ids are long numeric strings.
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("{}", 240_000_000_000_000 + self.next_id)
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    api_key: Arc<str>,
    db: Db,
}

type Reply = (StatusCode, Json<Value>);

fn envelope(status: StatusCode, message: &str, content: Value) -> Reply {
    (
        status,
        Json(json!({
            "responseCode": status.as_u16(),
            "message": message,
            "content": content,
        })),
    )
}

fn ok(content: Value) -> Reply {
    envelope(StatusCode::OK, "success", content)
}

fn not_found(what: &str) -> Reply {
    envelope(
        StatusCode::NOT_FOUND,
        &format!("{what} not found"),
        Value::String(String::new()),
    )
}

pub fn app(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
        db: Arc::new(RwLock::new(Store::default())),
    };
    Router::new()
        .route("/user", get(get_user))
        .route("/user/forms", get(list_forms))
        .route("/form", post(create_form))
        .route("/form/{id}", get(get_form).delete(trash_form))
        .route(
            "/form/{id}/submissions",
            get(list_submissions).post(create_submission),
        )
        .route("/form/{id}/webhooks", get(list_webhooks).post(add_webhook))
        .route("/form/{id}/webhooks/{index}", delete(delete_webhook))
        .route(
            "/submission/{id}",
            get(get_submission).post(update_submission).delete(delete_submission),
        )
        .route("/generatePDF", get(generate_pdf))
        .route("/API/user/settings", get(internal_settings))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get("apikey")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| key == &*state.api_key);
    if !authorized {
        let path = request.uri().path().to_string();
        tracing::debug!(%path, "rejecting request without a valid apiKey");
        return envelope(
            StatusCode::UNAUTHORIZED,
            &format!("You're not authorized to use ({path}) "),
            Value::String(String::new()),
        )
        .into_response();
    }
    next.run(request).await
}

async fn get_user() -> Reply {
    ok(json!({
        "username": USERNAME,
        "name": "Mock User",
        "email": "mock@example.com",
        "account_type": "https://api.jotform.com/system/plan/FREE",
    }))
}

async fn list_forms(State(state): State<AppState>) -> Reply {
    let db = state.db.read().await;
    let forms: Vec<&FormRecord> = db.forms.values().filter(|f| f.status != "DELETED").collect();
    ok(json!(forms))
}

async fn create_form(
    State(state): State<AppState>,
    Form(input): Form<HashMap<String, String>>,
) -> Reply {
    let mut db = state.db.write().await;
    let id = db.next_id();
    let form = FormRecord {
        id: id.clone(),
        username: USERNAME.to_string(),
        title: input
            .get("properties[title]")
            .cloned()
            .unwrap_or_else(|| "Untitled Form".to_string()),
        status: "ENABLED".to_string(),
        count: "0".to_string(),
    };
    tracing::debug!(%id, title = %form.title, "created form");
    db.forms.insert(id, form.clone());
    ok(json!(form))
}

async fn get_form(State(state): State<AppState>, Path(id): Path<String>) -> Reply {
    let db = state.db.read().await;
    match db.forms.get(&id) {
        Some(form) => ok(json!(form)),
        None => not_found("Form"),
    }
}

async fn trash_form(State(state): State<AppState>, Path(id): Path<String>) -> Reply {
    let mut db = state.db.write().await;
    match db.forms.get_mut(&id) {
        Some(form) => {
            form.status = "DELETED".to_string();
            ok(json!(form))
        }
        None => not_found("Form"),
    }
}

async fn list_submissions(State(state): State<AppState>, Path(form_id): Path<String>) -> Reply {
    let db = state.db.read().await;
    if !db.forms.contains_key(&form_id) {
        return not_found("Form");
    }
    let submissions: Vec<&Submission> = db
        .submissions
        .values()
        .filter(|s| s.form_id == form_id)
        .collect();
    ok(json!(submissions))
}

async fn create_submission(
    State(state): State<AppState>,
    Path(form_id): Path<String>,
    Form(input): Form<HashMap<String, String>>,
) -> Reply {
    let mut db = state.db.write().await;
    if !db.forms.contains_key(&form_id) {
        return not_found("Form");
    }
    let id = db.next_id();
    let submission = Submission {
        id: id.clone(),
        form_id: form_id.clone(),
        status: "ACTIVE".to_string(),
        answers: input.into_iter().collect(),
    };
    db.submissions.insert(id.clone(), submission);
    if let Some(form) = db.forms.get_mut(&form_id) {
        let count: u64 = form.count.parse().unwrap_or(0);
        form.count = (count + 1).to_string();
    }
    ok(json!({
        "submissionID": id,
        "URL": format!("https://api.jotform.com/submission/{id}"),
    }))
}

async fn get_submission(State(state): State<AppState>, Path(id): Path<String>) -> Reply {
    let db = state.db.read().await;
    match db.submissions.get(&id) {
        Some(submission) => ok(json!(submission)),
        None => not_found("Submission"),
    }
}

async fn update_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<HashMap<String, String>>,
) -> Reply {
    let mut db = state.db.write().await;
    match db.submissions.get_mut(&id) {
        Some(submission) => {
            submission.answers.extend(input);
            ok(json!({
                "submissionID": id,
                "URL": format!("https://api.jotform.com/submission/{id}"),
            }))
        }
        None => not_found("Submission"),
    }
}

async fn delete_submission(State(state): State<AppState>, Path(id): Path<String>) -> Reply {
    let mut db = state.db.write().await;
    match db.submissions.remove(&id) {
        Some(_) => ok(json!(format!("Submission #{id} deleted successfully."))),
        None => not_found("Submission"),
    }
}

/// Webhooks come back as an object keyed by position, the way the service
/// returns them.
fn webhook_content(urls: &[String]) -> Value {
    let map: serde_json::Map<String, Value> = urls
        .iter()
        .enumerate()
        .map(|(i, url)| (i.to_string(), Value::String(url.clone())))
        .collect();
    Value::Object(map)
}

async fn list_webhooks(State(state): State<AppState>, Path(form_id): Path<String>) -> Reply {
    let db = state.db.read().await;
    if !db.forms.contains_key(&form_id) {
        return not_found("Form");
    }
    let urls = db.webhooks.get(&form_id).map(Vec::as_slice).unwrap_or_default();
    ok(webhook_content(urls))
}

async fn add_webhook(
    State(state): State<AppState>,
    Path(form_id): Path<String>,
    Form(input): Form<HashMap<String, String>>,
) -> Reply {
    let mut db = state.db.write().await;
    if !db.forms.contains_key(&form_id) {
        return not_found("Form");
    }
    let Some(url) = input.get("webhookURL") else {
        return envelope(
            StatusCode::BAD_REQUEST,
            "webhookURL is required",
            Value::String(String::new()),
        );
    };
    let urls = db.webhooks.entry(form_id).or_default();
    urls.push(url.clone());
    ok(webhook_content(urls))
}

async fn delete_webhook(
    State(state): State<AppState>,
    Path((form_id, index)): Path<(String, usize)>,
) -> Reply {
    let mut db = state.db.write().await;
    match db.webhooks.get_mut(&form_id) {
        Some(urls) if index < urls.len() => {
            urls.remove(index);
            ok(webhook_content(urls))
        }
        _ => not_found("Webhook"),
    }
}

async fn generate_pdf(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let db = state.db.read().await;
    let submission = query
        .get("submissionid")
        .and_then(|id| db.submissions.get(id));
    let Some(submission) = submission else {
        return not_found("Submission").into_response();
    };
    if query.get("formid") != Some(&submission.form_id) {
        return not_found("Form").into_response();
    }
    if query.get("download").map(String::as_str) == Some("1") {
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/pdf")],
            b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n1 0 obj\n<<>>\nendobj\n%%EOF\n".to_vec(),
        )
            .into_response();
    }
    ok(json!(format!(
        "https://www.jotform.com/pdf-submission/{}",
        submission.id
    )))
    .into_response()
}

/// Internal endpoints also check that the caller announces itself through
/// `referer`.
async fn internal_settings(headers: HeaderMap) -> Reply {
    let referer = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !referer.ends_with("/API") {
        return envelope(
            StatusCode::FORBIDDEN,
            "Missing or invalid referer",
            Value::String(String::new()),
        );
    }
    ok(json!({
        "username": USERNAME,
        "time_zone": "Europe/Istanbul",
        "referer": referer,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_status_code() {
        let (status, Json(body)) = envelope(StatusCode::NOT_FOUND, "Form not found", Value::Null);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["responseCode"], 404);
        assert_eq!(body["message"], "Form not found");
    }

    #[test]
    fn ids_are_numeric_and_increasing() {
        let mut store = Store::default();
        let a: u64 = store.next_id().parse().unwrap();
        let b: u64 = store.next_id().parse().unwrap();
        assert!(b > a);
    }

    #[test]
    fn webhooks_are_keyed_by_position() {
        let content = webhook_content(&[
            "https://a.example".to_string(),
            "https://b.example".to_string(),
        ]);
        assert_eq!(content["0"], "https://a.example");
        assert_eq!(content["1"], "https://b.example");
    }

    #[test]
    fn form_serializes_like_the_service() {
        let form = FormRecord {
            id: "1".to_string(),
            username: USERNAME.to_string(),
            title: "Contact".to_string(),
            status: "ENABLED".to_string(),
            count: "0".to_string(),
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["title"], "Contact");
        assert_eq!(json["status"], "ENABLED");
    }
}
