use std::io::Write;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};

use api_shared::ImportKind;
use ctomop_client::{ApiClient, ClientConfig, ClientError, PatientService};
use ctomop_core::{FieldValue, RecordError};
use ctomop_types::PersonId;

const SESSION_COOKIE: &str = "sessionid=abc123";

#[derive(Default)]
struct MockState {
    reject_patch: bool,
    patient_patches: Mutex<Vec<(i64, Value)>>,
    name_patches: Mutex<Vec<Value>>,
    uploads: Mutex<Vec<(String, String)>>,
}

fn user_json() -> Value {
    json!({"id": 3, "username": "jdoe", "email": "jdoe@example.org", "first_name": "Jane", "last_name": "Doe"})
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret" {
        (
            [(header::SET_COOKIE, format!("{SESSION_COOKIE}; Path=/"))],
            Json(json!({ "user": user_json() })),
        )
            .into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn current_user(headers: HeaderMap) -> Response {
    let authenticated = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|c| c.contains(SESSION_COOKIE));
    if authenticated {
        Json(user_json()).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Authentication credentials were not provided."})),
        )
            .into_response()
    }
}

async fn update_name(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Json<Value> {
    state.name_patches.lock().unwrap().push(body);
    Json(user_json())
}

async fn list_patients() -> Json<Value> {
    Json(json!([
        {"person_id": 7, "patient_name": "Jane Doe", "age": 44, "disease": "Breast Cancer", "stage": "Stage II", "updated_at": "2024-05-01T10:00:00Z"},
        {"person_id": 8, "patient_name": "", "age": null, "disease": null}
    ]))
}

async fn fetch_patient(Path(id): Path<i64>) -> Response {
    if id != 7 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Patient not found"})),
        )
            .into_response();
    }
    Json(json!({
        "patient_info": {
            "disease": "Breast Cancer",
            "stage": "Stage II",
            "date_of_birth": "1980-02-29",
            "estrogen_receptor_status": "Positive",
            "serum_m_protein": 1.2,
            "genetic_mutations": []
        },
        "user": user_json()
    }))
    .into_response()
}

async fn patch_patient(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if state.reject_patch {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid stage"})),
        )
            .into_response();
    }
    state.patient_patches.lock().unwrap().push((id, body.clone()));
    Json(body).into_response()
}

async fn bulk_delete(Json(body): Json<Value>) -> Json<Value> {
    let count = body["person_ids"].as_array().map_or(0, Vec::len);
    Json(json!({"success": true, "deleted_count": count, "errors": []}))
}

async fn upload(State(state): State<Arc<MockState>>, mut multipart: Multipart) -> Json<Value> {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let contents = field.text().await.unwrap();
        assert_eq!(name, "file");
        state.uploads.lock().unwrap().push((file_name, contents));
    }
    Json(json!({"created_count": 2, "errors": ["Row 3: missing date_of_birth"]}))
}

async fn zip_lookup(Path(zip): Path<String>) -> Response {
    if zip == "02139" {
        Json(json!({
            "post code": "02139",
            "country": "United States",
            "places": [{"place name": "Cambridge", "state": "Massachusetts", "state abbreviation": "MA"}]
        }))
        .into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({}))).into_response()
    }
}

async fn failing_list() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
}

fn app(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/auth/login/", post(login))
        .route("/api/auth/logout/", post(|| async { StatusCode::OK }))
        .route("/api/user/", get(current_user).patch(update_name))
        .route("/api/patient-info/", get(list_patients))
        .route("/api/patient-info/bulk_delete/", delete(bulk_delete))
        .route("/api/patient-info/upload_csv/", post(upload))
        .route("/api/patient-info/upload_fhir/", post(upload))
        .route("/api/patient-info/:id/", get(fetch_patient).patch(patch_patient))
        .route("/us/:zip", get(zip_lookup))
        .with_state(state)
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn service_with(state: Arc<MockState>) -> PatientService {
    let base = spawn(app(state)).await;
    let config = ClientConfig::new(&format!("{base}/api/"), &format!("{base}/us"), None, None)
        .expect("valid config");
    PatientService::new(&config).expect("client")
}

#[tokio::test]
async fn test_session_follows_login_and_logout_cookie() {
    let service = service_with(Arc::new(MockState::default())).await;
    let api = service.api();

    let session = api.current_user().await.expect("anonymous session");
    assert!(!session.is_authenticated());
    assert_eq!(session.display_name(), "anonymous");

    let err = api.login("jdoe", "wrong").await.expect_err("bad password");
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let user = api.login("jdoe", "secret").await.expect("login");
    assert_eq!(user.username, "jdoe");

    let session = api.current_user().await.expect("session");
    assert!(session.is_authenticated());
    assert_eq!(session.display_name(), "Jane Doe");

    api.logout().await.expect("logout");
}

#[tokio::test]
async fn test_list_patients() {
    let service = service_with(Arc::new(MockState::default())).await;
    let patients = service.api().list_patients().await.expect("list");

    assert_eq!(patients.len(), 2);
    assert_eq!(patients[0].person_id, PersonId(7));
    assert_eq!(patients[0].age, Some(44));
    assert_eq!(patients[1].disease, None);
}

#[tokio::test]
async fn test_api_error_falls_back_to_default_message() {
    let base = spawn(Router::new().route("/api/patient-info/", get(failing_list))).await;
    let api = ApiClient::with_http(reqwest::Client::new(), &format!("{base}/api"));

    let err = api.list_patients().await.expect_err("server error");
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Failed to fetch patients");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_load_edit_and_save_sends_sparse_changes_then_name() {
    let state = Arc::new(MockState::default());
    let service = service_with(state.clone()).await;

    let mut editor = service.load(PersonId(7)).await.expect("load");
    assert_eq!(editor.display_name(), "Jane Doe");

    editor.set_from_input("stage", "Stage III").expect("stage");
    editor.set_field("disease", "Multiple Myeloma").expect("disease");
    editor.set_field("disease", "Breast Cancer").expect("disease back");
    editor.set_display_name("Mary Ann Smith").expect("name");

    let outcome = service.save(&mut editor).await.expect("save");
    assert_eq!(outcome.fields_sent, 1);
    assert!(outcome.name_updated);
    assert!(!editor.has_changes());

    let patches = state.patient_patches.lock().unwrap().clone();
    assert_eq!(patches, vec![(7, json!({"stage": "Stage III"}))]);
    let names = state.name_patches.lock().unwrap().clone();
    assert_eq!(names, vec![json!({"first_name": "Mary", "last_name": "Ann Smith"})]);

    // Nothing pending, nothing sent.
    let outcome = service.save(&mut editor).await.expect("second save");
    assert!(outcome.is_noop());
    assert_eq!(state.patient_patches.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_save_keeps_edits_pending() {
    let state = Arc::new(MockState {
        reject_patch: true,
        ..MockState::default()
    });
    let service = service_with(state.clone()).await;

    let mut editor = service.load(PersonId(7)).await.expect("load");
    editor.set_from_input("stage", "Stage IV").expect("stage");

    let err = service.save(&mut editor).await.expect_err("rejected");
    assert!(matches!(err, ClientError::Api { status: 400, ref message } if message == "Invalid stage"));
    assert!(editor.has_changes());
    assert_eq!(editor.record().text("stage"), Some("Stage IV"));
    assert_eq!(editor.original().text("stage"), Some("Stage II"));
}

#[tokio::test]
async fn test_load_missing_patient_uses_server_message() {
    let service = service_with(Arc::new(MockState::default())).await;
    let err = service.load(PersonId(99)).await.expect_err("missing");
    assert!(matches!(err, ClientError::Api { status: 404, ref message } if message == "Patient not found"));
}

#[tokio::test]
async fn test_bulk_delete() {
    let service = service_with(Arc::new(MockState::default())).await;

    let err = service.api().bulk_delete(&[]).await.expect_err("empty selection");
    assert!(matches!(err, ClientError::InvalidInput(_)));

    let res = service
        .api()
        .bulk_delete(&[PersonId(7), PersonId(8)])
        .await
        .expect("delete");
    assert!(res.success);
    assert_eq!(res.deleted_count, 2);
}

#[tokio::test]
async fn test_csv_import_uploads_file_and_reports_partial_result() {
    let state = Arc::new(MockState::default());
    let service = service_with(state.clone()).await;

    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("temp csv");
    file.write_all(b"patient_name,disease\nJane Doe,Breast Cancer\n")
        .expect("write csv");

    let res = service
        .api()
        .import(ImportKind::Csv, file.path())
        .await
        .expect("import");
    assert_eq!(res.created_count, 2);
    assert!(res.is_partial());

    let uploads = state.uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    assert!(uploads[0].0.ends_with(".csv"));
    assert!(uploads[0].1.starts_with("patient_name,disease"));
}

#[tokio::test]
async fn test_import_rejects_wrong_extension_before_upload() {
    let state = Arc::new(MockState::default());
    let service = service_with(state.clone()).await;

    let file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("temp csv");
    let err = service
        .api()
        .import(ImportKind::FhirBundle, file.path())
        .await
        .expect_err("csv is not a bundle");
    assert!(matches!(
        err,
        ClientError::Record(RecordError::InvalidInput(ref msg)) if msg == "Please select a JSON file"
    ));
    assert!(state.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_postal_code_enriches_city_and_region() {
    let service = service_with(Arc::new(MockState::default())).await;
    let mut editor = service.load(PersonId(7)).await.expect("load");

    let place = service
        .set_input(&mut editor, "postal_code", "02139")
        .await
        .expect("set postal code");
    assert_eq!(place.map(|p| p.city), Some("Cambridge".to_string()));
    assert_eq!(editor.record().text("city"), Some("Cambridge"));
    assert_eq!(editor.record().text("region"), Some("Massachusetts"));
}

#[tokio::test]
async fn test_failed_or_skipped_zip_lookup_leaves_place_unchanged() {
    let service = service_with(Arc::new(MockState::default())).await;
    let mut editor = service.load(PersonId(7)).await.expect("load");
    editor.apply_place("Boston", "Massachusetts");

    for zip in ["99999", "1234", "ABCDE"] {
        let place = service
            .set_input(&mut editor, "postal_code", zip)
            .await
            .expect("set postal code");
        assert!(place.is_none(), "{zip}");
        assert_eq!(editor.record().text("city"), Some("Boston"));
        assert_eq!(editor.record().text("region"), Some("Massachusetts"));
    }
    assert_eq!(
        editor.record().get("postal_code"),
        Some(&FieldValue::from("ABCDE"))
    );
}
