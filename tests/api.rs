//! HTTP 接口集成测试：每个测试使用独立的 SQLite 内存库

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use rust_dossier_system::config::DatabaseConfig;
use rust_dossier_system::models::users::entities::{User, UserRole};
use rust_dossier_system::models::users::requests::CreateUserRequest;
use rust_dossier_system::routes;
use rust_dossier_system::storage::Storage;
use rust_dossier_system::storage::sea_orm_storage::SeaOrmStorage;
use rust_dossier_system::utils::jwt::JwtUtils;
use rust_dossier_system::utils::{json_error_handler, query_error_handler};

macro_rules! init_app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage.clone()))
                .configure(routes::configure_api_routes),
        )
        .await
    };
}

struct Fixture {
    storage: Arc<dyn Storage>,
    institution: User,
    professor: User,
    other_professor: User,
}

async fn memory_storage() -> Arc<dyn Storage> {
    let database = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    Arc::new(
        SeaOrmStorage::connect(&database)
            .await
            .expect("in-memory storage"),
    )
}

async fn create_account(
    storage: &Arc<dyn Storage>,
    username: &str,
    role: UserRole,
    institution_id: Option<i64>,
) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "not-a-real-hash".to_string(),
            role,
            display_name: None,
            institution_id,
            email_verified: true,
        })
        .await
        .expect("create account")
}

async fn fixture() -> Fixture {
    let storage = memory_storage().await;
    let institution = create_account(&storage, "escola", UserRole::Institution, None).await;
    let professor =
        create_account(&storage, "prof_ana", UserRole::Professor, Some(institution.id)).await;
    let other_professor =
        create_account(&storage, "prof_bruno", UserRole::Professor, Some(institution.id)).await;
    Fixture {
        storage,
        institution,
        professor,
        other_professor,
    }
}

fn bearer(user: &User) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(user.id, &user.role.to_string())
        .expect("token generation");
    ("Authorization", format!("Bearer {token}"))
}

fn assert_close(actual: &Value, expected: f64) {
    let actual = actual.as_f64().expect("numeric value");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

async fn send<S, B>(app: &S, req: actix_http::Request) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
    B: actix_web::body::MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

fn get(uri: &str, user: &User) -> actix_http::Request {
    test::TestRequest::get()
        .uri(uri)
        .insert_header(bearer(user))
        .to_request()
}

fn post(uri: &str, user: &User, body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri(uri)
        .insert_header(bearer(user))
        .set_json(body)
        .to_request()
}

fn put(uri: &str, user: &User, body: Value) -> actix_http::Request {
    test::TestRequest::put()
        .uri(uri)
        .insert_header(bearer(user))
        .set_json(body)
        .to_request()
}

fn delete(uri: &str, user: &User) -> actix_http::Request {
    test::TestRequest::delete()
        .uri(uri)
        .insert_header(bearer(user))
        .to_request()
}

fn ids(values: &Value) -> Vec<i64> {
    values
        .as_array()
        .expect("array")
        .iter()
        .map(|v| v["id"].as_i64().expect("id"))
        .collect()
}

// 评价方法 Conceito：Insuficiente=0、Bom=5、Ótimo=10
fn method_body() -> Value {
    json!({
        "name": "Conceito",
        "types": [
            {"name": "Insuficiente", "value": 0.0},
            {"name": "Bom", "value": 5.0},
            {"name": "Ótimo", "value": 10.0}
        ]
    })
}

// 档案：Participação 60%（两个问题），Prova 40%（一个问题）
fn dossier_body(method_id: i64) -> Value {
    json!({
        "name": "Avaliação bimestral",
        "evaluation_method_id": method_id,
        "sections": [
            {
                "name": "Participação",
                "weight": 60.0,
                "questions": [{"text": "Pontualidade"}, {"text": "Colaboração"}]
            },
            {
                "name": "Prova",
                "weight": 40.0,
                "questions": [{"text": "Nota da prova"}]
            }
        ]
    })
}

/// 搭建一个带档案的班级并登记一名学生
struct Scenario {
    type_ids: Vec<i64>,
    method_id: i64,
    dossier_id: i64,
    question_ids: Vec<i64>,
    classroom_id: i64,
    student_id: i64,
}

async fn scenario<S, B>(app: &S, professor: &User) -> Scenario
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
    B: actix_web::body::MessageBody,
{
    let (status, body) = send(app, post("/api/v1/evaluation-methods", professor, method_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    let method_id = body["data"]["id"].as_i64().expect("method id");
    let type_ids = ids(&body["data"]["types"]);

    let (status, body) = send(app, post("/api/v1/dossiers", professor, dossier_body(method_id))).await;
    assert_eq!(status, StatusCode::CREATED);
    let dossier_id = body["data"]["id"].as_i64().expect("dossier id");
    let question_ids = body["data"]["sections"]
        .as_array()
        .expect("sections")
        .iter()
        .flat_map(|s| ids(&s["questions"]))
        .collect();

    let (status, body) = send(
        app,
        post(
            "/api/v1/classrooms",
            professor,
            json!({"name": "Turma A", "dossier_id": dossier_id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let classroom_id = body["data"]["id"].as_i64().expect("classroom id");

    let (status, body) = send(
        app,
        post(
            &format!("/api/v1/classrooms/{classroom_id}/students"),
            professor,
            json!({"registration": "2024001", "name": "Ana Souza"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let student_id = body["data"]["student"]["id"].as_i64().expect("student id");

    Scenario {
        type_ids,
        method_id,
        dossier_id,
        question_ids,
        classroom_id,
        student_id,
    }
}

#[actix_web::test]
async fn test_system_info_is_public() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);

    let req = test::TestRequest::get().uri("/api/v1/system/info").to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn test_missing_or_invalid_token_is_unauthorized() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);

    let req = test::TestRequest::get().uri("/api/v1/classrooms").to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("Authorization", "Bearer garbage"))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_me_returns_current_account() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);

    let (status, body) = send(&app, get("/api/v1/users/me", &fx.professor)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "prof_ana");
    assert_eq!(body["data"]["user"]["role"], "professor");
    assert!(body["data"]["user"].get("password_hash").is_none());
}

#[actix_web::test]
async fn test_professor_routes_require_institution() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);

    let (status, _) = send(&app, get("/api/v1/professors", &fx.professor)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, get("/api/v1/professors", &fx.institution)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn test_institution_creates_professor_once() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);

    let professor = json!({
        "username": "prof_carla",
        "email": "carla@example.com",
        "password": "Turma2024x",
    });

    let (status, body) = send(&app, post("/api/v1/professors", &fx.institution, professor.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["role"], "professor");
    assert_eq!(body["data"]["user"]["institution_id"], fx.institution.id);

    let (status, _) = send(&app, post("/api/v1/professors", &fx.institution, professor)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let weak = json!({"username": "prof_davi", "email": "davi@example.com", "password": "abc"});
    let (status, _) = send(&app, post("/api/v1/professors", &fx.institution, weak)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_dossier_weights_cannot_exceed_one_hundred() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);

    let (status, body) = send(&app, post("/api/v1/evaluation-methods", &fx.professor, method_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    let method_id = body["data"]["id"].as_i64().expect("method id");

    let mut dossier = dossier_body(method_id);
    dossier["sections"][1]["weight"] = json!(50.0);
    let (status, _) = send(&app, post("/api/v1/dossiers", &fx.professor, dossier)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing_method = dossier_body(method_id + 1000);
    let (status, _) = send(&app, post("/api/v1/dossiers", &fx.professor, missing_method)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_appraisal_score_is_weighted_average() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);
    let s = scenario(&app, &fx.professor).await;
    let uri = format!(
        "/api/v1/classrooms/{}/students/{}/appraisal",
        s.classroom_id, s.student_id
    );

    // 仅回答第一题：Participação (10 + 0) / 2 * 0.6 = 3
    let partial = json!({"answers": [
        {"question_id": s.question_ids[0], "evaluation_type_id": s.type_ids[2]}
    ]});
    let (status, body) = send(&app, put(&uri, &fx.professor, partial)).await;
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["data"]["score"], 3.0);
    assert_eq!(body["data"]["completed"], false);

    // 全部作答：(10 + 5) / 2 * 0.6 + 0 * 0.4 = 4.5
    let full = json!({"answers": [
        {"question_id": s.question_ids[0], "evaluation_type_id": s.type_ids[2]},
        {"question_id": s.question_ids[1], "evaluation_type_id": s.type_ids[1]},
        {"question_id": s.question_ids[2], "evaluation_type_id": s.type_ids[0]}
    ]});
    let (status, body) = send(&app, put(&uri, &fx.professor, full)).await;
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["data"]["score"], 4.5);
    assert_eq!(body["data"]["completed"], true);
    assert_eq!(body["data"]["answers"].as_array().map(Vec::len), Some(3));
    let appraisal_id = body["data"]["id"].as_i64().expect("appraisal id");

    let (status, body) = send(&app, get(&uri, &fx.professor)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], appraisal_id);

    let (status, body) = send(
        &app,
        get(&format!("/api/v1/appraisals/{appraisal_id}/report"), &fx.professor),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["data"]["total_score"], 4.5);
    assert_close(&body["data"]["sections"][0]["contribution"], 4.5);
    assert_close(&body["data"]["sections"][1]["contribution"], 0.0);
    assert_eq!(body["data"]["student"]["registration"], "2024001");

    let (status, body) = send(
        &app,
        get(&format!("/api/v1/classrooms/{}/appraisals", s.classroom_id), &fx.professor),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));
    assert_close(&body["data"]["items"][0]["score"], 4.5);

    // 机构可查看名下教授的评估
    let (status, _) = send(
        &app,
        get(&format!("/api/v1/appraisals/{appraisal_id}"), &fx.institution),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_appraisal_rejects_foreign_answers() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);
    let s = scenario(&app, &fx.professor).await;
    let uri = format!(
        "/api/v1/classrooms/{}/students/{}/appraisal",
        s.classroom_id, s.student_id
    );

    let unknown_option = json!({"answers": [
        {"question_id": s.question_ids[0], "evaluation_type_id": s.type_ids[2] + 1000}
    ]});
    let (status, _) = send(&app, put(&uri, &fx.professor, unknown_option)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let duplicated = json!({"answers": [
        {"question_id": s.question_ids[0], "evaluation_type_id": s.type_ids[0]},
        {"question_id": s.question_ids[0], "evaluation_type_id": s.type_ids[1]}
    ]});
    let (status, _) = send(&app, put(&uri, &fx.professor, duplicated)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 未登记在班级中的学生
    let (status, body) = send(
        &app,
        post("/api/v1/students", &fx.professor, json!({"registration": "2024999", "name": "Caio"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let outsider = body["data"]["id"].as_i64().expect("student id");
    let (status, _) = send(
        &app,
        put(
            &format!("/api/v1/classrooms/{}/students/{outsider}/appraisal", s.classroom_id),
            &fx.professor,
            json!({"answers": []}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_classroom_without_dossier_cannot_be_appraised() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);

    let (status, body) = send(
        &app,
        post("/api/v1/classrooms", &fx.professor, json!({"name": "Turma sem dossiê"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let classroom_id = body["data"]["id"].as_i64().expect("classroom id");

    let (status, body) = send(
        &app,
        post(
            &format!("/api/v1/classrooms/{classroom_id}/students"),
            &fx.professor,
            json!({"registration": "2024002", "name": "Beatriz"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let student_id = body["data"]["student"]["id"].as_i64().expect("student id");

    let (status, _) = send(
        &app,
        put(
            &format!("/api/v1/classrooms/{classroom_id}/students/{student_id}/appraisal"),
            &fx.professor,
            json!({"answers": []}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_other_professor_cannot_touch_classroom() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);
    let s = scenario(&app, &fx.professor).await;
    let uri = format!("/api/v1/classrooms/{}", s.classroom_id);

    let (status, _) = send(&app, get(&uri, &fx.other_professor)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, delete(&uri, &fx.other_professor)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, get(&format!("/api/v1/dossiers/{}", s.dossier_id), &fx.other_professor)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, get(&uri, &fx.institution)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["student_count"], 1);

    let (status, _) = send(&app, get("/api/v1/classrooms/999999", &fx.professor)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_roster_enrollment_conflicts_and_removal() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);
    let s = scenario(&app, &fx.professor).await;
    let roster = format!("/api/v1/classrooms/{}/students", s.classroom_id);

    // 同一学号再次登记复用已有学生，因此冲突
    let (status, _) = send(
        &app,
        post(&roster, &fx.professor, json!({"registration": "2024001", "name": "Ana Souza"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, get(&roster, &fx.professor)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));

    let member = format!("{roster}/{}", s.student_id);
    let (status, _) = send(&app, delete(&member, &fx.professor)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, delete(&member, &fx.professor)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_method_in_use_cannot_be_deleted() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);
    let s = scenario(&app, &fx.professor).await;
    let uri = format!("/api/v1/evaluation-methods/{}", s.method_id);

    let (status, _) = send(&app, delete(&uri, &fx.professor)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, delete(&uri, &fx.other_professor)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, delete(&format!("/api/v1/dossiers/{}", s.dossier_id), &fx.professor)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, delete(&uri, &fx.professor)).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_only_institution_deletes_students() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);

    let (status, body) = send(
        &app,
        post("/api/v1/students", &fx.professor, json!({"registration": "2024010", "name": "Davi"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/v1/students/{}", body["data"]["id"]);

    let (status, body) = send(&app, get("/api/v1/students/registration/2024010", &fx.professor)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Davi");

    let (status, _) = send(&app, delete(&uri, &fx.professor)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, delete(&uri, &fx.institution)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get(&uri, &fx.professor)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_institution_broadcasts_notifications() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);

    let message = json!({"title": "Reunião", "content": "Conselho de classe na sexta"});

    let (status, _) = send(&app, post("/api/v1/notifications", &fx.professor, message.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, post("/api/v1/notifications", &fx.institution, message)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["sent_count"], 2);

    let (status, body) = send(&app, get("/api/v1/notifications/unread-count", &fx.professor)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["unread_count"], 1);

    let (status, _) = send(&app, put("/api/v1/notifications/read-all", &fx.professor, json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("/api/v1/notifications/unread-count", &fx.professor)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["unread_count"], 0);

    let (status, body) = send(&app, get("/api/v1/notifications", &fx.other_professor)).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    let foreign = items[0]["id"].as_i64().expect("notification id");

    // 不能操作他人的通知
    let (status, _) = send(
        &app,
        delete(&format!("/api/v1/notifications/{foreign}"), &fx.professor),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_institution_overview_counts() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);
    scenario(&app, &fx.professor).await;

    let (status, _) = send(&app, get("/api/v1/institutions/overview", &fx.professor)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, get("/api/v1/institutions/overview", &fx.institution)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["professor_count"], 2);
    assert_eq!(body["data"]["classroom_count"], 1);
    assert_eq!(body["data"]["enrolled_student_count"], 1);
    assert_eq!(body["data"]["dossier_count"], 1);
    assert_eq!(body["data"]["appraisal_count"], 0);
}

// 三个问题全部作答，得分 4.5
fn full_answers(s: &Scenario) -> Value {
    json!({"answers": [
        {"question_id": s.question_ids[0], "evaluation_type_id": s.type_ids[2]},
        {"question_id": s.question_ids[1], "evaluation_type_id": s.type_ids[1]},
        {"question_id": s.question_ids[2], "evaluation_type_id": s.type_ids[0]}
    ]})
}

async fn appraise<S, B>(app: &S, professor: &User, s: &Scenario) -> i64
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
    B: actix_web::body::MessageBody,
{
    let uri = format!(
        "/api/v1/classrooms/{}/students/{}/appraisal",
        s.classroom_id, s.student_id
    );
    let (status, body) = send(app, put(&uri, professor, full_answers(s))).await;
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["data"]["score"], 4.5);
    body["data"]["id"].as_i64().expect("appraisal id")
}

#[actix_web::test]
async fn test_classroom_list_reports_student_count() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);
    let s = scenario(&app, &fx.professor).await;

    let (status, body) = send(&app, get("/api/v1/classrooms", &fx.professor)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"]["items"][0]["id"], s.classroom_id);
    assert_eq!(body["data"]["items"][0]["student_count"], 1);

    let (status, body) = send(&app, get("/api/v1/classrooms", &fx.other_professor)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn test_replacing_dossier_sections_resets_appraisals() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);
    let s = scenario(&app, &fx.professor).await;
    let appraisal_id = appraise(&app, &fx.professor, &s).await;
    let dossier_uri = format!("/api/v1/dossiers/{}", s.dossier_id);

    let sections = json!({"sections": [
        {"name": "Projeto", "weight": 100.0, "questions": [{"text": "Entrega final"}]}
    ]});

    let (status, _) = send(&app, put(&dossier_uri, &fx.other_professor, sections.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        put(&dossier_uri, &fx.professor, json!({"evaluation_method_id": 999999})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 上面两次失败的更新不影响已有评估
    let (status, body) = send(&app, get(&format!("/api/v1/appraisals/{appraisal_id}"), &fx.professor)).await;
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["data"]["score"], 4.5);

    let (status, body) = send(&app, put(&dossier_uri, &fx.professor, sections)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sections"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"]["sections"][0]["name"], "Projeto");

    let (status, body) = send(&app, get(&format!("/api/v1/appraisals/{appraisal_id}"), &fx.professor)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["score"].is_null());
    assert_eq!(body["data"]["completed"], false);
    assert_eq!(body["data"]["answers"].as_array().map(Vec::len), Some(0));

    let (status, body) = send(
        &app,
        get(&format!("/api/v1/appraisals/{appraisal_id}/report"), &fx.professor),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["data"]["total_score"], 0.0);
    assert_eq!(body["data"]["sections"][0]["answered_count"], 0);
}

#[actix_web::test]
async fn test_changing_dossier_method_resets_appraisals() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);
    let s = scenario(&app, &fx.professor).await;
    let appraisal_id = appraise(&app, &fx.professor, &s).await;

    let mut numeric = method_body();
    numeric["name"] = json!("Nota numérica");
    let (status, body) = send(&app, post("/api/v1/evaluation-methods", &fx.professor, numeric)).await;
    assert_eq!(status, StatusCode::CREATED);
    let numeric_id = body["data"]["id"].as_i64().expect("method id");

    let (status, body) = send(
        &app,
        put(
            &format!("/api/v1/dossiers/{}", s.dossier_id),
            &fx.professor,
            json!({"evaluation_method_id": numeric_id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["evaluation_method_id"], numeric_id);
    // 章节未替换，问题保持不变
    assert_eq!(body["data"]["sections"].as_array().map(Vec::len), Some(2));

    let (status, body) = send(&app, get(&format!("/api/v1/appraisals/{appraisal_id}"), &fx.professor)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["score"].is_null());
    assert_eq!(body["data"]["completed"], false);
    assert_eq!(body["data"]["answers"].as_array().map(Vec::len), Some(0));

    // 旧方法不再被引用，可以删除
    let (status, _) = send(
        &app,
        delete(&format!("/api/v1/evaluation-methods/{}", s.method_id), &fx.professor),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_method_options_locked_while_in_use() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);
    let s = scenario(&app, &fx.professor).await;
    let uri = format!("/api/v1/evaluation-methods/{}", s.method_id);

    let types = json!({"types": [
        {"name": "Não", "value": 0.0},
        {"name": "Sim", "value": 10.0}
    ]});
    let (status, _) = send(&app, put(&uri, &fx.professor, types)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, put(&uri, &fx.other_professor, json!({"name": "Outro"}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, put(&uri, &fx.professor, json!({"name": "Conceito final"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Conceito final");
    assert_eq!(body["data"]["types"].as_array().map(Vec::len), Some(3));
}

#[actix_web::test]
async fn test_deleting_dossier_detaches_classroom() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);
    let s = scenario(&app, &fx.professor).await;
    let appraisal_id = appraise(&app, &fx.professor, &s).await;

    let (status, _) = send(
        &app,
        delete(&format!("/api/v1/dossiers/{}", s.dossier_id), &fx.other_professor),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        delete(&format!("/api/v1/dossiers/{}", s.dossier_id), &fx.professor),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        get(&format!("/api/v1/classrooms/{}", s.classroom_id), &fx.professor),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["dossier_id"].is_null());
    assert_eq!(body["data"]["student_count"], 1);

    let (status, _) = send(&app, get(&format!("/api/v1/appraisals/{appraisal_id}"), &fx.professor)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_description_null_clears_and_absent_keeps() {
    let fx = fixture().await;
    let app = init_app!(fx.storage);

    let mut method = method_body();
    method["description"] = json!("Escala conceitual");
    let (status, body) = send(&app, post("/api/v1/evaluation-methods", &fx.professor, method)).await;
    assert_eq!(status, StatusCode::CREATED);
    let method_id = body["data"]["id"].as_i64().expect("method id");

    let mut dossier = dossier_body(method_id);
    dossier["description"] = json!("Primeiro bimestre");
    let (status, body) = send(&app, post("/api/v1/dossiers", &fx.professor, dossier)).await;
    assert_eq!(status, StatusCode::CREATED);
    let dossier_id = body["data"]["id"].as_i64().expect("dossier id");

    let classroom = json!({"name": "Turma B", "description": "Manhã", "dossier_id": dossier_id});
    let (status, body) = send(&app, post("/api/v1/classrooms", &fx.professor, classroom)).await;
    assert_eq!(status, StatusCode::CREATED);
    let classroom_id = body["data"]["id"].as_i64().expect("classroom id");

    let cases = [
        (format!("/api/v1/evaluation-methods/{method_id}"), "Escala conceitual"),
        (format!("/api/v1/dossiers/{dossier_id}"), "Primeiro bimestre"),
        (format!("/api/v1/classrooms/{classroom_id}"), "Manhã"),
    ];
    for (uri, description) in cases {
        let (status, body) = send(&app, put(&uri, &fx.professor, json!({"name": "Renomeado"}))).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["data"]["description"], description, "{uri}");

        let (status, body) = send(&app, put(&uri, &fx.professor, json!({"description": null}))).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body["data"]["description"].is_null(), "{uri}");
        assert_eq!(body["data"]["name"], "Renomeado", "{uri}");
    }

    // 清除描述不影响班级绑定的档案
    let (_, body) = send(&app, get(&format!("/api/v1/classrooms/{classroom_id}"), &fx.professor)).await;
    assert_eq!(body["data"]["dossier_id"], dossier_id);
}
