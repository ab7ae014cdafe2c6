// ==========================================
// HTTP 路由测试
// ==========================================
// 通过 tower::ServiceExt::oneshot 直接驱动路由,不占用端口

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pharma_catalog::app::{build_router, DEFAULT_UPLOAD_LIMIT_BYTES};
use serde_json::{json, Value};
use tower::ServiceExt;

use test_helpers::{create_test_db, fixture, test_state, TEST_ADMIN_TOKEN};

const BOUNDARY: &str = "----pharma-catalog-test-boundary";

fn router(db_path: &str) -> Router {
    build_router(test_state(db_path), DEFAULT_UPLOAD_LIMIT_BYTES)
}

/// 手工拼装 multipart 请求体
fn multipart_body(field: &str, file_name: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(token: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/admin/products/bulk")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", TEST_ADMIN_TOKEN))
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (_temp_file, db_path) = create_test_db().unwrap();

    let response = router(&db_path).oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], pharma_catalog::VERSION);
}

#[tokio::test]
async fn test_bulk_upload_requires_admin_token() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let app = router(&db_path);
    let body = multipart_body("file", "p.csv", b"Name,CAS\nAspirin,50-78-2\n");

    let response = app
        .clone()
        .oneshot(upload_request(None, body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(read_json(response).await, json!({"error": "Unauthorized"}));

    let response = app
        .oneshot(upload_request(Some("wrong-token"), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bulk_upload_without_file_field() {
    let (_temp_file, db_path) = create_test_db().unwrap();

    let body = multipart_body("attachment", "p.csv", b"Name,CAS\nAspirin,50-78-2\n");
    let response = router(&db_path)
        .oneshot(upload_request(Some(TEST_ADMIN_TOKEN), body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await, json!({"error": "No file provided"}));
}

#[tokio::test]
async fn test_bulk_upload_over_body_limit_returns_413() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let app = build_router(test_state(&db_path), 1024);

    let mut csv = b"Name,CAS\n".to_vec();
    for i in 0..200 {
        csv.extend_from_slice(format!("Compound {},{}-00-0\n", i, 1000 + i).as_bytes());
    }

    let response = app
        .oneshot(upload_request(
            Some(TEST_ADMIN_TOKEN),
            multipart_body("file", "big.csv", &csv),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = read_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_bulk_upload_xlsx_then_list_products() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let app = router(&db_path);
    let data = std::fs::read(fixture("products_sample.xlsx")).unwrap();

    let response = app
        .clone()
        .oneshot(upload_request(
            Some(TEST_ADMIN_TOKEN),
            multipart_body("file", "products_sample.xlsx", &data),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], 2);
    assert_eq!(body["failed"], 2);
    assert_eq!(body["skipped"], 1);
    assert_eq!(body["errors"], json!(["Row 5: Missing CAS number"]));

    let response = app.oneshot(get("/api/products?category=APIs")).await.unwrap();
    let products = read_json(response).await;
    let names: Vec<&str> = products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Aspirin", "Caffeine"]);
    assert_eq!(products[0]["casNumber"], "50-78-2");
    assert_eq!(products[0]["inStock"], true);
}

#[tokio::test]
async fn test_bulk_upload_corrupt_file_returns_500() {
    let (_temp_file, db_path) = create_test_db().unwrap();

    let response = router(&db_path)
        .oneshot(upload_request(
            Some(TEST_ADMIN_TOKEN),
            multipart_body("file", "broken.xlsx", b"PK\x03\x04garbage"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("spreadsheet"));
}

#[tokio::test]
async fn test_categories_and_subcategories_flow() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let app = router(&db_path);

    // 创建分类
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/categories",
            json!({"name": "Intermediates", "description": "Synthesis intermediates"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let category = read_json(response).await;
    let category_id = category["id"].as_str().unwrap().to_string();
    assert_eq!(category["slug"], "intermediates");

    // 分类列表带缓存头
    let response = app.clone().oneshot(get("/api/categories")).await.unwrap();
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, s-maxage=3600, stale-while-revalidate=86400"
    );
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 1);

    // 子分类: 分类不存在
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/subcategories",
            json!({"name": "Chiral", "description": "Chiral building blocks", "categoryId": "missing"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await, json!({"error": "Category not found"}));

    // 子分类: 创建
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/subcategories",
            json!({"name": "Chiral Blocks", "description": "Chiral building blocks", "categoryId": category_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let sub = read_json(response).await;
    assert_eq!(sub["slug"], "chiral-blocks");
    assert_eq!(sub["category"]["name"], "Intermediates");

    // 子分类: slug 重复
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/subcategories",
            json!({"name": "Chiral Blocks", "description": "Duplicate entry", "categoryId": category_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({"error": "Subcategory with this slug already exists"})
    );

    // 子分类: 缺字段
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/subcategories",
            json!({"name": "Only name"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({"error": "Name, description, and categoryId are required"})
    );

    // 前台列表
    let uri = format!("/api/subcategories?categoryId={}", category_id);
    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    let subs = read_json(response).await;
    assert_eq!(subs.as_array().unwrap().len(), 1);

    // 删除
    let sub_uri = format!("/api/admin/subcategories/{}", sub["id"].as_str().unwrap());
    let response = app
        .clone()
        .oneshot(json_request("DELETE", &sub_uri, Value::Null))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({"message": "Subcategory deleted successfully"})
    );

    let response = app.oneshot(get(&sub_uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_and_delete_product() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let app = router(&db_path);

    let csv = b"Name,CAS,Description\nAspirin,50-78-2,Acetylsalicylic acid analgesic\n";
    let response = app
        .clone()
        .oneshot(upload_request(
            Some(TEST_ADMIN_TOKEN),
            multipart_body("file", "p.csv", csv),
        ))
        .await
        .unwrap();
    assert_eq!(read_json(response).await["success"], 1);

    let products = read_json(app.clone().oneshot(get("/api/products")).await.unwrap()).await;
    let id = products[0]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/admin/products/{}", id);

    // 缺少必填字段
    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, json!({"name": "Aspirin"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({"error": "Missing required fields: name, casNumber, description"})
    );

    // PATCH 与 PUT 等价
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &uri,
            json!({
                "name": "Aspirin (BP)",
                "casNumber": "50-78-2",
                "description": "Acetylsalicylic acid, BP grade",
                "inStock": false
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["slug"], "aspirin-bp");
    assert_eq!(updated["inStock"], false);
    assert_eq!(updated["category"], "APIs");

    // 删除
    let response = app
        .clone()
        .oneshot(json_request("DELETE", &uri, Value::Null))
        .await
        .unwrap();
    assert_eq!(read_json(response).await, json!({"success": true}));

    let response = app
        .oneshot(json_request("DELETE", &uri, Value::Null))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await, json!({"error": "Product not found"}));
}

#[tokio::test]
async fn test_settings_and_content() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let app = router(&db_path);

    let settings = read_json(app.clone().oneshot(get("/api/settings")).await.unwrap()).await;
    assert_eq!(settings["company"]["name"], "Aurevion Pharmatech Pvt Ltd");
    assert_eq!(settings["branding"]["colors"]["secondary"], "#053C74");

    let mut changed = settings.clone();
    changed["company"]["phone"] = json!("+91-22-0000-0000");
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/api/settings", changed))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let settings = read_json(app.clone().oneshot(get("/api/settings")).await.unwrap()).await;
    assert_eq!(settings["company"]["phone"], "+91-22-0000-0000");

    // 页面内容
    let empty = read_json(app.clone().oneshot(get("/api/content/home")).await.unwrap()).await;
    assert_eq!(empty, json!({}));

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/content/home",
            json!({"hero": {"title": "Quality APIs"}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let home = read_json(app.clone().oneshot(get("/api/content/home")).await.unwrap()).await;
    assert_eq!(home["hero"]["title"], "Quality APIs");

    let response = app.oneshot(get("/api/content/pricing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
