//! Integration tests for `InventoryClient` using wiremock HTTP mocks.

use stockroom_client::{GatewayError, InventoryClient};
use stockroom_core::{NewProduct, NewStore, Status, StatusFilter};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> InventoryClient {
    InventoryClient::new(&format!("{}/api", server.uri()), 30, "stockroom-test")
        .expect("client construction should not fail")
}

fn store_json(id: i64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "Name": name,
        "Email": format!("{}@shops.com", name.to_lowercase()),
        "PhoneNumber": "555-0100",
        "Address": "1 Main St",
        "Established": "2019-07-01",
        "FloorArea": 120
    })
}

fn product_json(id: i64, name: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "Name": name,
        "Price": 10.5,
        "Specs": "spec",
        "Rating": 3,
        "SupplierInfo": "Acme",
        "MadeIn": "Poland",
        "ProductionCompanyName": "Acme Ltd",
        "Status": status
    })
}

#[tokio::test]
async fn list_stores_returns_parsed_stores() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Stores"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([store_json(1, "A"), store_json(2, "B")])),
        )
        .mount(&server)
        .await;

    let stores = test_client(&server)
        .list_stores()
        .await
        .expect("should parse stores");

    assert_eq!(stores.len(), 2);
    assert_eq!(stores[0].id, 1);
    assert_eq!(stores[1].name, "B");
    assert_eq!(stores[1].email, "b@shops.com");
}

#[tokio::test]
async fn search_stores_sends_or_predicate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Stores"))
        .and(query_param("filter[where][or][0][Name][regexp]", "^cor/i"))
        .and(query_param("filter[where][or][1][Address][regexp]", "^cor/i"))
        .and(query_param("filter[where][or][2][FloorArea][like]", "cor"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([store_json(3, "Corner")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let stores = test_client(&server)
        .search_stores("cor")
        .await
        .expect("should parse search results");

    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0].name, "Corner");
}

#[tokio::test]
async fn blank_store_search_matches_full_list() {
    let server = MockServer::start().await;
    let all = serde_json::json!([store_json(1, "A"), store_json(2, "B")]);
    Mock::given(method("GET"))
        .and(path("/api/Stores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&all))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let listed = client.list_stores().await.unwrap();
    let searched = client.search_stores("  ").await.unwrap();
    assert_eq!(listed, searched);

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.query().is_none()));
}

#[tokio::test]
async fn list_products_applies_status_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Stores/5/rel_Products"))
        .and(query_param("filter", r#"{"where":{"Status":"STORAGE"}}"#))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([product_json(11, "Crate", "STORAGE")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server)
        .list_products_with_status(5, StatusFilter::Only(Status::Storage))
        .await
        .expect("should parse products");

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].status, Status::Storage);
}

#[tokio::test]
async fn search_products_covers_text_and_price() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Stores/5/rel_Products"))
        .and(query_param("filter[where][or][0][Name][regexp]", "^ke/i"))
        .and(query_param("filter[where][or][3][MadeIn][regexp]", "^ke/i"))
        .and(query_param("filter[where][or][5][Price][like]", "ke"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([product_json(1, "Kettle", "OK")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server)
        .search_products(5, "ke")
        .await
        .expect("should parse products");

    assert_eq!(products[0].name, "Kettle");
}

#[tokio::test]
async fn create_store_posts_json_without_id() {
    let server = MockServer::start().await;
    let new_store = NewStore {
        name: "Corner".to_string(),
        email: "corner@shops.com".to_string(),
        phone_number: "555-0100".to_string(),
        address: "1 Main St".to_string(),
        established: "2019-07-01".to_string(),
        floor_area: 120.0,
    };

    Mock::given(method("POST"))
        .and(path("/api/Stores/"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "Name": "Corner",
            "Email": "corner@shops.com",
            "PhoneNumber": "555-0100",
            "Address": "1 Main St",
            "Established": "2019-07-01",
            "FloorArea": 120.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(store_json(9, "Corner")))
        .expect(1)
        .mount(&server)
        .await;

    let created = test_client(&server)
        .create_store(&new_store)
        .await
        .expect("should create store");

    assert_eq!(created.id, 9);
}

#[tokio::test]
async fn create_product_posts_to_store_collection() {
    let server = MockServer::start().await;
    let new_product = NewProduct {
        name: "Kettle".to_string(),
        price: 19.99,
        photo: None,
        specs: "1.7L".to_string(),
        rating: 4,
        supplier_info: "Acme".to_string(),
        made_in: "Poland".to_string(),
        production_company_name: "Acme Ltd".to_string(),
        status: Status::Ok,
    };

    Mock::given(method("POST"))
        .and(path("/api/Stores/3/rel_Products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json(44, "Kettle", "OK")))
        .expect(1)
        .mount(&server)
        .await;

    let created = test_client(&server)
        .create_product(3, &new_product)
        .await
        .expect("should create product");

    assert_eq!(created.id, 44);
}

#[tokio::test]
async fn deletes_target_item_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/Stores/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "count": 1 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/Stores/3/rel_Products/44"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.delete_product(3, 44).await.expect("product delete");
    client.delete_store(3).await.expect("store delete");
}

#[tokio::test]
async fn not_found_maps_to_not_found_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Stores/77/rel_Products"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = test_client(&server).list_products(77, "").await;
    assert!(
        matches!(result, Err(GatewayError::NotFound { ref url }) if url.ends_with("/api/Stores/77/rel_Products")),
        "expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn server_error_carries_parsed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Stores/"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "error": { "statusCode": 422, "name": "ValidationError", "message": "Email is invalid" }
        })))
        .mount(&server)
        .await;

    let new_store = NewStore {
        name: "X".to_string(),
        email: "x@y.zz".to_string(),
        phone_number: "1".to_string(),
        address: "a".to_string(),
        established: "2020-01-01".to_string(),
        floor_area: 1.0,
    };
    let err = test_client(&server)
        .create_store(&new_store)
        .await
        .unwrap_err();

    match &err {
        GatewayError::Api { status, body, .. } => {
            assert_eq!(*status, 422);
            assert_eq!(body["error"]["name"], "ValidationError");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert!(err.to_string().contains("Email is invalid"));
}

#[tokio::test]
async fn malformed_success_body_is_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Stores"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server).list_stores().await;
    assert!(
        matches!(result, Err(GatewayError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}
