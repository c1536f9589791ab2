use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, App};
use serde_json::{json, Value};
use uuid::Uuid;
use voicecart_shared::PrincipalKind;

use crate::test_support::{harness, GATEWAY_SECRET};
use crate::utils::payment_signature;

async fn send<S, R, B, E>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = E>,
    B: MessageBody,
    E: std::fmt::Debug,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

fn speaker(price: f64) -> Value {
    json!({
        "name": "Echo Smart Speaker",
        "description": "Voice controlled speaker",
        "price": price,
        "category": "Electronics",
        "stock": 12,
        "brand": "Acme",
        "featured": true,
        "images": [{ "url": "https://cdn.voicecart.test/echo.jpg", "isMain": true }]
    })
}

fn checkout(items: Vec<Value>, total: f64) -> Value {
    json!({
        "customerName": "Priya Sharma",
        "email": "priya@example.com",
        "items": items,
        "shippingAddress": {
            "street": "12 Residency Road",
            "city": "Bengaluru",
            "state": "KA",
            "zipCode": "560025"
        },
        "paymentMethod": "card",
        "totalAmount": total
    })
}

fn line(seller_id: Uuid, name: &str) -> Value {
    json!({
        "productId": Uuid::new_v4(),
        "sellerId": seller_id,
        "name": name,
        "quantity": 1,
        "price": 10
    })
}

#[actix_web::test]
async fn health_reports_service() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "voicecart-backend");
}

#[actix_web::test]
async fn user_register_login_and_profile() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/user/add")
        .set_json(json!({
            "name": "Asha Rao",
            "email": "Asha@Example.com",
            "password": "secret123",
            "phone": "9800000000"
        }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], "asha@example.com");

    let req = test::TestRequest::post()
        .uri("/user/add")
        .set_json(json!({
            "name": "Asha Again",
            "email": "asha@example.com",
            "password": "secret123"
        }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate");

    let req = test::TestRequest::post()
        .uri("/user/login")
        .set_json(json!({ "email": "asha@example.com", "password": "wrong-pass" }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/user/login")
        .set_json(json!({ "email": "asha@example.com", "password": "secret123" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri("/user/profile")
        .insert_header(bearer(&token))
        .set_json(json!({ "address": "4 Park Street, Kolkata" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], "4 Park Street, Kolkata");
    assert_eq!(body["name"], "Asha Rao");

    let req = test::TestRequest::get()
        .uri("/user/profile")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "9800000000");
}

#[actix_web::test]
async fn guards_reject_missing_and_wrong_tokens() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/user/profile").to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "authentication_error");

    let req = test::TestRequest::get()
        .uri("/user/profile")
        .insert_header(bearer("not-a-jwt"))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user_token = h
        .services
        .jwt
        .issue(Uuid::new_v4(), "Asha", "asha@example.com", PrincipalKind::User)
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/seller/products")
        .insert_header(bearer(&user_token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "authorization_error");

    let req = test::TestRequest::get()
        .uri("/api/admin/dashboard")
        .insert_header(bearer(&user_token))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn seller_needs_approval_before_login() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/seller/add")
        .set_json(json!({
            "name": "Ravi Kumar",
            "email": "ravi@shop.example.com",
            "password": "seller-pass",
            "storeName": "Ravi Electronics"
        }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["isApproved"], false);
    let seller_id = body["id"].as_str().unwrap().to_string();

    let login = json!({ "email": "ravi@shop.example.com", "password": "seller-pass" });
    let req = test::TestRequest::post()
        .uri("/seller/login")
        .set_json(&login)
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "admin@voicecart.test", "password": "admin-pass" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let admin_token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/sellers/{}/approve", seller_id))
        .insert_header(bearer(&admin_token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["seller"]["isApproved"], true);
    assert_eq!(h.mailer.sent().len(), 1);
    assert_eq!(h.mailer.sent()[0].to, "ravi@shop.example.com");

    let req = test::TestRequest::post()
        .uri("/seller/login")
        .set_json(&login)
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["seller"]["storeName"], "Ravi Electronics");
    let seller_token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/seller/profile")
        .insert_header(bearer(&seller_token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], seller_id.as_str());
}

#[actix_web::test]
async fn admin_login_rejects_wrong_password() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "admin@voicecart.test", "password": "guess" }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn product_catalogue_and_ownership() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let owner = Uuid::new_v4();
    let owner_token = h
        .services
        .jwt
        .issue(owner, "Ravi", "ravi@shop.example.com", PrincipalKind::Seller)
        .unwrap();
    let rival_token = h
        .services
        .jwt
        .issue(Uuid::new_v4(), "Meena", "meena@shop.example.com", PrincipalKind::Seller)
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/product/add")
        .insert_header(bearer(&owner_token))
        .set_json(speaker(2999.0))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sellerId"], owner.to_string());
    assert_eq!(body["rating"], 0.0);
    let product_id = body["id"].as_str().unwrap().to_string();

    let mut invalid = speaker(100.0);
    invalid["discountPrice"] = json!(150.0);
    let req = test::TestRequest::post()
        .uri("/product/add")
        .insert_header(bearer(&owner_token))
        .set_json(invalid)
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("/product/{}", product_id))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Echo Smart Speaker");

    let req = test::TestRequest::put()
        .uri(&format!("/product/update/{}", product_id))
        .insert_header(bearer(&rival_token))
        .set_json(json!({ "price": 1.0 }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&format!("/product/update/{}", product_id))
        .insert_header(bearer(&owner_token))
        .set_json(json!({ "discountPrice": 2499.0 }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["discountPrice"], 2499.0);

    let req = test::TestRequest::get()
        .uri("/product/category/electronics")
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get().uri("/product/search?q=smart").to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get().uri("/product/search?q=").to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/product/featured").to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::delete()
        .uri(&format!("/product/delete/{}", product_id))
        .insert_header(bearer(&owner_token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let req = test::TestRequest::get()
        .uri(&format!("/product/{}", product_id))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_path_id_is_bad_request() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/product/not-a-uuid").to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[actix_web::test]
async fn wishlist_toggles_membership() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let seller_token = h
        .services
        .jwt
        .issue(Uuid::new_v4(), "Ravi", "ravi@shop.example.com", PrincipalKind::Seller)
        .unwrap();
    let user_token = h
        .services
        .jwt
        .issue(Uuid::new_v4(), "Asha", "asha@example.com", PrincipalKind::User)
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/product/add")
        .insert_header(bearer(&seller_token))
        .set_json(speaker(499.0))
        .to_request();
    let (_, body) = send(&app, req).await;
    let product_id = body["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/user/wishlist/{}", product_id))
        .insert_header(bearer(&user_token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inWishlist"], true);

    let req = test::TestRequest::get()
        .uri("/user/wishlist")
        .insert_header(bearer(&user_token))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::post()
        .uri(&format!("/user/wishlist/{}", product_id))
        .insert_header(bearer(&user_token))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["inWishlist"], false);
}

#[actix_web::test]
async fn checkout_and_payment_verification() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/order/create")
        .set_json(checkout(vec![line(Uuid::new_v4(), "Speaker")], 499.5))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderId"], "order_test1");
    assert_eq!(body["amount"], 49950);
    assert_eq!(body["currency"], "INR");
    let order_number = body["orderNumber"].as_str().unwrap().to_string();
    assert!(order_number.starts_with("ORD"));

    let req = test::TestRequest::post()
        .uri("/order/verify-payment")
        .set_json(json!({
            "razorpay_order_id": "order_test1",
            "razorpay_payment_id": "pay_001",
            "razorpay_signature": "deadbeef"
        }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Payment verification failed");
    assert!(body.get("orderId").is_none());

    let req = test::TestRequest::get()
        .uri(&format!("/order/number/{}", order_number))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["status"], "failed");
    assert_eq!(body["gatewayPaymentId"], "pay_001");
    let stored = h
        .repos
        .orders
        .find_by_order_number(&order_number)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.gateway_signature.as_deref(), Some("deadbeef"));
    assert!(h.mailer.sent().is_empty());

    let signature = payment_signature::sign(GATEWAY_SECRET, "order_test1", "pay_002").unwrap();
    let req = test::TestRequest::post()
        .uri("/order/verify-payment")
        .set_json(json!({
            "razorpay_order_id": "order_test1",
            "razorpay_payment_id": "pay_002",
            "razorpay_signature": signature
        }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["orderId"], order_number.as_str());

    let req = test::TestRequest::get()
        .uri(&format!("/order/number/{}", order_number))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["status"], "completed");
    assert_eq!(body["gatewayPaymentId"], "pay_002");
    assert_eq!(h.mailer.sent().len(), 1);
    assert_eq!(h.mailer.sent()[0].to, "priya@example.com");

    let user_token = h
        .services
        .jwt
        .issue(Uuid::new_v4(), "Priya", "priya@example.com", PrincipalKind::User)
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/order/my-orders")
        .insert_header(bearer(&user_token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn verify_unknown_gateway_order_is_not_found() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/order/verify-payment")
        .set_json(json!({
            "razorpay_order_id": "order_missing",
            "razorpay_payment_id": "pay_001",
            "razorpay_signature": "00"
        }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(h.repos.orders.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn empty_checkout_is_rejected() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/order/create")
        .set_json(checkout(vec![], 10.0))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(h.gateway.requests.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn sellers_fulfil_only_their_items() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let ravi = Uuid::new_v4();
    let meena = Uuid::new_v4();
    let ravi_token = h
        .services
        .jwt
        .issue(ravi, "Ravi", "ravi@shop.example.com", PrincipalKind::Seller)
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/order/create")
        .set_json(checkout(vec![line(ravi, "Speaker"), line(meena, "Lamp")], 20.0))
        .to_request();
    let (_, body) = send(&app, req).await;
    let order_number = body["orderNumber"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/order/number/{}", order_number))
        .to_request();
    let (_, order) = send(&app, req).await;
    let order_id = order["id"].as_str().unwrap().to_string();
    let item_of = |seller: Uuid| {
        order["items"]
            .as_array()
            .unwrap()
            .iter()
            .find(|item| item["sellerId"] == seller.to_string())
            .map(|item| item["id"].as_str().unwrap().to_string())
            .unwrap()
    };
    let ravi_item = item_of(ravi);
    let meena_item = item_of(meena);

    let req = test::TestRequest::put()
        .uri(&format!("/seller/orders/{}/items/{}/status", order_id, meena_item))
        .insert_header(bearer(&ravi_token))
        .set_json(json!({ "status": "shipped" }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&format!("/seller/orders/{}/items/{}/status", order_id, ravi_item))
        .insert_header(bearer(&ravi_token))
        .set_json(json!({ "status": "shipped" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["fulfillmentStatus"], "shipped");
    assert_eq!(body["status"], "pending");

    let req = test::TestRequest::get()
        .uri(&format!("/order/number/{}", order_number))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["fulfillmentStatus"], "pending");

    let req = test::TestRequest::get()
        .uri("/seller/orders")
        .insert_header(bearer(&ravi_token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["items"][0]["status"], "shipped");

    let req = test::TestRequest::put()
        .uri(&format!("/seller/orders/{}/items/{}/status", order_id, Uuid::new_v4()))
        .insert_header(bearer(&ravi_token))
        .set_json(json!({ "status": "delivered" }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn reviews_update_rating_once_per_user() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let seller_token = h
        .services
        .jwt
        .issue(Uuid::new_v4(), "Ravi", "ravi@shop.example.com", PrincipalKind::Seller)
        .unwrap();
    let user_token = h
        .services
        .jwt
        .issue(Uuid::new_v4(), "Asha Rao", "asha@example.com", PrincipalKind::User)
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/product/add")
        .insert_header(bearer(&seller_token))
        .set_json(speaker(999.0))
        .to_request();
    let (_, body) = send(&app, req).await;
    let product_id = body["id"].as_str().unwrap().to_string();

    let review = json!({ "productId": product_id, "rating": 4, "comment": "Clear sound" });
    let req = test::TestRequest::post()
        .uri("/api/reviews/submit")
        .insert_header(bearer(&user_token))
        .set_json(&review)
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["userName"], "Asha Rao");

    let req = test::TestRequest::post()
        .uri("/api/reviews/submit")
        .insert_header(bearer(&user_token))
        .set_json(&review)
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate");

    let req = test::TestRequest::get()
        .uri(&format!("/api/reviews/product/{}", product_id))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get()
        .uri(&format!("/product/{}", product_id))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["rating"], 4.0);
}

#[actix_web::test]
async fn admin_dashboard_and_listings() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    for n in 0..3 {
        let req = test::TestRequest::post()
            .uri("/user/add")
            .set_json(json!({
                "name": format!("Shopper {}", n),
                "email": format!("shopper{}@example.com", n),
                "password": "secret123"
            }))
            .to_request();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "ADMIN@voicecart.test", "password": "admin-pass" }))
        .to_request();
    let (_, body) = send(&app, req).await;
    let admin_token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/admin/dashboard")
        .insert_header(bearer(&admin_token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalUsers"], 3);
    assert_eq!(body["totalOrders"], 0);

    let req = test::TestRequest::get()
        .uri("/api/admin/users?page=2&limit=2")
        .insert_header(bearer(&admin_token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 2);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/sellers/{}/approve", Uuid::new_v4()))
        .insert_header(bearer(&admin_token))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn admin_token_cannot_act_as_user_or_listing_seller() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let admin_token = h
        .services
        .jwt
        .issue(Uuid::nil(), "Administrator", "admin@voicecart.test", PrincipalKind::Admin)
        .unwrap();
    let seller_token = h
        .services
        .jwt
        .issue(Uuid::new_v4(), "Ravi", "ravi@shop.example.com", PrincipalKind::Seller)
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/product/add")
        .insert_header(bearer(&admin_token))
        .set_json(speaker(999.0))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(h.repos.products.count().await.unwrap(), 0);

    let req = test::TestRequest::post()
        .uri("/product/add")
        .insert_header(bearer(&seller_token))
        .set_json(speaker(999.0))
        .to_request();
    let (_, body) = send(&app, req).await;
    let product_id = body["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/reviews/submit")
        .insert_header(bearer(&admin_token))
        .set_json(json!({ "productId": product_id, "rating": 5 }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/user/wishlist/{}", product_id))
        .insert_header(bearer(&admin_token))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/api/reviews/product/{}", product_id))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body.as_array().map(Vec::len), Some(0));

    let req = test::TestRequest::put()
        .uri(&format!("/product/update/{}", product_id))
        .insert_header(bearer(&admin_token))
        .set_json(json!({ "featured": false }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["featured"], false);
}

#[actix_web::test]
async fn admin_sees_full_order_after_item_update() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let admin_token = h
        .services
        .jwt
        .issue(Uuid::nil(), "Administrator", "admin@voicecart.test", PrincipalKind::Admin)
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/order/create")
        .set_json(checkout(
            vec![line(Uuid::new_v4(), "Speaker"), line(Uuid::new_v4(), "Lamp")],
            20.0,
        ))
        .to_request();
    let (_, body) = send(&app, req).await;
    let order_number = body["orderNumber"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/order/number/{}", order_number))
        .to_request();
    let (_, order) = send(&app, req).await;
    let order_id = order["id"].as_str().unwrap();
    let item_id = order["items"][0]["id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/seller/orders/{}/items/{}/status", order_id, item_id))
        .insert_header(bearer(&admin_token))
        .set_json(json!({ "status": "cancelled" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["items"][0]["status"], "cancelled");
    assert_eq!(body["fulfillmentStatus"], "pending");
}

#[actix_web::test]
async fn my_orders_match_email_regardless_of_case() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/user/add")
        .set_json(json!({
            "name": "Priya Sharma",
            "email": "Priya@Example.com",
            "password": "secret123"
        }))
        .to_request();
    let (_, body) = send(&app, req).await;
    let token = body["token"].as_str().unwrap().to_string();

    let mut order = checkout(vec![line(Uuid::new_v4(), "Speaker")], 10.0);
    order["email"] = json!("Priya@Example.com");
    let req = test::TestRequest::post()
        .uri("/order/create")
        .set_json(order)
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/order/my-orders")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["email"], "priya@example.com");
}

#[actix_web::test]
async fn huge_page_number_returns_an_empty_page() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let admin_token = h
        .services
        .jwt
        .issue(Uuid::nil(), "Administrator", "admin@voicecart.test", PrincipalKind::Admin)
        .unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/admin/products?page={}&limit=20", i64::MAX))
        .insert_header(bearer(&admin_token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn sub_cent_discount_is_rejected() {
    let h = harness();
    let app = test::init_service(App::new().configure(|cfg| h.services.configure(cfg))).await;

    let seller_token = h
        .services
        .jwt
        .issue(Uuid::new_v4(), "Ravi", "ravi@shop.example.com", PrincipalKind::Seller)
        .unwrap();

    let mut product = speaker(100.0);
    product["discountPrice"] = json!(99.999);
    let req = test::TestRequest::post()
        .uri("/product/add")
        .insert_header(bearer(&seller_token))
        .set_json(product)
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}
