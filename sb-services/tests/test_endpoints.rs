//! Wire contracts of the resource endpoints against a mock backend.
//!
//! Each test pins the method, path, query keys or body the backend expects
//! under the `/api/v1` prefix, and that authenticated calls carry the bearer.

mod common;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{
    body_json, body_partial_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sb_api::{ApiClient, ApiErrorKind};
use sb_models::{BookingRequest, BookingStatus, PriceRange, ReviewRequest, TokenStore, UserProfile};

use common::api_path;

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": 200, "data": data }))
}

/// Client signed in as user 7 with token t1.
fn signed_in_client(server: &MockServer) -> ApiClient {
    let tokens = TokenStore::in_memory();
    tokens.save(&common::test_session()).unwrap();
    common::create_test_client(server, tokens, Duration::from_secs(5))
}

// ---- Users ----

#[tokio::test]
async fn get_user_reads_plural_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/users/7")))
        .and(header("authorization", "Bearer t1"))
        .respond_with(ok(json!({ "id": 7, "fullName": "A", "email": "a@b.com" })))
        .expect(1)
        .mount(&server)
        .await;

    let user = signed_in_client(&server).get_user(7).await.unwrap();
    assert_eq!(user.full_name, "A");
}

#[tokio::test]
async fn update_user_puts_to_singular_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(api_path("/user/7")))
        .and(header("authorization", "Bearer t1"))
        .and(body_partial_json(json!({
            "fullName": "Lan Tran",
            "email": "a@b.com",
            "gender": false,
            "phoneNumber": "0901234567",
            "dateOfBirth": "2000-01-31"
        })))
        .respond_with(ok(json!({
            "id": 7,
            "fullName": "Lan Tran",
            "email": "a@b.com",
            "phoneNumber": "0901234567",
            "dateOfBirth": "2000-01-31"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile: UserProfile = serde_json::from_value(json!({
        "fullName": "Lan Tran",
        "email": "a@b.com",
        "gender": false,
        "phoneNumber": "0901234567",
        "dateOfBirth": "2000-01-31"
    }))
    .unwrap();
    let user = signed_in_client(&server)
        .update_user(7, &profile)
        .await
        .unwrap();
    assert_eq!(user.full_name, "Lan Tran");
    assert_eq!(user.phone_number.as_deref(), Some("0901234567"));
}

// ---- Hotels and provinces ----

#[tokio::test]
async fn best_hotels_sends_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/hotels/best")))
        .and(query_param("limit", "4"))
        .respond_with(ok(json!([{ "id": 1, "name": "Sea View" }])))
        .expect(1)
        .mount(&server)
        .await;

    let hotels = signed_in_client(&server).best_hotels(4).await.unwrap();
    assert_eq!(hotels.len(), 1);
    assert_eq!(hotels[0].name, "Sea View");
}

#[tokio::test]
async fn hotels_by_province_uses_province_prefix_and_sort() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/5/hotels")))
        .and(query_param("sortBy", "price"))
        .respond_with(ok(json!([{ "id": 2, "name": "Old Quarter Inn" }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/6/hotels")))
        .and(query_param_is_missing("sortBy"))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = signed_in_client(&server);
    let hotels = api.hotels_by_province(5, Some("price")).await.unwrap();
    assert_eq!(hotels[0].id, 2);
    assert!(api.hotels_by_province(6, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn hotel_rooms_sends_price_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/hotels/3/rooms")))
        .and(query_param("minPrice", "100"))
        .and(query_param("maxPrice", "500"))
        .and(query_param("sortBy", "price"))
        .respond_with(ok(json!([{ "id": 4, "roomNumber": "101", "price": 250.0 }])))
        .expect(1)
        .mount(&server)
        .await;

    let range = PriceRange {
        min_price: Some(100.0),
        max_price: Some(500.0),
    };
    let rooms = signed_in_client(&server)
        .hotel_rooms(3, range, Some("price"))
        .await
        .unwrap();
    assert_eq!(rooms[0].title, "101");
}

#[tokio::test]
async fn get_province_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/provinces/2")))
        .respond_with(ok(json!({ "id": 2, "provinceName": "Da Nang", "imageURL": "dn.jpg" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/provinces/99")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK", "data": null, "message": "Province not found"
        })))
        .mount(&server)
        .await;

    let api = signed_in_client(&server);
    let province = api.get_province(2).await.unwrap();
    assert_eq!(province.province_name, "Da Nang");
    assert_eq!(province.image_url.as_deref(), Some("dn.jpg"));

    let err = api.get_province(99).await.unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Unknown);
    assert_eq!(err.to_string(), "Province not found");
}

// ---- Rooms ----

#[tokio::test]
async fn room_image_uses_nested_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/rooms/4/images/9")))
        .respond_with(ok(json!({ "id": 9, "imageURL": "https://cdn.example/r4-9.jpg" })))
        .expect(1)
        .mount(&server)
        .await;

    let image = signed_in_client(&server).room_image(4, 9).await.unwrap();
    assert_eq!(image.id, 9);
    assert_eq!(image.image_url, "https://cdn.example/r4-9.jpg");
}

// ---- Reviews ----

#[tokio::test]
async fn list_reviews_sends_hotel_and_room_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/reviews")))
        .and(query_param("hotelId", "3"))
        .and(query_param("roomId", "4"))
        .respond_with(ok(json!([{ "id": 1, "fullName": "An", "rating": 5 }])))
        .expect(1)
        .mount(&server)
        .await;

    let reviews = signed_in_client(&server)
        .list_reviews(Some(3), Some(4))
        .await
        .unwrap();
    assert_eq!(reviews[0].rating, 5);
}

#[tokio::test]
async fn create_review_posts_body_without_unset_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/reviews")))
        .and(header("authorization", "Bearer t1"))
        .and(body_json(json!({
            "hotelId": 3,
            "userId": 7,
            "rating": 5,
            "comment": "Great stay"
        })))
        .respond_with(ok(json!({
            "id": 12, "fullName": "A", "comment": "Great stay", "rating": 5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let review = signed_in_client(&server)
        .create_review(&ReviewRequest {
            hotel_id: Some(3),
            room_id: None,
            user_id: Some(7),
            rating: 5,
            comment: "Great stay".into(),
        })
        .await
        .unwrap();
    assert_eq!(review.id, 12);
}

// ---- Bookings ----

#[tokio::test]
async fn create_booking_posts_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/bookings")))
        .and(header("authorization", "Bearer t1"))
        .and(body_partial_json(json!({
            "userId": 7,
            "roomId": 4,
            "hotelId": 3,
            "checkInDate": "2025-06-01",
            "checkOutDate": "2025-06-03",
            "adults": 2,
            "children": 0,
            "infants": 0,
            "paymentMethodId": 1
        })))
        .respond_with(ok(json!({
            "bookingId": 11,
            "roomId": 4,
            "hotelId": 3,
            "checkInDate": "2025-06-01",
            "checkOutDate": "2025-06-03",
            "status": "PENDING"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request: BookingRequest = serde_json::from_value(json!({
        "userId": 7,
        "roomId": 4,
        "hotelId": 3,
        "checkInDate": "2025-06-01",
        "checkOutDate": "2025-06-03",
        "adults": 2,
        "children": 0,
        "infants": 0,
        "paymentMethodId": 1
    }))
    .unwrap();
    let booking = signed_in_client(&server)
        .create_booking(&request)
        .await
        .unwrap();
    assert_eq!(booking.booking_id, 11);
    assert_eq!(booking.status, BookingStatus::Pending);
}

#[tokio::test]
async fn list_bookings_sends_user_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/bookings")))
        .and(query_param("userId", "7"))
        .and(query_param("status", "CONFIRMED"))
        .respond_with(ok(json!([{
            "bookingId": 11,
            "roomId": 4,
            "hotelId": 3,
            "checkInDate": "2025-06-01",
            "checkOutDate": "2025-06-03",
            "status": "CONFIRMED"
        }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/bookings")))
        .and(query_param("userId", "7"))
        .and(query_param_is_missing("status"))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = signed_in_client(&server);
    let confirmed = api
        .list_bookings(7, Some(BookingStatus::Confirmed))
        .await
        .unwrap();
    assert_eq!(confirmed.len(), 1);
    assert!(api.list_bookings(7, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn payment_methods_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/payment-methods")))
        .respond_with(ok(json!([{ "id": 1, "code": "CASH", "name": "Cash" }])))
        .expect(1)
        .mount(&server)
        .await;

    let methods = signed_in_client(&server).list_payment_methods().await.unwrap();
    assert_eq!(methods[0].code.as_deref(), Some("CASH"));
}
