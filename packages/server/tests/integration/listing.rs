use reqwest::Method;

use crate::common::{
    TestApp, filename_of, jpeg_bytes, listing_fields, routes, with_field_value,
};

#[tokio::test]
async fn create_listing_with_one_image() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app
        .create_listing(&token, &[("images", "bike.jpg", jpeg_bytes(1))])
        .await;

    assert_eq!(res.body["make"].as_str().unwrap(), "Honda");
    assert_eq!(res.body["model"].as_str().unwrap(), "CB350");
    assert!(res.id() >= 1);

    let images = res.images();
    assert_eq!(images.len(), 1);
    assert!(images[0].ends_with(".jpg"), "unexpected URL: {}", images[0]);

    // Exactly the one uploaded file is in storage.
    let stored = app.files_in_bucket("listings-images");
    assert_eq!(stored, vec![filename_of(&images[0])]);
}

#[tokio::test]
async fn create_listing_without_images_is_valid() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app.create_listing(&token, &[]).await;

    assert_eq!(res.images().len(), 0);
    assert!(app.files_in_bucket("listings-images").is_empty());
}

#[tokio::test]
async fn create_listing_rejects_invalid_fields_before_any_upload() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    for (field, value) in [
        ("price", "0"),
        ("year", "1899"),
        ("condition", "Mint"),
        ("make", "H"),
        ("description", "too short"),
    ] {
        let res = app
            .send_form(
                Method::POST,
                routes::LISTINGS,
                &with_field_value(listing_fields(), field, value),
                &[],
                &[("images", "bike.jpg", jpeg_bytes(1))],
                Some(&token),
            )
            .await;
        assert_eq!(res.status, 400, "{field}={value}: {}", res.text);
        assert_eq!(res.body["code"].as_str().unwrap(), "VALIDATION_ERROR");
    }

    // Validation failed before any storage call.
    assert!(app.files_in_bucket("listings-images").is_empty());
}

#[tokio::test]
async fn zero_byte_file_is_treated_as_no_file() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app
        .create_listing(&token, &[("images", "empty.jpg", Vec::new())])
        .await;

    assert_eq!(res.images().len(), 0);
    assert!(app.files_in_bucket("listings-images").is_empty());
}

#[tokio::test]
async fn list_listings_returns_newest_first_with_filters() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let first = app.create_listing(&token, &[]).await.id();
    let fields = with_field_value(listing_fields(), "make", "Yamaha");
    let fields = with_field_value(fields, "model", "MT-07");
    let fields = with_field_value(fields, "price", "250000");
    let res = app
        .send_form(
            Method::POST,
            routes::LISTINGS,
            &fields,
            &[],
            &[],
            Some(&token),
        )
        .await;
    assert_eq!(res.status, 201);
    let second = res.id();

    let res = app.get(routes::LISTINGS).await;
    assert_eq!(res.status, 200);
    let ids: Vec<i64> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second as i64, first as i64]);

    let res = app.get(&format!("{}?make=yamaha", routes::LISTINGS)).await;
    let makes: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["make"].as_str().unwrap())
        .collect();
    assert_eq!(makes, vec!["Yamaha"]);

    let res = app
        .get(&format!("{}?max_price=200000", routes::LISTINGS))
        .await;
    assert_eq!(res.body.as_array().unwrap().len(), 1);

    let res = app.get(&format!("{}?search=mt-0", routes::LISTINGS)).await;
    assert_eq!(res.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_listing_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get(&routes::listing(99999)).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"].as_str().unwrap(), "NOT_FOUND");
}

#[tokio::test]
async fn update_listing_removing_only_image_deletes_it_from_storage() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let created = app
        .create_listing(&token, &[("images", "bike.jpg", jpeg_bytes(1))])
        .await;
    let id = created.id();
    assert_eq!(app.files_in_bucket("listings-images").len(), 1);

    // Admin removed the only image: no kept URLs, no new uploads.
    let res = app
        .send_form(
            Method::PUT,
            &routes::listing(id),
            &listing_fields(),
            &[],
            &[],
            Some(&token),
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.images().len(), 0);
    assert!(app.files_in_bucket("listings-images").is_empty());
}

#[tokio::test]
async fn update_listing_with_unchanged_set_is_a_storage_noop() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let created = app
        .create_listing(&token, &[("images", "bike.jpg", jpeg_bytes(1))])
        .await;
    let id = created.id();
    let kept = created.images();
    let stored_before = app.files_in_bucket("listings-images");

    for _ in 0..2 {
        let res = app
            .send_form(
                Method::PUT,
                &routes::listing(id),
                &listing_fields(),
                &kept,
                &[],
                Some(&token),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.images(), kept);
    }

    assert_eq!(app.files_in_bucket("listings-images"), stored_before);
}

#[tokio::test]
async fn update_listing_keeps_then_appends_new_uploads() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let created = app
        .create_listing(&token, &[("images", "bike.jpg", jpeg_bytes(1))])
        .await;
    let id = created.id();
    let kept = created.images();

    let res = app
        .send_form(
            Method::PUT,
            &routes::listing(id),
            &with_field_value(listing_fields(), "price", "140000"),
            &kept,
            &[("images", "second.png", jpeg_bytes(2))],
            Some(&token),
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["price"].as_i64().unwrap(), 140_000);

    let images = res.images();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0], kept[0]);
    assert!(images[1].ends_with(".png"));
    assert_eq!(app.files_in_bucket("listings-images").len(), 2);
}

#[tokio::test]
async fn update_listing_not_found() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app
        .send_form(
            Method::PUT,
            &routes::listing(99999),
            &listing_fields(),
            &[],
            &[],
            Some(&token),
        )
        .await;

    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn delete_listing_removes_row_and_images() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let created = app
        .create_listing(&token, &[("images", "bike.jpg", jpeg_bytes(1))])
        .await;
    let id = created.id();

    let res = app.delete_with_token(&routes::listing(id), &token).await;
    assert_eq!(res.status, 204);

    assert_eq!(app.get(&routes::listing(id)).await.status, 404);
    assert!(app.files_in_bucket("listings-images").is_empty());
}

#[tokio::test]
async fn delete_listing_not_found_touches_no_storage() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    app.create_listing(&token, &[("images", "bike.jpg", jpeg_bytes(1))])
        .await;
    let stored_before = app.files_in_bucket("listings-images");

    let res = app.delete_with_token(&routes::listing(99999), &token).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"].as_str().unwrap(), "NOT_FOUND");
    assert_eq!(app.files_in_bucket("listings-images"), stored_before);
}

#[tokio::test]
async fn stored_image_is_served_by_the_media_route() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let created = app
        .create_listing(&token, &[("images", "bike.jpg", jpeg_bytes(7))])
        .await;
    let name = filename_of(&created.images()[0]);

    let res = app.get(&format!("/media/listings-images/{name}")).await;
    assert_eq!(res.status, 200);

    let res = app.get("/media/listings-images/no-such-file.jpg").await;
    assert_eq!(res.status, 404);

    let res = app.get("/media/unknown-bucket/file.jpg").await;
    assert_eq!(res.status, 404);
}
