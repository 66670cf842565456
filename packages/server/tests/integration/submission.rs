use reqwest::Method;
use sea_orm::EntityTrait;

use server::entity::submission;

use crate::common::{
    TestApp, filename_of, jpeg_bytes, listing_fields, routes, sell_fields, with_field_value,
};

#[tokio::test]
async fn sell_form_creates_a_submission_with_photos() {
    let app = TestApp::spawn().await;

    let res = app
        .send_form(
            Method::POST,
            routes::SUBMISSIONS,
            &sell_fields(),
            &[],
            &[("images", "front.jpg", jpeg_bytes(1))],
            None,
        )
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert!(res.id() >= 1);
    assert!(res.body["submitted_at"].is_string());
    assert_eq!(app.files_in_bucket("listings-images").len(), 1);

    // Pending submissions are only visible to the admin.
    let token = app.admin_token().await;
    let list = app.get_with_token(routes::SUBMISSIONS, &token).await;
    assert_eq!(list.status, 200);
    let rows = list.body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"].as_str().unwrap(), "Ravi Kumar");
    assert_eq!(rows[0]["images"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn sell_form_without_photos_stores_null_images() {
    let app = TestApp::spawn().await;

    let res = app
        .send_form(Method::POST, routes::SUBMISSIONS, &sell_fields(), &[], &[], None)
        .await;

    assert_eq!(res.status, 201, "{}", res.text);

    let token = app.admin_token().await;
    let list = app.get_with_token(routes::SUBMISSIONS, &token).await;
    assert!(list.body.as_array().unwrap()[0]["images"].is_null());
}

#[tokio::test]
async fn sell_form_rejects_short_description() {
    let app = TestApp::spawn().await;

    let res = app
        .send_form(
            Method::POST,
            routes::SUBMISSIONS,
            &with_field_value(sell_fields(), "description", "Runs fine."),
            &[],
            &[("images", "front.jpg", jpeg_bytes(1))],
            None,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"].as_str().unwrap(), "VALIDATION_ERROR");
    assert!(app.files_in_bucket("listings-images").is_empty());
}

#[tokio::test]
async fn listing_submissions_requires_admin_token() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::SUBMISSIONS).await;

    assert_eq!(res.status, 401);
}

#[tokio::test]
async fn approve_keeps_one_image_uploads_one_and_removes_the_submission() {
    let app = TestApp::spawn().await;

    // Seller submits with two photos.
    let submitted = app
        .send_form(
            Method::POST,
            routes::SUBMISSIONS,
            &sell_fields(),
            &[],
            &[
                ("images", "front.jpg", jpeg_bytes(1)),
                ("images", "rear.jpg", jpeg_bytes(2)),
            ],
            None,
        )
        .await;
    assert_eq!(submitted.status, 201, "{}", submitted.text);
    let submission_id = submitted.id();

    let token = app.admin_token().await;
    let list = app.get_with_token(routes::SUBMISSIONS, &token).await;
    let original_urls: Vec<String> = list.body.as_array().unwrap()[0]["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert_eq!(original_urls.len(), 2);

    // Admin keeps the first photo, drops the second, and adds a new one.
    let kept = vec![original_urls[0].clone()];
    let res = app
        .send_form(
            Method::POST,
            &routes::submission_approve(submission_id),
            &listing_fields(),
            &kept,
            &[("images", "studio.jpg", jpeg_bytes(3))],
            Some(&token),
        )
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    let images = res.images();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0], kept[0]);
    assert_ne!(images[1], original_urls[1]);

    // The listing is live.
    let listing_id = res.id();
    let live = app.get(&routes::listing(listing_id)).await;
    assert_eq!(live.status, 200);
    assert_eq!(live.images(), images);

    // The submission row is gone.
    let list = app.get_with_token(routes::SUBMISSIONS, &token).await;
    assert_eq!(list.body.as_array().unwrap().len(), 0);

    // The dropped photo was deleted; the kept and new ones remain.
    let mut expected: Vec<String> = images.iter().map(|u| filename_of(u)).collect();
    expected.sort();
    assert_eq!(app.files_in_bucket("listings-images"), expected);
}

#[tokio::test]
async fn approve_with_invalid_fields_leaves_the_submission_intact() {
    let app = TestApp::spawn().await;

    let submitted = app
        .send_form(
            Method::POST,
            routes::SUBMISSIONS,
            &sell_fields(),
            &[],
            &[("images", "front.jpg", jpeg_bytes(1))],
            None,
        )
        .await;
    let submission_id = submitted.id();

    let token = app.admin_token().await;
    let res = app
        .send_form(
            Method::POST,
            &routes::submission_approve(submission_id),
            &with_field_value(listing_fields(), "price", "0"),
            &[],
            &[],
            Some(&token),
        )
        .await;
    assert_eq!(res.status, 400);

    // Still pending, photos untouched.
    let row = submission::Entity::find_by_id(submission_id)
        .one(&app.db)
        .await
        .unwrap();
    assert!(row.is_some());
    assert_eq!(app.files_in_bucket("listings-images").len(), 1);

    // Nothing was promoted.
    let listings = app.get(routes::LISTINGS).await;
    assert_eq!(listings.body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn approve_missing_submission_returns_not_found() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app
        .send_form(
            Method::POST,
            &routes::submission_approve(99999),
            &listing_fields(),
            &[],
            &[],
            Some(&token),
        )
        .await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"].as_str().unwrap(), "NOT_FOUND");
}

#[tokio::test]
async fn reject_deletes_the_submission_and_its_photos() {
    let app = TestApp::spawn().await;

    let submitted = app
        .send_form(
            Method::POST,
            routes::SUBMISSIONS,
            &sell_fields(),
            &[],
            &[("images", "front.jpg", jpeg_bytes(1))],
            None,
        )
        .await;
    let submission_id = submitted.id();

    let token = app.admin_token().await;
    let res = app
        .delete_with_token(&routes::submission(submission_id), &token)
        .await;
    assert_eq!(res.status, 204);

    let list = app.get_with_token(routes::SUBMISSIONS, &token).await;
    assert_eq!(list.body.as_array().unwrap().len(), 0);
    assert!(app.files_in_bucket("listings-images").is_empty());
}

#[tokio::test]
async fn delete_missing_submission_returns_not_found() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app.delete_with_token(&routes::submission(99999), &token).await;

    assert_eq!(res.status, 404);
}
