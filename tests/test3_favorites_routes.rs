mod common;

use actix_web::http::StatusCode;
use actix_web::{App, test};
use serde_json::{Value, json};

use common::{StubFighterApi, TestState};

#[actix_web::test]
async fn test3_add_is_idempotent() {
    let state = TestState::new(StubFighterApi::with_fixture(), 15);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/favorites/user123").to_request();
    let ids: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert!(ids.is_empty());

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/favorites/user123")
            .set_json(json!({"fighterId": "42"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "Added to favorites");

        let req = test::TestRequest::get().uri("/favorites/user123").to_request();
        let ids: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids, vec!["42"]);
    }
}

#[actix_web::test]
async fn test3_delete_and_numeric_ids() {
    let state = TestState::new(StubFighterApi::with_fixture(), 15);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/favorites/u1")
        .set_json(json!({"fighterId": 140000003}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri("/favorites/u1")
        .set_json(json!({"fighterId": "140000003"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "Removed from favorites");

    // removing again is still a success
    let req = test::TestRequest::delete()
        .uri("/favorites/u1")
        .set_json(json!({"fighterId": "140000003"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/favorites/u1").to_request();
    let ids: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert!(ids.is_empty());
}

#[actix_web::test]
async fn test3_missing_fighter_id_is_rejected() {
    let state = TestState::new(StubFighterApi::with_fixture(), 15);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    for body in [json!({}), json!({"fighterId": "  "}), json!({"fighterId": null})] {
        let req = test::TestRequest::post()
            .uri("/favorites/user123")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().is_some());
    }

    let req = test::TestRequest::get().uri("/favorites/user123").to_request();
    let ids: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert!(ids.is_empty());
}

#[actix_web::test]
async fn test3_toggle_json_and_htmx() {
    let state = TestState::new(StubFighterApi::with_fixture(), 15);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/favorites/user123/toggle")
        .set_json(json!({"fighterId": "42"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"fighterId": "42", "favorited": true, "fighterIds": ["42"]}));

    // htmx posts the form-encoded hx-vals and wants the button back
    let req = test::TestRequest::post()
        .uri("/favorites/user123/toggle")
        .insert_header(("HX-Request", "true"))
        .set_form([("fighterId", "42")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    let fragment = scraper::Html::parse_fragment(&html);
    let selector = scraper::Selector::parse("button.star").unwrap();
    let button = fragment.select(&selector).next().expect("star button");
    assert_eq!(button.value().attr("aria-pressed"), Some("false"));
    assert_eq!(button.text().collect::<String>().trim(), "☆");

    let req = test::TestRequest::get().uri("/favorites/user123").to_request();
    let ids: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert!(ids.is_empty());
}
