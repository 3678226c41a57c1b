//! Event and ticket management against a mock backend.

#![allow(clippy::unwrap_used)]

use bookmyevent_client::{ApiError, filter_by_tag, nearby};
use bookmyevent_core::{
    Coordinates, EventDate, EventId, EventUpdate, NewEvent, Price, Tag, TicketId,
};
use bookmyevent_integration_tests::{TOKEN, TestContext, session};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_list_events_decodes_sparse_documents() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/event/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_id": "E1",
                "title": "Jazz Night",
                "date": "2030-06-01",
                "venue": "Blue Room",
                "price": "12.50",
                "latitude": 51.51,
                "longitude": -0.1,
                "tag": "Music",
                "createdBy": { "_id": "u1", "username": "ada" }
            },
            { "_id": "E2", "title": "Pop-up", "price": null, "tag": null },
            { "_id": "E3", "title": "Far away", "latitude": 48.85, "longitude": 2.35, "tag": "music" }
        ])))
        .mount(&ctx.server)
        .await;

    let events = ctx.api.list_events(None).await.unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].price.unwrap().to_string(), "12.50");
    assert!(events[1].price.is_none());

    let music: Vec<&str> = filter_by_tag(&events, "music")
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(music, vec!["E1", "E3"]);

    let close = nearby(&events, &Coordinates::DEFAULT_CENTER, 25.0);
    assert_eq!(close.len(), 1);
    assert_eq!(close[0].0.id, EventId::new("E1"));
}

#[tokio::test]
async fn test_one_bad_document_does_not_sink_the_list() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/event/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "E1", "title": null, "venue": null },
            { "title": "missing id" },
            42,
            { "_id": "E2", "id": "E2", "price": "-5", "capacity": "100", "tag": " " }
        ])))
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/event"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userEvents": [{ "_id": "E3", "description": null }, null]
        })))
        .mount(&ctx.server)
        .await;

    let events = ctx.api.list_events(None).await.unwrap();
    let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["E1", "E2"]);
    assert_eq!(events[0].title, "");
    assert!(events[1].price.is_none());
    assert_eq!(events[1].capacity, Some(100));
    assert!(events[1].tag.is_none());

    let mine = ctx.api.my_events(&session()).await.unwrap();
    assert_eq!(mine.len(), 1);
}

#[tokio::test]
async fn test_list_events_sends_token_when_logged_in() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/event/all"))
        .and(header("Authorization", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let events = ctx.api.list_events(Some(&session())).await.unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_create_event_body() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/event/create"))
        .and(header("Authorization", TOKEN))
        .and(body_json(json!({
            "title": "Jazz Night",
            "description": "",
            "date": "2030-06-01",
            "venue": "Blue Room",
            "price": "15",
            "latitude": 51.505,
            "longitude": -0.09,
            "tag": "music"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Event created",
            "event": { "_id": "E9", "title": "Jazz Night" }
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let mut event = NewEvent::new("Jazz Night", EventDate::new("2030-06-01"), "Blue Room");
    event.price = "15".parse::<Price>().unwrap();
    event.tag = Some(Tag::parse("music").unwrap());

    let created = ctx.api.create_event(&session(), &event).await.unwrap();
    assert_eq!(created.unwrap().id, EventId::new("E9"));
}

#[tokio::test]
async fn test_update_sends_only_changed_fields() {
    let ctx = TestContext::new().await;
    Mock::given(method("PUT"))
        .and(path("/event/E1"))
        .and(header("Authorization", TOKEN))
        .and(body_json(json!({ "venue": "Green Room" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "updated" })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let update = EventUpdate {
        venue: Some("Green Room".to_string()),
        ..EventUpdate::default()
    };
    ctx.api
        .update_event(&session(), &EventId::new("E1"), &update)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_empty_update_is_not_sent() {
    let ctx = TestContext::new().await;

    let result = ctx
        .api
        .update_event(&session(), &EventId::new("E1"), &EventUpdate::default())
        .await;

    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    assert_eq!(ctx.count("PUT", "/event/E1").await, 0);
}

#[tokio::test]
async fn test_my_events_and_delete() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/event"))
        .and(header("Authorization", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userEvents": [{ "_id": "E1", "title": "Mine" }]
        })))
        .mount(&ctx.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/event/E1"))
        .and(header("Authorization", TOKEN))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let mine = ctx.api.my_events(&session()).await.unwrap();
    assert_eq!(mine.len(), 1);
    ctx.api.delete_event(&session(), &mine[0].id).await.unwrap();
}

#[tokio::test]
async fn test_delete_someone_elses_event() {
    let ctx = TestContext::new().await;
    Mock::given(method("DELETE"))
        .and(path("/event/E5"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Not your event"))
        .mount(&ctx.server)
        .await;

    let err = ctx
        .api
        .delete_event(&session(), &EventId::new("E5"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn test_cancel_ticket_path() {
    let ctx = TestContext::new().await;
    Mock::given(method("DELETE"))
        .and(path("/ticket/T1"))
        .and(header("Authorization", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "cancelled" })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    ctx.api
        .cancel_ticket(&session(), &TicketId::new("T1"))
        .await
        .unwrap();
}
