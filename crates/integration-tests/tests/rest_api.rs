//! Integration tests for the REST collection.
//!
//! These tests require a running brewery server seeded with the demo catalog.
//!
//! Run with: cargo test -p brewery-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use brewery_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::{Value, json};

fn ctx() -> TestContext {
    TestContext::from_env().unwrap()
}

#[tokio::test]
#[ignore = "Requires running brewery server"]
async fn test_list_sorted_by_name() {
    let ctx = ctx();
    let resp = ctx
        .client
        .get(ctx.url("/api/v4/beer?sort=beerName,asc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    let beers = body["_embedded"]["beers"].as_array().unwrap();
    assert!(beers.len() <= 20);

    let names: Vec<&str> = beers
        .iter()
        .map(|b| b["beerName"].as_str().unwrap())
        .collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[tokio::test]
#[ignore = "Requires running brewery server"]
async fn test_zero_page_size_is_rejected() {
    let ctx = ctx();
    let resp = ctx
        .client
        .get(ctx.url("/api/v4/beer?size=0"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running brewery server"]
async fn test_crud_round_trip() {
    let ctx = ctx();

    let resp = ctx
        .client
        .post(ctx.url("/api/v4/beer"))
        .json(&json!({
            "beerName": "Integration Porter",
            "beerStyle": "PORTER",
            "upc": "0083783375213",
            "price": "12.50",
            "quantityOnHand": 4
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers()["location"].to_str().unwrap().to_string();
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["_links"]["self"]["href"], location.as_str());

    let resp = ctx
        .client
        .patch(&location)
        .json(&json!({ "price": "13.00" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let patched: Value = resp.json().await.unwrap();
    assert_eq!(patched["price"], "13.00");
    assert_eq!(patched["beerName"], "Integration Porter");

    let resp = ctx.client.delete(&location).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = ctx.client.get(&location).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running brewery server"]
async fn test_search_links() {
    let ctx = ctx();
    let body: Value = ctx
        .client
        .get(ctx.url("/api/v4/beer/search"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["_links"]["findAllByBeerName"]["templated"], true);
}
