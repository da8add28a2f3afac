use std::collections::HashMap;
use std::time::Duration;

use degen_list::api::{DegenList, FetchState, LeaderboardPoller};
use degen_list::market::reprice_list;
use degen_list::view::{visible_items, Segment, SortBy, SortOrder};
use degen_list::Error;
use serde_json::json;
use tokio::time::timeout;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIST_PATH: &str = "/moby_screener/leaderboard/degen_list";

fn leaderboard() -> serde_json::Value {
    json!([
        {
            "token_address": "BonkMint",
            "token_symbol": "BONK",
            "token_icon": "https://img.example/bonk.png",
            "token_created": 1718000000,
            "price_usd": 110.0,
            "market_cap_usd": 110000.0,
            "total_supply": 1000.0,
            "liquidity_usd": 5500.0,
            "price_change_percent": {"m5": 10.0, "m30": 0.0, "h1": -50.0, "h8": 120.0, "h24": 10.0},
            "whale_count": {"m5": 1, "m30": 1, "h1": 2, "h4": 3, "h8": 3, "h24": 9},
            "is_new": false,
            "is_pump": true,
            "is_pro": true,
            "is_bonk": true,
            "is_believe": false,
            "is_ray": false,
            "antirug_score": null,
            "launchpad": "bonk"
        },
        {
            "token_address": "WifMint",
            "token_symbol": "WIF",
            "price_usd": 0.00042,
            "total_supply": 5000000.0,
            "liquidity_usd": 1200.0,
            "price_change_percent": {},
            "is_new": true,
            "is_pro": false
        },
        {
            "token_address": "NoSymbolMint",
            "price_usd": 2.5,
            "is_new": true,
            "is_pro": true
        }
    ])
}

async fn serve(template: ResponseTemplate) -> (MockServer, DegenList) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(template)
        .mount(&server)
        .await;
    let endpoint = format!("{}{}?compact=false", server.uri(), LIST_PATH);
    let client = DegenList::with_endpoint(&endpoint, Duration::from_secs(5)).unwrap();
    (server, client)
}

async fn wait_for<F>(rx: &mut tokio::sync::watch::Receiver<FetchState>, mut done: F) -> FetchState
where
    F: FnMut(&FetchState) -> bool,
{
    timeout(Duration::from_secs(5), async {
        loop {
            {
                let state = rx.borrow_and_update();
                if done(&state) {
                    return state.clone();
                }
            }
            rx.changed().await.expect("poller alive");
        }
    })
    .await
    .expect("state reached in time")
}

#[tokio::test]
async fn fetch_parses_leaderboard() {
    let (_server, client) = serve(ResponseTemplate::new(200).set_body_json(leaderboard())).await;

    let items = client.fetch().await.unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].token_symbol.as_deref(), Some("BONK"));
    assert_eq!(items[1].price_change_percent.h1, None);
    assert!(items[2].token_symbol.is_none());
}

#[tokio::test]
async fn fetch_item_reports_unknown_address() {
    let (_server, client) = serve(ResponseTemplate::new(200).set_body_json(leaderboard())).await;

    let item = client.fetch_item("WifMint").await.unwrap();
    assert_eq!(item.price_usd, 0.00042);

    let missing = client.fetch_item("Nope").await;
    assert!(matches!(missing, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn server_error_is_http_error() {
    let (_server, client) = serve(ResponseTemplate::new(503)).await;
    assert!(matches!(client.fetch().await, Err(Error::Http(_))));
}

#[tokio::test]
async fn fetched_list_reprices_filters_and_sorts() {
    let (_server, client) = serve(ResponseTemplate::new(200).set_body_json(leaderboard())).await;
    let items = client.fetch().await.unwrap();

    let mut prices = HashMap::new();
    prices.insert("BonkMint".to_string(), 121.0);
    let repriced = reprice_list(&items, &prices);

    let bonk = &repriced[0];
    assert_eq!(bonk.market_cap_usd, 1000.0 * 121.0);
    assert!((bonk.price_change_percent.h24.unwrap() - 21.0).abs() < 1e-9);
    assert!((bonk.price_change_percent.h4.unwrap() - 10.0).abs() < 1e-9);
    assert_eq!(items[0].price_usd, 110.0);

    let pro = visible_items(&repriced, 1.0, Segment::Pro, SortBy::Price, SortOrder::Ascending);
    let addresses: Vec<&str> = pro.iter().map(|i| i.token_address.as_str()).collect();
    assert_eq!(addresses, vec!["NoSymbolMint", "BonkMint"]);
}

#[tokio::test]
async fn poller_publishes_ready_state() {
    let (_server, client) = serve(ResponseTemplate::new(200).set_body_json(leaderboard())).await;
    let poller = LeaderboardPoller::spawn(client, Duration::from_secs(3600));
    let mut rx = poller.subscribe();

    let state = wait_for(&mut rx, |s| matches!(s, FetchState::Ready { refreshing: false, .. })).await;
    assert_eq!(state.items().map(|items| items.len()), Some(3));

    poller.shutdown().await;
}

#[tokio::test]
async fn manual_refresh_triggers_another_fetch() {
    let (server, client) = serve(ResponseTemplate::new(200).set_body_json(leaderboard())).await;
    let poller = LeaderboardPoller::spawn(client, Duration::from_secs(3600));
    let mut rx = poller.subscribe();

    wait_for(&mut rx, |s| matches!(s, FetchState::Ready { refreshing: false, .. })).await;
    assert!(poller.refresh());

    timeout(Duration::from_secs(5), async {
        while server.received_requests().await.unwrap().len() < 2 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("second fetch in time");
    let state = wait_for(&mut rx, |s| matches!(s, FetchState::Ready { refreshing: false, .. })).await;
    assert_eq!(state.items().map(|items| items.len()), Some(3));

    poller.shutdown().await;
}

#[tokio::test]
async fn poller_surfaces_fetch_failure() {
    let (_server, client) = serve(ResponseTemplate::new(500)).await;
    let poller = LeaderboardPoller::spawn(client, Duration::from_secs(3600));
    let mut rx = poller.subscribe();

    let state = wait_for(&mut rx, |s| matches!(s, FetchState::Failed { .. })).await;
    assert!(state.items().is_none());

    poller.shutdown().await;
}
