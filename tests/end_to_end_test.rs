use axum::http::StatusCode;
use rand::Rng;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;
use tokengate::interfaces::http;

mod common;

use common::{AUTH_TOKEN, FakeNetwork, check_balance, gate, send};

#[tokio::test]
async fn test_example_balance_sequence() {
    let net = FakeNetwork::default();
    let base = net.clone().spawn().await;
    let gate = gate(&base, 1000);
    let router = http::router(gate.clone());

    let (status, body) = send(&router, check_balance(Some("1000"), Some(AUTH_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "tokens": 0 }));
    assert_eq!(net.catalog_calls(), 0);

    let (status, body) = send(&router, check_balance(Some("1"), Some(AUTH_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Offers"].as_array().unwrap().len(), 2);
    assert_eq!(gate.ledger().balance().await, 0);
    assert_eq!(net.catalog_calls(), 1);
}

#[tokio::test]
async fn test_offers_are_enriched_where_details_exist() {
    let net = FakeNetwork::default();
    let base = net.clone().spawn().await;
    let router = http::router(gate(&base, 0));

    let (status, body) = send(&router, check_balance(Some("10"), Some(AUTH_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);

    let offers = body["Offers"].as_array().unwrap();
    let enriched = &offers[0];
    assert_eq!(enriched["AppName"], "Puzzle Quest");
    assert_eq!(enriched["Coins"], 500);
    assert_eq!(enriched["Description"], "Reach level 10 in Puzzle Quest");
    assert_eq!(enriched["App"]["BundleID"], "com.puzzle.quest");
    assert_eq!(
        enriched["EventConfigs"]["AdvancePlus"]["SequentialEvents"]["TotalCoinsPossible"],
        500
    );
    assert_eq!(enriched["CashbackSDKConfig"]["ExchangeRate"], 0.25);
    assert_eq!(enriched["Promotion"]["Name"], "Launch week");

    // token-2 has no campaign records and keeps its catalog fields.
    let plain = &offers[1];
    assert_eq!(plain["AppName"], "Road Racer");
    assert_eq!(plain["Description"], "catalog description");
    assert!(plain.get("Promotion").is_none());
}

#[tokio::test]
async fn test_failing_detail_lookup_keeps_offer() {
    let net = FakeNetwork {
        details: HashMap::from([
            (
                "token-1".to_string(),
                (StatusCode::INTERNAL_SERVER_ERROR, "{}".to_string()),
            ),
            ("token-2".to_string(), (StatusCode::OK, "garbage".to_string())),
        ]),
        ..Default::default()
    };
    let base = net.clone().spawn().await;
    let router = http::router(gate(&base, 0));

    let (status, body) = send(&router, check_balance(Some("1"), Some(AUTH_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);

    let offers = body["Offers"].as_array().unwrap();
    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0]["Description"], "");
    assert_eq!(offers[1]["Description"], "catalog description");
    assert_eq!(net.seen_with_prefix("/details/").await.len(), 2);
}

#[tokio::test]
async fn test_concurrent_first_requests_bootstrap_once() {
    let net = FakeNetwork {
        init_delay: Duration::from_millis(100),
        ..Default::default()
    };
    let base = net.clone().spawn().await;
    let gate = gate(&base, 10_000);
    let router = http::router(gate);

    let mut handles = Vec::new();
    for _ in 0..20 {
        let router = router.clone();
        handles.push(tokio::spawn(async move {
            send(&router, check_balance(Some("1"), Some(AUTH_TOKEN))).await
        }));
    }
    for handle in handles {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(net.init_calls(), 1);
}

#[tokio::test]
async fn test_bootstrap_failure_is_permanent() {
    let net = FakeNetwork {
        init_status: StatusCode::BAD_GATEWAY,
        ..Default::default()
    };
    let base = net.clone().spawn().await;
    let router = http::router(gate(&base, 1000));

    for _ in 0..3 {
        let (status, body) = send(&router, check_balance(Some("1"), Some(AUTH_TOKEN))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "System Initialization Failed");
    }
    assert_eq!(net.init_calls(), 1);
}

#[tokio::test]
async fn test_concurrent_debits_account_for_every_token() {
    let net = FakeNetwork::default();
    let base = net.clone().spawn().await;
    let initial = 500;
    let gate = gate(&base, initial);
    let router = http::router(gate.clone());

    let costs: Vec<u64> = {
        let mut rng = rand::thread_rng();
        (0..60).map(|_| rng.gen_range(1..=40)).collect()
    };

    let mut handles = Vec::new();
    for cost in costs.clone() {
        let router = router.clone();
        handles.push(tokio::spawn(async move {
            let (status, body) =
                send(&router, check_balance(Some(&cost.to_string()), Some(AUTH_TOKEN))).await;
            (cost, status, body)
        }));
    }

    let mut debited = 0;
    for handle in handles {
        let (cost, status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        match body.get("tokens").and_then(Value::as_u64) {
            Some(_) => debited += cost,
            None => assert!(body["Offers"].is_array()),
        }
    }

    assert!(debited <= initial);
    assert_eq!(gate.ledger().balance().await, initial - debited);
    assert_eq!(net.init_calls(), 1);
}
