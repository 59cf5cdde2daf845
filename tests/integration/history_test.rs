//! Integration tests for the trade history client

mod support;

use polo_history::api::{ApiError, ClientConfig, PoloniexClient, TradeHistorySource};
use polo_history::auth::{sign, Credentials};
use polo_history::history::{
    DecodeError, PairRegistry, TimeRange, TimestampError, TradeSide, UnknownPairPolicy,
};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

const HISTORY_BODY: &str = r#"{
    "BTC_ETH": [
        {
            "globalTradeID": 25129732,
            "tradeID": "6325758",
            "date": "2017-05-18 15:04:36",
            "rate": "0.05212345",
            "amount": "12.34567891",
            "total": "0.64349999",
            "fee": "0.00150000",
            "orderNumber": "34225313575",
            "type": "sell",
            "category": "exchange"
        }
    ],
    "BTC_NEWCOIN": []
}"#;

fn credentials() -> Credentials {
    Credentials::new("test-key", "test-secret").unwrap()
}

fn client_with(url: &str, timeout: Duration, policy: UnknownPairPolicy) -> PoloniexClient {
    let config = ClientConfig {
        base_url: url.to_string(),
        timeout,
        registry: PairRegistry::default(),
        unknown_pairs: policy,
    };
    PoloniexClient::with_config(config, credentials()).unwrap()
}

#[tokio::test]
async fn test_fetch_trade_history_end_to_end() {
    let (url, server) = support::serve_once(200, HISTORY_BODY).await;
    let client = PoloniexClient::new(&url, credentials()).unwrap();

    let history = client
        .get_my_trade_history("2017-05-18T15:00:00", "2017-05-19T15:00:00")
        .await
        .unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history.skipped_pairs(), ["BTC_NEWCOIN"]);
    let trade = &history.get("BTC_ETH").unwrap()[0];
    assert_eq!(trade.global_trade_id, 25129732);
    assert_eq!(trade.rate, "0.05212345");
    assert_eq!(trade.side, TradeSide::Sell);

    let requests = server.await.unwrap();
    let request = &requests[0];
    assert!(request.request_line.starts_with("POST /tradingApi "));

    let form = request.form();
    let keys: Vec<&str> = form.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["command", "nonce", "currencyPair", "start", "end"]);
    assert_eq!(form[0].1, "returnTradeHistory");
    assert!(form[1].1.parse::<u64>().is_ok());
    assert_eq!(form[2].1, "all");
    assert_eq!(form[3].1, "1495119600");
    assert_eq!(form[4].1, "1495206000");

    assert_eq!(
        request.header("sign"),
        Some(sign(request.body.as_bytes(), b"test-secret").as_str())
    );
    assert_eq!(request.header("key"), Some("test-key"));
    assert_eq!(
        request.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
}

#[tokio::test]
async fn test_nonce_increases_across_calls() {
    let (url, server) = support::serve(vec![(200, "[]"), (200, "[]")]).await;
    let client = PoloniexClient::new(&url, credentials()).unwrap();

    for _ in 0..2 {
        let history = client
            .get_my_trade_history("2017-05-18T15:00:00", "2017-05-19T15:00:00")
            .await
            .unwrap();
        assert!(history.is_empty());
    }

    let requests = server.await.unwrap();
    let nonce = |i: usize| requests[i].form()[1].1.parse::<u64>().unwrap();
    assert!(nonce(1) > nonce(0));
}

#[tokio::test]
async fn test_deadline_produces_timeout() {
    let (url, server) = support::serve_silently().await;
    let client = client_with(&url, Duration::from_millis(200), UnknownPairPolicy::Skip);

    let started = Instant::now();
    let err = client
        .get_my_trade_history("2017-05-18T15:00:00", "2017-05-19T15:00:00")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Timeout(d) if d == Duration::from_millis(200)));
    assert!(started.elapsed() < Duration::from_secs(5));
    server.abort();
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let url = support::closed_endpoint().await;
    let client = PoloniexClient::new(&url, credentials()).unwrap();

    let err = client
        .get_my_trade_history("2017-05-18T15:00:00", "2017-05-19T15:00:00")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)), "got {:?}", err);
    assert!(!err.is_local());
}

#[tokio::test]
async fn test_exchange_rejection_surfaces_as_decode_error() {
    let (url, _server) =
        support::serve_once(403, r#"{"error":"Invalid API key/secret pair."}"#).await;
    let client = PoloniexClient::new(&url, credentials()).unwrap();

    let err = client
        .get_my_trade_history("2017-05-18T15:00:00", "2017-05-19T15:00:00")
        .await
        .unwrap_err();

    match err {
        ApiError::Decode {
            status,
            source: DecodeError::Exchange(message),
        } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Invalid API key/secret pair.");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_page_is_decode_error() {
    let (url, _server) = support::serve_once(500, "<html>oops</html>").await;
    let client = PoloniexClient::new(&url, credentials()).unwrap();

    let err = client
        .get_my_trade_history("2017-05-18T15:00:00", "2017-05-19T15:00:00")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Decode {
            status: 500,
            source: DecodeError::Json(_)
        }
    ));
}

#[tokio::test]
async fn test_reject_policy_fails_on_unknown_pair() {
    let (url, _server) = support::serve_once(200, HISTORY_BODY).await;
    let client = client_with(&url, Duration::from_secs(5), UnknownPairPolicy::Reject);

    let err = client
        .get_my_trade_history("2017-05-18T15:00:00", "2017-05-19T15:00:00")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Decode {
            source: DecodeError::UnknownPair(ref pair),
            ..
        } if pair == "BTC_NEWCOIN"
    ));
}

#[tokio::test]
async fn test_malformed_timestamps_make_no_network_call() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/tradingApi", listener.local_addr().unwrap());
    let client = PoloniexClient::new(&url, credentials()).unwrap();

    let cases = [
        ("2017-05-18 15:00:00", "2017-05-19T15:00:00"),
        ("2017-05-18T15:00:00", "2017/05/19T15:00:00"),
        ("2017-05-18T15:00", "2017-05-19T15:00:00"),
        ("2017-05-18T15:00:00", "2017-05-19"),
    ];
    for (start, end) in cases {
        let err = client.get_my_trade_history(start, end).await.unwrap_err();
        assert!(
            matches!(err, ApiError::Timestamp(TimestampError::Format { .. })),
            "got {:?} for {} / {}",
            err,
            start,
            end
        );
    }

    let err = client
        .get_my_trade_history("2017-05-19T15:00:00", "2017-05-18T15:00:00")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Timestamp(TimestampError::EndBeforeStart { .. })
    ));

    let accepted = tokio::time::timeout(Duration::from_millis(100), listener.accept()).await;
    assert!(accepted.is_err(), "client connected despite invalid input");
}

#[tokio::test]
async fn test_client_as_trade_history_source() {
    let (url, _server) = support::serve_once(200, HISTORY_BODY).await;
    let client = PoloniexClient::new(&url, credentials()).unwrap();
    let source: &dyn TradeHistorySource = &client;

    let range = TimeRange::parse("2017-05-18T15:00:00", "2017-05-19T15:00:00").unwrap();
    let history = source.trade_history(&range).await.unwrap();
    assert_eq!(history.trade_count(), 1);
}
