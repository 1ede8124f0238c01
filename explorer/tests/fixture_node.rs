//! End-to-end transport tests: a real `NodeClient` pointed at an in-process
//! axum fixture node serving a six-block chain.
//!
//! These tests pin the per-endpoint 404 contract (typed error vs. degrade
//! to empty) and exercise the chain walk over actual HTTP.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use sole_explorer::api::{
    ApiError, Balance, Block, NodeApi, NodeClient, PeersResponse, Tip, Transaction, TxInput,
    TxOutput, ValidatorsResponse,
};
use sole_explorer::chain::walk_recent;

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

struct Fixture {
    tip: Tip,
    blocks: HashMap<String, Block>,
    transactions: HashMap<String, Transaction>,
    balances: HashMap<String, Balance>,
    history: HashMap<String, Vec<Transaction>>,
}

fn coinbase_tx(id: &str, miner: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        inputs: Some(vec![TxInput {
            sender_address: "COINBASE".to_string(),
            signature: String::new(),
        }]),
        outputs: vec![TxOutput {
            receiver_address: miner.to_string(),
            value: 5_000_000_000,
            value_sole: 50.0,
        }],
        timestamp: 1_700_000_100,
    }
}

fn block(height: u64, hash: &str, prev: &str, transactions: Vec<Transaction>) -> Block {
    Block {
        timestamp: 1_700_000_000 + height as i64 * 30,
        height,
        prev_block_hash: prev.to_string(),
        hash: hash.to_string(),
        transactions,
        validator: "1ValidatorAAAAAAAAAAAAAAAAAAAAAAAA".to_string(),
        signature: "sig".to_string(),
    }
}

fn fixture() -> Arc<Fixture> {
    let miner = "1MinerAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
    let tx = coinbase_tx("tx-cb-5", miner);

    let chain = [
        block(5, "H5", "H4", vec![tx.clone()]),
        block(4, "H4", "H3", vec![]),
        block(3, "H3", "H2", vec![]),
        block(2, "H2", "H1", vec![]),
        block(1, "H1", "H0", vec![]),
        block(0, "H0", "", vec![]),
    ];

    Arc::new(Fixture {
        tip: Tip {
            height: 5,
            hash: "H5".to_string(),
        },
        blocks: chain.iter().map(|b| (b.hash.clone(), b.clone())).collect(),
        transactions: HashMap::from([(tx.id.clone(), tx.clone())]),
        balances: HashMap::from([(
            miner.to_string(),
            Balance {
                address: miner.to_string(),
                balance: 5_000_000_000,
            },
        )]),
        history: HashMap::from([(miner.to_string(), vec![tx])]),
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn tip_handler(State(fx): State<Arc<Fixture>>) -> Json<Tip> {
    Json(fx.tip.clone())
}

async fn block_handler(
    State(fx): State<Arc<Fixture>>,
    Path(hash): Path<String>,
) -> Result<Json<Block>, StatusCode> {
    if hash == "boom" {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    fx.blocks
        .get(&hash)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn tx_handler(
    State(fx): State<Arc<Fixture>>,
    Path(txid): Path<String>,
) -> Result<Json<Transaction>, StatusCode> {
    fx.transactions
        .get(&txid)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn balance_handler(
    State(fx): State<Arc<Fixture>>,
    Path(address): Path<String>,
) -> Result<Json<Balance>, StatusCode> {
    fx.balances
        .get(&address)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn history_handler(
    State(fx): State<Arc<Fixture>>,
    Path(address): Path<String>,
) -> Result<Json<Vec<Transaction>>, StatusCode> {
    fx.history
        .get(&address)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn peers_handler() -> Json<PeersResponse> {
    Json(PeersResponse {
        peers: vec!["10.0.0.7:8640".to_string()],
    })
}

async fn validators_handler() -> Json<ValidatorsResponse> {
    Json(ValidatorsResponse {
        validators: vec!["1ValidatorAAAAAAAAAAAAAAAAAAAAAAAA".to_string()],
    })
}

/// Serves the fixture on an ephemeral port and returns a client pointed
/// at it. When `with_network_routes` is false, the peers / validators /
/// history routes are simply absent, so the node answers plain 404 —
/// exactly how an older node revision behaves.
async fn serve(with_network_routes: bool) -> NodeClient {
    let fx = fixture();

    let mut router = Router::new()
        .route("/blocks/tip", get(tip_handler))
        .route("/blocks/:hash", get(block_handler))
        .route("/transaction/:txid", get(tx_handler))
        .route("/balance/:address", get(balance_handler));

    if with_network_routes {
        router = router
            .route("/transactions/:address", get(history_handler))
            .route("/network/peers", get(peers_handler))
            .route("/consensus/validators", get(validators_handler));
    }

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router.with_state(fx)).await.unwrap();
    });

    NodeClient::new(&format!("http://{addr}/")).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tip_and_block_decode_over_http() {
    let client = serve(true).await;

    let tip = client.tip().await.unwrap();
    assert_eq!(tip.height, 5);
    assert_eq!(tip.hash, "H5");

    let head = client.block("H5").await.unwrap();
    assert_eq!(head.prev_block_hash, "H4");
    assert_eq!(head.transactions.len(), 1);
    assert!(head.transactions[0].is_coinbase());
}

#[tokio::test]
async fn entity_lookups_translate_404_into_typed_not_found() {
    let client = serve(true).await;

    let err = client.block("missing").await.unwrap_err();
    assert_eq!(err.to_string(), "Block not found");

    let err = client.transaction("missing").await.unwrap_err();
    assert_eq!(err.to_string(), "Transaction not found");

    let err = client.balance("missing").await.unwrap_err();
    assert_eq!(err.to_string(), "Address not found");
}

#[tokio::test]
async fn other_statuses_surface_as_status_errors() {
    let client = serve(true).await;

    let err = client.block("boom").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500 }));
}

#[tokio::test]
async fn list_endpoints_degrade_to_empty_on_404() {
    let client = serve(false).await;

    let txs = client.address_transactions("whoever").await.unwrap();
    assert!(txs.is_empty());

    let peers = client.peers().await.unwrap();
    assert!(peers.peers.is_empty());

    let validators = client.validators().await.unwrap();
    assert!(validators.validators.is_empty());
}

#[tokio::test]
async fn list_endpoints_return_data_when_served() {
    let client = serve(true).await;

    let miner = "1MinerAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
    let txs = client.address_transactions(miner).await.unwrap();
    assert_eq!(txs.len(), 1);

    let balance = client.balance(miner).await.unwrap();
    assert_eq!(balance.balance, 5_000_000_000);

    assert_eq!(client.peers().await.unwrap().peers.len(), 1);
    assert_eq!(client.validators().await.unwrap().validators.len(), 1);
}

#[tokio::test]
async fn chain_walk_over_real_http_stops_at_genesis() {
    let client = serve(true).await;

    let walk = walk_recent(&client, 10).await;
    assert!(walk.is_complete());

    let hashes: Vec<&str> = walk.blocks.iter().map(|b| b.hash.as_str()).collect();
    assert_eq!(hashes, ["H5", "H4", "H3", "H2", "H1", "H0"]);
}

#[tokio::test]
async fn unreachable_node_is_a_transport_error() {
    // Nothing listens on this port.
    let client = NodeClient::new("http://127.0.0.1:1").unwrap();

    let err = client.tip().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
