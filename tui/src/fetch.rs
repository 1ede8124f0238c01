//! Background fetches.
//!
//! Every page load spawns a task that performs the HTTP work and posts an
//! [`AppEvent`] back over an unbounded channel; the UI loop drains the
//! channel between frames. Nothing is cancelled: a request for a page the
//! user has already left completes, arrives with a stale generation
//! number, and is dropped on the floor. Wasted work, never wrong state.

use tokio::sync::mpsc::UnboundedSender;

use sole_explorer::api::{ApiError, Balance, Block, NodeApi, NodeClient, Tip, Transaction};
use sole_explorer::chain::{walk_recent, ChainWalk};
use sole_explorer::search::{resolve, SearchHit, SearchKind};

/// Results delivered from fetch tasks to the UI loop.
///
/// Every variant carries the generation the request was issued under; the
/// app ignores events whose generation no longer matches (last-writer-wins,
/// see [`crate::app::App::apply`]).
pub enum AppEvent {
    /// Dashboard refresh: tip plus the recent-block walk.
    Dashboard {
        generation: u64,
        tip: Result<Tip, ApiError>,
        walk: ChainWalk,
    },
    /// Block detail page load.
    BlockLoaded {
        generation: u64,
        result: Result<Block, ApiError>,
    },
    /// Transaction detail page load.
    TxLoaded {
        generation: u64,
        result: Result<Transaction, ApiError>,
    },
    /// Address page load: balance is fatal to the page, history is not.
    AddressLoaded {
        generation: u64,
        balance: Result<Balance, ApiError>,
        history: Result<Vec<Transaction>, ApiError>,
    },
    /// Search validation finished.
    SearchResolved {
        generation: u64,
        kind: SearchKind,
        query: String,
        result: Result<SearchHit, ApiError>,
    },
}

/// Spawns fetch tasks and posts their results back to the UI loop.
#[derive(Clone)]
pub struct Fetcher {
    client: NodeClient,
    events: UnboundedSender<AppEvent>,
}

impl Fetcher {
    pub fn new(client: NodeClient, events: UnboundedSender<AppEvent>) -> Self {
        Self { client, events }
    }

    /// Tip and recent blocks, fetched concurrently.
    ///
    /// The walk performs its own tip fetch internally; the separate tip
    /// request exists so the height card can render even when the walk
    /// dies on its first block.
    pub fn dashboard(&self, generation: u64, block_count: usize) {
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let (tip, walk) = tokio::join!(client.tip(), walk_recent(&client, block_count));
            let _ = events.send(AppEvent::Dashboard {
                generation,
                tip,
                walk,
            });
        });
    }

    pub fn block(&self, generation: u64, hash: String) {
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = client.block(&hash).await;
            let _ = events.send(AppEvent::BlockLoaded { generation, result });
        });
    }

    pub fn transaction(&self, generation: u64, txid: String) {
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = client.transaction(&txid).await;
            let _ = events.send(AppEvent::TxLoaded { generation, result });
        });
    }

    /// Balance and history in parallel, tolerating history failure.
    pub fn address(&self, generation: u64, address: String) {
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let (balance, history) = tokio::join!(
                client.balance(&address),
                client.address_transactions(&address),
            );
            let _ = events.send(AppEvent::AddressLoaded {
                generation,
                balance,
                history,
            });
        });
    }

    pub fn search(&self, generation: u64, kind: SearchKind, query: String) {
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = resolve(&client, kind, &query).await;
            let _ = events.send(AppEvent::SearchResolved {
                generation,
                kind,
                query,
                result,
            });
        });
    }
}
