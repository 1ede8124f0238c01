//! Application state: the current page, its data slots, the navigation
//! history, the search overlay, and the dashboard poll deadline.
//!
//! The state machine is deliberately synchronous — all mutation happens on
//! the UI loop. Fetch tasks only ever talk to it through [`AppEvent`]s,
//! each tagged with the generation it was issued under; an event whose
//! generation no longer matches belongs to a page the user already left
//! and is discarded.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use sole_explorer::api::{ApiError, Balance, Block, Tip, Transaction};
use sole_explorer::config::POLL_INTERVAL;
use sole_explorer::search::{SearchHit, SearchKind};

use crate::fetch::{AppEvent, Fetcher};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// The page currently on screen. Mirrors the web explorer's routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// `/` — tip stats and the latest blocks.
    Dashboard,
    /// `/block/:hash`
    Block { hash: String },
    /// `/tx/:txid` — `block_height` is carried along when the transaction
    /// was opened from a block page, purely for the "included in" line.
    Tx {
        txid: String,
        block_height: Option<u64>,
    },
    /// `/address/:address`
    Address { address: String },
}

// ---------------------------------------------------------------------------
// Per-page data slots
// ---------------------------------------------------------------------------

/// Dashboard data. Survives navigation so returning home is instant;
/// the next poll refreshes it anyway.
#[derive(Default)]
pub struct DashboardState {
    pub tip: Option<Tip>,
    pub blocks: Vec<Block>,
    /// Set when the node was unreachable on the last refresh. The
    /// dashboard keeps polling; this only drives the status cell.
    pub offline: bool,
    pub loading: bool,
    pub selected: usize,
}

#[derive(Default)]
pub struct BlockState {
    pub block: Option<Block>,
    pub error: Option<String>,
    pub loading: bool,
    pub selected_tx: usize,
}

#[derive(Default)]
pub struct TxState {
    pub tx: Option<Transaction>,
    pub error: Option<String>,
    pub loading: bool,
    /// Selected output row; Enter opens the receiver's address page.
    pub selected_output: usize,
}

#[derive(Default)]
pub struct AddressState {
    pub balance: Option<Balance>,
    pub transactions: Vec<Transaction>,
    /// History fetch failure is scoped: the balance card still renders.
    pub history_error: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
    pub selected: usize,
}

/// The search overlay. Opened with `/`, kind picked with Tab or arrows,
/// submitted with Enter.
#[derive(Default)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
    pub kind_index: usize,
    pub error: Option<String>,
    pub in_flight: bool,
}

impl SearchState {
    pub const KINDS: [SearchKind; 3] = [
        SearchKind::Transaction,
        SearchKind::Address,
        SearchKind::Block,
    ];

    pub fn kind(&self) -> SearchKind {
        Self::KINDS[self.kind_index % Self::KINDS.len()]
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    pub page: Page,
    back_stack: Vec<Page>,

    pub dashboard: DashboardState,
    pub block: BlockState,
    pub tx: TxState,
    pub address: AddressState,
    pub search: SearchState,

    pub node_url: String,
    pub should_quit: bool,

    fetcher: Fetcher,
    block_count: usize,
    generation: u64,
    next_poll: Instant,
}

impl App {
    pub fn new(fetcher: Fetcher, node_url: String, block_count: usize) -> Self {
        let mut app = Self {
            page: Page::Dashboard,
            back_stack: Vec::new(),
            dashboard: DashboardState::default(),
            block: BlockState::default(),
            tx: TxState::default(),
            address: AddressState::default(),
            search: SearchState::default(),
            node_url,
            should_quit: false,
            fetcher,
            block_count,
            generation: 0,
            next_poll: Instant::now() + POLL_INTERVAL,
        };
        app.dashboard.loading = true;
        app.fetcher.dashboard(app.generation, app.block_count);
        app
    }

    // -- navigation ---------------------------------------------------------

    /// Switches pages, remembers where we came from, and kicks off the
    /// fetch the new page needs. Bumping the generation here is what
    /// invalidates every in-flight request for the old page.
    pub fn navigate(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        self.back_stack.push(self.page.clone());
        self.page = page;
        self.generation += 1;
        self.load_current_page();
    }

    /// Pops the navigation stack; lands on the dashboard when empty.
    pub fn go_back(&mut self) {
        let target = self.back_stack.pop().unwrap_or(Page::Dashboard);
        self.page = target;
        self.generation += 1;
        self.load_current_page();
    }

    /// Drops history and returns home.
    pub fn go_home(&mut self) {
        self.back_stack.clear();
        self.page = Page::Dashboard;
        self.generation += 1;
        self.load_current_page();
    }

    fn load_current_page(&mut self) {
        match self.page.clone() {
            Page::Dashboard => {
                self.dashboard.loading = true;
                self.next_poll = Instant::now() + POLL_INTERVAL;
                self.fetcher.dashboard(self.generation, self.block_count);
            }
            Page::Block { hash } => {
                self.block = BlockState {
                    loading: true,
                    ..Default::default()
                };
                self.fetcher.block(self.generation, hash);
            }
            Page::Tx { txid, .. } => {
                self.tx = TxState {
                    loading: true,
                    ..Default::default()
                };
                self.fetcher.transaction(self.generation, txid);
            }
            Page::Address { address } => {
                self.address = AddressState {
                    loading: true,
                    ..Default::default()
                };
                self.fetcher.address(self.generation, address);
            }
        }
    }

    // -- polling ------------------------------------------------------------

    /// Called once per UI tick. Refreshes the dashboard every ten seconds
    /// while it is the current page; navigating away stops the timer by
    /// construction, since the deadline is only checked here.
    pub fn tick(&mut self) {
        if self.page == Page::Dashboard && Instant::now() >= self.next_poll {
            self.next_poll = Instant::now() + POLL_INTERVAL;
            // Same generation on purpose: a poll is a refresh of the
            // current page, not a navigation. If one overlaps a slow
            // predecessor, the later writer wins.
            self.fetcher.dashboard(self.generation, self.block_count);
        }
    }

    // -- fetch results ------------------------------------------------------

    /// Applies a fetch result. Stale generations are dropped silently.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Dashboard {
                generation,
                tip,
                walk,
            } => {
                if generation != self.generation || self.page != Page::Dashboard {
                    return;
                }
                self.dashboard.loading = false;
                match tip {
                    Ok(tip) => {
                        self.dashboard.tip = Some(tip);
                        self.dashboard.offline = false;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "dashboard tip fetch failed");
                        self.dashboard.offline = true;
                    }
                }
                // Best effort: keep the previous list rather than blank
                // the table when the walk came back empty-handed.
                if !walk.blocks.is_empty() {
                    self.dashboard.blocks = walk.blocks;
                    let last = self.dashboard.blocks.len() - 1;
                    self.dashboard.selected = self.dashboard.selected.min(last);
                }
            }
            AppEvent::BlockLoaded { generation, result } => {
                if generation != self.generation {
                    return;
                }
                self.block.loading = false;
                match result {
                    Ok(block) => self.block.block = Some(block),
                    Err(err) => self.block.error = Some(page_error(&err)),
                }
            }
            AppEvent::TxLoaded { generation, result } => {
                if generation != self.generation {
                    return;
                }
                self.tx.loading = false;
                match result {
                    Ok(tx) => self.tx.tx = Some(tx),
                    Err(err) => self.tx.error = Some(page_error(&err)),
                }
            }
            AppEvent::AddressLoaded {
                generation,
                balance,
                history,
            } => {
                if generation != self.generation {
                    return;
                }
                self.address.loading = false;
                match balance {
                    Ok(balance) => self.address.balance = Some(balance),
                    Err(err) if err.is_not_found() => {
                        self.address.error = Some("Address not found on the network.".to_string());
                    }
                    Err(_) => {
                        self.address.error =
                            Some("Unable to retrieve the address balance.".to_string());
                    }
                }
                match history {
                    Ok(mut txs) => {
                        // Newest first.
                        txs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                        self.address.transactions = txs;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "address history fetch failed");
                        self.address.history_error =
                            Some("Unable to load transaction history.".to_string());
                    }
                }
            }
            AppEvent::SearchResolved {
                generation,
                kind,
                query,
                result,
            } => {
                if generation != self.generation || !self.search.active {
                    return;
                }
                self.search.in_flight = false;
                match result {
                    Ok(hit) => {
                        self.search = SearchState::default();
                        match hit {
                            SearchHit::Block(block) => self.navigate(Page::Block {
                                hash: block.hash,
                            }),
                            SearchHit::Transaction(tx) => self.navigate(Page::Tx {
                                txid: tx.id,
                                block_height: None,
                            }),
                            SearchHit::Address(balance) => self.navigate(Page::Address {
                                address: balance.address,
                            }),
                        }
                    }
                    Err(err) if err.is_not_found() => {
                        self.search.error =
                            Some(format!("{} \"{}\" not found in chain.", kind_label(kind), query));
                    }
                    Err(err) => {
                        self.search.error = Some(err.to_string());
                    }
                }
            }
        }
    }

    // -- input --------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.search.active {
            self.handle_search_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.search = SearchState {
                    active: true,
                    ..Default::default()
                };
            }
            KeyCode::Esc | KeyCode::Backspace => {
                if self.page != Page::Dashboard {
                    self.go_back();
                }
            }
            KeyCode::Char('h') => self.go_home(),
            KeyCode::Char('r') => {
                self.generation += 1;
                self.load_current_page();
            }
            _ => self.handle_page_key(key),
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) {
        match self.page.clone() {
            Page::Dashboard => match key.code {
                KeyCode::Up => {
                    self.dashboard.selected = self.dashboard.selected.saturating_sub(1);
                }
                KeyCode::Down => {
                    if self.dashboard.selected + 1 < self.dashboard.blocks.len() {
                        self.dashboard.selected += 1;
                    }
                }
                KeyCode::Enter => {
                    if let Some(block) = self.dashboard.blocks.get(self.dashboard.selected) {
                        self.navigate(Page::Block {
                            hash: block.hash.clone(),
                        });
                    }
                }
                _ => {}
            },
            Page::Block { .. } => match key.code {
                KeyCode::Up => self.block.selected_tx = self.block.selected_tx.saturating_sub(1),
                KeyCode::Down => {
                    let count = self
                        .block
                        .block
                        .as_ref()
                        .map_or(0, |b| b.transactions.len());
                    if self.block.selected_tx + 1 < count {
                        self.block.selected_tx += 1;
                    }
                }
                KeyCode::Enter => {
                    if let Some(block) = &self.block.block {
                        if let Some(tx) = block.transactions.get(self.block.selected_tx) {
                            let page = Page::Tx {
                                txid: tx.id.clone(),
                                block_height: Some(block.height),
                            };
                            self.navigate(page);
                        }
                    }
                }
                // Follow the predecessor link, like clicking "Previous
                // Hash" in the web UI.
                KeyCode::Char('p') => {
                    if let Some(block) = &self.block.block {
                        if !block.prev_block_hash.is_empty() {
                            self.navigate(Page::Block {
                                hash: block.prev_block_hash.clone(),
                            });
                        }
                    }
                }
                KeyCode::Char('v') => {
                    if let Some(block) = &self.block.block {
                        self.navigate(Page::Address {
                            address: block.validator.clone(),
                        });
                    }
                }
                _ => {}
            },
            Page::Tx { .. } => match key.code {
                KeyCode::Up => {
                    self.tx.selected_output = self.tx.selected_output.saturating_sub(1);
                }
                KeyCode::Down => {
                    let count = self.tx.tx.as_ref().map_or(0, |t| t.outputs.len());
                    if self.tx.selected_output + 1 < count {
                        self.tx.selected_output += 1;
                    }
                }
                KeyCode::Enter => {
                    if let Some(tx) = &self.tx.tx {
                        if let Some(out) = tx.outputs.get(self.tx.selected_output) {
                            self.navigate(Page::Address {
                                address: out.receiver_address.clone(),
                            });
                        }
                    }
                }
                // Jump to the sender's address page (non-coinbase only).
                KeyCode::Char('f') => {
                    let sender = self.tx.tx.as_ref().and_then(|tx| {
                        if tx.is_coinbase() {
                            None
                        } else {
                            tx.first_sender().map(str::to_string)
                        }
                    });
                    if let Some(address) = sender {
                        self.navigate(Page::Address { address });
                    }
                }
                _ => {}
            },
            Page::Address { .. } => match key.code {
                KeyCode::Up => self.address.selected = self.address.selected.saturating_sub(1),
                KeyCode::Down => {
                    if self.address.selected + 1 < self.address.transactions.len() {
                        self.address.selected += 1;
                    }
                }
                KeyCode::Enter => {
                    if let Some(tx) = self.address.transactions.get(self.address.selected) {
                        self.navigate(Page::Tx {
                            txid: tx.id.clone(),
                            block_height: None,
                        });
                    }
                }
                _ => {}
            },
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.search = SearchState::default(),
            KeyCode::Tab | KeyCode::Down => {
                self.search.kind_index = (self.search.kind_index + 1) % SearchState::KINDS.len();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.search.kind_index = (self.search.kind_index + SearchState::KINDS.len() - 1)
                    % SearchState::KINDS.len();
            }
            KeyCode::Backspace => {
                self.search.query.pop();
                self.search.error = None;
            }
            KeyCode::Enter => {
                if !self.search.query.trim().is_empty() && !self.search.in_flight {
                    self.search.in_flight = true;
                    self.search.error = None;
                    self.fetcher.search(
                        self.generation,
                        self.search.kind(),
                        self.search.query.trim().to_string(),
                    );
                }
            }
            KeyCode::Char(c) => {
                self.search.query.push(c);
                self.search.error = None;
            }
            _ => {}
        }
    }
}

/// Page-level error text for a failed entity load.
fn page_error(err: &ApiError) -> String {
    if err.is_not_found() {
        err.to_string()
    } else {
        format!("Failed to reach the node: {err}")
    }
}

fn kind_label(kind: SearchKind) -> &'static str {
    match kind {
        SearchKind::Block => "Block",
        SearchKind::Transaction => "Transaction",
        SearchKind::Address => "Address",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
