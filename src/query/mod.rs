//! Paginated list query engine
//!
//! The shared pagination/search/filter contract used by campaign and
//! transaction listings: debounced parameter edits, single in-flight
//! request with stale-response suppression, and server-total page
//! clamping.

pub mod debounce;
pub mod engine;

use std::fmt;

use crate::models::{Campaign, CampaignPage, Transaction, TransactionPage};

pub use debounce::Debouncer;
pub use engine::{EngineOptions, ListQueryEngine, ListSnapshot};

/// User-adjustable parameters of a list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number
    pub page: u32,
    /// Rows per page
    pub limit: u32,
    /// Effective free-text search term
    pub search: String,
    /// Status or type filter; `None` means "all"
    pub filter: Option<String>,
}

impl ListQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            search: String::new(),
            filter: None,
        }
    }
}

/// One page of rows together with the server-reported totals
#[derive(Debug, Clone)]
pub struct ListPage<T> {
    pub rows: Vec<T>,
    pub total_pages: u32,
    pub total_items: u64,
}

impl From<CampaignPage> for ListPage<Campaign> {
    fn from(page: CampaignPage) -> Self {
        Self {
            rows: page.campaigns,
            total_pages: page.total_pages,
            total_items: page.total_campaigns,
        }
    }
}

impl From<TransactionPage> for ListPage<Transaction> {
    fn from(page: TransactionPage) -> Self {
        Self {
            rows: page.history,
            total_pages: page.total_pages,
            total_items: page.total_transactions,
        }
    }
}

/// The "showing X–Y of Z" range derived from page, limit, and total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

impl PageWindow {
    pub fn compute(page: u32, limit: u32, total: u64) -> Self {
        let page = u64::from(page);
        let limit = u64::from(limit);
        let start = if total == 0 { 0 } else { (page - 1) * limit + 1 };
        let end = (page * limit).min(total);
        Self { start, end, total }
    }
}

impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{} of {}", self.start, self.end, self.total)
    }
}
