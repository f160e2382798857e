//! Bank statement extraction.
//!
//! Documents that read like a bank statement are mined for an account
//! header record and a transaction ledger instead of generic tables.

pub mod header;
pub mod transaction;

use regex::Regex;
use std::sync::LazyLock;

use crate::config::ExtractConfig;
use crate::error::TableError;
use crate::extraction::PageSource;
use crate::model::TableCandidate;
use crate::orchestrator::Deadline;
use crate::strategy::Strategy;
use header::{parse_account_info, AccountInfo};
use transaction::{parse_transaction, Transaction};

/// Vocabulary of the statement sniff test.
const KEYWORDS: [&str; 16] = [
    "account",
    "statement",
    "balance",
    "transaction",
    "credit",
    "debit",
    "bank",
    "deposit",
    "withdrawal",
    "opening balance",
    "closing balance",
    "date",
    "description",
    "amount",
    "reference",
    "branch",
];

/// Terms of a ledger column header line.
const HEADER_TERMS: [&str; 11] = [
    "date",
    "description",
    "amount",
    "balance",
    "debit",
    "credit",
    "particulars",
    "withdrawal",
    "deposit",
    "transaction",
    "reference",
];

/// Dates that mark a page as carrying transactions.
static PAGE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{2}-[A-Za-z]{3}-\d{4}|\d{2}/\d{2}/\d{4}|\d{2}-\d{2}-\d{4}|\d{2}\.\d{2}\.\d{4}")
        .expect("page date pattern is valid")
});

static FOOTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Page\s+\d+|BANK NAME|BRANCH NAME|IFSC Code|MICR Code")
        .expect("footer pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LedgerState {
    SeekingHeader,
    InTable,
}

pub struct BankStatementStrategy {
    sniff_pages: usize,
    sniff_min_keywords: usize,
}

impl BankStatementStrategy {
    pub fn new(config: &ExtractConfig) -> Self {
        BankStatementStrategy {
            sniff_pages: config.sniff_pages,
            sniff_min_keywords: config.sniff_min_keywords,
        }
    }

    /// Whether any of the first pages mentions enough statement keywords.
    pub fn is_bank_statement(&self, pages: &[&dyn PageSource]) -> bool {
        pages.iter().take(self.sniff_pages).any(|page| match page.text() {
            Ok(text) => keyword_count(&text) >= self.sniff_min_keywords,
            Err(e) => {
                log::debug!("[bank_statement] sniff skipped page {}: {e}", page.page_number());
                false
            }
        })
    }
}

impl Strategy for BankStatementStrategy {
    fn name(&self) -> &str {
        "bank_statement"
    }

    fn extract(
        &self,
        pages: &[&dyn PageSource],
        deadline: &Deadline,
    ) -> Result<Vec<TableCandidate>, TableError> {
        if !self.is_bank_statement(pages) {
            log::info!("[bank_statement] document does not look like a bank statement");
            return Ok(Vec::new());
        }

        let info = match pages.first().map(|p| p.text()) {
            Some(Ok(text)) => parse_account_info(&text),
            Some(Err(e)) => {
                log::warn!("[bank_statement] page 1: account header unreadable: {e}");
                AccountInfo::default()
            }
            None => AccountInfo::default(),
        };

        let mut transactions = Vec::new();
        for &page in pages {
            deadline.check()?;
            match page.text() {
                Ok(text) => {
                    let found = scan_ledger(&text);
                    log::debug!(
                        "[bank_statement] page {}: {} transactions",
                        page.page_number(),
                        found.len()
                    );
                    transactions.extend(found);
                }
                Err(e) => log::warn!("[bank_statement] page {}: {e}", page.page_number()),
            }
        }

        if transactions.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![account_table(&info), transaction_table(&transactions)])
    }
}

fn keyword_count(text: &str) -> usize {
    let lower = text.to_lowercase();
    KEYWORDS.iter().filter(|k| lower.contains(*k)).count()
}

fn header_term_count(line: &str) -> usize {
    let lower = line.to_lowercase();
    HEADER_TERMS.iter().filter(|t| lower.contains(*t)).count()
}

/// Walk a page's lines and parse transaction rows.
///
/// Lines are parsed once the ledger header has been seen, or on any line
/// carrying a date (headerless ledgers). Footer lines are skipped.
pub fn scan_ledger(text: &str) -> Vec<Transaction> {
    if !PAGE_DATE.is_match(text) {
        return Vec::new();
    }

    let mut state = LedgerState::SeekingHeader;
    let mut transactions = Vec::new();
    for line in text.split('\n') {
        if state == LedgerState::SeekingHeader && header_term_count(line) >= 2 {
            state = LedgerState::InTable;
            continue;
        }
        if PAGE_DATE.is_match(line) {
            state = LedgerState::InTable;
        }
        if state != LedgerState::InTable || FOOTER.is_match(line) {
            continue;
        }
        if let Some(tx) = parse_transaction(line) {
            transactions.push(tx);
        }
    }
    transactions
}

fn account_table(info: &AccountInfo) -> TableCandidate {
    let fields = info.fields();
    let headers = fields.iter().map(|(k, _)| k.to_string()).collect();
    let rows = if fields.is_empty() {
        Vec::new()
    } else {
        vec![fields.iter().map(|(_, v)| v.to_string()).collect()]
    };
    TableCandidate::new("Account_Information", headers, rows)
}

/// One row per transaction over the union of all shapes' columns, in
/// first-seen order.
fn transaction_table(transactions: &[Transaction]) -> TableCandidate {
    let mut headers: Vec<&'static str> = Vec::new();
    for tx in transactions {
        for (key, _) in tx.fields() {
            if !headers.contains(&key) {
                headers.push(key);
            }
        }
    }

    let rows = transactions
        .iter()
        .map(|tx| {
            let fields = tx.fields();
            headers
                .iter()
                .map(|h| {
                    fields
                        .iter()
                        .find(|(k, _)| k == h)
                        .map(|(_, v)| v.to_string())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    TableCandidate::new(
        "Transactions",
        headers.into_iter().map(String::from).collect(),
        rows,
    )
}
