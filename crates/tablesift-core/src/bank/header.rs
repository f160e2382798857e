use regex::Regex;
use std::sync::LazyLock;

/// Statement metadata found on the first page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountInfo {
    pub bank_name: Option<String>,
    pub branch_name: Option<String>,
    pub account_no: Option<String>,
    pub account_name: Option<String>,
    pub address: Option<String>,
    pub statement_period: Option<String>,
}

struct LabelPatterns {
    bank_name: Regex,
    branch_name: Regex,
    account_no: Regex,
    account_name: Regex,
    address: Regex,
    statement_period: Regex,
}

static LABELS: LazyLock<LabelPatterns> = LazyLock::new(|| {
    let re = |p: &str| Regex::new(p).expect("account label pattern is valid");
    LabelPatterns {
        bank_name: re(r"(?i)BANK\s*NAME\s*:?\s*([^\n]+)"),
        branch_name: re(r"(?i)BRANCH\s*NAME\s*:?\s*([^\n]+)"),
        account_no: re(r"(?i)(?:Account|A/C)\s*(?:No|Number|#)\s*:?\s*([^\n]+)"),
        account_name: re(r"(?i)(?:A/C|Account)\s*(?:Name|Holder)\s*:?\s*([^\n]+)"),
        address: re(r"(?i)(?:Address|ADDR)\s*:?\s*([^\n]+)"),
        statement_period: re(r"(?i)(?:Statement|Period)(?:\s*for)?\s*:?\s*([^\n]+)"),
    }
});

/// Extract the labelled header fields from page text.
///
/// Each label is searched independently; missing labels leave the field
/// unset.
pub fn parse_account_info(text: &str) -> AccountInfo {
    let labels = &*LABELS;
    AccountInfo {
        bank_name: capture(&labels.bank_name, text),
        branch_name: capture(&labels.branch_name, text),
        account_no: capture(&labels.account_no, text),
        account_name: capture(&labels.account_name, text),
        address: capture(&labels.address, text),
        statement_period: capture(&labels.statement_period, text),
    }
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    let value = re.captures(text)?.get(1)?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl AccountInfo {
    /// Present fields, in label order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("bank_name", &self.bank_name),
            ("branch_name", &self.branch_name),
            ("account_no", &self.account_no),
            ("account_name", &self.account_name),
            ("address", &self.address),
            ("statement_period", &self.statement_period),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}
