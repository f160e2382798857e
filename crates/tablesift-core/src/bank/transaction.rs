//! Transaction line parsing.
//!
//! Statement rows come in several shapes. Patterns are tried from the most
//! to the least specific and the first match decides the shape, so their
//! order matters: a six-field row also matches every later pattern.

use regex::Regex;
use std::sync::LazyLock;

const DATE: &str = r"\d{2}[-/.][A-Za-z]{3}[-/.]\d{4}|\d{2}[-/.]\d{2}[-/.]\d{4}|\d{2}[-/.]\d{2}[-/.]\d{2}";
const AMOUNT: &str = r"\d{1,3}(?:,\d{3})*(?:\.\d{2})?";

/// Date, optional type letter, description, debit, credit, balance.
static SIX_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"({DATE})\s+([A-Z])?\s*(.{{10,50}}?)\s+({AMOUNT})?(?:\s+|\s*-\s*)({AMOUNT})?(?:\s+|\s*-\s*)({AMOUNT}\s*(?:Dr|Cr)?)"
    ))
    .expect("six-field pattern is valid")
});

/// Date, description, amount, balance with optional Dr/Cr tag.
static AMOUNT_BALANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"({DATE})\s+(.{{10,60}}?)\s+({AMOUNT})\s+({AMOUNT}\s*(?:Dr|Cr)?)"
    ))
    .expect("amount-balance pattern is valid")
});

/// Date, free description, two amounts.
static TWO_AMOUNTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"({DATE})\s+(.+?)\s+({AMOUNT})\s+({AMOUNT})"))
        .expect("two-amount pattern is valid")
});

/// Date, free description, amount at end of line.
static TRAILING_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"({DATE})(.+?)({AMOUNT})\s*$")).expect("trailing amount pattern is valid")
});

/// Words that mark a lone amount as money leaving the account.
static DEBIT_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:withdrawal|withdrawn|debit|atm)\b").expect("debit hint pattern is valid")
});

static DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DATE).expect("date pattern is valid"));

static AMOUNT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(AMOUNT).expect("amount pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SixField {
    pub date: String,
    pub kind: String,
    pub description: String,
    pub debit: String,
    pub credit: String,
    pub balance: String,
}

/// An amount whose balance carries a `Dr`/`Cr` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedBalance {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub balance: String,
}

/// An amount of unknown direction next to an untagged balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainBalance {
    pub date: String,
    pub description: String,
    pub debit_or_credit: String,
    pub balance: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreeField {
    pub date: String,
    pub description: String,
    pub amount: String,
}

/// Fallback record: the first date and every number after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestEffort {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub other_amounts: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    SixField(SixField),
    FourFieldWithBalanceTag(TaggedBalance),
    FourFieldPlain(PlainBalance),
    ThreeField(ThreeField),
    BestEffort(BestEffort),
}

impl Transaction {
    pub fn date(&self) -> &str {
        match self {
            Transaction::SixField(t) => &t.date,
            Transaction::FourFieldWithBalanceTag(t) => &t.date,
            Transaction::FourFieldPlain(t) => &t.date,
            Transaction::ThreeField(t) => &t.date,
            Transaction::BestEffort(t) => &t.date,
        }
    }

    /// Column name and value pairs, in column order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            Transaction::SixField(t) => vec![
                ("date", &t.date),
                ("type", &t.kind),
                ("description", &t.description),
                ("debit", &t.debit),
                ("credit", &t.credit),
                ("balance", &t.balance),
            ],
            Transaction::FourFieldWithBalanceTag(t) => vec![
                ("date", &t.date),
                ("description", &t.description),
                ("amount", &t.amount),
                ("balance", &t.balance),
            ],
            Transaction::FourFieldPlain(t) => vec![
                ("date", &t.date),
                ("description", &t.description),
                ("debit_or_credit", &t.debit_or_credit),
                ("balance", &t.balance),
            ],
            Transaction::ThreeField(t) => vec![
                ("date", &t.date),
                ("description", &t.description),
                ("amount", &t.amount),
            ],
            Transaction::BestEffort(t) => vec![
                ("date", &t.date),
                ("description", &t.description),
                ("amount", &t.amount),
                ("other_amounts", &t.other_amounts),
            ],
        }
        .into_iter()
        .map(|(k, v)| (k, v.as_str()))
        .collect()
    }
}

/// Parse one statement line. `None` when it has no date or no amount.
pub fn parse_transaction(line: &str) -> Option<Transaction> {
    parse_six_field(line)
        .or_else(|| parse_four_field(&AMOUNT_BALANCE, line))
        .or_else(|| parse_four_field(&TWO_AMOUNTS, line))
        .or_else(|| parse_three_field(line))
        .or_else(|| parse_best_effort(line))
}

fn parse_six_field(line: &str) -> Option<Transaction> {
    let caps = SIX_FIELD.captures(line)?;
    let text = |i: usize| caps.get(i).map_or("", |m| m.as_str()).to_string();

    let mut debit = text(4);
    let mut credit = text(5);
    // A single amount before the balance is a credit, unless a `-`
    // placeholder fills the credit column or the text names a withdrawal.
    if let (Some(date), Some(amount), None, Some(balance)) =
        (caps.get(1), caps.get(4), caps.get(5), caps.get(6))
    {
        let placeholder = line[amount.end()..balance.start()].contains('-');
        let outgoing = DEBIT_HINT.is_match(&line[date.end()..amount.start()]);
        if !placeholder && !outgoing {
            credit = std::mem::take(&mut debit);
        }
    }

    Some(Transaction::SixField(SixField {
        date: text(1),
        kind: text(2),
        description: text(3).trim().to_string(),
        debit,
        credit,
        balance: text(6),
    }))
}

fn parse_four_field(re: &Regex, line: &str) -> Option<Transaction> {
    let caps = re.captures(line)?;
    let date = caps[1].to_string();
    let description = caps[2].trim().to_string();
    let amount = caps[3].to_string();
    let balance = caps[4].to_string();

    if balance.contains("Dr") || balance.contains("Cr") {
        Some(Transaction::FourFieldWithBalanceTag(TaggedBalance {
            date,
            description,
            amount,
            balance,
        }))
    } else {
        Some(Transaction::FourFieldPlain(PlainBalance {
            date,
            description,
            debit_or_credit: amount,
            balance,
        }))
    }
}

fn parse_three_field(line: &str) -> Option<Transaction> {
    let caps = TRAILING_AMOUNT.captures(line)?;
    Some(Transaction::ThreeField(ThreeField {
        date: caps[1].to_string(),
        description: caps[2].trim().to_string(),
        amount: caps[3].to_string(),
    }))
}

fn parse_best_effort(line: &str) -> Option<Transaction> {
    let date = DATE_TOKEN.find(line)?;
    let rest = &line[date.end()..];
    let amounts: Vec<_> = AMOUNT_TOKEN.find_iter(rest).collect();
    let first = amounts.first()?;

    let other_amounts: Vec<&str> = amounts[1..].iter().map(|m| m.as_str()).collect();
    Some(Transaction::BestEffort(BestEffort {
        date: date.as_str().to_string(),
        description: rest[..first.start()].trim().to_string(),
        amount: first.as_str().to_string(),
        other_amounts: other_amounts.join(","),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_field_single_amount_is_credit() {
        let tx = parse_transaction("01-Jan-2023 A Salary Credit        5,000.00        50,000.00")
            .unwrap();
        assert_eq!(
            tx,
            Transaction::SixField(SixField {
                date: "01-Jan-2023".into(),
                kind: "A".into(),
                description: "Salary Credit".into(),
                debit: "".into(),
                credit: "5,000.00".into(),
                balance: "50,000.00".into(),
            })
        );
        let keys: Vec<&str> = tx.fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["date", "type", "description", "debit", "credit", "balance"]);
    }

    #[test]
    fn test_six_field_dash_placeholder_keeps_debit() {
        let tx = parse_transaction("03-Jan-2023 T ATM Withdrawal    1,500.00   -   47,000.00 Dr")
            .unwrap();
        let Transaction::SixField(t) = tx else {
            panic!("expected six-field, got {tx:?}");
        };
        assert_eq!(t.debit, "1,500.00");
        assert_eq!(t.credit, "");
        assert_eq!(t.balance, "47,000.00 Dr");
    }

    #[test]
    fn test_lone_withdrawal_stays_debit() {
        let tx = parse_transaction("01-Jan-2023 ATM Cash Withdrawal   1,500.00   48,500.00")
            .unwrap();
        let Transaction::SixField(t) = tx else {
            panic!("expected six-field, got {tx:?}");
        };
        assert_eq!(t.debit, "1,500.00");
        assert_eq!(t.credit, "");
        assert_eq!(t.balance, "48,500.00");
    }

    #[test]
    fn test_pattern_priority_picks_shape() {
        let cases = [
            (
                "01-Jan-2023 Rent 500.00 1,000.00",
                Transaction::FourFieldPlain(PlainBalance {
                    date: "01-Jan-2023".into(),
                    description: "Rent".into(),
                    debit_or_credit: "500.00".into(),
                    balance: "1,000.00".into(),
                }),
            ),
            (
                // Description too long for six fields, short enough for four.
                "01-Jan-2023 monthly standing instruction transfer to savings account 2,000.00 45,000.00 Cr",
                Transaction::FourFieldWithBalanceTag(TaggedBalance {
                    date: "01-Jan-2023".into(),
                    description: "monthly standing instruction transfer to savings account".into(),
                    amount: "2,000.00".into(),
                    balance: "45,000.00 Cr".into(),
                }),
            ),
            (
                "01-Jan-2023 NEFT 5",
                Transaction::ThreeField(ThreeField {
                    date: "01-Jan-2023".into(),
                    description: "NEFT".into(),
                    amount: "5".into(),
                }),
            ),
        ];
        for (line, expected) in cases {
            assert_eq!(parse_transaction(line), Some(expected), "{line}");
        }
    }

    #[test]
    fn test_best_effort_after_date() {
        let tx = parse_transaction("05/01/2023 POS 12 Main St 300 Mumbai").unwrap();
        assert_eq!(
            tx,
            Transaction::BestEffort(BestEffort {
                date: "05/01/2023".into(),
                description: "POS".into(),
                amount: "12".into(),
                other_amounts: "300".into(),
            })
        );
    }

    #[test]
    fn test_no_date_or_no_amount() {
        assert!(parse_transaction("Opening balance 1,000.00").is_none());
        assert!(parse_transaction("05/01/2023 carried forward").is_none());
    }

    #[test]
    fn test_fields_follow_shape() {
        let tx = Transaction::FourFieldPlain(PlainBalance {
            date: "d".into(),
            description: "x".into(),
            debit_or_credit: "1".into(),
            balance: "2".into(),
        });
        assert_eq!(
            tx.fields(),
            vec![
                ("date", "d"),
                ("description", "x"),
                ("debit_or_credit", "1"),
                ("balance", "2")
            ]
        );
        assert_eq!(tx.date(), "d");
    }
}
