use std::fmt::Display;

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;

use crate::currency::format_currency;

use super::{AccountNumber, BalanceChange};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A state-changing event worth recording in the history.
#[derive(Debug, Clone)]
pub enum Event {
    AccountCreated {
        holder_name: String,
        account_number: AccountNumber,
        initial_balance: Decimal,
    },
    Deposit(BalanceChange),
    Withdrawal(BalanceChange),
    WithdrawalFailed {
        requested: Decimal,
        available: Decimal,
    },
    SessionEnded {
        final_balance: Decimal,
    },
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::AccountCreated {
                holder_name,
                account_number,
                initial_balance,
            } => write!(
                f,
                "ACCOUNT CREATED - Client: {holder_name}, Account: {account_number}, Initial balance: {}",
                format_currency(*initial_balance)
            ),
            Event::Deposit(change) => write!(f, "DEPOSIT - {}", Movement(change)),
            Event::Withdrawal(change) => write!(f, "WITHDRAWAL - {}", Movement(change)),
            Event::WithdrawalFailed {
                requested,
                available,
            } => write!(
                f,
                "WITHDRAWAL FAILED - Attempted to withdraw {}, Available balance: {}",
                format_currency(*requested),
                format_currency(*available)
            ),
            Event::SessionEnded { final_balance } => write!(
                f,
                "SESSION ENDED - Final balance: {}",
                format_currency(*final_balance)
            ),
        }
    }
}

struct Movement<'a>(&'a BalanceChange);

impl Display for Movement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Amount: {}, Previous balance: {}, New balance: {}",
            format_currency(self.0.amount),
            format_currency(self.0.previous),
            format_currency(self.0.new)
        )
    }
}

/// One line of the history: `[YYYY-MM-DD HH:MM:SS] DESCRIPTION`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    pub description: String,
}

impl LogEntry {
    pub fn new(timestamp: NaiveDateTime, event: &Event) -> Self {
        Self {
            timestamp,
            description: event.to_string(),
        }
    }

    /// Stamps the event with the local wall-clock time.
    pub fn now(event: &Event) -> Self {
        Self::new(Local::now().naive_local(), event)
    }
}

impl Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.description
        )
    }
}
