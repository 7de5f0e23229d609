use rust_decimal::Decimal;
use thiserror::Error;

use super::AccountNumber;

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum AccountError {
    #[error("Not sufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
}

/// The single customer account held for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct Account {
    pub surname: String,
    pub account_number: AccountNumber,
    pub holder_name: String,
    pub balance: Decimal,
}

/// Balance before and after a successful deposit or withdrawal.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(test, derive(PartialEq))]
pub struct BalanceChange {
    pub amount: Decimal,
    pub previous: Decimal,
    pub new: Decimal,
}

#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub struct AccountSummary {
    pub holder_name: String,
    pub account_number: AccountNumber,
    pub balance: Decimal,
}

impl Account {
    /// Names are stored trimmed and uppercased.
    pub fn open(
        surname: &str,
        account_number: AccountNumber,
        holder_name: &str,
        balance: Decimal,
    ) -> Self {
        Self {
            surname: surname.trim().to_uppercase(),
            account_number,
            holder_name: holder_name.trim().to_uppercase(),
            balance,
        }
    }

    /// Holder name followed by surname, as printed on receipts.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.holder_name, self.surname)
    }

    pub fn deposit(&mut self, amount: Decimal) -> BalanceChange {
        let previous = self.balance;
        self.balance += amount;

        BalanceChange {
            amount,
            previous,
            new: self.balance,
        }
    }

    /// Leaves the balance untouched when `amount` exceeds it.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<BalanceChange, AccountError> {
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }

        let previous = self.balance;
        self.balance -= amount;

        Ok(BalanceChange {
            amount,
            previous,
            new: self.balance,
        })
    }

    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            holder_name: self.holder_name.clone(),
            account_number: self.account_number.clone(),
            balance: self.balance,
        }
    }
}
