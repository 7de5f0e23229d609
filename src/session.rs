use log::{debug, info, warn};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::Config;
use crate::console::{PromptError, Prompter, Screen, Style};
use crate::currency::format_currency;
use crate::history::{History, HistoryError};
use crate::model::{Account, AccountError, AccountSummary, Event, LogEntry};
use crate::validation::{
    validate_account_number, validate_amount, validate_holder_name, validate_surname,
    ValidationError,
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Operation cancelled by user")]
    Cancelled,
    #[error(transparent)]
    Input(PromptError),
    #[error(transparent)]
    History(#[from] HistoryError),
}

impl From<PromptError> for SessionError {
    fn from(e: PromptError) -> Self {
        match e {
            PromptError::Interrupted => SessionError::Cancelled,
            other => SessionError::Input(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingMenuChoice,
    Depositing,
    Withdrawing,
    ViewingHistory,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Deposit,
    Withdraw,
    History,
    Exit,
}

impl MenuChoice {
    /// Single-letter commands, case-insensitive, surrounding whitespace ignored.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "D" => Some(MenuChoice::Deposit),
            "R" => Some(MenuChoice::Withdraw),
            "H" => Some(MenuChoice::History),
            "S" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// One customer's visit: registration followed by the menu loop.
#[derive(Debug)]
pub struct Session<P, S, H> {
    prompter: P,
    screen: S,
    history: H,
    config: Config,
    account: Account,
    notice: Option<String>,
}

impl<P: Prompter, S: Screen, H: History> Session<P, S, H> {
    /// Registers the customer, re-asking for each field until it is valid,
    /// and records the account creation.
    pub fn open(
        mut prompter: P,
        mut screen: S,
        mut history: H,
        config: Config,
    ) -> Result<Self, SessionError> {
        screen.clear();
        screen.banner();
        screen.print(Style::Title, "CUSTOMER REGISTRATION");
        screen.separator();

        let surname = prompt_until(
            &mut prompter,
            &mut screen,
            "Enter your surname",
            validate_surname,
        )?;
        let account_number = prompt_until(
            &mut prompter,
            &mut screen,
            "Enter your account number",
            validate_account_number,
        )?;
        let holder_name = prompt_until(
            &mut prompter,
            &mut screen,
            "Enter your full name",
            validate_holder_name,
        )?;
        let initial_balance = prompt_until(
            &mut prompter,
            &mut screen,
            &format!("Initial balance for account {account_number} ($)"),
            validate_amount,
        )?;

        let account = Account::open(
            &surname,
            account_number.into(),
            &holder_name,
            initial_balance,
        );

        history.append(&LogEntry::now(&Event::AccountCreated {
            holder_name: account.holder_name.clone(),
            account_number: account.account_number.clone(),
            initial_balance,
        }))?;

        info!("opened account {}", account.account_number);

        Ok(Self {
            prompter,
            screen,
            history,
            config,
            account,
            notice: None,
        })
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Drives the menu until the customer leaves.
    pub fn run(&mut self) -> Result<AccountSummary, SessionError> {
        let mut state = SessionState::AwaitingMenuChoice;

        while state != SessionState::Terminated {
            state = self.step(state)?;
        }

        Ok(self.account.summary())
    }

    /// Performs the work of `state` and returns the state that follows it.
    pub fn step(&mut self, state: SessionState) -> Result<SessionState, SessionError> {
        debug!("session state: {state:?}");

        match state {
            SessionState::AwaitingMenuChoice => self.await_menu_choice(),
            SessionState::Depositing => self.deposit(),
            SessionState::Withdrawing => self.withdraw(),
            SessionState::ViewingHistory => self.view_history(),
            SessionState::Terminated => Ok(SessionState::Terminated),
        }
    }

    fn await_menu_choice(&mut self) -> Result<SessionState, SessionError> {
        self.show_menu();

        let input = self.prompter.prompt("Select an option [D/R/H/S]")?;

        let next = match MenuChoice::parse(&input) {
            Some(MenuChoice::Deposit) => SessionState::Depositing,
            Some(MenuChoice::Withdraw) => SessionState::Withdrawing,
            Some(MenuChoice::History) => SessionState::ViewingHistory,
            Some(MenuChoice::Exit) => {
                self.farewell()?;
                SessionState::Terminated
            }
            None => {
                debug!("invalid menu option {input:?}");
                self.notice = Some("Invalid option. Please select D, R, H or S.".to_owned());
                SessionState::AwaitingMenuChoice
            }
        };

        Ok(next)
    }

    fn show_menu(&mut self) {
        self.screen.clear();
        self.screen.banner();
        self.show_customer_info("Balance");
        self.screen.separator();

        self.screen.print(Style::Highlight, "AVAILABLE OPTIONS");
        self.screen.print(Style::Success, "[D] Deposit money");
        self.screen.print(Style::Warning, "[R] Withdraw money");
        self.screen.print(Style::Info, "[H] View history");
        self.screen.print(Style::Error, "[S] Exit");
        self.screen.separator();

        // Shown after the redraw so it survives the screen clear.
        if let Some(notice) = self.notice.take() {
            self.screen.print(Style::Error, &notice);
        }
    }

    fn show_customer_info(&mut self, balance_label: &str) {
        self.screen.print(Style::Success, "CUSTOMER INFORMATION");
        self.screen
            .print(Style::Plain, &format!("Client: {}", self.account.holder_name));
        self.screen.print(
            Style::Plain,
            &format!("Account: {}", self.account.account_number),
        );
        self.screen.print(
            Style::Success,
            &format!(
                "{balance_label}: {}",
                format_currency(self.account.balance)
            ),
        );
    }

    fn deposit(&mut self) -> Result<SessionState, SessionError> {
        self.screen.print(Style::Success, "DEPOSIT");
        self.screen.separator();

        let amount = self.prompt_amount("Amount to deposit ($)")?;
        let change = self.account.deposit(amount);
        self.history.append(&LogEntry::now(&Event::Deposit(change)))?;

        info!(
            "deposited {amount} into {}, balance {}",
            self.account.account_number, change.new
        );

        self.screen.blank();
        self.screen.print(Style::Success, "DEPOSIT SUCCESSFUL");
        self.print_receipt("Amount deposited", amount);
        self.return_to_menu();

        Ok(SessionState::AwaitingMenuChoice)
    }

    fn withdraw(&mut self) -> Result<SessionState, SessionError> {
        self.screen.print(Style::Warning, "WITHDRAWAL");
        self.screen.separator();

        let amount = self.prompt_amount("Amount to withdraw ($)")?;

        match self.account.withdraw(amount) {
            Ok(change) => {
                self.history
                    .append(&LogEntry::now(&Event::Withdrawal(change)))?;

                info!(
                    "withdrew {amount} from {}, balance {}",
                    self.account.account_number, change.new
                );

                self.screen.blank();
                self.screen.print(Style::Success, "WITHDRAWAL SUCCESSFUL");
                self.print_receipt("Amount withdrawn", amount);
            }
            Err(AccountError::InsufficientFunds {
                requested,
                available,
            }) => {
                self.history.append(&LogEntry::now(&Event::WithdrawalFailed {
                    requested,
                    available,
                }))?;

                warn!(
                    "rejected withdrawal of {requested} from {}: only {available} available",
                    self.account.account_number
                );

                self.screen.blank();
                self.screen.print(Style::Error, "INSUFFICIENT FUNDS");
                self.screen.print(
                    Style::Plain,
                    &format!("Amount requested: {}", format_currency(requested)),
                );
                self.screen.print(
                    Style::Plain,
                    &format!("Available balance: {}", format_currency(available)),
                );
            }
        }

        self.return_to_menu();

        Ok(SessionState::AwaitingMenuChoice)
    }

    fn view_history(&mut self) -> Result<SessionState, SessionError> {
        self.screen.clear();
        self.screen.banner();

        match self.history.read_all()? {
            Some(contents) if !contents.is_empty() => {
                self.screen.print(Style::Info, "TRANSACTION HISTORY:");
                let contents = contents.strip_suffix('\n').unwrap_or(&contents);
                self.screen.print(Style::Plain, contents);
            }
            Some(_) => self
                .screen
                .print(Style::Warning, "No transactions in history."),
            None => self.screen.print(Style::Warning, "No history available."),
        }

        self.screen.blank();
        self.prompter.prompt("Press Enter to continue...")?;

        Ok(SessionState::AwaitingMenuChoice)
    }

    fn farewell(&mut self) -> Result<(), SessionError> {
        self.screen.clear();
        self.screen.banner();
        self.screen.print(Style::Success, "FINAL SUMMARY");
        self.screen.separator();
        self.show_customer_info("Final balance");
        self.screen.separator();
        self.screen
            .print(Style::Highlight, "Thank you for banking with Zarco Bank");
        self.screen.print(Style::Info, "Have an excellent day");

        self.history.append(&LogEntry::now(&Event::SessionEnded {
            final_balance: self.account.balance,
        }))?;

        info!("closed session for {}", self.account.account_number);

        Ok(())
    }

    fn prompt_amount(&mut self, message: &str) -> Result<Decimal, SessionError> {
        prompt_until(
            &mut self.prompter,
            &mut self.screen,
            message,
            validate_amount,
        )
    }

    fn print_receipt(&mut self, amount_label: &str, amount: Decimal) {
        self.screen.print(
            Style::Plain,
            &format!("Client: {}", self.account.full_name()),
        );
        self.screen.print(
            Style::Plain,
            &format!("{amount_label}: {}", format_currency(amount)),
        );
        self.screen.print(
            Style::Plain,
            &format!("New balance: {}", format_currency(self.account.balance)),
        );
    }

    fn return_to_menu(&mut self) {
        self.screen.blank();
        self.screen
            .print(Style::Info, "Returning to the main menu...");
        self.screen.pause(self.config.pause);
    }
}

/// Asks until `validate` accepts the answer, printing each rejection.
fn prompt_until<T>(
    prompter: &mut impl Prompter,
    screen: &mut impl Screen,
    message: &str,
    validate: impl Fn(&str) -> Result<T, ValidationError>,
) -> Result<T, SessionError> {
    loop {
        let input = prompter.prompt(message)?;

        match validate(&input) {
            Ok(value) => return Ok(value),
            Err(e) => {
                debug!("rejected {input:?} for {message:?}: {e}");
                screen.print(Style::Error, &format!("Error: {e}"));
            }
        }
    }
}
