//! Result rendering
//!
//! One formatted line per dispatched command. The printer owns no state;
//! it renders dispatch results and parse errors into strings the driver
//! writes to stdout.

use crate::app::DispatchResult;
use crate::errors::ParseError;

const HELP_TEXT: &str = "\
Spot Exchange CLI

Commands:
  help
  exit
  create-user <name>
  get-user <user_id>
  deposit <user_id> <asset> <quantity>
  withdraw <user_id> <asset> <quantity>
  free-balance <user_id> <asset>
  reserved-balance <user_id> <asset>
  place-limit <user_id> <base>/<quote> <buy|sell> <price> <quantity>
  place-market <user_id> <base>/<quote> <buy|sell> <quantity>
  cancel-order <user_id> <order_id>
  register-market <base>/<quote>

Examples:
  create-user Alice
  register-market BTC/USDT
  deposit 1 USDT 100000
  place-limit 1 BTC/USDT buy 95000 2
  place-market 1 BTC/USDT sell 1
  cancel-order 1 42";

pub fn help_text() -> &'static str {
    HELP_TEXT
}

pub fn format_parse_error(error: &ParseError) -> String {
    format!(
        "[ERROR] [{}] [{}] At position {}: {}",
        error.stage, error.code, error.column, error.message
    )
}

pub fn format_dispatch_result(result: &DispatchResult) -> String {
    match result {
        DispatchResult::HelpRequested => HELP_TEXT.to_string(),
        DispatchResult::ExitRequested => "[INFO] Exit requested".to_string(),
        DispatchResult::UserCreated { user_id, name } => {
            format!("[SUCCESS] User created: id={user_id} name={name}")
        }
        DispatchResult::UserRead { user_id, name } => {
            format!("[SUCCESS] User: id={user_id} name={name}")
        }
        DispatchResult::DepositDone { user_id, asset, amount } => {
            format!("[SUCCESS] Deposited {amount} {asset} to user {user_id}")
        }
        DispatchResult::WithdrawDone { user_id, asset, amount } => {
            format!("[SUCCESS] Withdrew {amount} {asset} from user {user_id}")
        }
        DispatchResult::FreeBalanceRead { user_id, asset, free } => {
            format!("[SUCCESS] Free balance: user={user_id} asset={asset} amount={free}")
        }
        DispatchResult::ReservedBalanceRead { user_id, asset, reserved } => {
            format!("[SUCCESS] Reserved balance: user={user_id} asset={asset} amount={reserved}")
        }
        DispatchResult::LimitOrderPlaced { order_id, filled, remaining } => {
            format!("[SUCCESS] Limit order placed: id={order_id} filled={filled} remaining={remaining}")
        }
        DispatchResult::MarketOrderExecuted { order_id, filled, remaining } => {
            format!(
                "[SUCCESS] Market order executed: id={order_id} filled={filled} remaining={remaining}"
            )
        }
        DispatchResult::OrderCanceled { order_id, side, remaining } => {
            format!("[SUCCESS] {side} order {order_id} canceled. Remaining {remaining}")
        }
        DispatchResult::MarketRegistered { market } => {
            format!("[SUCCESS] Market {market} registered")
        }
        DispatchResult::Error(error) => {
            format!("[ERROR][{}] {}", error.code, error.message)
        }
    }
}
