//! Integration tests for the Store runtime
//!
//! Covers serialized mutation, rejection leaving state untouched, health and
//! shutdown behavior.

// Test code can use unwrap/expect/panic
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;
use todocast_core::environment::Clock;
use todocast_core::reducer::Reducer;
use todocast_runtime::{HealthStatus, Store, StoreError};
use todocast_testing::test_clock;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone)]
enum LedgerAction {
    Deposit(u32),
    Withdraw(u32),
}

#[derive(Debug, Clone, Default)]
struct LedgerState {
    balance: u32,
    entries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
enum LedgerError {
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: u32, requested: u32 },
}

struct LedgerEnvironment {
    clock: Arc<dyn Clock>,
}

struct LedgerReducer;

impl Reducer for LedgerReducer {
    type State = LedgerState;
    type Action = LedgerAction;
    type Environment = LedgerEnvironment;
    type Output = u32;
    type Error = LedgerError;

    fn reduce(
        &self,
        state: &mut LedgerState,
        action: LedgerAction,
        env: &LedgerEnvironment,
    ) -> Result<u32, LedgerError> {
        match action {
            LedgerAction::Deposit(amount) => {
                state.balance += amount;
                state.entries.push(format!("+{amount} at {}", env.clock.now()));
            }
            LedgerAction::Withdraw(amount) => {
                if amount > state.balance {
                    return Err(LedgerError::InsufficientFunds {
                        balance: state.balance,
                        requested: amount,
                    });
                }
                state.balance -= amount;
                state.entries.push(format!("-{amount} at {}", env.clock.now()));
            }
        }
        Ok(state.balance)
    }
}

fn ledger_store() -> Store<LedgerState, LedgerAction, LedgerEnvironment, LedgerReducer> {
    Store::new(
        LedgerState::default(),
        LedgerReducer,
        LedgerEnvironment {
            clock: Arc::new(test_clock()),
        },
    )
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn send_returns_reducer_output() {
    let store = ledger_store();

    let balance = store.send(LedgerAction::Deposit(10)).await.unwrap();
    assert_eq!(balance, 10);

    let balance = store.send(LedgerAction::Withdraw(4)).await.unwrap();
    assert_eq!(balance, 6);

    assert_eq!(store.state(|s| s.entries.len()).await, 2);
}

#[tokio::test]
async fn rejected_action_leaves_state_unchanged() {
    let store = ledger_store();
    store.send(LedgerAction::Deposit(5)).await.unwrap();

    let result = store.send(LedgerAction::Withdraw(50)).await;
    assert_eq!(
        result,
        Err(StoreError::Rejected(LedgerError::InsufficientFunds {
            balance: 5,
            requested: 50,
        }))
    );

    let (balance, entries) = store.state(|s| (s.balance, s.entries.len())).await;
    assert_eq!(balance, 5);
    assert_eq!(entries, 1);
}

#[tokio::test]
async fn concurrent_sends_are_serialized() {
    let store = Arc::new(ledger_store());

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.send(LedgerAction::Deposit(1)).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let (balance, entries) = store.state(|s| (s.balance, s.entries.len())).await;
    assert_eq!(balance, 50);
    assert_eq!(entries, 50);
}

#[tokio::test]
async fn shutdown_rejects_new_actions() {
    let store = ledger_store();
    assert_eq!(store.health().status, HealthStatus::Healthy);

    store.shutdown().await;

    let result = store.send(LedgerAction::Deposit(1)).await;
    assert_eq!(result, Err(StoreError::ShutdownInProgress));
    assert_eq!(store.health().status, HealthStatus::Unhealthy);
    assert_eq!(store.state(|s| s.balance).await, 0);
}

#[test]
fn rejected_error_displays_reducer_message() {
    let error: StoreError<LedgerError> = StoreError::Rejected(LedgerError::InsufficientFunds {
        balance: 1,
        requested: 2,
    });
    assert_eq!(
        error.to_string(),
        "insufficient funds: balance 1, requested 2"
    );
}
