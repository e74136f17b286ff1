//! Scoped Session Integration Tests
//!
//! Drives `SessionScope` through mocked gateway, event loop and shell ports
//! and checks call counts and ordering for each exit path.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::panic::{AssertUnwindSafe, catch_unwind};

use mockall::{Sequence, mock, predicate::eq};
use thiserror::Error;

use ib_session::{
    EventLoopPort, GatewayPort, IntrospectionError, NOTEBOOK_SHELL, SessionParams, SessionScope,
    ShellIdentity, ShellIntrospectionPort, TERMINAL_SHELL,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum GatewayError {
    #[error("gateway unreachable at {0}")]
    Unreachable(String),
    #[error("socket already closed")]
    SocketClosed,
}

#[derive(Debug, PartialEq, Eq, Error)]
enum StrategyError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("insufficient buying power for {symbol}")]
    InsufficientBuyingPower { symbol: String },
}

mock! {
    Gateway {}
    impl GatewayPort for Gateway {
        type Session = u32;
        type Error = GatewayError;
        fn connect(&self, params: &SessionParams) -> Result<u32, GatewayError>;
        fn disconnect(&self, session: u32) -> Result<(), GatewayError>;
    }
}

mock! {
    Loop {}
    impl EventLoopPort for Loop {
        fn start_loop(&self);
    }
}

mock! {
    Shell {}
    impl ShellIntrospectionPort for Shell {
        fn current_shell(&self) -> Result<Option<ShellIdentity>, IntrospectionError>;
    }
}

fn script_shell() -> MockShell {
    let mut shell = MockShell::new();
    shell.expect_current_shell().returning(|| Ok(None));
    shell
}

fn notebook_shell() -> MockShell {
    let mut shell = MockShell::new();
    shell
        .expect_current_shell()
        .returning(|| Ok(Some(ShellIdentity::new(NOTEBOOK_SHELL))));
    shell
}

fn idle_loop() -> MockLoop {
    let mut event_loop = MockLoop::new();
    event_loop.expect_start_loop().never();
    event_loop
}

#[test]
fn default_params_reach_the_gateway() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_connect()
        .withf(|p| p.host == "127.0.0.1" && p.port == 4002 && p.client_id == 1)
        .times(1)
        .returning(|_| Ok(11));
    gateway
        .expect_disconnect()
        .with(eq(11))
        .times(1)
        .returning(|_| Ok(()));

    let scope = SessionScope::new(gateway, idle_loop(), script_shell());
    let seen: Result<u32, StrategyError> = scope.run_default(|session| Ok(*session));
    assert_eq!(seen, Ok(11));
}

#[test]
fn body_failure_disconnects_once_then_propagates_unchanged() {
    let mut seq = Sequence::new();
    let mut gateway = MockGateway::new();
    gateway
        .expect_connect()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(3));
    gateway
        .expect_disconnect()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let scope = SessionScope::new(gateway, idle_loop(), script_shell());
    let result: Result<(), StrategyError> = scope.run(&SessionParams::default(), |_| {
        Err(StrategyError::InsufficientBuyingPower {
            symbol: "AAPL".to_string(),
        })
    });

    assert_eq!(
        result,
        Err(StrategyError::InsufficientBuyingPower {
            symbol: "AAPL".to_string()
        })
    );
}

#[test]
fn unreachable_gateway_propagates_and_never_disconnects() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_connect()
        .times(1)
        .returning(|p| Err(GatewayError::Unreachable(p.address())));
    gateway.expect_disconnect().never();

    let scope = SessionScope::new(gateway, idle_loop(), script_shell());
    let result: Result<(), StrategyError> = scope.run(
        &SessionParams::default().with_port(4001),
        |_| panic!("body must not run without a session"),
    );

    assert_eq!(
        result,
        Err(StrategyError::Gateway(GatewayError::Unreachable(
            "127.0.0.1:4001".to_string()
        )))
    );
}

#[test]
fn notebook_starts_loop_once_before_connect() {
    let mut seq = Sequence::new();
    let mut event_loop = MockLoop::new();
    event_loop
        .expect_start_loop()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let mut gateway = MockGateway::new();
    gateway
        .expect_connect()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(1));
    gateway
        .expect_disconnect()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let scope = SessionScope::new(gateway, event_loop, notebook_shell());
    let result: Result<(), StrategyError> = scope.run_default(|_| Ok(()));
    assert!(result.is_ok());
}

#[test]
fn notebook_starts_loop_once_per_scope() {
    let mut event_loop = MockLoop::new();
    event_loop.expect_start_loop().times(2).return_const(());

    let mut gateway = MockGateway::new();
    gateway.expect_connect().times(2).returning(|_| Ok(1));
    gateway.expect_disconnect().times(2).returning(|_| Ok(()));

    let scope = SessionScope::new(gateway, event_loop, notebook_shell());
    for _ in 0..2 {
        let result: Result<(), StrategyError> = scope.run_default(|_| Ok(()));
        assert!(result.is_ok());
    }
}

#[test]
fn terminal_shell_skips_loop() {
    let mut shell = MockShell::new();
    shell
        .expect_current_shell()
        .returning(|| Ok(Some(ShellIdentity::new(TERMINAL_SHELL))));

    let mut gateway = MockGateway::new();
    gateway.expect_connect().times(1).returning(|_| Ok(1));
    gateway.expect_disconnect().times(1).returning(|_| Ok(()));

    let scope = SessionScope::new(gateway, idle_loop(), shell);
    let result: Result<(), StrategyError> = scope.run_default(|_| Ok(()));
    assert!(result.is_ok());
}

#[test]
fn broken_introspection_connects_without_loop() {
    let mut shell = MockShell::new();
    shell
        .expect_current_shell()
        .returning(|| Err(IntrospectionError::Lookup("get_shell".to_string())));

    let mut gateway = MockGateway::new();
    gateway.expect_connect().times(1).returning(|_| Ok(1));
    gateway.expect_disconnect().times(1).returning(|_| Ok(()));

    let scope = SessionScope::new(gateway, idle_loop(), shell);
    let result: Result<(), StrategyError> = scope.run_default(|_| Ok(()));
    assert!(result.is_ok());
}

#[test]
fn panic_in_body_disconnects_once() {
    let mut gateway = MockGateway::new();
    gateway.expect_connect().times(1).returning(|_| Ok(5));
    gateway
        .expect_disconnect()
        .with(eq(5))
        .times(1)
        .returning(|_| Ok(()));

    let scope = SessionScope::new(gateway, idle_loop(), script_shell());
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let _: Result<(), StrategyError> = scope.run_default(|_| panic!("order book corrupted"));
    }));

    let payload = outcome.unwrap_err();
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"order book corrupted"));
}

#[test]
fn disconnect_failure_is_secondary_to_body_failure() {
    let mut gateway = MockGateway::new();
    gateway.expect_connect().times(1).returning(|_| Ok(1));
    gateway
        .expect_disconnect()
        .times(1)
        .returning(|_| Err(GatewayError::SocketClosed));

    let scope = SessionScope::new(gateway, idle_loop(), script_shell());
    let result: Result<(), StrategyError> = scope.run_default(|_| {
        Err(StrategyError::InsufficientBuyingPower {
            symbol: "SPY".to_string(),
        })
    });

    assert!(matches!(
        result,
        Err(StrategyError::InsufficientBuyingPower { .. })
    ));
}

#[test]
fn disconnect_failure_surfaces_when_body_succeeds() {
    let mut gateway = MockGateway::new();
    gateway.expect_connect().times(1).returning(|_| Ok(1));
    gateway
        .expect_disconnect()
        .times(1)
        .returning(|_| Err(GatewayError::SocketClosed));

    let scope = SessionScope::new(gateway, idle_loop(), script_shell());
    let result: Result<u8, StrategyError> = scope.run_default(|_| Ok(1));
    assert_eq!(result, Err(StrategyError::Gateway(GatewayError::SocketClosed)));
}

#[test]
fn guard_early_return_disconnects() {
    let mut gateway = MockGateway::new();
    gateway.expect_connect().times(1).returning(|_| Ok(9));
    gateway.expect_disconnect().times(1).returning(|_| Ok(()));

    let scope = SessionScope::new(gateway, idle_loop(), script_shell());

    let attempt = || -> Result<(), StrategyError> {
        let guard = scope.open(&SessionParams::default())?;
        if *guard == 9 {
            return Err(StrategyError::InsufficientBuyingPower {
                symbol: "QQQ".to_string(),
            });
        }
        guard.close()?;
        Ok(())
    };

    assert!(attempt().is_err());
}
