//! # Observability & Tracing
//!
//! Structured logging for every collection actor. Each log line carries an
//! `entity_type` field ("Table", "Order", "Bill") instead of the module path, plus the
//! document id and, on commits, the new revision.
//!
//! ## Levels
//!
//! - `info`: actor start/stop, committed creates, updates, deletes and actions
//! - `warn`: rejected requests (not found, stale revision, duplicate key, hook errors)
//! - `debug`: request payloads, logged once when the request arrives
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run
//! RUST_LOG=tableside::billing=debug,info cargo run
//! ```
//!
//! With `RUST_LOG=info` a table being occupied and an order placed read:
//!
//! ```text
//! INFO Action ok entity_type="Table" id=table_3 revision=2
//! INFO Created entity_type="Order" id=order_1 size=1
//! ```

/// Installs the global subscriber. Honors `RUST_LOG`; a no-op if one is already set.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
