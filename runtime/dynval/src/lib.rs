//! Dynamic values with copy-on-write sharing and automatic precision.
//!
//! [`Value`] is a single tagged type that can hold null, booleans, numbers,
//! text, arrays and maps, for embedding a scripting layer or moving loosely
//! typed data through a pipeline.
//!
//! # Architecture
//!
//! - `value`: the [`Value`] enum, its shared [`Heap`] payloads, accessors
//! - `numeric`: the `f64` fast path and promotion to [`BigNumber`]
//! - `operators` / `unary_operators`: checked evaluation plus `std::ops`
//! - `compare`: equality, ordering, hashing
//! - `collections` / `text`: array, map and text operations
//! - `convert` / `format`: conversions and the display form
//!
//! # Behavior
//!
//! Copies share payloads until written ([`Value::is_copy_pending`]).
//! Numbers stay on `f64` while the result is exact and move to an exact
//! decimal otherwise, so `0.1 + 0.2` prints `0.3`. Operator syntax never
//! fails: undefined operations yield `Number(0)`. Use [`evaluate_binary`]
//! and the other checked entry points to see why.

mod collections;
mod compare;
mod convert;
mod errors;
mod format;
mod numeric;
mod operators;
mod stack;
mod text;
mod unary_operators;
mod value;

pub use convert::{parse_number, parse_number_with};
pub use dynval_decimal::{BigNumber, ParseBigNumberError};
pub use errors::{ValueError, ValueResult};
pub use format::{DisplayWith, FormatOptions};
pub use numeric::NumericPolicy;
pub use operators::{assign_binary, evaluate_binary, evaluate_binary_with, BinaryOp};
pub use unary_operators::{evaluate_unary, UnaryOp};
pub use value::{Heap, Value, ValueMap, ValueType};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber driven by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset or a global subscriber already
/// exists. Safe to call more than once.
///
/// ```text
/// RUST_LOG=dynval=debug   # promotions and neutral fallbacks
/// RUST_LOG=dynval=trace   # also every copy-on-write split
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
