//! Recorder Module
//!
//! Call instrumentation for operations: call counting, input/output history
//! and replay of what was recorded.
//!
//! Recorders wrap an [`Operation`] and expose the same call signature, so
//! they stack by nesting. Each concern writes to its own keys:
//! - `name` - call counter
//! - `name:inputs` - rendered argument tuples, one per call
//! - `name:outputs` - rendered return values, one per successful call
//!
//! [`InstrumentedCache`] applies both recorders to `Cache::store` while
//! keeping its `store(value)` call shape.

mod counter;
mod history;
mod instrumented;
mod replay;

use std::sync::Arc;

use crate::error::Result;
use crate::store::SharedStore;

pub use counter::CallCounter;
pub use history::CallHistory;
pub use instrumented::InstrumentedCache;
pub use replay::{RecordedCall, Replay, ReplayReporter};

// == Operation ==
/// A named unit of work that recorders can wrap.
///
/// `A` is the positional argument tuple, without the receiver.
pub trait Operation<A> {
    type Output;

    fn call(&self, args: A) -> Result<Self::Output>;
}

impl<A, O: Operation<A> + ?Sized> Operation<A> for &O {
    type Output = O::Output;

    fn call(&self, args: A) -> Result<Self::Output> {
        (**self).call(args)
    }
}

impl<A, O: Operation<A> + ?Sized> Operation<A> for Arc<O> {
    type Output = O::Output;

    fn call(&self, args: A) -> Result<Self::Output> {
        (**self).call(args)
    }
}

// == Key Naming ==
const INPUTS_SUFFIX: &str = ":inputs";
const OUTPUTS_SUFFIX: &str = ":outputs";

/// Store key of the input log for `name`.
pub fn inputs_key(name: &str) -> String {
    format!("{}{}", name, INPUTS_SUFFIX)
}

/// Store key of the output log for `name`.
pub fn outputs_key(name: &str) -> String {
    format!("{}{}", name, OUTPUTS_SUFFIX)
}

/// True when `key` names an input or output log rather than an operation.
pub fn is_log_key(key: &str) -> bool {
    key.ends_with(INPUTS_SUFFIX) || key.ends_with(OUTPUTS_SUFFIX)
}

// == Instrument ==
/// Wraps `op` with call history, then call counting, both under `name`.
///
/// # Arguments
/// * `op` - The operation to record
/// * `name` - Operation identity, used as the counter key and log prefix
/// * `store` - Store the counter and logs are written to
pub fn instrument<O>(op: O, name: &str, store: SharedStore) -> CallCounter<CallHistory<O>> {
    CallCounter::new(CallHistory::new(op, name, store.clone()), name, store)
}
