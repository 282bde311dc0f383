//! Response domain types

mod outcome;
mod spec;

pub use outcome::{ExecutionFailure, ExecutionOutcome, RequestErrorKind, ResponseBody};
pub use spec::{ResponseSpec, reason_phrase};
