//! Grammar matching engine.

mod checkpoint;
pub mod effect;
pub mod error;
mod frame;
pub mod materializer;
pub mod trace;
pub mod value;
pub mod vm;


pub use effect::{Effect, EffectLog};
pub use error::MatchSafetyError;
pub use materializer::{Materializer, ValueMaterializer};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use value::{Captures, MatchResult, Value, WHOLE_MATCH};
pub use vm::{DEFAULT_EXEC_FUEL, DEFAULT_RECURSION_FUEL, Matcher};
