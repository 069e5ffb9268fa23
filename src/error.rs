/// Exports the derive macros and traits used by this crate's error types.
pub mod prelude {
  pub use miette::Diagnostic;
  pub use thiserror::Error;
}
