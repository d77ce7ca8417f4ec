//! Validation of the editable graph.
//!
//! A [`Validator`] runs [`ValidationRule`]s over entities and collects the
//! resulting [`Issue`]s. Issues carry [`Fix`]es that act on the
//! [`osmedit_core::Context`] when applied.

mod error;
mod fixes;
pub mod issue;
pub mod rules;
pub mod validator;

pub use error::{FixError, Result};
pub use issue::{Fix, FixKind, Issue, Severity};
pub use rules::{ImpossibleOneway, ValidationRule, WayType};
pub use validator::{ValidationReport, Validator};
