//! User-facing operations.
//!
//! An operation is built for one selection and answers the questions a menu
//! or keyboard shortcut needs before running it: is it offered at all, is it
//! currently disabled and why, and what to call it. Operations read the
//! [`Context`] they are asked about and act on it in [`Operation::execute`].

use osmedit_actions::DisabledReason;

use crate::context::Context;
use crate::error::Result;

pub mod split;

pub use split::SplitOperation;

pub trait Operation {
    /// Stable identifier, also the localization namespace under `operations.`.
    fn id(&self) -> &'static str;

    fn title(&self, context: &Context) -> String {
        context.t(&format!("operations.{}.title", self.id()), &[])
    }

    fn keys(&self, context: &Context) -> Vec<String> {
        vec![context.t(&format!("operations.{}.key", self.id()), &[])]
    }

    /// Whether the operation is offered for the selection at all.
    fn available(&self, context: &Context) -> bool;

    /// Why the operation cannot run right now, if it cannot.
    fn disabled(&self, context: &Context) -> Option<DisabledReason>;

    fn tooltip(&self, context: &Context) -> String;

    /// History annotation recorded when the operation runs.
    fn annotation(&self, context: &Context) -> String;

    fn execute(&self, context: &mut Context) -> Result<()>;
}
