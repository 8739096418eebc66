//! The bounty creation wizard.
//!
//! [`machine::bounty::state_transition`] is a pure function moving a [`types::WizardState`] along
//! the wizard steps. The [`service::BountyWizard`] driver feeds it state changes, reacts to the
//! events it emits by consulting the identity and submission collaborators and keeps the `NEXT`
//! gate up to date.
#![warn(clippy::missing_docs_in_private_items)]

/// Wizard constants.
pub mod constants;
/// Wizard errors.
pub mod errors;
/// Wizard transitioners.
pub mod machine;
/// Wizard driver and collaborators.
pub mod service;
#[cfg(test)]
mod tests;
/// Wizard types.
pub mod types;
/// Withdraw summaries.
pub mod withdraw;
