//! Bulk-action planning and the destructive-action gate.
//!
//! # Design
//! - Planning is pure: the view asks what a click means before any transport
//!   work happens.
//! - Only delete-old migrations are destructive; they alone pass through the
//!   typed confirmation gate.

use crate::features::torrents::state::Tab;

/// Literal token the operator must type to arm a destructive migrate.
pub const CONFIRM_TOKEN: &str = "CONFIRM";

/// Bulk operations the console can dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulkAction {
    /// Relocate the selected torrents per the placement policy.
    Migrate {
        /// Remove the original source directory after a successful move.
        delete_old: bool,
    },
    /// Nudge metadata-stuck torrents on the backend.
    FixMetadata,
}

/// Workflow phase of the bulk-action engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Workflow {
    /// No action in flight.
    #[default]
    Idle,
    /// Awaiting the typed confirmation for a destructive migrate.
    Confirming,
    /// A remote action has been dispatched and not yet settled.
    Executing,
}

/// Outcome of planning a bulk action against the current view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionPlan {
    /// Dispatch immediately.
    Dispatch,
    /// Require the typed confirmation first.
    Confirm,
    /// Do nothing: empty selection, or the tab forbids the action.
    Ignore,
}

/// Whether migration is offered on a tab.
///
/// The OK partition forbids migration entirely; only misplaced or stuck
/// torrents are candidates for relocation.
#[must_use]
pub const fn migration_allowed(tab: Tab) -> bool {
    !matches!(tab, Tab::Ok)
}

/// Plan a bulk action for the current tab and selection size.
#[must_use]
pub fn plan(action: BulkAction, tab: Tab, selection_len: usize) -> ActionPlan {
    if selection_len == 0 {
        return ActionPlan::Ignore;
    }
    match action {
        BulkAction::Migrate { .. } if !migration_allowed(tab) => ActionPlan::Ignore,
        BulkAction::Migrate { delete_old: true } => ActionPlan::Confirm,
        BulkAction::Migrate { delete_old: false } | BulkAction::FixMetadata => ActionPlan::Dispatch,
    }
}

/// Whether the typed challenge arms the confirm control.
///
/// Exact, case-sensitive match only; prefixes, suffixes, and case variants
/// keep the control disabled.
#[must_use]
pub fn confirm_armed(input: &str) -> bool {
    input == CONFIRM_TOKEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_ignores_every_action() {
        for action in [
            BulkAction::Migrate { delete_old: false },
            BulkAction::Migrate { delete_old: true },
            BulkAction::FixMetadata,
        ] {
            assert_eq!(plan(action, Tab::Misplaced, 0), ActionPlan::Ignore);
        }
    }

    #[test]
    fn ok_tab_blocks_migration_regardless_of_selection() {
        assert_eq!(
            plan(BulkAction::Migrate { delete_old: false }, Tab::Ok, 3),
            ActionPlan::Ignore
        );
        assert_eq!(
            plan(BulkAction::Migrate { delete_old: true }, Tab::Ok, 3),
            ActionPlan::Ignore
        );
    }

    #[test]
    fn fix_metadata_dispatches_on_any_tab() {
        for tab in Tab::all() {
            assert_eq!(plan(BulkAction::FixMetadata, tab, 2), ActionPlan::Dispatch);
        }
    }

    #[test]
    fn delete_old_migrations_require_confirmation() {
        assert_eq!(
            plan(BulkAction::Migrate { delete_old: true }, Tab::Misplaced, 1),
            ActionPlan::Confirm
        );
        assert_eq!(
            plan(BulkAction::Migrate { delete_old: false }, Tab::Stuck, 1),
            ActionPlan::Dispatch
        );
    }

    #[test]
    fn confirm_gate_requires_the_exact_token() {
        assert!(confirm_armed("CONFIRM"));
        assert!(!confirm_armed("confirm"));
        assert!(!confirm_armed("CONFIRM "));
        assert!(!confirm_armed("CONFIRMX"));
        assert!(!confirm_armed(""));
    }

    #[test]
    fn workflow_starts_idle() {
        assert_eq!(Workflow::default(), Workflow::Idle);
    }
}
