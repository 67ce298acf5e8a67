// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{PendingOperator, keymap_names};

/// The active editing state. Exactly one is current at any time.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EditMode {
    #[default]
    Emacs,
    ViInsert,
    ViCommand,
    ViOperatorPending,
    Visual,
    Menu,
}

impl EditMode {
    /// Keymaps consulted in this mode after `main`, highest priority first.
    #[must_use]
    pub fn keymap_layers(self) -> &'static [&'static str] {
        match self {
            EditMode::Emacs => &[keymap_names::EMACS],
            EditMode::ViInsert => &[keymap_names::VIINS],
            EditMode::ViCommand => &[keymap_names::VICMD],
            EditMode::ViOperatorPending => &[keymap_names::VIOPP, keymap_names::VICMD],
            EditMode::Visual => &[keymap_names::VISUAL, keymap_names::VICMD],
            EditMode::Menu => &[keymap_names::MENU],
        }
    }

    #[must_use]
    pub fn is_vi(self) -> bool {
        matches!(
            self,
            EditMode::ViInsert | EditMode::ViCommand | EditMode::ViOperatorPending | EditMode::Visual
        )
    }

    /// The mode selected by a keymap name, for [`crate::LineReader::set_keymap`].
    #[must_use]
    pub fn from_keymap_name(name: &str) -> Option<Self> {
        Some(match name {
            keymap_names::EMACS => EditMode::Emacs,
            keymap_names::VIINS => EditMode::ViInsert,
            keymap_names::VICMD => EditMode::ViCommand,
            keymap_names::VIOPP => EditMode::ViOperatorPending,
            keymap_names::VISUAL => EditMode::Visual,
            keymap_names::MENU => EditMode::Menu,
            _ => return None,
        })
    }

    /// Name of the keymap this mode is known by.
    #[must_use]
    pub fn keymap_name(self) -> &'static str { self.keymap_layers()[0] }
}

/// Holds the current mode, the mode that `menu` returns to, and the vi operator
/// waiting for a motion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModeController {
    mode: EditMode,
    /// Where to go back to when the completion menu closes.
    before_menu: Option<EditMode>,
    pub pending_operator: Option<PendingOperator>,
}

impl ModeController {
    #[must_use]
    pub fn new(mode: EditMode) -> Self {
        Self {
            mode,
            before_menu: None,
            pending_operator: None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> EditMode { self.mode }

    /// Switch mode. Leaving operator pending mode drops the pending operator; entering
    /// the menu remembers where to return.
    pub fn set_mode(&mut self, mode: EditMode) {
        if mode == self.mode {
            return;
        }
        if mode == EditMode::Menu {
            self.before_menu = Some(self.mode);
        }
        if mode != EditMode::ViOperatorPending {
            self.pending_operator = None;
        }
        tracing::debug!(message = "mode transition", from = %self.mode, to = %mode);
        self.mode = mode;
    }

    /// Leave the menu for the mode it was entered from.
    pub fn exit_menu(&mut self) {
        if self.mode == EditMode::Menu {
            let back = self.before_menu.take().unwrap_or_default();
            self.set_mode(back);
        }
    }

    /// The mode the menu returns to, or the current mode outside of the menu.
    #[must_use]
    pub fn base_mode(&self) -> EditMode {
        match self.mode {
            EditMode::Menu => self.before_menu.unwrap_or_default(),
            other => other,
        }
    }

    /// Start waiting for a motion.
    pub fn begin_operator(&mut self, pending: PendingOperator) {
        self.set_mode(EditMode::ViOperatorPending);
        self.pending_operator = Some(pending);
    }

    /// Take the pending operator and go back to vi command mode.
    pub fn finish_operator(&mut self) -> Option<PendingOperator> {
        let pending = self.pending_operator.take();
        self.set_mode(EditMode::ViCommand);
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ViOperator;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_menu_returns_to_previous_mode() {
        let mut controller = ModeController::new(EditMode::ViInsert);
        controller.set_mode(EditMode::Menu);
        assert_eq!(controller.base_mode(), EditMode::ViInsert);
        controller.exit_menu();
        assert_eq!(controller.mode(), EditMode::ViInsert);
    }

    #[test]
    fn test_leaving_operator_pending_drops_operator() {
        let mut controller = ModeController::new(EditMode::ViCommand);
        controller.begin_operator(PendingOperator {
            operator: ViOperator::Delete,
            start: 3,
            count: 1,
            register: None,
        });
        assert_eq!(controller.mode(), EditMode::ViOperatorPending);
        controller.set_mode(EditMode::ViCommand);
        assert_eq!(controller.pending_operator, None);
    }

    #[test]
    fn test_layers() {
        assert_eq!(EditMode::Visual.keymap_layers(), &["visual", "vicmd"]);
        assert_eq!(EditMode::from_keymap_name("viins"), Some(EditMode::ViInsert));
        assert_eq!(EditMode::from_keymap_name("main"), None);
    }
}
