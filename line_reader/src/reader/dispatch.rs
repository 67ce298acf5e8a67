// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Running one binding: the widget itself plus everything around it (operator / motion
//! composition, the bell, the numeric argument, mode transitions, undo frames, and the
//! record of the last vi change).

use crate::{Binding, BufferSnapshot, EditMode, KeyPress, LineReader, MotionKind, PendingOperator, Unwind,
            ViOperator, WidgetName, WidgetRef, WidgetResult, apply_operator, call_builtin,
            next_mode};

/// What a binding asks for.
#[derive(Clone, Copy, Debug)]
enum Action<'a> {
    Widget(&'a WidgetRef),
    Insert(&'a str),
}

impl Action<'_> {
    fn builtin(&self) -> Option<WidgetName> {
        match self {
            Action::Widget(widget) => widget.builtin(),
            Action::Insert(_) => None,
        }
    }

    fn name(&self) -> &str {
        match self {
            Action::Widget(widget) => widget.name(),
            Action::Insert(_) => "<insert>",
        }
    }
}

impl LineReader {
    pub(crate) fn dispatch(&mut self, binding: &Binding) -> Result<(), Unwind> {
        match binding {
            Binding::Widget(widget) => self.run_action(Action::Widget(widget)),
            Binding::Insert(text) => self.run_action(Action::Insert(text)),
            Binding::Unbound => {
                self.run_action(Action::Widget(&WidgetRef::Builtin(WidgetName::UndefinedKey)))
            }
        }
    }

    /// A user widget under the name wins over the built-in.
    pub(crate) fn invoke(&mut self, widget: &WidgetRef) -> WidgetResult {
        if let Some(user_widget) = self.widgets.get(widget.name()) {
            return user_widget(self);
        }
        match widget.builtin() {
            Some(builtin) => call_builtin(self, builtin),
            None => {
                tracing::warn!(message = "widget not found", widget = widget.name());
                Ok(false)
            }
        }
    }

    /// Run a callback widget. Its result doesn't ring the bell.
    pub(crate) fn run_callback(&mut self, widget: WidgetName) -> Result<(), Unwind> {
        self.invoke(&WidgetRef::Builtin(widget)).map(|_| ())
    }

    fn run_action(&mut self, action: Action<'_>) -> Result<(), Unwind> {
        let builtin = action.builtin();
        let mode_before = self.state.mode.mode();
        let before = self.state.buffer.snapshot();
        if mode_before != EditMode::Menu {
            self.state.post = None;
        }
        tracing::debug!(
            message = "dispatch widget",
            widget = action.name(),
            mode = %mode_before,
            count = self.state.argument.count()
        );

        let succeeded = match action {
            Action::Insert(text) => self.insert_literal(text),
            Action::Widget(widget) if mode_before == EditMode::ViOperatorPending => {
                self.run_in_operator_pending(widget)?
            }
            Action::Widget(widget) => self.invoke(widget)?,
        };
        if !succeeded {
            self.beep()?;
        }

        if !self.state.argument.take_touched() {
            self.state.argument.clear();
        }

        if succeeded
            && let Some(widget) = builtin
            && let Some(next) = next_mode(mode_before, widget)
        {
            self.state.mode.set_mode(next);
        }
        let mode_after = self.state.mode.mode();
        if mode_before == EditMode::Visual && mode_after != EditMode::Visual {
            self.state.clear_region();
        }
        if mode_after == EditMode::ViCommand {
            self.clamp_vi_cursor();
        }

        let changed = before.chars != self.state.buffer.chars();
        self.record_undo(builtin, before, changed);
        self.update_last_widget(builtin);
        self.record_vi_change(builtin, mode_before, changed);

        if mode_before.keymap_name() != mode_after.keymap_name() {
            tracing::debug!(
                message = "keymap changed",
                from = mode_before.keymap_name(),
                to = mode_after.keymap_name()
            );
            self.run_callback(WidgetName::CallbackKeymap)?;
        }
        Ok(())
    }

    fn insert_literal(&mut self, text: &str) -> bool {
        let count = self.state.argument.count().max(1);
        for _ in 0..count {
            self.state.buffer.insert(text);
        }
        true
    }

    /// Only motions, arguments, register selection, a second operator, leaving the mode
    /// and `abort` (so `^C` still interrupts) work while an operator waits. Anything
    /// else cancels it.
    fn run_in_operator_pending(&mut self, widget: &WidgetRef) -> WidgetResult {
        let Some(builtin) = widget.builtin() else {
            return self.invoke(widget);
        };
        let digit_zero_is_count = builtin == WidgetName::ViDigitOrBeginningOfLine
            && self.state.argument.is_active();
        if builtin.vi_motion_kind().is_some() && !digit_zero_is_count {
            return self.apply_operator_motion(builtin);
        }
        if builtin == WidgetName::Abort {
            self.state.mode.finish_operator();
            return self.invoke(widget);
        }
        if builtin.is_argument()
            || builtin.vi_operator().is_some()
            || matches!(builtin, WidgetName::ViSetBuffer | WidgetName::ViCmdMode)
        {
            return self.invoke(widget);
        }
        tracing::debug!(message = "operator cancelled", widget = builtin.name());
        self.state.mode.finish_operator();
        Ok(false)
    }

    /// Run `motion` from where the operator was typed, then apply the operator to the
    /// span it covered.
    fn apply_operator_motion(&mut self, motion: WidgetName) -> WidgetResult {
        let Some(PendingOperator {
            operator,
            start,
            count,
            register,
        }) = self.state.mode.pending_operator
        else {
            return Ok(false);
        };
        self.state
            .argument
            .set_count(count.saturating_mul(self.state.argument.count()));

        let (motion, kind) = self.resolve_motion(operator, motion);
        self.state.buffer.set_cursor(start);
        let moved = call_builtin(self, motion)?;
        self.state.argument.clear();
        self.state.mode.finish_operator();

        let end = self.state.buffer.cursor();
        if !moved || (end == start && kind == MotionKind::Exclusive) {
            self.state.buffer.set_cursor(start);
            return Ok(false);
        }

        let (lo, hi) = (start.min(end), start.max(end));
        let range = match kind {
            MotionKind::Exclusive => lo..hi,
            // A newline under an inclusive motion's end is not taken.
            MotionKind::Inclusive => match self.state.buffer.char_at(hi) {
                Some(ch) if ch != '\n' => lo..hi + 1,
                _ => lo..hi,
            },
            MotionKind::Linewise => self.state.buffer.line_span(lo, hi),
        };
        self.state.vi.selected_register = register;
        apply_operator(self, operator, range, kind == MotionKind::Linewise)
    }

    /// `cw` acts like `ce`, and a repeated find takes its kind from the find it
    /// repeats.
    fn resolve_motion(&self, operator: ViOperator, motion: WidgetName) -> (WidgetName, MotionKind) {
        let on_blank = self
            .state
            .buffer
            .current_char()
            .is_none_or(char::is_whitespace);
        let motion = match motion {
            WidgetName::ViForwardWord if operator == ViOperator::Change && !on_blank => {
                WidgetName::ViForwardWordEnd
            }
            WidgetName::ViForwardBlankWord if operator == ViOperator::Change && !on_blank => {
                WidgetName::ViForwardBlankWordEnd
            }
            other => other,
        };
        let kind = match (motion, self.state.vi.last_find) {
            (WidgetName::ViRepeatFind, Some(find)) if find.forward => MotionKind::Inclusive,
            (WidgetName::ViRevRepeatFind, Some(find)) if !find.forward => MotionKind::Inclusive,
            (WidgetName::ViRepeatFind | WidgetName::ViRevRepeatFind, _) => MotionKind::Exclusive,
            _ => motion.vi_motion_kind().unwrap_or(MotionKind::Exclusive),
        };
        (motion, kind)
    }

    /// In command mode the cursor sits on a char, never past the end of the line.
    fn clamp_vi_cursor(&mut self) {
        let buffer = &mut self.state.buffer;
        let cursor = buffer.cursor();
        if cursor > buffer.line_start(cursor) && cursor == buffer.line_end(cursor) {
            buffer.set_cursor(cursor - 1);
        }
    }

    fn record_undo(&mut self, builtin: Option<WidgetName>, before: BufferSnapshot, changed: bool) {
        if builtin.is_some_and(WidgetName::skips_undo_recording) {
            return;
        }
        let is_insert = builtin.is_some_and(WidgetName::is_self_insert);
        match (changed, is_insert) {
            (true, true) => {
                let inserted = self
                    .state
                    .keys
                    .last()
                    .and_then(KeyPress::insertable_char);
                self.state.undo.record_insert(before, inserted);
            }
            (true, false) => self.state.undo.record(before),
            (false, false) => self.state.undo.split(),
            (false, true) => {}
        }
    }

    fn update_last_widget(&mut self, builtin: Option<WidgetName>) {
        let state = &mut self.state;
        if !builtin.is_some_and(WidgetName::is_yank) {
            state.yanked = None;
        }
        if builtin != Some(WidgetName::InsertLastWord) {
            state.insert_last_word = None;
        }
        if !matches!(
            builtin,
            Some(
                WidgetName::HistorySearchBackward
                    | WidgetName::HistorySearchForward
                    | WidgetName::HistoryBeginningSearchBackward
                    | WidgetName::HistoryBeginningSearchForward
                    | WidgetName::UpLineOrSearch
                    | WidgetName::DownLineOrSearch
            )
        ) {
            state.history_search_prefix = None;
        }
        if !builtin.is_some_and(|it| it.is_self_insert() || it.is_completion()) {
            state.completion_suffix = None;
        }
        if !builtin.is_some_and(WidgetName::is_argument) {
            state.last_widget = builtin;
        }
    }

    /// Keep the keys of the last change made from vi command mode, for `.`.
    fn record_vi_change(&mut self, builtin: Option<WidgetName>, mode_before: EditMode, changed: bool) {
        if builtin == Some(WidgetName::ViRepeatChange) {
            return;
        }
        let mode_after = self.state.mode.mode();
        let keys = self.state.keys.clone();
        let vi = &mut self.state.vi;

        if let Some(recording) = &mut vi.recording {
            recording.extend(keys);
            if mode_after == EditMode::ViCommand {
                vi.last_change = vi.recording.take();
            }
            return;
        }
        if mode_before != EditMode::ViCommand {
            return;
        }
        if builtin.is_some_and(WidgetName::is_argument) {
            vi.argument_keys.extend(keys);
            return;
        }

        let starts_change = !builtin.is_some_and(WidgetName::skips_undo_recording)
            && (changed
                || matches!(mode_after, EditMode::ViInsert | EditMode::ViOperatorPending));
        let argument_keys = std::mem::take(&mut vi.argument_keys);
        if !starts_change {
            return;
        }
        let mut recording = argument_keys;
        recording.extend(keys);
        if mode_after == EditMode::ViCommand {
            vi.last_change = Some(recording);
        } else {
            vi.recording = Some(recording);
        }
    }
}
