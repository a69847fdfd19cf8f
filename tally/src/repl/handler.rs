//! Applies a [`KeyAction`] to the REPL and its session.

use super::Repl;
use crate::clipboard::ClipboardSink;
use crate::repl::key_action::KeyAction;
use tally_core::{Action, Clock, Outcome, RebaseOutcome};
use tracing::debug;

pub fn handle_key_action<C: Clock, K: ClipboardSink>(repl: &mut Repl<C, K>, action: KeyAction) {
    match action {
        KeyAction::Increment(id) => {
            repl.session.dispatch(Action::Increment(id));
        }
        KeyAction::Decrement(id) => {
            repl.session.dispatch(Action::Decrement(id));
        }
        KeyAction::Clear(id) => {
            repl.session.dispatch(Action::Clear(id));
        }
        KeyAction::ClearAll => {
            repl.session.dispatch(Action::ClearAll);
        }
        KeyAction::Undo => match repl.session.dispatch(Action::Undo) {
            Outcome::NothingToUndo => repl.notify("Nothing to undo"),
            Outcome::HistoryExhausted => repl.notify("Undo history exhausted, start time cleared"),
            _ => {}
        },
        KeyAction::ResetLogAndCounters => {
            repl.session.dispatch(Action::ResetLogAndCounters);
            repl.notify("Log and counters cleared");
        }
        KeyAction::StartStream => {
            repl.session.dispatch(Action::StartStreamReset);
            repl.notify("Recording from stream start");
        }

        KeyAction::ToggleSelection(id) => repl.selection.toggle(id),
        KeyAction::CopySummary => {
            let summary = repl.summary();
            repl.copy_to_clipboard(&summary, "Copied summary");
        }
        KeyAction::CopyLog => {
            if repl.session.log().is_empty() {
                repl.notify("Log is empty");
            } else {
                let block = repl.session.log().export();
                repl.copy_to_clipboard(&block, "Copied log");
            }
        }

        KeyAction::EditStartTime => repl.editing_time = true,
        KeyAction::FieldPrevious => repl.time_input.focus_previous(),
        KeyAction::FieldNext => repl.time_input.focus_next(),
        KeyAction::FieldUp => repl.time_input.step(1),
        KeyAction::FieldDown => repl.time_input.step(-1),
        KeyAction::FieldDigit(ch) => repl.time_input.push_digit(ch),
        KeyAction::FieldBackspace => repl.time_input.backspace(),
        KeyAction::ApplyStartTime => apply_start_time(repl),
        KeyAction::LeaveStartTime => repl.editing_time = false,

        KeyAction::ToggleHelp => repl.help_visible = !repl.help_visible,
        KeyAction::Quit => repl.should_quit = true,
        KeyAction::Unsupported => {}
    }
}

fn apply_start_time<C: Clock, K: ClipboardSink>(repl: &mut Repl<C, K>) {
    repl.time_input.normalize();
    let time = repl.time_input.reference_time();
    let origin = time.on_same_day(&repl.session.clock().now());
    debug!("apply start time {}", time);

    let outcome = repl.session.dispatch(Action::RebaseStartTime(origin));
    repl.editing_time = false;
    match outcome {
        Outcome::Rebased(RebaseOutcome::Bootstrapped) => {
            repl.notify(format!("Start time set to {time}"));
        }
        _ => repl.notify(format!("Log rebased to start time {time}")),
    }
}
