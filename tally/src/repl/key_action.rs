//! キー入力アクションの定義と純粋なマッピング関数
//!
//! キー入力と操作の対応を副作用のない関数に分離し、端末なしでテストできるようにする。

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tally_core::CounterId;

const NONE: KeyModifiers = KeyModifiers::NONE;
const CTRL: KeyModifiers = KeyModifiers::CONTROL;
const SHIFT: KeyModifiers = KeyModifiers::SHIFT;

/// キー入力に対応するアクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    // カウンター操作
    Increment(CounterId),
    Decrement(CounterId),
    Clear(CounterId),
    ClearAll,
    Undo,

    // ログ操作
    ResetLogAndCounters,
    StartStream,

    // サマリー・クリップボード
    ToggleSelection(CounterId),
    CopySummary,
    CopyLog,

    // 開始時刻入力
    EditStartTime,
    FieldPrevious,
    FieldNext,
    FieldUp,
    FieldDown,
    FieldDigit(char),
    FieldBackspace,
    ApplyStartTime,
    LeaveStartTime,

    // その他
    ToggleHelp,
    Quit,

    // 無視
    Unsupported,
}

/// キー入力時のコンテキスト
#[derive(Debug, Clone, Default)]
pub struct KeyContext {
    /// 開始時刻を編集中か
    pub editing_time: bool,
    /// ヘルプを表示中か
    pub help_visible: bool,
}

/// キー入力からアクションを決定（純粋関数）
pub fn determine_key_action(key: &KeyEvent, ctx: &KeyContext) -> KeyAction {
    // Ctrl+C はどのモードでも終了
    if let (KeyCode::Char('c'), CTRL) = (key.code, key.modifiers) {
        return KeyAction::Quit;
    }
    if ctx.editing_time {
        return determine_time_input_action(key);
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char(ch), NONE) => counter_action(ch)
            .or_else(|| selection_action(ch))
            .unwrap_or(match ch {
                'h' | 'g' => KeyAction::ClearAll,
                'b' | 'n' => KeyAction::Undo,
                '?' => KeyAction::ToggleHelp,
                _ => KeyAction::Unsupported,
            }),
        (KeyCode::Char('?'), SHIFT) => KeyAction::ToggleHelp,

        (KeyCode::Enter, NONE) => KeyAction::CopySummary,
        (KeyCode::Char('y'), CTRL) => KeyAction::CopyLog,
        (KeyCode::Char('x'), CTRL) => KeyAction::ResetLogAndCounters,
        (KeyCode::Char('s'), CTRL) => KeyAction::StartStream,
        (KeyCode::Tab, NONE) => KeyAction::EditStartTime,

        // Esc: ヘルプ表示中は閉じる
        (KeyCode::Esc, _) if ctx.help_visible => KeyAction::ToggleHelp,
        (KeyCode::Esc, _) => KeyAction::Quit,

        _ => KeyAction::Unsupported,
    }
}

fn determine_time_input_action(key: &KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        (KeyCode::Left, _) => KeyAction::FieldPrevious,
        (KeyCode::Right, _) => KeyAction::FieldNext,
        (KeyCode::Up, _) => KeyAction::FieldUp,
        (KeyCode::Down, _) => KeyAction::FieldDown,
        (KeyCode::Char(ch), NONE) if ch.is_ascii_digit() => KeyAction::FieldDigit(ch),
        (KeyCode::Backspace, _) => KeyAction::FieldBackspace,
        (KeyCode::Enter, _) => KeyAction::ApplyStartTime,
        (KeyCode::Esc, _) | (KeyCode::Tab, _) => KeyAction::LeaveStartTime,
        _ => KeyAction::Unsupported,
    }
}

/// 左手・右手どちらのホームポジションからも押せるように各操作に2キーずつ割り当てる
fn counter_action(ch: char) -> Option<KeyAction> {
    let action = match ch {
        'j' | 'f' => KeyAction::Increment(CounterId::Cold),
        'm' | 'v' => KeyAction::Decrement(CounterId::Cold),
        'u' | 'r' => KeyAction::Clear(CounterId::Cold),

        'k' | 'd' => KeyAction::Increment(CounterId::Shock),
        ',' | 'c' => KeyAction::Decrement(CounterId::Shock),
        'i' | 'e' => KeyAction::Clear(CounterId::Shock),

        'l' | 's' => KeyAction::Increment(CounterId::Hot),
        '.' | 'x' => KeyAction::Decrement(CounterId::Hot),
        'o' | 'w' => KeyAction::Clear(CounterId::Hot),

        ';' | 'a' => KeyAction::Increment(CounterId::Herb),
        '/' | 'z' => KeyAction::Decrement(CounterId::Herb),
        'p' | 'q' => KeyAction::Clear(CounterId::Herb),

        _ => return None,
    };
    Some(action)
}

/// 数字キーはテンキー側と左右対称に並べている
fn selection_action(ch: char) -> Option<KeyAction> {
    let id = match ch {
        '4' | '7' => CounterId::Cold,
        '3' | '8' => CounterId::Shock,
        '2' | '9' => CounterId::Hot,
        '1' | '0' => CounterId::Herb,
        _ => return None,
    };
    Some(KeyAction::ToggleSelection(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn ctx_default() -> KeyContext {
        KeyContext {
            editing_time: false,
            help_visible: false,
        }
    }

    fn ctx_editing() -> KeyContext {
        KeyContext {
            editing_time: true,
            ..ctx_default()
        }
    }

    fn action_for(ch: char) -> KeyAction {
        determine_key_action(&key(KeyCode::Char(ch), NONE), &ctx_default())
    }

    // === カウンター操作テスト ===

    #[test]
    fn test_increment_keys() {
        for (keys, id) in [
            (['j', 'f'], CounterId::Cold),
            (['k', 'd'], CounterId::Shock),
            (['l', 's'], CounterId::Hot),
            ([';', 'a'], CounterId::Herb),
        ] {
            for ch in keys {
                assert_eq!(action_for(ch), KeyAction::Increment(id), "key {ch}");
            }
        }
    }

    #[test]
    fn test_decrement_keys() {
        for (keys, id) in [
            (['m', 'v'], CounterId::Cold),
            ([',', 'c'], CounterId::Shock),
            (['.', 'x'], CounterId::Hot),
            (['/', 'z'], CounterId::Herb),
        ] {
            for ch in keys {
                assert_eq!(action_for(ch), KeyAction::Decrement(id), "key {ch}");
            }
        }
    }

    #[test]
    fn test_clear_keys() {
        for (keys, id) in [
            (['u', 'r'], CounterId::Cold),
            (['i', 'e'], CounterId::Shock),
            (['o', 'w'], CounterId::Hot),
            (['p', 'q'], CounterId::Herb),
        ] {
            for ch in keys {
                assert_eq!(action_for(ch), KeyAction::Clear(id), "key {ch}");
            }
        }
    }

    #[test]
    fn test_clear_all_and_undo() {
        assert_eq!(action_for('h'), KeyAction::ClearAll);
        assert_eq!(action_for('g'), KeyAction::ClearAll);
        assert_eq!(action_for('b'), KeyAction::Undo);
        assert_eq!(action_for('n'), KeyAction::Undo);
    }

    #[test]
    fn test_selection_digits() {
        assert_eq!(action_for('4'), KeyAction::ToggleSelection(CounterId::Cold));
        assert_eq!(action_for('7'), KeyAction::ToggleSelection(CounterId::Cold));
        assert_eq!(action_for('3'), KeyAction::ToggleSelection(CounterId::Shock));
        assert_eq!(action_for('8'), KeyAction::ToggleSelection(CounterId::Shock));
        assert_eq!(action_for('2'), KeyAction::ToggleSelection(CounterId::Hot));
        assert_eq!(action_for('9'), KeyAction::ToggleSelection(CounterId::Hot));
        assert_eq!(action_for('1'), KeyAction::ToggleSelection(CounterId::Herb));
        assert_eq!(action_for('0'), KeyAction::ToggleSelection(CounterId::Herb));
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        assert_eq!(action_for('t'), KeyAction::Unsupported);
        assert_eq!(action_for('5'), KeyAction::Unsupported);
        let upper = key(KeyCode::Char('J'), SHIFT);
        assert_eq!(
            determine_key_action(&upper, &ctx_default()),
            KeyAction::Unsupported
        );
    }

    // === ログ・クリップボード ===

    #[test]
    fn test_control_keys() {
        let ctx = ctx_default();
        assert_eq!(
            determine_key_action(&key(KeyCode::Char('x'), CTRL), &ctx),
            KeyAction::ResetLogAndCounters
        );
        assert_eq!(
            determine_key_action(&key(KeyCode::Char('s'), CTRL), &ctx),
            KeyAction::StartStream
        );
        assert_eq!(
            determine_key_action(&key(KeyCode::Char('y'), CTRL), &ctx),
            KeyAction::CopyLog
        );
        assert_eq!(
            determine_key_action(&key(KeyCode::Enter, NONE), &ctx),
            KeyAction::CopySummary
        );
        assert_eq!(
            determine_key_action(&key(KeyCode::Tab, NONE), &ctx),
            KeyAction::EditStartTime
        );
    }

    #[test]
    fn test_quit_and_help() {
        let ctx = ctx_default();
        assert_eq!(
            determine_key_action(&key(KeyCode::Esc, NONE), &ctx),
            KeyAction::Quit
        );
        assert_eq!(
            determine_key_action(&key(KeyCode::Char('c'), CTRL), &ctx),
            KeyAction::Quit
        );
        assert_eq!(
            determine_key_action(&key(KeyCode::Char('?'), SHIFT), &ctx),
            KeyAction::ToggleHelp
        );

        let help = KeyContext {
            help_visible: true,
            ..ctx_default()
        };
        assert_eq!(
            determine_key_action(&key(KeyCode::Esc, NONE), &help),
            KeyAction::ToggleHelp
        );
        // カウンター操作はヘルプ表示中も有効
        assert_eq!(
            determine_key_action(&key(KeyCode::Char('j'), NONE), &help),
            KeyAction::Increment(CounterId::Cold)
        );
    }

    // === 開始時刻入力モード ===

    #[test]
    fn test_time_input_navigation() {
        let ctx = ctx_editing();
        assert_eq!(
            determine_key_action(&key(KeyCode::Left, NONE), &ctx),
            KeyAction::FieldPrevious
        );
        assert_eq!(
            determine_key_action(&key(KeyCode::Right, NONE), &ctx),
            KeyAction::FieldNext
        );
        assert_eq!(
            determine_key_action(&key(KeyCode::Up, NONE), &ctx),
            KeyAction::FieldUp
        );
        assert_eq!(
            determine_key_action(&key(KeyCode::Down, NONE), &ctx),
            KeyAction::FieldDown
        );
        assert_eq!(
            determine_key_action(&key(KeyCode::Enter, NONE), &ctx),
            KeyAction::ApplyStartTime
        );
        assert_eq!(
            determine_key_action(&key(KeyCode::Esc, NONE), &ctx),
            KeyAction::LeaveStartTime
        );
        assert_eq!(
            determine_key_action(&key(KeyCode::Tab, NONE), &ctx),
            KeyAction::LeaveStartTime
        );
    }

    #[test]
    fn test_time_input_captures_digits_and_letters() {
        let ctx = ctx_editing();
        assert_eq!(
            determine_key_action(&key(KeyCode::Char('7'), NONE), &ctx),
            KeyAction::FieldDigit('7')
        );
        assert_eq!(
            determine_key_action(&key(KeyCode::Backspace, NONE), &ctx),
            KeyAction::FieldBackspace
        );
        // 編集中はカウンターキーを無視する
        assert_eq!(
            determine_key_action(&key(KeyCode::Char('j'), NONE), &ctx),
            KeyAction::Unsupported
        );
        assert_eq!(
            determine_key_action(&key(KeyCode::Char('c'), CTRL), &ctx),
            KeyAction::Quit
        );
    }
}
