//! Keybinding definitions for the TUI.
//!
//! Page-level actions are generic; each page decides what `Start` or `Send`
//! means for its rows. Text entry (search, forms) bypasses this map.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextView,
    PrevView,
    SwitchView(usize),
    MoveUp,
    MoveDown,
    /// Previous sub-tab within a page.
    MoveLeft,
    /// Next sub-tab within a page.
    MoveRight,
    ToggleRow,
    SelectAll,
    PrevPage,
    NextPage,
    OpenSearch,
    OpenFilters,
    OpenHelp,
    Confirm,
    EditItem,
    NewItem,
    DeleteSelected,
    RetrySelected,
    Start,
    Pause,
    Resume,
    RunNow,
    Restart,
    Send,
    Sync,
    TestEmail,
    Export,
    Refresh,
    Cancel,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Cancel),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char('/') => Some(Action::OpenSearch),
        KeyCode::Char('f') => Some(Action::OpenFilters),
        KeyCode::Char('n') => Some(Action::NewItem),
        KeyCode::Char('e') => Some(Action::EditItem),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteSelected),
        KeyCode::Char('r') => Some(Action::RetrySelected),
        KeyCode::Char('s') => Some(Action::Start),
        KeyCode::Char('p') => Some(Action::Pause),
        KeyCode::Char('u') => Some(Action::Resume),
        KeyCode::Char('x') => Some(Action::RunNow),
        KeyCode::Char('R') => Some(Action::Restart),
        KeyCode::Char('S') => Some(Action::Send),
        KeyCode::Char('y') => Some(Action::Sync),
        KeyCode::Char('t') => Some(Action::TestEmail),
        KeyCode::Char('E') => Some(Action::Export),
        KeyCode::Char('a') => Some(Action::SelectAll),
        KeyCode::Char(' ') => Some(Action::ToggleRow),
        KeyCode::Char('[') | KeyCode::PageUp => Some(Action::PrevPage),
        KeyCode::Char(']') | KeyCode::PageDown => Some(Action::NextPage),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextView),
        KeyCode::BackTab => Some(Action::PrevView),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveRight),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let idx = match c {
                '0' => 9,
                d => d.to_digit(10)? as usize - 1,
            };
            Some(Action::SwitchView(idx))
        }
        _ => None,
    }
}

/// One-line hints for the footer, per page.
pub fn hints(view: crate::nav::View) -> &'static str {
    use crate::nav::View;
    match view {
        View::Dashboard => "Tab pages  Ctrl-r refresh  ? help  q quit",
        View::Companies => {
            "/ search  f filter  space select  a all  Enter detail  e edit  n fetch  d delete  E export"
        }
        View::Campaigns => "Enter detail  n generate  s start now  S send batch  space select  d delete",
        View::Messages => {
            "/ search  f filter  space select  a all  S send  r retry  d delete  E export"
        }
        View::Leads => "h/l tabs  f source  [ ] page  E export",
        View::Automation => {
            "n new  e edit  s start  p pause  u resume  x run now  R restart  d delete"
        }
        View::Products => {
            "/ search  Enter focus  h/l tabs  f active/intent  n new/generate  e edit  d delete  S fetch clients"
        }
        View::Templates => "f type  n new  e edit  d delete  y sync",
        View::Settings => "h/l tabs  e edit  t test email  n set key",
        View::Analytics => "h/l period  Ctrl-r refresh",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_switch_views() {
        assert_eq!(map_key(key(KeyCode::Char('1'))), Some(Action::SwitchView(0)));
        assert_eq!(map_key(key(KeyCode::Char('9'))), Some(Action::SwitchView(8)));
        assert_eq!(map_key(key(KeyCode::Char('0'))), Some(Action::SwitchView(9)));
    }

    #[test]
    fn test_ctrl_r_refreshes_and_plain_r_retries() {
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_r), Some(Action::Refresh));
        assert_eq!(map_key(key(KeyCode::Char('r'))), Some(Action::RetrySelected));
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        assert_eq!(map_key(key(KeyCode::Char('z'))), None);
        assert_eq!(map_key(key(KeyCode::F(5))), None);
    }

    #[test]
    fn test_every_view_has_hints() {
        for view in crate::nav::View::all() {
            assert!(!hints(*view).is_empty());
        }
    }
}
