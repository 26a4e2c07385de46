//! User-visible failure reports
//!
//! Every asynchronous failure that the user should know about ends up here:
//! login handshakes that did not complete, fetches that failed, the SDK
//! never loading. `components::NoticeBanner` renders the list.

use dioxus::prelude::*;

/// Keep the banner short; oldest notices drop off first
const MAX_NOTICES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Login,
    Fetch,
    Action,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    last_id: u64,
}

impl NoticeBoard {
    pub fn push(&mut self, kind: NoticeKind, message: String) -> u64 {
        // Same failure twice in a row is one notice
        if let Some(last) = self.notices.last() {
            if last.kind == kind && last.message == message {
                return last.id;
            }
        }

        self.last_id += 1;
        self.notices.push(Notice { id: self.last_id, kind, message });
        if self.notices.len() > MAX_NOTICES {
            self.notices.remove(0);
        }
        self.last_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|notice| notice.id != id);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

pub static NOTICES: GlobalSignal<NoticeBoard> = Signal::global(NoticeBoard::default);

/// Log a failure and show it to the user
pub fn report(kind: NoticeKind, message: impl Into<String>) {
    let message = message.into();
    log::warn!("{:?} notice: {}", kind, message);
    NOTICES.write().push(kind, message);
}

pub fn dismiss(id: u64) {
    NOTICES.write().dismiss(id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_caps_and_dedups() {
        let mut board = NoticeBoard::default();
        let first = board.push(NoticeKind::Fetch, "a".to_string());
        assert_eq!(board.push(NoticeKind::Fetch, "a".to_string()), first);
        board.push(NoticeKind::Fetch, "b".to_string());
        board.push(NoticeKind::Login, "c".to_string());
        board.push(NoticeKind::Action, "d".to_string());

        let messages: Vec<&str> = board.notices().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_dismiss() {
        let mut board = NoticeBoard::default();
        let id = board.push(NoticeKind::Login, "nope".to_string());
        board.dismiss(id);
        assert!(board.notices().is_empty());
    }
}
