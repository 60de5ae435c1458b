use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use tokio::sync::{mpsc, watch};

use crate::app::Action;
use crate::sync::TicketsSnapshot;

pub async fn run_event_loop(tx: mpsc::UnboundedSender<Action>) {
    let mut reader = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = tick.tick() => {
                if tx.send(Action::Tick).is_err() {
                    break;
                }
            }
            maybe_event = reader.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if let Some(action) = key_to_action(key) {
                            if tx.send(action).is_err() {
                                break;
                            }
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        if tx.send(Action::Tick).is_err() {
                            break;
                        }
                    }
                    Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }
}

/// Push every published ticket snapshot into the action channel.
pub async fn forward_snapshots(
    mut rx: watch::Receiver<TicketsSnapshot>,
    tx: mpsc::UnboundedSender<Action>,
) {
    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow_and_update().clone();
        if tx.send(Action::Snapshot(snapshot)).is_err() {
            break;
        }
    }
}

fn key_to_action(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Key(KeyAction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Key(KeyAction::Down)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('r') => Some(Action::Key(KeyAction::Refresh)),
        KeyCode::Char('a') => Some(Action::Key(KeyAction::ToggleClosed)),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Up,
    Down,
    Refresh,
    ToggleClosed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_navigation_and_refresh() {
        assert!(matches!(
            key_to_action(key(KeyCode::Char('r'))),
            Some(Action::Key(KeyAction::Refresh))
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::Char('j'))),
            Some(Action::Key(KeyAction::Down))
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::Up)),
            Some(Action::Key(KeyAction::Up))
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::Char('a'))),
            Some(Action::Key(KeyAction::ToggleClosed))
        ));
        assert!(key_to_action(key(KeyCode::Char('z'))).is_none());
    }

    #[test]
    fn ctrl_c_quits() {
        let mut event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        event.kind = KeyEventKind::Press;
        assert!(matches!(key_to_action(event), Some(Action::Quit)));
    }

    #[tokio::test]
    async fn snapshots_are_forwarded_as_actions() {
        let (state, rx) = watch::channel(TicketsSnapshot::default());
        let (tx, mut actions) = mpsc::unbounded_channel();
        let forwarder = tokio::spawn(forward_snapshots(rx, tx));

        state.send_modify(|s| s.error = Some("boom".into()));
        match actions.recv().await {
            Some(Action::Snapshot(snap)) => assert_eq!(snap.error.as_deref(), Some("boom")),
            other => panic!("unexpected action: {other:?}"),
        }

        drop(state);
        forwarder.await.unwrap();
    }
}
