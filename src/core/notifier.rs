//! 옵저버 알림
//!
//! 레지스트리 변경과 단축키 핸들러 호출을 등록된 콜백에 알립니다.
//! 알림은 전용 워커 스레드에서 실행되므로 변경 호출은 콜백을 기다리지 않습니다.
//! 한 알림 안에서 콜백은 등록 순서대로 호출됩니다.

use crate::models::{CallbackEventKind, KeyboardShortcut, ShortcutNotification};
use parking_lot::{Mutex, RwLock};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;

pub type CallbackHandler = Arc<dyn Fn(CallbackEventKind, &[KeyboardShortcut]) + Send + Sync>;

#[derive(Default)]
pub struct CallbackNotifier {
    handlers: Arc<RwLock<Vec<CallbackHandler>>>,
    /// 워커 스레드 채널 (첫 알림 시 생성)
    sender: Mutex<Option<Sender<ShortcutNotification>>>,
}

impl CallbackNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 콜백 추가 (중복 제거 없음)
    pub fn register<F>(&self, handler: F)
    where
        F: Fn(CallbackEventKind, &[KeyboardShortcut]) + Send + Sync + 'static,
    {
        self.handlers.write().push(Arc::new(handler));
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn notify(&self, kind: CallbackEventKind, shortcuts: Vec<KeyboardShortcut>) {
        if self.handlers.read().is_empty() {
            return;
        }

        let mut sender = self.sender.lock();
        if sender.is_none() {
            *sender = self.spawn_worker();
        }
        let Some(tx) = sender.as_ref() else {
            return;
        };
        if tx.send(ShortcutNotification { kind, shortcuts }).is_err() {
            tracing::warn!(?kind, "notifier worker is gone, notification dropped");
            *sender = None;
        }
    }

    fn spawn_worker(&self) -> Option<Sender<ShortcutNotification>> {
        let (tx, rx) = mpsc::channel::<ShortcutNotification>();
        let handlers = Arc::clone(&self.handlers);

        let spawned = thread::Builder::new()
            .name("ksm-notifier".to_string())
            .spawn(move || {
                for notification in rx {
                    // 콜백 안에서 register 해도 막히지 않도록 목록을 복사해서 호출
                    let current: Vec<CallbackHandler> = handlers.read().clone();
                    for handler in &current {
                        handler(notification.kind, &notification.shortcuts);
                    }
                }
            });

        match spawned {
            Ok(_) => Some(tx),
            Err(err) => {
                tracing::warn!(error = %err, "failed to spawn notifier worker");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KeymapValues;
    use std::sync::mpsc::Receiver;
    use std::time::Duration;

    fn recording_notifier() -> (CallbackNotifier, Receiver<(CallbackEventKind, Vec<String>)>) {
        let notifier = CallbackNotifier::new();
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        notifier.register(move |kind, shortcuts| {
            let ids: Vec<String> = shortcuts.iter().map(|s| s.id().to_string()).collect();
            let _ = tx.lock().send((kind, ids));
        });
        (notifier, rx)
    }

    #[test]
    fn test_notify_without_handlers_is_noop() {
        let notifier = CallbackNotifier::new();
        notifier.notify(CallbackEventKind::Registered, Vec::new());
        assert!(notifier.sender.lock().is_none());
    }

    #[test]
    fn test_notifications_delivered_in_order() {
        let (notifier, rx) = recording_notifier();
        let save = KeyboardShortcut::new("save", KeymapValues::list(["ctrl+s"]));
        let open = KeyboardShortcut::new("open", KeymapValues::list(["ctrl+o"]));

        notifier.notify(CallbackEventKind::Registered, vec![save.clone(), open]);
        notifier.notify(CallbackEventKind::UpdatedValue, vec![save]);

        let timeout = Duration::from_secs(2);
        assert_eq!(
            rx.recv_timeout(timeout).unwrap(),
            (
                CallbackEventKind::Registered,
                vec!["save".to_string(), "open".to_string()]
            )
        );
        assert_eq!(
            rx.recv_timeout(timeout).unwrap(),
            (CallbackEventKind::UpdatedValue, vec!["save".to_string()])
        );
    }

    #[test]
    fn test_every_handler_receives_each_notification() {
        let notifier = CallbackNotifier::new();
        let (tx, rx) = mpsc::channel();
        for name in ["first", "second"] {
            let tx = Mutex::new(tx.clone());
            notifier.register(move |kind, _| {
                let _ = tx.lock().send((name, kind));
            });
        }
        assert_eq!(notifier.handler_count(), 2);

        notifier.notify(CallbackEventKind::Deleted, Vec::new());
        let timeout = Duration::from_secs(2);
        assert_eq!(rx.recv_timeout(timeout).unwrap(), ("first", CallbackEventKind::Deleted));
        assert_eq!(rx.recv_timeout(timeout).unwrap(), ("second", CallbackEventKind::Deleted));
    }
}
