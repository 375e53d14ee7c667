use crate::ui::components::command_bar::CommandHint;
use crate::ui::Theme;
use anyhow::Context;
use chrono::{DateTime, Local};
use ksm::{
    CallbackEventKind, HandleOptions, KeyPress, KeyboardShortcut, KeymapMode, KeymapValues,
    ShortcutConfigFile, ShortcutHandlers, ShortcutManager, ShortcutValueUpdate,
};
use parking_lot::Mutex;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::{Duration, Instant};


// 플레이그라운드 자체 액션
pub const QUIT: &str = "quit";
pub const TOGGLE_SEQUENCE_MODE: &str = "toggle_sequence_mode";
pub const CYCLE_SCOPE: &str = "cycle_scope";
pub const RESET_ALL: &str = "reset_all";
pub const REBIND_SAVE: &str = "rebind_save";

/// 플레이그라운드 액션이 속한 스코프 (모든 스코프 조회에 함께 포함)
pub const APP_SCOPE: &str = "app";

const SAVE: &str = "save";
const SAVE_ALTERNATE_KEY: &str = "ctrl+shift+s";
const MAX_LOG_ENTRIES: usize = 200;
const MESSAGE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// 단축키 핸들러 호출
    Invoked,
    /// 레지스트리 변경 알림
    Notification,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub kind: LogKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppCommand {
    Quit,
    ToggleSequenceMode,
    CycleScope,
    ResetAll,
    RebindSave,
    /// 설정 파일/데모 액션 (로그만 남김)
    Custom,
}

impl AppCommand {
    fn from_action_id(user_action_id: &str) -> Self {
        match user_action_id {
            QUIT => AppCommand::Quit,
            TOGGLE_SEQUENCE_MODE => AppCommand::ToggleSequenceMode,
            CYCLE_SCOPE => AppCommand::CycleScope,
            RESET_ALL => AppCommand::ResetAll,
            REBIND_SAVE => AppCommand::RebindSave,
            _ => AppCommand::Custom,
        }
    }
}

/// 플레이그라운드 액션 목록
pub fn builtin_shortcuts() -> Vec<KeyboardShortcut> {
    vec![
        KeyboardShortcut::new(QUIT, KeymapValues::list(["q", "ctrl+c"]))
            .scopes([APP_SCOPE])
            .overridable(false)
            .label("Quit"),
        KeyboardShortcut::new(TOGGLE_SEQUENCE_MODE, KeymapValues::list(["ctrl+t"]))
            .scopes([APP_SCOPE])
            .label("Sequence"),
        KeyboardShortcut::new(CYCLE_SCOPE, KeymapValues::list(["ctrl+o"]))
            .scopes([APP_SCOPE])
            .label("Scope"),
        KeyboardShortcut::new(REBIND_SAVE, KeymapValues::list(["ctrl+b"]))
            .scopes([APP_SCOPE])
            .label("Rebind save"),
        KeyboardShortcut::new(RESET_ALL, KeymapValues::list(["ctrl+r"]))
            .scopes([APP_SCOPE])
            .label("Reset"),
    ]
}

/// 설정 파일이 없을 때 쓰는 데모 단축키
pub fn demo_shortcuts() -> Vec<KeyboardShortcut> {
    vec![
        KeyboardShortcut::new(SAVE, KeymapValues::list(["ctrl+s"]))
            .scopes(["editor"])
            .label("Save")
            .category("Editor"),
        KeyboardShortcut::new("delete_char", KeymapValues::list(["x"]))
            .scopes(["editor"])
            .label("Delete char")
            .category("Editor"),
        KeyboardShortcut::new(
            "go_top",
            KeymapValues::modes([(KeymapMode::SequenceModeOnly, "g g")]),
        )
        .scopes(["list"])
        .label("Go to top")
        .category("List"),
        KeyboardShortcut::new("go_bottom", KeymapValues::list(["shift+g"]))
            .scopes(["list"])
            .label("Go to bottom")
            .category("List"),
        KeyboardShortcut::new(
            "find",
            KeymapValues::modes([
                (KeymapMode::WindowsOnly, "ctrl+f"),
                (KeymapMode::MacintoshOnly, "meta+f"),
                (KeymapMode::Always, "/"),
            ]),
        )
        .label("Find"),
        KeyboardShortcut::new("close_modal", KeymapValues::list(["esc"]))
            .scopes(["modal"])
            .label("Close"),
    ]
}

fn notification_label(kind: CallbackEventKind) -> &'static str {
    match kind {
        CallbackEventKind::Registered => "registered",
        CallbackEventKind::UpdatedValue => "updated",
        CallbackEventKind::CalledShortcutHandler => "called",
        CallbackEventKind::Deleted => "deleted",
        CallbackEventKind::ResetValue => "reset",
    }
}

/// 앱 상태
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    pub theme: Theme,
    manager: Arc<ShortcutManager>,
    /// 옵저버 알림 (워커 스레드 → 메인 루프)
    notifications: Receiver<(CallbackEventKind, Vec<String>)>,
    /// 순환 가능한 스코프 (등록 순서)
    scopes: Vec<String>,
    /// None이면 전체 (기본 스코프)
    active_scope: Option<usize>,
    log: VecDeque<LogEntry>,
    last_fired: Option<String>,
    /// 상태바 메시지 (3초 후 자동 소멸)
    message: Option<(String, Instant)>,
}

impl App {
    pub fn new() -> anyhow::Result<Self> {
        let mut app = Self::with_manager(Arc::new(ShortcutManager::new()))
            .context("failed to register built-in shortcuts")?;

        match ShortcutConfigFile::load_default().context("failed to load shortcut config")? {
            Some(config) => config
                .apply_to(&app.manager)
                .context("failed to apply shortcut config")?,
            None => app.load_demo_shortcuts()?,
        }
        app.refresh_scopes();
        Ok(app)
    }

    fn with_manager(manager: Arc<ShortcutManager>) -> ksm::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        manager.register_callback(move |kind, shortcuts| {
            let ids: Vec<String> = shortcuts.iter().map(|s| s.id().to_string()).collect();
            let _ = tx.lock().send((kind, ids));
        });
        manager.register_shortcuts(&builtin_shortcuts())?;

        Ok(Self {
            should_quit: false,
            theme: Theme::default(),
            manager,
            notifications: rx,
            scopes: Vec::new(),
            active_scope: None,
            log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            last_fired: None,
            message: None,
        })
    }

    fn load_demo_shortcuts(&mut self) -> anyhow::Result<()> {
        self.manager
            .register_shortcuts(&demo_shortcuts())
            .context("failed to register demo shortcuts")?;
        self.manager.set_sequence_mode(true, None);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(platform: ksm::Platform) -> Self {
        let manager = Arc::new(ShortcutManager::with_platform(platform));
        let mut app = Self::with_manager(manager).unwrap();
        app.load_demo_shortcuts().unwrap();
        app.refresh_scopes();
        app
    }

    #[cfg(test)]
    pub(crate) fn manager(&self) -> &ShortcutManager {
        &self.manager
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // === 키 입력 ===

    /// 키 입력을 관리자로 보내고 호출된 단축키를 반환
    pub fn handle_key(&mut self, mut event: KeyPress) -> Option<KeyboardShortcut> {
        let lookup_scopes = self.lookup_scopes();
        let requested: RefCell<Vec<AppCommand>> = RefCell::new(Vec::new());

        let fired = {
            let mut handlers: ShortcutHandlers<'_> = HashMap::new();
            for shortcut in self.manager.get_all_shortcuts(None) {
                let command = AppCommand::from_action_id(shortcut.id());
                let requested = &requested;
                handlers.insert(
                    shortcut.id().to_string(),
                    Box::new(move |_: &KeyPress, _: &KeyboardShortcut| {
                        requested.borrow_mut().push(command)
                    }),
                );
            }
            self.manager.handle_keyboard_event(
                &mut event,
                &mut handlers,
                HandleOptions::scopes(&lookup_scopes),
            )
        };

        if let Some(shortcut) = &fired {
            self.record_invocation(shortcut);
        }
        for command in requested.into_inner() {
            self.execute(command);
        }
        fired
    }

    fn execute(&mut self, command: AppCommand) {
        match command {
            AppCommand::Quit => self.quit(),
            AppCommand::ToggleSequenceMode => self.toggle_sequence_mode(),
            AppCommand::CycleScope => self.cycle_scope(),
            AppCommand::ResetAll => self.reset_all(),
            AppCommand::RebindSave => self.rebind_save(),
            AppCommand::Custom => {}
        }
    }

    fn record_invocation(&mut self, shortcut: &KeyboardShortcut) {
        tracing::info!(user_action_id = shortcut.id(), "shortcut invoked");
        self.push_log(
            LogKind::Invoked,
            format!(
                "{} ({})",
                shortcut.display_label(),
                shortcut.keymap.values.display()
            ),
        );
        self.last_fired = Some(shortcut.id().to_string());
    }

    // === 액션 ===

    pub fn toggle_sequence_mode(&mut self) {
        let enabled = !self.manager.is_sequence_mode_enabled();
        self.manager.set_sequence_mode(enabled, None);
        self.show_message(if enabled {
            "sequence mode on"
        } else {
            "sequence mode off"
        });
    }

    /// 전체 → 스코프1 → 스코프2 → ... → 전체
    pub fn cycle_scope(&mut self) {
        self.active_scope = match self.active_scope {
            None if !self.scopes.is_empty() => Some(0),
            Some(index) if index + 1 < self.scopes.len() => Some(index + 1),
            _ => None,
        };
        self.manager.clear_sequence();
        let message = format!("scope: {}", self.scope_label());
        self.show_message(&message);
    }

    pub fn reset_all(&mut self) {
        self.manager.reset_all_shortcuts_to_default_value(None);
        self.show_message("all shortcuts reset to defaults");
    }

    /// save 단축키를 기본값과 대체 키 사이에서 전환
    pub fn rebind_save(&mut self) {
        let Some(save) = self.manager.get_shortcut(SAVE) else {
            self.show_message("no 'save' shortcut registered");
            return;
        };
        let alternate = KeymapValues::list([SAVE_ALTERNATE_KEY]);
        let next: Vec<String> = if save.keymap.values == alternate {
            let defaults = save.keymap.default_values.entries();
            defaults.iter().map(|(_, combo)| combo.to_string()).collect()
        } else {
            vec![SAVE_ALTERNATE_KEY.to_string()]
        };

        match self
            .manager
            .update_shortcut_value(&ShortcutValueUpdate::new(SAVE, next))
        {
            Ok(()) => self.show_message("save rebound"),
            Err(err) => {
                tracing::warn!(error = %err, "rebind failed");
                let message = err.to_string();
                self.show_message(&message);
            }
        }
    }

    // === 주기 처리 ===

    /// 알림 수집 + 메시지 만료
    pub fn tick(&mut self) {
        while let Ok((kind, ids)) = self.notifications.try_recv() {
            // 핸들러 호출은 handle_key에서 이미 기록
            if kind == CallbackEventKind::CalledShortcutHandler {
                continue;
            }
            let message = format!("{}: {}", notification_label(kind), ids.join(", "));
            self.push_log(LogKind::Notification, message);
            self.refresh_scopes();
        }

        if let Some((_, shown_at)) = &self.message {
            if shown_at.elapsed() >= MESSAGE_TTL {
                self.message = None;
            }
        }
    }

    fn push_log(&mut self, kind: LogKind, message: String) {
        if self.log.len() >= MAX_LOG_ENTRIES {
            self.log.pop_front();
        }
        self.log.push_back(LogEntry {
            at: Local::now(),
            kind,
            message,
        });
    }

    fn show_message(&mut self, message: &str) {
        self.message = Some((message.to_string(), Instant::now()));
    }

    // === 스코프 ===

    fn refresh_scopes(&mut self) {
        let active = self.active_scope_name().map(str::to_string);

        let mut scopes: Vec<String> = Vec::new();
        for shortcut in self.manager.get_all_shortcuts(None) {
            for scope in shortcut.user_action.scopes {
                if scope != APP_SCOPE && !scopes.contains(&scope) {
                    scopes.push(scope);
                }
            }
        }

        self.active_scope =
            active.and_then(|name| scopes.iter().position(|scope| *scope == name));
        self.scopes = scopes;
    }

    /// 조회 스코프: 현재 스코프 + 앱 스코프 (전체일 때는 기본 스코프)
    pub fn lookup_scopes(&self) -> Vec<String> {
        match self.active_scope_name() {
            Some(scope) => vec![scope.to_string(), APP_SCOPE.to_string()],
            None => Vec::new(),
        }
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn active_scope_name(&self) -> Option<&str> {
        self.active_scope
            .and_then(|index| self.scopes.get(index))
            .map(String::as_str)
    }

    pub fn scope_label(&self) -> &str {
        self.active_scope_name().unwrap_or("all")
    }

    // === 화면 데이터 ===

    pub fn shortcuts(&self) -> Vec<KeyboardShortcut> {
        self.manager.get_all_shortcuts(None)
    }

    pub fn pending_keys(&self) -> String {
        self.manager.sequence_keystrokes().join(" ")
    }

    pub fn sequence_mode_enabled(&self) -> bool {
        self.manager.is_sequence_mode_enabled()
    }

    pub fn platform_label(&self) -> &'static str {
        self.manager.platform().display_label()
    }

    pub fn log(&self) -> &VecDeque<LogEntry> {
        &self.log
    }

    pub fn last_fired(&self) -> Option<&str> {
        self.last_fired.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|(message, _)| message.as_str())
    }

    /// 커맨드 바 표시용 (앱 스코프 단축키)
    pub fn command_hints(&self) -> Vec<CommandHint> {
        let app_scope = [APP_SCOPE.to_string()];
        self.manager
            .get_all_shortcuts(Some(&app_scope[..]))
            .iter()
            .map(|shortcut| {
                (
                    shortcut.keymap.values.display(),
                    shortcut.display_label().to_string(),
                )
            })
            .collect()
    }
}
