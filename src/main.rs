mod app;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ksm::utils::logging;
use ksm::KeyPress;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use ui::{compute_layout, CommandBar, InvocationLog, LayoutMode, ShortcutTable, StatusBar};

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    // 로그 파일을 만들 수 없어도 실행은 계속
    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Logging disabled: {}", err);
            None
        }
    };

    let mut app = App::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "playground exited with error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| render(f, app))?;

        if event::poll(POLL_TIMEOUT)? {
            if let Event::Key(key) = event::read()? {
                // 키를 뗀 이벤트는 무시 (반복 입력은 관리자가 걸러냄)
                if key.kind != KeyEventKind::Release {
                    app.handle_key(KeyPress::from(key));
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

fn render(f: &mut Frame<'_>, app: &App) {
    let size = f.area();
    let (mode, areas) = compute_layout(size);

    if mode == LayoutMode::TooSmall {
        render_too_small(f, app, size);
        return;
    }

    let theme = &app.theme;
    let shortcuts = app.shortcuts();
    let table = ShortcutTable::new(&shortcuts)
        .last_fired(app.last_fired())
        .active_scope(app.active_scope_name())
        .theme(theme);
    f.render_widget(table, areas.shortcut_table);

    let log = InvocationLog::new(app.log()).theme(theme);
    f.render_widget(log, areas.invocation_log);

    let pending_keys = app.pending_keys();
    let status_bar = StatusBar::new()
        .scope(app.scope_label())
        .sequence_mode(app.sequence_mode_enabled())
        .pending_keys(&pending_keys)
        .platform(app.platform_label())
        .message(app.message())
        .theme(theme);
    f.render_widget(status_bar, areas.status_bar);

    let hints = app.command_hints();
    let command_bar = CommandBar::new(&hints).theme(theme);
    f.render_widget(command_bar, areas.command_bar);
}

fn render_too_small(f: &mut Frame<'_>, app: &App, area: Rect) {
    let text = format!(
        "Terminal too small ({}x{}), need {}x{}",
        area.width,
        area.height,
        ui::MIN_WIDTH,
        ui::MIN_HEIGHT
    );
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.warning).bg(app.theme.bg_primary));
    f.render_widget(paragraph, area);
}
