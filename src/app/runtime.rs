use super::{App, AppEvent, Page, StartPage, ThumbnailRequest, ThumbnailResponse};
use crate::services::Services;
use crate::thumbnail::ThumbnailCache;
use crate::ui;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::collections::HashMap;
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TrySendError};
use std::thread;
use tracing::debug;

const THUMBNAIL_REQUEST_QUEUE_CAPACITY: usize = 512;
const APP_EVENT_QUEUE_CAPACITY: usize = 1024;

pub async fn run_tui(services: Services, start: StartPage) -> Result<()> {
    let mut app = App::new(services, start);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Bounded queue prevents unlimited backlog during rapid scrolling.
    let (thumb_tx, thumb_rx) =
        mpsc::sync_channel::<ThumbnailRequest>(THUMBNAIL_REQUEST_QUEUE_CAPACITY);
    let (event_tx, event_rx) = mpsc::sync_channel::<AppEvent>(APP_EVENT_QUEUE_CAPACITY);

    app.set_thumb_channel(thumb_tx);

    let event_tx_thumb = event_tx.clone();
    let disk_cache = app.services.thumbnails.clone();
    thread::spawn(move || {
        thumbnail_worker(thumb_rx, event_tx_thumb, disk_cache);
    });

    let event_tx_input = event_tx.clone();
    thread::spawn(move || {
        input_worker(event_tx_input);
    });

    let res = run_app(&mut terminal, &mut app, event_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.into_services().shutdown().await;
    res
}

/// Background thread that loads thumbnails using fast_image_resize.
fn thumbnail_worker(
    rx: Receiver<ThumbnailRequest>,
    tx: SyncSender<AppEvent>,
    disk_cache: ThumbnailCache,
) {
    while let Ok(first_request) = rx.recv() {
        // Drain available work and keep only the newest generation.
        // Also deduplicate by cache index so fast scrolling doesn't waste
        // time decoding thumbnails that were immediately superseded.
        let requests = collect_latest_requests(first_request, &rx);

        for request in requests {
            // Load thumbnail (uses fast_image_resize with disk caching).
            match disk_cache.load(&request.source_path) {
                Ok(image) => {
                    let response = ThumbnailResponse {
                        cache_idx: request.cache_idx,
                        image,
                        generation: request.generation,
                    };
                    if !send_thumbnail_ready(&tx, response) {
                        return;
                    }
                }
                Err(err) => {
                    debug!(path = %request.source_path.display(), "thumbnail failed: {err:#}");
                    let failed = AppEvent::ThumbnailFailed(request.cache_idx, request.generation);
                    if tx.send(failed).is_err() {
                        return;
                    }
                }
            }
        }
    }
}

fn send_thumbnail_ready(tx: &SyncSender<AppEvent>, response: ThumbnailResponse) -> bool {
    tx.send(AppEvent::ThumbnailReady(response)).is_ok()
}

fn collect_latest_requests(
    first_request: ThumbnailRequest,
    rx: &Receiver<ThumbnailRequest>,
) -> Vec<ThumbnailRequest> {
    let mut latest_generation = first_request.generation;
    let mut latest_by_idx: HashMap<usize, ThumbnailRequest> = HashMap::new();
    latest_by_idx.insert(first_request.cache_idx, first_request);

    while let Ok(request) = rx.try_recv() {
        if request.generation > latest_generation {
            latest_generation = request.generation;
            latest_by_idx.clear();
        }

        if request.generation == latest_generation {
            latest_by_idx.insert(request.cache_idx, request);
        }
    }

    latest_by_idx.into_values().collect()
}

/// Background thread that polls for input events.
fn input_worker(tx: SyncSender<AppEvent>) {
    loop {
        if event::poll(std::time::Duration::from_millis(50)).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                _ => {}
            }
        } else {
            match tx.try_send(AppEvent::Tick) {
                Ok(()) | Err(TrySendError::Full(_)) => {}
                Err(TrySendError::Disconnected(_)) => break,
            }
        }
    }
}

fn coalesce_thumbnail_events(events: Vec<AppEvent>) -> Vec<AppEvent> {
    let mut coalesced = Vec::with_capacity(events.len());
    let mut latest_generation: Option<u64> = None;
    let mut latest_by_idx: HashMap<usize, ThumbnailResponse> = HashMap::new();

    for event in events {
        match event {
            AppEvent::ThumbnailReady(response) => {
                match latest_generation {
                    None => latest_generation = Some(response.generation),
                    Some(gen) if response.generation > gen => {
                        latest_generation = Some(response.generation);
                        latest_by_idx.clear();
                    }
                    Some(gen) if response.generation < gen => continue,
                    Some(_) => {}
                }
                latest_by_idx.insert(response.cache_idx, response);
            }
            other => coalesced.push(other),
        }
    }

    if !latest_by_idx.is_empty() {
        let mut thumbnails: Vec<_> = latest_by_idx.into_values().collect();
        thumbnails.sort_by_key(|r| r.cache_idx);
        coalesced.extend(thumbnails.into_iter().map(AppEvent::ThumbnailReady));
    }

    coalesced
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_rx: Receiver<AppEvent>,
) -> Result<()> {
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw(f, app))?;
            needs_redraw = false;
        }

        let events: Vec<AppEvent> =
            match event_rx.recv_timeout(std::time::Duration::from_millis(100)) {
                Ok(event) => {
                    let mut events = vec![event];
                    while let Ok(e) = event_rx.try_recv() {
                        events.push(e);
                    }
                    coalesce_thumbnail_events(events)
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Ok(()),
            };

        for event in events {
            match event {
                AppEvent::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key.code);
                    needs_redraw = true;
                }
                AppEvent::ThumbnailReady(response) => {
                    app.handle_thumbnail_ready(response);
                    needs_redraw = true;
                }
                AppEvent::ThumbnailFailed(cache_idx, generation) => {
                    app.handle_thumbnail_failed(cache_idx, generation);
                    needs_redraw = true;
                }
                AppEvent::Resize => {
                    app.handle_resize();
                    terminal.clear()?;
                    needs_redraw = true;
                }
                // Redraw so cards still waiting on thumbnails get requested.
                AppEvent::Tick => needs_redraw |= !app.thumbnails.loading.is_empty(),
            }
        }

        if app.ui.should_quit {
            return Ok(());
        }
    }
}

/// Route one key press. Popups and text entry take precedence over pages.
fn handle_key(app: &mut App, code: KeyCode) {
    if app.ui.show_help {
        if matches!(code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter) {
            app.ui.show_help = false;
        }
        return;
    }

    if app.ui.confirm_delete.is_some() {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        }
        return;
    }

    match app.ui.page {
        Page::Settings => handle_settings_key(app, code),
        Page::Grid if app.filters.search_mode => handle_search_key(app, code),
        Page::Grid => handle_grid_key(app, code),
    }
}

fn handle_search_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.exit_search_mode(true),
        KeyCode::Enter => app.exit_search_mode(false),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Left => app.move_left(),
        KeyCode::Right => app.move_right(),
        KeyCode::Up => app.move_up(),
        KeyCode::Down => app.move_down(),
        KeyCode::Char(c) => app.search_input(c),
        _ => {}
    }
}

fn handle_grid_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.ui.should_quit = true,
        KeyCode::Right | KeyCode::Char('l') => app.move_right(),
        KeyCode::Left | KeyCode::Char('h') => app.move_left(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Enter => app.apply_wallpaper(),
        KeyCode::Char('f') => app.toggle_favorite(),
        KeyCode::Char('s') => app.toggle_sort_mode(),
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Char('r') => app.random_wallpaper(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('o') => app.reveal_in_file_manager(),
        KeyCode::Char('R') => app.rescan(),
        KeyCode::Char(',') => app.open_settings(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, code: KeyCode) {
    if app.settings.prompt.is_some() {
        match code {
            KeyCode::Esc => app.prompt_cancel(),
            KeyCode::Enter => app.prompt_submit(),
            KeyCode::Backspace => app.prompt_backspace(),
            KeyCode::Char(c) => app.prompt_input(c),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char(',') => app.close_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.settings_up(),
        KeyCode::Down | KeyCode::Char('j') => app.settings_down(),
        KeyCode::Left | KeyCode::Char('h') => app.settings_adjust(false),
        KeyCode::Right | KeyCode::Char('l') => app.settings_adjust(true),
        KeyCode::Enter => app.settings_activate(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected_folder(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
}
