use std::path::Path;
use std::time::Duration;

use coin_dashboard_core::errors::CoreError;
use coin_dashboard_core::models::file::{FileRecord, SelectedFile};
use coin_dashboard_core::models::history::HistoryPoint;
use coin_dashboard_core::models::notice::Notice;
use coin_dashboard_core::router::Route;
use coin_dashboard_core::services::refresh::RefreshScheduler;
use coin_dashboard_core::state::chart::ChartState;
use coin_dashboard_core::state::coin_list::{CoinListAction, CoinListState};
use coin_dashboard_core::state::upload::UploadState;
use coin_dashboard_core::CoinDashboard;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::{GRID_COLUMNS, NOTICE_DURATION_MS, POLL_DURATION_MS};
use crate::ui;

/// Results of background tasks, delivered to the UI loop.
pub enum AppMessage {
    History {
        ticket: u64,
        result: Result<Vec<HistoryPoint>, CoreError>,
    },
    FilesListed {
        ticket: u64,
        result: Result<Vec<FileRecord>, CoreError>,
    },
    UploadFinished(Result<FileRecord, CoreError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    UploadPath,
}

pub struct App {
    pub(crate) dashboard: CoinDashboard,
    pub(crate) route: Route,
    pub(crate) coin_list: CoinListState,
    pub(crate) chart: ChartState,
    pub(crate) upload: UploadState,
    pub(crate) mode: InputMode,
    pub(crate) path_input: String,
    pub(crate) selected_card: usize,
    pub(crate) notice: Option<(Notice, Instant)>,
    pub(crate) frame_count: usize,
    scheduler: Option<RefreshScheduler>,
    chart_task: Option<JoinHandle<()>>,
    coin_tx: UnboundedSender<CoinListAction>,
    coin_rx: UnboundedReceiver<CoinListAction>,
    msg_tx: UnboundedSender<AppMessage>,
    msg_rx: UnboundedReceiver<AppMessage>,
    should_quit: bool,
}

impl App {
    pub fn new(dashboard: CoinDashboard, route: Route) -> Self {
        let (coin_tx, coin_rx) = mpsc::unbounded_channel();
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let refresh_secs = dashboard.settings().refresh_interval_secs;
        Self {
            dashboard,
            route: Route::Home,
            coin_list: CoinListState::new(refresh_secs),
            chart: ChartState::new(),
            upload: UploadState::new(),
            mode: InputMode::Normal,
            path_input: String::new(),
            selected_card: 0,
            notice: None,
            frame_count: 0,
            scheduler: None,
            chart_task: None,
            coin_tx,
            coin_rx,
            msg_tx,
            msg_rx,
            should_quit: false,
        }
        .navigated(route)
    }

    fn navigated(mut self, route: Route) -> Self {
        self.navigate(route);
        self
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            self.drain_messages();
            self.expire_notice();
            terminal.draw(|frame| ui::render(frame, &self))?;
            self.frame_count = self.frame_count.wrapping_add(1);

            if event::poll(Duration::from_millis(POLL_DURATION_MS))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        self.teardown();
        Ok(())
    }

    // ── Routing ─────────────────────────────────────────────────────

    /// Switch screens, starting and stopping the per-view tasks.
    pub fn navigate(&mut self, route: Route) {
        tracing::info!(from = %self.route, to = %route, "navigate");
        match &route {
            Route::Home => {
                self.close_chart();
                self.activate_home();
            }
            Route::CoinDetail { id } => {
                self.scheduler = None;
                let id = id.clone();
                if let Some(request) = self.chart.sync_to(&id) {
                    self.spawn_history(request.ticket, request.coin_id);
                }
            }
            Route::NotFound { .. } => {
                self.scheduler = None;
                self.close_chart();
            }
        }
        self.route = route;
    }

    fn activate_home(&mut self) {
        self.coin_list = CoinListState::new(self.dashboard.settings().refresh_interval_secs);
        self.selected_card = 0;
        if let Some(notice) = self.coin_list.update(CoinListAction::Activate) {
            self.show(notice);
        }
        // Replacing the handle drops (and aborts) any previous scheduler.
        self.scheduler = Some(self.dashboard.start_refresh(self.coin_tx.clone()));
        self.spawn_file_listing();
    }

    // ── Background tasks ────────────────────────────────────────────

    fn spawn_history(&mut self, ticket: u64, coin_id: String) {
        if let Some(previous) = self.chart_task.take() {
            previous.abort();
        }
        let dashboard = self.dashboard.clone();
        let tx = self.msg_tx.clone();
        self.chart_task = Some(tokio::spawn(async move {
            let result = dashboard.fetch_history(&coin_id).await;
            let _ = tx.send(AppMessage::History { ticket, result });
        }));
    }

    fn spawn_file_listing(&mut self) {
        let ticket = self.upload.begin_listing();
        let dashboard = self.dashboard.clone();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let result = dashboard.list_files().await;
            let _ = tx.send(AppMessage::FilesListed { ticket, result });
        });
    }

    fn spawn_upload(&self, file: SelectedFile) {
        let dashboard = self.dashboard.clone();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let result = dashboard.upload_file(&file).await;
            let _ = tx.send(AppMessage::UploadFinished(result));
        });
    }

    fn drain_messages(&mut self) {
        while let Ok(action) = self.coin_rx.try_recv() {
            if self.route != Route::Home {
                continue;
            }
            if let Some(notice) = self.coin_list.update(action) {
                self.show(notice);
            }
            self.clamp_selection();
        }

        while let Ok(message) = self.msg_rx.try_recv() {
            match message {
                AppMessage::History { ticket, result } => {
                    self.chart.apply(ticket, result);
                }
                AppMessage::FilesListed { ticket, result } => {
                    self.upload.apply_listing(ticket, result);
                }
                AppMessage::UploadFinished(result) => {
                    let succeeded = result.is_ok();
                    let notice = self.upload.finish_submit(result);
                    self.show(notice);
                    if succeeded {
                        self.spawn_file_listing();
                    }
                }
            }
        }
    }

    fn teardown(&mut self) {
        self.scheduler = None;
        if let Some(task) = self.chart_task.take() {
            task.abort();
        }
    }

    // ── Input ───────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            InputMode::Search => self.handle_search_key(key),
            InputMode::UploadPath => self.handle_path_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let mut search = self.coin_list.query().search.clone();
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.mode = InputMode::Normal;
                return;
            }
            KeyCode::Backspace => {
                search.pop();
            }
            KeyCode::Char(c) => search.push(c),
            _ => return,
        }
        self.coin_list.update(CoinListAction::SetSearch(search));
        self.clamp_selection();
    }

    fn handle_path_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.path_input.clear();
                self.mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                self.mode = InputMode::Normal;
                let path = std::mem::take(&mut self.path_input);
                self.select_path(path.trim());
                self.submit_upload();
            }
            KeyCode::Backspace => {
                self.path_input.pop();
            }
            KeyCode::Char(c) => self.path_input.push(c),
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if self.chart.is_open() && self.route == Route::Home {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('c')) {
                self.close_chart();
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => match self.route {
                Route::Home => self.should_quit = true,
                _ => self.navigate(Route::Home),
            },
            _ if self.route != Route::Home => {}
            KeyCode::Char('/') => self.mode = InputMode::Search,
            KeyCode::Char('u') => {
                if self.upload.is_uploading() {
                    self.show(Notice::info(self.upload.submit_label()));
                } else {
                    self.mode = InputMode::UploadPath;
                }
            }
            KeyCode::Char('f') => {
                let next = self.coin_list.query().filter.next();
                self.coin_list.update(CoinListAction::SetFilter(next));
                self.clamp_selection();
            }
            KeyCode::Char('s') => {
                let next = self.coin_list.query().sort.next();
                self.coin_list.update(CoinListAction::SetSort(next));
            }
            KeyCode::Right => self.move_selection(1),
            KeyCode::Left => self.move_selection(-1),
            KeyCode::Down => self.move_selection(GRID_COLUMNS as isize),
            KeyCode::Up => self.move_selection(-(GRID_COLUMNS as isize)),
            KeyCode::Enter => self.open_selected_chart(),
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_coin_id() {
                    self.navigate(Route::coin(id));
                }
            }
            _ => {}
        }
    }

    // ── Actions ─────────────────────────────────────────────────────

    fn open_selected_chart(&mut self) {
        let Some(id) = self.selected_coin_id() else {
            return;
        };
        let request = self.chart.open(id);
        self.spawn_history(request.ticket, request.coin_id);
    }

    fn close_chart(&mut self) {
        if let Some(task) = self.chart_task.take() {
            task.abort();
        }
        self.chart.close();
    }

    fn select_path(&mut self, path: &str) {
        if path.is_empty() {
            self.upload.clear_selection();
            return;
        }
        let name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());
        match std::fs::read(path) {
            Ok(bytes) => self.upload.select(SelectedFile::new(name, bytes)),
            Err(e) => {
                tracing::warn!(%path, error = %e, "cannot read selected file");
                self.upload.clear_selection();
                self.show(Notice::error(format!("Cannot read {path}: {e}")));
            }
        }
    }

    fn submit_upload(&mut self) {
        match self.upload.begin_submit() {
            Ok(file) => self.spawn_upload(file),
            Err(CoreError::ValidationError(msg)) => self.show(Notice::error(msg)),
            Err(e) => self.show(Notice::error(e.to_string())),
        }
    }

    fn selected_coin_id(&self) -> Option<String> {
        self.coin_list
            .visible_coins()
            .get(self.selected_card)
            .map(|c| c.id.clone())
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.coin_list.visible_coins().len();
        if count == 0 {
            self.selected_card = 0;
            return;
        }
        let next = self.selected_card as isize + delta;
        self.selected_card = next.clamp(0, count as isize - 1) as usize;
    }

    fn clamp_selection(&mut self) {
        let count = self.coin_list.visible_coins().len();
        self.selected_card = self.selected_card.min(count.saturating_sub(1));
    }

    fn show(&mut self, notice: Notice) {
        self.notice = Some((notice, Instant::now()));
    }

    fn expire_notice(&mut self) {
        if let Some((_, shown_at)) = &self.notice {
            if shown_at.elapsed() >= Duration::from_millis(NOTICE_DURATION_MS) {
                self.notice = None;
            }
        }
    }
}
