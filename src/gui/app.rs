use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::cfbd::CfbdClient;
use crate::config::{self, Config};
use crate::error::{CfbdError, Result};
use crate::session::{self, WeekGames};

use super::progress::{GuiProgress, SharedProgress};

pub fn run(out_dir: PathBuf) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "CFB Picker",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(out_dir)))),
    )
    .map_err(|err| {
        CfbdError::Io(std::io::Error::other(format!("GUI failed: {err}")))
    })
}

enum WorkerResult {
    Games(Result<WeekGames>),
    Matchup(Result<PathBuf>),
}

enum Screen {
    KeyEntry,
    Picker,
}

pub struct App {
    out_dir: PathBuf,
    config_path: PathBuf,
    client: Option<Arc<CfbdClient>>,
    screen: Screen,

    // key entry
    key_input: String,
    key_error: Option<String>,

    // picker
    week_games: Option<WeekGames>,
    selected: Option<usize>,
    last_output: Option<PathBuf>,

    // worker plumbing (workers write shared, post results on tx)
    shared: Arc<SharedProgress>,
    running: bool,
    tx: Sender<WorkerResult>,
    rx: Receiver<WorkerResult>,
}

impl App {
    fn new(out_dir: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel();
        let shared = Arc::new(SharedProgress::default());
        shared.set_status("Idle");

        let mut app = Self {
            out_dir,
            config_path: Config::default_path(),
            client: None,
            screen: Screen::KeyEntry,
            key_input: String::new(),
            key_error: None,
            week_games: None,
            selected: None,
            last_output: None,
            shared,
            running: false,
            tx,
            rx,
        };

        match config::stored_api_key(&app.config_path) {
            Ok(Some(key)) => {
                app.set_client(&key);
                if app.client.is_some() {
                    app.refresh_games();
                }
            }
            Ok(None) => {}
            Err(err) => app.key_error = Some(err.to_string()),
        }
        app
    }

    fn set_client(&mut self, key: &str) {
        match CfbdClient::new(&Config::new(key)) {
            Ok(client) => {
                self.client = Some(Arc::new(client));
                self.screen = Screen::Picker;
                self.key_error = None;
            }
            Err(err) => self.key_error = Some(err.to_string()),
        }
    }

    fn refresh_games(&mut self) {
        let Some(client) = self.client.clone() else {
            return;
        };
        self.running = true;
        self.selected = None;
        self.last_output = None;
        self.shared.reset();
        self.shared.set_status("Fetching current week's games...");

        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = session::load_week_games(client.as_ref(), chrono::Utc::now());
            let _ = tx.send(WorkerResult::Games(result));
        });
    }

    fn analyze_selected(&mut self) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let Some(game) = self
            .selected
            .and_then(|index| self.week_games.as_ref()?.games.get(index))
            .cloned()
        else {
            return;
        };

        self.running = true;
        self.last_output = None;
        self.shared.reset();
        self.shared.set_status(format!("Analyzing {}...", game.label()));

        let tx = self.tx.clone();
        let out_dir = self.out_dir.clone();
        let shared = self.shared.clone();
        thread::spawn(move || {
            let mut progress = GuiProgress::new(shared);
            let result = session::run_matchup(client.as_ref(), &game, &out_dir, &mut progress);
            let _ = tx.send(WorkerResult::Matchup(result));
        });
    }

    fn handle_worker_results(&mut self) {
        while let Ok(result) = self.rx.try_recv() {
            self.running = false;
            match result {
                WorkerResult::Games(Ok(week_games)) => {
                    self.shared.set_status(format!(
                        "Week {}: {} games",
                        week_games.week.week,
                        week_games.games.len()
                    ));
                    self.week_games = Some(week_games);
                }
                WorkerResult::Games(Err(CfbdError::Unauthorized)) => {
                    // Bad key: back to the entry screen for a new one.
                    self.client = None;
                    self.screen = Screen::KeyEntry;
                    self.key_error = Some(CfbdError::Unauthorized.to_string());
                }
                WorkerResult::Games(Err(err)) => {
                    self.shared.set_status(format!("Error: {err}"));
                }
                WorkerResult::Matchup(Ok(path)) => {
                    self.shared
                        .set_status(format!("Matchup data saved to {}", path.display()));
                    self.last_output = Some(path);
                }
                WorkerResult::Matchup(Err(err)) => {
                    self.shared.set_status(format!("Error: {err}"));
                }
            }
        }
    }

    fn key_entry_ui(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("CFBD API key required");
            ui.label("Get a free key from https://collegefootballdata.com/");
            ui.add_space(8.0);

            ui.add(
                egui::TextEdit::singleline(&mut self.key_input)
                    .password(true)
                    .hint_text("API key"),
            );
            if let Some(err) = &self.key_error {
                ui.colored_label(egui::Color32::LIGHT_RED, err);
            }

            if ui.button("Save key").clicked() {
                let key = self.key_input.trim().to_string();
                if key.is_empty() {
                    self.key_error = Some("The key cannot be empty.".to_string());
                } else if let Err(err) = Config::new(key.clone()).save(&self.config_path) {
                    self.key_error = Some(err.to_string());
                } else {
                    self.set_client(&key);
                    if self.client.is_some() {
                        self.key_input.clear();
                        self.refresh_games();
                    }
                }
            }
        });
    }

    fn picker_ui(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let status = self.shared.status.lock().unwrap().clone();
            ui.label(status);
            if let Some(path) = &self.last_output {
                ui.monospace(path.display().to_string());
            }

            let (done, total) = *self.shared.steps.lock().unwrap();
            if self.running && total > 0 {
                ui.add(egui::ProgressBar::new(done as f32 / total as f32).show_percentage());
            }

            let warnings = self.shared.warnings.lock().unwrap().clone();
            for warning in &warnings {
                ui.colored_label(egui::Color32::YELLOW, format!("Warning: {warning}"));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("College Football Game Picker");
            if let Some(week_games) = &self.week_games {
                ui.label(format!(
                    "Week {}, {} ({})",
                    week_games.week.week, week_games.week.year, week_games.week.season_type
                ));
            }
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!self.running, egui::Button::new("Refresh games"))
                    .clicked()
                {
                    self.refresh_games();
                }
                let can_analyze = !self.running && self.selected.is_some();
                if ui
                    .add_enabled(can_analyze, egui::Button::new("Analyze selected game"))
                    .clicked()
                {
                    self.analyze_selected();
                }
            });

            ui.separator();
            self.games_table(ui);
        });
    }

    fn games_table(&mut self, ui: &mut egui::Ui) {
        let rows: Vec<(String, String)> = self
            .week_games
            .as_ref()
            .map(|week_games| {
                week_games
                    .games
                    .iter()
                    .map(|game| (game.away_team.clone(), game.home_team.clone()))
                    .collect()
            })
            .unwrap_or_default();

        if rows.is_empty() {
            ui.label("No games loaded.");
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .sense(egui::Sense::click())
            .column(Column::remainder())
            .column(Column::remainder())
            .header(22.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Away");
                });
                header.col(|ui| {
                    ui.strong("Home");
                });
            })
            .body(|body| {
                body.rows(20.0, rows.len(), |mut row| {
                    let index = row.index();
                    let (away, home) = &rows[index];
                    row.set_selected(self.selected == Some(index));
                    row.col(|ui| {
                        ui.label(away);
                    });
                    row.col(|ui| {
                        ui.label(home);
                    });
                    if row.response().clicked() {
                        self.selected = Some(index);
                    }
                });
            });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_worker_results();
        if self.running {
            // Keep repainting while a worker posts progress.
            ctx.request_repaint_after(Duration::from_millis(150));
        }

        match self.screen {
            Screen::KeyEntry => self.key_entry_ui(ctx),
            Screen::Picker => self.picker_ui(ctx),
        }
    }
}
