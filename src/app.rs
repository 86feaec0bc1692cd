use crate::api::worker::{ApiDispatcher, ApiResponse};
use crate::config::Config;
use crate::page::dashboard::DashboardPage;
use crate::page::practice::PracticePage;
use crate::ui::sentence_input::SentenceInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Practice,
    Dashboard,
}

/// Top-level application state. Each screen owns its page controller; there
/// is no state shared between them beyond the dispatcher wiring.
pub struct App {
    pub screen: AppScreen,
    pub practice: PracticePage,
    pub dashboard: DashboardPage,
    pub form: SentenceInput,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    dispatcher: ApiDispatcher,
}

impl App {
    pub fn new(config: Config, dispatcher: ApiDispatcher) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let mut app = Self {
            screen: AppScreen::Practice,
            practice: PracticePage::new(),
            dashboard: DashboardPage::new(),
            form: SentenceInput::new(),
            theme,
            config,
            should_quit: false,
            dispatcher,
        };
        app.load_word();
        app
    }

    /// Fetch the next word, resetting the form and any previous result.
    pub fn load_word(&mut self) {
        self.form.clear();
        let request = self.practice.request_word(self.config.difficulty_filter());
        self.dispatcher.dispatch(request);
    }

    /// Submit the form's sentence for the current word. Blank sentences are
    /// refused here; submitting with no word loaded is a controller no-op.
    pub fn submit_sentence(&mut self) {
        if self.form.is_blank() {
            return;
        }
        let sentence = self.form.value().trim().to_string();
        if let Some(request) = self.practice.request_submit(&sentence) {
            self.dispatcher.dispatch(request);
        }
    }

    /// Dashboard stats are a snapshot: every visit re-fetches.
    pub fn go_to_dashboard(&mut self) {
        self.screen = AppScreen::Dashboard;
        let request = self.dashboard.request_stats();
        self.dispatcher.dispatch(request);
    }

    pub fn refresh_stats(&mut self) {
        let request = self.dashboard.request_stats();
        self.dispatcher.dispatch(request);
    }

    pub fn go_to_practice(&mut self) {
        self.screen = AppScreen::Practice;
    }

    /// Route a network completion to the page that issued it.
    pub fn on_api(&mut self, response: ApiResponse) {
        match response {
            ApiResponse::Word {
                generation,
                outcome,
            } => self.practice.on_word(generation, outcome),
            ApiResponse::Submission {
                generation,
                outcome,
            } => self.practice.on_submission(generation, outcome),
            ApiResponse::Stats {
                generation,
                outcome,
            } => self.dashboard.on_stats(generation, outcome),
        }
    }
}
