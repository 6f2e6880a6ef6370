use linkdrop_core::{update, AppState, AppViewModel, Msg};

use super::effects::EffectRunner;
use super::ui;

pub struct LinkdropApp {
    state: AppState,
    view: AppViewModel,
    runner: EffectRunner,
    scroll: ui::render::ScrollTracker,
}

impl LinkdropApp {
    pub fn new(state: AppState, runner: EffectRunner) -> Self {
        let view = state.view();
        let mut app = Self {
            state,
            view,
            runner,
            scroll: ui::render::ScrollTracker::default(),
        };
        app.dispatch_msg(Msg::Started);
        app
    }

    fn process_pending_messages(&mut self) {
        for msg in self.runner.poll() {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;
        self.runner.enqueue(effects);
    }
}

impl eframe::App for LinkdropApp {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        self.process_pending_messages();

        for msg in ui::render::render(ctx, &self.view, &mut self.scroll) {
            self.dispatch_msg(msg);
        }

        // Backend completions arrive on a channel; keep polling for them.
        ctx.request_repaint_after(ui::constants::TICK_INTERVAL);
    }
}
