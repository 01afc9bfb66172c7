//! Example GUI windows shown over the cube

use crate::app::frame_stats::FrameStats;

/// State behind the example windows
#[derive(Debug, Clone, Default)]
pub struct ExampleWidgets {
    pub show_demo_window: bool,
    pub show_another_window: bool,
    /// Value edited by the `float` slider, in [0, 1]
    pub value: f32,
    /// Times `Button` was clicked
    pub counter: i32,
}

impl ExampleWidgets {
    pub fn new(show_demo_window: bool, show_another_window: bool) -> Self {
        Self {
            show_demo_window,
            show_another_window,
            ..Default::default()
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, stats: &FrameStats) {
        if self.show_demo_window {
            egui::Window::new("Demo Window")
                .open(&mut self.show_demo_window)
                .vscroll(true)
                .show(ctx, |ui| ctx.settings_ui(ui));
        }

        egui::Window::new("Information").show(ctx, |ui| {
            ui.checkbox(&mut self.show_demo_window, "Demo Window");
            ui.checkbox(&mut self.show_another_window, "Another Window");

            ui.add(egui::Slider::new(&mut self.value, 0.0..=1.0).text("float"));

            ui.horizontal(|ui| {
                if ui.button("Button").clicked() {
                    self.counter += 1;
                }
                ui.label(counter_label(self.counter));
            });

            ui.label(average_label(stats));
        });

        if self.show_another_window {
            let mut open = true;
            let mut close_clicked = false;
            egui::Window::new("Another Window")
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label("Hello from another window!");
                    close_clicked = ui.button("Close Me").clicked();
                });
            self.show_another_window = open && !close_clicked;
        }
    }
}

pub fn counter_label(counter: i32) -> String {
    format!("counter = {counter}")
}

pub fn average_label(stats: &FrameStats) -> String {
    format!(
        "Application average {:.3} ms/frame ({:.1} FPS)",
        stats.ms_per_frame(),
        stats.fps()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frame(widgets: &mut ExampleWidgets, stats: &FrameStats) -> egui::FullOutput {
        let ctx = egui::Context::default();
        ctx.run(egui::RawInput::default(), |ctx| widgets.show(ctx, stats))
    }

    #[test]
    fn test_labels() {
        assert_eq!(counter_label(3), "counter = 3");

        let mut stats = FrameStats::new();
        stats.push(0.02);
        assert_eq!(
            average_label(&stats),
            "Application average 20.000 ms/frame (50.0 FPS)"
        );
    }

    #[test]
    fn test_windows_render_headless() {
        let mut widgets = ExampleWidgets::new(true, true);
        let output = run_frame(&mut widgets, &FrameStats::new());
        assert!(!output.shapes.is_empty());
        assert!(widgets.show_another_window);
        assert_eq!(widgets.counter, 0);
    }

    #[test]
    fn test_value_stays_untouched_without_input() {
        let mut widgets = ExampleWidgets {
            value: 0.25,
            ..Default::default()
        };
        run_frame(&mut widgets, &FrameStats::new());
        assert_eq!(widgets.value, 0.25);
    }
}
