//! GUI overlay health check

use egui::Context;

use crate::app::frame_stats::FrameStats;
use crate::app::renderer::gui::configure_context;
use crate::health::check::{CheckResult, SystemCheck};
use crate::scene::ExampleWidgets;

/// Runs the example GUI windows through a headless egui frame
pub struct GuiOverlayCheck;

impl GuiOverlayCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GuiOverlayCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for GuiOverlayCheck {
    fn name(&self) -> &'static str {
        "GUI Overlay"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates egui setup and the example windows without a GPU")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();

        let ctx = Context::default();
        configure_context(&ctx);
        if !ctx.style().visuals.dark_mode {
            details.push("  ✗ Dark visuals not applied".to_string());
            return CheckResult::fail("GUI style misconfigured").with_details(details.join("\n"));
        }
        details.push("  ✓ egui context created with dark visuals".to_string());

        let mut stats = FrameStats::new();
        stats.push(1.0 / 60.0);

        let mut widgets = ExampleWidgets::new(true, true);
        let mut primitives = 0;
        for _ in 0..2 {
            let output = ctx.run(egui::RawInput::default(), |ctx| widgets.show(ctx, &stats));
            primitives = ctx
                .tessellate(output.shapes, output.pixels_per_point)
                .len();
        }

        if primitives == 0 {
            details.push("  ✗ Example windows produced no primitives".to_string());
            return CheckResult::fail("GUI frame is empty").with_details(details.join("\n"));
        }
        details.push(format!(
            "  ✓ Example windows tessellated into {} primitives",
            primitives
        ));

        if !widgets.show_another_window || widgets.counter != 0 {
            details.push("  ✗ Widget state changed without input".to_string());
            return CheckResult::fail("GUI state unstable").with_details(details.join("\n"));
        }
        details.push("  ✓ Widget state stable without input".to_string());

        CheckResult::pass("GUI overlay operational").with_details(details.join("\n"))
    }
}
