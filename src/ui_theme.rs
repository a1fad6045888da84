use eframe::egui::{self, Color32, FontFamily, FontId, Rounding, Shadow, Stroke, Vec2};

pub struct PastelTheme {
    // Colors
    pub background: Color32,
    pub headline: Color32,
    pub button_bg: Color32,
    pub button_bg_hover: Color32,
    pub button_fg: Color32,
    pub text_secondary: Color32,
    pub success: Color32,
    pub error: Color32,

    // Spacing
    pub spacing_medium: f32,
    pub spacing_large: f32,
    pub padding_medium: f32,

    // Border radius
    pub radius_medium: Rounding,

    // Shadows
    pub shadow_small: Shadow,

    // Typography
    pub font_body: FontId,
    pub font_button: FontId,
    pub font_title: FontId,
}

impl Default for PastelTheme {
    fn default() -> Self {
        Self {
            // Mint-and-pink palette
            background: Color32::from_rgb(223, 255, 225),      // Mint background
            headline: Color32::from_rgb(244, 143, 177),        // Pink headline
            button_bg: Color32::from_rgb(200, 230, 201),       // Pale green button
            button_bg_hover: Color32::from_rgb(182, 220, 184), // Button hover
            button_fg: Color32::from_rgb(173, 20, 87),         // Deep pink button text
            text_secondary: Color32::from_rgb(90, 110, 92),    // Muted labels
            success: Color32::from_rgb(46, 125, 50),           // Green
            error: Color32::from_rgb(198, 40, 40),             // Red

            spacing_medium: 8.0,
            spacing_large: 16.0,
            padding_medium: 8.0,

            radius_medium: Rounding::same(8.0),

            shadow_small: Shadow {
                offset: Vec2::new(0.0, 1.0),
                blur: 3.0,
                spread: 0.0,
                color: Color32::from_black_alpha(25),
            },

            font_body: FontId::new(15.0, FontFamily::Proportional),
            font_button: FontId::new(17.0, FontFamily::Monospace),
            font_title: FontId::new(28.0, FontFamily::Monospace),
        }
    }
}

impl PastelTheme {
    pub fn apply_to_ctx(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        // Visuals
        style.visuals.panel_fill = self.background;
        style.visuals.window_fill = self.background;
        style.visuals.window_rounding = self.radius_medium;
        style.visuals.window_shadow = self.shadow_small;
        style.visuals.window_stroke = Stroke::new(1.0, self.button_bg);

        // Buttons
        style.visuals.button_frame = true;
        style.visuals.widgets.inactive.bg_fill = self.button_bg;
        style.visuals.widgets.inactive.weak_bg_fill = self.button_bg;
        style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.button_fg);
        style.visuals.widgets.inactive.rounding = self.radius_medium;

        style.visuals.widgets.hovered.bg_fill = self.button_bg_hover;
        style.visuals.widgets.hovered.weak_bg_fill = self.button_bg_hover;
        style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.button_fg);
        style.visuals.widgets.hovered.rounding = self.radius_medium;

        style.visuals.widgets.active.bg_fill = self.button_bg_hover;
        style.visuals.widgets.active.weak_bg_fill = self.button_bg_hover;
        style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.button_fg);
        style.visuals.widgets.active.rounding = self.radius_medium;

        // Text inputs
        style.visuals.text_cursor.stroke = Stroke::new(2.0, self.button_fg);
        style.visuals.selection.bg_fill = self.headline;
        style.visuals.selection.stroke = Stroke::new(1.0, self.button_fg);

        // Text styles
        style.text_styles = [
            (egui::TextStyle::Heading, self.font_title.clone()),
            (egui::TextStyle::Body, self.font_body.clone()),
            (
                egui::TextStyle::Monospace,
                FontId::new(14.0, FontFamily::Monospace),
            ),
            (egui::TextStyle::Button, self.font_button.clone()),
            (
                egui::TextStyle::Small,
                FontId::new(12.0, FontFamily::Proportional),
            ),
        ]
        .into();

        ctx.set_style(style);
    }

    pub fn status_color(&self, is_error: bool) -> Color32 {
        if is_error {
            self.error
        } else {
            self.success
        }
    }
}
