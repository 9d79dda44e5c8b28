use drill_lib::practice::PracticeKey;
use drill_lib::review::SessionSummary;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const CYAN: &'static str = "\x1b[36m";
    pub const GRAY: &'static str = "\x1b[90m";
}

fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub fn render_new_practice(key: &PracticeKey, use_color: bool) -> String {
    format!(
        "new practice: {} {}",
        paint(key.modality.as_str(), Color::CYAN, use_color),
        key.word
    )
}

pub fn render_plan_size(count: usize, use_color: bool) -> String {
    paint(&format!("{} practices", count), Color::BOLD, use_color)
}

pub fn render_summary(summary: &SessionSummary, use_color: bool) -> String {
    let mut line = format!(
        "reviewed {}: {} leveled up, {} kept",
        summary.reviewed,
        paint(&summary.leveled_up.to_string(), Color::GREEN, use_color),
        paint(&summary.kept.to_string(), Color::YELLOW, use_color),
    );
    if summary.skipped > 0 {
        line.push_str(&paint(
            &format!(" ({} skipped, not in word list)", summary.skipped),
            Color::GRAY,
            use_color,
        ));
    }
    line
}
