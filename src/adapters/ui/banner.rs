//! Gradient ASCII banner (CHAT-RECORDS) in the figlet standard font.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

const TITLE: &str = "CHAT-RECORDS";

/// Deep teal (#0b7a75).
const TEAL: (u8, u8, u8) = (0x0b, 0x7a, 0x75);
/// Amber (#f2a541).
const AMBER: (u8, u8, u8) = (0xf2, 0xa5, 0x41);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Renders the banner lines. Falls back to the plain title if the font fails.
fn banner_lines() -> Vec<String> {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|figure| figure.to_string()))
        .map(|art| art.lines().map(String::from).collect())
        .unwrap_or_else(|| vec![TITLE.to_string()])
}

/// Prints the banner with a teal-to-amber gradient, then the version and schema version.
pub fn print_welcome() {
    let mut out = stdout();
    let lines = banner_lines();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(TEAL, AMBER, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: AMBER.0,
        g: AMBER.1,
        b: AMBER.2,
    }));
    let _ = out.execute(Print(format!(
        "v{} | wire schema v{}\r\n",
        env!("CARGO_PKG_VERSION"),
        crate::adapters::codec::SCHEMA_VERSION
    )));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
