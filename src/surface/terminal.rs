use std::fmt::Write as _;
use std::io::Write;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::Duration;

use super::Surface;
use crate::error::SurfaceError;
use crate::page::{Page, ERROR_MESSAGE};
use crate::view::MetaKind;

/// Draws settled pages as text and shows a spinner while loading.
pub struct TerminalSurface<W: Write + Send> {
    out: W,
    spinner_enabled: bool,
    spinner: Option<ProgressBar>,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout(spinner_enabled: bool) -> Self {
        TerminalSurface::new(std::io::stdout(), spinner_enabled)
    }
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W, spinner_enabled: bool) -> Self {
        TerminalSurface {
            out,
            spinner_enabled,
            spinner: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn start_spinner(&mut self, label: &str) {
        if !self.spinner_enabled {
            return;
        }
        let pb = self.spinner.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
            }
            pb.enable_steady_tick(Duration::from_millis(80));
            pb
        });
        pb.set_message(label.to_owned());
    }

    fn stop_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

impl<W: Write + Send> Surface for TerminalSurface<W> {
    fn refresh(&mut self, page: &Page) -> Result<(), SurfaceError> {
        if page.is_loading() {
            self.start_spinner(page.trigger_label);
            return Ok(());
        }

        self.stop_spinner();
        if page.settled_at.is_some() {
            self.out.write_all(render_text(page).as_bytes())?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn detach(&mut self) {
        self.stop_spinner();
    }
}

fn meta_label(kind: MetaKind) -> &'static str {
    match kind {
        MetaKind::Location => "Location",
        MetaKind::Company => "Company",
        MetaKind::Website => "Website",
        MetaKind::Social => "Social",
    }
}

/// Provider text with control characters (escape sequences included)
/// removed. Newlines survive.
fn clean(text: &str) -> String {
    text.chars().filter(|c| *c == '\n' || !c.is_control()).collect()
}

/// Plain-text rendering of the visible panels.
pub fn render_text(page: &Page) -> String {
    let mut out = String::new();

    if page.error_visible {
        let _ = writeln!(out, "{ERROR_MESSAGE}");
    }

    if let Some(profile) = page.profile.shown() {
        let _ = writeln!(out, "{} ({})", clean(&profile.heading), clean(&profile.handle));
        if !profile.bio.is_empty() {
            let _ = writeln!(out, "{}", clean(&profile.bio));
        }
        for item in &profile.meta {
            let _ = writeln!(out, "  {:<9} {}", meta_label(item.kind), clean(&item.text));
        }
        let _ = writeln!(
            out,
            "  {} repos · {} followers · {} following",
            profile.stats.repos, profile.stats.followers, profile.stats.following
        );
        let _ = writeln!(out, "  {}", clean(&profile.profile_url));
    }

    if let Some(grid) = page.repos.shown() {
        let _ = writeln!(out, "\nTop repositories ({})", grid.count());
        for card in &grid.cards {
            let _ = writeln!(out, "- {}  {}", clean(&card.name), clean(&card.url));
            let _ = writeln!(out, "    {}", clean(&card.description));
            let _ = write!(out, "    ★ {}  ⑂ {}", card.stars, card.forks);
            if let Some(badge) = &card.language {
                let _ = write!(out, "  {} ({})", clean(&badge.name), badge.color);
            }
            out.push('\n');
        }
    }

    if let Some(at) = page.settled_at {
        let _ = writeln!(out, "\nFetched {}", at.format("%Y-%m-%d %H:%M UTC"));
    }

    out
}
