use std::fmt::Write as _;

use tracing::debug;

use super::Surface;
use crate::error::SurfaceError;
use crate::page::{Page, ERROR_MESSAGE};
use crate::view::{MetaKind, ProfileView, RepoCard, RepoGrid};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #0d1117; color: #e6edf3; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
.loader { text-align: center; }
.error { background: #3d1d20; border: 1px solid #f85149; padding: 1rem; border-radius: 8px; }
.profile-card { display: flex; gap: 1.5rem; background: #161b22; padding: 1.5rem; border-radius: 12px; }
.profile-card .avatar { width: 120px; height: 120px; border-radius: 50%; }
.handle { color: #7c6af7; margin: 0; }
.meta { display: flex; flex-wrap: wrap; gap: 1rem; color: #8b949e; }
.stats { display: flex; gap: 1.5rem; }
.stat strong { display: block; font-size: 1.25rem; }
.repos-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1rem; }
.repo-card { display: block; background: #161b22; padding: 1rem; border-radius: 10px; color: inherit; text-decoration: none; }
.owner-avatar { width: 18px; height: 18px; border-radius: 50%; vertical-align: middle; margin-right: 6px; }
.repo-desc { color: #8b949e; }
.repo-footer { display: flex; gap: 1rem; font-size: 0.9rem; }
.lang-dot::before { content: ""; display: inline-block; width: 10px; height: 10px; border-radius: 50%; margin-right: 4px; background: var(--lang-color); }
"#;

/// Writes every settled page to a standalone HTML file.
#[derive(Debug, Clone)]
pub struct HtmlSurface {
    path: String,
}

impl HtmlSurface {
    pub fn new(path: impl Into<String>) -> Self {
        HtmlSurface { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Surface for HtmlSurface {
    fn refresh(&mut self, page: &Page) -> Result<(), SurfaceError> {
        if page.is_loading() || page.settled_at.is_none() {
            return Ok(());
        }

        std::fs::write(&self.path, render_html(page)).map_err(|source| SurfaceError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("Wrote page to '{}'", self.path);
        Ok(())
    }
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escaped URL for `href`/`src`; anything but http(s) becomes `#`.
fn escape_url(url: &str) -> String {
    let lower = url.trim_start().to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        escape(url)
    } else {
        "#".to_owned()
    }
}

fn hidden(visible: bool) -> &'static str {
    if visible {
        ""
    } else {
        " hidden"
    }
}

fn meta_class(kind: MetaKind) -> &'static str {
    match kind {
        MetaKind::Location => "meta-location",
        MetaKind::Company => "meta-company",
        MetaKind::Website => "meta-website",
        MetaKind::Social => "meta-social",
    }
}

fn write_profile(out: &mut String, profile: &ProfileView) {
    let _ = write!(
        out,
        r#"<img class="avatar" src="{}" alt="avatar"><div class="profile-info"><h1 class="name">{}</h1><p class="handle">{}</p><p class="bio">{}</p>"#,
        escape_url(&profile.avatar_url),
        escape(&profile.heading),
        escape(&profile.handle),
        escape(&profile.bio),
    );

    out.push_str(r#"<div class="meta">"#);
    for item in &profile.meta {
        let _ = write!(
            out,
            r#"<div class="meta-item {}">{}</div>"#,
            meta_class(item.kind),
            escape(&item.text)
        );
    }
    out.push_str("</div>");

    let _ = write!(
        out,
        r#"<div class="stats"><div class="stat"><strong>{}</strong>Repos</div><div class="stat"><strong>{}</strong>Followers</div><div class="stat"><strong>{}</strong>Following</div></div><a class="view-profile" href="{}" target="_blank" rel="noopener">View profile</a></div>"#,
        escape(&profile.stats.repos),
        escape(&profile.stats.followers),
        escape(&profile.stats.following),
        escape_url(&profile.profile_url),
    );
}

fn write_card(out: &mut String, card: &RepoCard) {
    let _ = write!(
        out,
        r#"<a class="repo-card" href="{}" target="_blank" rel="noopener"><div class="repo-name"><img class="owner-avatar" src="{}" alt="owner">{}</div><p class="repo-desc">{}</p><div class="repo-footer"><div class="repo-stat stars">★ {}</div><div class="repo-stat forks">⑂ {}</div>"#,
        escape_url(&card.url),
        escape_url(&card.owner_avatar_url),
        escape(&card.name),
        escape(&card.description),
        escape(&card.stars),
        escape(&card.forks),
    );
    if let Some(badge) = &card.language {
        let _ = write!(
            out,
            r#"<div class="lang-dot" style="--lang-color: {}">{}</div>"#,
            badge.color,
            escape(&badge.name)
        );
    }
    out.push_str("</div></a>");
}

fn write_grid(out: &mut String, grid: &RepoGrid) {
    let _ = write!(
        out,
        r#"<h2>Top repositories <span class="repo-count">{}</span></h2><div class="repos-grid">"#,
        grid.count()
    );
    for card in &grid.cards {
        write_card(out, card);
    }
    out.push_str("</div>");
}

/// Standalone HTML document for the page. Provider text is always escaped.
pub fn render_html(page: &Page) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>GitHub profile lookup</title>\n<style>{STYLE}</style>\n</head>\n<body>\n"
    );

    let _ = writeln!(
        out,
        r#"<div class="loader"{}>{}</div>"#,
        hidden(page.loader_visible),
        escape(page.trigger_label)
    );
    let _ = writeln!(
        out,
        r#"<div class="error"{}>{}</div>"#,
        hidden(page.error_visible),
        ERROR_MESSAGE
    );

    let _ = write!(
        out,
        r#"<section class="profile-card"{}>"#,
        hidden(page.profile.visible)
    );
    if let Some(profile) = &page.profile.content {
        write_profile(&mut out, profile);
    }
    out.push_str("</section>\n");

    let _ = write!(out, r#"<section class="repos"{}>"#, hidden(page.repos.visible));
    if let Some(grid) = &page.repos.content {
        write_grid(&mut out, grid);
    }
    out.push_str("</section>\n");

    if let Some(at) = page.settled_at {
        let _ = writeln!(
            out,
            "<footer>Fetched {}</footer>",
            at.format("%Y-%m-%d %H:%M UTC")
        );
    }

    out.push_str("</body>\n</html>\n");
    out
}
