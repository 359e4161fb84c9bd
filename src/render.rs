// src/render.rs
//! Plain-text rendering of the app state, one block per page

use std::fmt::Write;

use crate::app::{App, Route};
use crate::views::{JobsView, ResumesView};

/// Banner plus the page for the current route. Consumes the pending
/// success notice.
pub fn render(app: &App) -> String {
    let mut out = String::new();

    if let Some(error) = app.ops().error() {
        let _ = writeln!(out, "error: {}", error);
    }
    if let Some(notice) = app.ops().take_notice() {
        let _ = writeln!(out, "{}", notice);
    }
    if app.ops().is_running() {
        let _ = writeln!(out, "Working...");
    }

    let _ = writeln!(
        out,
        "[{}]",
        if app.is_authenticated() {
            "Authenticated"
        } else {
            "Not logged in"
        }
    );

    match app.route() {
        Route::Auth => {
            if !app.auth.status().is_empty() {
                let _ = writeln!(out, "{}", app.auth.status());
            }
        }
        Route::Jobs => out.push_str(&render_jobs(&app.jobs)),
        Route::Resumes => out.push_str(&render_resumes(&app.resumes)),
        Route::Match => {
            if !app.matching.result().is_empty() {
                let _ = writeln!(out, "{}", app.matching.result());
            }
        }
    }

    out
}

pub fn render_jobs(view: &JobsView) -> String {
    let mut out = format!("Jobs (page {})\n", view.page().saturating_add(1));
    if view.items().is_empty() {
        out.push_str("  (none)\n");
    }
    for job in view.items() {
        let _ = write!(out, "  {}", job);
        if !job.skills.is_empty() {
            let _ = write!(out, " [{}]", job.skills.join(", "));
        }
        out.push('\n');
    }
    out
}

pub fn render_resumes(view: &ResumesView) -> String {
    let mut out = format!("Resumes (page {})\n", view.page().saturating_add(1));
    if view.items().is_empty() {
        out.push_str("  (none)\n");
    }
    for resume in view.items() {
        let _ = writeln!(out, "  {}", resume);
    }
    out
}
