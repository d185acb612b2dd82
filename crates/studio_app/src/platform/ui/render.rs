//! Renders the view model as plain text for the terminal.

use std::fmt::Write;

use studio_core::{AppViewModel, JobStatus, NavEntry, ResultView, ScreenView};

const BAR_WIDTH: usize = 20;

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "=== NanoStudio :: {} ===", view.title);
    match &view.screen {
        Some(screen) => render_screen(&mut out, screen),
        None => {
            out.push_str(&render_tools(&view.nav));
            let _ = writeln!(out, "Type `open <number>` to launch a tool, `help` for commands.");
        }
    }
    out
}

/// Numbered sidebar listing; the active tool is marked.
pub fn render_tools(nav: &[NavEntry]) -> String {
    let mut out = String::new();
    for (position, entry) in nav.iter().enumerate() {
        let marker = if entry.active { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:>2}. [{}] {:<24} {}",
            position + 1,
            entry.icon,
            entry.title,
            entry.description
        );
    }
    out
}

fn render_screen(out: &mut String, screen: &ScreenView) {
    let _ = writeln!(out, "{}", screen.description);
    let _ = writeln!(out, "Status: {}", status_label(screen));

    let input = &screen.input;
    match (&input.file, input.loading_file) {
        (_, true) => {
            let _ = writeln!(out, "File: loading...");
        }
        (Some(file), false) => {
            let preview = if file.has_preview { ", preview ready" } else { "" };
            let _ = writeln!(out, "File: {} ({}{})", file.name, file.size_label, preview);
        }
        (None, false) => {
            if let Some(hint) = input.file_hint {
                let _ = writeln!(out, "File: none. {hint}");
            }
        }
    }
    if let Some(url) = &input.url {
        let _ = writeln!(out, "URL: {}", blank_as_dash(url));
    }
    if let Some(prompt) = &input.prompt {
        let _ = writeln!(out, "Prompt: {}", blank_as_dash(prompt));
    }
    if !screen.settings.is_empty() {
        let _ = writeln!(out, "Advanced settings:");
        for (label, value) in &screen.settings {
            let _ = writeln!(out, "  {label}: {value}");
        }
    }

    let availability = if screen.can_start { "ready" } else { "unavailable" };
    let _ = writeln!(out, "Action: {} ({availability})", screen.start_label);

    render_result(out, &screen.result);

    if let Some(error) = &screen.error {
        let _ = writeln!(out, "! {error}");
    }
    if let Some(notice) = &screen.notice {
        let _ = writeln!(out, "* {notice}");
    }
}

fn render_result(out: &mut String, result: &ResultView) {
    match result {
        ResultView::Empty { placeholder } => {
            let _ = writeln!(out, "Result: {placeholder}");
        }
        ResultView::Pending { label } => {
            let _ = writeln!(out, "Result: {label}");
        }
        ResultView::Image {
            data_url,
            download_label,
        } => {
            let mime = data_url
                .strip_prefix("data:")
                .and_then(|rest| rest.split(';').next())
                .unwrap_or("image");
            let _ = writeln!(
                out,
                "Result: {mime} image ready ({} bytes encoded). `download` to {}.",
                data_url.len(),
                download_label.to_lowercase()
            );
        }
        ResultView::Tags(cards) => {
            let _ = writeln!(out, "Results:");
            for card in cards {
                let _ = writeln!(
                    out,
                    "  #{} Trend: {}/100  Vol: {}",
                    card.index + 1,
                    card.trending_score,
                    card.search_volume
                );
                let _ = writeln!(out, "     {}", card.hashtags.join(" "));
            }
            let _ = writeln!(out, "`copy <n>` copies a card's tags.");
        }
        ResultView::Acknowledged { headline, detail } => {
            let _ = writeln!(out, "Result: {headline} {detail} `download` to save.");
        }
    }
}

fn status_label(screen: &ScreenView) -> String {
    let status = match screen.status {
        JobStatus::Idle => "idle",
        JobStatus::Processing => "processing",
        JobStatus::Completed => "completed",
    };
    match screen.progress_percent {
        Some(percent) => format!("{status} {} {percent}%", progress_bar(percent)),
        None => status.to_string(),
    }
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn blank_as_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        "-"
    } else {
        text
    }
}
