//! Output formatting for the CLI.

use console::{style, Term};
use feed_state::LoadPhase;
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stdout(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            let body = serde_json::json!({ "error": msg });
            eprintln!("{}", body);
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print rendered page text, highlighting the failure banner.
    pub fn page(&self, text: &str) {
        if self.json {
            return;
        }
        for line in text.lines() {
            if line.starts_with("! ") {
                println!("{}", style(line).red().bold());
            } else if line.starts_with('░') {
                println!("{}", style(line).dim());
            } else {
                println!("{}", line);
            }
        }
    }

    /// Spinner for indeterminate waits.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Clear the terminal before a redraw.
    pub fn clear_screen(&self) {
        if self.json {
            return;
        }
        if let Err(e) = self.term.clear_screen() {
            tracing::debug!(error = %e, "failed to clear terminal");
        }
    }

    /// Terminal used for key input.
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Status line for the browse view.
pub fn phase_badge(phase: LoadPhase) -> String {
    match phase {
        LoadPhase::Loading => style("loading").yellow().to_string(),
        LoadPhase::Refetching => style("updating").yellow().to_string(),
        LoadPhase::Ready => style("ready").green().to_string(),
        LoadPhase::Idle => style("idle").dim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_screen_off_terminal() {
        // Test stdout is not a terminal; clearing must not panic in either mode.
        Output::new(true, false).clear_screen();
        Output::new(false, true).clear_screen();
    }

    #[test]
    fn test_phase_badge_text() {
        console::set_colors_enabled(false);
        assert_eq!(phase_badge(LoadPhase::Loading), "loading");
        assert_eq!(phase_badge(LoadPhase::Refetching), "updating");
        assert_eq!(phase_badge(LoadPhase::Ready), "ready");
        assert_eq!(phase_badge(LoadPhase::Idle), "idle");
    }
}
