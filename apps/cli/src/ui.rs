use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use vidsum_core::Notifier;

pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}

pub fn print_banner(subtitle: &str) {
    println!(
        "\n{}  {}\n",
        style("vidsum").cyan().bold(),
        style(subtitle).dim()
    );
}

pub fn print_rule() {
    println!("{}", style("─".repeat(60)).dim());
}

/// Alerts go to stderr so piped summaries stay clean
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{} {}", style("›").cyan().bold(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_under_a_minute_show_tenths() {
        assert_eq!(format_duration(Duration::from_millis(4_300)), "4.3s");
    }

    #[test]
    fn longer_durations_show_minutes_and_seconds() {
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }
}
