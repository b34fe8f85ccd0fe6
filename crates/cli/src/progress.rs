use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Kinds of waits the views show a spinner for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressType {
    /// Local work: loading the fixture, writing a file
    Fast,
    /// One completion request, bounded by the gateway timeout
    Gateway,
    /// Report documents (invoice, HR request, forecast)
    Report,
}

#[derive(Debug, Clone)]
pub struct ProgressConfig {
    pub spinner_chars: &'static str,
    pub tick_interval: Duration,
    pub color: &'static str,
    pub success_message: &'static str,
}

impl ProgressType {
    pub fn config(self) -> ProgressConfig {
        match self {
            ProgressType::Fast => ProgressConfig {
                spinner_chars: "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏",
                tick_interval: Duration::from_millis(80),
                color: "cyan",
                success_message: "✓ Done",
            },
            ProgressType::Gateway => ProgressConfig {
                spinner_chars: "⠋⠙⠚⠞⠖⠦⠴⠲⠳⠓",
                tick_interval: Duration::from_millis(120),
                color: "blue",
                success_message: "✓ Answer received",
            },
            ProgressType::Report => ProgressConfig {
                spinner_chars: "⠋⠙⠚⠒⠂⠂⠒⠲⠴⠦⠖⠒⠐⠐⠒⠓⠋",
                tick_interval: Duration::from_millis(150),
                color: "yellow",
                success_message: "✓ Document generated",
            },
        }
    }

    pub fn create_spinner(self, message: &str) -> AdaptiveSpinner {
        let config = self.config();
        let spinner = ProgressBar::new_spinner();

        let template = format!("{{spinner:.{}}} {{msg}}", config.color);
        let bar_style = ProgressStyle::default_spinner()
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(config.spinner_chars);
        spinner.set_style(bar_style);

        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(config.tick_interval);

        AdaptiveSpinner { spinner, config }
    }
}

/// Spinner on stderr; hidden automatically when stderr is not a terminal
pub struct AdaptiveSpinner {
    spinner: ProgressBar,
    config: ProgressConfig,
}

impl AdaptiveSpinner {
    pub fn set_message(&self, message: &str) {
        self.spinner.set_message(message.to_string());
    }

    pub fn finish_success(&self, message: Option<&str>) {
        let msg = message.unwrap_or(self.config.success_message);
        let styled = match self.config.color {
            "blue" => style(msg).blue(),
            "yellow" => style(msg).yellow(),
            "cyan" => style(msg).cyan(),
            _ => style(msg).green(),
        };
        self.spinner.finish_with_message(styled.to_string());
    }

    pub fn finish_error(&self, message: &str) {
        self.spinner
            .finish_with_message(style(format!("✗ {message}")).red().to_string());
    }

    pub fn finish_and_clear(&self) {
        self.spinner.finish_and_clear();
    }
}

pub struct ProgressBuilder;

impl ProgressBuilder {
    pub fn fast(message: &str) -> AdaptiveSpinner {
        ProgressType::Fast.create_spinner(message)
    }

    pub fn gateway(message: &str) -> AdaptiveSpinner {
        ProgressType::Gateway.create_spinner(message)
    }

    pub fn report(message: &str) -> AdaptiveSpinner {
        ProgressType::Report.create_spinner(message)
    }
}
