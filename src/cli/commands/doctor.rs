//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Talt Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    // Check external tools
    println!("{}", style("External Tools").bold());
    checks.push(check_tool(
        &settings.tools.downloader,
        install_hint_downloader(),
    ));
    checks.push(check_tool(
        &settings.tools.transcoder,
        install_hint_transcoder(),
    ));
    for check in &checks[checks.len() - 2..] {
        check.print();
    }

    println!();

    // Check engine configuration
    println!("{}", style("Speech Engine").bold());
    let engine_checks = check_engine(settings);
    for check in &engine_checks {
        check.print();
    }
    checks.extend(engine_checks);

    println!();

    // Check directories
    println!("{}", style("Directories").bold());
    let dir_check = check_download_dir(settings);
    dir_check.print();
    checks.push(dir_check);

    println!();

    // Check configuration
    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Talt.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Talt is ready to use.");
    }

    Ok(())
}

/// Check if an external tool is available.
fn check_tool(name: &str, hint: &'static str) -> CheckResult {
    let version_arg = match name {
        "ffmpeg" | "ffprobe" => "-version",
        _ => "--version",
    };

    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();

            let version_display = if version.len() > 50 {
                format!("{}...", &version[..50])
            } else {
                version
            };

            CheckResult::ok(name, &version_display)
        }
        Ok(_) => CheckResult::error(name, "installed but not working", hint),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            CheckResult::error(name, "not found", hint)
        }
        Err(e) => CheckResult::error(name, &format!("error: {}", e), hint),
    }
}

/// Check the configured engine binary and model file.
fn check_engine(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    if settings.engine.binary.trim().is_empty() {
        results.push(CheckResult::error(
            "Engine binary",
            "not configured",
            "Set engine.binary in your config (talt config edit)",
        ));
    } else {
        let binary = settings.engine_binary();
        if binary.exists() {
            results.push(CheckResult::ok("Engine binary", &format!("{}", binary.display())));
        } else {
            results.push(CheckResult::error(
                "Engine binary",
                &format!("{} does not exist", binary.display()),
                "Point engine.binary at your whisper.cpp CLI build",
            ));
        }
    }

    if settings.engine.model.trim().is_empty() {
        results.push(CheckResult::error(
            "Model file",
            "not configured",
            "Set engine.model in your config (talt config edit)",
        ));
    } else {
        let model = settings.model_path();
        if model.exists() {
            results.push(CheckResult::ok("Model file", &format!("{}", model.display())));
        } else {
            results.push(CheckResult::error(
                "Model file",
                &format!("{} does not exist", model.display()),
                "Download a ggml model and point engine.model at it",
            ));
        }
    }

    results.push(CheckResult::ok(
        "Language",
        &settings.engine.language,
    ));

    results
}

/// Check the download directory.
fn check_download_dir(settings: &Settings) -> CheckResult {
    let dir = settings.download_dir();
    if dir.exists() {
        CheckResult::ok("Download directory", &format!("{}", dir.display()))
    } else {
        CheckResult::warning(
            "Download directory",
            &format!("{} (will be created)", dir.display()),
            "Directory will be created on first use",
        )
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: talt config edit",
        )
    }
}

/// Platform-specific install hint for the downloader.
fn install_hint_downloader() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}

/// Platform-specific install hint for the transcoder.
fn install_hint_transcoder() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install ffmpeg"
    } else if cfg!(target_os = "linux") {
        "Install with: sudo apt install ffmpeg (or your package manager)"
    } else {
        "Install from: https://ffmpeg.org/download.html"
    }
}
