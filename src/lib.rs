mod builtin;
mod check;
#[cfg(not(target_arch = "wasm32"))]
mod cli;
mod config;
mod controller;
mod html;
mod page;
mod palette;
#[cfg(not(target_arch = "wasm32"))]
mod poll;
#[cfg(not(target_arch = "wasm32"))]
mod progress;
mod store;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context as _;

pub use builtin::render_stylesheet;
pub use check::{CheckReport, check_page};
pub use config::ThemeConfig;
pub use controller::{Attach, Startup, THEME_ATTRIBUTE, ThemeController};
pub use html::HtmlPage;
pub use page::{MemoryStore, Page, ThemeStore, ToggleButton};
pub use palette::{MOON, Palette, ROLES, Role, SUN, Theme, ToggleLabel};
pub use store::FileStore;

#[cfg(not(target_arch = "wasm32"))]
pub use cli::{Args as CliArgs, Command, PageArgs, ProgressMode};
#[cfg(not(target_arch = "wasm32"))]
pub use poll::{PollError, attach_when_ready, poll_until};
#[cfg(target_arch = "wasm32")]
pub use web::{LocalStorage, WebPage, install, is_polling, nav_ready, toggle_theme};

#[cfg(not(target_arch = "wasm32"))]
pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    let config = args.theme_config();
    let mut store = FileStore::open(&args.store)?;

    let outcome = execute(&args, &config, &mut store).await;
    // Pages written before a failure already show the stored theme.
    let saved = store.save();
    outcome.and(saved)
}

#[cfg(not(target_arch = "wasm32"))]
async fn execute(
    args: &CliArgs,
    config: &ThemeConfig,
    store: &mut FileStore,
) -> anyhow::Result<()> {
    match &args.command {
        Command::Init {
            pages,
            wait,
            timeout_ms,
            ..
        } => {
            let period = config.poll_interval;
            let timeout = timeout_ms.map(Duration::from_millis);
            let progress = progress_for(args.progress, pages.pages.len());
            progress.set_stage("applying saved theme");
            for path in &pages.pages {
                let page = if *wait {
                    wait_for_nav(path, &config.nav_selector, period, timeout)
                        .await
                        .with_context(|| format!("wait for navigation in {}", path.display()))?
                } else {
                    HtmlPage::load(path)?
                };
                let mut controller = ThemeController::new(page, &mut *store, config.clone());
                let attached = controller.init_theme() == Attach::Attached;
                if !attached {
                    tracing::info!(
                        path = %path.display(),
                        selector = %config.nav_selector,
                        "navigation container not found; toggle not attached"
                    );
                }
                let (page, _) = controller.into_parts();
                page.save(&output_path(path, pages.out.as_deref()))?;
                progress.page_done(path, attached);
            }
            progress.finish();
        }
        Command::Set { theme, pages } => {
            let progress = progress_for(args.progress, pages.pages.len());
            progress.set_stage(format!("applying {theme}"));
            if pages.pages.is_empty() {
                store.set(&config.storage_key, theme.as_str());
            }
            for path in &pages.pages {
                let mut controller =
                    ThemeController::new(HtmlPage::load(path)?, &mut *store, config.clone());
                controller.apply_theme(*theme);
                let attached = controller.update_toggle_button(*theme);
                let (page, _) = controller.into_parts();
                page.save(&output_path(path, pages.out.as_deref()))?;
                progress.page_done(path, attached);
            }
            progress.finish();
            tracing::info!(theme = %theme, "theme set");
        }
        Command::Toggle { pages } => {
            if pages.pages.is_empty() {
                // A fresh page that loaded the saved theme, then got toggled.
                let mut controller =
                    ThemeController::new(HtmlPage::parse(""), &mut *store, config.clone());
                controller.init_theme();
                let next = controller.toggle_theme();
                println!("{next}");
            }
            let progress = progress_for(args.progress, pages.pages.len());
            progress.set_stage("toggling");
            for path in &pages.pages {
                let mut controller =
                    ThemeController::new(HtmlPage::load(path)?, &mut *store, config.clone());
                let next = controller.toggle_theme();
                let attached = controller.page().has_element_id(&config.toggle_id);
                let (page, _) = controller.into_parts();
                page.save(&output_path(path, pages.out.as_deref()))?;
                progress.page_done(path, attached);
                println!("{}\t{next}", path.display());
            }
            progress.finish();
        }
        Command::Show => {
            let controller = ThemeController::new(HtmlPage::parse(""), &mut *store, config.clone());
            let theme = controller.saved_theme();
            let label = ToggleLabel::for_theme(theme);
            println!("{theme}\t{}\t{}", label.glyph, label.aria_label);
        }
        Command::Check { pages } => {
            for path in pages {
                let html = std::fs::read_to_string(path)
                    .with_context(|| format!("read {}", path.display()))?;
                let report =
                    check_page(&html, config).with_context(|| format!("check {}", path.display()))?;
                println!(
                    "{}\t{}\t{} properties\t{}",
                    path.display(),
                    report.theme,
                    report.properties_checked,
                    if report.has_toggle { "toggle" } else { "no toggle" }
                );
            }
        }
        Command::Stylesheet { out } => {
            let css = render_stylesheet(config);
            match out {
                Some(out) => write_file(out, &css)?,
                None => print!("{css}"),
            }
        }
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn progress_for(mode: ProgressMode, total_pages: usize) -> progress::Progress {
    use std::io::IsTerminal as _;

    let enabled = match mode {
        ProgressMode::Always => true,
        ProgressMode::Never => false,
        ProgressMode::Auto => std::io::stderr().is_terminal(),
    };
    progress::Progress::new(enabled && total_pages > 0, total_pages)
}

/// Re-reads `path` until it parses with a `selector` match. A page that does
/// not exist yet counts as not ready; any other read error ends the wait.
#[cfg(not(target_arch = "wasm32"))]
async fn wait_for_nav(
    path: &Path,
    selector: &str,
    period: Duration,
    timeout: Option<Duration>,
) -> anyhow::Result<HtmlPage> {
    let page = poll_until(period, timeout, || match std::fs::read_to_string(path) {
        Ok(text) => {
            let page = HtmlPage::parse(&text);
            Ok(page.contains(selector).then_some(page))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow::Error::new(e).context(format!("read {}", path.display()))),
    })
    .await?;
    Ok(page)
}

#[cfg(not(target_arch = "wasm32"))]
fn output_path(path: &Path, out_dir: Option<&Path>) -> PathBuf {
    match (out_dir, path.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_file(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
    }
    std::fs::write(path, text).with_context(|| format!("write {}", path.display()))
}
