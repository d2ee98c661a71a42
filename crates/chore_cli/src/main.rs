//! CLI smoke entry point.
//!
//! Prints core linkage info and the landing navigation so the core crate can
//! be checked without a Flutter host.

use chore_core::{core_version, landing_page, ping, Screen, TrackerConfig};

fn main() {
    let config = TrackerConfig::from_env();
    match config.init_logging() {
        Ok(true) => {
            if let Some(dir) = config.log_dir.as_deref() {
                println!("logging level={} dir={}", config.log_level, dir.display());
            }
        }
        Ok(false) => {}
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    println!("chore_core ping={}", ping());
    println!("chore_core version={}", core_version());

    let page = landing_page();
    println!("{} - {}", page.title, page.tagline);
    for link in &page.links {
        println!("  {} {}", link.label, link.href());
    }
    for screen in [Screen::Setup, Screen::Checklist] {
        if let Some(link) = screen.header_link() {
            println!("  [{}] {} {}", screen.title(), link.label, link.href());
        }
    }
}
