use std::path::Path;
use std::process::ExitCode;

use contact::{ContactApp, ContactConfig};
use i18n::{FilePreferences, MemoryPreferences, PreferenceStore};
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const CONFIG_PATH: &str = "contact.toml";
// Reported to the form until the window tells us its real size.
const INITIAL_WIDTH: f32 = 1280.0;

fn preferences(config: &ContactConfig) -> Box<dyn PreferenceStore> {
    let Some(path) = &config.preferences.path else {
        return Box::new(MemoryPreferences::new());
    };
    match FilePreferences::open(path) {
        Ok(prefs) => Box::new(prefs),
        Err(err) => {
            log::warn!("{err}; language choice will not be remembered");
            Box::new(MemoryPreferences::new())
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match ContactConfig::load_or_default(Path::new(CONFIG_PATH)) {
        Ok(cfg) => cfg,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let app = match ContactApp::new(&config, preferences(&config), INITIAL_WIDTH) {
        Ok(app) => app,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = platform::run(Box::new(app), "Portfolio") {
        log::error!("{err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
