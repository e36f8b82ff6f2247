use log::LevelFilter;

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
}

impl AppSettings {
    pub fn load() -> Self {
        // Plain defaults for now; RUST_LOG-style overrides can hook in here.
        Self { full_screen: false, log_level: None }
    }
}
