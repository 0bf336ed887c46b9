//! Locations of the data files the core is wired to

use crate::history::FileHistoryStore;
use crate::imports::*;
use crate::rules::RuleBook;
use crate::wagon::{import_wagon_catalog, WagonCatalogTable};
use directories::ProjectDirs;

pub const CONFIG_FILE_NAME: &str = "railguard.yaml";

/// Returns the per-user data directory for railguard, joined with `subpath`
/// and created if missing
pub fn create_project_subdir<P: AsRef<Path>>(subpath: P) -> anyhow::Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("org", "railguard", "railguard").ok_or_else(|| {
        anyhow!(
            "{}\nCould not build path to project directory: \"org.railguard.railguard\"",
            format_dbg!()
        )
    })?;
    let path = PathBuf::from(proj_dirs.data_dir()).join(subpath);
    std::fs::create_dir_all(path.as_path())
        .with_context(|| format!("{}\ncould not create {path:?}", format_dbg!()))?;
    Ok(path)
}

/// Paths to the wagon catalog, the rule tables and the history file.
/// Relative paths are resolved against the directory of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailguardConfig {
    pub wagon_catalog: PathBuf,
    /// Without a brake speed table the threshold speed rule applies
    #[serde(default)]
    pub brake_speed_table: Option<PathBuf>,
    pub danger_matrix: PathBuf,
    pub history: PathBuf,
}

impl SerdeAPI for RailguardConfig {
    fn init(&mut self) -> anyhow::Result<()> {
        ensure!(
            !self.wagon_catalog.as_os_str().is_empty()
                && !self.danger_matrix.as_os_str().is_empty()
                && !self.history.as_os_str().is_empty(),
            Error::InitError(format!(
                "{}\nwagon catalog, danger matrix and history paths must be set",
                format_dbg!()
            ))
        );
        Ok(())
    }
}

impl RailguardConfig {
    /// Config with every file inside `dir`, under its conventional name
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            wagon_catalog: dir.join("wagon_catalog.csv"),
            brake_speed_table: Some(dir.join("brake_speed_table.csv")),
            danger_matrix: dir.join("danger_matrix.csv"),
            history: dir.join("history.yaml"),
        }
    }

    /// Default config file in the per-user data directory
    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(create_project_subdir("")?.join(CONFIG_FILE_NAME))
    }

    /// Reads the config at `path` and makes its relative paths absolute with
    /// respect to the config's own directory
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut config = Self::from_file(path, false)
            .with_context(|| format!("{}\nfailed to load config {path:?}", format_dbg!()))?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.wagon_catalog);
        if let Some(table) = self.brake_speed_table.as_mut() {
            resolve(table);
        }
        resolve(&mut self.danger_matrix);
        resolve(&mut self.history);
    }

    pub fn load_catalog(&self) -> anyhow::Result<WagonCatalogTable> {
        import_wagon_catalog(&self.wagon_catalog)
    }

    pub fn load_rule_book(&self) -> anyhow::Result<RuleBook> {
        RuleBook::from_csv_files(self.brake_speed_table.as_ref(), &self.danger_matrix)
    }

    pub fn history_store(&self) -> anyhow::Result<FileHistoryStore> {
        FileHistoryStore::open(&self.history)
    }
}
