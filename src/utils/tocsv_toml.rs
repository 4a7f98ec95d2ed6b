//! Load `.tocsv.toml` from the input directory (CLI only). Lib callers pass ConvertOpts directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::ConvertOpts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Deserialize)]
pub(crate) struct TocsvToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    workers: Option<usize>,
    exclude: Option<Vec<String>>,
    follow_links: Option<bool>,
    level: Option<u32>,
    path_cap: Option<usize>,
    record_cap: Option<usize>,
    verbose: Option<bool>,
}

/// Load `.tocsv.toml` from `dir`. `Ok(None)` when the file is absent; `Err` when it exists but
/// cannot be read or parsed (the CLI logs this and carries on with defaults).
pub(crate) fn load_tocsv_toml(dir: &Path) -> Result<Option<TocsvToml>> {
    let path = PackagePaths::get().config_path_for(dir);
    if !path.is_file() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let file = parse_tocsv_toml(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(file))
}

pub(crate) fn parse_tocsv_toml(s: &str) -> std::result::Result<TocsvToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $field:ident => $opts_field:ident) => {
        if let Some(v) = $section.$field {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI.
/// Input and output paths are never read from the file.
pub(crate) fn apply_file_to_opts(file: &TocsvToml, opts: &mut ConvertOpts) {
    let s = &file.settings;
    if let Some(n) = s.workers {
        opts.num_workers = Some(n);
    }
    if let Some(ref v) = s.exclude {
        opts.exclude = v.clone();
    }
    apply_file_opt!(s, opts, follow_links => follow_links);
    apply_file_opt!(s, opts, level => level);
    apply_file_opt!(s, opts, path_cap => path_cap);
    apply_file_opt!(s, opts, record_cap => record_cap);
    apply_file_opt!(s, opts, verbose => verbose);
}
