use std::{
    env,
    path::{self, Path, PathBuf},
};

use anyhow::Result;

use super::{CommandResult, CommandSummary, EditSummary};
use crate::cli::args::CatalogArgs;
use crate::config::{Config, load_config};
use crate::core::{Catalog, Session};

/// An opened catalog plus the configuration that applies to it.
pub struct CatalogContext {
    pub session: Session,
    pub config: Config,
    pub path: PathBuf,
    pub dry_run: bool,
}

impl CatalogContext {
    pub fn catalog(&self) -> Result<&Catalog> {
        Ok(self.session.catalog()?)
    }

    pub fn catalog_mut(&mut self) -> Result<&mut Catalog> {
        Ok(self.session.catalog_mut()?)
    }
}

/// Load the config found next to the catalog and open the catalog.
pub fn open(args: &CatalogArgs) -> Result<CatalogContext> {
    let path = path::absolute(&args.catalog).unwrap_or_else(|_| args.catalog.clone());
    let start_dir = match path.parent() {
        Some(parent) => parent.to_path_buf(),
        None => env::current_dir()?,
    };
    let config = load_config(&start_dir)?.config;

    let mut session = Session::new(config.recent_files());
    session.open(&args.catalog)?;

    Ok(CatalogContext {
        session,
        config,
        path,
        dry_run: args.dry_run,
    })
}

/// Save the catalog if it changed and this is not a dry run.
pub fn finish_edit(
    mut ctx: CatalogContext,
    message: String,
    changed: bool,
) -> Result<CommandResult> {
    if changed && !ctx.dry_run {
        ctx.session.save()?;
    }

    Ok(CommandResult::new(CommandSummary::Edit(EditSummary {
        catalog: display_path(&ctx.path),
        message,
        changed,
        is_dry_run: ctx.dry_run,
    })))
}

/// Path relative to the working directory when possible, for shorter output.
pub fn display_path(path: &Path) -> PathBuf {
    env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
}
