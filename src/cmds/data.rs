use super::{
    list::print_summary,
    utils::{write_library, Session},
};
use crate::catalog::AlbumStore;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, clap::Parser)]
pub struct InitArgs {
    /// Overwrite an existing library file
    #[arg(long)]
    force: bool,
}

#[derive(Debug, clap::Parser)]
pub struct SummaryArgs {
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Parser)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, clap::Parser)]
pub struct LoadArgs {
    pub input: PathBuf,
}

pub fn init_library(path: &Path, args: &InitArgs) -> Result<()> {
    if path.exists() && !args.force {
        bail!("{} already exists, pass --force to overwrite", path.display());
    }
    let store = AlbumStore::seeded();
    write_library(&store, path)?;
    log::info!("wrote {} seed albums to {}", store.len(), path.display());
    Ok(())
}

pub fn show_summary(session: &Session, args: &SummaryArgs) -> Result<()> {
    let summary = session.store.generate_summary();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

pub fn export_library(session: &Session, args: &ExportArgs) -> Result<()> {
    let json = session.store.save_data()?;
    match &args.out {
        Some(out) => {
            std::fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
            log::info!("exported {} albums to {}", session.store.len(), out.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Replaces the library with `args.input`. A rejected document leaves the
/// library file as it was.
pub fn load_library(session: &mut Session, args: &LoadArgs) -> Result<()> {
    let json = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    session.store.load_data(&json)?;
    log::info!(
        "{} now holds '{}'",
        session.path().display(),
        session.store.project_name()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Library;

    #[test]
    fn init_refuses_to_clobber() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("albums.json");
        init_library(&path, &InitArgs { force: false }).unwrap();
        assert!(init_library(&path, &InitArgs { force: false }).is_err());
        init_library(&path, &InitArgs { force: true }).unwrap();

        let session = Session::open(&path).unwrap();
        assert_eq!(session.store.len(), 6);
    }

    #[test]
    fn export_then_load_into_another_library() {
        let dir = tempfile::tempdir().unwrap();
        let exported = dir.path().join("export.json");

        let mut source = Session::open(&dir.path().join("a.json")).unwrap();
        source.store.remove_record(3).unwrap();
        export_library(
            &source,
            &ExportArgs {
                out: Some(exported.clone()),
            },
        )
        .unwrap();

        let target_path = dir.path().join("b.json");
        std::fs::write(
            &target_path,
            serde_json::to_string(&Library::empty("Empty")).unwrap(),
        )
        .unwrap();
        let mut target = Session::open(&target_path).unwrap();
        load_library(&mut target, &LoadArgs { input: exported }).unwrap();
        assert!(target.is_changed());
        assert_eq!(target.store.records(), source.store.records());
        target.close().unwrap();

        let reopened = Session::open(&target_path).unwrap();
        assert_eq!(reopened.store.len(), 5);
    }

    #[test]
    fn rejected_document_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"{"projectName": "x", "records": "nope"}"#).unwrap();

        let mut session = Session::open(&dir.path().join("albums.json")).unwrap();
        assert!(load_library(&mut session, &LoadArgs { input: bad }).is_err());
        assert!(!session.is_changed());
        assert_eq!(session.store.len(), 6);
    }
}
