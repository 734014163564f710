use self::{
    data::{export_library, init_library, load_library, show_summary},
    data::{ExportArgs, InitArgs, LoadArgs, SummaryArgs},
    edit::{add_album, remove_album, update_album, AddArgs, RemoveArgs, UpdateArgs},
    import::{import_csv, import_tags, ImportCsvArgs, ImportTagsArgs},
    list::list_albums,
    search::{filter_albums, list_genres, list_statuses, search_albums, FilterArgs, SearchArgs},
    utils::Session,
};
use crate::config;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub mod data;
pub mod edit;
pub mod import;
pub mod list;
pub mod search;
pub mod utils;

#[derive(Debug, clap::Parser)]
#[command(name = "album-catalog", about = "Manage an album collection")]
pub struct AlbumCli {
    /// Library document, defaults to $ALBUM_CATALOG_PATH or ./albums.json
    #[arg(long, global = true)]
    library: Option<PathBuf>,
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    cmd: AlbumCmd,
}

#[derive(Debug, clap::Subcommand)]
enum AlbumCmd {
    Init(InitArgs),
    List,
    Add(AddArgs),
    Remove(RemoveArgs),
    Update(UpdateArgs),
    Search(SearchArgs),
    Filter(FilterArgs),
    Genres,
    Statuses,
    Summary(SummaryArgs),
    Export(ExportArgs),
    Load(LoadArgs),
    ImportCsv(ImportCsvArgs),
    ImportTags(ImportTagsArgs),
}

fn with_session(path: &Path, run: impl FnOnce(&mut Session) -> Result<()>) -> Result<()> {
    let mut session = Session::open(path)?;
    run(&mut session)?;
    session.close()
}

pub fn handle_commands(args: AlbumCli) -> Result<()> {
    let path = config::library_path(args.library.as_deref());
    log::debug!("library at {}", path.display());

    match &args.cmd {
        AlbumCmd::Init(args) => init_library(&path, args),
        AlbumCmd::List => with_session(&path, |s| list_albums(s)),
        AlbumCmd::Add(args) => with_session(&path, |s| add_album(s, args)),
        AlbumCmd::Remove(args) => with_session(&path, |s| remove_album(s, args)),
        AlbumCmd::Update(args) => with_session(&path, |s| update_album(s, args)),
        AlbumCmd::Search(args) => with_session(&path, |s| search_albums(s, args)),
        AlbumCmd::Filter(args) => with_session(&path, |s| filter_albums(s, args)),
        AlbumCmd::Genres => with_session(&path, |s| list_genres(s)),
        AlbumCmd::Statuses => with_session(&path, |s| list_statuses(s)),
        AlbumCmd::Summary(args) => with_session(&path, |s| show_summary(s, args)),
        AlbumCmd::Export(args) => with_session(&path, |s| export_library(s, args)),
        AlbumCmd::Load(args) => {
            let mut session = Session::replacing(&path);
            load_library(&mut session, args)?;
            session.close()
        }
        AlbumCmd::ImportCsv(args) => with_session(&path, |s| import_csv(s, args)),
        AlbumCmd::ImportTags(args) => with_session(&path, |s| import_tags(s, args)),
    }
}
