use super::utils::Session;
use crate::catalog::{AlbumStore, Candidate, Field};
use anyhow::Result;
use id3::{Tag, TagLike};
use kdam::BarExt;
use serde::Deserialize;
use std::{
    io::Read,
    path::{Path, PathBuf},
};

pub const UNKNOWN_GENRE: &str = "Unknown";

#[derive(Debug, clap::Parser)]
pub struct ImportCsvArgs {
    /// CSV with header title,artist,genre,yearPublished,status,rating
    pub input: PathBuf,
}

#[derive(Debug, clap::Parser)]
pub struct ImportTagsArgs {
    pub directory: PathBuf,
    #[arg(long, default_value = "unlistened")]
    pub status: String,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvAlbum {
    title: Option<String>,
    artist: Option<String>,
    genre: Option<String>,
    year_published: Option<i64>,
    status: Option<String>,
    rating: Option<i64>,
}

impl From<CsvAlbum> for Candidate {
    fn from(row: CsvAlbum) -> Self {
        let mut candidate = Candidate::new();
        if let Some(title) = row.title {
            candidate.set(Field::Title, title);
        }
        if let Some(artist) = row.artist {
            candidate.set(Field::Artist, artist);
        }
        if let Some(genre) = row.genre {
            candidate.set(Field::Genre, genre);
        }
        if let Some(year) = row.year_published {
            candidate.set(Field::YearPublished, year);
        }
        if let Some(status) = row.status {
            candidate.set(Field::Status, status);
        }
        if let Some(rating) = row.rating {
            candidate.set(Field::Rating, rating);
        }
        candidate
    }
}

fn add_rows<R: Read>(store: &mut AlbumStore, reader: R) -> Result<ImportReport> {
    let mut report = ImportReport::default();
    let mut rdr = csv::Reader::from_reader(reader);
    for (line, row) in rdr.deserialize::<CsvAlbum>().enumerate() {
        let added = row
            .map_err(anyhow::Error::from)
            .and_then(|row| Ok(store.add_record(&Candidate::from(row))?));
        match added {
            Ok(id) => {
                log::debug!("row {} added as id={}", line + 1, id);
                report.added += 1;
            }
            Err(e) => {
                log::warn!("row {} skipped: {}", line + 1, e);
                report.skipped += 1;
            }
        }
    }
    Ok(report)
}

pub fn import_csv(session: &mut Session, args: &ImportCsvArgs) -> Result<()> {
    let file = std::fs::File::open(&args.input)?;
    let report = add_rows(&mut session.store, file)?;
    println!("{} added, {} skipped", report.added, report.skipped);
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackTags {
    pub album: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

impl TrackTags {
    fn read(path: &Path) -> Option<Self> {
        let tag = match Tag::read_from_path(path) {
            Ok(tag) => tag,
            Err(e) => {
                log::debug!("{}: {}", path.display(), e);
                return None;
            }
        };
        Some(Self {
            album: tag.album().map(str::to_string),
            artist: tag.album_artist().or(tag.artist()).map(str::to_string),
            genre: tag.genre().map(str::to_string),
            year: tag.year(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaggedAlbum {
    pub title: String,
    pub artist: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

impl TaggedAlbum {
    fn candidate(&self, status: &str) -> Candidate {
        let mut candidate = Candidate::new()
            .with(Field::Title, self.title.as_str())
            .with(Field::Artist, self.artist.as_str())
            .with(
                Field::Genre,
                self.genre.as_deref().unwrap_or(UNKNOWN_GENRE),
            )
            .with(Field::Status, status)
            .with(Field::Rating, 0);
        if let Some(year) = self.year {
            candidate.set(Field::YearPublished, year);
        }
        candidate
    }
}

/// One album per distinct (album, artist) pair, in the order first seen.
/// Tracks without an album or artist tag are ignored.
pub fn group_albums(tracks: impl IntoIterator<Item = TrackTags>) -> Vec<TaggedAlbum> {
    let mut albums: Vec<TaggedAlbum> = vec![];
    for track in tracks {
        let (Some(title), Some(artist)) = (track.album, track.artist) else {
            continue;
        };
        match albums
            .iter_mut()
            .find(|a| a.title == title && a.artist == artist)
        {
            Some(album) => {
                album.genre = album.genre.take().or(track.genre);
                album.year = album.year.or(track.year);
            }
            None => albums.push(TaggedAlbum {
                title,
                artist,
                genre: track.genre,
                year: track.year,
            }),
        }
    }
    albums
}

fn mp3_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(mp3_files(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn add_albums(store: &mut AlbumStore, albums: &[TaggedAlbum], status: &str) -> ImportReport {
    let mut report = ImportReport::default();
    for album in albums {
        let known = store.records().iter().any(|r| {
            r.title.eq_ignore_ascii_case(&album.title) && r.artist.eq_ignore_ascii_case(&album.artist)
        });
        if known {
            log::debug!("\"{}\" by {} already in library", album.title, album.artist);
            report.skipped += 1;
            continue;
        }
        match store.add_record(&album.candidate(status)) {
            Ok(_) => report.added += 1,
            Err(e) => {
                log::warn!("\"{}\" by {} skipped: {}", album.title, album.artist, e);
                report.skipped += 1;
            }
        }
    }
    report
}

pub fn import_tags(session: &mut Session, args: &ImportTagsArgs) -> Result<()> {
    let files = mp3_files(&args.directory)?;
    log::debug!("{} mp3 files under {}", files.len(), args.directory.display());

    let mut pb = kdam::tqdm!(total = files.len());
    let mut tracks = vec![];
    for file in files.iter() {
        if let Some(tags) = TrackTags::read(file) {
            tracks.push(tags);
        }
        pb.update(1)?;
    }

    let albums = group_albums(tracks);
    let report = add_albums(&mut session.store, &albums, &args.status);
    println!(
        "{} albums found, {} added, {} skipped",
        albums.len(),
        report.added,
        report.skipped
    );
    Ok(())
}
