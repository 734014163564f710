use super::utils::Session;
use crate::catalog::{AlbumPatch, Candidate, Field, RecordId};
use anyhow::{Context, Result};
use serde_json::Value;

#[derive(Debug, clap::Parser)]
pub struct AddArgs {
    /// Album as a JSON object; the flags below override its fields
    #[arg(long)]
    json: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    artist: Option<String>,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    year: Option<i64>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    rating: Option<i64>,
}

impl AddArgs {
    fn candidate(&self) -> Result<Candidate> {
        let mut candidate = match &self.json {
            Some(json) => Candidate::from_json(json).context("--json must be a JSON object")?,
            None => Candidate::new(),
        };
        let fields = [
            (Field::Title, self.title.clone().map(Value::from)),
            (Field::Artist, self.artist.clone().map(Value::from)),
            (Field::Genre, self.genre.clone().map(Value::from)),
            (Field::YearPublished, self.year.map(Value::from)),
            (Field::Status, self.status.clone().map(Value::from)),
            (Field::Rating, self.rating.map(Value::from)),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                candidate.set(field, value);
            }
        }
        Ok(candidate)
    }
}

#[derive(Debug, clap::Parser)]
pub struct RemoveArgs {
    #[arg(long)]
    id: RecordId,
}

#[derive(Debug, clap::Parser)]
pub struct UpdateArgs {
    #[arg(long)]
    id: RecordId,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    artist: Option<String>,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    year: Option<i64>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    rating: Option<i64>,
}

impl UpdateArgs {
    fn patch(&self) -> AlbumPatch {
        AlbumPatch {
            title: self.title.clone(),
            artist: self.artist.clone(),
            genre: self.genre.clone(),
            year_published: self.year,
            status: self.status.clone(),
            rating: self.rating,
        }
    }
}

pub fn add_album(session: &mut Session, args: &AddArgs) -> Result<()> {
    let candidate = args.candidate()?;
    let id = session.store.add_record(&candidate)?;
    println!("added album id={}", id);
    Ok(())
}

pub fn remove_album(session: &mut Session, args: &RemoveArgs) -> Result<()> {
    let removed = session.store.remove_record(args.id)?;
    println!("removed \"{}\" by {}", removed.title, removed.artist);
    Ok(())
}

pub fn update_album(session: &mut Session, args: &UpdateArgs) -> Result<()> {
    let patch = args.patch();
    if patch.is_empty() {
        log::warn!("no fields given, only the timestamp changes");
    }
    let album = session.store.update_record(args.id, &patch)?;
    println!(
        "{}. \"{}\" by {} ({}) - {} | Rating: {}/5",
        album.id, album.title, album.artist, album.year_published, album.genre, album.rating
    );
    Ok(())
}
