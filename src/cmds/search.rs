use super::{list::print_results, utils::Session};
use crate::catalog::{Criteria, Query};
use anyhow::Result;

#[derive(Debug, clap::Parser)]
pub struct SearchArgs {
    /// Terms of the form field=text, e.g. genre=rock artist=beatles
    terms: Vec<String>,
}

#[derive(Debug, clap::Parser)]
pub struct FilterArgs {
    /// Matched against title, artist and genre
    #[arg(long)]
    text: Option<String>,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    status: Option<String>,
}

impl From<&FilterArgs> for Query {
    fn from(args: &FilterArgs) -> Self {
        Query {
            text: args.text.clone(),
            genre: args.genre.clone(),
            status: args.status.clone(),
        }
    }
}

pub fn search_albums(session: &Session, args: &SearchArgs) -> Result<()> {
    let criteria = Criteria::parse(&args.terms)?;
    if criteria.is_empty() {
        log::debug!("no criteria, listing everything");
    }
    print_results(&session.store.search_records(&criteria));
    Ok(())
}

pub fn filter_albums(session: &Session, args: &FilterArgs) -> Result<()> {
    print_results(&session.store.query(&Query::from(args)));
    Ok(())
}

pub fn list_genres(session: &Session) -> Result<()> {
    for genre in session.store.genres() {
        println!("{}", genre);
    }
    Ok(())
}

pub fn list_statuses(session: &Session) -> Result<()> {
    for status in session.store.statuses() {
        println!("{}", status);
    }
    Ok(())
}
