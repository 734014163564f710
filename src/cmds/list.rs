use super::utils::Session;
use crate::catalog::{AlbumRecord, Summary};
use anyhow::Result;
use comfy_table::Table;

pub fn albums_table<'a>(records: impl IntoIterator<Item = &'a AlbumRecord>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["id", "title", "artist", "year", "genre", "status", "rating"]);
    for album in records {
        table.add_row(vec![
            album.id.to_string(),
            album.title.clone(),
            album.artist.chars().take(30).collect(),
            album.year_published.to_string(),
            album.genre.clone(),
            album.status.clone(),
            stars(album.rating),
        ]);
    }
    table
}

pub fn stars(rating: u8) -> String {
    format!("{:☆<5}", "★".repeat(rating as usize))
}

pub fn print_results(records: &[&AlbumRecord]) {
    if records.is_empty() {
        println!("No matching records found.");
    } else {
        println!("Found {} result(s):", records.len());
        println!("{}", albums_table(records.iter().copied()));
    }
}

pub fn print_summary(summary: &Summary) {
    println!("\n--- Collection Summary ---");
    println!("{}", summary);
}

pub fn list_albums(session: &Session) -> Result<()> {
    let store = &session.store;
    println!("=== {} ===", store.project_name());
    if store.is_empty() {
        println!("No albums in your collection yet.");
    } else {
        println!("{}", albums_table(store.records()));
    }
    println!(
        "Total: {} (last updated {})",
        store.metadata().total_records,
        store.metadata().last_updated.format("%Y-%m-%d %H:%M:%S")
    );
    print_summary(&store.generate_summary());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Library;

    #[test]
    fn stars_pad_to_five() {
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(5), "★★★★★");
    }

    #[test]
    fn table_has_a_row_per_album() {
        let library = Library::seed();
        let rendered = albums_table(&library.records).to_string();
        assert!(rendered.contains("Abbey Road"));
        assert!(rendered.contains("Jeff Buckley"));
        assert!(rendered.contains("★★★★☆"));
    }
}
