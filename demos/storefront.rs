//! Storefront Demo
//!
//! Drives a storefront session over a fixture catalog from the command line.
//!
//! Use `browse` to list the catalog with filters and sorting
//! Use `search` for search-as-you-type results
//! Use `checkout` to buy books and print a receipt
//! Use `read` to page through a book, optionally after buying it

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tabled::{builder::Builder, settings::Style};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use bookstall::{
    books::Book,
    catalog::{CatalogQuery, CategoryFilter, PriceRange, SortOrder},
    context::Storefront,
    fixtures::Fixture,
    reader::ReaderDisplay,
    storage::YamlFileStorage,
};

/// Storefront demo configuration
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Bookstall storefront demo", long_about = None)]
struct DemoConfig {
    /// Fixture set to load books from
    #[arg(short, long, env = "BOOKSTALL_FIXTURE", default_value = "demo")]
    fixture: String,

    /// Directory containing fixture sets
    #[arg(long, env = "BOOKSTALL_FIXTURES_DIR", default_value = "./fixtures")]
    fixtures_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the catalog
    Browse(BrowseArgs),

    /// Quick search over title, author and category
    Search {
        /// Search text
        query: String,
    },

    /// Buy books and print the receipt
    Checkout {
        /// Book ids; repeat an id to buy more copies
        #[arg(required = true)]
        books: Vec<String>,
    },

    /// Page through a book
    Read(ReadArgs),
}

#[derive(Debug, Args)]
struct BrowseArgs {
    /// Search text
    #[arg(short, long, default_value = "")]
    search: String,

    /// Category name, or "All"
    #[arg(short, long, default_value = CategoryFilter::ALL)]
    category: String,

    /// Sort order: popular, price-low, price-high or rating
    #[arg(long, default_value = "popular")]
    sort: String,

    /// Lowest price
    #[arg(long, default_value = "0")]
    min_price: Decimal,

    /// Highest price
    #[arg(long, default_value = "50")]
    max_price: Decimal,

    /// Minimum rating
    #[arg(long, default_value = "0")]
    min_rating: Decimal,
}

#[derive(Debug, Args)]
struct ReadArgs {
    /// Book id
    book: String,

    /// Page to jump to
    #[arg(short, long, default_value_t = 1)]
    page: u32,

    /// Buy the book before reading
    #[arg(long)]
    buy: bool,

    /// Switch between light and dark before reading
    #[arg(long)]
    toggle_theme: bool,

    /// Preference file for theme and font size
    #[arg(long, env = "BOOKSTALL_PREFS", default_value = "target/reader-prefs.yml")]
    prefs: PathBuf,
}

/// Storefront Demo
pub fn main() -> Result<()> {
    _ = dotenvy::dotenv();

    let config = DemoConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let catalog = Fixture::with_base_path(&config.fixtures_dir).load_catalog(&config.fixture)?;
    let mut storefront = Storefront::start_session(catalog);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.command {
        Command::Browse(args) => browse(&storefront, &args, &mut out)?,
        Command::Search { query } => {
            let results = storefront.catalog().quick_search(&query);

            if results.is_empty() {
                writeln!(out, "No books found for \"{query}\"")?;
            } else {
                write_books(&mut out, &results)?;
            }
        }
        Command::Checkout { books } => {
            for id in &books {
                storefront.add_book(id)?;
            }

            storefront.checkout()?.write_to(&mut out)?;
        }
        Command::Read(args) => read(&mut storefront, &args, &mut out)?,
    }

    Ok(())
}

fn browse(storefront: &Storefront, args: &BrowseArgs, out: &mut impl Write) -> Result<()> {
    let sort = args.sort.parse::<SortOrder>().unwrap_or_else(|err| {
        warn!("{err}; using {}", SortOrder::default());

        SortOrder::default()
    });

    let query = CatalogQuery::search(args.search.clone())
        .with_category(CategoryFilter::from_label(&args.category))
        .with_price(PriceRange::new(args.min_price, args.max_price))
        .with_min_rating(args.min_rating)
        .with_sort(sort);

    let catalog = storefront.catalog();
    let books = query.apply(catalog);

    write_books(out, &books)?;

    writeln!(
        out,
        " Showing {} of {} books ({} filters active, sorted by {})",
        books.len(),
        catalog.len(),
        query.active_filter_count(),
        sort.label()
    )?;
    writeln!(out, " Categories: {}", catalog.categories().join(", "))?;

    Ok(())
}

fn read(storefront: &mut Storefront, args: &ReadArgs, out: &mut impl Write) -> Result<()> {
    if args.buy {
        storefront.add_book(&args.book)?;
        storefront.checkout()?;
    }

    let mut display = ReaderDisplay::mount(YamlFileStorage::open(&args.prefs)?);

    if args.toggle_theme {
        display.toggle_theme()?;
    }

    let prefs = display.preferences();
    let mut reader = storefront.open_reader(&args.book)?;
    let cart = storefront.cart()?;

    reader.go_to_page(cart, args.page);

    let access = reader.access(cart);

    writeln!(out, "{}", reader.title())?;
    writeln!(
        out,
        "Page {} / {}{}",
        reader.current_page(),
        reader.total_pages(),
        if reader.is_purchased(cart) { "" } else { "  [Preview]" }
    )?;
    writeln!(
        out,
        "Theme: {}  Font: {}",
        prefs.theme,
        prefs.font_size
    )?;
    writeln!(out)?;

    if reader.is_preview_locked(cart) {
        writeln!(out, "Preview limit reached. Purchase to unlock all {} pages.", reader.total_pages())?;
    } else if reader.is_purchased(cart) {
        writeln!(out, "{}", reader.heading(cart))?;
    } else {
        writeln!(out, "{}", reader.preview_text())?;
    }

    if args.page > access.effective_max_page {
        writeln!(
            out,
            "\n(requested page {} is past the last readable page {})",
            args.page, access.effective_max_page
        )?;
    }

    writeln!(out, "\nProgress: {}%", reader.progress_points())?;

    Ok(())
}

fn write_books(out: &mut impl Write, books: &[&Book]) -> Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Title", "Author", "Category", "Rating", "Price"]);

    for book in books {
        builder.push_record([
            book.id.to_string(),
            book.title.clone(),
            book.author.clone(),
            book.category.clone(),
            book.rating.to_string(),
            book.price.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());

    writeln!(out, "{table}")?;

    Ok(())
}
