//! Catalog browsing against the demo fixture set.

use rust_decimal::Decimal;
use testresult::TestResult;

use bookstall::{
    catalog::{CatalogQuery, CategoryFilter, PriceRange, SortOrder},
    fixtures::Fixture,
};

#[test]
fn default_catalog_page_hides_books_above_price_cap() -> TestResult {
    let catalog = Fixture::from_set("demo")?;

    let books = CatalogQuery::default().apply(&catalog);

    assert_eq!(books.len(), catalog.len() - 1);
    assert!(books.iter().all(|book| book.id.as_str() != "12"));

    Ok(())
}

#[test]
fn popular_sort_is_by_review_count() -> TestResult {
    let catalog = Fixture::from_set("demo")?;

    let books = CatalogQuery::default().apply(&catalog);

    assert!(
        books.windows(2).all(|pair| match pair {
            [a, b] => a.reviews >= b.reviews,
            _ => true,
        }),
        "books should be ordered by descending review count"
    );
    assert_eq!(books.first().map(|book| book.id.as_str()), Some("2"));

    Ok(())
}

#[test]
fn fiction_under_fifteen_by_price() -> TestResult {
    let catalog = Fixture::from_set("demo")?;

    let query = CatalogQuery::default()
        .with_category(CategoryFilter::from_label("Fiction"))
        .with_price(PriceRange::new(Decimal::ZERO, Decimal::new(15, 0)))
        .with_sort(SortOrder::PriceLow);

    let ids: Vec<&str> = query.apply(&catalog).iter().map(|book| book.id.as_str()).collect();

    assert_eq!(ids, ["1", "5"]);
    assert_eq!(query.active_filter_count(), 2);

    Ok(())
}

#[test]
fn minimum_rating_filters_out_lower_rated_books() -> TestResult {
    let catalog = Fixture::from_set("demo")?;

    let query = CatalogQuery::default()
        .with_min_rating(Decimal::new(47, 1))
        .with_sort(SortOrder::Rating);

    let ids: Vec<&str> = query.apply(&catalog).iter().map(|book| book.id.as_str()).collect();

    assert_eq!(ids, ["2", "1", "3", "7"]);

    Ok(())
}

#[test]
fn search_finds_by_author_and_category() -> TestResult {
    let catalog = Fixture::from_set("demo")?;

    let by_author = catalog.quick_search("harari");
    let by_category = CatalogQuery::search("self-help").apply(&catalog);

    assert_eq!(by_author.first().map(|book| book.title.as_str()), Some("Sapiens"));
    assert_eq!(by_category.len(), 2);

    Ok(())
}

#[test]
fn unknown_sort_string_is_rejected() {
    assert!("newest".parse::<SortOrder>().is_err());
    assert_eq!("price-high".parse::<SortOrder>(), Ok(SortOrder::PriceHigh));
}

#[test]
fn home_page_shelves() -> TestResult {
    let catalog = Fixture::from_set("demo")?;

    let bestsellers: Vec<&str> = catalog.bestsellers().iter().map(|book| book.id.as_str()).collect();

    assert_eq!(bestsellers, ["1", "2", "4", "6"]);
    assert_eq!(catalog.trending().len(), 6);
    assert_eq!(catalog.new_releases().len(), 4);

    let sapiens = catalog.get("6").ok_or("demo set should contain Sapiens")?;
    let related: Vec<&str> = catalog.related(sapiens).iter().map(|book| book.id.as_str()).collect();

    assert_eq!(related, ["12"]);

    Ok(())
}
