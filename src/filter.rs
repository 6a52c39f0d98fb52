//! Catalog filter engine.
//!
//! [`filter_catalog`] narrows a product list by free-text search and the
//! categorical [`Filters`]. Stages run in a fixed order; each stage is a
//! pass-through when its selection is empty.
//!
//! Most categories are permissive when the product carries no data for them
//! (an artwork without a size list is shown whatever sizes are selected).
//! Collection is the exception: a product without a product type is hidden as
//! soon as any collection is selected.

use crate::types::{Artwork, FilterKind, Filters};
use std::collections::BTreeSet;

/// Orientation terms recognized in product tags.
pub const ORIENTATION_TERMS: [&str; 5] = ["portrait", "landscape", "square", "horizontal", "vertical"];

/// Returns the products matching `criteria`, in catalog order.
pub fn filter_catalog<'a>(products: &'a [Artwork], criteria: &Filters) -> Vec<&'a Artwork> {
    let query = criteria.search_query.to_lowercase();
    let colors = lowered(&criteria.color);
    let orientations = lowered(&criteria.orientation);
    let styles = lowered(&criteria.style);
    let collections = lowered(&criteria.collection);
    let artists = lowered(&criteria.artist);
    let rooms = lowered(&criteria.room);
    let sizes: Vec<String> = criteria
        .size
        .iter()
        .map(|s| normalize_size(s))
        .filter(|s| !s.is_empty())
        .collect();

    products
        .iter()
        .filter(|p| query.is_empty() || matches_search(p, &query))
        .filter(|p| sizes.is_empty() || matches_size(p, &sizes))
        .filter(|p| colors.is_empty() || matches_color(p, &colors))
        .filter(|p| orientations.is_empty() || matches_orientation(p, &orientations))
        .filter(|p| styles.is_empty() || matches_style(p, &styles))
        .filter(|p| collections.is_empty() || matches_collection(p, &collections))
        .filter(|p| artists.is_empty() || matches_artist(p, &artists))
        .filter(|p| rooms.is_empty() || matches_room(p, &rooms))
        .collect()
}

/// Canonical form of a print size: no whitespace, no multiplication sign,
/// no unit, lowercase. `"50 x 70 cm"` and `"50×70"` both become `"5070"`.
pub fn normalize_size(size: &str) -> String {
    size.to_lowercase()
        .replace("cm", "")
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, 'x' | '×' | '*'))
        .collect()
}

fn lowered(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Case-insensitive substring match in either direction. `needle` is
/// expected lowercase already.
fn either_contains(value: &str, needle: &str) -> bool {
    let value = value.trim().to_lowercase();
    if value.is_empty() {
        return false;
    }
    value.contains(needle) || needle.contains(value.as_str())
}

fn any_either(values: &[String], needle: &str) -> bool {
    values.iter().any(|v| either_contains(v, needle))
}

fn matches_search(product: &Artwork, query: &str) -> bool {
    let haystack = format!("{} {} {}", product.title, product.category, product.tags.join(" "));
    haystack.to_lowercase().contains(query)
}

fn matches_size(product: &Artwork, selected: &[String]) -> bool {
    if product.sizes.is_empty() {
        return true;
    }
    product.sizes.iter().map(|s| normalize_size(s)).any(|size| {
        !size.is_empty()
            && selected
                .iter()
                .any(|wanted| size == *wanted || size.contains(wanted.as_str()) || wanted.contains(size.as_str()))
    })
}

fn matches_color(product: &Artwork, selected: &[String]) -> bool {
    let label = format!("{}{}", product.category, product.title);
    selected.iter().any(|color| {
        any_either(&product.colors, color) || any_either(&product.tags, color) || either_contains(&label, color)
    })
}

fn matches_orientation(product: &Artwork, selected: &[String]) -> bool {
    let tags: Vec<String> = product
        .tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| ORIENTATION_TERMS.contains(&t.as_str()))
        .collect();
    if tags.is_empty() {
        return true;
    }
    selected.iter().any(|o| tags.iter().any(|t| t == o))
}

fn tag_mentions_any(product: &Artwork, selected: &[String]) -> bool {
    product
        .tags
        .iter()
        .map(|t| t.to_lowercase())
        .any(|t| selected.iter().any(|s| t.contains(s.as_str())))
}

fn matches_style(product: &Artwork, selected: &[String]) -> bool {
    if product.styles.is_empty() && !tag_mentions_any(product, selected) {
        return true;
    }
    selected
        .iter()
        .any(|style| any_either(&product.styles, style) || any_either(&product.tags, style))
}

fn matches_collection(product: &Artwork, selected: &[String]) -> bool {
    let Some(product_type) = product.product_type.as_deref().filter(|t| !t.trim().is_empty()) else {
        return false;
    };
    selected.iter().any(|c| either_contains(product_type, c))
}

fn matches_artist(product: &Artwork, selected: &[String]) -> bool {
    if product.artists.is_empty() {
        return true;
    }
    let vendor = product.vendor.as_deref().unwrap_or_default();
    selected.iter().any(|artist| {
        any_either(&product.artists, artist) || either_contains(vendor, artist) || any_either(&product.tags, artist)
    })
}

fn matches_room(product: &Artwork, selected: &[String]) -> bool {
    if product.rooms.is_empty() && !tag_mentions_any(product, selected) {
        return true;
    }
    selected
        .iter()
        .any(|room| any_either(&product.rooms, room) || any_either(&product.tags, room))
}

/// Distinct values of one filter found in `products`, sorted. Feeds the filter chips.
pub fn available_values(products: &[Artwork], kind: FilterKind) -> Vec<String> {
    let mut values = BTreeSet::new();
    for product in products {
        match kind {
            FilterKind::Size => values.extend(product.sizes.iter().cloned()),
            FilterKind::Color => values.extend(product.colors.iter().cloned()),
            FilterKind::Orientation => values.extend(
                product
                    .tags
                    .iter()
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| ORIENTATION_TERMS.contains(&t.as_str())),
            ),
            FilterKind::Style => values.extend(product.styles.iter().cloned()),
            FilterKind::Collection => values.extend(product.product_type.iter().cloned()),
            FilterKind::Artist => values.extend(product.artists.iter().cloned()),
            FilterKind::Room => values.extend(product.rooms.iter().cloned()),
        }
    }
    values.into_iter().filter(|v| !v.trim().is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn available_values_are_distinct_and_sorted() {
        let mut a = artwork("a");
        a.colors = vec!["red".into(), "blue".into()];
        a.tags = vec!["Landscape".into(), "sea".into()];
        let mut b = artwork("b");
        b.colors = vec!["blue".into()];
        b.product_type = Some("Posters".into());
        let products = vec![a, b];
        assert_eq!(available_values(&products, FilterKind::Color), vec!["blue", "red"]);
        assert_eq!(available_values(&products, FilterKind::Orientation), vec!["landscape"]);
        assert_eq!(available_values(&products, FilterKind::Collection), vec!["Posters"]);
        assert!(available_values(&products, FilterKind::Artist).is_empty());
    }

    fn artwork(id: &str) -> Artwork {
        Artwork {
            id: id.into(),
            title: format!("Artwork {id}"),
            ..Default::default()
        }
    }

    fn ids(found: Vec<&Artwork>) -> Vec<String> {
        found.into_iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn empty_criteria_pass_everything() {
        let products = vec![artwork("a"), artwork("b")];
        assert_eq!(ids(filter_catalog(&products, &Filters::default())), vec!["a", "b"]);
    }

    #[test]
    fn search_looks_at_title_category_and_tags() {
        let mut a = artwork("a");
        a.title = "Blue Harbour".into();
        let mut b = artwork("b");
        b.category = "Botanical".into();
        let mut c = artwork("c");
        c.tags = vec!["Ocean".into()];
        let products = vec![a, b, c];

        let mut criteria = Filters { search_query: "harbour".into(), ..Default::default() };
        assert_eq!(ids(filter_catalog(&products, &criteria)), vec!["a"]);
        criteria.search_query = "BOTAN".into();
        assert_eq!(ids(filter_catalog(&products, &criteria)), vec!["b"]);
        criteria.search_query = "ocean".into();
        assert_eq!(ids(filter_catalog(&products, &criteria)), vec!["c"]);
    }

    #[test]
    fn search_matches_the_query_as_typed() {
        let mut a = artwork("a");
        a.title = "Deep Blue".into();
        let mut b = artwork("b");
        b.title = "Blue Hour".into();
        let products = vec![a, b];

        // Titles lead the searched text, so "Blue Hour" has no space before "blue"
        let criteria = Filters { search_query: " blue".into(), ..Default::default() };
        assert_eq!(ids(filter_catalog(&products, &criteria)), vec!["a"]);
    }

    #[test]
    fn size_normalization_ignores_spacing_units_and_sign() {
        assert_eq!(normalize_size("50 x 70 cm"), "5070");
        assert_eq!(normalize_size("50×70"), "5070");
        assert_eq!(normalize_size("50X70CM"), "5070");
    }

    #[test]
    fn size_filter_matches_normalized_sizes() {
        let mut a = artwork("a");
        a.sizes = vec!["50 x 70 cm".into()];
        let mut b = artwork("b");
        b.sizes = vec!["30x40".into()];
        let products = vec![a, b];
        let criteria = Filters { size: vec!["50×70".into()], ..Default::default() };
        assert_eq!(ids(filter_catalog(&products, &criteria)), vec!["a"]);
    }

    #[test]
    fn color_matches_colors_tags_or_title() {
        let mut a = artwork("a");
        a.colors = vec!["Dark Blue".into()];
        let mut b = artwork("b");
        b.tags = vec!["blue".into()];
        let mut c = artwork("c");
        c.title = "Blue Hour".into();
        let d = artwork("d");
        let products = vec![a, b, c, d];
        let criteria = Filters { color: vec!["Blue".into()], ..Default::default() };
        assert_eq!(ids(filter_catalog(&products, &criteria)), vec!["a", "b", "c"]);
    }

    #[test]
    fn orientation_is_permissive_without_orientation_tags() {
        let mut a = artwork("a");
        a.tags = vec!["Portrait".into()];
        let mut b = artwork("b");
        b.tags = vec!["landscape".into()];
        let mut c = artwork("c");
        c.tags = vec!["abstract".into()];
        let products = vec![a, b, c];
        let criteria = Filters { orientation: vec!["portrait".into()], ..Default::default() };
        assert_eq!(ids(filter_catalog(&products, &criteria)), vec!["a", "c"]);
    }

    #[test]
    fn style_matches_styles_list_and_passes_when_absent() {
        let mut a = artwork("a");
        a.styles = vec!["Minimalist".into()];
        let mut b = artwork("b");
        b.styles = vec!["Vintage".into()];
        let c = artwork("c");
        let products = vec![a, b, c];
        let criteria = Filters { style: vec!["minimal".into()], ..Default::default() };
        assert_eq!(ids(filter_catalog(&products, &criteria)), vec!["a", "c"]);
    }

    #[test]
    fn collection_excludes_products_without_type() {
        let mut a = artwork("a");
        a.product_type = Some("Posters".into());
        let mut b = artwork("b");
        b.product_type = Some("Canvas".into());
        let mut c = artwork("c");
        c.product_type = Some("  ".into());
        let d = artwork("d");
        let products = vec![a, b, c, d];
        let criteria = Filters { collection: vec!["poster".into()], ..Default::default() };
        assert_eq!(ids(filter_catalog(&products, &criteria)), vec!["a"]);
    }

    #[test]
    fn artist_matches_vendor_and_tags() {
        let mut a = artwork("a");
        a.artists = vec!["Ana Lind".into()];
        let mut b = artwork("b");
        b.artists = vec!["Other".into()];
        b.vendor = Some("Ana Lind Studio".into());
        let mut c = artwork("c");
        c.artists = vec!["Someone".into()];
        let d = artwork("d");
        let products = vec![a, b, c, d];
        let criteria = Filters { artist: vec!["ana lind".into()], ..Default::default() };
        assert_eq!(ids(filter_catalog(&products, &criteria)), vec!["a", "b", "d"]);
    }

    #[test]
    fn room_uses_rooms_list_and_tags() {
        let mut a = artwork("a");
        a.rooms = vec!["Living Room".into()];
        let mut b = artwork("b");
        b.rooms = vec!["Kitchen".into()];
        let mut c = artwork("c");
        c.tags = vec!["living room favourite".into()];
        let products = vec![a, b, c];
        let criteria = Filters { room: vec!["living room".into()], ..Default::default() };
        assert_eq!(ids(filter_catalog(&products, &criteria)), vec!["a", "c"]);
    }

    #[test]
    fn stages_combine_as_intersection() {
        let mut a = artwork("a");
        a.colors = vec!["red".into()];
        a.product_type = Some("Posters".into());
        let mut b = artwork("b");
        b.colors = vec!["red".into()];
        let products = vec![a, b];
        let criteria = Filters {
            color: vec!["red".into()],
            collection: vec!["posters".into()],
            ..Default::default()
        };
        assert_eq!(ids(filter_catalog(&products, &criteria)), vec!["a"]);
    }

    proptest! {
        #[test]
        fn products_without_sizes_always_pass_size_filter(sizes in proptest::collection::vec("[0-9]{2}x[0-9]{2}", 0..4)) {
            let products = vec![artwork("a")];
            let criteria = Filters { size: sizes, ..Default::default() };
            prop_assert_eq!(filter_catalog(&products, &criteria).len(), 1);
        }

        #[test]
        fn untyped_products_follow_collection_activity(collections in proptest::collection::vec("[a-z]{1,8}", 0..4)) {
            let products = vec![artwork("a")];
            let active = !collections.is_empty();
            let criteria = Filters { collection: collections, ..Default::default() };
            let found = filter_catalog(&products, &criteria).len();
            prop_assert_eq!(found, if active { 0 } else { 1 });
        }
    }
}
