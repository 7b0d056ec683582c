use scraper::{Html, Selector};

/// Pull every anchor href out of an HTML document, in document order.
/// Malformed markup yields whatever the parser can salvage.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a[href]").unwrap();

    document
        .select(&link_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

/// Pull `<loc>` values out of a sitemap document (urlset or sitemap index).
pub fn extract_sitemap_locs(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);
    let loc_selector = Selector::parse("loc").unwrap();

    document
        .select(&loc_selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|loc| !loc.is_empty())
        .collect()
}
