use regex::Regex;

use crate::model::{PageLines, TitleMatch};

/// Runs the title pattern over each line of the page, in line order. Every
/// match carries the top coordinate of the line it was found on.
pub(crate) fn find_titles(page: &PageLines, pattern: &Regex) -> Vec<TitleMatch> {
    let mut titles = Vec::new();
    for line in &page.lines {
        for found in pattern.find_iter(&line.text) {
            titles.push(TitleMatch {
                text: found.as_str().to_string(),
                top: line.top,
            });
        }
    }
    titles
}

/// Picks the title closest above the table: among titles with `top` strictly
/// less than `table_top`, the greatest `top` wins. Ties resolve to the first
/// title in scan order.
pub(crate) fn associate<'a>(titles: &'a [TitleMatch], table_top: f64) -> Option<&'a TitleMatch> {
    let mut best: Option<&TitleMatch> = None;
    for title in titles.iter().filter(|title| title.top < table_top) {
        match best {
            Some(current) if title.top <= current.top => {}
            _ => best = Some(title),
        }
    }
    best
}
